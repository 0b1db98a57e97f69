//! HTTP client for the recommendation service.
//!
//! Two endpoints exist: `GET /books` returns the full catalog, and
//! `POST /api/recommendations` turns a flattened preference list into a
//! ranked selection. Both respond with a JSON array of book objects; a
//! non-success status or any other body shape is a fetch failure. There are
//! no retries and no request timeout; a failed fetch surfaces one error and
//! the caller clears its result set.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::browse::Searchable;

/// One book as the service reports it.
///
/// Every field tolerates absence: missing text fields deserialize to empty
/// strings (and never match a non-empty search query), a missing rating
/// becomes `0.0`. `categories` is a comma-joined list.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Book {
    /// Book title.
    #[serde(default)]
    pub title: String,
    /// Author name(s).
    #[serde(default)]
    pub authors: String,
    /// Comma-joined category list.
    #[serde(default)]
    pub categories: String,
    /// Average rating on a 0–5 scale; display only.
    #[serde(default)]
    pub average_rating: f64,
    /// Long-form description.
    #[serde(default)]
    pub description: String,
    /// Cover image URL; unused by the terminal views.
    #[serde(default)]
    pub thumbnail: String,
}

impl Book {
    /// Returns up to `limit` trimmed, non-empty category names.
    pub fn category_chips(&self, limit: usize) -> Vec<&str> {
        self.categories
            .split(',')
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .take(limit)
            .collect()
    }
}

impl Searchable for Book {
    fn search_fields(&self) -> Vec<&str> {
        vec![&self.title, &self.authors, &self.categories]
    }
}

#[derive(Debug, Serialize)]
struct RecommendationRequest<'a> {
    preferences: &'a [String],
}

/// Why a fetch failed.
///
/// Transport and shape problems are distinct variants for logging, but the
/// pages collapse them into a single user-visible message via `Display`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a usable response.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("server responded with status {0}")]
    Status(u16),

    /// The body was not a JSON array of book objects.
    #[error("response body was not a list of books")]
    Shape,
}

/// Client for the recommendation service.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base: String,
}

impl ApiClient {
    /// Creates a client for the service at `base` (trailing slash optional).
    pub fn new(base: impl Into<String>) -> Self {
        let mut base = base.into();
        while base.ends_with('/') {
            base.pop();
        }
        Self {
            http: reqwest::Client::new(),
            base,
        }
    }

    /// Returns the configured base URL.
    pub fn base_url(&self) -> &str {
        &self.base
    }

    /// Fetches the full catalog.
    pub async fn catalog(&self) -> Result<Vec<Book>, ApiError> {
        let url = format!("{}/books", self.base);
        debug!(%url, "fetching catalog");
        let response = self.http.get(&url).send().await?;
        decode_books(response).await
    }

    /// Posts the flattened preference list and returns the recommendations.
    pub async fn recommend(&self, preferences: &[String]) -> Result<Vec<Book>, ApiError> {
        let url = format!("{}/api/recommendations", self.base);
        debug!(%url, count = preferences.len(), "requesting recommendations");
        let response = self
            .http
            .post(&url)
            .json(&RecommendationRequest { preferences })
            .send()
            .await?;
        decode_books(response).await
    }
}

async fn decode_books(response: reqwest::Response) -> Result<Vec<Book>, ApiError> {
    let status = response.status();
    if !status.is_success() {
        return Err(ApiError::Status(status.as_u16()));
    }
    let body: serde_json::Value = response.json().await?;
    parse_books(body)
}

/// Decodes a response body into books, enforcing the array-shape contract.
fn parse_books(body: serde_json::Value) -> Result<Vec<Book>, ApiError> {
    let serde_json::Value::Array(items) = body else {
        return Err(ApiError::Shape);
    };
    items
        .into_iter()
        .map(|item| serde_json::from_value(item).map_err(|_| ApiError::Shape))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn books_deserialize_with_defaults() {
        let body = json!([
            {
                "title": "Project Hail Mary",
                "authors": "Andy Weir",
                "categories": "Science Fiction, Adventure",
                "average_rating": 4.5,
                "description": "A lone astronaut.",
                "thumbnail": "http://example.com/cover.jpg"
            },
            { "title": "Untitled" }
        ]);
        let books = parse_books(body).unwrap();
        assert_eq!(books.len(), 2);
        assert_eq!(books[0].authors, "Andy Weir");
        assert_eq!(books[1].authors, "");
        assert_eq!(books[1].average_rating, 0.0);
    }

    #[test]
    fn non_array_body_is_a_shape_failure() {
        let body = json!({ "error": "backend asleep" });
        assert!(matches!(parse_books(body), Err(ApiError::Shape)));
    }

    #[test]
    fn non_object_entry_is_a_shape_failure() {
        let body = json!(["just a string"]);
        assert!(matches!(parse_books(body), Err(ApiError::Shape)));
    }

    #[test]
    fn category_chips_trim_and_cap() {
        let book = Book {
            title: String::new(),
            authors: String::new(),
            categories: " Fantasy , Adventure,, Epic , Extra".to_string(),
            average_rating: 0.0,
            description: String::new(),
            thumbnail: String::new(),
        };
        assert_eq!(book.category_chips(3), vec!["Fantasy", "Adventure", "Epic"]);
    }

    #[test]
    fn request_payload_shape() {
        let preferences = vec!["Fantasy".to_string(), "daily".to_string()];
        let payload = serde_json::to_value(RecommendationRequest {
            preferences: &preferences,
        })
        .unwrap();
        assert_eq!(payload, json!({ "preferences": ["Fantasy", "daily"] }));
    }

    #[test]
    fn error_messages_are_nonempty() {
        assert!(!ApiError::Status(500).to_string().is_empty());
        assert!(!ApiError::Shape.to_string().is_empty());
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let client = ApiClient::new("http://localhost:5000/");
        assert_eq!(client.base_url(), "http://localhost:5000");
    }
}
