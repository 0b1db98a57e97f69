//! Message taxonomy for the application.
//!
//! All cross-page communication goes through these typed messages instead of
//! ad-hoc `Any` payloads. Fetch results carry the generation number (`seq`)
//! of the fetch that produced them; the router drops results whose
//! generation is no longer current, so a late response can never overwrite
//! newer state.

use bubbletea_rs::{Cmd, Msg};

use crate::api::Book;

/// The application's pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    /// Landing page.
    #[default]
    Home,
    /// Multi-step preference quiz.
    Quiz,
    /// Catalog search.
    Search,
    /// Recommendation results.
    Results,
}

impl Page {
    /// Display name used in the header.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Quiz => "Reading Quiz",
            Self::Search => "Book Search",
            Self::Results => "Recommendations",
        }
    }
}

/// Switch to another page.
#[derive(Debug, Clone, Copy)]
pub struct NavigateMsg(pub Page);

/// The catalog fetch finished successfully.
#[derive(Debug)]
pub struct CatalogLoadedMsg {
    /// Generation of the fetch that produced this result.
    pub seq: u64,
    /// The full catalog, in service order.
    pub books: Vec<Book>,
}

/// The catalog fetch failed.
#[derive(Debug)]
pub struct CatalogFailedMsg {
    /// Generation of the fetch that produced this result.
    pub seq: u64,
    /// User-facing description of the failure.
    pub error: String,
}

/// The quiz asked for its answers to be submitted.
#[derive(Debug)]
pub struct SubmitQuizMsg {
    /// Flattened, empty-stripped preference strings.
    pub preferences: Vec<String>,
}

/// The recommendation request finished successfully.
#[derive(Debug)]
pub struct RecommendationsLoadedMsg {
    /// Generation of the request that produced this result.
    pub seq: u64,
    /// Recommended books, best match first.
    pub books: Vec<Book>,
}

/// The recommendation request failed.
#[derive(Debug)]
pub struct RecommendationsFailedMsg {
    /// Generation of the request that produced this result.
    pub seq: u64,
    /// User-facing description of the failure.
    pub error: String,
}

/// Wraps a message in a command that delivers it on the next loop turn.
pub fn emit<M: Send + 'static>(msg: M) -> Cmd {
    Box::pin(async move { Some(Box::new(msg) as Msg) })
}
