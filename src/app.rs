//! Top-level application model: page routing and fetch dispatch.
//!
//! `App` owns the four page models and the HTTP client. Pages never fetch;
//! they emit messages and the router dispatches commands. Every fetch gets a
//! fresh generation number and every response carries the number of the
//! fetch that produced it. Responses from superseded fetches are dropped,
//! so a slow response can never overwrite newer state.

use bubbletea_rs::{batch, quit, Cmd, KeyMsg, Model as BubbleTeaModel, Msg, WindowSizeMsg};
use crossterm::event::{KeyCode, KeyModifiers};
use tracing::{info, warn};

use crate::api::ApiClient;
use crate::config::Config;
use crate::messages::{
    CatalogFailedMsg, CatalogLoadedMsg, NavigateMsg, Page, RecommendationsFailedMsg,
    RecommendationsLoadedMsg, SubmitQuizMsg,
};
use crate::pages::{home, quiz, results, search};
use crate::theme::{AppStyles, BULLET};

/// Application state: the active page, the page models, and the client.
pub struct App {
    page: Page,
    home: home::Model,
    quiz: quiz::Model,
    search: search::Model,
    results: results::Model,
    client: ApiClient,
    fetch_seq: u64,
    styles: AppStyles,
    width: usize,
    height: usize,
}

impl BubbleTeaModel for App {
    fn init() -> (Self, Option<Cmd>) {
        let config = Config::global();
        let client = ApiClient::new(&config.api_url);
        info!(base = client.base_url(), "starting");
        let app = Self {
            page: Page::Home,
            home: home::Model::new(),
            quiz: quiz::Model::new(),
            search: search::Model::new(),
            results: results::Model::new(),
            client,
            fetch_seq: 0,
            styles: AppStyles::default(),
            width: 80,
            height: 24,
        };
        (app, None)
    }

    fn update(&mut self, msg: Msg) -> Option<Cmd> {
        if let Some(size) = msg.downcast_ref::<WindowSizeMsg>() {
            self.width = size.width as usize;
            self.height = size.height as usize;
            self.resize_pages();
            return None;
        }

        if let Some(key) = msg.downcast_ref::<KeyMsg>() {
            if key.key == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                return Some(quit());
            }
        }

        if let Some(nav) = msg.downcast_ref::<NavigateMsg>() {
            return self.navigate(nav.0);
        }

        if let Some(loaded) = msg.downcast_ref::<CatalogLoadedMsg>() {
            if loaded.seq != self.fetch_seq {
                warn!(seq = loaded.seq, current = self.fetch_seq, "dropping stale catalog");
                return None;
            }
            info!(count = loaded.books.len(), "catalog loaded");
            self.search.catalog_loaded(loaded.books.clone());
            return None;
        }
        if let Some(failed) = msg.downcast_ref::<CatalogFailedMsg>() {
            if failed.seq != self.fetch_seq {
                warn!(seq = failed.seq, current = self.fetch_seq, "dropping stale failure");
                return None;
            }
            warn!(error = %failed.error, "catalog fetch failed");
            self.search.catalog_failed(failed.error.clone());
            return None;
        }

        if let Some(submit) = msg.downcast_ref::<SubmitQuizMsg>() {
            self.fetch_seq += 1;
            info!(count = submit.preferences.len(), "submitting preferences");
            return Some(fetch_recommendations(
                self.client.clone(),
                self.fetch_seq,
                submit.preferences.clone(),
            ));
        }
        if let Some(loaded) = msg.downcast_ref::<RecommendationsLoadedMsg>() {
            if loaded.seq != self.fetch_seq {
                warn!(seq = loaded.seq, current = self.fetch_seq, "dropping stale recommendations");
                return None;
            }
            info!(count = loaded.books.len(), "recommendations loaded");
            self.quiz.submit_finished(None);
            self.results.set_books(loaded.books.clone());
            self.page = Page::Results;
            return None;
        }
        if let Some(failed) = msg.downcast_ref::<RecommendationsFailedMsg>() {
            if failed.seq != self.fetch_seq {
                warn!(seq = failed.seq, current = self.fetch_seq, "dropping stale failure");
                return None;
            }
            warn!(error = %failed.error, "recommendation request failed");
            self.quiz.submit_finished(Some(failed.error.clone()));
            return None;
        }

        match self.page {
            Page::Home => self.home.update(&msg),
            Page::Quiz => self.quiz.update(&msg),
            Page::Search => self.search.update(&msg),
            Page::Results => self.results.update(&msg),
        }
    }

    fn view(&self) -> String {
        let header = self
            .styles
            .dim
            .render(&format!("Book Recommender {BULLET} {}", self.page.name()));
        let body = match self.page {
            Page::Home => self.home.view(),
            Page::Quiz => self.quiz.view(),
            Page::Search => self.search.view(),
            Page::Results => self.results.view(),
        };
        format!("{header}\n\n{body}")
    }
}

impl App {
    /// The active page.
    pub fn page(&self) -> Page {
        self.page
    }

    /// Read access to the search page (mainly for tests).
    pub fn search(&self) -> &search::Model {
        &self.search
    }

    /// Read access to the quiz page (mainly for tests).
    pub fn quiz(&self) -> &quiz::Model {
        &self.quiz
    }

    fn resize_pages(&mut self) {
        self.home.resize(self.width, self.height);
        self.quiz.resize(self.width, self.height);
        self.search.resize(self.width, self.height);
        self.results.resize(self.width, self.height);
    }

    fn navigate(&mut self, page: Page) -> Option<Cmd> {
        info!(page = page.name(), "navigate");
        match page {
            Page::Search => {
                // Each entry refetches the catalog and replaces it wholesale.
                self.page = Page::Search;
                self.fetch_seq += 1;
                let spin = self.search.begin_load();
                Some(batch(vec![
                    spin,
                    fetch_catalog(self.client.clone(), self.fetch_seq),
                ]))
            }
            Page::Quiz => {
                // The quiz always starts fresh, like a remounted form.
                self.quiz = quiz::Model::new();
                self.quiz.resize(self.width, self.height);
                self.page = Page::Quiz;
                None
            }
            other => {
                self.page = other;
                None
            }
        }
    }
}

fn fetch_catalog(client: ApiClient, seq: u64) -> Cmd {
    Box::pin(async move {
        let msg: Msg = match client.catalog().await {
            Ok(books) => Box::new(CatalogLoadedMsg { seq, books }),
            Err(err) => Box::new(CatalogFailedMsg {
                seq,
                error: format!("Failed to fetch books: {err}"),
            }),
        };
        Some(msg)
    })
}

fn fetch_recommendations(client: ApiClient, seq: u64, preferences: Vec<String>) -> Cmd {
    Box::pin(async move {
        let msg: Msg = match client.recommend(&preferences).await {
            Ok(books) => Box::new(RecommendationsLoadedMsg { seq, books }),
            Err(err) => Box::new(RecommendationsFailedMsg {
                seq,
                error: format!("Failed to get recommendations: {err}"),
            }),
        };
        Some(msg)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Book;

    fn boxed<M: Send + 'static>(msg: M) -> Msg {
        Box::new(msg)
    }

    fn books(count: usize) -> Vec<Book> {
        (0..count)
            .map(|i| Book {
                title: format!("Book {i}"),
                authors: String::new(),
                categories: String::new(),
                average_rating: 0.0,
                description: String::new(),
                thumbnail: String::new(),
            })
            .collect()
    }

    #[test]
    fn starts_on_home() {
        let (app, cmd) = App::init();
        assert_eq!(app.page(), Page::Home);
        assert!(cmd.is_none());
    }

    #[test]
    fn ctrl_c_always_quits() {
        let (mut app, _) = App::init();
        let msg: Msg = Box::new(KeyMsg {
            key: KeyCode::Char('c'),
            modifiers: KeyModifiers::CONTROL,
        });
        assert!(app.update(msg).is_some());
    }

    #[test]
    fn navigating_to_search_starts_a_fetch() {
        let (mut app, _) = App::init();
        let cmd = app.update(boxed(NavigateMsg(Page::Search)));
        assert!(cmd.is_some());
        assert_eq!(app.page(), Page::Search);
        assert!(app.search().is_loading());
    }

    #[test]
    fn stale_catalog_responses_are_dropped() {
        let (mut app, _) = App::init();
        app.update(boxed(NavigateMsg(Page::Search)));

        // A response from a previous generation must not land.
        app.update(boxed(CatalogLoadedMsg {
            seq: 0,
            books: books(5),
        }));
        assert!(app.search().is_loading());

        // The current generation does.
        app.update(boxed(CatalogLoadedMsg {
            seq: 1,
            books: books(5),
        }));
        assert!(!app.search().is_loading());
        assert_eq!(app.search().browse().source_len(), 5);
    }

    #[test]
    fn refetch_supersedes_the_older_fetch() {
        let (mut app, _) = App::init();
        app.update(boxed(NavigateMsg(Page::Search)));
        app.update(boxed(NavigateMsg(Page::Home)));
        app.update(boxed(NavigateMsg(Page::Search)));

        // First fetch (seq 1) resolves after the second (seq 2) started.
        app.update(boxed(CatalogLoadedMsg {
            seq: 1,
            books: books(3),
        }));
        assert!(app.search().is_loading());

        app.update(boxed(CatalogLoadedMsg {
            seq: 2,
            books: books(7),
        }));
        assert_eq!(app.search().browse().source_len(), 7);
    }

    #[test]
    fn catalog_failure_reaches_the_search_page() {
        let (mut app, _) = App::init();
        app.update(boxed(NavigateMsg(Page::Search)));
        app.update(boxed(CatalogFailedMsg {
            seq: 1,
            error: "Failed to fetch books: server responded with status 500".to_string(),
        }));
        assert!(app.search().browse().error().is_some());
        assert_eq!(app.search().browse().source_len(), 0);
    }

    #[test]
    fn quiz_submission_round_trip() {
        let (mut app, _) = App::init();
        app.update(boxed(NavigateMsg(Page::Quiz)));

        let cmd = app.update(boxed(SubmitQuizMsg {
            preferences: vec!["Fantasy".to_string()],
        }));
        assert!(cmd.is_some());

        app.update(boxed(RecommendationsLoadedMsg {
            seq: 1,
            books: books(2),
        }));
        assert_eq!(app.page(), Page::Results);
        assert!(!app.quiz().is_submitting());
    }

    #[test]
    fn failed_submission_stays_on_the_quiz() {
        let (mut app, _) = App::init();
        app.update(boxed(NavigateMsg(Page::Quiz)));
        app.update(boxed(SubmitQuizMsg {
            preferences: vec![],
        }));
        app.update(boxed(RecommendationsFailedMsg {
            seq: 1,
            error: "Failed to get recommendations".to_string(),
        }));
        assert_eq!(app.page(), Page::Quiz);
    }
}
