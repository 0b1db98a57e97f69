#![warn(missing_docs)]

//! # bibliotea
//!
//! A terminal client for a book-recommendation web service, built on
//! [bubbletea-rs](https://github.com/whit3rabbit/bubbletea-rs) with
//! lipgloss styling. Four pages:
//!
//! - **Home**: landing page with entry points
//! - **Quiz**: four-step reading-preference quiz
//! - **Search**: the full catalog, filtered live and revealed incrementally
//!   as the last visible row scrolls into view
//! - **Results**: recommendations for the submitted preferences
//!
//! The interesting machinery is in [`browse`]: a pure, reducer-style list
//! view-model (`source` + `query` + visible window) and the at-most-once
//! reveal trigger driving its pagination. Everything else composes that
//! state with the page models in [`pages`], the HTTP client in [`api`], and
//! the router in [`app`].
//!
//! ## Architecture
//!
//! Every component follows the Elm cycle the runtime expects
//! (`init`/`update`/`view`), and all cross-page communication goes through
//! the typed messages in [`messages`]. Pages never touch the network: the
//! router dispatches fetches and stamps each one with a generation number so
//! late responses can't overwrite newer state.
//!
//! ## Running
//!
//! ```bash
//! bibliotea --api-url https://bookrecommenderbackend.onrender.com \
//!     --log-file /tmp/bibliotea.log
//! ```

pub mod api;
pub mod app;
pub mod browse;
pub mod config;
pub mod help;
pub mod input;
pub mod key;
pub mod messages;
pub mod pages;
pub mod spinner;
pub mod theme;

pub use api::{ApiClient, ApiError, Book};
pub use app::App;
pub use messages::Page;
