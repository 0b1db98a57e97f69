//! Incremental catalog browsing: a filtered list revealed page by page.
//!
//! This module is the state machine behind the search page. A [`Model`] owns
//! the full fetched catalog and derives a bounded display list from it under
//! three triggers: a completed fetch (`load`/`fail`), a query edit
//! (`set_query`), and a reveal signal (`reveal_more`).
//!
//! ## State shape
//!
//! - `source`: the full ordered record list, replaced wholesale per fetch
//! - `query`: the live filter string
//! - `visible`: how many filtered records may be shown; a multiple of
//!   [`PAGE_SIZE`], reset whenever the query changes
//! - `filtered`: indices of records matching the query, in `source` order
//!
//! `displayed` is always the prefix of `filtered` of length
//! `min(visible, filtered.len())`, so revealing past the end and repeated
//! reveal calls are harmless.
//!
//! ## Filtering
//!
//! Matching is a case-insensitive substring test against each of an item's
//! [`Searchable::search_fields`], OR-combined. A query that is empty or only
//! whitespace matches everything. Filtering never reorders: `filtered` is a
//! subsequence of `source`.
//!
//! All transitions are value-to-value (`self -> Self`) so the whole machine
//! is testable without a terminal, and identical `(source, query)` always
//! produce identical results regardless of what happened before.
//!
//! The reveal signal itself comes from [`trigger::RevealTrigger`], which
//! models the "last row scrolled into view" subscription.

mod model;
pub mod trigger;
mod types;


pub use model::{Model, PAGE_SIZE};
pub use trigger::RevealTrigger;
pub use types::Searchable;
