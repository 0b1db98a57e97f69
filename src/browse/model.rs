//! The browse state machine.

use super::types::Searchable;

/// How many filtered records each load/reveal step makes visible.
pub const PAGE_SIZE: usize = 100;

/// Derived list state for an incrementally revealed, live-filtered catalog.
///
/// See the [module docs](super) for the state shape and transition rules.
/// All transitions consume and return the model; rebind the result:
///
/// ```
/// use bibliotea::browse::Model;
///
/// #[derive(Clone)]
/// struct Word(&'static str);
///
/// impl bibliotea::browse::Searchable for Word {
///     fn search_fields(&self) -> Vec<&str> {
///         vec![self.0]
///     }
/// }
///
/// let state = Model::new().load(vec![Word("alpha"), Word("beta")]);
/// let state = state.set_query("al");
/// assert_eq!(state.displayed_len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct Model<I: Searchable> {
    source: Vec<I>,
    query: String,
    visible: usize,
    filtered: Vec<usize>,
    error: Option<String>,
}

impl<I: Searchable> Default for Model<I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: Searchable> Model<I> {
    /// Creates an empty model: no records, no query, no error.
    pub fn new() -> Self {
        Self {
            source: Vec::new(),
            query: String::new(),
            visible: PAGE_SIZE,
            filtered: Vec::new(),
            error: None,
        }
    }

    /// Replaces the source with a freshly fetched record list.
    ///
    /// Resets the query and the visible window, clears any previous error,
    /// and recomputes the filtered view. Called once per successful fetch;
    /// fetch failures go through [`Model::fail`] instead.
    #[must_use]
    pub fn load(mut self, records: Vec<I>) -> Self {
        self.source = records;
        self.query.clear();
        self.visible = PAGE_SIZE;
        self.error = None;
        self.filtered = filter_indices(&self.source, &self.query);
        self
    }

    /// Records a fetch failure: empty source, no partial state, one message.
    #[must_use]
    pub fn fail(mut self, message: impl Into<String>) -> Self {
        self.source.clear();
        self.filtered.clear();
        self.query.clear();
        self.visible = PAGE_SIZE;
        let message = message.into();
        self.error = Some(if message.is_empty() {
            "the catalog could not be loaded".to_string()
        } else {
            message
        });
        self
    }

    /// Updates the query and recomputes the filtered view.
    ///
    /// Resets the visible window to one page: reveal progress never survives
    /// a query change.
    #[must_use]
    pub fn set_query(mut self, query: &str) -> Self {
        self.query = query.to_string();
        self.visible = PAGE_SIZE;
        self.filtered = filter_indices(&self.source, &self.query);
        self
    }

    /// Widens the visible window by one page.
    ///
    /// The window may exceed the match count; `displayed` clamps, so calling
    /// this when [`Model::has_more`] is false changes nothing visible.
    #[must_use]
    pub fn reveal_more(mut self) -> Self {
        self.visible = self.visible.saturating_add(PAGE_SIZE);
        self
    }

    /// The records currently on display: the visible prefix of the matches.
    pub fn displayed(&self) -> impl Iterator<Item = &I> {
        self.filtered
            .iter()
            .take(self.displayed_len())
            .map(move |&i| &self.source[i])
    }

    /// `min(visible, match count)`.
    pub fn displayed_len(&self) -> usize {
        self.visible.min(self.filtered.len())
    }

    /// Whether more matches exist beyond the visible window.
    pub fn has_more(&self) -> bool {
        self.visible < self.filtered.len()
    }

    /// Number of records matching the current query.
    pub fn match_count(&self) -> usize {
        self.filtered.len()
    }

    /// Total number of records in the source.
    pub fn source_len(&self) -> usize {
        self.source.len()
    }

    /// The current query string.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Size of the visible window (a multiple of [`PAGE_SIZE`]).
    pub fn visible(&self) -> usize {
        self.visible
    }

    /// The fetch error, if the last fetch failed.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Whether the source holds no records at all.
    pub fn is_empty(&self) -> bool {
        self.source.is_empty()
    }
}

/// Indices of `source` records matching `query`, in source order.
///
/// This is the filter as a pure function of `(source, query)`: no other
/// state participates, so identical inputs always yield identical output.
fn filter_indices<I: Searchable>(source: &[I], query: &str) -> Vec<usize> {
    if query.trim().is_empty() {
        return (0..source.len()).collect();
    }
    let needle = query.to_lowercase();
    source
        .iter()
        .enumerate()
        .filter(|(_, item)| {
            item.search_fields()
                .iter()
                .any(|field| field.to_lowercase().contains(&needle))
        })
        .map(|(index, _)| index)
        .collect()
}
