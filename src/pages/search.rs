//! Catalog search page.
//!
//! Fetches the full catalog on entry, then filters it live as the user
//! types and reveals matches incrementally: scrolling the last visible row
//! into view widens the window by one page. The state machine behind this
//! lives in [`crate::browse`]; this page wires it to the input, the scroll
//! position, and the reveal trigger.

use bubbletea_rs::{Cmd, KeyMsg, Msg};
use crossterm::event::KeyCode;

use crate::api::Book;
use crate::browse;
use crate::help;
use crate::input;
use crate::key::{Binding, KeyMap};
use crate::messages::{emit, NavigateMsg, Page};
use crate::spinner;
use crate::theme::{self, AppStyles, BULLET};

/// Terminal lines per book row, including the spacing line.
const ROW_HEIGHT: usize = 5;
/// Lines taken by the header (title, subtitle, input, blank) and footer
/// (status, help).
const CHROME_HEIGHT: usize = 6;

/// Key bindings for the search page.
///
/// Printable characters always go to the query input, so every binding here
/// uses non-character keys.
#[derive(Debug, Clone)]
pub struct SearchKeyMap {
    /// Scroll the result list up one row.
    pub scroll_up: Binding,
    /// Scroll the result list down one row.
    pub scroll_down: Binding,
    /// Scroll up one screenful.
    pub page_up: Binding,
    /// Scroll down one screenful.
    pub page_down: Binding,
    /// Clear the query, or leave the page when it is already empty.
    pub back: Binding,
}

impl Default for SearchKeyMap {
    fn default() -> Self {
        Self {
            scroll_up: Binding::new(vec![KeyCode::Up]).with_help("↑", "scroll up"),
            scroll_down: Binding::new(vec![KeyCode::Down]).with_help("↓", "scroll down"),
            page_up: Binding::new(vec![KeyCode::PageUp]).with_help("pgup", "page up"),
            page_down: Binding::new(vec![KeyCode::PageDown]).with_help("pgdn", "page down"),
            back: Binding::new(vec![KeyCode::Esc]).with_help("esc", "clear / back"),
        }
    }
}

impl KeyMap for SearchKeyMap {
    fn short_help(&self) -> Vec<&Binding> {
        vec![
            &self.scroll_up,
            &self.scroll_down,
            &self.page_down,
            &self.back,
        ]
    }

    fn full_help(&self) -> Vec<Vec<&Binding>> {
        vec![
            vec![
                &self.scroll_up,
                &self.scroll_down,
                &self.page_up,
                &self.page_down,
            ],
            vec![&self.back],
        ]
    }
}

/// Search page model.
pub struct Model {
    input: input::Model,
    browse: browse::Model<Book>,
    trigger: browse::RevealTrigger<(String, usize)>,
    spinner: spinner::Model,
    loading: bool,
    scroll: usize,
    keymap: SearchKeyMap,
    help: help::Model,
    styles: AppStyles,
    width: usize,
    height: usize,
}

impl Default for Model {
    fn default() -> Self {
        Self::new()
    }
}

impl Model {
    /// Creates the search page in its idle state.
    pub fn new() -> Self {
        let mut input = input::Model::new();
        input.placeholder = "Search books...".to_string();
        input.focus();
        Self {
            input,
            browse: browse::Model::new(),
            trigger: browse::RevealTrigger::new(),
            spinner: spinner::Model::new(spinner::DOT.clone()),
            loading: false,
            scroll: 0,
            keymap: SearchKeyMap::default(),
            help: help::Model::new(),
            styles: AppStyles::default(),
            width: 80,
            height: 24,
        }
    }

    /// Puts the page into its loading state and returns the spinner command.
    ///
    /// Called by the router right before it dispatches the catalog fetch.
    /// The previous catalog is discarded (`source` is replaced wholesale
    /// when the fetch lands) and the reveal trigger is suspended for the
    /// duration.
    pub fn begin_load(&mut self) -> Cmd {
        self.loading = true;
        self.browse = browse::Model::new();
        self.input.reset();
        self.input.focus();
        self.scroll = 0;
        self.trigger.suspend();
        self.spinner.start()
    }

    /// Installs a successfully fetched catalog.
    pub fn catalog_loaded(&mut self, books: Vec<Book>) {
        self.loading = false;
        self.browse = std::mem::take(&mut self.browse).load(books);
        self.scroll = 0;
        self.trigger.resume();
        self.rearm();
        self.check_reveal();
    }

    /// Records a failed fetch.
    pub fn catalog_failed(&mut self, error: String) {
        self.loading = false;
        self.browse = std::mem::take(&mut self.browse).fail(error);
        self.scroll = 0;
        self.trigger.resume();
        self.rearm();
    }

    /// Read access to the underlying browse state.
    pub fn browse(&self) -> &browse::Model<Book> {
        &self.browse
    }

    /// Whether a fetch is currently in flight.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Current scroll offset, in rows.
    pub fn scroll(&self) -> usize {
        self.scroll
    }

    /// Records the window size.
    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.help.width = width;
    }

    /// Handles a message.
    pub fn update(&mut self, msg: &Msg) -> Option<Cmd> {
        if self.loading {
            if let Some(cmd) = self.spinner.update(msg) {
                return Some(cmd);
            }
            let key = msg.downcast_ref::<KeyMsg>()?;
            if self.keymap.back.matches(key) {
                return Some(emit(NavigateMsg(Page::Home)));
            }
            return None;
        }

        let key = msg.downcast_ref::<KeyMsg>()?;
        if self.keymap.scroll_up.matches(key) {
            self.scroll_by(-1);
        } else if self.keymap.scroll_down.matches(key) {
            self.scroll_by(1);
        } else if self.keymap.page_up.matches(key) {
            self.scroll_by(-(self.rows() as isize));
        } else if self.keymap.page_down.matches(key) {
            self.scroll_by(self.rows() as isize);
        } else if self.keymap.back.matches(key) {
            if self.input.value().is_empty() {
                return Some(emit(NavigateMsg(Page::Home)));
            }
            self.input.reset();
            self.apply_query();
        } else if self.input.handle_key(key) {
            self.apply_query();
        }
        None
    }

    /// Renders the page.
    pub fn view(&self) -> String {
        let mut sections = Vec::new();
        sections.push(self.styles.title.render("Book Search"));

        if self.loading {
            sections.push(String::new());
            sections.push(format!("{} Loading books...", self.spinner.view()));
            return sections.join("\n");
        }

        if let Some(error) = self.browse.error() {
            sections.push(String::new());
            sections.push(self.styles.error.render(error));
            sections.push(String::new());
            sections.push(self.help.view(&self.keymap));
            return sections.join("\n");
        }

        sections.push(self.styles.subtitle.render(&format!(
            "Search through our collection of {} books by title, author, or category",
            self.browse.source_len()
        )));
        sections.push(self.input.view());
        sections.push(String::new());

        if self.browse.displayed_len() == 0 {
            sections.push(
                self.styles
                    .empty
                    .render("No books found matching your search criteria"),
            );
        } else {
            for book in self.browse.displayed().skip(self.scroll).take(self.rows()) {
                sections.push(self.render_row(book));
                sections.push(String::new());
            }
        }

        sections.push(self.styles.status.render(&self.status_line()));
        sections.push(self.help.view(&self.keymap));
        sections.join("\n")
    }

    fn render_row(&self, book: &Book) -> String {
        let width = self.width.max(20);
        let title = self.styles.book_title.render(&theme::clip(&book.title, width));
        let byline = format!(
            "{}  {} ({:.1})",
            self.styles
                .book_authors
                .render(&theme::clip(&book.authors, width.saturating_sub(14))),
            self.styles.rating.render(&theme::stars(book.average_rating)),
            book.average_rating
        );
        let chips = book
            .category_chips(3)
            .iter()
            .map(|c| self.styles.chip.render(c))
            .collect::<Vec<_>>()
            .join(" ");
        let description = self
            .styles
            .description
            .render(&theme::clip(&book.description, width));
        format!("{title}\n{byline}\n{chips}\n{description}")
    }

    fn status_line(&self) -> String {
        format!(
            "Showing {} of {} matches {} {} books",
            self.browse.displayed_len(),
            self.browse.match_count(),
            BULLET,
            self.browse.source_len()
        )
    }

    /// Whole book rows that fit in the current window.
    fn rows(&self) -> usize {
        (self.height.saturating_sub(CHROME_HEIGHT) / ROW_HEIGHT).max(1)
    }

    fn max_scroll(&self) -> usize {
        self.browse.displayed_len().saturating_sub(self.rows())
    }

    fn scroll_by(&mut self, delta: isize) {
        let next = self.scroll.saturating_add_signed(delta);
        self.scroll = next.min(self.max_scroll());
        self.check_reveal();
    }

    fn apply_query(&mut self) {
        let query = self.input.value();
        self.browse = std::mem::take(&mut self.browse).set_query(&query);
        self.scroll = 0;
        self.rearm();
        self.check_reveal();
    }

    /// Points the reveal trigger at the identity of the current tail row.
    fn rearm(&mut self) {
        let target = if self.browse.has_more() {
            Some((
                self.browse.query().to_string(),
                self.browse.displayed_len(),
            ))
        } else {
            None
        };
        self.trigger.retarget(target);
    }

    /// Fires the reveal trigger while the tail row sits inside the window.
    ///
    /// Each reveal moves the tail, which re-arms the trigger against the new
    /// identity; the loop ends as soon as the tail leaves the window or
    /// nothing is left to reveal.
    fn check_reveal(&mut self) {
        loop {
            let tail_in_view = self.browse.displayed_len() > 0
                && self.scroll + self.rows() >= self.browse.displayed_len();
            if !self.trigger.observe(tail_in_view) {
                break;
            }
            self.browse = std::mem::take(&mut self.browse).reveal_more();
            self.rearm();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn press(code: KeyCode) -> Msg {
        Box::new(KeyMsg {
            key: code,
            modifiers: KeyModifiers::NONE,
        })
    }

    fn catalog(count: usize) -> Vec<Book> {
        (0..count)
            .map(|i| Book {
                title: format!("Book {i}"),
                authors: "Author".to_string(),
                categories: if i % 2 == 0 { "Fantasy" } else { "Science" }.to_string(),
                average_rating: 4.0,
                description: String::new(),
                thumbnail: String::new(),
            })
            .collect()
    }

    #[test]
    fn typing_filters_live() {
        let mut page = Model::new();
        page.catalog_loaded(catalog(10));
        for c in "fantasy".chars() {
            page.update(&press(KeyCode::Char(c)));
        }
        assert_eq!(page.browse().query(), "fantasy");
        assert_eq!(page.browse().match_count(), 5);
    }

    #[test]
    fn esc_clears_query_then_leaves() {
        let mut page = Model::new();
        page.catalog_loaded(catalog(4));
        page.update(&press(KeyCode::Char('x')));
        assert!(page.update(&press(KeyCode::Esc)).is_none());
        assert_eq!(page.browse().query(), "");
        assert!(page.update(&press(KeyCode::Esc)).is_some());
    }

    /// Presses Down until the displayed count grows; false if it never does.
    fn scroll_until_reveal(page: &mut Model, cap: usize) -> bool {
        let before = page.browse().displayed_len();
        for _ in 0..cap {
            page.update(&press(KeyCode::Down));
            if page.browse().displayed_len() != before {
                return true;
            }
        }
        false
    }

    #[test]
    fn scrolling_to_the_tail_reveals_one_page_at_a_time() {
        let mut page = Model::new();
        page.resize(80, 24);
        page.catalog_loaded(catalog(250));
        assert_eq!(page.browse().displayed_len(), 100);

        assert!(scroll_until_reveal(&mut page, 300));
        assert_eq!(page.browse().displayed_len(), 200);

        assert!(scroll_until_reveal(&mut page, 300));
        assert_eq!(page.browse().displayed_len(), 250);
        assert!(!page.browse().has_more());

        // Nothing more to reveal; further scrolling changes nothing.
        assert!(!scroll_until_reveal(&mut page, 300));
        assert_eq!(page.browse().displayed_len(), 250);
    }

    #[test]
    fn reveal_progress_resets_on_query_change() {
        let mut page = Model::new();
        page.resize(80, 24);
        page.catalog_loaded(catalog(250));
        assert!(scroll_until_reveal(&mut page, 300));
        assert_eq!(page.browse().displayed_len(), 200);

        page.update(&press(KeyCode::Char('b')));
        assert_eq!(page.browse().visible(), browse::PAGE_SIZE);
        assert_eq!(page.scroll(), 0);
    }

    #[test]
    fn failed_fetch_shows_error_and_nothing_else() {
        let mut page = Model::new();
        page.catalog_failed("server responded with status 500".to_string());
        assert_eq!(page.browse().displayed_len(), 0);
        assert!(page.browse().error().is_some());
        let view = page.view();
        assert!(view.contains("500"));
    }

    #[test]
    fn keys_are_inert_while_loading() {
        let mut page = Model::new();
        let _ = page.begin_load();
        assert!(page.is_loading());
        assert!(page.update(&press(KeyCode::Char('a'))).is_none());
        page.catalog_loaded(catalog(3));
        assert_eq!(page.browse().query(), "");
    }

    #[test]
    fn short_catalog_never_arms_the_trigger() {
        let mut page = Model::new();
        page.catalog_loaded(catalog(5));
        for _ in 0..20 {
            page.update(&press(KeyCode::Down));
        }
        assert_eq!(page.browse().displayed_len(), 5);
    }
}
