//! Recommendation results page.
//!
//! Shows the books returned for a quiz submission. Entering without any
//! recommendations (deep-linking, in web terms) shows the original's guard
//! message instead of an empty list.

use bubbletea_rs::{Cmd, KeyMsg, Msg};
use crossterm::event::KeyCode;

use crate::api::Book;
use crate::help;
use crate::key::{Binding, KeyMap};
use crate::messages::{emit, NavigateMsg, Page};
use crate::theme::{self, AppStyles};

/// Terminal lines per recommendation card, including the spacing line.
const CARD_HEIGHT: usize = 5;
/// Lines taken by the header and footer around the cards.
const CHROME_HEIGHT: usize = 5;

/// Key bindings for the results page.
#[derive(Debug, Clone)]
pub struct ResultsKeyMap {
    /// Scroll up one card.
    pub scroll_up: Binding,
    /// Scroll down one card.
    pub scroll_down: Binding,
    /// Retake the quiz.
    pub retake: Binding,
    /// Back to the landing page.
    pub home: Binding,
}

impl Default for ResultsKeyMap {
    fn default() -> Self {
        Self {
            scroll_up: Binding::new(vec![KeyCode::Up, KeyCode::Char('k')]).with_help("↑/k", "up"),
            scroll_down: Binding::new(vec![KeyCode::Down, KeyCode::Char('j')])
                .with_help("↓/j", "down"),
            retake: Binding::new(vec![KeyCode::Char('r')]).with_help("r", "retake quiz"),
            home: Binding::new(vec![KeyCode::Esc]).with_help("esc", "home"),
        }
    }
}

impl KeyMap for ResultsKeyMap {
    fn short_help(&self) -> Vec<&Binding> {
        vec![&self.scroll_up, &self.scroll_down, &self.retake, &self.home]
    }

    fn full_help(&self) -> Vec<Vec<&Binding>> {
        vec![
            vec![&self.scroll_up, &self.scroll_down],
            vec![&self.retake, &self.home],
        ]
    }
}

/// Results page model.
pub struct Model {
    books: Option<Vec<Book>>,
    scroll: usize,
    keymap: ResultsKeyMap,
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
    /// Creates the page with no recommendations yet.
    pub fn new() -> Self {
        Self {
            books: None,
            scroll: 0,
            keymap: ResultsKeyMap::default(),
            help: help::Model::new(),
            styles: AppStyles::default(),
            width: 80,
            height: 24,
        }
    }

    /// Installs a fresh set of recommendations.
    pub fn set_books(&mut self, books: Vec<Book>) {
        self.books = Some(books);
        self.scroll = 0;
    }

    /// Whether any recommendations have arrived this session.
    pub fn has_books(&self) -> bool {
        self.books.is_some()
    }

    /// Records the window size.
    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.help.width = width;
    }

    /// Handles a message.
    pub fn update(&mut self, msg: &Msg) -> Option<Cmd> {
        let key = msg.downcast_ref::<KeyMsg>()?;
        if self.keymap.retake.matches(key) {
            return Some(emit(NavigateMsg(Page::Quiz)));
        }
        if self.keymap.home.matches(key) {
            return Some(emit(NavigateMsg(Page::Home)));
        }
        if self.keymap.scroll_up.matches(key) {
            self.scroll = self.scroll.saturating_sub(1);
        } else if self.keymap.scroll_down.matches(key) {
            self.scroll = (self.scroll + 1).min(self.max_scroll());
        }
        None
    }

    /// Renders the page.
    pub fn view(&self) -> String {
        let mut sections = Vec::new();
        sections.push(
            self.styles
                .title
                .render("Your Personalized Book Recommendations"),
        );

        let Some(books) = &self.books else {
            sections.push(String::new());
            sections.push(self.styles.error.render(
                "No recommendations found. Please complete the preferences quiz first.",
            ));
            sections.push(String::new());
            sections.push(self.help.view(&self.keymap));
            return sections.join("\n");
        };

        sections.push(
            self.styles
                .subtitle
                .render("Based on your reading preferences, we think you'll love these books"),
        );
        sections.push(String::new());

        if books.is_empty() {
            sections.push(self.styles.empty.render("No books found."));
        } else {
            for book in books.iter().skip(self.scroll).take(self.cards()) {
                sections.push(self.render_card(book));
                sections.push(String::new());
            }
            sections.push(self.styles.status.render(&format!(
                "{}-{} of {} recommendations",
                self.scroll + 1,
                (self.scroll + self.cards()).min(books.len()),
                books.len()
            )));
        }

        sections.push(self.help.view(&self.keymap));
        sections.join("\n")
    }

    fn render_card(&self, book: &Book) -> String {
        let width = self.width.max(20);
        let title = self.styles.book_title.render(&theme::clip(&book.title, width));
        let byline = format!(
            "by {}  {} ({:.1})",
            self.styles
                .book_authors
                .render(&theme::clip(&book.authors, width.saturating_sub(17))),
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

    fn cards(&self) -> usize {
        (self.height.saturating_sub(CHROME_HEIGHT) / CARD_HEIGHT).max(1)
    }

    fn max_scroll(&self) -> usize {
        self.books
            .as_ref()
            .map(|b| b.len().saturating_sub(self.cards()))
            .unwrap_or(0)
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

    fn book(title: &str) -> Book {
        Book {
            title: title.to_string(),
            authors: "Someone".to_string(),
            categories: "Fiction".to_string(),
            average_rating: 4.0,
            description: "About something.".to_string(),
            thumbnail: String::new(),
        }
    }

    #[test]
    fn empty_page_shows_the_quiz_guard() {
        let page = Model::new();
        assert!(!page.has_books());
        assert!(page.view().contains("complete the preferences quiz"));
    }

    #[test]
    fn retake_navigates_to_the_quiz() {
        let mut page = Model::new();
        assert!(page.update(&press(KeyCode::Char('r'))).is_some());
    }

    #[test]
    fn books_render_after_set_books() {
        let mut page = Model::new();
        page.set_books(vec![book("Dune"), book("Emma")]);
        let view = page.view();
        assert!(view.contains("Dune"));
        assert!(!view.contains("complete the preferences quiz"));
    }

    #[test]
    fn scroll_is_clamped() {
        let mut page = Model::new();
        page.set_books((0..30).map(|i| book(&format!("B{i}"))).collect());
        for _ in 0..100 {
            page.update(&press(KeyCode::Down));
        }
        assert!(page.scroll <= 30);
        page.update(&press(KeyCode::Up));
        let s = page.scroll;
        page.update(&press(KeyCode::Up));
        assert!(page.scroll <= s);
    }

    #[test]
    fn fresh_results_reset_scroll() {
        let mut page = Model::new();
        page.set_books((0..30).map(|i| book(&format!("B{i}"))).collect());
        for _ in 0..10 {
            page.update(&press(KeyCode::Down));
        }
        page.set_books(vec![book("Only")]);
        assert_eq!(page.scroll, 0);
    }
}
