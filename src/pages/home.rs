//! Landing page: banner, feature blurbs, and entry points.

use bubbletea_rs::{quit, Cmd, KeyMsg, Msg};
use crossterm::event::KeyCode;

use crate::help;
use crate::key::{Binding, KeyMap};
use crate::messages::{emit, NavigateMsg, Page};
use crate::theme::AppStyles;

const HEADLINE: &str = "Discover Your Next Favorite Book";
const TAGLINE: &str =
    "Take our reading DNA quiz and get personalized recommendations that match your unique taste";

const FEATURES: [(&str, &str); 2] = [
    (
        "Personalized Recommendations with Depth",
        "Get tailored suggestions from thousands of books based on your unique reading DNA. \
         From writing style to thematic preferences.",
    ),
    (
        "AI-Powered Analysis",
        "Our advanced model understands the nuances of your taste!",
    ),
];

/// Key bindings for the landing page.
#[derive(Debug, Clone)]
pub struct HomeKeyMap {
    /// Start the preference quiz.
    pub quiz: Binding,
    /// Open the catalog search.
    pub search: Binding,
    /// Quit the application.
    pub quit: Binding,
}

impl Default for HomeKeyMap {
    fn default() -> Self {
        Self {
            quiz: Binding::new(vec![KeyCode::Enter]).with_help("enter", "take the quiz"),
            search: Binding::new(vec![KeyCode::Char('s')]).with_help("s", "search books"),
            quit: Binding::new(vec![KeyCode::Char('q')]).with_help("q", "quit"),
        }
    }
}

impl KeyMap for HomeKeyMap {
    fn short_help(&self) -> Vec<&Binding> {
        vec![&self.quiz, &self.search, &self.quit]
    }

    fn full_help(&self) -> Vec<Vec<&Binding>> {
        vec![vec![&self.quiz, &self.search], vec![&self.quit]]
    }
}

/// Landing page model.
pub struct Model {
    keymap: HomeKeyMap,
    help: help::Model,
    styles: AppStyles,
    width: usize,
}

impl Default for Model {
    fn default() -> Self {
        Self::new()
    }
}

impl Model {
    /// Creates the landing page.
    pub fn new() -> Self {
        Self {
            keymap: HomeKeyMap::default(),
            help: help::Model::new(),
            styles: AppStyles::default(),
            width: 80,
        }
    }

    /// Records the window width for wrapping.
    pub fn resize(&mut self, width: usize, _height: usize) {
        self.width = width;
        self.help.width = width;
    }

    /// Handles a message; returns a navigation or quit command.
    pub fn update(&mut self, msg: &Msg) -> Option<Cmd> {
        let key = msg.downcast_ref::<KeyMsg>()?;
        if self.keymap.quiz.matches(key) {
            return Some(emit(NavigateMsg(Page::Quiz)));
        }
        if self.keymap.search.matches(key) {
            return Some(emit(NavigateMsg(Page::Search)));
        }
        if self.keymap.quit.matches(key) {
            return Some(quit());
        }
        None
    }

    /// Renders the page.
    pub fn view(&self) -> String {
        let mut sections = Vec::new();
        sections.push(self.styles.banner.render(HEADLINE));
        sections.push(self.styles.subtitle.render(TAGLINE));
        sections.push(String::new());

        for (title, blurb) in FEATURES {
            sections.push(self.styles.book_title.render(title));
            for line in wrap(blurb, self.width.saturating_sub(2).max(20)) {
                sections.push(self.styles.description.render(&line));
            }
            sections.push(String::new());
        }

        sections.push(self.help.view(&self.keymap));
        sections.join("\n")
    }
}

/// Greedy word wrap; enough for the short feature blurbs.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if !current.is_empty() && current.len() + 1 + word.len() > width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
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

    #[test]
    fn enter_navigates_to_quiz() {
        let mut home = Model::new();
        assert!(home.update(&press(KeyCode::Enter)).is_some());
    }

    #[test]
    fn unbound_keys_do_nothing() {
        let mut home = Model::new();
        assert!(home.update(&press(KeyCode::Char('z'))).is_none());
    }

    #[test]
    fn view_contains_headline_and_features() {
        let home = Model::new();
        let view = home.view();
        assert!(view.contains(HEADLINE));
        assert!(view.contains("AI-Powered Analysis"));
    }

    #[test]
    fn wrap_respects_width() {
        for line in wrap("one two three four five six seven eight", 10) {
            assert!(line.len() <= 10 || !line.contains(' '));
        }
    }
}
