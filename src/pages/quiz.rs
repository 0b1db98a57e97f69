//! Multi-step preference quiz.
//!
//! Four steps mirror the service's quiz: reading habits (genres +
//! frequency), favorites (three free-text answers), preferences (mood,
//! writing style, length), and goals. Submitting flattens the answers into
//! one ordered preference list, drops the empties, and hands it to the
//! router for the recommendation request.

use bubbletea_rs::{batch, Cmd, KeyMsg, Msg};
use crossterm::event::KeyCode;

use crate::help;
use crate::input;
use crate::key::{Binding, KeyMap};
use crate::messages::{emit, NavigateMsg, Page, SubmitQuizMsg};
use crate::spinner;
use crate::theme::AppStyles;

const STEP_TITLES: [&str; 4] = ["Reading Habits", "Favorites", "Preferences", "Goals"];

const GENRES: [&str; 20] = [
    "Fiction",
    "Non-Fiction",
    "Mystery",
    "Science Fiction",
    "Fantasy",
    "Romance",
    "Thriller",
    "Historical Fiction",
    "Biography",
    "Self-Help",
    "Science",
    "Technology",
    "Business",
    "Philosophy",
    "Poetry",
    "Horror",
    "Adventure",
    "Contemporary",
    "Literary Fiction",
    "Young Adult",
];

/// Reading frequency options as `(submitted value, label)` pairs.
const FREQUENCIES: [(&str, &str); 4] = [
    ("daily", "Daily"),
    ("weekly", "A few times a week"),
    ("monthly", "A few times a month"),
    ("rarely", "Rarely"),
];

/// Preferred length options as `(submitted value, label)` pairs.
const LENGTHS: [(&str, &str); 4] = [
    ("short", "Short (under 300 pages)"),
    ("medium", "Medium (300-500 pages)"),
    ("long", "Long (over 500 pages)"),
    ("any", "No preference"),
];

const MOODS: [&str; 8] = [
    "Happy and Uplifting",
    "Dark and Mysterious",
    "Thoughtful and Reflective",
    "Exciting and Adventurous",
    "Cozy and Comfortable",
    "Emotional and Moving",
    "Funny and Humorous",
    "Suspenseful and Tense",
];

const WRITING_STYLES: [&str; 6] = [
    "Descriptive and Poetic",
    "Direct and Simple",
    "Complex and Challenging",
    "Conversational and Casual",
    "Fast-paced and Dynamic",
    "Detailed and Technical",
];

const READING_GOALS: [&str; 6] = [
    "Entertainment and Escape",
    "Learning New Things",
    "Personal Growth",
    "Professional Development",
    "Literary Appreciation",
    "Cultural Understanding",
];

/// Cursor + single selection over a fixed option list.
#[derive(Debug, Clone, Default)]
struct Radio {
    cursor: usize,
    selected: Option<usize>,
}

impl Radio {
    fn move_cursor(&mut self, delta: isize, len: usize) {
        if len == 0 {
            return;
        }
        let next = self.cursor as isize + delta;
        self.cursor = next.rem_euclid(len as isize) as usize;
    }

    fn select_cursor(&mut self) {
        self.selected = Some(self.cursor);
    }
}

/// Cursor + toggled selections over a fixed option list.
///
/// Selections are kept as indices in the order they were toggled on;
/// toggling one off and on again moves it to the back. The submitted
/// preference list carries the genres in exactly this order.
#[derive(Debug, Clone)]
struct MultiSelect {
    cursor: usize,
    len: usize,
    selected: Vec<usize>,
}

impl MultiSelect {
    fn new(len: usize) -> Self {
        Self {
            cursor: 0,
            len,
            selected: Vec::new(),
        }
    }

    fn move_cursor(&mut self, delta: isize) {
        if self.len == 0 {
            return;
        }
        let next = self.cursor as isize + delta;
        self.cursor = next.rem_euclid(self.len as isize) as usize;
    }

    fn toggle_cursor(&mut self) {
        match self.selected.iter().position(|&i| i == self.cursor) {
            Some(at) => {
                self.selected.remove(at);
            }
            None => self.selected.push(self.cursor),
        }
    }

    fn is_selected(&self, index: usize) -> bool {
        self.selected.contains(&index)
    }
}

/// Key bindings for the quiz.
#[derive(Debug, Clone)]
pub struct QuizKeyMap {
    /// Advance to the next step, or submit on the last one.
    pub next: Binding,
    /// Return to the previous step, or home from the first.
    pub back: Binding,
    /// Focus the next question in the step.
    pub next_field: Binding,
    /// Focus the previous question in the step.
    pub prev_field: Binding,
    /// Move the option cursor.
    pub move_option: Binding,
    /// Toggle or select the option under the cursor.
    pub select: Binding,
}

impl Default for QuizKeyMap {
    fn default() -> Self {
        Self {
            next: Binding::new(vec![KeyCode::Enter]).with_help("enter", "next / submit"),
            back: Binding::new(vec![KeyCode::Esc]).with_help("esc", "back"),
            next_field: Binding::new(vec![KeyCode::Tab]).with_help("tab", "next field"),
            prev_field: Binding::new(vec![KeyCode::BackTab]).with_help("shift+tab", "prev field"),
            move_option: Binding::new(vec![KeyCode::Up, KeyCode::Down]).with_help("↑/↓", "move"),
            select: Binding::new(vec![KeyCode::Char(' ')]).with_help("space", "select"),
        }
    }
}

impl KeyMap for QuizKeyMap {
    fn short_help(&self) -> Vec<&Binding> {
        vec![
            &self.next,
            &self.back,
            &self.next_field,
            &self.move_option,
            &self.select,
        ]
    }

    fn full_help(&self) -> Vec<Vec<&Binding>> {
        vec![
            vec![&self.next, &self.back],
            vec![&self.next_field, &self.prev_field],
            vec![&self.move_option, &self.select],
        ]
    }
}

/// Quiz page model.
pub struct Model {
    step: usize,
    focus: usize,
    genres: MultiSelect,
    frequency: Radio,
    books: input::Model,
    authors: input::Model,
    topics: input::Model,
    mood: Radio,
    writing_style: Radio,
    length: Radio,
    goal: Radio,
    submitting: bool,
    error: Option<String>,
    spinner: spinner::Model,
    keymap: QuizKeyMap,
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
    /// Creates a fresh quiz with no answers.
    pub fn new() -> Self {
        let mut books = input::Model::new();
        books.placeholder = "e.g., The Midnight Library, Project Hail Mary".to_string();
        let mut authors = input::Model::new();
        authors.placeholder = "e.g., Andy Weir, Matt Haig".to_string();
        let mut topics = input::Model::new();
        topics.placeholder = "e.g., space exploration, personal growth, ancient history".to_string();

        Self {
            step: 0,
            focus: 0,
            genres: MultiSelect::new(GENRES.len()),
            frequency: Radio::default(),
            books,
            authors,
            topics,
            mood: Radio::default(),
            writing_style: Radio::default(),
            length: Radio::default(),
            goal: Radio::default(),
            submitting: false,
            error: None,
            spinner: spinner::Model::new(spinner::DOT.clone()),
            keymap: QuizKeyMap::default(),
            help: help::Model::new(),
            styles: AppStyles::default(),
            width: 80,
        }
    }

    /// Current step index (0-based).
    pub fn step(&self) -> usize {
        self.step
    }

    /// Whether a submission is in flight.
    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Marks the in-flight submission as answered.
    pub fn submit_finished(&mut self, error: Option<String>) {
        self.submitting = false;
        self.error = error;
    }

    /// Records the window size.
    pub fn resize(&mut self, width: usize, _height: usize) {
        self.width = width;
        self.help.width = width;
    }

    /// Handles a message.
    pub fn update(&mut self, msg: &Msg) -> Option<Cmd> {
        if self.submitting {
            return self.spinner.update(msg);
        }
        let key = msg.downcast_ref::<KeyMsg>()?;

        if self.keymap.next.matches(key) {
            if self.step + 1 < STEP_TITLES.len() {
                self.step += 1;
                self.set_focus(0);
                return None;
            }
            return Some(self.submit());
        }
        if self.keymap.back.matches(key) {
            if self.step > 0 {
                self.step -= 1;
                self.set_focus(0);
                return None;
            }
            return Some(emit(NavigateMsg(Page::Home)));
        }
        if self.keymap.next_field.matches(key) {
            let count = self.question_count();
            self.set_focus((self.focus + 1) % count);
            return None;
        }
        if self.keymap.prev_field.matches(key) {
            let count = self.question_count();
            self.set_focus((self.focus + count - 1) % count);
            return None;
        }

        self.handle_question_key(key);
        None
    }

    /// Flattens the answers into the submitted preference list.
    ///
    /// Order matters to the service: genres in the order they were
    /// selected, then frequency, length, authors, books, topics, mood,
    /// writing style, goal, with empties dropped.
    pub fn preferences(&self) -> Vec<String> {
        let mut prefs: Vec<String> = self
            .genres
            .selected
            .iter()
            .map(|&i| GENRES[i].to_string())
            .collect();

        let mut push = |value: String| {
            if !value.is_empty() {
                prefs.push(value);
            }
        };
        push(pick(&self.frequency, &FREQUENCIES));
        push(pick(&self.length, &LENGTHS));
        push(self.authors.value());
        push(self.books.value());
        push(self.topics.value());
        push(pick_lower(&self.mood, &MOODS));
        push(pick_lower(&self.writing_style, &WRITING_STYLES));
        push(pick_lower(&self.goal, &READING_GOALS));
        prefs
    }

    fn submit(&mut self) -> Cmd {
        self.submitting = true;
        self.error = None;
        batch(vec![
            self.spinner.start(),
            emit(SubmitQuizMsg {
                preferences: self.preferences(),
            }),
        ])
    }

    fn question_count(&self) -> usize {
        match self.step {
            0 => 2,
            1 => 3,
            2 => 3,
            _ => 1,
        }
    }

    fn set_focus(&mut self, focus: usize) {
        self.focus = focus;
        self.books.blur();
        self.authors.blur();
        self.topics.blur();
        if self.step == 1 {
            match self.focus {
                0 => self.books.focus(),
                1 => self.authors.focus(),
                _ => self.topics.focus(),
            }
        }
    }

    fn handle_question_key(&mut self, key: &KeyMsg) {
        if self.step == 1 {
            match self.focus {
                0 => self.books.handle_key(key),
                1 => self.authors.handle_key(key),
                _ => self.topics.handle_key(key),
            };
            return;
        }

        let delta = match key.key {
            KeyCode::Up => -1,
            KeyCode::Down => 1,
            _ => 0,
        };
        let select = self.keymap.select.matches(key);
        match (self.step, self.focus) {
            (0, 0) => {
                if select {
                    self.genres.toggle_cursor();
                } else if delta != 0 {
                    self.genres.move_cursor(delta);
                }
            }
            (0, 1) => apply_radio(&mut self.frequency, delta, select, FREQUENCIES.len()),
            (2, 0) => apply_radio(&mut self.mood, delta, select, MOODS.len()),
            (2, 1) => apply_radio(&mut self.writing_style, delta, select, WRITING_STYLES.len()),
            (2, 2) => apply_radio(&mut self.length, delta, select, LENGTHS.len()),
            (3, 0) => apply_radio(&mut self.goal, delta, select, READING_GOALS.len()),
            _ => {}
        }
    }

    /// Renders the page.
    pub fn view(&self) -> String {
        let mut sections = Vec::new();
        sections.push(
            self.styles
                .title
                .render("Personalized Reading Recommendations"),
        );
        sections.push(self.styles.subtitle.render(
            "Help us understand your reading preferences to find your next favorite book",
        ));

        if let Some(error) = &self.error {
            sections.push(self.styles.error.render(error));
        }

        sections.push(self.stepper());
        sections.push(String::new());

        if self.submitting {
            sections.push(format!(
                "{} Finding your perfect books...",
                self.spinner.view()
            ));
            return sections.join("\n");
        }

        sections.push(self.step_view());
        sections.push(self.help.view(&self.keymap));
        sections.join("\n")
    }

    fn stepper(&self) -> String {
        STEP_TITLES
            .iter()
            .enumerate()
            .map(|(i, title)| {
                let style = if i == self.step {
                    &self.styles.step_active
                } else if i < self.step {
                    &self.styles.step_done
                } else {
                    &self.styles.step_pending
                };
                style.render(&format!("{}. {}", i + 1, title))
            })
            .collect::<Vec<_>>()
            .join("  →  ")
    }

    fn step_view(&self) -> String {
        match self.step {
            0 => {
                let mut out = vec![
                    self.question_label("What genres do you enjoy reading?", 0),
                    self.genre_chips(),
                    String::new(),
                    self.question_label("How often do you read?", 1),
                ];
                out.push(self.radio_view(&self.frequency, &labels(&FREQUENCIES), self.focus == 1));
                out.join("\n")
            }
            1 => [
                self.question_label("What are some books you've enjoyed recently?", 0),
                self.books.view(),
                String::new(),
                self.question_label("Who are some of your favorite authors?", 1),
                self.authors.view(),
                String::new(),
                self.question_label("What topics interest you the most?", 2),
                self.topics.view(),
            ]
            .join("\n"),
            2 => [
                self.question_label("What kind of mood are you in right now?", 0),
                self.radio_view(&self.mood, &MOODS, self.focus == 0),
                String::new(),
                self.question_label("What writing style do you prefer?", 1),
                self.radio_view(&self.writing_style, &WRITING_STYLES, self.focus == 1),
                String::new(),
                self.question_label("What length of books do you prefer?", 2),
                self.radio_view(&self.length, &labels(&LENGTHS), self.focus == 2),
            ]
            .join("\n"),
            _ => [
                self.question_label("What's your main goal for reading right now?", 0),
                self.radio_view(&self.goal, &READING_GOALS, self.focus == 0),
            ]
            .join("\n"),
        }
    }

    fn question_label(&self, text: &str, index: usize) -> String {
        if self.focus == index {
            self.styles.book_title.render(text)
        } else {
            self.styles.dim.render(text)
        }
    }

    fn genre_chips(&self) -> String {
        let focused = self.focus == 0;
        let mut lines: Vec<String> = Vec::new();
        let mut line = String::new();
        let mut line_width = 0usize;
        for (i, genre) in GENRES.iter().enumerate() {
            let style = if self.genres.is_selected(i) {
                &self.styles.chip_selected
            } else {
                &self.styles.chip
            };
            let marker = if focused && i == self.genres.cursor {
                self.styles.option_cursor.render("›")
            } else {
                " ".to_string()
            };
            let cell_width = genre.len() + 4;
            if line_width + cell_width > self.width.max(40) && !line.is_empty() {
                lines.push(std::mem::take(&mut line));
                line_width = 0;
            }
            line.push_str(&format!("{}{} ", marker, style.render(genre)));
            line_width += cell_width;
        }
        if !line.is_empty() {
            lines.push(line);
        }
        lines.join("\n")
    }

    fn radio_view(&self, radio: &Radio, options: &[&str], focused: bool) -> String {
        options
            .iter()
            .enumerate()
            .map(|(i, label)| {
                let cursor = if focused && i == radio.cursor {
                    self.styles.option_cursor.render("›")
                } else {
                    " ".to_string()
                };
                let mark = if radio.selected == Some(i) { "(•)" } else { "( )" };
                let text = if radio.selected == Some(i) {
                    self.styles.option_selected.render(label)
                } else {
                    label.to_string()
                };
                format!("{cursor} {mark} {text}")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn apply_radio(radio: &mut Radio, delta: isize, select: bool, len: usize) {
    if select {
        radio.select_cursor();
    } else if delta != 0 {
        radio.move_cursor(delta, len);
    }
}

/// The submitted value for a `(value, label)` option table.
fn pick(radio: &Radio, options: &[(&str, &str)]) -> String {
    radio
        .selected
        .and_then(|i| options.get(i))
        .map(|(value, _)| value.to_string())
        .unwrap_or_default()
}

/// The submitted value for a label-only table: the lowercased label.
fn pick_lower(radio: &Radio, options: &[&str]) -> String {
    radio
        .selected
        .and_then(|i| options.get(i))
        .map(|label| label.to_lowercase())
        .unwrap_or_default()
}

fn labels<'a, const N: usize>(options: &'a [(&'a str, &'a str); N]) -> [&'a str; N] {
    let mut out = [""; N];
    let mut i = 0;
    while i < N {
        out[i] = options[i].1;
        i += 1;
    }
    out
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

    fn space() -> Msg {
        press(KeyCode::Char(' '))
    }

    #[test]
    fn starts_on_first_step_with_no_answers() {
        let quiz = Model::new();
        assert_eq!(quiz.step(), 0);
        assert!(quiz.preferences().is_empty());
    }

    #[test]
    fn enter_advances_and_esc_goes_back() {
        let mut quiz = Model::new();
        quiz.update(&press(KeyCode::Enter));
        assert_eq!(quiz.step(), 1);
        quiz.update(&press(KeyCode::Esc));
        assert_eq!(quiz.step(), 0);
    }

    #[test]
    fn esc_on_first_step_navigates_home() {
        let mut quiz = Model::new();
        assert!(quiz.update(&press(KeyCode::Esc)).is_some());
    }

    #[test]
    fn space_toggles_genres() {
        let mut quiz = Model::new();
        quiz.update(&space());
        assert_eq!(quiz.preferences(), vec!["Fiction"]);
        quiz.update(&space());
        assert!(quiz.preferences().is_empty());
    }

    #[test]
    fn genres_keep_their_selection_order() {
        let mut quiz = Model::new();
        // Fantasy (fifth in the table) first, then Fiction (first).
        for _ in 0..4 {
            quiz.update(&press(KeyCode::Down));
        }
        quiz.update(&space());
        for _ in 0..4 {
            quiz.update(&press(KeyCode::Up));
        }
        quiz.update(&space());
        assert_eq!(quiz.preferences(), vec!["Fantasy", "Fiction"]);

        // Toggling Fantasy off and on again moves it to the back.
        for _ in 0..4 {
            quiz.update(&press(KeyCode::Down));
        }
        quiz.update(&space());
        quiz.update(&space());
        assert_eq!(quiz.preferences(), vec!["Fiction", "Fantasy"]);
    }

    #[test]
    fn radio_selection_follows_the_cursor() {
        let mut quiz = Model::new();
        quiz.update(&press(KeyCode::Tab)); // focus the frequency question
        quiz.update(&press(KeyCode::Down));
        quiz.update(&space());
        assert_eq!(quiz.preferences(), vec!["weekly"]);
    }

    #[test]
    fn preferences_follow_the_service_order_and_drop_empties() {
        let mut quiz = Model::new();

        // Step 0: two genres and a frequency.
        quiz.update(&space()); // Fiction
        quiz.update(&press(KeyCode::Down));
        quiz.update(&press(KeyCode::Down));
        quiz.update(&press(KeyCode::Down));
        quiz.update(&press(KeyCode::Down));
        quiz.update(&space()); // Fantasy
        quiz.update(&press(KeyCode::Tab));
        quiz.update(&space()); // daily

        // Step 1: authors only; books and topics stay empty.
        quiz.update(&press(KeyCode::Enter));
        quiz.update(&press(KeyCode::Tab)); // focus authors
        for c in "Andy Weir".chars() {
            quiz.update(&press(KeyCode::Char(c)));
        }

        // Step 2: mood only.
        quiz.update(&press(KeyCode::Enter));
        quiz.update(&space()); // happy and uplifting

        assert_eq!(
            quiz.preferences(),
            vec![
                "Fiction",
                "Fantasy",
                "daily",
                "Andy Weir",
                "happy and uplifting",
            ]
        );
    }

    #[test]
    fn last_step_enter_submits_once() {
        let mut quiz = Model::new();
        for _ in 0..3 {
            quiz.update(&press(KeyCode::Enter));
        }
        assert_eq!(quiz.step(), 3);
        let cmd = quiz.update(&press(KeyCode::Enter));
        assert!(cmd.is_some());
        assert!(quiz.is_submitting());

        // While submitting, keys are inert.
        assert!(quiz.update(&press(KeyCode::Enter)).is_none());
    }

    #[test]
    fn failed_submission_surfaces_the_error_and_unlocks() {
        let mut quiz = Model::new();
        for _ in 0..3 {
            quiz.update(&press(KeyCode::Enter));
        }
        quiz.update(&press(KeyCode::Enter));
        quiz.submit_finished(Some("Failed to get recommendations".to_string()));
        assert!(!quiz.is_submitting());
        assert!(quiz.view().contains("Failed to get recommendations"));
    }

    #[test]
    fn tab_wraps_around_the_step_questions() {
        let mut quiz = Model::new();
        quiz.update(&press(KeyCode::Tab));
        quiz.update(&press(KeyCode::Tab));
        // Two questions on step 0: focus is back at the genres.
        quiz.update(&space());
        assert_eq!(quiz.preferences(), vec!["Fiction"]);
    }
}
