//! Lean single-line text input.
//!
//! Covers what this application needs from a text field (the search box and
//! the quiz's free-text answers): a prompt, placeholder text, a character
//! cursor, and the usual editing keys (arrows, home/end, backspace/delete,
//! ctrl+u/ctrl+w). There is no horizontal scrolling, echo mode, or
//! suggestion machinery; queries and answers here are short.

use bubbletea_rs::KeyMsg;
use crossterm::event::{KeyCode, KeyModifiers};
use lipgloss_extras::prelude::*;

/// Single-line text input state.
#[derive(Debug, Clone)]
pub struct Model {
    /// Prompt rendered before the text, e.g. `"> "`.
    pub prompt: String,
    /// Placeholder shown while the value is empty.
    pub placeholder: String,
    /// Style for the prompt.
    pub prompt_style: Style,
    /// Style for typed text.
    pub text_style: Style,
    /// Style for the placeholder.
    pub placeholder_style: Style,
    value: Vec<char>,
    pos: usize,
    focus: bool,
}

impl Default for Model {
    fn default() -> Self {
        Self::new()
    }
}

impl Model {
    /// Creates an empty, unfocused input with the default prompt.
    pub fn new() -> Self {
        Self {
            prompt: "> ".to_string(),
            placeholder: String::new(),
            prompt_style: Style::new().foreground(AdaptiveColor {
                Light: "#04B575",
                Dark: "#ECFD65",
            }),
            text_style: Style::new(),
            placeholder_style: Style::new().foreground(AdaptiveColor {
                Light: "#B2B2B2",
                Dark: "#4A4A4A",
            }),
            value: Vec::new(),
            pos: 0,
            focus: false,
        }
    }

    /// Returns the current value.
    pub fn value(&self) -> String {
        self.value.iter().collect()
    }

    /// Replaces the value and moves the cursor to the end.
    pub fn set_value(&mut self, value: &str) {
        self.value = value.chars().collect();
        self.pos = self.value.len();
    }

    /// Returns the cursor position in characters.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Clears the value and resets the cursor.
    pub fn reset(&mut self) {
        self.value.clear();
        self.pos = 0;
    }

    /// Focuses the input so it accepts key events.
    pub fn focus(&mut self) {
        self.focus = true;
    }

    /// Removes focus.
    pub fn blur(&mut self) {
        self.focus = false;
    }

    /// Returns whether the input is focused.
    pub fn focused(&self) -> bool {
        self.focus
    }

    /// Applies a key event to the input.
    ///
    /// Returns `true` when the value changed, so callers know to re-run
    /// whatever depends on it. Unfocused inputs ignore everything.
    pub fn handle_key(&mut self, msg: &KeyMsg) -> bool {
        if !self.focus {
            return false;
        }
        if msg.modifiers.contains(KeyModifiers::CONTROL) {
            return match msg.key {
                KeyCode::Char('a') => {
                    self.pos = 0;
                    false
                }
                KeyCode::Char('e') => {
                    self.pos = self.value.len();
                    false
                }
                KeyCode::Char('u') => {
                    let changed = self.pos > 0;
                    self.value.drain(..self.pos);
                    self.pos = 0;
                    changed
                }
                KeyCode::Char('w') => self.delete_word_back(),
                _ => false,
            };
        }
        match msg.key {
            KeyCode::Char(c) => {
                self.value.insert(self.pos, c);
                self.pos += 1;
                true
            }
            KeyCode::Backspace => {
                if self.pos > 0 {
                    self.pos -= 1;
                    self.value.remove(self.pos);
                    true
                } else {
                    false
                }
            }
            KeyCode::Delete => {
                if self.pos < self.value.len() {
                    self.value.remove(self.pos);
                    true
                } else {
                    false
                }
            }
            KeyCode::Left => {
                self.pos = self.pos.saturating_sub(1);
                false
            }
            KeyCode::Right => {
                self.pos = (self.pos + 1).min(self.value.len());
                false
            }
            KeyCode::Home => {
                self.pos = 0;
                false
            }
            KeyCode::End => {
                self.pos = self.value.len();
                false
            }
            _ => false,
        }
    }

    fn delete_word_back(&mut self) -> bool {
        if self.pos == 0 {
            return false;
        }
        let mut start = self.pos;
        while start > 0 && self.value[start - 1].is_whitespace() {
            start -= 1;
        }
        while start > 0 && !self.value[start - 1].is_whitespace() {
            start -= 1;
        }
        self.value.drain(start..self.pos);
        self.pos = start;
        true
    }

    /// Renders the input with a block cursor when focused.
    pub fn view(&self) -> String {
        let prompt = self.prompt_style.render(&self.prompt);

        if self.value.is_empty() && !self.placeholder.is_empty() {
            if !self.focus {
                return format!(
                    "{}{}",
                    prompt,
                    self.placeholder_style.render(&self.placeholder)
                );
            }
            let mut chars = self.placeholder.chars();
            let under_cursor = chars.next().unwrap_or(' ').to_string();
            let rest: String = chars.collect();
            return format!(
                "{}{}{}",
                prompt,
                Style::new().reverse(true).render(&under_cursor),
                self.placeholder_style.render(&rest)
            );
        }

        let before: String = self.value[..self.pos].iter().collect();
        let mut out = format!("{}{}", prompt, self.text_style.render(&before));
        if !self.focus {
            let rest: String = self.value[self.pos..].iter().collect();
            out.push_str(&self.text_style.render(&rest));
            return out;
        }
        let under_cursor = self
            .value
            .get(self.pos)
            .map(|c| c.to_string())
            .unwrap_or_else(|| " ".to_string());
        out.push_str(&Style::new().reverse(true).render(&under_cursor));
        if self.pos < self.value.len() {
            let after: String = self.value[self.pos + 1..].iter().collect();
            out.push_str(&self.text_style.render(&after));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyMsg {
        KeyMsg {
            key: code,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn ctrl(c: char) -> KeyMsg {
        KeyMsg {
            key: KeyCode::Char(c),
            modifiers: KeyModifiers::CONTROL,
        }
    }

    #[test]
    fn typing_appends_at_cursor() {
        let mut input = Model::new();
        input.focus();
        for c in "abc".chars() {
            assert!(input.handle_key(&press(KeyCode::Char(c))));
        }
        assert_eq!(input.value(), "abc");
        assert_eq!(input.position(), 3);
    }

    #[test]
    fn unfocused_input_ignores_keys() {
        let mut input = Model::new();
        assert!(!input.handle_key(&press(KeyCode::Char('x'))));
        assert_eq!(input.value(), "");
    }

    #[test]
    fn backspace_removes_before_cursor() {
        let mut input = Model::new();
        input.focus();
        input.set_value("hello");
        input.handle_key(&press(KeyCode::Left));
        assert!(input.handle_key(&press(KeyCode::Backspace)));
        assert_eq!(input.value(), "helo");
        assert_eq!(input.position(), 3);
    }

    #[test]
    fn backspace_at_start_is_a_noop() {
        let mut input = Model::new();
        input.focus();
        input.set_value("hi");
        input.handle_key(&press(KeyCode::Home));
        assert!(!input.handle_key(&press(KeyCode::Backspace)));
        assert_eq!(input.value(), "hi");
    }

    #[test]
    fn ctrl_u_clears_to_start() {
        let mut input = Model::new();
        input.focus();
        input.set_value("fantasy books");
        assert!(input.handle_key(&ctrl('u')));
        assert_eq!(input.value(), "");
        assert_eq!(input.position(), 0);
    }

    #[test]
    fn ctrl_w_deletes_previous_word() {
        let mut input = Model::new();
        input.focus();
        input.set_value("science fiction");
        assert!(input.handle_key(&ctrl('w')));
        assert_eq!(input.value(), "science ");
    }

    #[test]
    fn cursor_movement_does_not_report_change() {
        let mut input = Model::new();
        input.focus();
        input.set_value("abc");
        assert!(!input.handle_key(&press(KeyCode::Left)));
        assert!(!input.handle_key(&press(KeyCode::Right)));
        assert!(!input.handle_key(&press(KeyCode::End)));
    }
}
