//! Contextual help view rendered from a component's [`KeyMap`].
//!
//! The short view is a single line of `key desc` pairs separated by bullets,
//! truncated with an ellipsis when it would overflow the window. The full
//! view lays the grouped bindings out in columns. Which one renders is
//! controlled by [`Model::show_all`].

use lipgloss_extras::prelude::*;
use unicode_width::UnicodeWidthStr;

use crate::key::{Binding, KeyMap};

/// Styles for the help view elements.
#[derive(Debug, Clone)]
pub struct Styles {
    /// Style for key labels in the short view.
    pub short_key: Style,
    /// Style for action descriptions in the short view.
    pub short_desc: Style,
    /// Style for the separator between short-view entries.
    pub short_separator: Style,
    /// Style for key labels in the full view.
    pub full_key: Style,
    /// Style for action descriptions in the full view.
    pub full_desc: Style,
}

impl Default for Styles {
    fn default() -> Self {
        let key_style = Style::new().foreground(AdaptiveColor {
            Light: "#909090",
            Dark: "#626262",
        });
        let desc_style = Style::new().foreground(AdaptiveColor {
            Light: "#B2B2B2",
            Dark: "#4A4A4A",
        });
        Self {
            short_key: key_style.clone(),
            short_desc: desc_style.clone(),
            short_separator: desc_style.clone(),
            full_key: key_style,
            full_desc: desc_style,
        }
    }
}

/// Help view state.
#[derive(Debug, Clone)]
pub struct Model {
    /// When true, [`Model::view`] renders the full multi-column help.
    pub show_all: bool,
    /// Maximum render width in cells; 0 disables truncation.
    pub width: usize,
    /// Separator between entries in the short view.
    pub short_separator: String,
    /// Marker appended when the short view is truncated.
    pub ellipsis: String,
    /// Element styles.
    pub styles: Styles,
}

impl Default for Model {
    fn default() -> Self {
        Self::new()
    }
}

impl Model {
    /// Creates a help view with the default separator and styles.
    pub fn new() -> Self {
        Self {
            show_all: false,
            width: 0,
            short_separator: " • ".to_string(),
            ellipsis: "…".to_string(),
            styles: Styles::default(),
        }
    }

    /// Renders help for the given key map, honoring [`Model::show_all`].
    pub fn view<K: KeyMap>(&self, keymap: &K) -> String {
        if self.show_all {
            self.full_help_view(&keymap.full_help())
        } else {
            self.short_help_view(&keymap.short_help())
        }
    }

    /// Renders the single-line help view.
    pub fn short_help_view(&self, bindings: &[&Binding]) -> String {
        let mut out = String::new();
        let mut taken = 0usize;
        for binding in bindings.iter().filter(|b| b.enabled()) {
            let sep = if out.is_empty() {
                String::new()
            } else {
                self.styles.short_separator.render(&self.short_separator)
            };
            let sep_width = if out.is_empty() {
                0
            } else {
                self.short_separator.width()
            };
            let entry_width = binding.help.key.width() + 1 + binding.help.desc.width();
            if self.width > 0 && taken + sep_width + entry_width > self.width {
                if taken + self.ellipsis.width() <= self.width {
                    out.push_str(&self.styles.short_separator.render(&self.ellipsis));
                }
                break;
            }
            out.push_str(&sep);
            out.push_str(&self.styles.short_key.render(&binding.help.key));
            out.push(' ');
            out.push_str(&self.styles.short_desc.render(&binding.help.desc));
            taken += sep_width + entry_width;
        }
        out
    }

    /// Renders the multi-column help view, one column per binding group.
    pub fn full_help_view(&self, groups: &[Vec<&Binding>]) -> String {
        let mut columns: Vec<Vec<String>> = Vec::new();
        let mut rows = 0usize;
        for group in groups {
            let enabled: Vec<&&Binding> = group.iter().filter(|b| b.enabled()).collect();
            if enabled.is_empty() {
                continue;
            }
            let key_width = enabled
                .iter()
                .map(|b| b.help.key.width())
                .max()
                .unwrap_or(0);
            let lines: Vec<String> = enabled
                .iter()
                .map(|b| {
                    let pad = " ".repeat(key_width - b.help.key.width());
                    format!(
                        "{}{} {}",
                        self.styles.full_key.render(&b.help.key),
                        pad,
                        self.styles.full_desc.render(&b.help.desc)
                    )
                })
                .collect();
            rows = rows.max(lines.len());
            columns.push(lines);
        }

        let mut out = Vec::with_capacity(rows);
        for row in 0..rows {
            let mut line = String::new();
            for (i, column) in columns.iter().enumerate() {
                if i > 0 {
                    line.push_str("    ");
                }
                line.push_str(column.get(row).map(String::as_str).unwrap_or(""));
            }
            out.push(line.trim_end().to_string());
        }
        out.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::Binding;
    use crossterm::event::KeyCode;

    struct TestMap {
        up: Binding,
        down: Binding,
        quit: Binding,
    }

    impl TestMap {
        fn new() -> Self {
            Self {
                up: Binding::new(vec![KeyCode::Up]).with_help("↑", "up"),
                down: Binding::new(vec![KeyCode::Down]).with_help("↓", "down"),
                quit: Binding::new(vec![KeyCode::Char('q')]).with_help("q", "quit"),
            }
        }
    }

    impl KeyMap for TestMap {
        fn short_help(&self) -> Vec<&Binding> {
            vec![&self.up, &self.down, &self.quit]
        }

        fn full_help(&self) -> Vec<Vec<&Binding>> {
            vec![vec![&self.up, &self.down], vec![&self.quit]]
        }
    }

    #[test]
    fn short_view_joins_entries() {
        let help = Model::new();
        let map = TestMap::new();
        let view = help.view(&map);
        assert!(view.contains("up"));
        assert!(view.contains("down"));
        assert!(view.contains("quit"));
    }

    #[test]
    fn disabled_bindings_are_skipped() {
        let help = Model::new();
        let mut map = TestMap::new();
        map.down.set_enabled(false);
        let view = help.view(&map);
        assert!(!view.contains("down"));
    }

    #[test]
    fn full_view_has_one_row_per_longest_group() {
        let mut help = Model::new();
        help.show_all = true;
        let map = TestMap::new();
        let view = help.view(&map);
        assert_eq!(view.lines().count(), 2);
    }
}
