//! Adaptive-color styles shared across pages, plus small text helpers.

use lipgloss_extras::prelude::*;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Bullet used between chips and status segments.
pub const BULLET: &str = "•";

/// Ellipsis appended to clipped text.
pub const ELLIPSIS: &str = "…";

/// Styles for the application chrome and book rows.
///
/// All colors are adaptive so the UI stays readable on light and dark
/// terminals.
#[derive(Debug, Clone)]
pub struct AppStyles {
    /// Banner block on the landing page.
    pub banner: Style,
    /// Page title.
    pub title: Style,
    /// Secondary line under a title.
    pub subtitle: Style,
    /// Error banner.
    pub error: Style,
    /// Status line above the help line.
    pub status: Style,
    /// Help line container.
    pub help: Style,
    /// Book title in a result row.
    pub book_title: Style,
    /// Author line in a result row.
    pub book_authors: Style,
    /// Star rating.
    pub rating: Style,
    /// Category chip.
    pub chip: Style,
    /// Selected chip (quiz genre picker).
    pub chip_selected: Style,
    /// Description text.
    pub description: Style,
    /// Empty-state message.
    pub empty: Style,
    /// Active step label in the quiz stepper.
    pub step_active: Style,
    /// Completed step label.
    pub step_done: Style,
    /// Upcoming step label.
    pub step_pending: Style,
    /// Cursor marker in front of the focused option.
    pub option_cursor: Style,
    /// Selected radio/checkbox option text.
    pub option_selected: Style,
    /// Dimmed text for secondary hints.
    pub dim: Style,
}

impl Default for AppStyles {
    fn default() -> Self {
        let subdued = AdaptiveColor {
            Light: "#9B9B9B",
            Dark: "#5C5C5C",
        };
        let accent = Color::from("62");
        Self {
            banner: Style::new()
                .background(accent.clone())
                .foreground(Color::from("230"))
                .bold(true)
                .padding(0, 2, 0, 2),
            title: Style::new()
                .background(accent.clone())
                .foreground(Color::from("230"))
                .padding(0, 1, 0, 1),
            subtitle: Style::new().foreground(AdaptiveColor {
                Light: "#6B6B6B",
                Dark: "#A8A8A8",
            }),
            error: Style::new()
                .foreground(Color::from("230"))
                .background(Color::from("160"))
                .padding(0, 1, 0, 1),
            status: Style::new().foreground(AdaptiveColor {
                Light: "#A49FA5",
                Dark: "#777777",
            }),
            help: Style::new().padding(1, 0, 0, 0),
            book_title: Style::new().bold(true),
            book_authors: Style::new().foreground(AdaptiveColor {
                Light: "#6B6B6B",
                Dark: "#A8A8A8",
            }),
            rating: Style::new().foreground(Color::from("178")),
            chip: Style::new()
                .foreground(AdaptiveColor {
                    Light: "#5A56E0",
                    Dark: "#7571F9",
                })
                .padding(0, 1, 0, 1),
            chip_selected: Style::new()
                .background(accent)
                .foreground(Color::from("230"))
                .padding(0, 1, 0, 1),
            description: Style::new().foreground(subdued.clone()),
            empty: Style::new().foreground(AdaptiveColor {
                Light: "#909090",
                Dark: "#626262",
            }),
            step_active: Style::new().bold(true).foreground(AdaptiveColor {
                Light: "#5A56E0",
                Dark: "#7571F9",
            }),
            step_done: Style::new().foreground(AdaptiveColor {
                Light: "#04B575",
                Dark: "#ECFD65",
            }),
            step_pending: Style::new().foreground(subdued.clone()),
            option_cursor: Style::new().foreground(AdaptiveColor {
                Light: "#EE6FF8",
                Dark: "#EE6FF8",
            }),
            option_selected: Style::new().bold(true),
            dim: Style::new().foreground(subdued),
        }
    }
}

/// Clips `text` to at most `max_width` terminal cells, appending an ellipsis
/// when anything was cut. Width 0 yields an empty string.
pub fn clip(text: &str, max_width: usize) -> String {
    if max_width == 0 {
        return String::new();
    }
    if text.width() <= max_width {
        return text.to_string();
    }
    let limit = max_width.saturating_sub(ELLIPSIS.width());
    let mut out = String::new();
    let mut used = 0usize;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > limit {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push_str(ELLIPSIS);
    out
}

/// Renders a five-star rating like `★★★★☆` for `rating` in `0.0..=5.0`.
pub fn stars(rating: f64) -> String {
    let filled = rating.round().clamp(0.0, 5.0) as usize;
    let mut out = String::new();
    for _ in 0..filled {
        out.push('★');
    }
    for _ in filled..5 {
        out.push('☆');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clip_keeps_short_text() {
        assert_eq!(clip("short", 10), "short");
    }

    #[test]
    fn clip_appends_ellipsis() {
        let clipped = clip("a very long book title", 10);
        assert!(clipped.ends_with(ELLIPSIS));
        assert!(clipped.width() <= 10);
    }

    #[test]
    fn clip_zero_width_is_empty() {
        assert_eq!(clip("anything", 0), "");
    }

    #[test]
    fn stars_round_to_nearest() {
        assert_eq!(stars(4.2), "★★★★☆");
        assert_eq!(stars(4.6), "★★★★★");
        assert_eq!(stars(0.0), "☆☆☆☆☆");
        assert_eq!(stars(7.0), "★★★★★");
    }
}
