//! Type-safe key bindings with attached help text.
//!
//! A [`Binding`] couples the physical keys that trigger an action with the
//! short help text shown for it. Components expose their bindings through the
//! [`KeyMap`] trait, which the [`crate::help`] view renders without knowing
//! anything about the component itself.
//!
//! # Examples
//!
//! ```
//! use bibliotea::key::Binding;
//! use crossterm::event::{KeyCode, KeyModifiers};
//!
//! let confirm = Binding::new(vec![KeyCode::Enter]).with_help("enter", "confirm");
//! let force_quit = Binding::new(vec![(KeyCode::Char('c'), KeyModifiers::CONTROL)])
//!     .with_help("ctrl+c", "quit");
//! assert!(confirm.enabled());
//! ```

use bubbletea_rs::KeyMsg;
use crossterm::event::{KeyCode, KeyModifiers};

/// A single physical key press: a key code plus its modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress {
    /// The key code (character, arrow, Enter, ...).
    pub code: KeyCode,
    /// Modifier keys that must be held.
    pub modifiers: KeyModifiers,
}

impl From<KeyCode> for KeyPress {
    fn from(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::NONE,
        }
    }
}

impl From<(KeyCode, KeyModifiers)> for KeyPress {
    fn from((code, modifiers): (KeyCode, KeyModifiers)) -> Self {
        Self { code, modifiers }
    }
}

/// Help text attached to a binding: the key label and what it does.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Help {
    /// Display label for the key(s), e.g. `"↑/k"`.
    pub key: String,
    /// Short action description, e.g. `"up"`.
    pub desc: String,
}

/// A key binding: the keys that trigger it, its help text, and whether it is
/// currently enabled.
#[derive(Debug, Clone)]
pub struct Binding {
    keys: Vec<KeyPress>,
    /// Help text for this binding.
    pub help: Help,
    disabled: bool,
}

impl Binding {
    /// Creates a binding for the given keys.
    ///
    /// Accepts bare [`KeyCode`]s or `(KeyCode, KeyModifiers)` pairs.
    pub fn new<K: Into<KeyPress>>(keys: Vec<K>) -> Self {
        Self {
            keys: keys.into_iter().map(Into::into).collect(),
            help: Help::default(),
            disabled: false,
        }
    }

    /// Attaches help text and returns the binding.
    #[must_use]
    pub fn with_help(mut self, key: &str, desc: &str) -> Self {
        self.help = Help {
            key: key.to_string(),
            desc: desc.to_string(),
        };
        self
    }

    /// Returns whether this binding is enabled and has keys.
    ///
    /// Disabled bindings never match and are skipped by help views.
    pub fn enabled(&self) -> bool {
        !self.disabled && !self.keys.is_empty()
    }

    /// Enables or disables this binding.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.disabled = !enabled;
    }

    /// Returns whether the given key message triggers this binding.
    ///
    /// Shift is ignored for character keys so that bindings declared as
    /// `Char('G')` match regardless of how the terminal reports the shift
    /// state.
    pub fn matches(&self, msg: &KeyMsg) -> bool {
        self.enabled()
            && self.keys.iter().any(|press| {
                if press.code != msg.key {
                    return false;
                }
                if press.modifiers == msg.modifiers {
                    return true;
                }
                matches!(msg.key, KeyCode::Char(_))
                    && press.modifiers == KeyModifiers::NONE
                    && msg.modifiers == KeyModifiers::SHIFT
            })
    }
}

/// Implemented by components that expose key bindings for help rendering.
pub trait KeyMap {
    /// Bindings for the compact single-line help view, in display order.
    fn short_help(&self) -> Vec<&Binding>;

    /// Bindings for the expanded help view, grouped into columns.
    fn full_help(&self) -> Vec<Vec<&Binding>>;
}
