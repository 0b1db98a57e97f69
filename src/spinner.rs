//! Loading spinner shown while a fetch is in flight.
//!
//! The spinner drives itself through [`TickMsg`] commands scheduled with the
//! runtime's `tick`. Every instance carries a unique id and ignores ticks
//! addressed to other instances, so the search page's spinner and the quiz
//! submission spinner never advance each other. Stopping a spinner is done by
//! simply not forwarding messages to it any more; the pending tick then
//! expires without scheduling a successor.

use bubbletea_rs::{tick, Cmd, Msg};
use lipgloss_extras::prelude::*;
use once_cell::sync::Lazy;
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Duration;

static LAST_ID: AtomicI64 = AtomicI64::new(0);

fn next_id() -> i64 {
    LAST_ID.fetch_add(1, Ordering::SeqCst) + 1
}

/// Animation frames and timing for a spinner.
#[derive(Debug, Clone)]
pub struct Spinner {
    /// Frames to cycle through.
    pub frames: Vec<String>,
    /// Delay between frames; smaller is faster.
    pub fps: Duration,
}

/// Basic line spinner (`|`, `/`, `-`, `\`).
pub static LINE: Lazy<Spinner> = Lazy::new(|| Spinner {
    frames: vec![
        "|".to_string(),
        "/".to_string(),
        "-".to_string(),
        "\\".to_string(),
    ],
    fps: Duration::from_millis(100),
});

/// Braille dot spinner.
pub static DOT: Lazy<Spinner> = Lazy::new(|| Spinner {
    frames: vec![
        "⣾ ".to_string(),
        "⣽ ".to_string(),
        "⣻ ".to_string(),
        "⢿ ".to_string(),
        "⡿ ".to_string(),
        "⣟ ".to_string(),
        "⣯ ".to_string(),
        "⣷ ".to_string(),
    ],
    fps: Duration::from_millis(100),
});

/// Message advancing a spinner by one frame.
///
/// The `id` routes the tick to the spinner instance that scheduled it.
#[derive(Debug, Clone)]
pub struct TickMsg {
    /// Identifier of the spinner this tick belongs to.
    pub id: i64,
}

/// Spinner state.
#[derive(Debug, Clone)]
pub struct Model {
    spinner: Spinner,
    /// Style applied to the rendered frame.
    pub style: Style,
    frame: usize,
    id: i64,
}

impl Model {
    /// Creates a spinner with the given frame set.
    pub fn new(spinner: Spinner) -> Self {
        Self {
            spinner,
            style: Style::new().foreground(AdaptiveColor {
                Light: "#8E8E8E",
                Dark: "#747373",
            }),
            frame: 0,
            id: next_id(),
        }
    }

    /// Returns this spinner's unique id.
    pub fn id(&self) -> i64 {
        self.id
    }

    /// Returns the command that starts (or restarts) the animation.
    pub fn start(&self) -> Cmd {
        self.tick_cmd()
    }

    /// Advances the animation when `msg` is this spinner's tick.
    ///
    /// Returns the follow-up tick command on a match, `None` otherwise.
    pub fn update(&mut self, msg: &Msg) -> Option<Cmd> {
        let tick_msg = msg.downcast_ref::<TickMsg>()?;
        if tick_msg.id != self.id {
            return None;
        }
        self.frame = (self.frame + 1) % self.spinner.frames.len();
        Some(self.tick_cmd())
    }

    /// Renders the current frame.
    pub fn view(&self) -> String {
        match self.spinner.frames.get(self.frame) {
            Some(frame) => self.style.render(frame),
            None => String::new(),
        }
    }

    fn tick_cmd(&self) -> Cmd {
        let id = self.id;
        tick(self.spinner.fps, move |_| Box::new(TickMsg { id }) as Msg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique() {
        let a = Model::new(LINE.clone());
        let b = Model::new(LINE.clone());
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn tick_advances_matching_spinner_only() {
        let mut a = Model::new(LINE.clone());
        let first = a.view();

        let foreign: Msg = Box::new(TickMsg { id: a.id() + 1 });
        assert!(a.update(&foreign).is_none());
        assert_eq!(a.view(), first);

        let own: Msg = Box::new(TickMsg { id: a.id() });
        assert!(a.update(&own).is_some());
        assert_ne!(a.view(), first);
    }

    #[test]
    fn frames_wrap_around() {
        let mut s = Model::new(LINE.clone());
        let start = s.view();
        let own_id = s.id();
        for _ in 0..LINE.frames.len() {
            let msg: Msg = Box::new(TickMsg { id: own_id });
            s.update(&msg);
        }
        assert_eq!(s.view(), start);
    }
}
