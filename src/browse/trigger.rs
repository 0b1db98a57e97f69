//! Reveal trigger: an at-most-once boundary-crossing subscription.
//!
//! The search page widens the visible window when the last displayed row
//! scrolls into view. [`RevealTrigger`] models that subscription explicitly:
//! it is armed against the *identity* of the tail row, fires at most once
//! per arming, and is rebuilt (re-armed) whenever that identity changes,
//! i.e. whenever a reveal or a query change produces a different tail.
//! While a fetch is in flight the trigger is suspended and reports nothing.

/// Boundary-crossing detector for the tail of the displayed list.
///
/// `K` identifies the tail row; any equality-comparable key works. Callers
/// pass `None` to [`RevealTrigger::retarget`] when there is nothing left to
/// reveal, which leaves the trigger disarmed.
#[derive(Debug, Clone)]
pub struct RevealTrigger<K: PartialEq> {
    target: Option<K>,
    armed: bool,
    suspended: bool,
}

impl<K: PartialEq> Default for RevealTrigger<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: PartialEq> RevealTrigger<K> {
    /// Creates a disarmed trigger.
    pub fn new() -> Self {
        Self {
            target: None,
            armed: false,
            suspended: false,
        }
    }

    /// Points the subscription at a new tail identity.
    ///
    /// A changed identity re-arms the trigger; an unchanged one leaves the
    /// armed state alone, so a tail that already fired cannot fire again
    /// until it actually changes. `None` disarms.
    pub fn retarget(&mut self, target: Option<K>) {
        if self.target != target {
            self.armed = target.is_some();
            self.target = target;
        }
    }

    /// Reports whether the tail row is currently in view.
    ///
    /// Returns `true` exactly once per arming, and never while suspended.
    pub fn observe(&mut self, tail_in_view: bool) -> bool {
        if self.suspended || !self.armed || !tail_in_view {
            return false;
        }
        self.armed = false;
        true
    }

    /// Makes the trigger inert (a fetch is in flight).
    pub fn suspend(&mut self) {
        self.suspended = true;
    }

    /// Lifts a suspension.
    pub fn resume(&mut self) {
        self.suspended = false;
    }

    /// Tears the subscription down entirely.
    pub fn disarm(&mut self) {
        self.armed = false;
        self.target = None;
    }

    /// Whether the trigger would fire on the next in-view observation.
    pub fn is_armed(&self) -> bool {
        self.armed && !self.suspended
    }
}
