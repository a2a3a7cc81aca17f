//! Combo chain state machine
//!
//! A chain continues while events arrive no more than `window` apart.
//! An event after the window has lapsed restarts the chain at the event's
//! amount rather than adding to the stale count.

use crate::core::types::ComboCount;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct ComboTracker {
    count: ComboCount,
    /// Time of the most recent chain-extending event
    last_event: Option<Duration>,
    window: Duration,
    max: ComboCount,
}

impl ComboTracker {
    pub fn new(window: Duration, max: ComboCount) -> Self {
        Self {
            count: 0,
            last_event: None,
            window,
            max,
        }
    }

    pub fn count(&self) -> ComboCount {
        self.count
    }

    /// Whether `now` still falls inside the window opened by the last event
    pub fn within_window(&self, now: Duration) -> bool {
        match self.last_event {
            Some(last) => now.saturating_sub(last) <= self.window,
            None => false,
        }
    }

    /// A live combo whose window has lapsed
    pub fn is_stale(&self, now: Duration) -> bool {
        self.count > 0 && !self.within_window(now)
    }

    /// Combo value as it should be seen at `now`, without mutating anything
    pub fn effective_count(&self, now: Duration) -> ComboCount {
        if self.is_stale(now) {
            0
        } else {
            self.count
        }
    }

    /// Register a combo event of `amount` steps at `now`, returning the new count
    pub fn extend(&mut self, amount: ComboCount, now: Duration) -> ComboCount {
        self.count = if self.within_window(now) {
            self.count.saturating_add(amount).min(self.max)
        } else {
            amount.min(self.max)
        };
        self.last_event = Some(now);
        self.count
    }

    /// Drop the chain to zero; returns the count that was broken, if any
    pub fn clear(&mut self) -> Option<ComboCount> {
        if self.count == 0 {
            return None;
        }
        let broken = self.count;
        self.count = 0;
        Some(broken)
    }
}
