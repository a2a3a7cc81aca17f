//! Time sources for the combo window
//!
//! The engine only ever asks "how long since the clock started", the same
//! question a frame loop answers with its running game time. `SystemClock`
//! reads the monotonic clock, `ManualClock` is advanced by hand in tests and
//! scripted sessions.

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// Monotonic time source
pub trait Clock: Send + Sync {
    /// Time elapsed since the clock's origin
    fn now(&self) -> Duration;
}

/// Wall-clock backed time source
#[derive(Debug, Clone)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Hand-driven time source
///
/// Clones share the same underlying time, so a test can keep one copy and
/// hand another to the engine.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Arc<Mutex<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Jump to an absolute time in seconds
    pub fn set_secs(&self, secs: f32) {
        *self.lock() = Duration::from_secs_f32(secs.max(0.0));
    }

    /// Move forward by `secs` seconds
    pub fn advance_secs(&self, secs: f32) {
        let mut now = self.lock();
        *now += Duration::from_secs_f32(secs.max(0.0));
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Duration> {
        // A poisoned clock still holds a valid Duration
        self.now.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        *self.lock()
    }
}
