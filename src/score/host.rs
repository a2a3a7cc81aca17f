//! Shared ownership of the engine
//!
//! The application root installs exactly one engine into an `EngineHost`
//! and hands `ScoreHandle` clones to combat code, the UI and the decay
//! ticker. All access goes through one mutex, so mutations and decay
//! checks never interleave.

use crate::core::error::{Result, ScoreError};
use crate::score::engine::ScoreEngine;
use std::sync::{Arc, Mutex, OnceLock};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Cloneable, serialized access to a `ScoreEngine`
#[derive(Debug, Clone)]
pub struct ScoreHandle {
    inner: Arc<Mutex<ScoreEngine>>,
}

impl ScoreHandle {
    pub fn new(engine: ScoreEngine) -> Self {
        Self {
            inner: Arc::new(Mutex::new(engine)),
        }
    }

    /// Run `f` with exclusive access to the engine
    ///
    /// Do not call back into the same handle from inside `f` or from an
    /// event callback; the lock is not reentrant.
    pub fn with<R>(&self, f: impl FnOnce(&mut ScoreEngine) -> R) -> R {
        // Every engine method leaves the state consistent before it can
        // panic, so a poisoned lock is still safe to use.
        let mut engine = self
            .inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        f(&mut engine)
    }

    /// One decay check; true if a lapsed combo was reset
    pub fn tick(&self) -> bool {
        self.with(|engine| engine.tick())
    }

    /// Whether two handles point at the same engine
    pub fn same_engine(&self, other: &ScoreHandle) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

/// Run the combo decay check every `interval` until the task is aborted
///
/// Must be called from inside a tokio runtime.
pub fn spawn_decay_ticker(handle: ScoreHandle, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            if handle.tick() {
                tracing::debug!("Decay ticker expired combo");
            }
        }
    })
}

/// Slot holding the one engine of the process
#[derive(Debug, Default)]
pub struct EngineHost {
    slot: OnceLock<ScoreHandle>,
}

impl EngineHost {
    pub const fn new() -> Self {
        Self {
            slot: OnceLock::new(),
        }
    }

    /// Install the engine; a second install is rejected and the first kept
    pub fn install(&self, engine: ScoreEngine) -> Result<ScoreHandle> {
        let handle = ScoreHandle::new(engine);
        self.slot.set(handle.clone()).map_err(|_| {
            tracing::warn!("Rejected second score engine; keeping the installed one");
            ScoreError::EngineAlreadyInstalled
        })?;
        Ok(handle)
    }

    /// The installed engine, if any
    pub fn handle(&self) -> Option<ScoreHandle> {
        self.slot.get().cloned()
    }
}
