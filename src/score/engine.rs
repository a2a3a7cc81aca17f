//! The score engine
//!
//! Holds current score, combo chain and high score. Point deltas that are
//! zero or negative are ignored rather than rejected, and every value is
//! clamped into its configured range instead of failing.

use crate::core::clock::Clock;
use crate::core::config::ScoreConfig;
use crate::core::error::{Result, ScoreError};
use crate::core::types::{ComboCount, EnemyType, Points};
use crate::score::combo::ComboTracker;
use crate::score::events::ScoreEvents;
use crate::score::formulas;
use crate::score::store::KeyValueStore;
use std::fmt;
use std::sync::Arc;

/// Store key holding the persisted high score
pub const HIGH_SCORE_KEY: &str = "HighScore";

pub struct ScoreEngine {
    config: ScoreConfig,
    current_score: Points,
    high_score: Points,
    combo: ComboTracker,
    events: ScoreEvents,
    store: Box<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
}

impl ScoreEngine {
    /// Create an engine and load the persisted high score (0 when absent)
    ///
    /// The current score starts at 0, or at the nearest bound if 0 lies
    /// outside `[min_score, max_score]`.
    pub fn new(
        config: ScoreConfig,
        store: Box<dyn KeyValueStore>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self> {
        config.validate()?;

        let high_score = store.get_int(HIGH_SCORE_KEY)?.unwrap_or(0);
        let current_score = (0 as Points).clamp(config.min_score, config.max_score);
        let combo = ComboTracker::new(config.combo_window(), config.max_combo);

        tracing::info!("Score engine ready, high score {}", high_score);

        Ok(Self {
            config,
            current_score,
            high_score,
            combo,
            events: ScoreEvents::default(),
            store,
            clock,
        })
    }

    pub fn config(&self) -> &ScoreConfig {
        &self.config
    }

    pub fn current_score(&self) -> Points {
        self.current_score
    }

    pub fn high_score(&self) -> Points {
        self.high_score
    }

    /// Raw combo count; a lapsed chain stays visible until the next decay check
    pub fn combo_count(&self) -> ComboCount {
        self.combo.count()
    }

    /// Subscription point for change notifications
    pub fn events(&mut self) -> &mut ScoreEvents {
        &mut self.events
    }

    // === SCORE MUTATION ===

    /// Award `points`; non-positive awards are ignored
    ///
    /// Beating the high score records and persists it. When the write
    /// fails the new high score is still held in memory and notified, and
    /// `PersistenceWriteFailed` is returned.
    pub fn add_score(&mut self, points: Points, reason: &str) -> Result<()> {
        if points <= 0 {
            return Ok(());
        }

        self.current_score = self.clamp_score(self.current_score.saturating_add(points));
        self.events.score_changed.emit(self.current_score);

        tracing::debug!(
            "Score +{} ({}), now {}",
            points,
            reason,
            self.current_score
        );

        if self.current_score > self.high_score {
            self.high_score = self.current_score;
            self.events.high_score_achieved.emit(self.high_score);
            tracing::info!("New high score: {}", self.high_score);
            self.persist_high_score()?;
        }

        Ok(())
    }

    /// Deduct `points`; non-positive deductions are ignored
    pub fn subtract_score(&mut self, points: Points, reason: &str) {
        if points <= 0 {
            return;
        }

        self.current_score = self.clamp_score(self.current_score.saturating_sub(points));
        self.events.score_changed.emit(self.current_score);

        tracing::debug!(
            "Score -{} ({}), now {}",
            points,
            reason,
            self.current_score
        );
    }

    /// Overwrite the score, clamped; notifies only on an actual change
    ///
    /// A new record is stored but not announced on `high_score_achieved`.
    pub fn set_score(&mut self, new_score: Points) -> Result<()> {
        let clamped = self.clamp_score(new_score);
        if clamped == self.current_score {
            return Ok(());
        }

        self.current_score = clamped;
        self.events.score_changed.emit(self.current_score);

        if self.current_score > self.high_score {
            self.high_score = self.current_score;
            self.persist_high_score()?;
        }

        Ok(())
    }

    /// Zero the score and break the combo; the high score is kept
    pub fn reset_score(&mut self) {
        let old_score = self.current_score;
        self.current_score = self.clamp_score(0);
        self.reset_combo();

        if old_score != self.current_score {
            self.events.score_changed.emit(self.current_score);
        }
    }

    // === COMBO ===

    /// Extend the combo chain by `amount`
    ///
    /// Inside the window the count grows (capped at `max_combo`); outside
    /// it restarts at `amount`. Always notifies, even if the value is
    /// unchanged.
    pub fn add_combo(&mut self, amount: ComboCount) {
        let now = self.clock.now();
        let count = self.combo.extend(amount, now);
        self.events.combo_changed.emit(count);
        tracing::debug!("Combo: {}", count);
    }

    /// Break the combo; quiet when there is nothing to break
    pub fn reset_combo(&mut self) {
        if let Some(broken) = self.combo.clear() {
            tracing::debug!("Combo broken at {}", broken);
            self.events.combo_changed.emit(0);
        }
    }

    /// Periodic decay check; returns true if a lapsed combo was reset
    pub fn tick(&mut self) -> bool {
        self.expire_stale_combo()
    }

    fn expire_stale_combo(&mut self) -> bool {
        if self.combo.is_stale(self.clock.now()) {
            self.reset_combo();
            true
        } else {
            false
        }
    }

    // === FORMULAS ===

    /// Score for killing an enemy at `distance` from the player
    ///
    /// Uses the combo count from before this kill and then extends the
    /// combo by one, so every kill-score calculation is also a combo event.
    /// Does not add the result to the score; callers pass it to `add_score`.
    pub fn calculate_kill_score(&mut self, enemy_type: &EnemyType, distance: f32) -> Points {
        self.expire_stale_combo();
        let score = formulas::kill_score(&self.config, enemy_type, distance, self.combo.count());
        self.add_combo(1);
        score
    }

    /// Kill score as `calculate_kill_score` would compute it now, without
    /// touching the combo
    pub fn kill_score_preview(&self, enemy_type: &EnemyType, distance: f32) -> Points {
        let combo = self.combo.effective_count(self.clock.now());
        formulas::kill_score(&self.config, enemy_type, distance, combo)
    }

    pub fn calculate_skill_score(&self, hit_enemy: bool, enemies_hit: u32) -> Points {
        formulas::skill_score(hit_enemy, enemies_hit)
    }

    pub fn calculate_multi_kill_bonus(&self, kill_count: u32) -> Points {
        formulas::multi_kill_bonus(self.config.multi_kill_bonus, kill_count)
    }

    fn clamp_score(&self, score: Points) -> Points {
        score.clamp(self.config.min_score, self.config.max_score)
    }

    fn persist_high_score(&mut self) -> Result<()> {
        self.store
            .set_int(HIGH_SCORE_KEY, self.high_score)
            .map_err(|e| {
                tracing::warn!("Failed to persist high score {}: {}", self.high_score, e);
                ScoreError::PersistenceWriteFailed {
                    key: HIGH_SCORE_KEY.to_string(),
                    source: Box::new(e),
                }
            })
    }
}

impl fmt::Debug for ScoreEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScoreEngine")
            .field("current_score", &self.current_score)
            .field("high_score", &self.high_score)
            .field("combo", &self.combo)
            .field("events", &self.events)
            .finish_non_exhaustive()
    }
}
