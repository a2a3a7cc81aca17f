//! Score engine configuration
//!
//! Every tuning constant of the scoring rules lives here. Values are read
//! once at startup (usually from `config/score.toml`) and never change for
//! the lifetime of an engine.

use crate::core::error::{Result, ScoreError};
use crate::core::types::{ComboCount, EnemyType, Points};
use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Base score per enemy type
///
/// Lookups for a type missing from `scores` return `fallback`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BaseScoreTable {
    pub scores: AHashMap<String, Points>,
    pub fallback: Points,
}

impl Default for BaseScoreTable {
    fn default() -> Self {
        let mut scores = AHashMap::new();
        scores.insert("normal".to_string(), 50);
        scores.insert("elite".to_string(), 100);
        Self {
            scores,
            fallback: 50,
        }
    }
}

impl BaseScoreTable {
    pub fn get(&self, enemy_type: &EnemyType) -> Points {
        self.scores
            .get(enemy_type.key())
            .copied()
            .unwrap_or(self.fallback)
    }
}

/// Configuration for the score engine
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreConfig {
    // === SCORE BOUNDS ===
    /// Lowest value the current score can reach
    pub min_score: Points,

    /// Highest value the current score can reach
    pub max_score: Points,

    // === COMBO ===
    /// Seconds after the last combo event during which the chain continues
    ///
    /// Once this much time passes with no new event, the combo drops to 0.
    pub combo_time_window: f32,

    /// Upper bound of the combo counter
    pub max_combo: ComboCount,

    /// Seconds between background decay checks
    ///
    /// Defaults to half the combo window when unset. Must not exceed it,
    /// otherwise a dead combo can linger noticeably past its window.
    pub decay_tick_interval: Option<f32>,

    // === FORMULA COEFFICIENTS ===
    /// Global multiplier applied to every kill score
    pub base_score_multiplier: f32,

    /// Extra kill score per combo step (0.1 = +10% per step)
    pub combo_multiplier: f32,

    /// Extra kill score per world unit of distance (0.05 = +5% per unit)
    pub distance_bonus_factor: f32,

    /// Bonus per kill beyond the first in a single multi-kill
    pub multi_kill_bonus: Points,

    /// Base kill score per enemy type
    pub base_scores: BaseScoreTable,

    // === PERSISTENCE ===
    /// Where the high score key-value file lives
    pub store_path: PathBuf,
}

impl Default for ScoreConfig {
    fn default() -> Self {
        Self {
            min_score: 0,
            max_score: 999_999,

            combo_time_window: 3.0,
            max_combo: 1000,
            decay_tick_interval: None,

            base_score_multiplier: 1.0,
            combo_multiplier: 0.1,
            distance_bonus_factor: 0.05,
            multi_kill_bonus: 30,
            base_scores: BaseScoreTable::default(),

            store_path: PathBuf::from("data/highscore.json"),
        }
    }
}

impl ScoreConfig {
    /// Load and validate a config from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Parse and validate a config from TOML text
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: ScoreConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Combo window as a `Duration`
    pub fn combo_window(&self) -> Duration {
        Duration::from_secs_f32(self.combo_time_window)
    }

    /// Interval between background decay checks
    pub fn decay_interval(&self) -> Duration {
        let secs = self
            .decay_tick_interval
            .unwrap_or(self.combo_time_window / 2.0);
        Duration::from_secs_f32(secs)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.min_score > self.max_score {
            return Err(ScoreError::InvalidConfig(format!(
                "min_score ({}) must be <= max_score ({})",
                self.min_score, self.max_score
            )));
        }

        if !(self.combo_time_window.is_finite() && self.combo_time_window > 0.0) {
            return Err(ScoreError::InvalidConfig(format!(
                "combo_time_window ({}) must be a positive number of seconds",
                self.combo_time_window
            )));
        }
        seconds_to_duration("combo_time_window", self.combo_time_window)?;

        if let Some(interval) = self.decay_tick_interval {
            if !(interval > 0.0 && interval <= self.combo_time_window / 2.0) {
                return Err(ScoreError::InvalidConfig(format!(
                    "decay_tick_interval ({}) must be in (0, combo_time_window / 2 = {}]",
                    interval,
                    self.combo_time_window / 2.0
                )));
            }
        }
        let interval = self
            .decay_tick_interval
            .unwrap_or(self.combo_time_window / 2.0);
        if seconds_to_duration("decay_tick_interval", interval)?.is_zero() {
            return Err(ScoreError::InvalidConfig(format!(
                "decay_tick_interval ({}) rounds to a zero-length tick",
                interval
            )));
        }

        let coefficients = [
            ("base_score_multiplier", self.base_score_multiplier),
            ("combo_multiplier", self.combo_multiplier),
            ("distance_bonus_factor", self.distance_bonus_factor),
        ];
        for (name, value) in coefficients {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ScoreError::InvalidConfig(format!(
                    "{} ({}) must be a non-negative number",
                    name, value
                )));
            }
        }

        if self.multi_kill_bonus < 0 {
            return Err(ScoreError::InvalidConfig(
                "multi_kill_bonus must not be negative".into(),
            ));
        }

        Ok(())
    }
}

/// Seconds as a `Duration`, rejecting values `Duration` cannot hold
fn seconds_to_duration(name: &str, secs: f32) -> Result<Duration> {
    Duration::try_from_secs_f32(secs).map_err(|e| {
        ScoreError::InvalidConfig(format!("{} ({}) is not a usable duration: {}", name, secs, e))
    })
}
