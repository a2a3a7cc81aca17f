//! Scoring formulas
//!
//! Pure functions only. The engine decides which combo value to feed in and
//! what to do with the result.

use crate::core::config::ScoreConfig;
use crate::core::types::{ComboCount, EnemyType, Points};

/// Score for landing a skill on at least one enemy
pub const SKILL_HIT_BASE: Points = 5;

/// Additional skill score per enemy hit
pub const SKILL_PER_ENEMY: Points = 3;

/// Score for killing an enemy
///
/// `base * base_multiplier * (1 + distance * distance_factor) * (1 + combo * combo_multiplier)`,
/// rounded to the nearest integer with ties going to the even neighbour.
///
/// Computed in `f32`, the precision of the coefficients, so halves such as
/// `50 * 1.05` stay ties instead of drifting above them.
pub fn kill_score(
    config: &ScoreConfig,
    enemy_type: &EnemyType,
    distance: f32,
    combo: ComboCount,
) -> Points {
    let base = config.base_scores.get(enemy_type) as f32;
    let distance_bonus: f32 = 1.0 + distance * config.distance_bonus_factor;
    let combo_bonus: f32 = 1.0 + combo as f32 * config.combo_multiplier;
    let total_multiplier = config.base_score_multiplier * distance_bonus * combo_bonus;

    (base * total_multiplier).round_ties_even() as Points
}

/// Score for a skill use; zero when nothing was hit
pub fn skill_score(hit_enemy: bool, enemies_hit: u32) -> Points {
    if !hit_enemy {
        return 0;
    }
    SKILL_HIT_BASE + enemies_hit as Points * SKILL_PER_ENEMY
}

/// Bonus for killing several enemies with one action
pub fn multi_kill_bonus(bonus_per_kill: Points, kill_count: u32) -> Points {
    if kill_count <= 1 {
        return 0;
    }
    bonus_per_kill * (kill_count as Points - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kill_score_base_values() {
        let config = ScoreConfig::default();
        assert_eq!(kill_score(&config, &EnemyType::Normal, 0.0, 0), 50);
        assert_eq!(kill_score(&config, &EnemyType::Elite, 0.0, 0), 100);
        assert_eq!(kill_score(&config, &EnemyType::from("ghost"), 0.0, 0), 50);
    }

    #[test]
    fn test_kill_score_distance_and_combo() {
        let config = ScoreConfig::default();
        // 100 * (1 + 10 * 0.05) * (1 + 4 * 0.1) = 100 * 1.5 * 1.4 = 210
        assert_eq!(kill_score(&config, &EnemyType::Elite, 10.0, 4), 210);
        // 50 * 1.0 * (1 + 2 * 0.1) = 60
        assert_eq!(kill_score(&config, &EnemyType::Normal, 0.0, 2), 60);
    }

    #[test]
    fn test_kill_score_base_multiplier() {
        let config = ScoreConfig {
            base_score_multiplier: 2.0,
            ..ScoreConfig::default()
        };
        assert_eq!(kill_score(&config, &EnemyType::Normal, 0.0, 0), 100);
    }

    #[test]
    fn test_kill_score_ties_round_to_even() {
        let mut table = ScoreConfig {
            base_score_multiplier: 0.5,
            ..ScoreConfig::default()
        };
        table.base_scores.scores.insert("imp".into(), 5);
        // 5 * 0.5 = 2.5 -> 2
        assert_eq!(kill_score(&table, &EnemyType::from("imp"), 0.0, 0), 2);
        table.base_scores.scores.insert("imp".into(), 7);
        // 7 * 0.5 = 3.5 -> 4
        assert_eq!(kill_score(&table, &EnemyType::from("imp"), 0.0, 0), 4);
    }

    #[test]
    fn test_kill_score_distance_ties_round_to_even() {
        let config = ScoreConfig::default();
        // 50 * 1.05 = 52.5 -> 52
        assert_eq!(kill_score(&config, &EnemyType::Normal, 1.0, 0), 52);
        // 50 * 1.05 * 1.4 = 73.5 -> 73
        assert_eq!(kill_score(&config, &EnemyType::Normal, 1.0, 4), 73);
        // 50 * 1.1 * 1.1 = 60.5 -> 60
        assert_eq!(kill_score(&config, &EnemyType::Normal, 2.0, 1), 60);
    }

    #[test]
    fn test_skill_score() {
        assert_eq!(skill_score(true, 2), 11);
        assert_eq!(skill_score(true, 0), 5);
        assert_eq!(skill_score(false, 0), 0);
        assert_eq!(skill_score(false, 7), 0);
    }

    #[test]
    fn test_multi_kill_bonus() {
        assert_eq!(multi_kill_bonus(30, 0), 0);
        assert_eq!(multi_kill_bonus(30, 1), 0);
        assert_eq!(multi_kill_bonus(30, 3), 60);
    }
}
