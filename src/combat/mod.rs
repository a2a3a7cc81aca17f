//! Combat scoring hooks
//!
//! The glue between combat outcomes and the score engine. Hit detection,
//! targeting and damage delivery live elsewhere; these functions take the
//! results (which enemy, how far away, how many were hit) and turn them
//! into combo and score events.

use crate::core::error::Result;
use crate::core::types::{EnemyType, Points};
use crate::score::engine::ScoreEngine;

/// An enemy that awards score when it dies
#[derive(Debug, Clone)]
pub struct Enemy {
    pub name: String,
    pub enemy_type: EnemyType,
    pub health: f32,
    dead: bool,
}

/// What a single hit did
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HitOutcome {
    /// Enemy survived with this much health left
    Damaged { remaining: f32 },
    /// Enemy died and its kill score was awarded
    Killed { score: Points },
    /// Enemy was already dead; nothing happened
    AlreadyDead,
}

impl Enemy {
    pub fn new(name: impl Into<String>, enemy_type: EnemyType, health: f32) -> Self {
        Self {
            name: name.into(),
            enemy_type,
            health,
            dead: false,
        }
    }

    pub fn is_dead(&self) -> bool {
        self.dead
    }

    /// Apply `damage` from a player standing `distance_to_player` away
    ///
    /// Every landed hit extends the combo by one. A killing hit first
    /// scores the kill (which itself counts as a combo event) and then
    /// extends the combo for the hit, so a kill advances the chain by two.
    pub fn take_damage(
        &mut self,
        damage: f32,
        distance_to_player: f32,
        engine: &mut ScoreEngine,
    ) -> Result<HitOutcome> {
        if self.dead {
            return Ok(HitOutcome::AlreadyDead);
        }

        self.health -= damage;
        tracing::debug!("{} took {} damage, {} left", self.name, damage, self.health);

        let outcome = if self.health <= 0.0 {
            self.dead = true;
            let score = engine.calculate_kill_score(&self.enemy_type, distance_to_player);
            let awarded = engine.add_score(score, &format!("{} kill", self.enemy_type));
            engine.add_combo(1);
            awarded?;
            tracing::debug!("{} died, worth {}", self.name, score);
            HitOutcome::Killed { score }
        } else {
            engine.add_combo(1);
            HitOutcome::Damaged {
                remaining: self.health,
            }
        };

        Ok(outcome)
    }
}

/// Award skill score for a skill that hit `enemies_hit` enemies
///
/// Score is granted per enemy as the hits land, each award using the
/// running hit count: hitting three enemies pays 8 + 11 + 14.
pub fn resolve_skill_hits(engine: &mut ScoreEngine, enemies_hit: u32) -> Result<Points> {
    let mut total = 0;
    for running in 1..=enemies_hit {
        let score = engine.calculate_skill_score(true, running);
        engine.add_score(score, "skill hit")?;
        total += score;
    }

    if enemies_hit == 0 {
        tracing::debug!("Skill hit nothing");
    }
    Ok(total)
}

/// Award the multi-kill bonus for `kill_count` kills from one action
pub fn award_multi_kill(engine: &mut ScoreEngine, kill_count: u32) -> Result<Points> {
    let bonus = engine.calculate_multi_kill_bonus(kill_count);
    engine.add_score(bonus, &format!("{}x multi-kill", kill_count))?;
    Ok(bonus)
}

/// Area attack damage with linear falloff from the center
///
/// Full damage at the center, zero at and beyond `radius`.
pub fn area_damage(base_damage: f32, distance: f32, radius: f32) -> f32 {
    if radius <= 0.0 || distance >= radius {
        return 0.0;
    }
    base_damage * (1.0 - distance.max(0.0) / radius)
}
