//! Score engine integration tests
//!
//! End-to-end checks of the scoring rules through the public API: clamp and
//! high-score invariants under arbitrary operation sequences, the combo
//! window, and the formula examples.

use combo_score::core::{EnemyType, ManualClock, Points, ScoreConfig};
use combo_score::score::{MemoryStore, ScoreEngine, HIGH_SCORE_KEY};
use proptest::prelude::*;
use std::sync::{Arc, Mutex};

fn engine_with(config: ScoreConfig) -> (ScoreEngine, ManualClock, MemoryStore) {
    let clock = ManualClock::new();
    let store = MemoryStore::new();
    let engine = ScoreEngine::new(config, Box::new(store.clone()), Arc::new(clock.clone()))
        .expect("engine should build");
    (engine, clock, store)
}

fn engine() -> (ScoreEngine, ManualClock, MemoryStore) {
    engine_with(ScoreConfig::default())
}

#[derive(Debug, Clone)]
enum Op {
    Add(Points),
    Subtract(Points),
    Set(Points),
    Reset,
    Combo(u32),
    Kill(bool, f32),
    Advance(f32),
    Tick,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (-500i64..5_000).prop_map(Op::Add),
        (-500i64..5_000).prop_map(Op::Subtract),
        (-2_000i64..3_000).prop_map(Op::Set),
        Just(Op::Reset),
        (0u32..20).prop_map(Op::Combo),
        (any::<bool>(), 0.0f32..50.0).prop_map(|(elite, d)| Op::Kill(elite, d)),
        (0.0f32..5.0).prop_map(Op::Advance),
        Just(Op::Tick),
    ]
}

proptest! {
    #[test]
    fn prop_score_and_combo_stay_in_bounds(ops in prop::collection::vec(op_strategy(), 1..60)) {
        let config = ScoreConfig {
            min_score: 0,
            max_score: 2_500,
            max_combo: 25,
            ..ScoreConfig::default()
        };
        let (mut engine, clock, store) = engine_with(config);
        let mut last_high = engine.high_score();

        for op in ops {
            match op {
                Op::Add(p) => engine.add_score(p, "prop").unwrap(),
                Op::Subtract(p) => engine.subtract_score(p, "prop"),
                Op::Set(s) => engine.set_score(s).unwrap(),
                Op::Reset => engine.reset_score(),
                Op::Combo(n) => engine.add_combo(n),
                Op::Kill(elite, d) => {
                    let enemy = if elite { EnemyType::Elite } else { EnemyType::Normal };
                    let score = engine.calculate_kill_score(&enemy, d);
                    engine.add_score(score, "kill").unwrap();
                }
                Op::Advance(s) => clock.advance_secs(s),
                Op::Tick => { engine.tick(); }
            }

            prop_assert!((0..=2_500).contains(&engine.current_score()));
            prop_assert!(engine.combo_count() <= 25);
            prop_assert!(engine.high_score() >= last_high);
            last_high = engine.high_score();
        }

        prop_assert_eq!(store.peek(HIGH_SCORE_KEY).unwrap_or(0), engine.high_score());
    }

    #[test]
    fn prop_non_positive_deltas_are_silent(points in -10_000i64..=0) {
        let (mut engine, _clock, _store) = engine();
        engine.add_score(40, "seed").unwrap();

        let fired = Arc::new(Mutex::new(0));
        let counter = Arc::clone(&fired);
        engine.events().score_changed.subscribe(move |_| *counter.lock().unwrap() += 1);

        engine.add_score(points, "nothing").unwrap();
        engine.subtract_score(points, "nothing");

        prop_assert_eq!(engine.current_score(), 40);
        prop_assert_eq!(*fired.lock().unwrap(), 0);
    }
}

#[test]
fn test_reset_score_preserves_high_score() {
    let (mut engine, _clock, store) = engine();
    engine.add_score(800, "kill").unwrap();
    engine.subtract_score(300, "hit");
    engine.add_combo(4);

    engine.reset_score();

    assert_eq!(engine.current_score(), 0);
    assert_eq!(engine.combo_count(), 0);
    assert_eq!(engine.high_score(), 800);
    assert_eq!(store.peek(HIGH_SCORE_KEY), Some(800));
}

#[test]
fn test_combo_window_example() {
    let (mut engine, clock, _store) = engine();

    let mut seen = Vec::new();
    for t in [0.0, 1.0, 2.0, 6.0] {
        clock.set_secs(t);
        engine.add_combo(1);
        seen.push(engine.combo_count());
    }

    assert_eq!(seen, vec![1, 2, 3, 1]);
}

#[test]
fn test_elite_kill_example() {
    let (mut engine, _clock, _store) = engine();
    assert_eq!(engine.combo_count(), 0);

    let score = engine.calculate_kill_score(&EnemyType::Elite, 0.0);

    assert_eq!(score, 100);
    assert_eq!(engine.combo_count(), 1);
    assert_eq!(engine.current_score(), 0);
}

#[test]
fn test_formula_examples() {
    let (engine, _clock, _store) = engine();
    assert_eq!(engine.calculate_skill_score(true, 2), 11);
    assert_eq!(engine.calculate_skill_score(false, 0), 0);
    assert_eq!(engine.calculate_multi_kill_bonus(1), 0);
    assert_eq!(engine.calculate_multi_kill_bonus(3), 60);
}

#[test]
fn test_custom_enemy_table_from_toml() {
    let config = ScoreConfig::from_toml(
        r#"
        [base_scores]
        fallback = 25

        [base_scores.scores]
        normal = 50
        elite = 100
        boss = 400
        "#,
    )
    .unwrap();
    let (mut engine, _clock, _store) = engine_with(config);

    assert_eq!(engine.kill_score_preview(&EnemyType::from("Boss"), 0.0), 400);
    assert_eq!(engine.calculate_kill_score(&EnemyType::from("slime"), 0.0), 25);
}

#[test]
fn test_kill_chain_grows_score() {
    let (mut engine, clock, _store) = engine();

    let mut awarded = Vec::new();
    for i in 0..3 {
        clock.set_secs(i as f32);
        let score = engine.calculate_kill_score(&EnemyType::Normal, 0.0);
        engine.add_score(score, "kill").unwrap();
        awarded.push(score);
    }

    // combo 0, 1, 2 -> 50, 55, 60
    assert_eq!(awarded, vec![50, 55, 60]);
    assert_eq!(engine.current_score(), 165);
    assert_eq!(engine.high_score(), 165);
}

#[test]
fn test_kill_at_half_point_rounds_to_even() {
    let (mut engine, _clock, _store) = engine();

    // 50 * (1 + 1 * 0.05) = 52.5
    let score = engine.calculate_kill_score(&EnemyType::Normal, 1.0);
    engine.add_score(score, "kill").unwrap();

    assert_eq!(score, 52);
    assert_eq!(engine.current_score(), 52);
    assert_eq!(engine.combo_count(), 1);
}
