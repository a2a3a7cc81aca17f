//! Score, combo and high-score engine
//!
//! `ScoreEngine` owns all scoring state. Combat code feeds it events
//! (kills, skill hits, raw point awards), presentation code subscribes to
//! its change channels, and a background ticker expires stale combos.

pub mod combo;
pub mod engine;
pub mod events;
pub mod formulas;
pub mod host;
pub mod store;

pub use combo::ComboTracker;
pub use engine::{ScoreEngine, HIGH_SCORE_KEY};
pub use events::{Channel, ScoreEvents, SubscriptionId};
pub use host::{spawn_decay_ticker, EngineHost, ScoreHandle};
pub use store::{JsonFileStore, KeyValueStore, MemoryStore};
