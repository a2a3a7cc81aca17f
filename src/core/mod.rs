pub mod clock;
pub mod config;
pub mod error;
pub mod types;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::ScoreConfig;
pub use error::{Result, ScoreError};
pub use types::{ComboCount, EnemyType, Points};
