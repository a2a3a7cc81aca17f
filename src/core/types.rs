//! Core type definitions used throughout the codebase

use std::fmt;

/// Score value (current score, high score, formula results)
pub type Points = i64;

/// Combo chain length
pub type ComboCount = u32;

/// Kind of enemy that was defeated
///
/// `Normal` and `Elite` are built in. Anything else is carried as `Custom`
/// and scored from the config table, falling back to the table default when
/// the name is unknown.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EnemyType {
    Normal,
    Elite,
    Custom(String),
}

impl EnemyType {
    /// Key used in the base score table
    pub fn key(&self) -> &str {
        match self {
            EnemyType::Normal => "normal",
            EnemyType::Elite => "elite",
            EnemyType::Custom(name) => name,
        }
    }
}

impl From<&str> for EnemyType {
    fn from(name: &str) -> Self {
        let name = name.trim().to_ascii_lowercase();
        match name.as_str() {
            "normal" => EnemyType::Normal,
            "elite" => EnemyType::Elite,
            _ => EnemyType::Custom(name),
        }
    }
}

impl From<String> for EnemyType {
    fn from(name: String) -> Self {
        EnemyType::from(name.as_str())
    }
}

impl fmt::Display for EnemyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnemyType::Normal => write!(f, "Normal"),
            EnemyType::Elite => write!(f, "Elite"),
            EnemyType::Custom(name) => write!(f, "{}", name),
        }
    }
}
