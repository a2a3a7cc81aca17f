//! Combo Score - score, combo and high-score engine for arcade combat

pub mod combat;
pub mod command;
pub mod core;
pub mod score;
