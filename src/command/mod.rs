//! Console command pipeline
//!
//! Text line -> `parse_command` -> `ScoreCommand` -> `CommandExecutor` -> `ExecutionResult`

pub mod executor;
pub mod parser;

pub use executor::{CommandExecutor, ExecutionResult};
pub use parser::{parse_command, ScoreCommand};
