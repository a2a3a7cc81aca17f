//! Command execution - applies parsed commands to the score engine

use crate::combat;
use crate::command::parser::ScoreCommand;
use crate::core::error::Result;
use crate::score::engine::ScoreEngine;
use crate::score::host::ScoreHandle;

/// Executes console commands against a shared engine
pub struct CommandExecutor;

impl CommandExecutor {
    /// Execute one command while holding the engine lock
    pub fn execute(handle: &ScoreHandle, command: &ScoreCommand) -> ExecutionResult {
        if *command == ScoreCommand::Quit {
            return ExecutionResult {
                message: "Bye.".to_string(),
                error: None,
                quit: true,
            };
        }

        handle.with(|engine| match apply(engine, command) {
            Ok(message) => ExecutionResult {
                message,
                error: None,
                quit: false,
            },
            Err(e) => ExecutionResult {
                message: status_line(engine),
                error: Some(e.to_string()),
                quit: false,
            },
        })
    }
}

/// Result of executing a command
#[derive(Debug)]
pub struct ExecutionResult {
    pub message: String,
    pub error: Option<String>,
    pub quit: bool,
}

fn apply(engine: &mut ScoreEngine, command: &ScoreCommand) -> Result<String> {
    let message = match command {
        ScoreCommand::Kill {
            enemy_type,
            distance,
        } => {
            let score = engine.calculate_kill_score(enemy_type, *distance);
            engine.add_score(score, &format!("{} kill", enemy_type))?;
            format!("{} kill at {:.1}: +{}", enemy_type, distance, score)
        }
        ScoreCommand::Skill { enemies_hit } => {
            let total = combat::resolve_skill_hits(engine, *enemies_hit)?;
            format!("Skill hit {} enemies: +{}", enemies_hit, total)
        }
        ScoreCommand::MultiKill { kills } => {
            let bonus = combat::award_multi_kill(engine, *kills)?;
            format!("{}x multi-kill bonus: +{}", kills, bonus)
        }
        ScoreCommand::Add { points } => {
            engine.add_score(*points, "console")?;
            status_line(engine)
        }
        ScoreCommand::Subtract { points } => {
            engine.subtract_score(*points, "console");
            status_line(engine)
        }
        ScoreCommand::Set { score } => {
            engine.set_score(*score)?;
            status_line(engine)
        }
        ScoreCommand::Combo { amount } => {
            engine.add_combo(*amount);
            status_line(engine)
        }
        ScoreCommand::Reset => {
            engine.reset_score();
            status_line(engine)
        }
        ScoreCommand::Status | ScoreCommand::Quit => status_line(engine),
    };
    Ok(message)
}

fn status_line(engine: &ScoreEngine) -> String {
    format!(
        "Score: {} | High: {} | Combo: {}",
        engine.current_score(),
        engine.high_score(),
        engine.combo_count()
    )
}
