//! Parse console lines into score commands

use crate::core::types::{ComboCount, EnemyType, Points};

/// Points granted by a bare `add`
pub const DEBUG_ADD_POINTS: Points = 100;

/// Points deducted by a bare `sub`
pub const DEBUG_SUBTRACT_POINTS: Points = 50;

#[derive(Debug, Clone, PartialEq)]
pub enum ScoreCommand {
    /// Kill an enemy of the given type at a distance
    Kill { enemy_type: EnemyType, distance: f32 },
    /// Land a skill on `enemies_hit` enemies
    Skill { enemies_hit: u32 },
    /// Kill several enemies with one action
    MultiKill { kills: u32 },
    Add { points: Points },
    Subtract { points: Points },
    Set { score: Points },
    Combo { amount: ComboCount },
    Reset,
    Status,
    Quit,
}

/// Parse one input line
///
/// Returns `Ok(None)` for blank lines and an error message for anything
/// unrecognized or malformed.
pub fn parse_command(input: &str) -> Result<Option<ScoreCommand>, String> {
    let mut words = input.split_whitespace();
    let Some(verb) = words.next() else {
        return Ok(None);
    };
    let args: Vec<&str> = words.collect();

    let command = match verb.to_ascii_lowercase().as_str() {
        "kill" | "k" => {
            let enemy_type = args
                .first()
                .map(|name| EnemyType::from(*name))
                .unwrap_or(EnemyType::Normal);
            let distance = optional_arg(&args, 1, 0.0)?;
            ScoreCommand::Kill {
                enemy_type,
                distance,
            }
        }
        "skill" => ScoreCommand::Skill {
            enemies_hit: optional_arg(&args, 0, 1)?,
        },
        "multi" => ScoreCommand::MultiKill {
            kills: required_arg(&args, 0, "multi <kills>")?,
        },
        "add" => ScoreCommand::Add {
            points: optional_arg(&args, 0, DEBUG_ADD_POINTS)?,
        },
        "sub" | "subtract" => ScoreCommand::Subtract {
            points: optional_arg(&args, 0, DEBUG_SUBTRACT_POINTS)?,
        },
        "set" => ScoreCommand::Set {
            score: required_arg(&args, 0, "set <score>")?,
        },
        "combo" => ScoreCommand::Combo {
            amount: optional_arg(&args, 0, 1)?,
        },
        "reset" => ScoreCommand::Reset,
        "status" | "s" => ScoreCommand::Status,
        "quit" | "q" => ScoreCommand::Quit,
        other => return Err(format!("Unknown command: {}", other)),
    };

    Ok(Some(command))
}

fn optional_arg<T: std::str::FromStr>(args: &[&str], index: usize, default: T) -> Result<T, String> {
    match args.get(index) {
        Some(raw) => raw
            .parse()
            .map_err(|_| format!("Invalid argument: {}", raw)),
        None => Ok(default),
    }
}

fn required_arg<T: std::str::FromStr>(args: &[&str], index: usize, usage: &str) -> Result<T, String> {
    match args.get(index) {
        Some(raw) => raw
            .parse()
            .map_err(|_| format!("Invalid argument: {}", raw)),
        None => Err(format!("Usage: {}", usage)),
    }
}
