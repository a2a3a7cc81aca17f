//! Combo Score - Entry Point
//!
//! Hosts a single score engine, runs the combo decay ticker in the
//! background and drives the engine from console commands (or a script
//! file), printing every change notification as it fires.

use clap::Parser;
use combo_score::command::{parse_command, CommandExecutor};
use combo_score::core::error::Result;
use combo_score::core::{ScoreConfig, SystemClock};
use combo_score::score::{
    spawn_decay_ticker, EngineHost, JsonFileStore, KeyValueStore, MemoryStore, ScoreEngine,
};

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::runtime::Runtime;
use tracing_subscriber::EnvFilter;

/// Config file picked up when `--config` is not given
const DEFAULT_CONFIG_PATH: &str = "config/score.toml";

/// Console driver for the score engine
#[derive(Parser, Debug)]
#[command(name = "combo-score")]
#[command(about = "Score, combo and high-score engine console")]
struct Args {
    /// TOML config file (defaults to config/score.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// High score file, overriding `store_path` from the config
    #[arg(long)]
    store: Option<PathBuf>,

    /// Keep the high score in memory only
    #[arg(long)]
    no_persist: bool,

    /// Read commands from a file instead of stdin
    #[arg(long)]
    script: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("combo_score=info")),
        )
        .init();

    let config = load_config(args.config.as_deref())?;
    let store: Box<dyn KeyValueStore> = if args.no_persist {
        Box::new(MemoryStore::new())
    } else {
        let path = args.store.clone().unwrap_or_else(|| config.store_path.clone());
        Box::new(JsonFileStore::open(path)?)
    };
    let decay_interval = config.decay_interval();

    let mut engine = ScoreEngine::new(config, store, Arc::new(SystemClock::new()))?;
    subscribe_console_output(&mut engine);
    let host = EngineHost::new();
    let handle = host.install(engine)?;

    // The ticker needs a runtime context; the console loop stays synchronous.
    let rt = Runtime::new()?;
    let ticker = {
        let _guard = rt.enter();
        spawn_decay_ticker(handle.clone(), decay_interval)
    };

    println!("\n=== COMBO SCORE ===");
    println!("Commands:");
    println!("  kill [type] [distance]  - Kill an enemy (normal, elite, ...)");
    println!("  skill [hits]            - Land a skill on some enemies");
    println!("  multi <kills>           - Multi-kill bonus");
    println!("  combo [n]               - Extend the combo");
    println!("  add [n] / sub [n]       - Add 100 / subtract 50 points");
    println!("  set <n>                 - Set the score");
    println!("  reset                   - Reset score and combo");
    println!("  status / s              - Show score, high score and combo");
    println!("  quit / q                - Exit");
    println!();

    let interactive = args.script.is_none();
    let lines: Box<dyn Iterator<Item = io::Result<String>>> = match &args.script {
        Some(path) => {
            let content = fs::read_to_string(path)?;
            let lines: Vec<io::Result<String>> = content.lines().map(|l| Ok(l.to_string())).collect();
            Box::new(lines.into_iter())
        }
        None => Box::new(io::stdin().lock().lines()),
    };

    if interactive {
        prompt()?;
    }
    for line in lines {
        let line = line?;
        let input = line.trim();
        if !input.starts_with('#') {
            match parse_command(input) {
                Ok(Some(command)) => {
                    let result = CommandExecutor::execute(&handle, &command);
                    if let Some(error) = &result.error {
                        println!("Command failed: {}", error);
                    }
                    println!("{}", result.message);
                    if result.quit {
                        break;
                    }
                }
                Ok(None) => {}
                Err(message) => println!("{}", message),
            }
        }
        if interactive {
            prompt()?;
        }
    }

    ticker.abort();
    let (score, high) = handle.with(|engine| (engine.current_score(), engine.high_score()));
    println!("\nFinal score: {} (high score {})", score, high);
    Ok(())
}

fn prompt() -> Result<()> {
    print!("> ");
    io::stdout().flush()?;
    Ok(())
}

/// Load the explicit config, else the default file if present, else defaults
fn load_config(path: Option<&Path>) -> Result<ScoreConfig> {
    match path {
        Some(path) => ScoreConfig::load(path),
        None => {
            let default_path = Path::new(DEFAULT_CONFIG_PATH);
            if default_path.exists() {
                ScoreConfig::load(default_path)
            } else {
                tracing::info!("No config file found, using defaults");
                Ok(ScoreConfig::default())
            }
        }
    }
}

/// Presentation layer stand-in: echo every notification
fn subscribe_console_output(engine: &mut ScoreEngine) {
    let events = engine.events();
    events
        .score_changed
        .subscribe(|score| println!("  [score] {}", score));
    events.combo_changed.subscribe(|combo| {
        if combo == 0 {
            println!("  [combo] broken");
        } else {
            println!("  [combo] x{}", combo);
        }
    });
    events
        .high_score_achieved
        .subscribe(|high| println!("  [high score] {}!", high));
}
