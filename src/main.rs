mod config;
mod game;
mod term;
mod snake;
#[cfg(test)]
mod recording;

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::term::CrosstermDriver;

pub type Coords = (i32, i32);

#[derive(Parser)]
#[command(name = "snakegame")]
#[command(version, about = "A snake that wanders the terminal. Arrow keys steer, q quits.")]
struct Cli {
    /// Write diagnostics here (filtered by RUST_LOG)
    #[arg(long, env = "SNAKE_LOG_FILE")]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }

    let driver = CrosstermDriver::new()?;
    let mut game = game::SnakeGame::new(driver, Config::default())?;

    // The game owns the screen, errors are printed after it is restored
    game.play()
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}
