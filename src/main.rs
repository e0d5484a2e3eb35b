mod config;
mod game;
mod input;
mod render;
mod scheduler;
mod snake;
mod state;
mod term;

use std::fs::File;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;
use simplelog::{Config, WriteLogger};

use config::{Cli, GameConfig};

pub type TermInt = u16;
/// Grid cell as (column, row); may fall outside the grid right after a crash.
pub type Coords = (i32, i32);

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Stdout belongs to the game screen, so the log goes to a file
    let log_file = File::create(&cli.log_file)
        .with_context(|| format!("Failed to create log file {}", cli.log_file.display()))?;
    WriteLogger::init(cli.log_level, Config::default(), log_file).context("Failed to initialize logger")?;

    let config = GameConfig::from_cli(&cli)?;
    info!("Starting with {:?}", config);

    let rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let term = term::TermManager::new(&config)?;
    let mut game = game::SnakeGame::new(config, term, rng);
    game.run()
}
