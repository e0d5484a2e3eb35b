use std::path::PathBuf;
use std::time::Duration;

use anyhow::{ensure, Result};
use clap::Parser;
use simplelog::LevelFilter;

use crate::Coords;

// Terminal cells are u16 and each grid cell takes two columns
const MAX_BLOCKS: i32 = 1024;
const MAX_GROWTH: usize = 64;

#[derive(Parser, Debug)]
#[command(name = "snake_arcade")]
#[command(version, about = "Grid snake for the terminal")]
pub struct Cli {
    /// Number of columns in the grid
    #[arg(long, default_value_t = 40)]
    pub width: i32,

    /// Number of rows in the grid
    #[arg(long, default_value_t = 16)]
    pub height: i32,

    /// Milliseconds between game ticks
    #[arg(long, default_value_t = 150)]
    pub interval_ms: u64,

    /// Body segments added per food eaten
    #[arg(long, default_value_t = 3)]
    pub growth: usize,

    /// Seed for food placement and body colors
    #[arg(long)]
    pub seed: Option<u64>,

    /// File the log is written to
    #[arg(long, default_value = "snake.log")]
    pub log_file: PathBuf,

    #[arg(long, default_value = "info")]
    pub log_level: LevelFilter,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    pub blocks_x: i32,
    pub blocks_y: i32,
    pub growth: usize,
    pub tick_interval: Duration,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            blocks_x: 40,
            blocks_y: 16,
            growth: 3,
            tick_interval: Duration::from_millis(150),
        }
    }
}

impl GameConfig {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let config = GameConfig {
            blocks_x: cli.width,
            blocks_y: cli.height,
            growth: cli.growth,
            tick_interval: Duration::from_millis(cli.interval_ms),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(self.blocks_x > 0 && self.blocks_y > 0, "grid must be at least 1x1, got {}x{}", self.blocks_x, self.blocks_y);
        ensure!(
            self.blocks_x <= MAX_BLOCKS && self.blocks_y <= MAX_BLOCKS,
            "grid can be at most {}x{}, got {}x{}", MAX_BLOCKS, MAX_BLOCKS, self.blocks_x, self.blocks_y
        );
        let cells = self.blocks_x.checked_mul(self.blocks_y);
        ensure!(cells.map_or(false, |n| n >= 2), "grid needs room for the snake and its food");
        ensure!(
            self.growth > 0 && self.growth <= MAX_GROWTH,
            "growth must be between 1 and {} segments, got {}", MAX_GROWTH, self.growth
        );
        ensure!(!self.tick_interval.is_zero(), "tick interval must be positive");
        Ok(())
    }

    /// Cell the snake starts on: ceil(n / 2) - 1 along each axis.
    pub fn center(&self) -> Coords {
        ((self.blocks_x + 1) / 2 - 1, (self.blocks_y + 1) / 2 - 1)
    }
}

#[cfg(test)]
impl GameConfig {
    pub(crate) fn new(blocks_x: i32, blocks_y: i32) -> Self {
        GameConfig { blocks_x, blocks_y, ..Default::default() }
    }
}
