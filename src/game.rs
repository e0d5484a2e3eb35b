use std::{thread::sleep, time::{Duration, Instant}};

use crate::config::GameConfig;
use crate::input::{self, Command};
use crate::render::{self, Canvas};
use crate::scheduler::Ticker;
use crate::state::{GameState, Outcome, Tick};
use crate::term::{self, TermManager};

use anyhow::Result;
use log::info;
use rand::rngs::StdRng;

const POLL_INTERVAL_MS: u64 = 5;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Running,
    Over(Outcome),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct SnakeGame<C: Canvas> {
    config: GameConfig,
    canvas: C,
    rng: StdRng,
    ticker: Ticker,
    phase: Phase,
    state: GameState,
}

impl<C: Canvas> SnakeGame<C> {
    pub fn new(config: GameConfig, canvas: C, mut rng: StdRng) -> Self {
        let state = GameState::new(&config, &mut rng);
        let ticker = Ticker::new(config.tick_interval);
        SnakeGame { config, canvas, rng, ticker, phase: Phase::Idle, state }
    }

    pub fn show_intro(&mut self) -> Result<()> {
        self.canvas.show_message(&[
            "Arrow keys or WASD to move",
            "R or Enter to (re)start",
            "Q, Esc or CTRL+C to quit",
            "",
            "Press R to begin",
        ])
    }

    pub fn handle(&mut self, cmd: Command, now: Instant) -> Result<Flow> {
        match cmd {
            Command::Quit => return Ok(Flow::Quit),
            Command::Restart => self.restart(now)?,
            Command::Steer(dir) => {
                if self.phase == Phase::Running {
                    self.state.steer(dir);
                }
            }
        }

        Ok(Flow::Continue)
    }

    /// Starts a fresh game from any phase. The ticker keeps a single
    /// schedule, so the previous game's ticks cannot leak into this one.
    pub fn restart(&mut self, now: Instant) -> Result<()> {
        self.state = GameState::new(&self.config, &mut self.rng);
        self.ticker.restart(now);
        self.phase = Phase::Running;
        info!("New game on a {}x{} grid", self.config.blocks_x, self.config.blocks_y);

        self.canvas.hide_message()?;
        render::render_frame(&mut self.state, &mut self.canvas, &mut self.rng)
    }

    /// Runs a tick if one is due.
    pub fn update(&mut self, now: Instant) -> Result<()> {
        if self.phase != Phase::Running || !self.ticker.poll(now) {
            return Ok(());
        }

        self.step()
    }

    fn step(&mut self) -> Result<()> {
        if let Tick::Over(outcome) = self.state.advance(&mut self.rng) {
            self.ticker.stop();
            self.phase = Phase::Over(outcome);
        }

        render::render_frame(&mut self.state, &mut self.canvas, &mut self.rng)?;

        if let Phase::Over(outcome) = self.phase {
            self.game_over(outcome)?;
        }
        Ok(())
    }

    fn game_over(&mut self, outcome: Outcome) -> Result<()> {
        info!("Game over ({:?}): score {} length {}", outcome, self.state.score(), self.state.length());

        let s = match outcome {
            Outcome::BoardFull => "You won!",
            Outcome::Crashed(_) => "Game over!",
        };

        self.canvas.show_message(&[
            s,
            &*format!("Score: {}", self.state.score()),
            &*format!("Length: {}", self.state.length()),
            "",
            "Press R to play again,",
            "or Q to quit.",
        ])
    }
}

impl SnakeGame<TermManager> {
    /// Owns the terminal for the whole session and gives it back even when
    /// the loop fails.
    pub fn run(&mut self) -> Result<()> {
        self.canvas.setup()?;
        let result = self.main_loop();
        let restored = self.canvas.restore();
        first_error(result, restored)
    }

    fn main_loop(&mut self) -> Result<()> {
        self.show_intro()?;

        loop {
            let poll = Duration::from_millis(POLL_INTERVAL_MS);
            let wait = self.ticker.time_until_due(Instant::now()).map_or(poll, |due| due.min(poll));
            sleep(wait);

            for key_ev in term::read_key_events_queue()? {
                if let Some(cmd) = input::command_for(&key_ev) {
                    if self.handle(cmd, Instant::now())? == Flow::Quit {
                        info!("Quitting");
                        return Ok(());
                    }
                }
            }

            self.update(Instant::now())?;
        }
    }
}

/// A loop failure outranks a failure to give the terminal back.
fn first_error(result: Result<()>, restored: Result<()>) -> Result<()> {
    result.and(restored)
}

#[cfg(test)]
impl<C: Canvas> SnakeGame<C> {
    pub(crate) fn phase(&self) -> Phase {
        self.phase
    }

    pub(crate) fn state(&self) -> &GameState {
        &self.state
    }
}
