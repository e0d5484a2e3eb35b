use anyhow::Result;
use crossterm::style::Color;
use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::state::{GameState, Outcome};
use crate::Coords;

pub const HEAD_COLOR: Color = Color::Rgb { r: 165, g: 42, b: 42 };

/// Body cells pick one of these at random on every frame.
pub const PALETTE: [Color; 7] = [
    Color::Rgb { r: 255, g: 0, b: 0 },
    Color::Rgb { r: 255, g: 165, b: 0 },
    Color::Rgb { r: 255, g: 255, b: 0 },
    Color::Rgb { r: 0, g: 128, b: 0 },
    Color::Rgb { r: 0, g: 0, b: 255 },
    Color::Rgb { r: 75, g: 0, b: 130 },
    Color::Rgb { r: 238, g: 130, b: 238 },
];

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Sound {
    Eat,
    Crash,
}

/// Drawing surface, status display and speaker the game renders to.
pub trait Canvas {
    fn clear_field(&mut self) -> Result<()>;
    fn fill_cell(&mut self, cell: Coords, color: Color) -> Result<()>;
    fn draw_food(&mut self, cell: Coords) -> Result<()>;
    fn show_counters(&mut self, score: u32, length: u32) -> Result<()>;
    fn play(&mut self, sound: Sound) -> Result<()>;
    fn show_message(&mut self, lines: &[&str]) -> Result<()>;
    fn hide_message(&mut self) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
}

/// Draws the current frame. Only touches state to consume the eat-sound flag.
pub fn render_frame<C, R>(state: &mut GameState, canvas: &mut C, rng: &mut R) -> Result<()>
where
    C: Canvas + ?Sized,
    R: Rng + ?Sized,
{
    let eat_sound = state.take_eat_sound();

    if let Some(Outcome::Crashed(collision)) = state.outcome() {
        debug!("Crash into {:?}", collision);
        canvas.play(Sound::Crash)?;
        return canvas.flush();
    }

    canvas.clear_field()?;

    let snake = state.snake();
    canvas.fill_cell(snake.head(), HEAD_COLOR)?;
    for cell in snake.segments() {
        let color = *PALETTE.choose(rng).unwrap_or(&HEAD_COLOR);
        canvas.fill_cell(cell, color)?;
    }

    if let Some(food) = state.food() {
        canvas.draw_food(food)?;
    }

    if eat_sound {
        canvas.play(Sound::Eat)?;
    }

    canvas.show_counters(state.score(), state.length())?;
    canvas.flush()
}
