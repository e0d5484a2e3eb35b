use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::config::GameConfig;
use crate::snake::{Direction, Snake};
use crate::Coords;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Collision {
    Wall,
    Body,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Crashed(Collision),
    /// No free cell was left for the next food.
    BoardFull,
}

/// What a single call to [`GameState::advance`] did.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Tick {
    /// No direction has been chosen yet.
    Waiting,
    Moved,
    Ate,
    Over(Outcome),
}

pub struct GameState {
    blocks_x: i32,
    blocks_y: i32,
    growth: usize,
    snake: Snake,
    food: Option<Coords>,
    score: u32,
    length: u32,
    play_eat_sound: bool,
    outcome: Option<Outcome>,
}

impl GameState {
    pub fn new<R: Rng + ?Sized>(config: &GameConfig, rng: &mut R) -> Self {
        let mut state = GameState {
            blocks_x: config.blocks_x,
            blocks_y: config.blocks_y,
            growth: config.growth,
            snake: Snake::new(config.center()),
            food: None,
            score: 0,
            length: 1,
            play_eat_sound: false,
            outcome: None,
        };
        state.food = state.spawn_food(rng);
        state
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> Option<Coords> {
        self.food
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn length(&self) -> u32 {
        self.length
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn in_bounds(&self, (x, y): Coords) -> bool {
        x >= 0 && x < self.blocks_x && y >= 0 && y < self.blocks_y
    }

    pub fn steer(&mut self, direction: Direction) -> bool {
        let accepted = self.snake.set_direction(direction);
        if !accepted {
            debug!("Ignored reversal to {:?}", direction);
        }
        accepted
    }

    /// One-shot: reports whether food was eaten since the last call.
    pub fn take_eat_sound(&mut self) -> bool {
        std::mem::replace(&mut self.play_eat_sound, false)
    }

    /// Runs one tick: move, wall check, body check, then food.
    pub fn advance<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Tick {
        if let Some(outcome) = self.outcome {
            return Tick::Over(outcome);
        }

        if !self.snake.move_step() {
            return Tick::Waiting;
        }

        let head = self.snake.head();
        if !self.in_bounds(head) {
            return self.finish(Outcome::Crashed(Collision::Wall));
        }
        if self.snake.bites_itself() {
            return self.finish(Outcome::Crashed(Collision::Body));
        }

        if self.food != Some(head) {
            return Tick::Moved;
        }

        self.play_eat_sound = true;
        self.food = self.spawn_food(rng);
        self.snake.grow(self.growth);
        self.score += 1;
        self.length += self.growth as u32;
        debug!("Ate food at {:?}, score {} length {}", head, self.score, self.length);

        if self.food.is_none() {
            return self.finish(Outcome::BoardFull);
        }
        Tick::Ate
    }

    fn finish(&mut self, outcome: Outcome) -> Tick {
        self.outcome = Some(outcome);
        Tick::Over(outcome)
    }

    /// Picks uniformly among the cells the snake does not cover.
    fn spawn_food<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Coords> {
        let choices: Vec<Coords> = (0..self.blocks_y)
            .flat_map(|y| (0..self.blocks_x).map(move |x| (x, y)))
            .filter(|cell| !self.snake.occupies(*cell))
            .collect();

        choices.choose(rng).copied()
    }
}

#[cfg(test)]
impl GameState {
    pub(crate) fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    pub(crate) fn set_food(&mut self, cell: Coords) {
        self.food = Some(cell);
    }

    pub(crate) fn set_snake(&mut self, snake: Snake) {
        self.length = snake.len() as u32;
        self.snake = snake;
    }
}
