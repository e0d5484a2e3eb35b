use crate::config::GameConfig;
use crate::render::{Canvas, Sound};
use crate::{Coords, TermInt};
use std::{convert::TryFrom, io::{Stdout, Write, stdout}, time::Duration};

use anyhow::{bail, Context, Result};
use crossterm::{cursor, execute, queue, style, terminal};
use crossterm::style::Color;
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::event::{Event, KeyEvent, read, poll};
use log::debug;

// Each grid cell is two terminal columns wide so cells come out roughly square
const CELL_WIDTH: TermInt = 2;
const FOOD_CHAR: char = 'O';
const FOOD_COLOR: Color = Color::Red;
const BELL: char = '\x07';

pub struct TermManager {
    stdout: Stdout,
    // Terminal position of the top-left border corner
    origin: (TermInt, TermInt),
    // Field size in terminal cells, borders excluded
    field_width: TermInt,
    field_height: TermInt,
    blocks: Coords,
    current_msg: Option<Message>,
}

struct Message {
    top_left: (TermInt, TermInt),
    width: TermInt,
    height: TermInt,
}

impl TermManager {
    pub fn new(config: &GameConfig) -> Result<Self> {
        let (width, height) = terminal::size().context("Error reading terminal size")?;

        let field_width = TermInt::try_from(config.blocks_x).ok()
            .and_then(|x| x.checked_mul(CELL_WIDTH));
        let field_height = TermInt::try_from(config.blocks_y).ok();

        let (field_width, field_height) = match (field_width, field_height) {
            // Border on each side, plus one status line under the field
            (Some(w), Some(h)) if w.saturating_add(2) <= width && h.saturating_add(3) <= height => (w, h),
            _ => bail!(
                "terminal is {}x{}, a {}x{} grid needs at least {}x{}",
                width, height, config.blocks_x, config.blocks_y,
                config.blocks_x as i64 * CELL_WIDTH as i64 + 2, config.blocks_y as i64 + 3
            ),
        };

        let origin = ((width - field_width - 2) / 2, (height - field_height - 3) / 2);

        Ok(TermManager {
            stdout: stdout(),
            origin,
            field_width,
            field_height,
            blocks: (config.blocks_x, config.blocks_y),
            current_msg: None,
        })
    }

    pub fn setup(&mut self) -> Result<()> {
        execute!(self.stdout, EnterAlternateScreen).context("Error entering alt screen")?;
        terminal::enable_raw_mode().context("Error enabling raw mode")?;
        execute!(self.stdout, cursor::Hide, cursor::DisableBlinking, terminal::Clear(ClearType::All))
            .context("Error preparing the screen")?;
        self.draw_borders()
    }

    pub fn restore(&mut self) -> Result<()> {
        terminal::disable_raw_mode().context("Error disabling raw mode")?;
        execute!(self.stdout, style::ResetColor, cursor::Show, cursor::EnableBlinking, LeaveAlternateScreen)
            .context("Error leaving alt screen")?;
        Ok(())
    }

    pub fn draw_borders(&mut self) -> Result<()> {
        let (left, top) = self.origin;
        let right = left + self.field_width + 1;
        let bottom = top + self.field_height + 1;

        for x in left..=right {
            let ch = if x == left || x == right {'+'} else {'-'};
            self.print_at((x, top), ch)?;
            self.print_at((x, bottom), ch)?;
        }

        for y in top + 1..bottom {
            self.print_at((left, y), '|')?;
            self.print_at((right, y), '|')?;
        }

        self.flush()
    }

    ///////////////////////////////////////////////////////////////////////////

    /// Terminal position of a grid cell's left column, if the cell is on the field.
    fn cell_position(&self, (x, y): Coords) -> Option<(TermInt, TermInt)> {
        if x < 0 || y < 0 || x >= self.blocks.0 || y >= self.blocks.1 {
            return None;
        }

        let col = self.origin.0 + 1 + x as TermInt * CELL_WIDTH;
        let row = self.origin.1 + 1 + y as TermInt;
        Some((col, row))
    }

    fn print_at(&mut self, pos: (TermInt, TermInt), ch: char) -> Result<()> {
        queue!(self.stdout, cursor::MoveTo(pos.0, pos.1), style::Print(ch))?;
        Ok(())
    }

    fn print_str_at(&mut self, pos: (TermInt, TermInt), s: &str) -> Result<()> {
        queue!(self.stdout, cursor::MoveTo(pos.0, pos.1), style::Print(s))?;
        Ok(())
    }

    fn print_cell(&mut self, cell: Coords, content: &str, color: Color) -> Result<()> {
        if let Some((col, row)) = self.cell_position(cell) {
            queue!(
                self.stdout,
                cursor::MoveTo(col, row),
                style::SetForegroundColor(color),
                style::Print(content),
                style::ResetColor
            )?;
        }
        Ok(())
    }
}

impl Canvas for TermManager {
    fn clear_field(&mut self) -> Result<()> {
        let blank = " ".repeat(self.field_width as usize);
        for y in 0..self.field_height {
            self.print_str_at((self.origin.0 + 1, self.origin.1 + 1 + y), &blank)?;
        }
        Ok(())
    }

    fn fill_cell(&mut self, cell: Coords, color: Color) -> Result<()> {
        self.print_cell(cell, "██", color)
    }

    fn draw_food(&mut self, cell: Coords) -> Result<()> {
        let food = format!("{:<width$}", FOOD_CHAR, width = CELL_WIDTH as usize);
        self.print_cell(cell, &food, FOOD_COLOR)
    }

    fn show_counters(&mut self, score: u32, length: u32) -> Result<()> {
        let status = format!("Score: {}   Length: {}", score, length);
        let line = format!("{:<width$}", status, width = self.field_width as usize + 2);
        self.print_str_at((self.origin.0, self.origin.1 + self.field_height + 2), &line)
    }

    fn play(&mut self, sound: Sound) -> Result<()> {
        debug!("Playing {:?}", sound);
        // The terminal bell is the only speaker we have
        let rings = match sound {
            Sound::Eat => 1,
            Sound::Crash => 2,
        };
        for _ in 0..rings {
            queue!(self.stdout, style::Print(BELL))?;
        }
        Ok(())
    }

    fn show_message(&mut self, lines: &[&str]) -> Result<()> {
        if self.current_msg.is_some() {
            self.hide_message()?;
        }

        let longest = lines.iter().map(|x| x.chars().count()).max().unwrap_or(0);
        let msg_height = (lines.len() as TermInt + 2).min(self.field_height);
        let msg_width = (longest as TermInt + 2).min(self.field_width);
        let center = (
            self.origin.0 + 1 + self.field_width / 2,
            self.origin.1 + 1 + self.field_height / 2,
        );
        let top_left = (center.0 - msg_width / 2, center.1 - msg_height / 2);

        let blank = " ".repeat(msg_width as usize);
        for y in [top_left.1, top_left.1 + msg_height - 1].iter() {
            self.print_str_at((top_left.0, *y), &blank)?;
        }

        for (i, line) in lines.iter().enumerate().take(msg_height.saturating_sub(2) as usize) {
            let padded: String = format!("{line: ^width$}", line = line, width = msg_width as usize)
                .chars()
                .take(msg_width as usize)
                .collect();
            self.print_str_at((top_left.0, top_left.1 + i as TermInt + 1), &padded)?;
        }

        self.current_msg = Some(Message::new(msg_width, msg_height, top_left));
        self.flush()
    }

    fn hide_message(&mut self) -> Result<()> {
        let msg = match self.current_msg.take() {
            Some(msg) => msg,
            None => return Ok(()),
        };

        // The next frame redraws the field, so blanking is enough
        let blank = " ".repeat(msg.width() as usize);
        let top_left = msg.top_left();
        for y_diff in 0..msg.height() {
            self.print_str_at((top_left.0, top_left.1 + y_diff), &blank)?;
        }

        self.flush()
    }

    fn flush(&mut self) -> Result<()> {
        self.stdout.flush().context("Error flushing")
    }
}

/// Drains the key presses waiting in the terminal's input queue.
pub fn read_key_events_queue() -> Result<Vec<KeyEvent>> {
    let mut events = vec![];

    while poll(Duration::from_millis(1))? {
        if let Event::Key(ev) = read()? {
            events.push(ev);
        }
    }

    Ok(events)
}

impl Message {
    pub fn new(width: TermInt, height: TermInt, top_left: (TermInt, TermInt)) -> Self {
        Message { width, height, top_left }
    }

    pub fn width(&self) -> TermInt {
        self.width
    }

    pub fn height(&self) -> TermInt {
        self.height
    }

    pub fn top_left(&self) -> (TermInt, TermInt) {
        self.top_left
    }
}
