use std::{io::{Stdout, Write, stdout}, time::Duration};

use anyhow::{bail, Context, Result};
use crossterm::{cursor, execute, queue, style, terminal};
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, SetTitle};
use crossterm::event::{Event, read, poll};

use crate::config::BOARD_BACKGROUND_COLOR;
use crate::entity::{cell_rect, Rect};
use crate::grid::Board;
use crate::input::{map_key, InputEvent};
use crate::Rgb;

/// Drawing surface the entities paint on. Coordinates are board pixels.
pub trait Canvas {
    fn cell_size(&self) -> i32;
    fn fill_rect(&mut self, rect: Rect, color: Rgb) -> Result<()>;
    fn stroke_rect(&mut self, rect: Rect, color: Rgb) -> Result<()>;
    fn clear(&mut self, color: Rgb) -> Result<()>;
    fn present(&mut self) -> Result<()>;
}

pub trait EventSource {
    /// Everything that arrived since the last call, without blocking.
    fn poll_events(&mut self) -> Result<Vec<InputEvent>>;
}

/// Terminal rendering of the board: a cell is two columns wide and one row
/// high, painted with its background colour.
pub struct TermManager {
    stdout: Stdout,
    board: Board,
    screen: Vec<Rgb>,
}

const CELL_COLUMNS: u16 = 2;

impl TermManager {
    pub fn new(board: Board) -> Self {
        let screen = vec![BOARD_BACKGROUND_COLOR; board.cell_count()];
        TermManager { stdout: stdout(), board, screen }
    }

    pub fn ensure_fits(&self) -> Result<()> {
        let (width, height) = terminal::size().context("Error reading terminal size")?;
        let needed = (self.board.columns() as u16 * CELL_COLUMNS, self.board.rows() as u16);

        if width < needed.0 || height < needed.1 {
            bail!("terminal is {}x{}, the board needs at least {}x{}", width, height, needed.0, needed.1);
        }

        Ok(())
    }

    pub fn setup(&mut self, title: &str) -> Result<()> {
        execute!(self.stdout, EnterAlternateScreen, SetTitle(title)).context("Error entering alt screen")?;
        terminal::enable_raw_mode().context("Error setting raw mode")?;
        execute!(self.stdout, cursor::Hide, cursor::DisableBlinking).context("Error hiding cursor")?;
        Ok(())
    }

    pub fn restore(&mut self) -> Result<()> {
        terminal::disable_raw_mode().context("Error unsetting raw mode")?;
        execute!(self.stdout, style::ResetColor, cursor::Show, cursor::EnableBlinking, LeaveAlternateScreen)
            .context("Error leaving alt screen")?;
        Ok(())
    }

    ///////////////////////////////////////////////////////////////////////////

    /// Board cells covered by `rect`, as (buffer index, terminal column, row).
    fn cells_of(&self, rect: Rect) -> Vec<(usize, u16, u16)> {
        let cell = self.board.cell();
        let span = (rect.size / cell).max(1);
        let mut cells = vec![];

        for dy in 0..span {
            for dx in 0..span {
                let (x, y) = self.board.wrap((rect.x + dx * cell, rect.y + dy * cell));
                let (col, row) = (x / cell, y / cell);
                let idx = (row * self.board.columns() + col) as usize;
                cells.push((idx, col as u16 * CELL_COLUMNS, row as u16));
            }
        }

        cells
    }

    fn paint(&mut self, col: u16, row: u16, bg: Rgb, fg: Option<Rgb>, text: &str) -> Result<()> {
        queue!(self.stdout, cursor::MoveTo(col, row), style::SetBackgroundColor(to_color(bg)))?;
        if let Some(fg) = fg {
            queue!(self.stdout, style::SetForegroundColor(to_color(fg)))?;
        }
        queue!(self.stdout, style::Print(text), style::ResetColor)?;
        Ok(())
    }
}

impl Canvas for TermManager {
    fn cell_size(&self) -> i32 {
        self.board.cell()
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgb) -> Result<()> {
        for (idx, col, row) in self.cells_of(rect) {
            self.screen[idx] = color;
            self.paint(col, row, color, None, "  ")?;
        }
        Ok(())
    }

    fn stroke_rect(&mut self, rect: Rect, color: Rgb) -> Result<()> {
        // Keep whatever fill the cell already has behind the border glyphs
        for (idx, col, row) in self.cells_of(rect) {
            let bg = self.screen[idx];
            self.paint(col, row, bg, Some(color), "[]")?;
        }
        Ok(())
    }

    fn clear(&mut self, color: Rgb) -> Result<()> {
        let board = self.board;
        for pos in board.cells() {
            self.fill_rect(cell_rect(pos, board.cell()), color)?;
        }
        Ok(())
    }

    fn present(&mut self) -> Result<()> {
        self.stdout.flush().context("Error flushing")
    }
}

impl EventSource for TermManager {
    fn poll_events(&mut self) -> Result<Vec<InputEvent>> {
        let mut events = vec![];

        while poll(Duration::from_millis(0))? {
            if let Event::Key(ev) = read()? {
                events.extend(map_key(&ev));
            }
        }

        Ok(events)
    }
}

fn to_color((r, g, b): Rgb) -> style::Color {
    style::Color::Rgb { r, g, b }
}
