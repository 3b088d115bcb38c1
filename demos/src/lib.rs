//! Shared model for the gridstar demos.
//!
//! A [`Board`] tracks what a viewer should show for every cell: walls,
//! endpoints, and the search's progress (frontier, closed cells, path). It
//! is fed [`SearchEvent`]s by an observer and drawn to a terminal with
//! crossterm.

use std::io::{self, Write};

use crossterm::{
    cursor, execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal,
};
use gridstar_core::{Grid, GridMap, Pos};
use gridstar_paths::SearchEvent;
use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};

// Colours
const COL_OPEN: Color = Color::Rgb { r: 255, g: 255, b: 255 };
const COL_WALL: Color = Color::Rgb { r: 0, g: 0, b: 0 };
const COL_START: Color = Color::Rgb { r: 255, g: 165, b: 0 };
const COL_END: Color = Color::Rgb { r: 255, g: 0, b: 0 };
const COL_FRONTIER: Color = Color::Rgb { r: 255, g: 255, b: 0 };
const COL_CLOSED: Color = Color::Rgb { r: 128, g: 128, b: 128 };
const COL_PATH: Color = Color::Rgb { r: 128, g: 0, b: 128 };
const COL_REACHED: Color = Color::Rgb { r: 0, g: 255, b: 0 };
const COL_STATUS_FG: Color = Color::Rgb { r: 200, g: 200, b: 200 };

// ---------------------------------------------------------------------------
// Mark
// ---------------------------------------------------------------------------

/// What a cell currently shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mark {
    Open,
    Wall,
    Start,
    End,
    Frontier,
    Closed,
    Path,
    /// The end cell once the search has reached it.
    Reached,
}

impl Mark {
    /// Terminal colour for the mark.
    pub fn color(self) -> Color {
        match self {
            Mark::Open => COL_OPEN,
            Mark::Wall => COL_WALL,
            Mark::Start => COL_START,
            Mark::End => COL_END,
            Mark::Frontier => COL_FRONTIER,
            Mark::Closed => COL_CLOSED,
            Mark::Path => COL_PATH,
            Mark::Reached => COL_REACHED,
        }
    }
}

// ---------------------------------------------------------------------------
// Board
// ---------------------------------------------------------------------------

/// Display state of a grid and its search.
#[derive(Debug, Clone)]
pub struct Board {
    pub grid: Grid,
    pub start: Pos,
    pub end: Pos,
    marks: Vec<Mark>,
    steps: usize,
}

impl Board {
    /// Build a board from a grid and its endpoints.
    pub fn new(grid: Grid, start: Pos, end: Pos) -> Self {
        let mut board = Self {
            marks: Vec::new(),
            grid,
            start,
            end,
            steps: 0,
        };
        board.reset();
        board
    }

    /// Build a board from a parsed map. Missing endpoints default to the
    /// top-left and bottom-right corners.
    pub fn from_map(map: GridMap) -> Self {
        let last = map.grid.rows() - 1;
        let start = map.start.unwrap_or(Pos::new(0, 0));
        let end = map.end.unwrap_or(Pos::new(last, last));
        Self::new(map.grid, start, end)
    }

    /// Forget all search progress, keeping walls and endpoints.
    pub fn reset(&mut self) {
        let dims = self.grid.dims();
        self.marks = dims
            .iter()
            .map(|p| {
                if p == self.start {
                    Mark::Start
                } else if p == self.end {
                    Mark::End
                } else if self.grid.is_open(p) {
                    Mark::Open
                } else {
                    Mark::Wall
                }
            })
            .collect();
        self.steps = 0;
    }

    /// Mark shown at `p`, or `None` when out of bounds.
    pub fn mark(&self, p: Pos) -> Option<Mark> {
        self.grid.dims().index(p).map(|i| self.marks[i])
    }

    /// Number of redraw-worthy events applied since the last reset.
    pub fn steps(&self) -> usize {
        self.steps
    }

    fn set(&mut self, p: Pos, mark: Mark) {
        if let Some(i) = self.grid.dims().index(p) {
            self.marks[i] = mark;
        }
    }

    /// Update the board for one search event.
    ///
    /// Start and end keep their own marks until the end is reached.
    pub fn apply(&mut self, event: &SearchEvent) {
        let p = event.pos();
        match *event {
            SearchEvent::GoalReached(_) => self.set(p, Mark::Reached),
            _ if p == self.start || p == self.end => {}
            SearchEvent::Discovered(_) => self.set(p, Mark::Frontier),
            SearchEvent::Closed(_) => self.set(p, Mark::Closed),
            SearchEvent::PathCell(_) => self.set(p, Mark::Path),
            SearchEvent::Expanded { .. } => {}
        }
        if event.is_step() {
            self.steps += 1;
        }
    }

    /// Draw the board at the top-left of the terminal, two columns per
    /// cell, followed by a status line.
    pub fn render(&self, out: &mut impl Write, status: &str) -> io::Result<()> {
        let dims = self.grid.dims();
        for row in 0..dims.rows {
            queue!(out, cursor::MoveTo(0, row as u16))?;
            for col in 0..dims.cols {
                let mark = self.marks[dims.index(Pos::new(row, col)).unwrap_or_default()];
                queue!(out, SetBackgroundColor(mark.color()), Print("  "))?;
            }
            queue!(out, ResetColor)?;
        }
        queue!(
            out,
            cursor::MoveTo(0, dims.rows as u16),
            SetForegroundColor(COL_STATUS_FG),
            Print(status),
            ResetColor,
        )?;
        out.flush()
    }
}

// ---------------------------------------------------------------------------
// Terminal
// ---------------------------------------------------------------------------

/// Raw-mode alternate screen that is restored when dropped, including on
/// early returns.
pub struct TerminalGuard<W: Write> {
    out: W,
}

impl<W: Write> TerminalGuard<W> {
    /// Switch the terminal to raw mode and an alternate screen drawn to `out`.
    pub fn enter(out: W) -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut guard = Self { out };
        execute!(
            guard.out,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::Clear(terminal::ClearType::All)
        )?;
        Ok(guard)
    }

    /// The writer drawing to the alternate screen.
    pub fn writer(&mut self) -> &mut W {
        &mut self.out
    }
}

impl<W: Write> Drop for TerminalGuard<W> {
    fn drop(&mut self) {
        let _ = execute!(self.out, cursor::Show, terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

// ---------------------------------------------------------------------------
// Map generation
// ---------------------------------------------------------------------------

/// Generate an `n × n` map where each cell is a wall with probability
/// `density`. The start (top-left) and end (bottom-right) stay open.
pub fn random_map(n: i32, density: f64, seed: u64) -> GridMap {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut grid = Grid::new(n);
    let start = Pos::new(0, 0);
    let end = Pos::new(n - 1, n - 1);
    let density = density.clamp(0.0, 1.0);
    for p in grid.dims().iter() {
        if p != start && p != end && rng.random_bool(density) {
            grid.set_wall(p, true).expect("position taken from the grid's own dims");
        }
    }
    GridMap {
        grid,
        start: Some(start),
        end: Some(end),
    }
}
