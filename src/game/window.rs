//! Window enumeration and win detection.
//!
//! A window is a run of exactly `inarow` cells along one of the four
//! orientations. Every scoring and terminal check in the crate is phrased in
//! terms of windows, so the scan order only decides which duplicate good spot
//! is recorded first.

use super::board::{Cell, Grid};
use super::player::Mark;

/// Orientation of a window, as a `(row, col)` step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Horizontal,
    Vertical,
    /// Top-left to bottom-right (↘).
    DiagonalDown,
    /// Bottom-left to top-right (↗).
    DiagonalUp,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Horizontal,
        Direction::Vertical,
        Direction::DiagonalDown,
        Direction::DiagonalUp,
    ];

    fn step(self) -> (isize, isize) {
        match self {
            Direction::Horizontal => (0, 1),
            Direction::Vertical => (1, 0),
            Direction::DiagonalDown => (1, 1),
            Direction::DiagonalUp => (-1, 1),
        }
    }
}

/// A view of `len` consecutive cells starting at an anchor.
#[derive(Debug, Clone, Copy)]
pub struct Window<'a> {
    grid: &'a Grid,
    direction: Direction,
    row: usize,
    col: usize,
    len: usize,
}

impl<'a> Window<'a> {
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Anchor cell `(row, col)`.
    pub fn anchor(&self) -> (usize, usize) {
        (self.row, self.col)
    }

    /// Coordinates covered by this window, anchor first.
    pub fn positions(&self) -> impl Iterator<Item = (usize, usize)> + 'a {
        let (dr, dc) = self.direction.step();
        let (row, col) = (self.row as isize, self.col as isize);
        (0..self.len as isize).map(move |i| ((row + dr * i) as usize, (col + dc * i) as usize))
    }

    /// Cell values covered by this window, anchor first.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + 'a {
        let grid = self.grid;
        self.positions().map(move |(r, c)| grid.get(r, c))
    }

    pub fn count(&self, cell: Cell) -> usize {
        self.cells().filter(|&c| c == cell).count()
    }

    /// Exactly `count` cells hold `mark` and every other cell is empty.
    pub fn matches(&self, count: usize, mark: Mark) -> bool {
        if count > self.len {
            return false;
        }
        self.count(mark.to_cell()) == count && self.count(Cell::Empty) == self.len - count
    }

    /// The mark filling every cell of this window, if any.
    pub fn occupant(&self) -> Option<Mark> {
        let first = self.cells().next()?.mark()?;
        if self.matches(self.len, first) {
            Some(first)
        } else {
            None
        }
    }
}

/// Lazily enumerate every window of length `inarow`: horizontal, vertical,
/// ↘ and ↗, row-major anchors within each orientation.
pub fn windows(grid: &Grid, inarow: usize) -> impl Iterator<Item = Window<'_>> + '_ {
    Direction::ALL
        .into_iter()
        .flat_map(move |direction| anchors(grid, inarow, direction))
        .map(move |(direction, row, col)| Window {
            grid,
            direction,
            row,
            col,
            len: inarow,
        })
}

fn anchors(
    grid: &Grid,
    inarow: usize,
    direction: Direction,
) -> impl Iterator<Item = (Direction, usize, usize)> {
    let (rows, columns) = (grid.rows(), grid.columns());
    // Number of anchors along a dimension; zero when the window does not fit.
    let fit = |size: usize| {
        if inarow == 0 || inarow > size {
            0
        } else {
            size - inarow + 1
        }
    };
    let (row_fit, col_fit) = (fit(rows), fit(columns));

    let (row_range, col_range) = match direction {
        Direction::Horizontal => (0..rows, 0..col_fit),
        Direction::Vertical => (0..row_fit, 0..columns),
        Direction::DiagonalDown => (0..row_fit, 0..col_fit),
        Direction::DiagonalUp => {
            let bottom = inarow.saturating_sub(1);
            (bottom..bottom + row_fit, 0..col_fit)
        }
    };

    row_range.flat_map(move |row| col_range.clone().map(move |col| (direction, row, col)))
}

/// Number of windows holding exactly `count` of `mark` and nothing else.
pub fn count_windows(grid: &Grid, inarow: usize, count: usize, mark: Mark) -> usize {
    windows(grid, inarow)
        .filter(|w| w.matches(count, mark))
        .count()
}

/// Distinct empty cells inside windows holding exactly `count` of `mark` and
/// nothing else, in first-found order.
pub fn good_spots(grid: &Grid, inarow: usize, count: usize, mark: Mark) -> Vec<(usize, usize)> {
    let mut spots: Vec<(usize, usize)> = Vec::new();
    for window in windows(grid, inarow).filter(|w| w.matches(count, mark)) {
        for (r, c) in window.positions() {
            if grid.get(r, c) == Cell::Empty && !spots.contains(&(r, c)) {
                spots.push((r, c));
            }
        }
    }
    spots
}

/// Occupant of the first fully occupied window.
pub fn winner(grid: &Grid, inarow: usize) -> Option<Mark> {
    windows(grid, inarow).find_map(|w| w.occupant())
}

/// The board is full (draw) or some window is fully occupied by one mark.
/// Must be called on the grid after the move.
pub fn is_terminal(grid: &Grid, inarow: usize) -> bool {
    grid.is_full() || winner(grid, inarow).is_some()
}
