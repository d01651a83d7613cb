use super::player::Mark;
use crate::error::MoveError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    One,
    Two,
}

impl Cell {
    /// Wire value of this cell (0, 1 or 2).
    pub fn value(self) -> u8 {
        match self {
            Cell::Empty => 0,
            Cell::One => 1,
            Cell::Two => 2,
        }
    }

    pub fn from_value(value: u8) -> Option<Cell> {
        match value {
            0 => Some(Cell::Empty),
            1 => Some(Cell::One),
            2 => Some(Cell::Two),
            _ => None,
        }
    }

    /// The mark occupying this cell, if any.
    pub fn mark(self) -> Option<Mark> {
        match self {
            Cell::Empty => None,
            Cell::One => Some(Mark::One),
            Cell::Two => Some(Mark::Two),
        }
    }
}

/// A `rows × columns` Connect-X grid. Row 0 is the top row.
///
/// Grids are never mutated in place by the search code: [`Grid::drop_piece`]
/// returns a fresh copy so recursive branches cannot observe each other.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    rows: usize,
    columns: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a new empty grid
    pub fn new(rows: usize, columns: usize) -> Self {
        Grid {
            rows,
            columns,
            cells: vec![Cell::Empty; rows * columns],
        }
    }

    /// Build a grid from row-major cells. Returns `None` on a size mismatch.
    pub fn from_cells(rows: usize, columns: usize, cells: Vec<Cell>) -> Option<Self> {
        if rows.checked_mul(columns) != Some(cells.len()) {
            return None;
        }
        Some(Grid {
            rows,
            columns,
            cells,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Get the cell at a specific position
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[row * self.columns + col]
    }

    /// Row-major view of every cell.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Check if a column is full
    pub fn is_column_full(&self, col: usize) -> bool {
        if col >= self.columns || self.rows == 0 {
            return true;
        }
        self.get(0, col) != Cell::Empty
    }

    /// Columns whose top cell is empty, in ascending order.
    pub fn legal_columns(&self) -> Vec<usize> {
        (0..self.columns)
            .filter(|&col| !self.is_column_full(col))
            .collect()
    }

    /// Check if the top row has no empty cell
    pub fn is_full(&self) -> bool {
        (0..self.columns).all(|col| self.is_column_full(col))
    }

    /// Number of occupied cells.
    pub fn piece_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c != Cell::Empty).count()
    }

    /// Row where a piece dropped into `col` would land.
    pub fn landing_row(&self, col: usize) -> Option<usize> {
        if col >= self.columns {
            return None;
        }
        (0..self.rows).rev().find(|&row| self.get(row, col) == Cell::Empty)
    }

    /// Drop `mark` into `col` and return the resulting grid. `self` is left
    /// untouched.
    pub fn drop_piece(&self, col: usize, mark: Mark) -> Result<Grid, MoveError> {
        if col >= self.columns {
            return Err(MoveError::InvalidColumn {
                column: col,
                columns: self.columns,
            });
        }

        let row = self
            .landing_row(col)
            .ok_or(MoveError::ColumnFull { column: col })?;

        let mut next = self.clone();
        next.cells[row * self.columns + col] = mark.to_cell();
        Ok(next)
    }
}
