use std::fmt;

use super::Player;
use crate::error::BoardError;

pub const DEFAULT_ROWS: usize = 6;
pub const DEFAULT_COLS: usize = 7;

/// Length of a scoring line.
const RUN: usize = 4;

/// Horizontal, vertical, rising diagonal, falling diagonal.
const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (-1, 1)];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    One,
    Two,
}

impl Cell {
    pub fn owner(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::One => Some(Player::One),
            Cell::Two => Some(Player::Two),
        }
    }

    fn digit(self) -> char {
        match self {
            Cell::Empty => '0',
            Cell::One => '1',
            Cell::Two => '2',
        }
    }
}

/// Result of scanning a board for four-in-a-rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WinState {
    NoWinner,
    Won(Player),
    /// Both players own at least one four.
    Ambiguous,
}

/// A Connect Four grid with column-stacking semantics.
///
/// Row 0 is the bottom row. Pieces only enter through [`Board::drop_piece`]
/// and leave through [`Board::lift_piece`], so a column's count always equals
/// its number of occupied cells and nothing floats above it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
    col_counts: Vec<usize>,
    total_count: usize,
}

impl Board {
    /// Create a new empty board
    pub fn new(rows: usize, cols: usize) -> Self {
        Board {
            rows,
            cols,
            cells: vec![Cell::Empty; rows * cols],
            col_counts: vec![0; cols],
            total_count: 0,
        }
    }

    pub fn num_rows(&self) -> usize {
        self.rows
    }

    pub fn num_cols(&self) -> usize {
        self.cols
    }

    pub fn num_cells(&self) -> usize {
        self.cells.len()
    }

    pub fn num_occupied_cells(&self) -> usize {
        self.total_count
    }

    pub fn num_empty_cells(&self) -> usize {
        self.num_cells() - self.total_count
    }

    /// Number of pieces stacked in a column
    pub fn column_height(&self, col: usize) -> Result<usize, BoardError> {
        self.col_counts
            .get(col)
            .copied()
            .ok_or(BoardError::InvalidColumn(col))
    }

    pub fn is_full(&self) -> bool {
        self.total_count == self.num_cells()
    }

    /// Check if a column is full; columns outside the board count as full
    pub fn is_column_full(&self, col: usize) -> bool {
        match self.col_counts.get(col) {
            Some(&count) => count == self.rows,
            None => true,
        }
    }

    pub fn is_valid_move(&self, col: usize) -> bool {
        col < self.cols && !self.is_column_full(col)
    }

    /// Iterator over the columns that can still take a piece, left to right
    pub fn legal_columns(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.cols).filter(move |&col| !self.is_column_full(col))
    }

    /// Get the cell at a specific position
    pub fn get(&self, row: usize, col: usize) -> Result<Cell, BoardError> {
        if row >= self.rows || col >= self.cols {
            return Err(BoardError::OutOfRange { row, col });
        }
        Ok(self.cell(row, col))
    }

    pub fn is_occupied(&self, row: usize, col: usize) -> Result<bool, BoardError> {
        Ok(self.get(row, col)? != Cell::Empty)
    }

    #[inline]
    fn cell(&self, row: usize, col: usize) -> Cell {
        self.cells[row * self.cols + col]
    }

    #[inline]
    fn set(&mut self, row: usize, col: usize, cell: Cell) {
        self.cells[row * self.cols + col] = cell;
    }

    /// Drop a piece into a column. Returns how many cells remain open in it.
    pub fn drop_piece(&mut self, col: usize, player: Player) -> Result<usize, BoardError> {
        if col >= self.cols {
            return Err(BoardError::InvalidColumn(col));
        }
        if self.is_column_full(col) {
            return Err(BoardError::ColumnFull(col));
        }

        let row = self.col_counts[col];
        self.set(row, col, player.to_cell());
        self.col_counts[col] += 1;
        self.total_count += 1;
        Ok(self.rows - self.col_counts[col])
    }

    /// Undo the most recent drop in a column. The top piece must belong to
    /// `player`. Returns how many cells remain open in the column.
    pub fn lift_piece(&mut self, col: usize, player: Player) -> Result<usize, BoardError> {
        if col >= self.cols {
            return Err(BoardError::InvalidColumn(col));
        }
        let count = self.col_counts[col];
        if count == 0 || self.cell(count - 1, col) != player.to_cell() {
            return Err(BoardError::InvalidUnmove { col });
        }

        self.set(count - 1, col, Cell::Empty);
        self.col_counts[col] -= 1;
        self.total_count -= 1;
        Ok(self.rows - self.col_counts[col])
    }

    /// Swap ownership of every piece on the board
    pub fn reverse(&mut self) {
        for cell in &mut self.cells {
            *cell = match *cell {
                Cell::Empty => Cell::Empty,
                Cell::One => Cell::Two,
                Cell::Two => Cell::One,
            };
        }
    }

    /// Cells of the run starting at (row, col) in direction (dr, dc), if it
    /// fits on the board.
    fn window(&self, row: usize, col: usize, dr: isize, dc: isize) -> Option<[Cell; RUN]> {
        let span = RUN as isize - 1;
        let end_row = row as isize + dr * span;
        let end_col = col as isize + dc * span;
        if end_row < 0 || end_row >= self.rows as isize || end_col < 0 || end_col >= self.cols as isize
        {
            return None;
        }
        Some(std::array::from_fn(|i| {
            let r = (row as isize + dr * i as isize) as usize;
            let c = (col as isize + dc * i as isize) as usize;
            self.cell(r, c)
        }))
    }

    /// Every 4-cell line on the board, in all four directions
    fn windows(&self) -> impl Iterator<Item = [Cell; RUN]> + '_ {
        DIRECTIONS.into_iter().flat_map(move |(dr, dc)| {
            (0..self.rows)
                .flat_map(move |row| (0..self.cols).map(move |col| (row, col)))
                .filter_map(move |(row, col)| self.window(row, col, dr, dc))
        })
    }

    /// Count every four-in-a-row owned by `player`. Overlapping runs count
    /// separately, so five in a line scores 2.
    pub fn score(&self, player: Player) -> u32 {
        let target = player.to_cell();
        self.windows()
            .filter(|window| window.iter().all(|&cell| cell == target))
            .count() as u32
    }

    pub fn winner(&self) -> WinState {
        let mut winner: Option<Player> = None;
        for window in self.windows() {
            let Some(owner) = window[0].owner() else {
                continue;
            };
            if window[1..].iter().any(|&cell| cell != window[0]) {
                continue;
            }
            match winner {
                Some(existing) if existing != owner => return WinState::Ambiguous,
                _ => winner = Some(owner),
            }
        }
        match winner {
            Some(player) => WinState::Won(player),
            None => WinState::NoWinner,
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(DEFAULT_ROWS, DEFAULT_COLS)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let border = "-".repeat(self.cols + 2);
        writeln!(f, "{border}")?;
        for row in (0..self.rows).rev() {
            write!(f, "|")?;
            for col in 0..self.cols {
                write!(f, "{}", self.cell(row, col).digit())?;
            }
            writeln!(f, "|")?;
        }
        writeln!(f, "{border}")
    }
}
