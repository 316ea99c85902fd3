//! Game board representation and line clearing

/// Standard board dimensions
pub const DEFAULT_COLS: usize = 10;
pub const DEFAULT_ROWS: usize = 20;

/// A cell on the board - either empty or filled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Filled,
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn is_filled(&self) -> bool {
        matches!(self, Cell::Filled)
    }
}

/// The grid of locked cells
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cols: usize,
    rows: usize,
    /// Row-major, row 0 is the top
    cells: Vec<Cell>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new(DEFAULT_COLS, DEFAULT_ROWS)
    }
}

impl Board {
    /// Create a new empty board
    ///
    /// Both dimensions must be non-zero; `GameConfig::validate` enforces
    /// this for boards built by a game.
    pub fn new(cols: usize, rows: usize) -> Self {
        debug_assert!(cols > 0 && rows > 0, "board of {cols}x{rows} has no cells");
        Self {
            cols,
            rows,
            cells: vec![Cell::Empty; cols * rows],
        }
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.cols || y >= self.rows {
            return None;
        }
        Some(y * self.cols + x)
    }

    /// Get the cell at (x, y)
    /// Returns None outside the grid
    pub fn cell(&self, x: i32, y: i32) -> Option<Cell> {
        self.index(x, y).map(|i| self.cells[i])
    }

    /// Whether (x, y) blocks a piece.
    ///
    /// Columns outside `[0, cols)` and rows at or below `rows` are walls.
    /// Space above the grid (`y < 0`) is always free, so pieces can spawn and
    /// rotate while partly above the visible area.
    pub fn is_occupied(&self, x: i32, y: i32) -> bool {
        if x < 0 || x >= self.cols as i32 || y >= self.rows as i32 {
            return true;
        }
        if y < 0 {
            return false;
        }
        self.cells[y as usize * self.cols + x as usize].is_filled()
    }

    /// Lock a piece onto the board.
    ///
    /// Callers validate the cells first; anything outside the grid is skipped.
    pub fn lock(&mut self, cells: &[(i32, i32)]) {
        for &(x, y) in cells {
            if let Some(i) = self.index(x, y) {
                self.cells[i] = Cell::Filled;
            }
        }
    }

    /// Clear every full row and return the number cleared.
    ///
    /// Scans bottom to top. A cleared row pulls everything above it down one
    /// row and the same index is checked again, so stacked full rows collapse
    /// in a single call.
    pub fn clear_full_rows(&mut self) -> usize {
        let mut lines_cleared = 0;
        let mut row = self.rows;

        while row > 0 {
            let y = row - 1;
            if self.row_is_full(y) {
                lines_cleared += 1;
                // Shift rows [0, y) down by one, then empty the top row
                self.cells.copy_within(0..y * self.cols, self.cols);
                self.cells[..self.cols].fill(Cell::Empty);
            } else {
                row -= 1;
            }
        }

        lines_cleared
    }

    /// Check if a row is completely filled
    pub fn row_is_full(&self, y: usize) -> bool {
        y < self.rows
            && self.cells[y * self.cols..(y + 1) * self.cols]
                .iter()
                .all(|cell| cell.is_filled())
    }

    /// Check if the board is completely empty
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|cell| cell.is_empty())
    }

    /// Number of filled cells
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_filled()).count()
    }

    /// Empty every cell, keeping the dimensions
    pub fn reset(&mut self) {
        self.cells.fill(Cell::Empty);
    }

    /// Iterate rows top to bottom
    pub fn rows_iter(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.cols)
    }
}
