//! Board: the fixed-size playfield grid.
//!
//! Flat row-major storage, sized at construction (standard 10x20).
//! Coordinates are (x, y) with x growing rightward and y downward; rows
//! above the visible top (y < 0) are spawn-permitted and never stored.

use crate::types::{Cell, PieceKind};

#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    width: u8,
    height: u8,
    cells: Vec<Cell>,
}

impl Board {
    pub fn new(width: u8, height: u8) -> Self {
        Self {
            width,
            height,
            cells: vec![None; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    #[inline]
    fn index(&self, x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= self.width as i8 || y < 0 || y >= self.height as i8 {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    /// Cell at (x, y), or `None` when out of bounds.
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        self.index(x, y).map(|i| self.cells[i])
    }

    /// Write a cell. Returns false when out of bounds.
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match self.index(x, y) {
            Some(i) => {
                self.cells[i] = cell;
                true
            }
            None => false,
        }
    }

    /// Whether a falling piece may occupy (x, y).
    ///
    /// Columns must be in range and visible rows empty; rows above the top
    /// are open so pieces can enter from outside the visible area.
    pub fn is_open(&self, x: i8, y: i8) -> bool {
        if x < 0 || x >= self.width as i8 || y >= self.height as i8 {
            return false;
        }
        if y < 0 {
            return true;
        }
        self.cells[y as usize * self.width as usize + x as usize].is_none()
    }

    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= self.height as usize {
            return false;
        }
        let w = self.width as usize;
        self.cells[y * w..(y + 1) * w].iter().all(Cell::is_some)
    }

    /// Integrate a locked piece's absolute cells into the grid.
    ///
    /// Legality of visible rows is the caller's contract (checked through
    /// `is_open` before any committed move). Returns false when any cell
    /// lies above the visible top: the piece locked out, which the session
    /// treats as game over.
    pub fn place(&mut self, cells: &[(i8, i8)], kind: PieceKind) -> bool {
        let mut on_board = true;
        for &(x, y) in cells {
            if y < 0 {
                on_board = false;
                continue;
            }
            self.set(x, y, Some(kind));
        }
        on_board
    }

    /// Remove every full row and return how many were cleared.
    ///
    /// Rebuild strategy: retained rows are compacted into a new grid in
    /// order, preceded by the needed count of fresh empty rows. One pass,
    /// no per-row shifting, regardless of how many rows clear at once.
    pub fn clear_full_rows(&mut self) -> u32 {
        let w = self.width as usize;
        let mut kept: Vec<Cell> = Vec::with_capacity(self.cells.len());
        let mut cleared = 0u32;

        for y in 0..self.height as usize {
            let row = &self.cells[y * w..(y + 1) * w];
            if row.iter().all(Cell::is_some) {
                cleared += 1;
            } else {
                kept.extend_from_slice(row);
            }
        }

        if cleared > 0 {
            let mut rebuilt = vec![None; cleared as usize * w];
            rebuilt.append(&mut kept);
            self.cells = rebuilt;
        }

        cleared
    }

    /// Flat row-major view of all cells (for rendering).
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Reset every cell to empty.
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }
}
