//! The bounded rectangular cell grid.
//!
//! A [`Grid`] is a flat row-major `Vec<Cell>` with fixed dimensions. It has
//! no behavior beyond storage and bounds-checked access: coordinates outside
//! the grid are reported as [`GridError::OutOfBounds`] and never clamped or
//! wrapped.
//!
//! `Clone` is a deep copy. The stepper relies on this to read one
//! generation while writing the next into an independent buffer.
//!
//! # ASCII format
//!
//! [`Grid::from_pattern`] and the [`Display`](core::fmt::Display) impl share
//! a one-character-per-cell alphabet: `.` dead, `A` faction A, `B` faction B.
//! `#` is accepted on input as an alias for `A` (single-player patterns).

use lifeduel_types::{Cell, Faction, FactionCounts};
use serde::Serialize;

use crate::error::GridError;

/// Default board height of the reference game.
pub const DEFAULT_ROWS: usize = 30;

/// Default board width of the reference game.
pub const DEFAULT_COLS: usize = 50;

/// A fixed-size rectangular grid of cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Grid {
    /// Number of rows.
    rows: usize,
    /// Number of columns.
    cols: usize,
    /// Row-major cell storage, `rows * cols` long.
    cells: Vec<Cell>,
}

impl Grid {
    /// Create an all-dead grid.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidDimensions`] if either dimension is zero
    /// or the cell count overflows `usize`.
    pub fn new(rows: usize, cols: usize) -> Result<Self, GridError> {
        if rows == 0 || cols == 0 {
            return Err(GridError::InvalidDimensions { rows, cols });
        }
        let len = rows
            .checked_mul(cols)
            .ok_or(GridError::InvalidDimensions { rows, cols })?;
        Ok(Self {
            rows,
            cols,
            cells: vec![Cell::Dead; len],
        })
    }

    /// Assemble a grid from already-validated parts.
    ///
    /// Callers guarantee `cells.len() == rows * cols`.
    pub(crate) const fn from_parts(rows: usize, cols: usize, cells: Vec<Cell>) -> Self {
        Self { rows, cols, cells }
    }

    /// Parse a grid from ASCII rows (see the module docs for the alphabet).
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidPattern`] for an empty pattern, ragged
    /// rows, or an unknown character.
    pub fn from_pattern(lines: &[&str]) -> Result<Self, GridError> {
        let first = lines.first().ok_or_else(|| GridError::InvalidPattern {
            line: 0,
            reason: "pattern has no rows".to_owned(),
        })?;
        let cols = first.chars().count();
        let mut grid = Self::new(lines.len(), cols).map_err(|err| GridError::InvalidPattern {
            line: 0,
            reason: err.to_string(),
        })?;

        for (row, line) in lines.iter().enumerate() {
            let width = line.chars().count();
            if width != cols {
                return Err(GridError::InvalidPattern {
                    line: row,
                    reason: format!("expected {cols} columns, found {width}"),
                });
            }
            for (col, symbol) in line.chars().enumerate() {
                let cell = match symbol {
                    '.' => Cell::Dead,
                    'A' | '#' => Cell::Alive(Faction::A),
                    'B' => Cell::Alive(Faction::B),
                    other => {
                        return Err(GridError::InvalidPattern {
                            line: row,
                            reason: format!("unknown cell symbol {other:?}"),
                        });
                    }
                };
                grid.set(row, col, cell)?;
            }
        }
        Ok(grid)
    }

    // -------------------------------------------------------------------
    // Dimensions
    // -------------------------------------------------------------------

    /// Number of rows.
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always `false`: a grid has at least one cell.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Whether `other` has the same dimensions.
    pub const fn same_shape(&self, other: &Self) -> bool {
        self.rows == other.rows && self.cols == other.cols
    }

    // -------------------------------------------------------------------
    // Access
    // -------------------------------------------------------------------

    /// Flat index of `(row, col)`, or `None` outside the grid.
    fn index(&self, row: usize, col: usize) -> Option<usize> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        row.checked_mul(self.cols)?.checked_add(col)
    }

    const fn out_of_bounds(&self, row: usize, col: usize) -> GridError {
        GridError::OutOfBounds {
            row,
            col,
            rows: self.rows,
            cols: self.cols,
        }
    }

    /// Read the cell at `(row, col)`.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::OutOfBounds`] outside the grid.
    pub fn get(&self, row: usize, col: usize) -> Result<Cell, GridError> {
        self.cell(row, col)
            .ok_or_else(|| self.out_of_bounds(row, col))
    }

    /// Read the cell at `(row, col)`, or `None` outside the grid.
    ///
    /// Used by neighborhood scans, where off-grid positions simply do not
    /// exist.
    pub fn cell(&self, row: usize, col: usize) -> Option<Cell> {
        self.index(row, col)
            .and_then(|idx| self.cells.get(idx))
            .copied()
    }

    /// Overwrite the cell at `(row, col)`.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::OutOfBounds`] outside the grid.
    pub fn set(&mut self, row: usize, col: usize, cell: Cell) -> Result<(), GridError> {
        let slot = self
            .index(row, col)
            .and_then(|idx| self.cells.get_mut(idx));
        match slot {
            Some(slot) => {
                *slot = cell;
                Ok(())
            }
            None => Err(self.out_of_bounds(row, col)),
        }
    }

    /// Kill every cell.
    pub fn clear(&mut self) {
        self.cells.fill(Cell::Dead);
    }

    // -------------------------------------------------------------------
    // Traversal
    // -------------------------------------------------------------------

    /// All coordinates in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = (usize, usize)> + use<> {
        let cols = self.cols;
        (0..self.rows).flat_map(move |row| (0..cols).map(move |col| (row, col)))
    }

    /// Every cell with its coordinates, row-major.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, Cell)> + '_ {
        self.positions()
            .zip(self.cells.iter().copied())
            .map(|((row, col), cell)| (row, col, cell))
    }

    /// Lazy row-major traversal of the live cells.
    ///
    /// Each call starts a fresh traversal.
    pub fn alive_cells(&self) -> impl Iterator<Item = (usize, usize, Faction)> + '_ {
        self.iter()
            .filter_map(|(row, col, cell)| cell.faction().map(|faction| (row, col, faction)))
    }

    /// Live cells per faction.
    pub fn faction_counts(&self) -> FactionCounts {
        self.alive_cells().map(|(_, _, faction)| faction).collect()
    }

    /// Total live cells.
    pub fn population(&self) -> u32 {
        self.faction_counts().total()
    }

    /// Coordinates whose cell differs between `self` and `other`, row-major.
    ///
    /// Lets a renderer repaint only what changed between two snapshots.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::DimensionMismatch`] if the grids differ in shape.
    pub fn diff<'a>(
        &'a self,
        other: &'a Self,
    ) -> Result<impl Iterator<Item = (usize, usize)> + 'a, GridError> {
        if !self.same_shape(other) {
            return Err(GridError::DimensionMismatch {
                left_rows: self.rows,
                left_cols: self.cols,
                right_rows: other.rows,
                right_cols: other.cols,
            });
        }
        Ok(self
            .iter()
            .zip(other.cells.iter())
            .filter(|((_, _, mine), theirs)| mine != *theirs)
            .map(|((row, col, _), _)| (row, col)))
    }
}

impl core::fmt::Display for Grid {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        for (row, col, cell) in self.iter() {
            if col == 0 && row > 0 {
                writeln!(f)?;
            }
            let symbol = cell.faction().map_or('.', Faction::symbol);
            write!(f, "{symbol}")?;
        }
        Ok(())
    }
}
