//! Moore-neighborhood scan on a bounded grid.
//!
//! The eight offsets are visited in a fixed row-major order: top row left to
//! right, then the middle row, then the bottom row. Offsets landing outside
//! the grid are skipped, so edge cells have five neighbors and corner cells
//! three. The order carries no meaning for the rules (attribution only looks
//! at counts) but keeps scans reproducible.

use lifeduel_types::Faction;

use crate::error::GridError;
use crate::grid::Grid;

/// Neighbor offsets `(d_row, d_col)` in scan order.
pub const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Factions of the live, in-bounds neighbors of `(row, col)`, in scan order.
///
/// # Errors
///
/// Returns [`GridError::OutOfBounds`] if `(row, col)` itself is outside the
/// grid. Off-grid neighbors are never an error.
pub fn living_neighbor_factions(
    grid: &Grid,
    row: usize,
    col: usize,
) -> Result<impl Iterator<Item = Faction> + '_, GridError> {
    grid.get(row, col)?;
    Ok(NEIGHBOR_OFFSETS.into_iter().filter_map(move |(d_row, d_col)| {
        let neighbor_row = row.checked_add_signed(d_row)?;
        let neighbor_col = col.checked_add_signed(d_col)?;
        grid.cell(neighbor_row, neighbor_col)?.faction()
    }))
}

/// Summary of a neighborhood: how many live neighbors, and per faction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NeighborTally {
    /// Live neighbors (0..=8).
    pub total: u8,
    /// Live neighbors owned by [`Faction::A`].
    pub a: u8,
    /// Live neighbors owned by [`Faction::B`].
    pub b: u8,
}

impl NeighborTally {
    /// Tally a sequence of neighbor factions.
    pub fn from_factions(factions: impl IntoIterator<Item = Faction>) -> Self {
        factions.into_iter().fold(Self::default(), |mut tally, faction| {
            tally.total = tally.total.saturating_add(1);
            match faction {
                Faction::A => tally.a = tally.a.saturating_add(1),
                Faction::B => tally.b = tally.b.saturating_add(1),
            }
            tally
        })
    }

    /// Scan and tally the neighborhood of `(row, col)`.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::OutOfBounds`] if `(row, col)` is outside the grid.
    pub fn scan(grid: &Grid, row: usize, col: usize) -> Result<Self, GridError> {
        Ok(Self::from_factions(living_neighbor_factions(grid, row, col)?))
    }
}
