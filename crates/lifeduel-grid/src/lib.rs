//! Bounded cell grid and generation rules for the Life Duel simulation.
//!
//! This crate models the board itself: a fixed rectangular grid with no
//! wraparound, the Moore-neighborhood scan over it, and the stepper that
//! turns one generation into the next.
//!
//! # Modules
//!
//! - [`error`] -- Error types for grid operations.
//! - [`grid`] -- [`Grid`]: storage, bounds-checked access, traversal, ASCII
//!   patterns, and snapshot diffs.
//! - [`neighbors`] -- Live-neighbor faction scan and [`NeighborTally`].
//! - [`stepper`] -- [`GenerationStepper`]: B3/S23 with faction attribution.

pub mod error;
pub mod grid;
pub mod neighbors;
pub mod stepper;

// Re-export primary types at crate root.
pub use error::GridError;
pub use grid::{DEFAULT_COLS, DEFAULT_ROWS, Grid};
pub use neighbors::{NEIGHBOR_OFFSETS, NeighborTally, living_neighbor_factions};
pub use stepper::{GenerationStepper, Step};
