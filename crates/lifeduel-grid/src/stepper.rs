//! Generation stepper: B3/S23 with two-faction birth attribution.
//!
//! For every cell, looking only at the current generation:
//!
//! - a live cell with fewer than 2 or more than 3 live neighbors dies;
//! - a dead cell with exactly 3 live neighbors is born;
//! - everything else keeps its state (including its faction).
//!
//! In multiplayer mode a newborn takes faction `A` only when `A` parents
//! strictly outnumber `B` parents; otherwise it is `B`. Ties therefore go
//! to `B`. In single-player mode every newborn is `A`.
//!
//! The input grid is never mutated: the next generation is collected into a
//! fresh buffer and returned as a new [`Grid`].

use lifeduel_types::{Cell, Faction, GameMode};
use tracing::trace;

use crate::error::GridError;
use crate::grid::Grid;
use crate::neighbors::NeighborTally;

/// Result of stepping one generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    /// The next generation.
    pub next: Grid,
    /// Whether any cell differs from the input.
    pub changed: bool,
    /// Cells born this step.
    pub births: u32,
    /// Cells that died this step.
    pub deaths: u32,
}

/// Computes successive generations for a fixed game mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationStepper {
    mode: GameMode,
}

impl GenerationStepper {
    /// Create a stepper for the given mode.
    pub const fn new(mode: GameMode) -> Self {
        Self { mode }
    }

    /// The mode this stepper attributes births for.
    pub const fn mode(&self) -> GameMode {
        self.mode
    }

    /// Compute the next generation of `grid`.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::OutOfBounds`] only if the neighborhood scan is
    /// handed a coordinate outside the grid, which the row-major walk never
    /// does. Callers treat it as an internal consistency failure.
    pub fn step(&self, grid: &Grid) -> Result<Step, GridError> {
        let mut cells = Vec::with_capacity(grid.len());
        let mut births: u32 = 0;
        let mut deaths: u32 = 0;
        let mut changed = false;

        for (row, col, current) in grid.iter() {
            let tally = NeighborTally::scan(grid, row, col)?;
            let next = self.next_cell(current, &tally);
            match (current.is_alive(), next.is_alive()) {
                (true, false) => deaths = deaths.saturating_add(1),
                (false, true) => births = births.saturating_add(1),
                _ => {}
            }
            changed |= next != current;
            cells.push(next);
        }

        trace!(births, deaths, changed, "Generation stepped");

        Ok(Step {
            next: Grid::from_parts(grid.rows(), grid.cols(), cells),
            changed,
            births,
            deaths,
        })
    }

    /// Apply the survival, death, and birth rules to one cell.
    pub const fn next_cell(&self, current: Cell, tally: &NeighborTally) -> Cell {
        match current {
            Cell::Alive(_) if tally.total < 2 || tally.total > 3 => Cell::Dead,
            Cell::Dead if tally.total == 3 => Cell::Alive(self.attribute_birth(tally)),
            unchanged => unchanged,
        }
    }

    /// Faction of a cell born from the given parents.
    pub const fn attribute_birth(&self, parents: &NeighborTally) -> Faction {
        match self.mode {
            GameMode::Single => Faction::A,
            GameMode::Multiplayer => {
                if parents.a > parents.b {
                    Faction::A
                } else {
                    Faction::B
                }
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn duel() -> GenerationStepper {
        GenerationStepper::new(GameMode::Multiplayer)
    }

    fn step_pattern(stepper: GenerationStepper, lines: &[&str]) -> Step {
        let grid = Grid::from_pattern(lines).unwrap();
        stepper.step(&grid).unwrap()
    }

    #[test]
    fn lonely_cell_dies() {
        let step = step_pattern(duel(), &["...", ".A.", "..."]);
        assert_eq!(step.next.get(1, 1).unwrap(), Cell::Dead);
        assert!(step.changed);
        assert_eq!(step.deaths, 1);
        assert_eq!(step.births, 0);
    }

    #[test]
    fn overcrowded_cell_dies() {
        // Center has 4 live neighbors.
        let step = step_pattern(duel(), &["A.A", ".A.", "A.A"]);
        assert_eq!(step.next.get(1, 1).unwrap(), Cell::Dead);
    }

    #[test]
    fn cell_with_two_or_three_neighbors_survives_with_its_faction() {
        // Center B has exactly two A neighbors.
        let step = step_pattern(duel(), &["A..", ".B.", "..A"]);
        assert_eq!(step.next.get(1, 1).unwrap(), Cell::Alive(Faction::B));

        // Center B has exactly three A neighbors.
        let step = step_pattern(duel(), &["A.A", ".B.", "..A"]);
        assert_eq!(step.next.get(1, 1).unwrap(), Cell::Alive(Faction::B));
    }

    #[test]
    fn dead_cell_with_three_neighbors_is_born() {
        let step = step_pattern(duel(), &["A.A", "...", ".A."]);
        assert!(step.next.get(1, 1).unwrap().is_alive());
    }

    #[test]
    fn dead_cell_with_two_or_four_neighbors_stays_dead() {
        let step = step_pattern(duel(), &["A.A", "...", "..."]);
        assert_eq!(step.next.get(1, 1).unwrap(), Cell::Dead);
        let step = step_pattern(duel(), &["A.A", "...", "A.A"]);
        assert_eq!(step.next.get(1, 1).unwrap(), Cell::Dead);
    }

    #[test]
    fn two_a_parents_beat_one_b() {
        let step = step_pattern(duel(), &["A.A", "...", ".B."]);
        assert_eq!(step.next.get(1, 1).unwrap(), Cell::Alive(Faction::A));
    }

    #[test]
    fn two_b_parents_beat_one_a() {
        let step = step_pattern(duel(), &["B.B", "...", ".A."]);
        assert_eq!(step.next.get(1, 1).unwrap(), Cell::Alive(Faction::B));
    }

    #[test]
    fn tied_parents_favor_b() {
        let tally = NeighborTally { total: 3, a: 1, b: 1 };
        assert_eq!(duel().attribute_birth(&tally), Faction::B);
        let tally = NeighborTally { total: 2, a: 1, b: 1 };
        assert_eq!(duel().attribute_birth(&tally), Faction::B);
        let tally = NeighborTally { total: 3, a: 0, b: 0 };
        assert_eq!(duel().attribute_birth(&tally), Faction::B);
    }

    #[test]
    fn single_player_births_are_always_a() {
        let stepper = GenerationStepper::new(GameMode::Single);
        let tally = NeighborTally { total: 3, a: 0, b: 3 };
        assert_eq!(stepper.attribute_birth(&tally), Faction::A);

        let step = step_pattern(stepper, &["#.#", "...", ".#."]);
        assert_eq!(step.next.get(1, 1).unwrap(), Cell::Alive(Faction::A));
    }

    #[test]
    fn input_grid_is_not_mutated() {
        let grid = Grid::from_pattern(&[".....", "..A..", "..A..", "..A..", "....."]).unwrap();
        let before = grid.clone();
        let mut step = duel().step(&grid).unwrap();
        assert_eq!(grid, before);

        step.next.set(0, 0, Cell::Alive(Faction::B)).unwrap();
        assert_eq!(grid.get(0, 0).unwrap(), Cell::Dead);
    }

    #[test]
    fn blinker_oscillates() {
        let step = step_pattern(duel(), &[".....", "..A..", "..A..", "..A..", "....."]);
        assert_eq!(step.next.to_string(), ".....\n.....\n.AAA.\n.....\n.....");
        assert_eq!(step.births, 2);
        assert_eq!(step.deaths, 2);
    }

    #[test]
    fn block_is_a_still_life() {
        let step = step_pattern(duel(), &["....", ".BB.", ".BB.", "...."]);
        assert!(!step.changed);
        assert_eq!(step.next.to_string(), "....\n.BB.\n.BB.\n....");
    }

    #[test]
    fn empty_grid_does_not_change() {
        let grid = Grid::new(4, 6).unwrap();
        let step = duel().step(&grid).unwrap();
        assert!(!step.changed);
        assert_eq!(step.next, grid);
    }

    #[test]
    fn update_reads_previous_generation_only() {
        // A glider: an in-place update would corrupt later neighbor counts.
        let step = step_pattern(duel(), &[".A...", "..A..", "AAA..", ".....", "....."]);
        assert_eq!(step.next.to_string(), ".....\nA.A..\n.AA..\n.A...\n.....");
    }
}
