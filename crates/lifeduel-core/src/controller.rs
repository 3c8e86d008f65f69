//! Match controller: generation clock, termination, and scoring.
//!
//! The controller owns the [`MatchState`] and decides, each tick, whether
//! the board advances or the match ends:
//!
//! 1. A terminal match stays terminal: the tick is a no-op.
//! 2. In multiplayer, if `generation >= cap` *before* stepping, the match
//!    ends with [`MatchStatus::CapReached`] and the board is left as is.
//! 3. Otherwise the stepper runs. No change ends the match with
//!    [`MatchStatus::Stalled`]; a change bumps the generation and recounts
//!    factions.
//!
//! The outcome (multiplayer only) is computed once, at the transition, from
//! the board as it stood when the match ended.

use lifeduel_grid::{GenerationStepper, Grid, GridError};
use lifeduel_types::{FactionCounts, GameMode, MatchState, MatchStatus, Outcome};
use tracing::{debug, info};

/// Errors that can occur while advancing a match.
#[derive(Debug, thiserror::Error)]
pub enum MatchError {
    /// The stepper hit a grid error mid-scan. This is a broken internal
    /// contract, not something a caller can cause.
    #[error("internal consistency failure while stepping: {source}")]
    Consistency {
        /// The underlying grid error.
        source: GridError,
    },

    /// The generation counter would overflow.
    #[error("generation counter overflow: cannot advance beyond u64::MAX")]
    GenerationOverflow,
}

/// How and when a match ended, as computed by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Termination {
    /// [`MatchStatus::Stalled`] or [`MatchStatus::CapReached`].
    pub status: MatchStatus,
    /// Winner or tie; `None` in single-player mode.
    pub outcome: Option<Outcome>,
    /// Live cells per faction at the end.
    pub final_counts: FactionCounts,
    /// Generation at the end.
    pub generation: u64,
}

/// Result of one controller tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickResult {
    /// The next board, when the tick advanced it. `None` means the caller's
    /// board is still current.
    pub next: Option<Grid>,
    /// Match state after the tick.
    pub state: MatchState,
    /// Present only on the tick that ended the match.
    pub termination: Option<Termination>,
    /// Cells born this tick.
    pub births: u32,
    /// Cells that died this tick.
    pub deaths: u32,
}

impl TickResult {
    const fn unchanged(state: MatchState, termination: Option<Termination>) -> Self {
        Self {
            next: None,
            state,
            termination,
            births: 0,
            deaths: 0,
        }
    }
}

/// Owns the generation count and termination rules of one match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchController {
    mode: GameMode,
    state: MatchState,
}

impl MatchController {
    /// Create a controller at generation 0.
    ///
    /// `cap` only applies in multiplayer mode; single-player matches run
    /// until they stall.
    pub fn new(mode: GameMode, cap: u64) -> Self {
        let cap = mode.is_multiplayer().then_some(cap);
        Self {
            mode,
            state: MatchState::new(cap),
        }
    }

    /// The mode this controller scores for.
    pub const fn mode(&self) -> GameMode {
        self.mode
    }

    /// Current match state.
    pub const fn state(&self) -> &MatchState {
        &self.state
    }

    /// Advance the match by one tick against `grid`.
    ///
    /// # Errors
    ///
    /// Returns [`MatchError::Consistency`] if stepping fails, or
    /// [`MatchError::GenerationOverflow`] if the counter would overflow.
    pub fn tick(
        &mut self,
        stepper: &GenerationStepper,
        grid: &Grid,
    ) -> Result<TickResult, MatchError> {
        if self.state.status.is_terminal() {
            return Ok(TickResult::unchanged(self.state, None));
        }

        if self.mode.is_multiplayer() && self.state.cap_reached() {
            return Ok(self.conclude(MatchStatus::CapReached, grid));
        }

        let step = stepper
            .step(grid)
            .map_err(|source| MatchError::Consistency { source })?;

        if !step.changed {
            return Ok(self.conclude(MatchStatus::Stalled, grid));
        }

        self.state.generation = self
            .state
            .generation
            .checked_add(1)
            .ok_or(MatchError::GenerationOverflow)?;
        self.state.faction_counts = step.next.faction_counts();

        debug!(
            generation = self.state.generation,
            births = step.births,
            deaths = step.deaths,
            a = self.state.faction_counts.a,
            b = self.state.faction_counts.b,
            "Generation advanced"
        );

        Ok(TickResult {
            next: Some(step.next),
            state: self.state,
            termination: None,
            births: step.births,
            deaths: step.deaths,
        })
    }

    /// Move to a terminal status and score the board as it stands.
    fn conclude(&mut self, status: MatchStatus, grid: &Grid) -> TickResult {
        self.state.status = status;
        self.state.faction_counts = grid.faction_counts();
        let final_counts = self.state.faction_counts;
        let outcome = self.mode.is_multiplayer().then(|| final_counts.outcome());

        info!(
            ?status,
            generation = self.state.generation,
            a = final_counts.a,
            b = final_counts.b,
            outcome = ?outcome,
            "Match concluded"
        );

        let termination = Termination {
            status,
            outcome,
            final_counts,
            generation: self.state.generation,
        };
        TickResult::unchanged(self.state, Some(termination))
    }

    /// Back to generation 0, running, with zeroed counts.
    pub fn reset(&mut self) {
        self.state = MatchState::new(self.state.cap);
    }

    /// Back to generation 0 and running, after the board was reseeded.
    ///
    /// Faction counts keep their last value until the next recompute.
    pub const fn restart(&mut self) {
        self.state.generation = 0;
        self.state.status = MatchStatus::Running;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use lifeduel_types::Faction;

    use super::*;

    fn blinker() -> Grid {
        Grid::from_pattern(&[".....", "..A..", "..B..", "..A..", "....."]).unwrap()
    }

    /// Run `ticks` controller ticks, replacing the board as a session would.
    fn run(controller: &mut MatchController, grid: &mut Grid, ticks: usize) -> TickResult {
        let stepper = GenerationStepper::new(controller.mode());
        let mut last = None;
        for _ in 0..ticks {
            let result = controller.tick(&stepper, grid).unwrap();
            if let Some(next) = result.next.clone() {
                *grid = next;
            }
            last = Some(result);
        }
        last.unwrap()
    }

    #[test]
    fn starts_running_at_generation_zero() {
        let controller = MatchController::new(GameMode::Multiplayer, 1000);
        assert_eq!(controller.state().generation, 0);
        assert_eq!(controller.state().cap, Some(1000));
        assert_eq!(controller.state().status, MatchStatus::Running);
    }

    #[test]
    fn single_player_has_no_cap() {
        let controller = MatchController::new(GameMode::Single, 5);
        assert_eq!(controller.state().cap, None);
    }

    #[test]
    fn changed_tick_advances_generation_and_recounts() {
        let mut controller = MatchController::new(GameMode::Multiplayer, 1000);
        let mut grid = blinker();
        let result = run(&mut controller, &mut grid, 1);
        assert!(result.next.is_some());
        assert!(result.termination.is_none());
        assert_eq!(result.state.generation, 1);
        // The middle B survives, the two newborns each have parents A, B, A.
        assert_eq!(result.state.faction_counts, FactionCounts { a: 2, b: 1 });
    }

    #[test]
    fn empty_board_stalls_without_advancing() {
        let mut controller = MatchController::new(GameMode::Multiplayer, 1000);
        let grid = Grid::new(5, 5).unwrap();
        let result = controller
            .tick(&GenerationStepper::new(GameMode::Multiplayer), &grid)
            .unwrap();
        assert!(result.next.is_none());
        assert_eq!(result.state.status, MatchStatus::Stalled);
        assert_eq!(result.state.generation, 0);
        let termination = result.termination.unwrap();
        assert_eq!(termination.outcome, Some(Outcome::Tie));
    }

    #[test]
    fn cap_is_checked_before_stepping() {
        let mut controller = MatchController::new(GameMode::Multiplayer, 5);
        let mut grid = blinker();
        let fifth = run(&mut controller, &mut grid, 5);
        assert_eq!(fifth.state.generation, 5);
        assert_eq!(fifth.state.status, MatchStatus::Running);

        let board_after_fifth = grid.clone();
        let sixth = run(&mut controller, &mut grid, 1);
        assert!(sixth.next.is_none());
        assert_eq!(grid, board_after_fifth);
        assert_eq!(sixth.state.status, MatchStatus::CapReached);
        assert_eq!(sixth.state.generation, 5);

        let termination = sixth.termination.unwrap();
        assert_eq!(termination.final_counts, board_after_fifth.faction_counts());
        assert_eq!(termination.outcome, Some(board_after_fifth.faction_counts().outcome()));
    }

    #[test]
    fn terminal_tick_is_idempotent() {
        let mut controller = MatchController::new(GameMode::Multiplayer, 1000);
        let grid = Grid::from_pattern(&["....", ".AB.", ".BA.", "...."]).unwrap();
        let stepper = GenerationStepper::new(GameMode::Multiplayer);

        let first = controller.tick(&stepper, &grid).unwrap();
        assert_eq!(first.state.status, MatchStatus::Stalled);
        assert!(first.termination.is_some());

        for _ in 0..3 {
            let again = controller.tick(&stepper, &grid).unwrap();
            assert_eq!(again.state, first.state);
            assert!(again.next.is_none());
            assert!(again.termination.is_none());
        }
    }

    #[test]
    fn equal_counts_at_termination_tie() {
        let mut controller = MatchController::new(GameMode::Multiplayer, 1000);
        let grid = Grid::from_pattern(&["....", ".AB.", ".BA.", "...."]).unwrap();
        let result = controller
            .tick(&GenerationStepper::new(GameMode::Multiplayer), &grid)
            .unwrap();
        assert_eq!(result.termination.unwrap().outcome, Some(Outcome::Tie));
    }

    #[test]
    fn larger_faction_wins() {
        let mut controller = MatchController::new(GameMode::Multiplayer, 1000);
        let grid = Grid::from_pattern(&["....", ".AA.", ".BA.", "...."]).unwrap();
        let result = controller
            .tick(&GenerationStepper::new(GameMode::Multiplayer), &grid)
            .unwrap();
        assert_eq!(
            result.termination.unwrap().outcome,
            Some(Outcome::Winner(Faction::A))
        );
    }

    #[test]
    fn single_player_stall_has_no_outcome() {
        let mut controller = MatchController::new(GameMode::Single, 1000);
        let grid = Grid::from_pattern(&["....", ".##.", ".##.", "...."]).unwrap();
        let result = controller
            .tick(&GenerationStepper::new(GameMode::Single), &grid)
            .unwrap();
        let termination = result.termination.unwrap();
        assert_eq!(termination.status, MatchStatus::Stalled);
        assert_eq!(termination.outcome, None);
        assert_eq!(termination.final_counts.a, 4);
    }

    #[test]
    fn reset_restores_initial_state() {
        let mut controller = MatchController::new(GameMode::Multiplayer, 3);
        let mut grid = blinker();
        let _ = run(&mut controller, &mut grid, 4);
        assert_eq!(controller.state().status, MatchStatus::CapReached);

        controller.reset();
        assert_eq!(*controller.state(), MatchState::new(Some(3)));
    }

    #[test]
    fn restart_keeps_stale_counts() {
        let mut controller = MatchController::new(GameMode::Multiplayer, 1000);
        let mut grid = blinker();
        let _ = run(&mut controller, &mut grid, 2);
        let counts = controller.state().faction_counts;

        controller.restart();
        assert_eq!(controller.state().generation, 0);
        assert_eq!(controller.state().status, MatchStatus::Running);
        assert_eq!(controller.state().faction_counts, counts);
    }
}
