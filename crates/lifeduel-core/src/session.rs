//! Simulation session: one board, one match, one game mode.
//!
//! [`SimulationSession`] is what a host (UI timer, the [`runner`], tests)
//! talks to. It owns the authoritative [`Grid`] and the
//! [`MatchController`], and exposes tick, reset, randomize, and paint.
//!
//! Every operation takes `&mut self`, so a tick can never overlap a reset,
//! a reseed, or a paint edit. The board is replaced wholesale after the
//! stepper has computed the full next generation.
//!
//! [`runner`]: crate::runner

use chrono::Utc;
use lifeduel_grid::{GenerationStepper, Grid, GridError};
use lifeduel_types::{
    Cell, Faction, GameMode, MatchConclusion, MatchState, MatchStats, SessionId,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, warn};

use crate::controller::{MatchController, MatchError};

/// Generations allowed in a multiplayer match unless configured otherwise.
pub const DEFAULT_GENERATION_CAP: u64 = 1000;

/// Share of cells alive after [`SimulationSession::randomize`] by default.
pub const DEFAULT_LIVE_PROBABILITY: f64 = 0.3;

/// Errors surfaced by session operations.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// A board operation failed, e.g. painting outside the grid.
    #[error("board error: {source}")]
    Grid {
        /// The underlying grid error.
        #[from]
        source: GridError,
    },

    /// A multiplayer-only operation was attempted in single-player mode.
    #[error("{operation} is not available in {mode} mode")]
    InvalidMode {
        /// The rejected operation.
        operation: &'static str,
        /// The session's mode.
        mode: GameMode,
    },

    /// A live probability outside `[0, 1]`.
    #[error("live probability must be within [0, 1], got {value}")]
    InvalidProbability {
        /// The rejected value.
        value: f64,
    },

    /// Advancing the match failed.
    #[error("match error: {source}")]
    Match {
        /// The underlying match error.
        #[from]
        source: MatchError,
    },
}

/// Parameters fixed for the lifetime of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    /// Board height.
    pub rows: usize,
    /// Board width.
    pub cols: usize,
    /// Game mode.
    pub mode: GameMode,
    /// Multiplayer generation cap (ignored in single-player).
    pub generation_cap: u64,
    /// RNG seed for randomize; `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            rows: lifeduel_grid::DEFAULT_ROWS,
            cols: lifeduel_grid::DEFAULT_COLS,
            mode: GameMode::default(),
            generation_cap: DEFAULT_GENERATION_CAP,
            seed: None,
        }
    }
}

/// Outcome of [`SimulationSession::tick`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickReport {
    /// Match state after the tick.
    pub state: MatchState,
    /// Whether the board changed.
    pub advanced: bool,
    /// Emitted exactly once, on the tick that ended the match.
    pub conclusion: Option<MatchConclusion>,
    /// Cells born this tick.
    pub births: u32,
    /// Cells that died this tick.
    pub deaths: u32,
}

/// The composition root: board, stepper, controller, and RNG.
#[derive(Debug)]
pub struct SimulationSession {
    id: SessionId,
    mode: GameMode,
    grid: Grid,
    stepper: GenerationStepper,
    controller: MatchController,
    rng: StdRng,
}

impl SimulationSession {
    /// Allocate an empty board and a fresh match.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Grid`] if the dimensions are invalid.
    pub fn new(config: &SessionConfig) -> Result<Self, SessionError> {
        let grid = Grid::new(config.rows, config.cols)?;
        let rng = config
            .seed
            .map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);
        let session = Self {
            id: SessionId::new(),
            mode: config.mode,
            grid,
            stepper: GenerationStepper::new(config.mode),
            controller: MatchController::new(config.mode, config.generation_cap),
            rng,
        };
        info!(
            session_id = %session.id,
            rows = config.rows,
            cols = config.cols,
            mode = %config.mode,
            cap = ?session.controller.state().cap,
            "Session initialized"
        );
        Ok(session)
    }

    /// Shorthand for [`new`](Self::new) with OS-seeded randomness.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Grid`] if the dimensions are invalid.
    pub fn initialize(
        rows: usize,
        cols: usize,
        mode: GameMode,
        generation_cap: u64,
    ) -> Result<Self, SessionError> {
        Self::new(&SessionConfig {
            rows,
            cols,
            mode,
            generation_cap,
            seed: None,
        })
    }

    // -------------------------------------------------------------------
    // Read side
    // -------------------------------------------------------------------

    /// Session identifier.
    pub const fn id(&self) -> SessionId {
        self.id
    }

    /// Game mode.
    pub const fn mode(&self) -> GameMode {
        self.mode
    }

    /// The current board.
    pub const fn snapshot(&self) -> &Grid {
        &self.grid
    }

    /// The controller's match state.
    pub const fn state(&self) -> &MatchState {
        self.controller.state()
    }

    /// Generation plus counts scanned from the board as it is now, so
    /// paint edits show up before the next tick.
    pub fn stats(&self) -> MatchStats {
        let counts = self.grid.faction_counts();
        MatchStats {
            generation: self.controller.state().generation,
            counts,
            population: counts.total(),
        }
    }

    // -------------------------------------------------------------------
    // Simulation
    // -------------------------------------------------------------------

    /// Advance one generation (or end the match).
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Match`] on an internal stepping failure.
    pub fn tick(&mut self) -> Result<TickReport, SessionError> {
        let result = self.controller.tick(&self.stepper, &self.grid)?;
        let advanced = result.next.is_some();
        if let Some(next) = result.next {
            self.grid = next;
        }

        let conclusion = result.termination.map(|termination| MatchConclusion {
            session_id: self.id,
            status: termination.status,
            outcome: termination.outcome,
            final_counts: termination.final_counts,
            generation: termination.generation,
            ended_at: Utc::now(),
        });

        Ok(TickReport {
            state: result.state,
            advanced,
            conclusion,
            births: result.births,
            deaths: result.deaths,
        })
    }

    /// Kill every cell and restart the match at generation 0.
    pub fn reset(&mut self) {
        self.grid.clear();
        self.controller.reset();
        info!(session_id = %self.id, "Board reset");
    }

    /// Reseed the board: each cell is alive with `live_probability`.
    ///
    /// In multiplayer each live cell independently gets faction A or B with
    /// equal chance. The match restarts at generation 0; faction counts in
    /// the match state refresh on the next tick.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::InvalidProbability`] unless
    /// `0 <= live_probability <= 1`.
    pub fn randomize(&mut self, live_probability: f64) -> Result<(), SessionError> {
        if !(0.0..=1.0).contains(&live_probability) {
            warn!(session_id = %self.id, live_probability, "Rejected randomize");
            return Err(SessionError::InvalidProbability {
                value: live_probability,
            });
        }

        for (row, col) in self.grid.positions() {
            let cell = if self.rng.random_bool(live_probability) {
                Cell::Alive(self.random_faction())
            } else {
                Cell::Dead
            };
            self.grid.set(row, col, cell)?;
        }
        self.controller.restart();

        info!(
            session_id = %self.id,
            live_probability,
            population = self.grid.population(),
            "Board randomized"
        );
        Ok(())
    }

    fn random_faction(&mut self) -> Faction {
        match self.mode {
            GameMode::Single => Faction::A,
            GameMode::Multiplayer => {
                if self.rng.random_bool(0.5) {
                    Faction::A
                } else {
                    Faction::B
                }
            }
        }
    }

    /// Replace the board with `grid` and restart the match from scratch.
    ///
    /// Live cells of faction B are rejected in single-player mode.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Grid`] if the shapes differ, or
    /// [`SessionError::InvalidMode`] for a two-faction board in
    /// single-player mode.
    pub fn load(&mut self, grid: Grid) -> Result<(), SessionError> {
        if !self.grid.same_shape(&grid) {
            return Err(GridError::DimensionMismatch {
                left_rows: self.grid.rows(),
                left_cols: self.grid.cols(),
                right_rows: grid.rows(),
                right_cols: grid.cols(),
            }
            .into());
        }
        if !self.mode.is_multiplayer() && grid.faction_counts().b > 0 {
            return Err(self.invalid_mode("loading a two-faction board"));
        }
        self.grid = grid;
        self.controller.reset();
        info!(session_id = %self.id, population = self.grid.population(), "Board loaded");
        Ok(())
    }

    // -------------------------------------------------------------------
    // Painting
    // -------------------------------------------------------------------

    /// Press-paint a cell.
    ///
    /// Single-player: toggles the cell between dead and alive; `faction`
    /// must be [`Faction::A`]. Multiplayer: stamps `faction` onto a live
    /// cell. Does not advance the generation.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Grid`] outside the board, or
    /// [`SessionError::InvalidMode`] for faction B in single-player.
    pub fn set_cell(
        &mut self,
        row: usize,
        col: usize,
        faction: Faction,
    ) -> Result<Cell, SessionError> {
        let next = match self.mode {
            GameMode::Single => {
                self.require_single_faction(faction)?;
                match self.grid.get(row, col)? {
                    Cell::Dead => Cell::Alive(Faction::A),
                    Cell::Alive(_) => Cell::Dead,
                }
            }
            GameMode::Multiplayer => Cell::Alive(faction),
        };
        self.write(row, col, next)
    }

    /// Drag-paint a cell (pointer entered it while drawing).
    ///
    /// Single-player only revives dead cells so a stroke never erases what
    /// it crosses twice. Multiplayer stamps like [`set_cell`](Self::set_cell).
    ///
    /// # Errors
    ///
    /// Same as [`set_cell`](Self::set_cell).
    pub fn drag_cell(
        &mut self,
        row: usize,
        col: usize,
        faction: Faction,
    ) -> Result<Cell, SessionError> {
        match self.mode {
            GameMode::Single => {
                self.require_single_faction(faction)?;
                let current = self.grid.get(row, col)?;
                if current.is_alive() {
                    return Ok(current);
                }
                self.write(row, col, Cell::Alive(Faction::A))
            }
            GameMode::Multiplayer => self.write(row, col, Cell::Alive(faction)),
        }
    }

    /// Stamp a faction onto a cell. Multiplayer only.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::InvalidMode`] in single-player mode, or
    /// [`SessionError::Grid`] outside the board.
    pub fn paint_faction(
        &mut self,
        row: usize,
        col: usize,
        faction: Faction,
    ) -> Result<Cell, SessionError> {
        if !self.mode.is_multiplayer() {
            return Err(self.invalid_mode("faction paint"));
        }
        self.write(row, col, Cell::Alive(faction))
    }

    fn require_single_faction(&self, faction: Faction) -> Result<(), SessionError> {
        match faction {
            Faction::A => Ok(()),
            Faction::B => Err(self.invalid_mode("faction B paint")),
        }
    }

    fn invalid_mode(&self, operation: &'static str) -> SessionError {
        warn!(session_id = %self.id, operation, mode = %self.mode, "Rejected operation for mode");
        SessionError::InvalidMode {
            operation,
            mode: self.mode,
        }
    }

    fn write(&mut self, row: usize, col: usize, cell: Cell) -> Result<Cell, SessionError> {
        self.grid.set(row, col, cell)?;
        debug!(session_id = %self.id, row, col, ?cell, "Cell painted");
        Ok(cell)
    }
}
