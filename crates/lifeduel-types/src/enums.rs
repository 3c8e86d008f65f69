//! Enumeration types for the Life Duel simulation.
//!
//! Cells, factions, game modes, match status, and outcomes. Everything here
//! is `Copy`, serializable, and exported to `TypeScript` for the renderer.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// Factions and cells
// ---------------------------------------------------------------------------

/// One of the two competing sides owning live cells.
///
/// In single-player mode every live cell belongs to [`Faction::A`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum Faction {
    /// Player one (drawn green).
    A,
    /// Player two (drawn orange). Wins tied births.
    B,
}

impl Faction {
    /// Both factions, in attribution order.
    pub const ALL: [Self; 2] = [Self::A, Self::B];

    /// Single-character label used by the ASCII grid format.
    pub const fn symbol(self) -> char {
        match self {
            Self::A => 'A',
            Self::B => 'B',
        }
    }
}

impl core::fmt::Display for Faction {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// State of a single grid position.
///
/// A dead cell carries no faction and a live cell always carries exactly
/// one, so a stale faction on a dead cell cannot be represented.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS,
)]
#[ts(export, export_to = "bindings/")]
pub enum Cell {
    /// No living cell at this position.
    #[default]
    Dead,
    /// A living cell owned by the given faction.
    Alive(Faction),
}

impl Cell {
    /// Whether the cell is alive.
    pub const fn is_alive(self) -> bool {
        matches!(self, Self::Alive(_))
    }

    /// The owning faction, or `None` for a dead cell.
    pub const fn faction(self) -> Option<Faction> {
        match self {
            Self::Dead => None,
            Self::Alive(faction) => Some(faction),
        }
    }
}

// ---------------------------------------------------------------------------
// Game mode
// ---------------------------------------------------------------------------

/// Whether faction attribution and outcome logic are active.
///
/// Fixed for the lifetime of a session.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS,
)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "bindings/")]
pub enum GameMode {
    /// Classic single-player Life: one faction, no cap, no winner.
    Single,
    /// Two-player duel with birth attribution, a generation cap, and an outcome.
    #[default]
    Multiplayer,
}

impl GameMode {
    /// Whether this is the two-player mode.
    pub const fn is_multiplayer(self) -> bool {
        matches!(self, Self::Multiplayer)
    }
}

impl core::fmt::Display for GameMode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Single => write!(f, "single"),
            Self::Multiplayer => write!(f, "multiplayer"),
        }
    }
}

// ---------------------------------------------------------------------------
// Match status and outcome
// ---------------------------------------------------------------------------

/// Lifecycle of a match.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS,
)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum MatchStatus {
    /// Ticks advance the board.
    #[default]
    Running,
    /// The last step changed no cell.
    Stalled,
    /// The generation cap was hit (multiplayer only).
    CapReached,
}

impl MatchStatus {
    /// Whether the match has ended and ticks are no-ops.
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::Running)
    }
}

/// Result of a finished multiplayer match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum Outcome {
    /// The faction with strictly more live cells.
    Winner(Faction),
    /// Both factions ended with the same number of live cells.
    Tie,
}

impl core::fmt::Display for Outcome {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Winner(faction) => write!(f, "faction {faction} wins"),
            Self::Tie => write!(f, "tie"),
        }
    }
}
