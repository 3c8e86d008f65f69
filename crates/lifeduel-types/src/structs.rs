//! Core structs shared between the simulation core and its consumers.
//!
//! [`MatchState`] is the controller's authoritative view of a match,
//! [`MatchStats`] is the per-tick read model for the renderer, and
//! [`MatchConclusion`] is the one-shot termination event.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{Faction, MatchStatus, Outcome};
use crate::ids::SessionId;

// ---------------------------------------------------------------------------
// Faction counts
// ---------------------------------------------------------------------------

/// Live-cell tally per faction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct FactionCounts {
    /// Live cells owned by [`Faction::A`].
    pub a: u32,
    /// Live cells owned by [`Faction::B`].
    pub b: u32,
}

impl FactionCounts {
    /// Count for a single faction.
    pub const fn get(&self, faction: Faction) -> u32 {
        match faction {
            Faction::A => self.a,
            Faction::B => self.b,
        }
    }

    /// Add one live cell for `faction`. Saturates at `u32::MAX`.
    pub const fn increment(&mut self, faction: Faction) {
        match faction {
            Faction::A => self.a = self.a.saturating_add(1),
            Faction::B => self.b = self.b.saturating_add(1),
        }
    }

    /// Total live cells across both factions.
    pub const fn total(&self) -> u32 {
        self.a.saturating_add(self.b)
    }

    /// Outcome implied by these counts: strictly greater wins, equal ties.
    pub const fn outcome(&self) -> Outcome {
        if self.a > self.b {
            Outcome::Winner(Faction::A)
        } else if self.b > self.a {
            Outcome::Winner(Faction::B)
        } else {
            Outcome::Tie
        }
    }
}

impl FromIterator<Faction> for FactionCounts {
    fn from_iter<I: IntoIterator<Item = Faction>>(iter: I) -> Self {
        let mut counts = Self::default();
        for faction in iter {
            counts.increment(faction);
        }
        counts
    }
}

// ---------------------------------------------------------------------------
// Match state
// ---------------------------------------------------------------------------

/// The controller's view of a match in progress.
///
/// `faction_counts` is recomputed after each advancing tick and at
/// termination; board edits between ticks are not reflected until then.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct MatchState {
    /// Number of generations that changed the board since the last reset.
    pub generation: u64,
    /// Maximum generation before forced termination. `None` in single-player.
    pub cap: Option<u64>,
    /// Live cells per faction as of the last recompute.
    pub faction_counts: FactionCounts,
    /// Lifecycle status.
    pub status: MatchStatus,
}

impl MatchState {
    /// A fresh running match at generation 0.
    pub const fn new(cap: Option<u64>) -> Self {
        Self {
            generation: 0,
            cap,
            faction_counts: FactionCounts { a: 0, b: 0 },
            status: MatchStatus::Running,
        }
    }

    /// Whether the cap (if any) forbids another step.
    pub const fn cap_reached(&self) -> bool {
        match self.cap {
            Some(cap) => self.generation >= cap,
            None => false,
        }
    }
}

/// Read-only statistics for the renderer, scanned from the live board.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct MatchStats {
    /// Current generation.
    pub generation: u64,
    /// Live cells per faction on the board right now.
    pub counts: FactionCounts,
    /// Total live cells.
    pub population: u32,
}

/// One-shot event emitted when a match leaves [`MatchStatus::Running`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct MatchConclusion {
    /// Session that produced the match.
    pub session_id: SessionId,
    /// Terminal status ([`MatchStatus::Stalled`] or [`MatchStatus::CapReached`]).
    pub status: MatchStatus,
    /// Winner or tie. Always `None` in single-player mode.
    pub outcome: Option<Outcome>,
    /// Live cells per faction at termination.
    pub final_counts: FactionCounts,
    /// Generation at termination.
    pub generation: u64,
    /// Wall-clock time the match ended.
    pub ended_at: DateTime<Utc>,
}
