//! Shared type definitions for the Life Duel simulation.
//!
//! This crate is the single source of truth for the values exchanged between
//! the simulation core and whatever renders it. Types defined here flow
//! downstream to `TypeScript` via `ts-rs` for the browser board.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe UUID wrappers for session identifiers
//! - [`enums`] -- Cells, factions, game mode, match status, outcomes
//! - [`structs`] -- Match state, renderer stats, and the conclusion event

pub mod enums;
pub mod ids;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{Cell, Faction, GameMode, MatchStatus, Outcome};
pub use ids::SessionId;
pub use structs::{FactionCounts, MatchConclusion, MatchState, MatchStats};
