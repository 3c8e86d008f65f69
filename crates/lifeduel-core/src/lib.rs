//! Match rules, session orchestration, and tick scheduling for Life Duel.
//!
//! This crate sits on top of [`lifeduel_grid`]: it decides when a match
//! ends and who wins, owns the authoritative board, and drives it on a
//! timer.
//!
//! # Modules
//!
//! - [`config`] -- Configuration loading from `lifeduel-config.yaml` into
//!   strongly-typed structs.
//! - [`controller`] -- [`MatchController`]: generation clock, cap and stall
//!   detection, scoring.
//! - [`runner`] -- [`run_match`]: the timed loop and [`MatchObserver`].
//! - [`schedule`] -- [`ScheduleControl`]: pause, resume, speed, and stop.
//! - [`session`] -- [`SimulationSession`]: the composition root hosts talk
//!   to.
//!
//! [`MatchController`]: controller::MatchController
//! [`run_match`]: runner::run_match
//! [`MatchObserver`]: runner::MatchObserver
//! [`ScheduleControl`]: schedule::ScheduleControl
//! [`SimulationSession`]: session::SimulationSession

pub mod config;
pub mod controller;
pub mod runner;
pub mod schedule;
pub mod session;
