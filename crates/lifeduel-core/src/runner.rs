//! Timed match loop with pause, speed, and stop controls.
//!
//! [`run_match`] stands in for the game's interval timer: it ticks a
//! [`SimulationSession`] every `tick_interval_ms` until the match ends, the
//! configured tick bound is hit, or a stop is requested through the shared
//! [`ScheduleControl`]. Each tick is reported to a [`MatchObserver`].

use std::sync::Arc;
use std::time::Duration;

use lifeduel_grid::Grid;
use lifeduel_types::{MatchConclusion, MatchState};
use tracing::{info, warn};

use crate::schedule::ScheduleControl;
use crate::session::{SessionError, SimulationSession, TickReport};

/// Errors that can occur during a timed run.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// A session tick failed.
    #[error("session error: {source}")]
    Session {
        /// The underlying session error.
        #[from]
        source: SessionError,
    },
}

/// Why the loop returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunEndReason {
    /// The match stalled or hit its generation cap.
    MatchConcluded,
    /// The schedule's `max_ticks` bound was reached.
    MaxTicksReached,
    /// A stop was requested.
    OperatorStop,
}

/// Result of a timed run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Why the run ended.
    pub end_reason: RunEndReason,
    /// The conclusion, when the match ended during this run.
    pub conclusion: Option<MatchConclusion>,
    /// Ticks executed by this run.
    pub total_ticks: u64,
    /// Match state when the loop returned.
    pub final_state: MatchState,
}

/// Receives per-tick reports from [`run_match`].
pub trait MatchObserver: Send {
    /// Called after every tick with the report and the board after it.
    fn on_tick(&mut self, report: &TickReport, board: &Grid);

    /// Called once when the match concludes.
    fn on_conclusion(&mut self, _conclusion: &MatchConclusion) {}
}

/// Observer that ignores everything.
pub struct NoOpObserver;

impl MatchObserver for NoOpObserver {
    fn on_tick(&mut self, _report: &TickReport, _board: &Grid) {}
}

/// Tick `session` on a timer until something ends the run.
///
/// A session whose match is already over returns immediately with
/// [`RunEndReason::MatchConcluded`] and no ticks.
///
/// # Errors
///
/// Returns [`RunnerError`] if a tick fails.
pub async fn run_match(
    session: &mut SimulationSession,
    control: &Arc<ScheduleControl>,
    observer: &mut dyn MatchObserver,
) -> Result<RunSummary, RunnerError> {
    let mut total_ticks: u64 = 0;

    if session.state().status.is_terminal() {
        warn!(status = ?session.state().status, "Match already over, nothing to run");
        return Ok(summary(session, RunEndReason::MatchConcluded, None, 0));
    }

    info!(
        session_id = %session.id(),
        mode = %session.mode(),
        tick_interval_ms = control.tick_interval_ms(),
        max_ticks = control.max_ticks(),
        "Match starting"
    );

    loop {
        if control.is_paused() {
            info!("Match paused, waiting for resume...");
            control.wait_if_paused().await;
            info!("Match resumed");
        }

        if control.is_stop_requested() {
            info!(total_ticks, "Stop requested");
            return Ok(summary(session, RunEndReason::OperatorStop, None, total_ticks));
        }

        let report = session.tick()?;
        total_ticks = total_ticks.saturating_add(1);
        observer.on_tick(&report, session.snapshot());

        if let Some(conclusion) = report.conclusion {
            observer.on_conclusion(&conclusion);
            return Ok(summary(
                session,
                RunEndReason::MatchConcluded,
                Some(conclusion),
                total_ticks,
            ));
        }

        if control.tick_limit_reached(total_ticks) {
            info!(total_ticks, max_ticks = control.max_ticks(), "Tick limit reached");
            return Ok(summary(
                session,
                RunEndReason::MaxTicksReached,
                None,
                total_ticks,
            ));
        }

        let interval_ms = control.tick_interval_ms();
        if interval_ms > 0 {
            tokio::time::sleep(Duration::from_millis(interval_ms)).await;
        }
    }
}

fn summary(
    session: &SimulationSession,
    end_reason: RunEndReason,
    conclusion: Option<MatchConclusion>,
    total_ticks: u64,
) -> RunSummary {
    RunSummary {
        end_reason,
        conclusion,
        total_ticks,
        final_state: *session.state(),
    }
}

/// Log how a run ended.
pub fn log_run_end(summary: &RunSummary) {
    info!(
        reason = ?summary.end_reason,
        total_ticks = summary.total_ticks,
        generation = summary.final_state.generation,
        status = ?summary.final_state.status,
        "Run ended"
    );

    match summary.conclusion {
        Some(ref conclusion) => match conclusion.outcome {
            Some(outcome) => info!(
                %outcome,
                a = conclusion.final_counts.a,
                b = conclusion.final_counts.b,
                "Final result"
            ),
            None => info!(population = conclusion.final_counts.total(), "Final result"),
        },
        None if summary.total_ticks == 0 => warn!("Run ended with no ticks executed"),
        None => {}
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use lifeduel_types::{Faction, GameMode, MatchStatus, Outcome};

    use super::*;
    use crate::schedule::MIN_TICK_INTERVAL_MS;
    use crate::session::SessionConfig;

    #[derive(Default)]
    struct Recorder {
        ticks: u64,
        conclusions: Vec<MatchConclusion>,
    }

    impl MatchObserver for Recorder {
        fn on_tick(&mut self, _report: &TickReport, _board: &Grid) {
            self.ticks = self.ticks.saturating_add(1);
        }

        fn on_conclusion(&mut self, conclusion: &MatchConclusion) {
            self.conclusions.push(conclusion.clone());
        }
    }

    fn session_with(mode: GameMode, cap: u64, pattern: &[&str]) -> SimulationSession {
        let grid = Grid::from_pattern(pattern).unwrap();
        let mut session = SimulationSession::new(&SessionConfig {
            rows: grid.rows(),
            cols: grid.cols(),
            mode,
            generation_cap: cap,
            seed: Some(7),
        })
        .unwrap();
        session.load(grid).unwrap();
        session
    }

    fn blinker(mode: GameMode, cap: u64) -> SimulationSession {
        session_with(mode, cap, &[".....", "..A..", "..A..", "..A..", "....."])
    }

    #[tokio::test]
    async fn runs_until_generation_cap() {
        let mut session = blinker(GameMode::Multiplayer, 4);
        let control = Arc::new(ScheduleControl::new(MIN_TICK_INTERVAL_MS, 0));
        let mut recorder = Recorder::default();

        let result = run_match(&mut session, &control, &mut recorder).await.unwrap();

        assert_eq!(result.end_reason, RunEndReason::MatchConcluded);
        assert_eq!(result.total_ticks, 5);
        assert_eq!(result.final_state.status, MatchStatus::CapReached);
        assert_eq!(result.final_state.generation, 4);
        assert_eq!(recorder.ticks, 5);
        assert_eq!(recorder.conclusions.len(), 1);
        assert_eq!(
            recorder.conclusions.first().unwrap().outcome,
            Some(Outcome::Winner(Faction::A))
        );
    }

    #[tokio::test]
    async fn max_ticks_bounds_an_oscillator() {
        let mut session = blinker(GameMode::Single, 1000);
        let control = Arc::new(ScheduleControl::new(MIN_TICK_INTERVAL_MS, 3));

        let result = run_match(&mut session, &control, &mut NoOpObserver).await.unwrap();

        assert_eq!(result.end_reason, RunEndReason::MaxTicksReached);
        assert_eq!(result.total_ticks, 3);
        assert_eq!(result.final_state.status, MatchStatus::Running);
        assert!(result.conclusion.is_none());
    }

    #[tokio::test]
    async fn stop_before_first_tick() {
        let mut session = blinker(GameMode::Multiplayer, 1000);
        let control = Arc::new(ScheduleControl::new(MIN_TICK_INTERVAL_MS, 0));
        control.request_stop();

        let result = run_match(&mut session, &control, &mut NoOpObserver).await.unwrap();

        assert_eq!(result.end_reason, RunEndReason::OperatorStop);
        assert_eq!(result.total_ticks, 0);
        assert_eq!(session.state().generation, 0);
    }

    #[tokio::test]
    async fn stalled_match_reports_once() {
        let mut session = session_with(GameMode::Multiplayer, 1000, &["....", ".AB.", ".BA.", "...."]);
        let control = Arc::new(ScheduleControl::new(MIN_TICK_INTERVAL_MS, 0));
        let mut recorder = Recorder::default();

        let result = run_match(&mut session, &control, &mut recorder).await.unwrap();
        assert_eq!(result.total_ticks, 1);
        assert_eq!(result.conclusion.unwrap().outcome, Some(Outcome::Tie));

        let again = run_match(&mut session, &control, &mut recorder).await.unwrap();
        assert_eq!(again.total_ticks, 0);
        assert_eq!(again.end_reason, RunEndReason::MatchConcluded);
        assert_eq!(recorder.conclusions.len(), 1);
    }

    #[test]
    fn log_run_end_handles_empty_runs() {
        let session = blinker(GameMode::Single, 10);
        log_run_end(&summary(&session, RunEndReason::OperatorStop, None, 0));
    }
}
