//! Match observer that reports progress through `tracing`.
//!
//! Every tick is logged at `debug`; the conclusion is logged at `info`,
//! once as structured fields and once as a JSON line a renderer or script
//! can consume.

use lifeduel_core::runner::MatchObserver;
use lifeduel_core::session::TickReport;
use lifeduel_grid::Grid;
use lifeduel_types::MatchConclusion;
use tracing::{debug, info, warn};

/// Observer that logs ticks and the final result.
#[derive(Debug, Default)]
pub struct LogObserver {
    ticks_seen: u64,
    /// Log the full board at `debug` every this many ticks (0 = never).
    board_every: u64,
}

impl LogObserver {
    /// Create an observer that also dumps the board every `board_every`
    /// ticks at `debug` level.
    pub const fn new(board_every: u64) -> Self {
        Self {
            ticks_seen: 0,
            board_every,
        }
    }

    /// Ticks observed so far.
    pub const fn ticks_seen(&self) -> u64 {
        self.ticks_seen
    }

    fn should_dump_board(&self) -> bool {
        self.ticks_seen
            .checked_rem(self.board_every)
            .is_some_and(|rem| rem == 0)
    }
}

impl MatchObserver for LogObserver {
    fn on_tick(&mut self, report: &TickReport, board: &Grid) {
        self.ticks_seen = self.ticks_seen.saturating_add(1);
        debug!(
            generation = report.state.generation,
            advanced = report.advanced,
            births = report.births,
            deaths = report.deaths,
            a = report.state.faction_counts.a,
            b = report.state.faction_counts.b,
            "Tick"
        );
        if self.should_dump_board() {
            debug!(generation = report.state.generation, "Board\n{board}");
        }
    }

    fn on_conclusion(&mut self, conclusion: &MatchConclusion) {
        info!(
            session_id = %conclusion.session_id,
            status = ?conclusion.status,
            generation = conclusion.generation,
            a = conclusion.final_counts.a,
            b = conclusion.final_counts.b,
            outcome = ?conclusion.outcome,
            "Match over"
        );
        match serde_json::to_string(conclusion) {
            Ok(json) => info!(conclusion = %json, "Conclusion"),
            Err(e) => warn!(error = %e, "failed to serialize conclusion"),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use lifeduel_core::session::{SessionConfig, SimulationSession};
    use lifeduel_types::GameMode;

    use super::*;

    #[test]
    fn counts_ticks_and_dumps_on_schedule() {
        let mut session = SimulationSession::new(&SessionConfig {
            rows: 4,
            cols: 4,
            mode: GameMode::Multiplayer,
            generation_cap: 10,
            seed: Some(1),
        })
        .unwrap();
        let mut observer = LogObserver::new(2);

        let report = session.tick().unwrap();
        observer.on_tick(&report, session.snapshot());
        assert!(!observer.should_dump_board());
        observer.on_tick(&report, session.snapshot());
        assert!(observer.should_dump_board());
        assert_eq!(observer.ticks_seen(), 2);

        observer.on_conclusion(&report.conclusion.unwrap());
    }

    #[test]
    fn zero_interval_never_dumps() {
        let observer = LogObserver::default();
        assert!(!observer.should_dump_board());
    }
}
