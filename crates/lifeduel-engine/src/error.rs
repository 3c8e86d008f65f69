//! Error types for the engine binary.

/// Top-level error for the engine binary.
///
/// Each variant wraps one subsystem so `main` can propagate with `?`.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: lifeduel_core::config::ConfigError,
    },

    /// Session construction or seeding failed.
    #[error("session error: {source}")]
    Session {
        /// The underlying session error.
        #[from]
        source: lifeduel_core::session::SessionError,
    },

    /// The timed match loop failed.
    #[error("runner error: {source}")]
    Runner {
        /// The underlying runner error.
        #[from]
        source: lifeduel_core::runner::RunnerError,
    },
}
