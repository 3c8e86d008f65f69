//! Shared tick-schedule control for a running match.
//!
//! [`ScheduleControl`] is wrapped in an [`Arc`](std::sync::Arc) and shared
//! between the [`runner`](crate::runner) loop and whatever drives it (a UI
//! thread, a signal handler, a test). Pause, resume, stop, and speed changes
//! are plain atomics so the loop never takes a lock.
//!
//! Speed follows the game's slider: a value in `[10, 500]` maps to a tick
//! interval of `510 - value` milliseconds, so a higher slider is faster.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use tokio::sync::Notify;

use crate::config::ScheduleConfig;

/// Lowest accepted slider value.
pub const MIN_SPEED: u64 = 10;

/// Highest accepted slider value.
pub const MAX_SPEED: u64 = 500;

/// Slider values map to `SPEED_OFFSET_MS - value` milliseconds.
const SPEED_OFFSET_MS: u64 = 510;

/// Shortest tick interval, reached at [`MAX_SPEED`].
pub const MIN_TICK_INTERVAL_MS: u64 = SPEED_OFFSET_MS - MAX_SPEED;

/// Tick interval for a speed slider value, or `None` outside
/// `[MIN_SPEED, MAX_SPEED]`.
pub const fn interval_for_speed(speed: u64) -> Option<u64> {
    if speed < MIN_SPEED || speed > MAX_SPEED {
        return None;
    }
    SPEED_OFFSET_MS.checked_sub(speed)
}

/// Pause, stop, and speed state shared with the tick loop.
#[derive(Debug)]
pub struct ScheduleControl {
    paused: AtomicBool,
    resume_notify: Notify,
    stop_requested: AtomicBool,
    tick_interval_ms: AtomicU64,
    started_at: DateTime<Utc>,
    /// 0 = unlimited.
    max_ticks: u64,
}

impl ScheduleControl {
    /// Create a control block, running, at the given interval.
    pub fn new(tick_interval_ms: u64, max_ticks: u64) -> Self {
        Self {
            paused: AtomicBool::new(false),
            resume_notify: Notify::new(),
            stop_requested: AtomicBool::new(false),
            tick_interval_ms: AtomicU64::new(tick_interval_ms.max(MIN_TICK_INTERVAL_MS)),
            started_at: Utc::now(),
            max_ticks,
        }
    }

    /// Create a control block from the `schedule` config section.
    pub fn from_config(config: &ScheduleConfig) -> Self {
        Self::new(config.tick_interval_ms, config.max_ticks)
    }

    // -----------------------------------------------------------------------
    // Pause / Resume
    // -----------------------------------------------------------------------

    /// Whether ticking is paused.
    pub fn is_paused(&self) -> bool {
        self.paused.load(Ordering::Acquire)
    }

    /// Pause ticking. The board stays as it is.
    pub fn pause(&self) {
        self.paused.store(true, Ordering::Release);
    }

    /// Resume ticking and wake the loop.
    pub fn resume(&self) {
        self.paused.store(false, Ordering::Release);
        self.resume_notify.notify_one();
    }

    /// Wait until ticking is no longer paused or a stop is requested.
    pub async fn wait_if_paused(&self) {
        while self.is_paused() && !self.is_stop_requested() {
            self.resume_notify.notified().await;
        }
    }

    // -----------------------------------------------------------------------
    // Stop
    // -----------------------------------------------------------------------

    /// Ask the loop to exit after the current tick.
    pub fn request_stop(&self) {
        self.stop_requested.store(true, Ordering::Release);
        self.resume_notify.notify_one();
    }

    /// Whether a stop has been requested.
    pub fn is_stop_requested(&self) -> bool {
        self.stop_requested.load(Ordering::Acquire)
    }

    // -----------------------------------------------------------------------
    // Speed
    // -----------------------------------------------------------------------

    /// Current tick interval in milliseconds.
    pub fn tick_interval_ms(&self) -> u64 {
        self.tick_interval_ms.load(Ordering::Acquire)
    }

    /// Set the tick interval directly.
    ///
    /// Returns the previous interval, or `None` if `ms` is below
    /// [`MIN_TICK_INTERVAL_MS`].
    pub fn set_tick_interval_ms(&self, ms: u64) -> Option<u64> {
        if ms < MIN_TICK_INTERVAL_MS {
            return None;
        }
        Some(self.tick_interval_ms.swap(ms, Ordering::AcqRel))
    }

    /// Apply a speed slider value. Returns the new interval, or `None` if
    /// the value is out of range and nothing changed.
    pub fn set_speed(&self, speed: u64) -> Option<u64> {
        let interval = interval_for_speed(speed)?;
        self.tick_interval_ms.store(interval, Ordering::Release);
        Some(interval)
    }

    // -----------------------------------------------------------------------
    // Bounds
    // -----------------------------------------------------------------------

    /// `true` once `ticks` reaches a non-zero `max_ticks`.
    pub const fn tick_limit_reached(&self, ticks: u64) -> bool {
        self.max_ticks > 0 && ticks >= self.max_ticks
    }

    /// Configured tick bound (0 = unlimited).
    pub const fn max_ticks(&self) -> u64 {
        self.max_ticks
    }

    /// Wall-clock start time.
    pub const fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Seconds since start, clamped at zero.
    pub fn elapsed_seconds(&self) -> u64 {
        let elapsed = Utc::now()
            .signed_duration_since(self.started_at)
            .num_seconds();
        u64::try_from(elapsed.max(0)).unwrap_or(u64::MAX)
    }
}

impl Default for ScheduleControl {
    fn default() -> Self {
        Self::from_config(&ScheduleConfig::default())
    }
}
