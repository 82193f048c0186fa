//! Cycle scheduling and timing utilities.
//!
//! Paces reconciliation cycles at the array's minimum update interval without
//! async/await or platform-specific timers. The caller is responsible for
//! sleeping/waiting between cycles.

use embassy_time::{Duration, Instant};

use crate::controller::{CycleReport, LampArrayController};
use crate::driver::PixelDriver;
use crate::state::LampStateSource;

/// Result of a scheduler tick.
#[derive(Debug, Clone, Copy)]
pub struct CycleTiming<E> {
    /// The deadline for the next cycle.
    pub next_deadline: Instant,
    /// How long to wait until the next cycle (zero if behind schedule).
    pub sleep_duration: Duration,
    /// Outcome of the cycle that just ran.
    pub report: Result<CycleReport, E>,
}

/// Portable cycle scheduler.
///
/// Owns the controller together with the state source it polls.
///
/// # Usage
///
/// ```ignore
/// let mut scheduler = CycleScheduler::new(controller, host_state);
///
/// loop {
///     let now = Instant::from_millis(get_current_time_ms());
///     let timing = scheduler.tick(now);
///
///     // Platform-specific sleep
///     sleep_ms(timing.sleep_duration.as_millis());
/// }
/// ```
pub struct CycleScheduler<S, D: PixelDriver, const N: usize> {
    controller: LampArrayController<D, N>,
    source: S,
    next_cycle: Option<Instant>,
    period: Duration,
}

impl<S: LampStateSource, D: PixelDriver, const N: usize> CycleScheduler<S, D, N> {
    /// Create a scheduler running at the descriptor's minimum update interval.
    pub fn new(controller: LampArrayController<D, N>, source: S) -> Self {
        let interval = controller.descriptor().min_update_interval_ms();
        Self::with_period(controller, source, Duration::from_millis(u64::from(interval)))
    }

    /// Create a scheduler with a custom cycle period.
    pub fn with_period(controller: LampArrayController<D, N>, source: S, period: Duration) -> Self {
        Self {
            controller,
            source,
            next_cycle: None,
            period,
        }
    }

    pub const fn period(&self) -> Duration {
        self.period
    }

    /// Run one cycle and return timing information.
    ///
    /// The first tick starts the schedule at `now`. Falling more than two
    /// periods behind resets the schedule instead of running a burst of
    /// catch-up cycles.
    pub fn tick(&mut self, now: Instant) -> CycleTiming<D::Error> {
        let max_drift = self.period + self.period;
        let mut next_cycle = match self.next_cycle {
            Some(next) if now <= next + max_drift => next,
            _ => now,
        };

        let report = self.controller.run_cycle(&mut self.source);

        next_cycle += self.period;
        self.next_cycle = Some(next_cycle);

        let sleep_duration = if next_cycle > now {
            next_cycle - now
        } else {
            Duration::from_millis(0)
        };

        CycleTiming {
            next_deadline: next_cycle,
            sleep_duration,
            report,
        }
    }

    /// Get a reference to the controller.
    pub const fn controller(&self) -> &LampArrayController<D, N> {
        &self.controller
    }

    /// Get a reference to the state source.
    pub const fn source(&self) -> &S {
        &self.source
    }

    /// Get a mutable reference to the state source.
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }
}
