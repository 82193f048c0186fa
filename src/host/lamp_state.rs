//! Host-requested lamp state
//!
//! Collects color updates from the host and answers the per-cycle state
//! query. Colors are staged until the host marks an update complete, so a
//! frame split across several reports is never shown half-written.

use core::fmt;

use heapless::Vec;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use super::queue::ReportReceiver;
use crate::color::{OFF, Rgb};
use crate::descriptor::ArrayDescriptor;
use crate::report::{HostReport, LampMultiUpdate, LampRangeUpdate};
use crate::state::{LampArrayMode, LampStateSource};

/// Error answering a state query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateError {
    /// The caller's color buffer does not have one entry per lamp
    LengthMismatch { expected: usize, actual: usize },
}

impl fmt::Display for StateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LengthMismatch { expected, actual } => {
                write!(f, "expected {expected} lamp colors, got {actual}")
            }
        }
    }
}

impl core::error::Error for StateError {}

/// Lamp state driven by host reports
///
/// `N` is the lamp capacity, `Q` the size of the report queue.
pub struct HostLampState<'a, const N: usize, const Q: usize> {
    reports: ReportReceiver<'a, Q>,
    autonomous: bool,
    staged: Vec<Rgb, N>,
    current: Vec<Rgb, N>,
    dropped_reports: u32,
}

impl<'a, const N: usize, const Q: usize> HostLampState<'a, N, Q> {
    /// Create the state for every lamp of `descriptor`
    ///
    /// Starts in autonomous mode with every lamp off.
    pub fn new(descriptor: &ArrayDescriptor<N>, reports: ReportReceiver<'a, Q>) -> Self {
        let staged: Vec<Rgb, N> = descriptor.attributes().iter().map(|_| OFF).collect();
        let current = staged.clone();
        Self {
            reports,
            autonomous: true,
            staged,
            current,
            dropped_reports: 0,
        }
    }

    pub fn lamp_count(&self) -> usize {
        self.current.len()
    }

    pub const fn is_autonomous(&self) -> bool {
        self.autonomous
    }

    /// Reports lost to a full queue since startup
    pub const fn dropped_reports(&self) -> u32 {
        self.dropped_reports
    }

    /// Colors committed by the last complete update
    pub fn colors(&self) -> &[Rgb] {
        &self.current
    }

    /// Apply every queued report (non-blocking)
    ///
    /// Returns the number of reports applied.
    pub fn process_pending(&mut self) -> usize {
        let mut processed = 0;
        while let Some(report) = self.reports.try_receive() {
            self.apply(&report);
            processed += 1;
        }

        let dropped = self.reports.take_dropped();
        if dropped > 0 {
            self.dropped_reports = self.dropped_reports.saturating_add(dropped);
            #[cfg(feature = "esp32-log")]
            println!("[HostLampState.process_pending] {} reports dropped", dropped);
        }

        processed
    }

    /// Apply one host report
    ///
    /// Attribute requests belong to the interrogator and are ignored here.
    pub fn apply(&mut self, report: &HostReport) {
        match report {
            HostReport::MultiUpdate(update) => self.apply_multi(update),
            HostReport::RangeUpdate(update) => self.apply_range(update),
            HostReport::ArrayControl { autonomous } => {
                #[cfg(feature = "esp32-log")]
                if self.autonomous != *autonomous {
                    println!("[HostLampState.apply] autonomous mode: {}", autonomous);
                }
                self.autonomous = *autonomous;
            }
            HostReport::AttributesRequest { .. } => {}
        }
    }

    fn apply_multi(&mut self, update: &LampMultiUpdate) {
        for (lamp_id, color) in update.updates() {
            // Unknown lamps are skipped, the rest of the report still applies
            if let Some(slot) = self.staged.get_mut(usize::from(lamp_id)) {
                *slot = color;
            }
        }
        if update.flags.is_complete() {
            self.commit();
        }
    }

    fn apply_range(&mut self, update: &LampRangeUpdate) {
        let start = usize::from(update.lamp_id_start);
        let end = usize::from(update.lamp_id_end);
        if start <= end && end < self.staged.len() {
            self.staged[start..=end].fill(update.color);
        }
        if update.flags.is_complete() {
            self.commit();
        }
    }

    fn commit(&mut self) {
        self.current.clone_from(&self.staged);
    }
}

impl<const N: usize, const Q: usize> LampStateSource for HostLampState<'_, N, Q> {
    type Error = StateError;

    fn query_state(&mut self, colors: &mut [Rgb]) -> Result<LampArrayMode, Self::Error> {
        self.process_pending();

        if colors.len() != self.current.len() {
            return Err(StateError::LengthMismatch {
                expected: self.current.len(),
                actual: colors.len(),
            });
        }
        if self.autonomous {
            return Ok(LampArrayMode::Autonomous);
        }

        colors.copy_from_slice(&self.current);
        Ok(LampArrayMode::HostControlled)
    }
}
