//! Lamp array reconciliation
//!
//! Every cycle the controller asks the protocol side for the wanted lamp
//! state, compares it with what the strip last showed and pushes the
//! difference in a single batched write.

use heapless::Vec;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::color::{OFF, PackedColor, Rgb};
use crate::descriptor::ArrayDescriptor;
use crate::driver::PixelDriver;
use crate::error::ControllerError;
use crate::state::{LampArrayMode, LampStateSource};

/// Outcome of one reconciliation cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleReport {
    /// Mode the cycle rendered
    pub mode: LampArrayMode,
    /// Number of lamps whose color changed
    pub changed: u16,
    /// The state query failed and the cycle fell back to autonomous mode
    pub query_failed: bool,
}

impl CycleReport {
    /// Whether the cycle wrote to the hardware
    pub const fn flushed(&self) -> bool {
        self.changed > 0
    }
}

/// Lamp Array controller - owns the strip and its descriptor
///
/// `N` is the number of lamps storage is reserved for.
pub struct LampArrayController<D: PixelDriver, const N: usize> {
    // External dependencies and configuration
    driver: D,
    descriptor: ArrayDescriptor<N>,
    autonomous_color: PackedColor,

    // Last colors the strip actually showed
    shown: Vec<PackedColor, N>,
    // Per-cycle scratch for the host-requested colors
    requested: Vec<Rgb, N>,
}

impl<D: PixelDriver, const N: usize> LampArrayController<D, N> {
    /// Take ownership of the strip and bring it into a known state
    ///
    /// The strip is initialized, cleared, filled with the autonomous color
    /// and shown once, whatever it displayed before. A driver addressing
    /// fewer lamps than the descriptor is rejected before any hardware access.
    pub fn new(
        descriptor: ArrayDescriptor<N>,
        mut driver: D,
        autonomous_color: Rgb,
    ) -> Result<Self, ControllerError<D::Error>> {
        let lamp_count = usize::from(descriptor.lamp_count());
        if driver.len() < lamp_count {
            return Err(ControllerError::DriverTooShort {
                lamps: descriptor.lamp_count(),
                driver: driver.len(),
            });
        }
        let autonomous_color = PackedColor::pack(autonomous_color, driver.channel_order());

        driver.initialize().map_err(ControllerError::Driver)?;
        driver.clear();
        for index in 0..lamp_count {
            driver.set_color(index, autonomous_color);
        }
        driver.show().map_err(ControllerError::Driver)?;

        #[cfg(feature = "esp32-log")]
        println!(
            "[LampArrayController.new] {} lamps primed to {:#08x}",
            lamp_count,
            autonomous_color.raw()
        );

        // One entry per attribute record, which already fits in `N`
        let shown: Vec<PackedColor, N> = descriptor
            .attributes()
            .iter()
            .map(|_| autonomous_color)
            .collect();
        let requested: Vec<Rgb, N> = descriptor.attributes().iter().map(|_| OFF).collect();

        Ok(Self {
            driver,
            descriptor,
            autonomous_color,
            shown,
            requested,
        })
    }

    pub const fn descriptor(&self) -> &ArrayDescriptor<N> {
        &self.descriptor
    }

    pub const fn driver(&self) -> &D {
        &self.driver
    }

    /// Get a mutable reference to the driver
    ///
    /// Colors staged through it are not tracked as shown.
    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }

    /// Packed color rendered in autonomous mode
    pub const fn autonomous_color(&self) -> PackedColor {
        self.autonomous_color
    }

    /// Colors the strip showed after the last successful write
    pub fn shown(&self) -> &[PackedColor] {
        &self.shown
    }

    /// Run one reconciliation cycle
    ///
    /// At most one hardware write happens per cycle, and none when no lamp
    /// changed. A failed write is returned; the driver is re-staged with the
    /// shown colors so the next cycle diffs against what the strip displays.
    pub fn run_cycle<S: LampStateSource>(&mut self, source: &mut S) -> Result<CycleReport, D::Error> {
        let (mode, query_failed) = match source.query_state(&mut self.requested) {
            Ok(mode) => (mode, false),
            Err(_) => {
                #[cfg(feature = "esp32-log")]
                println!("[LampArrayController.run_cycle] state query failed, rendering autonomous");
                (LampArrayMode::Autonomous, true)
            }
        };

        let order = self.driver.channel_order();
        let mut changed: u16 = 0;
        for (index, (shown, requested)) in self.shown.iter().zip(&self.requested).enumerate() {
            let target = match mode {
                LampArrayMode::Autonomous => self.autonomous_color,
                LampArrayMode::HostControlled => PackedColor::pack(*requested, order),
            };
            if target != *shown {
                self.driver.set_color(index, target);
                changed += 1;
            }
        }

        if changed > 0 {
            if let Err(err) = self.driver.show() {
                #[cfg(feature = "esp32-log")]
                println!("[LampArrayController.run_cycle] show failed, {} lamps pending", changed);
                self.restage_shown();
                return Err(err);
            }
            self.commit_shown();
        }

        Ok(CycleReport {
            mode,
            changed,
            query_failed,
        })
    }

    /// Put the shown colors back into the driver after a failed write
    fn restage_shown(&mut self) {
        for (index, shown) in self.shown.iter().enumerate() {
            if self.driver.color(index) != Some(*shown) {
                self.driver.set_color(index, *shown);
            }
        }
    }

    /// Record the staged driver colors as shown
    fn commit_shown(&mut self) {
        for (index, shown) in self.shown.iter_mut().enumerate() {
            if let Some(color) = self.driver.color(index) {
                *shown = color;
            }
        }
    }
}
