//! Host protocol side of the device
//!
//! The USB stack hands every SET_FEATURE/OUTPUT report to [`dispatch_report`]
//! and every GET_FEATURE request to [`AttributeInterrogator::get_feature`].
//! Color and mode reports travel through a [`ReportQueue`] to the
//! [`HostLampState`] the control loop queries.

mod interrogator;
mod lamp_state;
mod queue;

pub use interrogator::AttributeInterrogator;
pub use lamp_state::{HostLampState, StateError};
pub use queue::{QueueFull, ReportQueue, ReportReceiver, ReportSender};

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::report::{HostReport, ReportError};

/// Route one raw host report
///
/// Attribute requests are answered right away by the interrogator; color and
/// mode reports are queued for the control loop. A full queue drops the
/// report, the loop picks up the drop count on its next drain.
pub fn dispatch_report<const N: usize, const Q: usize>(
    bytes: &[u8],
    interrogator: &mut AttributeInterrogator<'_, N>,
    reports: &ReportSender<'_, Q>,
) -> Result<(), ReportError> {
    match HostReport::decode(bytes)? {
        HostReport::AttributesRequest { lamp_id } => interrogator.request(lamp_id),
        report => {
            if reports.try_send(report).is_err() {
                #[cfg(feature = "esp32-log")]
                println!("[dispatch_report] queue full, report dropped");
            }
        }
    }
    Ok(())
}
