#![no_std]

pub mod attributes;
pub mod color;
pub mod controller;
pub mod descriptor;
pub mod driver;
pub mod error;
pub mod host;
pub mod report;
pub mod scheduler;
pub mod state;

pub use attributes::{LampAttributes, LampProfile, LampPurposes, build_attribute_table};
pub use controller::{CycleReport, LampArrayController};
pub use descriptor::{ArrayDescriptor, LampArrayConfig, LampArrayKind, initialize_attributes};
pub use driver::{PixelDriver, SmartLedsDriver};
pub use error::{ConfigError, ControllerError};
pub use host::{AttributeInterrogator, HostLampState, ReportQueue, dispatch_report};
pub use report::{HostReport, ReportError};
pub use scheduler::{CycleScheduler, CycleTiming};
pub use state::{LampArrayMode, LampStateSource};

pub use color::{ChannelOrder, PackedColor, Rgb};
pub use embassy_time::{Duration, Instant};
