use core::fmt;

/// Invalid lamp array configuration
///
/// Raised once at startup. The control loop must not start after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// The array must have at least one lamp
    ZeroLampCount,
    /// Lamps must be spaced at least one millimeter apart
    ZeroSpacing,
    /// More lamps requested than storage was reserved for
    TooManyLamps { requested: u16, capacity: usize },
    /// A position or dimension does not fit the micrometer wire field
    PositionOverflow,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroLampCount => f.write_str("lamp count must be positive"),
            Self::ZeroSpacing => f.write_str("lamp spacing must be positive"),
            Self::TooManyLamps {
                requested,
                capacity,
            } => write!(f, "{requested} lamps requested, capacity is {capacity}"),
            Self::PositionOverflow => f.write_str("lamp position overflows report field"),
        }
    }
}

impl core::error::Error for ConfigError {}

/// Error bringing up the lamp array controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerError<E> {
    /// The driver addresses fewer lamps than the array describes
    DriverTooShort { lamps: u16, driver: usize },
    /// The physical transport failed
    Driver(E),
}

impl<E: fmt::Display> fmt::Display for ControllerError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DriverTooShort { lamps, driver } => {
                write!(f, "driver addresses {driver} lamps, array has {lamps}")
            }
            Self::Driver(err) => write!(f, "driver error: {err}"),
        }
    }
}

impl<E: fmt::Debug + fmt::Display> core::error::Error for ControllerError<E> {}
