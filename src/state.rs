//! Mode and per-lamp state query
//!
//! The protocol side of the device answers this once per cycle.

use crate::color::Rgb;

/// Who decides what the array renders
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LampArrayMode {
    /// The device renders its own default color
    Autonomous,
    /// The host supplies a color for every lamp
    HostControlled,
}

impl LampArrayMode {
    pub const fn is_autonomous(self) -> bool {
        matches!(self, Self::Autonomous)
    }
}

/// Source of the host-requested lamp state
///
/// Implementations must return without blocking. A source that cannot answer
/// in bounded time should give up and return an error; the controller then
/// renders the autonomous color for that cycle.
pub trait LampStateSource {
    type Error;

    /// Report the current mode and, when host controlled, fill `colors`
    ///
    /// `colors` holds one entry per lamp. Its content is ignored when the
    /// returned mode is [`LampArrayMode::Autonomous`].
    fn query_state(&mut self, colors: &mut [Rgb]) -> Result<LampArrayMode, Self::Error>;
}

impl<S: LampStateSource + ?Sized> LampStateSource for &mut S {
    type Error = S::Error;

    fn query_state(&mut self, colors: &mut [Rgb]) -> Result<LampArrayMode, Self::Error> {
        (**self).query_state(colors)
    }
}
