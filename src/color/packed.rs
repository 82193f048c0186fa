//! Packed transport colors
//!
//! The physical transport stores one 32-bit word per lamp. The word keeps the
//! three 8-bit channels in the order the strip expects them on the wire:
//! first channel in bits 16..24, second in 8..16, third in 0..8. The top byte
//! is always zero.

use super::Rgb;

/// Order of the color channels expected by the physical strip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChannelOrder {
    #[default]
    Rgb,
    Rbg,
    Grb,
    Gbr,
    Brg,
    Bgr,
}

impl ChannelOrder {
    /// Reorder an RGB triple into wire-slot order
    #[inline]
    pub const fn arrange(self, color: Rgb) -> [u8; 3] {
        let Rgb { r, g, b } = color;
        match self {
            Self::Rgb => [r, g, b],
            Self::Rbg => [r, b, g],
            Self::Grb => [g, r, b],
            Self::Gbr => [g, b, r],
            Self::Brg => [b, r, g],
            Self::Bgr => [b, g, r],
        }
    }

    /// Restore an RGB triple from wire-slot order
    #[inline]
    pub const fn restore(self, slots: [u8; 3]) -> Rgb {
        let [first, second, third] = slots;
        let (r, g, b) = match self {
            Self::Rgb => (first, second, third),
            Self::Rbg => (first, third, second),
            Self::Grb => (second, first, third),
            Self::Gbr => (third, first, second),
            Self::Brg => (second, third, first),
            Self::Bgr => (third, second, first),
        };
        Rgb { r, g, b }
    }
}

/// Native color word of the physical transport
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PackedColor(u32);

impl PackedColor {
    /// All channels off, identical in every channel order
    pub const OFF: Self = Self(0);

    /// Pack a color for a strip with the given channel order
    ///
    /// Channel values are passed through unchanged.
    pub const fn pack(color: Rgb, order: ChannelOrder) -> Self {
        Self::from_slots(order.arrange(color))
    }

    /// Build a word from channels already in wire-slot order
    pub const fn from_slots(slots: [u8; 3]) -> Self {
        let [first, second, third] = slots;
        Self(((first as u32) << 16) | ((second as u32) << 8) | third as u32)
    }

    /// Build a word from its raw value, dropping the unused top byte
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw & 0x00FF_FFFF)
    }

    /// Raw 32-bit value
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Channels in wire-slot order
    #[allow(clippy::cast_possible_truncation)]
    pub const fn slots(self) -> [u8; 3] {
        [(self.0 >> 16) as u8, (self.0 >> 8) as u8, self.0 as u8]
    }

    /// Unpack back to RGB for a strip with the given channel order
    pub const fn unpack(self, order: ChannelOrder) -> Rgb {
        order.restore(self.slots())
    }
}
