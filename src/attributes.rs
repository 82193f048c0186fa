//! Static per-lamp attributes
//!
//! Built once at startup from the lamp count and the physical spacing.
//! These records describe the hardware and never change afterwards.

use heapless::Vec;

use crate::error::ConfigError;
use crate::report::MICROS_PER_MILLI;

/// Semantic purposes of a lamp, as a bit set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LampPurposes(u32);

impl LampPurposes {
    pub const CONTROL: Self = Self(0x01);
    pub const ACCENT: Self = Self(0x02);
    pub const BRANDING: Self = Self(0x04);
    pub const STATUS: Self = Self(0x08);
    pub const ILLUMINATION: Self = Self(0x10);
    pub const PRESENTATION: Self = Self(0x20);

    pub const fn bits(self) -> u32 {
        self.0
    }

    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

/// Capabilities shared by every lamp of the strip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LampProfile {
    /// Worst-case time until a written color becomes visible
    pub update_latency_ms: u32,
    pub purposes: LampPurposes,
    pub red_levels: u8,
    pub green_levels: u8,
    pub blue_levels: u8,
    /// One level means no independent brightness control
    pub intensity_levels: u8,
    pub is_programmable: bool,
    /// Input binding, unused by lamps that are not keys
    pub key: u8,
}

impl LampProfile {
    /// Full 8-bit RGB accent lamp without intensity control
    pub const fn rgb_accent(update_latency_ms: u32) -> Self {
        Self {
            update_latency_ms,
            purposes: LampPurposes::ACCENT,
            red_levels: 0xFF,
            green_levels: 0xFF,
            blue_levels: 0xFF,
            intensity_levels: 0x01,
            is_programmable: true,
            key: 0x00,
        }
    }
}

/// Attributes of a single lamp
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LampAttributes {
    pub lamp_id: u16,
    pub position_x_mm: u32,
    pub position_y_mm: u32,
    pub position_z_mm: u32,
    pub update_latency_ms: u32,
    pub purposes: LampPurposes,
    pub red_levels: u8,
    pub green_levels: u8,
    pub blue_levels: u8,
    pub intensity_levels: u8,
    pub is_programmable: bool,
    pub key: u8,
}

/// Owned attribute storage with room for `N` lamps
pub type AttributeTable<const N: usize> = Vec<LampAttributes, N>;

/// Largest length in millimeters that still fits the micrometer wire field
pub(crate) const MAX_POSITION_MM: u32 = u32::MAX / MICROS_PER_MILLI;

/// Check lamp count and spacing against the capacity `N`
pub(crate) fn validate_layout<const N: usize>(
    lamp_count: u16,
    spacing_mm: u16,
) -> Result<(), ConfigError> {
    if lamp_count == 0 {
        return Err(ConfigError::ZeroLampCount);
    }
    if spacing_mm == 0 {
        return Err(ConfigError::ZeroSpacing);
    }
    if usize::from(lamp_count) > N {
        return Err(ConfigError::TooManyLamps {
            requested: lamp_count,
            capacity: N,
        });
    }
    // The last lamp sits furthest out, at `lamp_count * spacing`
    let extent = u32::from(lamp_count) * u32::from(spacing_mm);
    if extent > MAX_POSITION_MM {
        return Err(ConfigError::PositionOverflow);
    }
    Ok(())
}

/// Build the attribute table for a linear strip
///
/// Lamp `i` gets id `i` and sits at `X = (i + 1) * spacing`, with `Y = Z = 0`.
pub fn build_attribute_table<const N: usize>(
    lamp_count: u16,
    spacing_mm: u16,
    profile: &LampProfile,
) -> Result<AttributeTable<N>, ConfigError> {
    validate_layout::<N>(lamp_count, spacing_mm)?;

    let mut table = AttributeTable::<N>::new();
    for lamp_id in 0..lamp_count {
        let attributes = LampAttributes {
            lamp_id,
            position_x_mm: (u32::from(lamp_id) + 1) * u32::from(spacing_mm),
            position_y_mm: 0,
            position_z_mm: 0,
            update_latency_ms: profile.update_latency_ms,
            purposes: profile.purposes,
            red_levels: profile.red_levels,
            green_levels: profile.green_levels,
            blue_levels: profile.blue_levels,
            intensity_levels: profile.intensity_levels,
            is_programmable: profile.is_programmable,
            key: profile.key,
        };
        table
            .push(attributes)
            .map_err(|_| ConfigError::TooManyLamps {
                requested: lamp_count,
                capacity: N,
            })?;
    }

    Ok(table)
}
