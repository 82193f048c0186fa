//! Array descriptor
//!
//! Immutable description of the whole lamp array, exposed to the host during
//! attribute interrogation.

use crate::attributes::{
    AttributeTable, LampAttributes, LampProfile, MAX_POSITION_MM, build_attribute_table,
};
use crate::color::{OFF, Rgb};
use crate::error::ConfigError;

/// Kind of device the array is part of
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u32)]
pub enum LampArrayKind {
    #[default]
    Undefined = 0,
    Keyboard = 1,
    Mouse = 2,
    GameController = 3,
    Peripheral = 4,
    Scene = 5,
    Notification = 6,
    Chassis = 7,
    Wearable = 8,
    Furniture = 9,
    Art = 10,
}

impl LampArrayKind {
    pub const fn as_raw(self) -> u32 {
        self as u32
    }

    pub const fn from_raw(value: u32) -> Option<Self> {
        Some(match value {
            0 => Self::Undefined,
            1 => Self::Keyboard,
            2 => Self::Mouse,
            3 => Self::GameController,
            4 => Self::Peripheral,
            5 => Self::Scene,
            6 => Self::Notification,
            7 => Self::Chassis,
            8 => Self::Wearable,
            9 => Self::Furniture,
            10 => Self::Art,
            _ => return None,
        })
    }
}

/// Configuration of the lamp array
///
/// All lengths in millimeters, all times in milliseconds.
#[derive(Debug, Clone, Copy)]
pub struct LampArrayConfig {
    pub lamp_count: u16,
    /// Distance between two neighbouring lamps
    pub spacing_mm: u16,
    pub height_mm: u32,
    pub depth_mm: u32,
    pub min_update_interval_ms: u32,
    pub kind: LampArrayKind,
    /// Opaque identity token of the array
    pub identity: u32,
    pub profile: LampProfile,
    /// Color rendered while the host leaves the array in autonomous mode
    pub autonomous_color: Rgb,
}

impl LampArrayConfig {
    /// 19 lamp WS2812 strip with 35 mm pitch, dark when autonomous
    pub const fn reference() -> Self {
        Self {
            lamp_count: 19,
            spacing_mm: 35,
            height_mm: 55,
            depth_mm: 1,
            min_update_interval_ms: 33,
            kind: LampArrayKind::Peripheral,
            identity: 0,
            profile: LampProfile::rgb_accent(4),
            autonomous_color: OFF,
        }
    }

    /// Reference profile with a different layout
    pub const fn with_layout(lamp_count: u16, spacing_mm: u16) -> Self {
        let mut config = Self::reference();
        config.lamp_count = lamp_count;
        config.spacing_mm = spacing_mm;
        config
    }
}

impl Default for LampArrayConfig {
    fn default() -> Self {
        Self::reference()
    }
}

/// Immutable description of the lamp array
///
/// `N` is the number of lamps storage is reserved for.
#[derive(Debug, Clone)]
pub struct ArrayDescriptor<const N: usize> {
    lamp_count: u16,
    bounding_box_width_mm: u32,
    bounding_box_height_mm: u32,
    bounding_box_depth_mm: u32,
    min_update_interval_ms: u32,
    kind: LampArrayKind,
    identity: u32,
    attributes: AttributeTable<N>,
}

impl<const N: usize> ArrayDescriptor<N> {
    /// Build the descriptor and its attribute table
    pub fn new(config: &LampArrayConfig) -> Result<Self, ConfigError> {
        let fits = |value: u32| value <= MAX_POSITION_MM;
        if !fits(config.height_mm)
            || !fits(config.depth_mm)
            || !fits(config.min_update_interval_ms)
            || !fits(config.profile.update_latency_ms)
        {
            return Err(ConfigError::PositionOverflow);
        }

        let attributes =
            build_attribute_table::<N>(config.lamp_count, config.spacing_mm, &config.profile)?;

        Ok(Self {
            lamp_count: config.lamp_count,
            bounding_box_width_mm: u32::from(config.lamp_count) * u32::from(config.spacing_mm),
            bounding_box_height_mm: config.height_mm,
            bounding_box_depth_mm: config.depth_mm,
            min_update_interval_ms: config.min_update_interval_ms,
            kind: config.kind,
            identity: config.identity,
            attributes,
        })
    }

    pub const fn lamp_count(&self) -> u16 {
        self.lamp_count
    }

    pub const fn bounding_box_width_mm(&self) -> u32 {
        self.bounding_box_width_mm
    }

    pub const fn bounding_box_height_mm(&self) -> u32 {
        self.bounding_box_height_mm
    }

    pub const fn bounding_box_depth_mm(&self) -> u32 {
        self.bounding_box_depth_mm
    }

    pub const fn min_update_interval_ms(&self) -> u32 {
        self.min_update_interval_ms
    }

    pub const fn kind(&self) -> LampArrayKind {
        self.kind
    }

    pub const fn identity(&self) -> u32 {
        self.identity
    }

    /// All lamp attributes, ordered by lamp id
    pub fn attributes(&self) -> &[LampAttributes] {
        &self.attributes
    }

    /// Attributes of one lamp
    pub fn lamp(&self, lamp_id: u16) -> Option<&LampAttributes> {
        self.attributes.get(usize::from(lamp_id))
    }
}

/// Build the descriptor of a strip with the reference lamp profile
pub fn initialize_attributes<const N: usize>(
    lamp_count: u16,
    spacing_mm: u16,
) -> Result<ArrayDescriptor<N>, ConfigError> {
    ArrayDescriptor::new(&LampArrayConfig::with_layout(lamp_count, spacing_mm))
}
