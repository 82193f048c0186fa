//! HID LampArray report codec
//!
//! Feature and output reports of the LampArray usage page (HID Usage Tables,
//! section 26). All multi-byte fields are little-endian. Lengths travel in
//! micrometers and times in microseconds; the rest of the crate works in
//! millimeters and milliseconds.

use core::fmt;

use crate::attributes::LampAttributes;
use crate::color::Rgb;
use crate::descriptor::ArrayDescriptor;

/// Conversion factor between the model units and the wire units
pub const MICROS_PER_MILLI: u32 = 1000;

pub const REPORT_ID_ARRAY_ATTRIBUTES: u8 = 1;
pub const REPORT_ID_ATTRIBUTES_REQUEST: u8 = 2;
pub const REPORT_ID_ATTRIBUTES_RESPONSE: u8 = 3;
pub const REPORT_ID_MULTI_UPDATE: u8 = 4;
pub const REPORT_ID_RANGE_UPDATE: u8 = 5;
pub const REPORT_ID_ARRAY_CONTROL: u8 = 6;

/// Report lengths, report id byte included
pub const ARRAY_ATTRIBUTES_LEN: usize = 23;
pub const ATTRIBUTES_REQUEST_LEN: usize = 3;
pub const ATTRIBUTES_RESPONSE_LEN: usize = 29;
pub const MULTI_UPDATE_LEN: usize = 51;
pub const RANGE_UPDATE_LEN: usize = 10;
pub const ARRAY_CONTROL_LEN: usize = 2;

/// Number of lamp slots in one multi-update report
pub const MULTI_UPDATE_SLOTS: usize = 8;

/// Error while encoding or decoding a report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportError {
    /// No bytes at all, not even a report id
    Empty,
    UnknownReportId(u8),
    Truncated { expected: usize, actual: usize },
    BufferTooSmall { required: usize, available: usize },
    /// Multi-update announcing more lamps than it has slots for
    InvalidLampCount(u8),
}

impl fmt::Display for ReportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("empty report"),
            Self::UnknownReportId(id) => write!(f, "unknown report id {id}"),
            Self::Truncated { expected, actual } => {
                write!(f, "report truncated: expected {expected} bytes, got {actual}")
            }
            Self::BufferTooSmall {
                required,
                available,
            } => write!(f, "buffer too small: need {required} bytes, have {available}"),
            Self::InvalidLampCount(count) => write!(f, "invalid multi-update lamp count {count}"),
        }
    }
}

impl core::error::Error for ReportError {}

/// Flags attached to color updates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LampUpdateFlags(u8);

impl LampUpdateFlags {
    /// The host finished this frame, staged colors may be shown
    pub const COMPLETE: Self = Self(0x01);

    pub const fn from_bits(bits: u8) -> Self {
        Self(bits)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn is_complete(self) -> bool {
        self.0 & Self::COMPLETE.0 != 0
    }
}

/// Colors for up to eight individual lamps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LampMultiUpdate {
    pub flags: LampUpdateFlags,
    lamp_count: u8,
    lamp_ids: [u16; MULTI_UPDATE_SLOTS],
    colors: [Rgb; MULTI_UPDATE_SLOTS],
}

impl LampMultiUpdate {
    /// Lamp ids paired with their requested color
    pub fn updates(&self) -> impl Iterator<Item = (u16, Rgb)> + '_ {
        let count = usize::from(self.lamp_count);
        self.lamp_ids[..count]
            .iter()
            .copied()
            .zip(self.colors[..count].iter().copied())
    }
}

/// One color for an inclusive range of lamps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LampRangeUpdate {
    pub flags: LampUpdateFlags,
    pub lamp_id_start: u16,
    pub lamp_id_end: u16,
    pub color: Rgb,
}

/// Report sent by the host to the device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostReport {
    /// Select the lamp the next attributes response describes
    AttributesRequest { lamp_id: u16 },
    MultiUpdate(LampMultiUpdate),
    RangeUpdate(LampRangeUpdate),
    /// Enter or leave autonomous mode
    ArrayControl { autonomous: bool },
}

impl HostReport {
    /// Decode a host report, starting with its report id
    ///
    /// Trailing bytes beyond the report length are ignored. The intensity
    /// channel is dropped, the lamps have a single intensity level.
    pub fn decode(bytes: &[u8]) -> Result<Self, ReportError> {
        let (&report_id, _) = bytes.split_first().ok_or(ReportError::Empty)?;
        let expected = match report_id {
            REPORT_ID_ATTRIBUTES_REQUEST => ATTRIBUTES_REQUEST_LEN,
            REPORT_ID_MULTI_UPDATE => MULTI_UPDATE_LEN,
            REPORT_ID_RANGE_UPDATE => RANGE_UPDATE_LEN,
            REPORT_ID_ARRAY_CONTROL => ARRAY_CONTROL_LEN,
            other => return Err(ReportError::UnknownReportId(other)),
        };
        if bytes.len() < expected {
            return Err(ReportError::Truncated {
                expected,
                actual: bytes.len(),
            });
        }

        let mut reader = Reader::new(&bytes[1..expected]);
        let report = match report_id {
            REPORT_ID_ATTRIBUTES_REQUEST => Self::AttributesRequest {
                lamp_id: reader.u16(),
            },
            REPORT_ID_MULTI_UPDATE => {
                let lamp_count = reader.u8();
                if usize::from(lamp_count) > MULTI_UPDATE_SLOTS {
                    return Err(ReportError::InvalidLampCount(lamp_count));
                }
                let flags = LampUpdateFlags::from_bits(reader.u8());
                let mut lamp_ids = [0; MULTI_UPDATE_SLOTS];
                for id in &mut lamp_ids {
                    *id = reader.u16();
                }
                let mut colors = [Rgb::default(); MULTI_UPDATE_SLOTS];
                for color in &mut colors {
                    *color = reader.color();
                }
                Self::MultiUpdate(LampMultiUpdate {
                    flags,
                    lamp_count,
                    lamp_ids,
                    colors,
                })
            }
            REPORT_ID_RANGE_UPDATE => Self::RangeUpdate(LampRangeUpdate {
                flags: LampUpdateFlags::from_bits(reader.u8()),
                lamp_id_start: reader.u16(),
                lamp_id_end: reader.u16(),
                color: reader.color(),
            }),
            _ => Self::ArrayControl {
                autonomous: reader.u8() != 0,
            },
        };

        Ok(report)
    }
}

/// Encode the LampArrayAttributes feature report
pub fn encode_array_attributes<const N: usize>(
    descriptor: &ArrayDescriptor<N>,
    buf: &mut [u8],
) -> Result<usize, ReportError> {
    let mut writer = Writer::new(buf, ARRAY_ATTRIBUTES_LEN)?;
    writer.u8(REPORT_ID_ARRAY_ATTRIBUTES);
    writer.u16(descriptor.lamp_count());
    writer.u32(to_micros(descriptor.bounding_box_width_mm()));
    writer.u32(to_micros(descriptor.bounding_box_height_mm()));
    writer.u32(to_micros(descriptor.bounding_box_depth_mm()));
    writer.u32(descriptor.kind().as_raw());
    writer.u32(to_micros(descriptor.min_update_interval_ms()));
    Ok(writer.finish())
}

/// Encode the LampAttributesResponse feature report for one lamp
pub fn encode_lamp_attributes(
    attributes: &LampAttributes,
    buf: &mut [u8],
) -> Result<usize, ReportError> {
    let mut writer = Writer::new(buf, ATTRIBUTES_RESPONSE_LEN)?;
    writer.u8(REPORT_ID_ATTRIBUTES_RESPONSE);
    writer.u16(attributes.lamp_id);
    writer.u32(to_micros(attributes.position_x_mm));
    writer.u32(to_micros(attributes.position_y_mm));
    writer.u32(to_micros(attributes.position_z_mm));
    writer.u32(to_micros(attributes.update_latency_ms));
    writer.u32(attributes.purposes.bits());
    writer.u8(attributes.red_levels);
    writer.u8(attributes.green_levels);
    writer.u8(attributes.blue_levels);
    writer.u8(attributes.intensity_levels);
    writer.u8(u8::from(attributes.is_programmable));
    writer.u8(attributes.key);
    Ok(writer.finish())
}

/// Descriptor construction keeps every value small enough to not saturate
const fn to_micros(value: u32) -> u32 {
    value.saturating_mul(MICROS_PER_MILLI)
}

/// Reader over a slice whose length was checked up front
struct Reader<'a> {
    bytes: &'a [u8],
}

impl<'a> Reader<'a> {
    const fn new(bytes: &'a [u8]) -> Self {
        Self { bytes }
    }

    fn take<const L: usize>(&mut self) -> [u8; L] {
        let mut out = [0; L];
        let (head, tail) = self.bytes.split_at(L.min(self.bytes.len()));
        out[..head.len()].copy_from_slice(head);
        self.bytes = tail;
        out
    }

    fn u8(&mut self) -> u8 {
        self.take::<1>()[0]
    }

    fn u16(&mut self) -> u16 {
        u16::from_le_bytes(self.take())
    }

    fn color(&mut self) -> Rgb {
        let [r, g, b, _intensity] = self.take::<4>();
        Rgb { r, g, b }
    }
}

/// Writer into a buffer already checked to hold the whole report
struct Writer<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl<'a> Writer<'a> {
    fn new(buf: &'a mut [u8], required: usize) -> Result<Self, ReportError> {
        if buf.len() < required {
            return Err(ReportError::BufferTooSmall {
                required,
                available: buf.len(),
            });
        }
        Ok(Self { buf, pos: 0 })
    }

    fn put(&mut self, bytes: &[u8]) {
        let end = self.pos + bytes.len();
        self.buf[self.pos..end].copy_from_slice(bytes);
        self.pos = end;
    }

    fn u8(&mut self, value: u8) {
        self.put(&[value]);
    }

    fn u16(&mut self, value: u16) {
        self.put(&value.to_le_bytes());
    }

    fn u32(&mut self, value: u32) {
        self.put(&value.to_le_bytes());
    }

    fn finish(self) -> usize {
        self.pos
    }
}
