//! Attribute interrogation
//!
//! The host reads lamp attributes one lamp at a time: it selects a lamp with
//! an attributes request, then reads responses. Every response read moves
//! the cursor to the next lamp, wrapping at the end of the array.

use crate::attributes::LampAttributes;
use crate::descriptor::ArrayDescriptor;
use crate::report::{
    REPORT_ID_ARRAY_ATTRIBUTES, REPORT_ID_ATTRIBUTES_RESPONSE, ReportError,
    encode_array_attributes, encode_lamp_attributes,
};

/// Answers the host's attribute feature reports
pub struct AttributeInterrogator<'d, const N: usize> {
    descriptor: &'d ArrayDescriptor<N>,
    cursor: u16,
}

impl<'d, const N: usize> AttributeInterrogator<'d, N> {
    pub const fn new(descriptor: &'d ArrayDescriptor<N>) -> Self {
        Self {
            descriptor,
            cursor: 0,
        }
    }

    /// Lamp the next response describes
    pub const fn cursor(&self) -> u16 {
        self.cursor
    }

    /// Select the lamp for the next response
    ///
    /// Unknown lamp ids restart interrogation from the first lamp.
    pub fn request(&mut self, lamp_id: u16) {
        self.cursor = if lamp_id < self.descriptor.lamp_count() {
            lamp_id
        } else {
            0
        };
    }

    /// Attributes under the cursor, advancing it
    pub fn next_attributes(&mut self) -> &'d LampAttributes {
        let attributes = self.descriptor.attributes();
        // A descriptor always holds at least one lamp
        let lamp = &attributes[usize::from(self.cursor) % attributes.len()];
        self.cursor = (self.cursor + 1) % self.descriptor.lamp_count();
        lamp
    }

    /// Answer a GET_FEATURE request for `report_id`
    ///
    /// Returns the number of bytes written into `buf`.
    pub fn get_feature(&mut self, report_id: u8, buf: &mut [u8]) -> Result<usize, ReportError> {
        match report_id {
            REPORT_ID_ARRAY_ATTRIBUTES => encode_array_attributes(self.descriptor, buf),
            REPORT_ID_ATTRIBUTES_RESPONSE => {
                let lamp = self.next_attributes();
                encode_lamp_attributes(lamp, buf)
            }
            other => Err(ReportError::UnknownReportId(other)),
        }
    }
}
