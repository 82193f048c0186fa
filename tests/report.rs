mod tests {
    use myrtio_lamp_array::report::{
        ARRAY_ATTRIBUTES_LEN, ATTRIBUTES_RESPONSE_LEN, LampUpdateFlags, MULTI_UPDATE_LEN,
        encode_array_attributes, encode_lamp_attributes,
    };
    use myrtio_lamp_array::{ArrayDescriptor, HostReport, LampArrayConfig, ReportError, Rgb};

    fn reference() -> ArrayDescriptor<32> {
        ArrayDescriptor::new(&LampArrayConfig::reference()).unwrap()
    }

    #[test]
    fn test_encode_array_attributes() {
        let mut buf = [0u8; 64];
        let len = encode_array_attributes(&reference(), &mut buf).unwrap();
        assert_eq!(len, ARRAY_ATTRIBUTES_LEN);
        assert_eq!(
            &buf[..len],
            &[
                0x01, // report id
                0x13, 0x00, // 19 lamps
                0xA8, 0x25, 0x0A, 0x00, // 665 mm
                0xD8, 0xD6, 0x00, 0x00, // 55 mm
                0xE8, 0x03, 0x00, 0x00, // 1 mm
                0x04, 0x00, 0x00, 0x00, // peripheral
                0xE8, 0x80, 0x00, 0x00, // 33 ms
            ]
        );
    }

    #[test]
    fn test_encode_lamp_attributes() {
        let descriptor = reference();
        let mut buf = [0u8; ATTRIBUTES_RESPONSE_LEN];
        let len = encode_lamp_attributes(descriptor.lamp(0).unwrap(), &mut buf).unwrap();
        assert_eq!(len, ATTRIBUTES_RESPONSE_LEN);
        assert_eq!(
            buf,
            [
                0x03, // report id
                0x00, 0x00, // lamp 0
                0xB8, 0x88, 0x00, 0x00, // x = 35 mm
                0x00, 0x00, 0x00, 0x00, // y
                0x00, 0x00, 0x00, 0x00, // z
                0xA0, 0x0F, 0x00, 0x00, // 4 ms latency
                0x02, 0x00, 0x00, 0x00, // accent
                0xFF, 0xFF, 0xFF, 0x01, // level counts
                0x01, // programmable
                0x00, // key
            ]
        );
    }

    #[test]
    fn test_encode_into_short_buffer() {
        let mut buf = [0u8; 10];
        assert_eq!(
            encode_array_attributes(&reference(), &mut buf),
            Err(ReportError::BufferTooSmall {
                required: ARRAY_ATTRIBUTES_LEN,
                available: 10
            })
        );
    }

    #[test]
    fn test_decode_attributes_request() {
        assert_eq!(
            HostReport::decode(&[0x02, 0x05, 0x01]),
            Ok(HostReport::AttributesRequest { lamp_id: 0x0105 })
        );
    }

    #[test]
    fn test_decode_array_control() {
        assert_eq!(
            HostReport::decode(&[0x06, 0x01]),
            Ok(HostReport::ArrayControl { autonomous: true })
        );
        assert_eq!(
            HostReport::decode(&[0x06, 0x00, 0xAA]),
            Ok(HostReport::ArrayControl { autonomous: false })
        );
    }

    #[test]
    fn test_decode_range_update_drops_intensity() {
        let report = HostReport::decode(&[0x05, 0x01, 0x02, 0x00, 0x04, 0x00, 10, 20, 30, 99]);
        let Ok(HostReport::RangeUpdate(update)) = report else {
            panic!("unexpected {report:?}");
        };
        assert!(update.flags.is_complete());
        assert_eq!(update.lamp_id_start, 2);
        assert_eq!(update.lamp_id_end, 4);
        assert_eq!(update.color, Rgb::new(10, 20, 30));
    }

    #[test]
    fn test_decode_multi_update_uses_announced_count() {
        let mut bytes = [0u8; MULTI_UPDATE_LEN];
        bytes[0] = 0x04;
        bytes[1] = 2; // lamps
        bytes[2] = 0x00; // not complete
        bytes[3..5].copy_from_slice(&7u16.to_le_bytes());
        bytes[5..7].copy_from_slice(&300u16.to_le_bytes());
        bytes[19..23].copy_from_slice(&[1, 2, 3, 0]);
        bytes[23..27].copy_from_slice(&[4, 5, 6, 0]);
        // Slot past the announced count carries noise
        bytes[27..31].copy_from_slice(&[7, 8, 9, 0]);

        let Ok(HostReport::MultiUpdate(update)) = HostReport::decode(&bytes) else {
            panic!("expected multi update");
        };
        assert!(!update.flags.is_complete());
        let updates: Vec<_> = update.updates().collect();
        assert_eq!(updates, vec![(7, Rgb::new(1, 2, 3)), (300, Rgb::new(4, 5, 6))]);
    }

    #[test]
    fn test_decode_errors() {
        assert_eq!(HostReport::decode(&[]), Err(ReportError::Empty));
        assert_eq!(
            HostReport::decode(&[0x01, 0x00]),
            Err(ReportError::UnknownReportId(0x01))
        );
        assert_eq!(
            HostReport::decode(&[0x05, 0x01, 0x00]),
            Err(ReportError::Truncated {
                expected: 10,
                actual: 3
            })
        );

        let mut bytes = [0u8; MULTI_UPDATE_LEN];
        bytes[0] = 0x04;
        bytes[1] = 9;
        assert_eq!(
            HostReport::decode(&bytes),
            Err(ReportError::InvalidLampCount(9))
        );
    }

    #[test]
    fn test_update_flags() {
        assert!(LampUpdateFlags::COMPLETE.is_complete());
        assert!(LampUpdateFlags::from_bits(0x81).is_complete());
        assert!(!LampUpdateFlags::from_bits(0x80).is_complete());
    }
}
