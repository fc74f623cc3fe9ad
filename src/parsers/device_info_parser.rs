use crate::answers::*;
use crate::base::{AnswerDecoder, Error, Result};
use crate::types::DeviceInfo;
use log::{error, trace};

impl AnswerDecoder for DeviceInfo {
    const NAME: &'static str = "device info";
    const SIZE: usize = RPLIDAR_DEVINFO_ANSWER_SIZE;

    fn decode(buf: &[u8]) -> Result<DeviceInfo> {
        if buf.len() != Self::SIZE {
            error!("Device info has {} bytes, expected {}", buf.len(), Self::SIZE);
            return Err(Error::UnexpectedLength {
                what: Self::NAME,
                expected: Self::SIZE,
                actual: buf.len(),
            });
        }

        let mut serial_number = [0u8; 16];
        serial_number.copy_from_slice(&buf[RPLIDAR_DEVINFO_SERIAL_OFFSET..]);

        let info = DeviceInfo {
            model: buf[0],
            firmware_minor: buf[1],
            firmware_major: buf[2],
            hardware: buf[3],
            serial_number,
        };
        trace!("Decoded device info: {}", info);
        Ok(info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_offsets() {
        let raw: Vec<u8> = (1..=20).collect();
        let info = DeviceInfo::decode(&raw).unwrap();
        assert_eq!(info.model, 1);
        assert_eq!(info.firmware_minor, 2);
        assert_eq!(info.firmware_major, 3);
        assert_eq!(info.firmware(), "3.2");
        assert_eq!(info.hardware, 4);
        assert_eq!(info.serial_number_hex(), "05060708090A0B0C0D0E0F1011121314");
    }

    #[test]
    fn real_device() {
        let raw = [
            40, 24, 1, 4, 168, 226, 154, 240, 197, 226, 157, 210, 182, 227, 157, 245, 43, 49, 49,
            22,
        ];
        let info = DeviceInfo::decode(&raw).unwrap();
        assert_eq!(info.model, 40);
        assert_eq!(info.firmware(), "1.24");
        assert_eq!(info.hardware, 4);
        assert_eq!(info.serial_number_hex(), "A8E29AF0C5E29DD2B6E39DF52B313116");
    }

    #[test]
    fn wrong_size() {
        assert!(matches!(
            DeviceInfo::decode(&[0; 19]),
            Err(Error::UnexpectedLength {
                expected: 20,
                actual: 19,
                ..
            })
        ));
    }
}
