//! Little-endian integer packing and hex rendering for wire fields.

use byteorder::{ByteOrder, LittleEndian};

/// Packs `value` into the 2-byte little-endian form used for request payloads.
#[inline]
pub fn u16_to_le_bytes(value: u16) -> [u8; 2] {
    let mut bytes = [0; 2];
    LittleEndian::write_u16(&mut bytes, value);
    bytes
}

/// Reads a little-endian u16 from the first two bytes of `bytes`.
#[inline]
pub fn le_u16(bytes: &[u8]) -> u16 {
    LittleEndian::read_u16(bytes)
}

/// Reads a 24-bit little-endian value (lowest byte first) from the first three bytes of `bytes`.
#[inline]
pub fn le_u24(bytes: &[u8]) -> u32 {
    LittleEndian::read_u24(bytes)
}

/// Renders bytes as upper-case hex pairs in the order given.
pub fn to_upper_hex(bytes: &[u8]) -> String {
    hex::encode_upper(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pwm_payload_is_little_endian() {
        assert_eq!(u16_to_le_bytes(660), [0x94, 0x02]);
        assert_eq!(u16_to_le_bytes(0), [0x00, 0x00]);
    }

    #[test]
    fn reads_error_code_low_byte_first() {
        assert_eq!(le_u16(&[3, 5]), 1283);
    }

    #[test]
    fn reads_descriptor_length() {
        assert_eq!(le_u24(&[0x03, 0x00, 0x00]), 3);
        assert_eq!(le_u24(&[0x01, 0x02, 0x03]), 0x030201);
    }

    #[test]
    fn hex_keeps_byte_order() {
        assert_eq!(to_upper_hex(&[0xA8, 0x05, 0xE2]), "A805E2");
    }
}
