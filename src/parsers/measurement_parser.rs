use crate::answers::*;
use crate::base::{AnswerDecoder, Error, Result, ScanRecordFault};
use crate::types::ScanRecord;
use log::error;

/// Start flag and inverted start flag must differ.
#[inline]
pub fn has_valid_start_bits(b0: u8) -> bool {
    let start = b0 & RPLIDAR_RESP_MEASUREMENT_SYNCBIT;
    let inverted = (b0 & RPLIDAR_RESP_MEASUREMENT_SYNCBIT_INVERTED) >> 1;
    start ^ inverted == 1
}

#[inline]
pub fn has_check_bit(b1: u8) -> bool {
    b1 & RPLIDAR_RESP_MEASUREMENT_CHECKBIT == RPLIDAR_RESP_MEASUREMENT_CHECKBIT
}

/// Q6 angle: byte 2 supplies the high 8 bits, byte 1 the low 7.
#[inline]
pub fn angle_q6(b1: u8, b2: u8) -> u16 {
    ((b2 as u16) << RPLIDAR_RESP_MEASUREMENT_ANGLE_HIGH_SHIFT)
        + ((b1 >> RPLIDAR_RESP_MEASUREMENT_ANGLE_SHIFT) as u16)
}

#[inline]
pub fn distance_q2(b3: u8, b4: u8) -> u16 {
    ((b4 as u16) << 8) + b3 as u16
}

impl AnswerDecoder for ScanRecord {
    const NAME: &'static str = "scan record";
    const SIZE: usize = RPLIDAR_MEASUREMENT_NODE_SIZE;

    fn decode(buf: &[u8]) -> Result<ScanRecord> {
        if buf.len() != Self::SIZE {
            error!("Scan record has {} bytes, expected {}", buf.len(), Self::SIZE);
            return Err(Error::UnexpectedLength {
                what: Self::NAME,
                expected: Self::SIZE,
                actual: buf.len(),
            });
        }

        if !has_valid_start_bits(buf[0]) {
            error!("Inversed start bit is not inverse of the start bit: {:02X}", buf[0]);
            return Err(Error::InvalidScanRecord(
                ScanRecordFault::StartBitNotInverted { byte: buf[0] },
            ));
        }

        if !has_check_bit(buf[1]) {
            error!("Check bit of the scan record is not equal to 1: {:02X}", buf[1]);
            return Err(Error::InvalidScanRecord(ScanRecordFault::CheckBitNotSet {
                byte: buf[1],
            }));
        }

        Ok(ScanRecord {
            is_new_revolution: buf[0] & RPLIDAR_RESP_MEASUREMENT_SYNCBIT
                == RPLIDAR_RESP_MEASUREMENT_SYNCBIT,
            quality: buf[0] >> RPLIDAR_RESP_MEASUREMENT_QUALITY_SHIFT,
            angle_q6: angle_q6(buf[1], buf[2]),
            distance_q2: distance_q2(buf[3], buf[4]),
        })
    }
}
