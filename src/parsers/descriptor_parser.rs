use crate::answers::*;
use crate::base::{AnswerDecoder, Error, Result};
use crate::codec::le_u24;
use crate::types::{DataType, ResponseDescriptor, SendMode};
use log::{error, trace};

/// Checks one descriptor sync byte, reporting a missing byte as `found: None`.
fn check_sync_byte(buf: &[u8], position: usize) -> Result<()> {
    let found = buf.get(position).copied();
    if found == Some(RPLIDAR_ANS_SYNC_BYTES[position]) {
        Ok(())
    } else {
        error!(
            "Wrong sync byte {} of the response descriptor: expected {:02X}, got {:02X?}",
            position, RPLIDAR_ANS_SYNC_BYTES[position], found
        );
        Err(Error::MalformedHeader { position, found })
    }
}

#[inline]
fn send_mode_bits(buf: &[u8]) -> u8 {
    buf[RPLIDAR_ANS_SEND_MODE_OFFSET] >> RPLIDAR_ANS_SEND_MODE_SHIFT
}

fn parse_send_mode(value: u8) -> Result<SendMode> {
    match value {
        RPLIDAR_ANS_SEND_MODE_SINGLE => Ok(SendMode::SingleResponse),
        RPLIDAR_ANS_SEND_MODE_CONTINUOUS => Ok(SendMode::ContinuousResponse),
        _ => {
            error!("Wrong send mode value of the response descriptor: {:X}", value);
            Err(Error::MalformedPayload {
                field: "send mode",
                value,
            })
        }
    }
}

fn parse_data_type(value: u8) -> Result<DataType> {
    match value {
        RPLIDAR_ANS_TYPE_SINGLE => Ok(DataType::Single),
        RPLIDAR_ANS_TYPE_MEASUREMENT => Ok(DataType::Measurement),
        _ => {
            error!("Wrong data type value of the response descriptor: {:02X}", value);
            Err(Error::MalformedPayload {
                field: "data type",
                value,
            })
        }
    }
}

impl AnswerDecoder for ResponseDescriptor {
    const NAME: &'static str = "response descriptor";
    const SIZE: usize = RPLIDAR_ANS_DESCRIPTOR_SIZE;

    /// Validates sync bytes, then send mode, then data type, in that order.
    fn decode(buf: &[u8]) -> Result<ResponseDescriptor> {
        trace!("Decoding response descriptor: {:02X?}", buf);
        check_sync_byte(buf, 0)?;
        check_sync_byte(buf, 1)?;

        if buf.len() != Self::SIZE {
            error!(
                "Response descriptor has {} bytes, expected {}",
                buf.len(),
                Self::SIZE
            );
            return Err(Error::UnexpectedLength {
                what: Self::NAME,
                expected: Self::SIZE,
                actual: buf.len(),
            });
        }

        let send_mode = parse_send_mode(send_mode_bits(buf))?;
        let data_type = parse_data_type(buf[RPLIDAR_ANS_DATA_TYPE_OFFSET])?;
        let payload_length = le_u24(&buf[RPLIDAR_ANS_LENGTH_OFFSET..RPLIDAR_ANS_SEND_MODE_OFFSET]);

        let descriptor = ResponseDescriptor {
            payload_length,
            send_mode,
            data_type,
        };
        trace!("Decoded {:?}", descriptor);
        Ok(descriptor)
    }
}
