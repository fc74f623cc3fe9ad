use crate::answers::*;
use crate::base::{AnswerDecoder, Error, Result};
use crate::codec::le_u16;
use crate::types::Health;
use log::{error, trace};

impl AnswerDecoder for Health {
    const NAME: &'static str = "device health";
    const SIZE: usize = RPLIDAR_HEALTH_ANSWER_SIZE;

    fn decode(buf: &[u8]) -> Result<Health> {
        if buf.len() != Self::SIZE {
            error!("Health answer has {} bytes, expected {}", buf.len(), Self::SIZE);
            return Err(Error::UnexpectedLength {
                what: Self::NAME,
                expected: Self::SIZE,
                actual: buf.len(),
            });
        }

        let health = match buf[0] {
            RPLIDAR_HEALTH_STATUS_OK => Health::Good,
            RPLIDAR_HEALTH_STATUS_WARNING => Health::Warning,
            RPLIDAR_HEALTH_STATUS_ERROR => Health::Error(le_u16(&buf[1..3])),
            state => {
                error!("Unknown health status code: {}", state);
                return Err(Error::UnrecognizedHealthState(state));
            }
        };
        trace!("Decoded health: {:?}", health);
        Ok(health)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn good() {
        assert_eq!(Health::decode(&[0, 0, 0]).unwrap(), Health::Good);
    }

    #[test]
    fn warning() {
        assert_eq!(Health::decode(&[1, 0, 0]).unwrap(), Health::Warning);
    }

    #[test]
    fn error_code_is_little_endian() {
        assert_eq!(Health::decode(&[2, 3, 5]).unwrap(), Health::Error(1283));
    }

    #[test]
    fn unknown_state() {
        assert!(matches!(
            Health::decode(&[3, 0, 0]),
            Err(Error::UnrecognizedHealthState(3))
        ));
    }

    #[test]
    fn wrong_size() {
        assert!(matches!(
            Health::decode(&[2, 3]),
            Err(Error::UnexpectedLength {
                expected: 3,
                actual: 2,
                ..
            })
        ));
    }
}
