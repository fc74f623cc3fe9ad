use crate::base::{Error, Message, ProtocolEncoder, Result};
use crate::checksum::Checksum;
use crate::cmds::{Command, RPLIDAR_CMD_SYNC_BYTE, RPLIDAR_MOTOR_PWM_PAYLOAD_SIZE};
use log::{error, trace};
use std::io::Write;

/// Largest payload the one-byte size field can announce.
const RPLIDAR_CMD_MAX_PAYLOAD_SIZE: usize = 255;

/// Size of a request without payload: sync byte and opcode.
const RPLIDAR_CMD_SIMPLE_SIZE: usize = 2;

/// Extra bytes around a payload: sync, opcode, size and checksum.
const RPLIDAR_CMD_PAYLOAD_OVERHEAD: usize = 4;

/// Encoder side of the RPLIDAR host communication protocol.
///
/// Requests are `[0xA5, opcode]`, or `[0xA5, opcode, size, payload.., checksum]`
/// when a payload is present, the checksum being the XOR of every byte before it.
/// Answers carry no checksum and are decoded by the parsers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RplidarHostProtocol;

impl RplidarHostProtocol {
    /// Creates a new `RplidarHostProtocol` instance.
    pub fn new() -> RplidarHostProtocol {
        trace!("Creating new RplidarHostProtocol");
        RplidarHostProtocol
    }

    fn encode_to_vec(&self, msg: &Message) -> Result<Vec<u8>> {
        let size = self.estimate_encoded_size(msg)?;
        let mut buf = vec![0; size];
        let encoded = self.encode(msg, &mut buf)?;
        buf.truncate(encoded);
        Ok(buf)
    }
}

impl ProtocolEncoder for RplidarHostProtocol {
    /// Encodes a request `Message` into the provided byte buffer.
    fn encode(&self, msg: &Message, bytes: &mut [u8]) -> Result<usize> {
        trace!(
            "Encoding message: cmd={}, data_len={}",
            msg.cmd,
            msg.data.len()
        );
        let encoded_size = self.estimate_encoded_size(msg)?;

        if encoded_size > bytes.len() {
            error!(
                "Buffer too small: required {}, available {}",
                encoded_size,
                bytes.len()
            );
            return Err(Error::BufferTooSmall);
        }

        bytes[0] = RPLIDAR_CMD_SYNC_BYTE;
        bytes[1] = msg.cmd.opcode();

        if !msg.has_payload() {
            trace!("Total encoded length (no payload): {}", encoded_size);
            return Ok(encoded_size);
        }

        let payload_end = 3 + msg.data.len();
        bytes[2] = msg.data.len() as u8;
        bytes[3..payload_end].copy_from_slice(&msg.data);

        let mut checksum = Checksum::new();
        checksum.push_slice(&bytes[0..payload_end]);
        bytes[payload_end] = checksum.checksum();
        trace!(
            "Encoded {} bytes with checksum {:02X}",
            encoded_size,
            bytes[payload_end]
        );
        Ok(encoded_size)
    }

    fn estimate_encoded_size(&self, msg: &Message) -> Result<usize> {
        if msg.data.len() > RPLIDAR_CMD_MAX_PAYLOAD_SIZE {
            error!("Payload too large: {} bytes (max 255)", msg.data.len());
            return Err(Error::OperationFail {
                description: "payload too big".to_owned(),
            });
        }

        if msg.has_payload() {
            Ok(RPLIDAR_CMD_PAYLOAD_OVERHEAD + msg.data.len())
        } else {
            Ok(RPLIDAR_CMD_SIMPLE_SIZE)
        }
    }

    fn write_to(&self, msg: &Message, dest: &mut impl Write) -> Result<usize> {
        let buf = self.encode_to_vec(msg)?;
        trace!("Writing {} bytes to destination: {:02X?}", buf.len(), buf);
        match dest.write_all(&buf) {
            Ok(()) => Ok(buf.len()),
            Err(err) => {
                error!("IO error during write_all: {}", err);
                Err(err.into())
            }
        }
    }
}

/// Builds the frame of a request without payload: `[0xA5, opcode]`.
pub fn build_simple(cmd: Command) -> Vec<u8> {
    vec![RPLIDAR_CMD_SYNC_BYTE, cmd.opcode()]
}

/// Builds the frame of a request carrying `payload` as 2 little-endian bytes.
pub fn build_with_payload(cmd: Command, payload: u16) -> Vec<u8> {
    let msg = Message::with_u16(cmd, payload);
    let mut frame = Vec::with_capacity(RPLIDAR_CMD_PAYLOAD_OVERHEAD + RPLIDAR_MOTOR_PWM_PAYLOAD_SIZE);
    frame.push(RPLIDAR_CMD_SYNC_BYTE);
    frame.push(cmd.opcode());
    frame.push(msg.data.len() as u8);
    frame.extend_from_slice(&msg.data);
    let mut checksum = Checksum::new();
    checksum.push_slice(&frame);
    frame.push(checksum.checksum());
    frame
}
