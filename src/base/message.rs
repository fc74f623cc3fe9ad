use crate::cmds::Command;
use crate::codec::u16_to_le_bytes;

/// A request sent to the RPLIDAR device: a command plus optional payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// The command to issue.
    pub cmd: Command,

    /// Payload bytes. Empty for simple requests.
    pub data: Vec<u8>,
}

impl Message {
    /// Creates a new message with a command and no payload.
    pub fn new(cmd: Command) -> Message {
        Message::with_data(cmd, &[])
    }

    /// Creates a new message with a command and payload data.
    #[inline]
    pub fn with_data(cmd: Command, data: &[u8]) -> Message {
        Message {
            cmd,
            data: data.to_vec(),
        }
    }

    /// Creates a message whose payload is `value` as 2 little-endian bytes.
    pub fn with_u16(cmd: Command, value: u16) -> Message {
        Message::with_data(cmd, &u16_to_le_bytes(value))
    }

    /// Returns `true` if the message is encoded with size, payload and checksum.
    #[inline]
    pub fn has_payload(&self) -> bool {
        !self.data.is_empty()
    }
}
