use crate::base::error::Result;
use crate::base::message::Message;
use crate::types::SerialConfig;
use std::io;

/// Defines the behavior for encoding `Message` objects into byte streams.
pub trait ProtocolEncoder {
    /// Encodes a `Message` into the provided byte buffer.
    ///
    /// Returns the number of bytes written to the buffer upon successful encoding.
    fn encode(&self, msg: &Message, bytes: &mut [u8]) -> Result<usize>;

    /// Exact number of bytes `encode` will produce for `msg`.
    fn estimate_encoded_size(&self, msg: &Message) -> Result<usize>;

    /// Encodes a `Message` and writes it directly to a `Write` target (e.g., a serial port).
    ///
    /// Returns the number of bytes successfully written to the destination.
    fn write_to(&self, msg: &Message, dest: &mut impl io::Write) -> Result<usize>;
}

/// Decodes a fixed-layout answer from the bytes that follow a response descriptor.
///
/// Decoding is all-or-nothing: either the whole value is valid or an error describes
/// the first violated field.
pub trait AnswerDecoder: Sized {
    /// Name used in diagnostics.
    const NAME: &'static str;

    /// Number of bytes the answer occupies on the wire.
    const SIZE: usize;

    fn decode(buf: &[u8]) -> Result<Self>;
}

/// Opens the byte stream the driver talks to.
///
/// The driver calls `open` lazily, on the first command that needs the port.
pub trait PortOpener {
    /// The opened stream. Reads are expected to return quickly, reporting
    /// `TimedOut`, `WouldBlock` or 0 bytes when nothing has arrived.
    type Port: io::Read + io::Write + ?Sized;

    fn open(&mut self, config: &SerialConfig) -> Result<Box<Self::Port>>;
}
