use std::error;
use std::fmt;
use std::io;

/// The two ways a 5-byte measurement record can fail its header check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanRecordFault {
    /// Bit 1 of the first byte is not the inverse of the start flag in bit 0.
    StartBitNotInverted { byte: u8 },
    /// Bit 0 of the second byte (the check bit) is not set.
    CheckBitNotSet { byte: u8 },
}

impl fmt::Display for ScanRecordFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScanRecordFault::StartBitNotInverted { byte } => write!(
                f,
                "inversed start bit is not inverse of the start bit (byte 0x{:02X})",
                byte
            ),
            ScanRecordFault::CheckBitNotSet { byte } => {
                write!(f, "check bit is not equal to 1 (byte 0x{:02X})", byte)
            }
        }
    }
}

/// Represents errors that can occur during RPLIDAR operations.
#[derive(Debug)]
pub enum Error {
    /// A sync byte of the response descriptor is wrong or missing.
    MalformedHeader {
        /// Index of the offending byte inside the descriptor.
        position: usize,
        /// The byte actually received, `None` if the buffer ended before it.
        found: Option<u8>,
    },

    /// The send mode or data type of a response descriptor is outside the declared values.
    MalformedPayload { field: &'static str, value: u8 },

    /// A measurement record failed its header check.
    InvalidScanRecord(ScanRecordFault),

    /// The health answer carried a status byte other than good, warning or error.
    UnrecognizedHealthState(u8),

    /// Fewer than `expected` bytes arrived before the read timeout elapsed.
    OperationTimeout { expected: usize, received: usize },

    /// An answer did not have the fixed size its decoder requires.
    UnexpectedLength {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    /// The execution of operation failed. Contains a description of the failure.
    OperationFail { description: String },

    /// The buffer provided is too small for message encoding.
    BufferTooSmall,

    /// An I/O error occurred while communicating with the underlying stream (e.g., serial port).
    IoError(io::Error),
}

/// Formats an optional byte the way descriptor diagnostics print it.
fn describe_byte(byte: &Option<u8>) -> String {
    match byte {
        Some(b) => format!("0x{:02X}", b),
        None => "absent".to_owned(),
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::MalformedHeader { position, found } => write!(
                f,
                "wrong byte {} of the response descriptor: '{}'",
                position,
                describe_byte(found)
            ),
            Error::MalformedPayload { field, value } => write!(
                f,
                "wrong {} value of the response descriptor: '0x{:X}'",
                field, value
            ),
            Error::InvalidScanRecord(fault) => write!(f, "invalid scan record: {}", fault),
            Error::UnrecognizedHealthState(state) => {
                write!(f, "unrecognized health state: 0x{:02X}", state)
            }
            Error::OperationTimeout { expected, received } => write!(
                f,
                "timeout while reading from the port: received {} of {} bytes",
                received, expected
            ),
            Error::UnexpectedLength {
                what,
                expected,
                actual,
            } => write!(
                f,
                "invalid data size for {}: expected {}, got {}",
                what, expected, actual
            ),
            Error::OperationFail { description } => write!(f, "operation failed: {}", description),
            Error::BufferTooSmall => write!(f, "buffer is too small for message encoding"),
            Error::IoError(err) => write!(f, "io error: {}", err),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Error::IoError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::IoError(err)
    }
}

/// A specialized `Result` type for RPLIDAR operations.
pub type Result<T> = std::result::Result<T, Error>;
