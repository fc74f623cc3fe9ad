// Response descriptor

/// Sync bytes opening every response descriptor.
pub const RPLIDAR_ANS_SYNC_BYTES: [u8; 2] = [0xA5, 0x5A];

/// Total size of the response descriptor, sync bytes included.
pub const RPLIDAR_ANS_DESCRIPTOR_SIZE: usize = 7;

/// Offset of the 24-bit little-endian payload length inside the descriptor.
pub const RPLIDAR_ANS_LENGTH_OFFSET: usize = 2;

/// Offset of the byte whose top two bits carry the send mode.
pub const RPLIDAR_ANS_SEND_MODE_OFFSET: usize = 5;

/// Bit shift extracting the send mode from its byte.
pub const RPLIDAR_ANS_SEND_MODE_SHIFT: u8 = 6;

/// Offset of the data type byte.
pub const RPLIDAR_ANS_DATA_TYPE_OFFSET: usize = 6;

/// Send mode: the device answers with exactly one data packet.
pub const RPLIDAR_ANS_SEND_MODE_SINGLE: u8 = 0x0;

/// Send mode: the device keeps sending packets of the same format.
pub const RPLIDAR_ANS_SEND_MODE_CONTINUOUS: u8 = 0x1;

/// Data type of single-response answers (health, device info).
pub const RPLIDAR_ANS_TYPE_SINGLE: u8 = 0x6;

/// Data type of the continuous legacy measurement stream.
pub const RPLIDAR_ANS_TYPE_MEASUREMENT: u8 = 0x81;

// Health

/// Size of the health answer: status byte plus u16 error code.
pub const RPLIDAR_HEALTH_ANSWER_SIZE: usize = 3;

/// Health status code indicating the LIDAR is operating correctly.
pub const RPLIDAR_HEALTH_STATUS_OK: u8 = 0;

/// Health status code indicating a non-critical warning.
pub const RPLIDAR_HEALTH_STATUS_WARNING: u8 = 1;

/// Health status code indicating a critical error.
pub const RPLIDAR_HEALTH_STATUS_ERROR: u8 = 2;

// Device info

/// Size of the device info answer.
pub const RPLIDAR_DEVINFO_ANSWER_SIZE: usize = 20;

/// Offset of the 128-bit serial number inside the device info answer.
pub const RPLIDAR_DEVINFO_SERIAL_OFFSET: usize = 4;

// Measurement answers

/// Size of one legacy measurement record.
pub const RPLIDAR_MEASUREMENT_NODE_SIZE: usize = 5;

/// Mask for the start flag (bit 0 of byte 0).
pub const RPLIDAR_RESP_MEASUREMENT_SYNCBIT: u8 = 0x1;
/// Mask for the inverted start flag (bit 1 of byte 0).
pub const RPLIDAR_RESP_MEASUREMENT_SYNCBIT_INVERTED: u8 = 0x2;
/// Bit shift for extracting the quality value from byte 0.
pub const RPLIDAR_RESP_MEASUREMENT_QUALITY_SHIFT: u8 = 2;
/// Mask for the check bit (bit 0 of byte 1).
pub const RPLIDAR_RESP_MEASUREMENT_CHECKBIT: u8 = 0x1;
/// Bit shift for extracting the low angle bits from byte 1.
pub const RPLIDAR_RESP_MEASUREMENT_ANGLE_SHIFT: u8 = 1;
/// Position of byte 2 inside the Q6 angle value.
pub const RPLIDAR_RESP_MEASUREMENT_ANGLE_HIGH_SHIFT: u8 = 7;
