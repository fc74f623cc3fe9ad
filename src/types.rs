use crate::codec::to_upper_hex;
use crate::internals::{
    RPLIDAR_DEFAULT_BAUDRATE, RPLIDAR_DEFAULT_COMMAND_DELAY, RPLIDAR_DEFAULT_MOTOR_PWM,
    RPLIDAR_DEFAULT_POLL_TIMEOUT, RPLIDAR_DEFAULT_TIMEOUT,
};
use std::fmt;
use std::time::Duration;

/// Decoded 7-byte response descriptor announcing the answer that follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponseDescriptor {
    /// Number of payload bytes in each answer packet.
    pub payload_length: u32,
    /// Whether one packet or a continuous stream follows.
    pub send_mode: SendMode,
    /// Type tag of the answer packets.
    pub data_type: DataType,
}

/// Request/response mode of the current session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendMode {
    /// The device sends only one data packet.
    SingleResponse = 0,
    /// The device keeps sending data packets with the same format.
    ContinuousResponse = 1,
}

/// Data type tags the device declares for its answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    /// Single answer to GET_HEALTH or GET_INFO.
    Single = 0x06,
    /// Legacy measurement records streamed after SCAN.
    Measurement = 0x81,
}

/// Represents the health status reported by the RPLIDAR device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Health {
    /// The device reports it is operating correctly.
    Good,
    /// The device reports a warning condition, but may still be operational.
    Warning,
    /// The device reports a fatal error. Contains the error code.
    Error(u16),
}

/// Identity of the connected device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceInfo {
    /// RPLIDAR model ID.
    pub model: u8,
    /// Firmware version, major part.
    pub firmware_major: u8,
    /// Firmware version, minor part.
    pub firmware_minor: u8,
    /// Hardware version.
    pub hardware: u8,
    /// 128-bit unique serial number, least significant byte first.
    pub serial_number: [u8; 16],
}

impl DeviceInfo {
    /// Firmware version as `"{major}.{minor}"`.
    pub fn firmware(&self) -> String {
        format!("{}.{}", self.firmware_major, self.firmware_minor)
    }

    /// Serial number as upper-case hex, bytes in received order.
    pub fn serial_number_hex(&self) -> String {
        to_upper_hex(&self.serial_number)
    }
}

impl fmt::Display for DeviceInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "model {} firmware {} hardware {} serial {}",
            self.model,
            self.firmware(),
            self.hardware,
            self.serial_number_hex()
        )
    }
}

/// A single measurement decoded from a 5-byte legacy scan record.
///
/// Angle and distance keep the device's fixed-point representation.
/// Use `angle()` and `distance()` for floating-point access.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanRecord {
    /// `true` if this measurement starts a new 360-degree revolution.
    pub is_new_revolution: bool,
    /// Quality of the reflected signal (6 bits).
    pub quality: u8,
    /// Heading angle in Q6 fixed point (1/64 degree).
    pub angle_q6: u16,
    /// Distance in Q2 fixed point (1/4 millimetre).
    pub distance_q2: u16,
}

impl ScanRecord {
    /// Heading angle in degrees (0 to 360).
    #[inline]
    pub fn angle(&self) -> f64 {
        f64::from(self.angle_q6) / 64.0
    }

    /// Distance in millimetres. Zero means the measurement is invalid.
    #[inline]
    pub fn distance(&self) -> f64 {
        f64::from(self.distance_q2) / 4.0
    }
}

/// Observable phase of the driver's command/response cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    /// No command in flight.
    Idle,
    /// A command was written and its response descriptor is being read.
    AwaitingDescriptor,
    /// Measurement records are being collected.
    Scanning,
}

/// Number of data bits per serial character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataBits {
    Seven,
    Eight,
}

/// Serial parity checking mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parity {
    None,
    Odd,
    Even,
}

/// Number of stop bits per serial character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopBits {
    One,
    Two,
}

/// Settings used to open the serial port.
#[derive(Debug, Clone, PartialEq)]
pub struct SerialConfig {
    /// Device path or port name, e.g. `/dev/ttyUSB0` or `COM3`.
    pub address: String,
    pub baud_rate: u32,
    pub data_bits: DataBits,
    pub parity: Parity,
    pub stop_bits: StopBits,
    /// How long one single-byte read may block before reporting no data.
    pub poll_timeout: Duration,
}

impl SerialConfig {
    /// Creates the A2 default settings (115200 8N1) for `address`.
    pub fn new(address: impl Into<String>) -> SerialConfig {
        SerialConfig {
            address: address.into(),
            baud_rate: RPLIDAR_DEFAULT_BAUDRATE,
            data_bits: DataBits::Eight,
            parity: Parity::None,
            stop_bits: StopBits::One,
            poll_timeout: RPLIDAR_DEFAULT_POLL_TIMEOUT,
        }
    }

    /// Same settings with a different baud rate.
    pub fn with_baud_rate(mut self, baud_rate: u32) -> SerialConfig {
        self.baud_rate = baud_rate;
        self
    }
}

/// Tunables of the driver's command/response cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DriverOptions {
    /// Time budget for accumulating one descriptor, answer or scan record.
    pub read_timeout: Duration,
    /// PWM duty cycle used by `start_motor()`.
    pub motor_pwm: u16,
    /// Pause after each request without payload, giving the device time to react.
    pub command_delay: Duration,
}

impl DriverOptions {
    /// Default options with no pause after requests.
    pub fn without_delay() -> DriverOptions {
        DriverOptions {
            command_delay: Duration::ZERO,
            ..DriverOptions::default()
        }
    }

    /// Default options with a different read timeout.
    pub fn with_read_timeout(read_timeout: Duration) -> DriverOptions {
        DriverOptions {
            read_timeout,
            ..DriverOptions::default()
        }
    }
}

impl Default for DriverOptions {
    fn default() -> DriverOptions {
        DriverOptions {
            read_timeout: RPLIDAR_DEFAULT_TIMEOUT,
            motor_pwm: RPLIDAR_DEFAULT_MOTOR_PWM,
            command_delay: RPLIDAR_DEFAULT_COMMAND_DELAY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scan_record_scales_fixed_point() {
        let record = ScanRecord {
            is_new_revolution: false,
            quality: 15,
            angle_q6: 333,
            distance_q2: 1136,
        };
        assert_eq!(record.angle(), 5.203125);
        assert_eq!(record.distance(), 284.0);
    }

    #[test]
    fn device_info_renders_firmware_and_serial() {
        let info = DeviceInfo {
            model: 40,
            firmware_major: 1,
            firmware_minor: 24,
            hardware: 4,
            serial_number: [
                168, 226, 154, 240, 197, 226, 157, 210, 182, 227, 157, 245, 43, 49, 49, 22,
            ],
        };
        assert_eq!(info.firmware(), "1.24");
        assert_eq!(info.serial_number_hex(), "A8E29AF0C5E29DD2B6E39DF52B313116");
    }

    #[test]
    fn serial_config_defaults_to_8n1() {
        let config = SerialConfig::new("/dev/ttyUSB0");
        assert_eq!(config.address, "/dev/ttyUSB0");
        assert_eq!(config.baud_rate, 115_200);
        assert_eq!(config.data_bits, DataBits::Eight);
        assert_eq!(config.parity, Parity::None);
        assert_eq!(config.stop_bits, StopBits::One);
        assert_eq!(config.with_baud_rate(256_000).baud_rate, 256_000);
    }

    #[test]
    fn driver_options_defaults() {
        let options = DriverOptions::default();
        assert_eq!(options.read_timeout, Duration::from_secs(2));
        assert_eq!(options.motor_pwm, 660);
        assert_eq!(options.command_delay, Duration::from_millis(500));
        assert_eq!(DriverOptions::without_delay().command_delay, Duration::ZERO);
    }
}
