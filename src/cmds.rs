use std::fmt;

/// Sync byte that starts every request frame.
pub const RPLIDAR_CMD_SYNC_BYTE: u8 = 0xA5;

/// Size in bytes of the motor PWM payload (u16 little-endian).
pub const RPLIDAR_MOTOR_PWM_PAYLOAD_SIZE: usize = 2;

/// Commands understood by the RPLIDAR A2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Command {
    /// Request the device's health status.
    GetHealth = 0x52,
    /// Request device information (model, firmware, hardware, serial number).
    GetInfo = 0x50,
    /// Set the motor PWM duty cycle. Carries a 2-byte payload.
    MotorPwm = 0xF0,
    /// Start the legacy scan; the device answers with a continuous measurement stream.
    Scan = 0x20,
    /// Stop the measurement process.
    Stop = 0x25,
    /// Reset the LIDAR core.
    Reset = 0x40,
}

impl Command {
    /// Wire opcode of the command.
    #[inline]
    pub fn opcode(self) -> u8 {
        self as u8
    }

    /// Returns `true` for commands the device answers with a response descriptor.
    pub fn expects_response(self) -> bool {
        matches!(self, Command::GetHealth | Command::GetInfo | Command::Scan)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Command::GetHealth => "GET_HEALTH",
            Command::GetInfo => "GET_INFO",
            Command::MotorPwm => "MOTOR_PWM",
            Command::Scan => "SCAN",
            Command::Stop => "STOP",
            Command::Reset => "RESET",
        };
        write!(f, "{}({:02X})", name, self.opcode())
    }
}

#[cfg(test)]
mod tests {
    use super::Command;

    #[test]
    fn opcodes_match_wire_values() {
        assert_eq!(Command::GetHealth.opcode(), 0x52);
        assert_eq!(Command::GetInfo.opcode(), 0x50);
        assert_eq!(Command::MotorPwm.opcode(), 0xF0);
        assert_eq!(Command::Scan.opcode(), 0x20);
        assert_eq!(Command::Stop.opcode(), 0x25);
        assert_eq!(Command::Reset.opcode(), 0x40);
    }

    #[test]
    fn only_queries_and_scan_expect_a_descriptor() {
        assert!(Command::GetHealth.expects_response());
        assert!(Command::GetInfo.expects_response());
        assert!(Command::Scan.expects_response());
        assert!(!Command::MotorPwm.expects_response());
        assert!(!Command::Stop.expects_response());
        assert!(!Command::Reset.expects_response());
    }
}
