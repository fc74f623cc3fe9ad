use crate::base::{Error, PortOpener, Result};
use crate::types::{DataBits, Parity, SerialConfig, StopBits};
use log::{error, trace};
use serialport::SerialPort;

/// Opens real serial ports through the `serialport` crate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SerialPortOpener;

impl From<DataBits> for serialport::DataBits {
    fn from(bits: DataBits) -> serialport::DataBits {
        match bits {
            DataBits::Seven => serialport::DataBits::Seven,
            DataBits::Eight => serialport::DataBits::Eight,
        }
    }
}

impl From<Parity> for serialport::Parity {
    fn from(parity: Parity) -> serialport::Parity {
        match parity {
            Parity::None => serialport::Parity::None,
            Parity::Odd => serialport::Parity::Odd,
            Parity::Even => serialport::Parity::Even,
        }
    }
}

impl From<StopBits> for serialport::StopBits {
    fn from(bits: StopBits) -> serialport::StopBits {
        match bits {
            StopBits::One => serialport::StopBits::One,
            StopBits::Two => serialport::StopBits::Two,
        }
    }
}

impl PortOpener for SerialPortOpener {
    type Port = dyn SerialPort;

    fn open(&mut self, config: &SerialConfig) -> Result<Box<dyn SerialPort>> {
        trace!(
            "Opening serial port {} at {} baud",
            config.address,
            config.baud_rate
        );
        serialport::new(config.address.as_str(), config.baud_rate)
            .data_bits(config.data_bits.into())
            .parity(config.parity.into())
            .stop_bits(config.stop_bits.into())
            .timeout(config.poll_timeout)
            .open()
            .map_err(|e| {
                error!("Failed to open serial port {}: {}", config.address, e);
                Error::OperationFail {
                    description: format!("cannot open serial port {}: {}", config.address, e),
                }
            })
    }
}
