//! # RPLIDAR A2 Driver
//!
//! `rplidar_a2` talks to a Slamtec RPLIDAR A2 over a serial link. It can query
//! device health and info, drive the motor, and collect whole revolutions of
//! legacy 5-byte scan measurements.
//!
//! The port is opened lazily on the first command, through a [`PortOpener`].
//! With the default `serial` feature [`SerialPortOpener`] opens a real port.

extern crate byteorder;
extern crate hex;
extern crate log;

mod answers;
pub mod base;
mod checksum;
mod cmds;
mod codec;
mod internals;
mod parsers;
mod protocol;
#[cfg(feature = "serial")]
mod serial;
pub mod types;
pub mod utils;

pub use crate::base::{AnswerDecoder, Channel, Error, Message, PortOpener, Result};
pub use crate::checksum::checksum;
pub use crate::cmds::Command;
pub use crate::internals::{ScanSession, SessionStep};
pub use crate::protocol::{build_simple, build_with_payload, RplidarHostProtocol};
#[cfg(feature = "serial")]
pub use crate::serial::SerialPortOpener;
pub use crate::types::{
    DeviceInfo, DriverOptions, DriverState, Health, ResponseDescriptor, ScanRecord, SerialConfig,
};

use log::{error, trace};
use std::fmt;
use std::thread;

/// Command/response driver for one RPLIDAR A2.
///
/// Every operation runs to completion before returning and leaves the driver
/// in [`DriverState::Idle`], whether it succeeded or not. Errors are never
/// retried and no partially decoded answer is returned.
pub struct RplidarDriver<O: PortOpener> {
    opener: O,
    config: SerialConfig,
    options: DriverOptions,
    channel: Option<Channel<RplidarHostProtocol, O::Port>>,
    state: DriverState,
}

impl<O: PortOpener> fmt::Debug for RplidarDriver<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RplidarDriver")
            .field("config", &self.config)
            .field("options", &self.options)
            .field("state", &self.state)
            .field("open", &self.is_open())
            .finish()
    }
}

#[cfg(feature = "serial")]
impl RplidarDriver<SerialPortOpener> {
    /// Driver for the serial port at `address`, using 115200 baud 8N1.
    ///
    /// # Example
    /// ```ignore
    /// let mut lidar = rplidar_a2::RplidarDriver::serial("/dev/ttyUSB0");
    /// println!("{}", lidar.get_device_info()?);
    /// lidar.start_motor()?;
    /// let records = lidar.scan(1)?;
    /// lidar.stop_motor()?;
    /// lidar.close()?;
    /// ```
    pub fn serial(address: impl Into<String>) -> RplidarDriver<SerialPortOpener> {
        RplidarDriver::new(SerialPortOpener, SerialConfig::new(address))
    }
}

impl<O: PortOpener> RplidarDriver<O> {
    /// Constructs a driver with default options. Nothing is opened yet.
    pub fn new(opener: O, config: SerialConfig) -> RplidarDriver<O> {
        RplidarDriver::with_options(opener, config, DriverOptions::default())
    }

    pub fn with_options(opener: O, config: SerialConfig, options: DriverOptions) -> RplidarDriver<O> {
        trace!("Creating new RplidarDriver for {}", config.address);
        RplidarDriver {
            opener,
            config,
            options,
            channel: None,
            state: DriverState::Idle,
        }
    }

    /// Current protocol state.
    pub fn state(&self) -> DriverState {
        self.state
    }

    /// Returns `true` once the port has been opened and until `close` is called.
    pub fn is_open(&self) -> bool {
        self.channel.is_some()
    }

    pub fn options(&self) -> &DriverOptions {
        &self.options
    }

    /// Reads the health status of the device.
    pub fn get_health(&mut self) -> Result<Health> {
        trace!("Getting device health");
        let result = self.query::<Health>(Command::GetHealth);
        self.finish(result)
    }

    /// Reads model, firmware, hardware revision and serial number.
    pub fn get_device_info(&mut self) -> Result<DeviceInfo> {
        trace!("Getting device info");
        let result = self.query::<DeviceInfo>(Command::GetInfo);
        self.finish(result)
    }

    /// Sets the motor PWM duty cycle. 0 stops the motor.
    pub fn set_motor_pwm(&mut self, pwm: u16) -> Result<()> {
        trace!("Setting motor PWM to {}", pwm);
        let result = self.request_with_payload(Command::MotorPwm, pwm);
        self.finish(result)
    }

    /// Starts the motor with the configured PWM (660 unless overridden).
    pub fn start_motor(&mut self) -> Result<()> {
        let pwm = self.options.motor_pwm;
        trace!("Starting motor with default PWM ({})", pwm);
        self.set_motor_pwm(pwm)
    }

    pub fn start_motor_with_pwm(&mut self, pwm: u16) -> Result<()> {
        self.set_motor_pwm(pwm)
    }

    /// Stops the motor. Same as `set_motor_pwm(0)`.
    pub fn stop_motor(&mut self) -> Result<()> {
        trace!("Stopping motor (set_motor_pwm(0))");
        self.set_motor_pwm(0)
    }

    /// Collects `revolutions` full revolutions of measurements.
    ///
    /// Records before the first revolution boundary are skipped. The boundary
    /// record that closes the last revolution is not included. Once done the
    /// device is told to stop and stale bytes are drained from the port.
    /// `scan(0)` returns an empty list as soon as a boundary is seen.
    pub fn scan(&mut self, revolutions: usize) -> Result<Vec<ScanRecord>> {
        trace!("Starting scan for {} revolution(s)", revolutions);
        let result = self.collect_scan(revolutions);
        self.finish(result)
    }

    /// Stops any measurement in progress and drains the port.
    pub fn stop(&mut self) -> Result<()> {
        let result = self.stop_and_drain();
        self.finish(result)
    }

    /// Resets the device core.
    pub fn reset(&mut self) -> Result<()> {
        trace!("Resetting device core");
        let result = self.request(Command::Reset);
        self.finish(result)
    }

    /// Flushes and releases the port. Does nothing if it was never opened.
    pub fn close(&mut self) -> Result<()> {
        self.state = DriverState::Idle;
        match self.channel.take() {
            Some(channel) => {
                trace!("Closing port {}", self.config.address);
                channel.close()
            }
            None => {
                trace!("Port {} is not open, nothing to close", self.config.address);
                Ok(())
            }
        }
    }

    fn finish<T>(&mut self, result: Result<T>) -> Result<T> {
        if let Err(ref e) = result {
            error!("Operation failed in state {:?}: {}", self.state, e);
        }
        if self.state != DriverState::Idle {
            trace!("{:?} -> Idle", self.state);
            self.state = DriverState::Idle;
        }
        result
    }

    fn transition(&mut self, next: DriverState) {
        trace!("{:?} -> {:?}", self.state, next);
        self.state = next;
    }

    fn channel(&mut self) -> Result<&mut Channel<RplidarHostProtocol, O::Port>> {
        let channel = match self.channel.take() {
            Some(channel) => channel,
            None => {
                let port = self.opener.open(&self.config)?;
                trace!("Opened port {}", self.config.address);
                Channel::new(RplidarHostProtocol::new(), port)
            }
        };
        Ok(self.channel.insert(channel))
    }

    /// Writes a simple request, then waits for the device to settle.
    fn request(&mut self, cmd: Command) -> Result<()> {
        trace!("Sending {} request", cmd);
        self.channel()?.write(&Message::new(cmd))?;
        let delay = self.options.command_delay;
        if !delay.is_zero() {
            thread::sleep(delay);
        }
        Ok(())
    }

    fn request_with_payload(&mut self, cmd: Command, payload: u16) -> Result<()> {
        trace!("Sending {} request with payload {}", cmd, payload);
        self.channel()?.write(&Message::with_u16(cmd, payload))?;
        Ok(())
    }

    fn read_bytes(&mut self, count: usize) -> Result<Vec<u8>> {
        let timeout = self.options.read_timeout;
        self.channel()?.read_bytes_until(count, timeout)
    }

    /// Sends a command that is answered with a response descriptor and reads it.
    fn command(&mut self, cmd: Command) -> Result<ResponseDescriptor> {
        debug_assert!(cmd.expects_response());
        self.request(cmd)?;
        self.transition(DriverState::AwaitingDescriptor);
        let raw = self.read_bytes(ResponseDescriptor::SIZE)?;
        ResponseDescriptor::decode(&raw)
    }

    fn query<A: AnswerDecoder>(&mut self, cmd: Command) -> Result<A> {
        let descriptor = self.command(cmd)?;
        let raw = self.read_bytes(descriptor.payload_length as usize)?;
        let answer = A::decode(&raw)?;
        self.transition(DriverState::Idle);
        Ok(answer)
    }

    fn collect_scan(&mut self, revolutions: usize) -> Result<Vec<ScanRecord>> {
        self.command(Command::Scan)?;
        self.transition(DriverState::Scanning);

        let mut session = ScanSession::new(revolutions);
        loop {
            let raw = self.read_bytes(ScanRecord::SIZE)?;
            let record = ScanRecord::decode(&raw)?;
            if session.push(record) == SessionStep::Complete {
                break;
            }
        }

        self.stop_and_drain()?;
        self.transition(DriverState::Idle);
        Ok(session.into_records())
    }

    fn stop_and_drain(&mut self) -> Result<()> {
        self.request(Command::Stop)?;
        self.channel()?.drain()?;
        Ok(())
    }
}
