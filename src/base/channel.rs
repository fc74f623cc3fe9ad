use crate::base::error::{Error, Result};
use crate::base::message::Message;
use crate::base::traits::ProtocolEncoder;
use log::{error, trace, warn};
use std::io::{self, Read, Write};
use std::time::{Duration, Instant};

/// Channel encodes requests with a protocol and moves bytes to and from a stream.
///
/// The stream is polled one byte at a time: a read that times out or returns
/// nothing means "no byte yet", never end of stream.
///
/// # Examples
/// ```ignore
/// let mut channel = Channel::new(RplidarHostProtocol::new(), serial_port);
///
/// channel.write(&Message::new(Command::GetHealth)).unwrap();
/// let descriptor = channel.read_bytes_until(7, Duration::from_secs(2)).unwrap();
/// ```
#[derive(Debug)]
pub struct Channel<P, T: ?Sized> {
    protocol: P,
    stream: Box<T>,
}

impl<P, T: ?Sized> Channel<P, T>
where
    P: ProtocolEncoder,
    T: io::Read + io::Write,
{
    /// Create a new `Channel` over an opened stream
    pub fn new(protocol: P, stream: Box<T>) -> Channel<P, T> {
        trace!("Creating new Channel");
        Channel { protocol, stream }
    }

    /// Write message to channel
    ///
    /// # Example
    /// ```ignore
    /// channel.write(&Message::new(Command::Stop)).unwrap();
    /// ```
    pub fn write(&mut self, msg: &Message) -> Result<usize> {
        trace!(
            "Channel write called: cmd={}, data_len={}",
            msg.cmd,
            msg.data.len()
        );
        let written = self.protocol.write_to(msg, &mut self.stream)?;
        trace!("Flushing stream...");
        self.stream.flush()?;
        trace!("Stream flushed");
        Ok(written)
    }

    /// Single attempt to take one byte from the stream.
    ///
    /// Returns `Ok(None)` when no byte is available right now.
    pub fn read_byte(&mut self) -> Result<Option<u8>> {
        let mut buf = [0u8; 1];
        match self.stream.read(&mut buf) {
            Ok(0) => Ok(None),
            Ok(_) => Ok(Some(buf[0])),
            Err(e)
                if matches!(
                    e.kind(),
                    io::ErrorKind::TimedOut
                        | io::ErrorKind::WouldBlock
                        | io::ErrorKind::Interrupted
                ) =>
            {
                Ok(None)
            }
            Err(e) => {
                error!("IO error reading from stream: {}", e);
                Err(e.into())
            }
        }
    }

    /// Read exactly `count` bytes, polling until they arrive or `timeout` elapses.
    ///
    /// Bytes are returned in arrival order. On timeout nothing read so far is returned.
    ///
    /// # Example
    /// ```ignore
    /// let record = channel.read_bytes_until(5, Duration::from_secs(2))?;
    /// ```
    pub fn read_bytes_until(&mut self, count: usize, timeout: Duration) -> Result<Vec<u8>> {
        trace!(
            "Channel read_bytes_until called: count={}, timeout={:?}",
            count,
            timeout
        );
        let start = Instant::now();
        let mut bytes = Vec::with_capacity(count);

        while bytes.len() < count {
            if let Some(byte) = self.read_byte()? {
                bytes.push(byte);
            }

            if start.elapsed() > timeout {
                warn!(
                    "Timeout while reading from the port: {} of {} bytes after {:?}",
                    bytes.len(),
                    count,
                    timeout
                );
                return Err(Error::OperationTimeout {
                    expected: count,
                    received: bytes.len(),
                });
            }
        }

        trace!("Read {} bytes: {:02X?}", bytes.len(), bytes);
        Ok(bytes)
    }

    /// Discard everything the stream currently holds.
    ///
    /// Returns the number of bytes thrown away.
    pub fn drain(&mut self) -> Result<usize> {
        let mut discarded = 0;
        while self.read_byte()?.is_some() {
            discarded += 1;
        }
        trace!("Drained {} stale bytes from stream", discarded);
        Ok(discarded)
    }

    /// Flush pending output and release the stream.
    pub fn close(mut self) -> Result<()> {
        trace!("Closing Channel");
        self.stream.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cmds::Command;
    use crate::protocol::RplidarHostProtocol;
    use std::collections::VecDeque;

    /// Yields scripted read results one call at a time; `None` means "no data yet".
    struct ScriptedStream {
        reads: VecDeque<Option<u8>>,
        stall_when_empty: bool,
        written: Vec<u8>,
    }

    impl ScriptedStream {
        fn new(reads: &[Option<u8>]) -> ScriptedStream {
            ScriptedStream {
                reads: reads.iter().copied().collect(),
                stall_when_empty: true,
                written: Vec::new(),
            }
        }
    }

    impl io::Read for ScriptedStream {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            match self.reads.pop_front() {
                Some(Some(b)) => {
                    buf[0] = b;
                    Ok(1)
                }
                Some(None) => Err(io::ErrorKind::TimedOut.into()),
                None if self.stall_when_empty => Err(io::ErrorKind::TimedOut.into()),
                None => Ok(0),
            }
        }
    }

    impl io::Write for ScriptedStream {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.written.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn channel(reads: &[Option<u8>]) -> Channel<RplidarHostProtocol, ScriptedStream> {
        Channel::new(
            RplidarHostProtocol::new(),
            Box::new(ScriptedStream::new(reads)),
        )
    }

    #[test]
    fn reads_exactly_count_bytes() {
        let mut chn = channel(&[Some(1), Some(55), Some(88), Some(111), Some(222), Some(111)]);
        let bytes = chn.read_bytes_until(5, Duration::from_secs(2)).unwrap();
        assert_eq!(bytes, vec![1, 55, 88, 111, 222]);
        assert_eq!(chn.stream.reads.len(), 1);
    }

    #[test]
    fn missing_bytes_do_not_count() {
        let mut chn = channel(&[None, Some(1), None, None, Some(2), Some(3)]);
        let bytes = chn.read_bytes_until(3, Duration::from_secs(2)).unwrap();
        assert_eq!(bytes, vec![1, 2, 3]);
    }

    #[test]
    fn zero_bytes_returns_immediately() {
        let mut chn = channel(&[]);
        assert!(chn
            .read_bytes_until(0, Duration::from_millis(10))
            .unwrap()
            .is_empty());
    }

    #[test]
    fn stalled_stream_times_out_without_partial_result() {
        let timeout = Duration::from_millis(100);
        let mut chn = channel(&[Some(1), Some(2), Some(3)]);
        let start = Instant::now();
        match chn.read_bytes_until(5, timeout) {
            Err(Error::OperationTimeout { expected, received }) => {
                assert_eq!(expected, 5);
                assert_eq!(received, 3);
            }
            other => panic!("expected timeout, got {:?}", other),
        }
        assert!(start.elapsed() >= timeout);
    }

    #[test]
    fn drain_reads_until_no_data() {
        let mut chn = channel(&[Some(1), Some(2), Some(3), Some(4), Some(5), None, Some(6)]);
        assert_eq!(chn.drain().unwrap(), 5);
        assert_eq!(chn.stream.reads.len(), 1);
    }

    #[test]
    fn drain_stops_on_end_of_data() {
        let mut chn = channel(&[Some(9)]);
        chn.stream.stall_when_empty = false;
        assert_eq!(chn.drain().unwrap(), 1);
    }

    #[test]
    fn write_encodes_and_flushes() {
        let mut chn = channel(&[]);
        assert_eq!(chn.write(&Message::new(Command::Scan)).unwrap(), 2);
        assert_eq!(chn.stream.written, vec![0xA5, 0x20]);
    }

    #[test]
    fn hard_io_errors_surface() {
        struct Broken;
        impl io::Read for Broken {
            fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
                Err(io::ErrorKind::BrokenPipe.into())
            }
        }
        impl io::Write for Broken {
            fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
                Ok(buf.len())
            }
            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let mut chn = Channel::new(RplidarHostProtocol::new(), Box::new(Broken));
        assert!(matches!(chn.read_byte(), Err(Error::IoError(_))));
    }
}
