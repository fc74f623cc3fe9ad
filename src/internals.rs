use crate::types::ScanRecord;
use log::trace;
use std::time::Duration;

/// Default time budget for accumulating one answer from the port.
pub const RPLIDAR_DEFAULT_TIMEOUT: Duration = Duration::from_secs(2);

/// Default serial baud rate of the A2.
pub const RPLIDAR_DEFAULT_BAUDRATE: u32 = 115_200;

/// Default blocking time of a single-byte read on the serial port.
pub const RPLIDAR_DEFAULT_POLL_TIMEOUT: Duration = Duration::from_millis(1);

/// Default PWM value used when starting the motor with `start_motor()`.
pub const RPLIDAR_DEFAULT_MOTOR_PWM: u16 = 660;

/// Default pause after each request without payload.
pub const RPLIDAR_DEFAULT_COMMAND_DELAY: Duration = Duration::from_millis(500);

/// Result of feeding one record into a `ScanSession`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStep {
    /// More records are needed.
    Continue,
    /// The requested number of revolutions has been collected.
    Complete,
}

/// Collects measurement records for a fixed number of revolutions.
///
/// Records before the first revolution boundary are discarded, since they belong
/// to a sweep that was already in flight when the scan started. The boundary record
/// that closes the last requested revolution is not kept.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanSession {
    requested: usize,
    boundaries_seen: usize,
    records: Vec<ScanRecord>,
}

impl ScanSession {
    pub fn new(revolutions: usize) -> ScanSession {
        trace!("New scan session for {} revolution(s)", revolutions);
        ScanSession {
            requested: revolutions,
            boundaries_seen: 0,
            records: Vec::new(),
        }
    }

    /// Number of complete revolutions collected so far.
    pub fn revolutions_seen(&self) -> usize {
        self.boundaries_seen.saturating_sub(1)
    }

    pub fn is_complete(&self) -> bool {
        self.boundaries_seen > self.requested
    }

    /// Feeds one decoded record and reports whether the session is done.
    pub fn push(&mut self, record: ScanRecord) -> SessionStep {
        if self.is_complete() {
            return SessionStep::Complete;
        }

        if record.is_new_revolution {
            self.boundaries_seen += 1;
            trace!(
                "Revolution boundary {} at angle {:.3}",
                self.boundaries_seen,
                record.angle()
            );
        }

        if self.is_complete() {
            trace!(
                "Scan session complete: {} revolution(s), {} record(s)",
                self.revolutions_seen(),
                self.records.len()
            );
            return SessionStep::Complete;
        }

        if self.boundaries_seen > 0 {
            self.records.push(record);
        } else {
            trace!("Discarding record before first revolution boundary");
        }
        SessionStep::Continue
    }

    /// Consumes the session, yielding the collected records.
    pub fn into_records(self) -> Vec<ScanRecord> {
        self.records
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(is_new_revolution: bool, angle_q6: u16) -> ScanRecord {
        ScanRecord {
            is_new_revolution,
            quality: 10,
            angle_q6,
            distance_q2: 880,
        }
    }

    #[test]
    fn single_revolution_excludes_closing_boundary() {
        let mut session = ScanSession::new(1);
        assert_eq!(session.push(record(true, 110)), SessionStep::Continue);
        assert_eq!(session.push(record(false, 111)), SessionStep::Continue);
        assert_eq!(session.push(record(true, 112)), SessionStep::Complete);
        assert_eq!(
            session.into_records(),
            vec![record(true, 110), record(false, 111)]
        );
    }

    #[test]
    fn leading_partial_revolution_is_discarded() {
        let mut session = ScanSession::new(1);
        assert_eq!(session.push(record(false, 300)), SessionStep::Continue);
        assert_eq!(session.push(record(false, 301)), SessionStep::Continue);
        assert_eq!(session.push(record(true, 1)), SessionStep::Continue);
        assert_eq!(session.push(record(false, 2)), SessionStep::Continue);
        assert_eq!(session.push(record(true, 3)), SessionStep::Complete);
        assert_eq!(session.into_records(), vec![record(true, 1), record(false, 2)]);
    }

    #[test]
    fn multiple_revolutions_keep_inner_boundaries() {
        let mut session = ScanSession::new(2);
        let stream = [
            record(true, 1),
            record(false, 2),
            record(true, 3),
            record(false, 4),
            record(true, 5),
        ];
        let mut steps = Vec::new();
        for r in stream.iter() {
            steps.push(session.push(*r));
        }
        assert_eq!(steps.last(), Some(&SessionStep::Complete));
        assert_eq!(session.revolutions_seen(), 2);
        assert_eq!(session.into_records(), stream[..4].to_vec());
    }

    #[test]
    fn zero_revolutions_complete_on_first_boundary() {
        let mut session = ScanSession::new(0);
        assert_eq!(session.push(record(false, 1)), SessionStep::Continue);
        assert_eq!(session.push(record(true, 2)), SessionStep::Complete);
        assert!(session.into_records().is_empty());
    }

    #[test]
    fn completed_session_ignores_further_records() {
        let mut session = ScanSession::new(1);
        session.push(record(true, 1));
        session.push(record(true, 2));
        assert!(session.is_complete());
        assert_eq!(session.push(record(false, 3)), SessionStep::Complete);
        assert_eq!(session.into_records().len(), 1);
    }
}
