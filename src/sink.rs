use crate::thread_manager::SteppableTask;
use crate::types::PositionRecord;

/// Drains decoded records and writes each one to the log.
pub struct RecordLogger {
    receiver: crossbeam_channel::Receiver<PositionRecord>,
    records_logged: usize,
}

impl RecordLogger {
    #[must_use]
    pub fn new(record_receiver: crossbeam_channel::Receiver<PositionRecord>) -> Self {
        RecordLogger {
            receiver: record_receiver,
            records_logged: 0,
        }
    }

    #[must_use]
    pub fn records_logged(&self) -> usize {
        self.records_logged
    }
}

impl SteppableTask for RecordLogger {
    fn step(&mut self) -> bool {
        loop {
            match self.receiver.try_recv() {
                Ok(record) => {
                    log::info!("{record}");
                    self.records_logged += 1;
                }
                Err(crossbeam_channel::TryRecvError::Empty) => return true,
                // Only reported once the channel is drained.
                Err(crossbeam_channel::TryRecvError::Disconnected) => return false,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::RecordLogger;
    use crate::thread_manager::SteppableTask;
    use crate::types::{DeviceId, PositionRecord};

    fn record() -> PositionRecord {
        let time = chrono::DateTime::parse_from_rfc3339("2020-01-01T12:34:56+05:30")
            .expect("valid timestamp");
        PositionRecord {
            protocol: "gnx",
            device_id: DeviceId::new(1),
            device_time: time,
            fix_time: time,
            valid: true,
            latitude: 0.0,
            longitude: 0.0,
            archive: None,
            rfid: None,
        }
    }

    #[test]
    fn when_records_are_pending_then_all_are_drained_in_one_step() {
        let (sender, receiver) = crossbeam_channel::unbounded();
        let mut logger = RecordLogger::new(receiver);

        sender.send(record()).unwrap();
        sender.send(record()).unwrap();

        assert!(logger.step());
        assert_eq!(logger.records_logged(), 2);
    }

    #[test]
    fn when_upstream_disconnects_then_logger_drains_and_stops() {
        let (sender, receiver) = crossbeam_channel::unbounded();
        let mut logger = RecordLogger::new(receiver);

        sender.send(record()).unwrap();
        drop(sender);

        assert!(!logger.step());
        assert_eq!(logger.records_logged(), 1);
    }
}
