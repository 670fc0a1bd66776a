pub mod builder;
pub mod constants;
pub mod cursor;
pub mod error;
pub mod pattern;
pub mod timestamp;

pub use builder::GnxDecoder;
pub use error::DecodeError;

use crate::identity::IdentityResolver;
use crate::thread_manager::SteppableTask;
use crate::types::{InboundSentence, PositionRecord};

pub struct SentenceDecoderTask<R> {
    decoder: GnxDecoder<R>,
    receiver: crossbeam_channel::Receiver<InboundSentence>,
    sender: crossbeam_channel::Sender<PositionRecord>,
}

impl<R> SentenceDecoderTask<R>
where
    R: IdentityResolver + Send + 'static,
{
    #[must_use]
    pub fn new(
        decoder: GnxDecoder<R>,
        sentence_receiver: crossbeam_channel::Receiver<InboundSentence>,
        record_sender: crossbeam_channel::Sender<PositionRecord>,
    ) -> Self {
        SentenceDecoderTask {
            decoder,
            receiver: sentence_receiver,
            sender: record_sender,
        }
    }
}

impl<R> SteppableTask for SentenceDecoderTask<R>
where
    R: IdentityResolver + Send + 'static,
{
    fn step(&mut self) -> bool {
        let Ok(inbound) = self.receiver.recv() else {
            log::info!("SentenceDecoder: upstream disconnected");
            return false;
        };

        match self.decoder.decode(&inbound.sentence, &inbound.context) {
            Ok(Some(record)) => {
                if let Err(err) = self.sender.send(record) {
                    log::error!("SentenceDecoder: failed to forward record: {err}");
                    return false;
                }
            }
            Ok(None) => log::debug!(
                "Discarding sentence from {}: {}",
                inbound.context,
                inbound.sentence
            ),
            Err(err) => log::error!(
                "Decoder defect on sentence from {}: {err}: {}",
                inbound.context,
                inbound.sentence
            ),
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use super::{GnxDecoder, SentenceDecoderTask};
    use crate::identity::DeviceRegistry;
    use crate::thread_manager::SteppableTask;
    use crate::types::{ChannelContext, DeviceId, InboundSentence};

    fn inbound(sentence: &str) -> InboundSentence {
        InboundSentence {
            context: ChannelContext::new("test", None),
            sentence: sentence.to_string(),
        }
    }

    #[test]
    fn when_sentences_arrive_then_only_decoded_records_are_forwarded() {
        let (sentence_sender, sentence_receiver) = crossbeam_channel::unbounded();
        let (record_sender, record_receiver) = crossbeam_channel::unbounded();
        let registry = DeviceRegistry::from_iter([(String::from("99"), DeviceId::new(7))]);
        let mut task =
            SentenceDecoderTask::new(GnxDecoder::new(registry), sentence_receiver, record_sender);

        sentence_sender
            .send(inbound(
                "$GNX_MIF,99,0,123456,010120,123456,010120,1,1234.5678,N,08912.3456,E,0,CARD9,",
            ))
            .unwrap();
        sentence_sender.send(inbound("noise")).unwrap();
        sentence_sender
            .send(inbound(
                "$GNX_XYZ,42,0,123456,010120,123456,010120,1,1234.5678,N,08912.3456,E,",
            ))
            .unwrap();

        assert!(task.step());
        assert!(task.step());
        assert!(task.step());

        let records: Vec<_> = record_receiver.try_iter().collect();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].device_id, DeviceId::new(7));
        assert_eq!(records[0].rfid.as_deref(), Some("CARD9"));
    }

    #[test]
    fn when_upstream_disconnects_then_task_stops() {
        let (sentence_sender, sentence_receiver) = crossbeam_channel::unbounded();
        let (record_sender, _record_receiver) = crossbeam_channel::unbounded();
        let mut task = SentenceDecoderTask::new(
            GnxDecoder::new(DeviceRegistry::default()),
            sentence_receiver,
            record_sender,
        );

        drop(sentence_sender);

        assert!(!task.step());
    }
}
