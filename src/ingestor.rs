use crate::config::FeedConfig;
use crate::thread_manager::SteppableTask;
use crate::types::{ChannelContext, InboundSentence};

use std::io::BufRead;

/// Splits a byte stream into sentences, one per line, and sends each one
/// downstream tagged with the channel it arrived on.
pub struct Ingestor<R> {
    reader: R,
    context: ChannelContext,
    sender: crossbeam_channel::Sender<InboundSentence>,
}

impl Ingestor<std::io::BufReader<std::net::TcpStream>> {
    pub fn connect(
        config: &FeedConfig,
        sender: crossbeam_channel::Sender<InboundSentence>,
    ) -> Result<Self, std::io::Error> {
        log::info!("Connecting to feed {0}:{1}.", config.host, config.port);
        let stream = std::net::TcpStream::connect((config.host.as_str(), config.port))?;
        let context = ChannelContext::new("tcp", stream.peer_addr().ok());
        log::info!("Connection successful.");
        Ok(Ingestor::new(std::io::BufReader::new(stream), context, sender))
    }
}

impl Ingestor<std::io::BufReader<std::fs::File>> {
    pub fn replay(
        path: &std::path::Path,
        sender: crossbeam_channel::Sender<InboundSentence>,
    ) -> Result<Self, std::io::Error> {
        log::info!("Replaying sentences from {}.", path.display());
        let file = std::fs::File::open(path)?;
        let context = ChannelContext::new(format!("replay {}", path.display()), None);
        Ok(Ingestor::new(std::io::BufReader::new(file), context, sender))
    }
}

impl<R: BufRead> Ingestor<R> {
    #[must_use]
    pub fn new(
        reader: R,
        context: ChannelContext,
        sender: crossbeam_channel::Sender<InboundSentence>,
    ) -> Self {
        Ingestor {
            reader,
            context,
            sender,
        }
    }
}

impl<R: BufRead + Send + 'static> SteppableTask for Ingestor<R> {
    fn step(&mut self) -> bool {
        let mut line_buffer = String::new();

        let bytes_read = match self.reader.read_line(&mut line_buffer) {
            Ok(bytes_read) => bytes_read,
            Err(err) => {
                log::error!("Failed to read line from {}: {err}", self.context);
                return err.kind() == std::io::ErrorKind::InvalidData;
            }
        };

        if bytes_read == 0 {
            log::info!("End of stream from {}", self.context);
            return false;
        }

        let sentence = line_buffer.trim();
        if sentence.is_empty() {
            return true;
        }

        let inbound = InboundSentence {
            context: self.context.clone(),
            sentence: sentence.to_string(),
        };
        if let Err(err) = self.sender.send(inbound) {
            log::error!("Ingestor: failed to send to channel: {err}");
            return false;
        }
        true
    }
}
