use clap::Parser;
use gnx_decoder::cli::Cli;
use gnx_decoder::config::ApplicationConfig;
use gnx_decoder::decoder::{GnxDecoder, SentenceDecoderTask};
use gnx_decoder::ingestor::Ingestor;
use gnx_decoder::logging::setup_logging;
use gnx_decoder::sink::RecordLogger;
use gnx_decoder::thread_manager::ThreadManager;
use gnx_decoder::types::{InboundSentence, PositionRecord};
use log::info;

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();
    if let Err(err) = setup_logging(cli.logging_level) {
        eprintln!("Logger already installed: {err}");
    }

    let application_config = match ApplicationConfig::construct_from_path(&cli.config_file) {
        Ok(config) => config,
        Err(err) => {
            log::error!("{err}");
            return std::process::ExitCode::FAILURE;
        }
    };
    info!("Main: Application started.");

    let (sentence_sender, sentence_receiver): (
        crossbeam_channel::Sender<InboundSentence>,
        crossbeam_channel::Receiver<InboundSentence>,
    ) = crossbeam_channel::unbounded();

    let (record_sender, record_receiver): (
        crossbeam_channel::Sender<PositionRecord>,
        crossbeam_channel::Receiver<PositionRecord>,
    ) = crossbeam_channel::unbounded();

    let registry = application_config.device_registry();
    info!("Main: {} devices registered.", registry.len());
    let decoder_task =
        SentenceDecoderTask::new(GnxDecoder::new(registry), sentence_receiver, record_sender);
    let record_logger = RecordLogger::new(record_receiver);

    let mut thread_manager = ThreadManager::new();
    let ingestor_result = match &cli.ingestor.read_input_data_stream {
        Some(path) => Ingestor::replay(path, sentence_sender)
            .and_then(|ingestor| thread_manager.add_task(ingestor, std::time::Duration::ZERO)),
        None => Ingestor::connect(&application_config.feed, sentence_sender)
            .and_then(|ingestor| thread_manager.add_task(ingestor, std::time::Duration::ZERO)),
    };
    if let Err(err) = ingestor_result {
        log::error!("Error starting ingestor: {err}");
        return std::process::ExitCode::FAILURE;
    }

    let sink_period =
        std::time::Duration::from_millis(application_config.pipeline.sink_period_millis);
    let started = thread_manager
        .add_task(decoder_task, std::time::Duration::ZERO)
        .and_then(|_| thread_manager.add_task(record_logger, sink_period));
    let sink_task_id = match started {
        Ok(task_id) => task_id,
        Err(err) => {
            log::error!("Error starting pipeline: {err}");
            thread_manager.stop_all_tasks();
            return std::process::ExitCode::FAILURE;
        }
    };

    if let Some(duration) = cli.duration {
        std::thread::sleep(std::time::Duration::from_secs(duration));
        thread_manager.stop_all_tasks();
    }

    thread_manager.wait_on_task_finish(sink_task_id);

    info!("Main: Program finished.");
    std::process::ExitCode::SUCCESS
}
