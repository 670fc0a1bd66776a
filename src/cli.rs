use clap::Parser;

#[derive(Parser, Debug)]
#[command(version, about = "Decodes GNX tracker sentences into position records", long_about = None)]
pub struct Cli {
    /// Seconds to run before stopping; runs until the feed ends when absent.
    #[arg(long)]
    pub duration: Option<u64>,

    #[command(flatten)]
    pub ingestor: IngestorArgs,

    #[arg(short, long, default_value_t = log::LevelFilter::Info)]
    pub logging_level: log::LevelFilter,

    #[arg(long)]
    pub config_file: std::path::PathBuf,
}

#[derive(Parser, Debug, Clone)]
pub struct IngestorArgs {
    /// Replay sentences from this file instead of connecting to the feed.
    #[arg(long)]
    pub read_input_data_stream: Option<std::path::PathBuf>,
}
