pub mod cli;
pub mod config;
pub mod decoder;
pub mod identity;
pub mod ingestor;
pub mod logging;
pub mod sink;
pub mod thread_manager;
pub mod types;
