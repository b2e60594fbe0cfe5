pub mod analysis;
pub mod cli;
pub mod generator;
pub mod ingest;
pub mod issues;
pub mod metrics;
pub mod models;
pub mod segmentation;
pub mod settings;
pub mod timeline;
pub mod utils;

pub use analysis::{analyze_logs, analyze_run, AnalysisConfig, AnalysisError, AnalyzedRun};
pub use models::{AnalysisRecord, LogRecord, Run, RunMetadata, SectionId, TimelineEvent};

use clap::Parser;

const ENABLE_LOGS: bool = true;

/// Binary entry point: parse arguments, set up logging, run the command.
pub fn run() -> i32 {
    let cli = cli::Cli::parse();
    utils::init_logging();

    match cli::execute(cli) {
        Ok(()) => 0,
        Err(err) => {
            crate::log_error!("{:#}", err);
            1
        }
    }
}
