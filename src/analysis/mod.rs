pub mod composer;
pub mod config;
pub mod error;

pub use composer::{analyze_logs, analyze_run, validate_logs, AnalyzedRun};
pub use config::AnalysisConfig;
pub use error::AnalysisError;
