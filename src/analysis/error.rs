/// Errors that fail the analysis of a single run.
///
/// None of them leave a partial record behind.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("malformed log record at index {index}: {reason}")]
    MalformedInput { index: usize, reason: String },

    #[error(
        "log record at index {index} has timestamp {timestamp_ms}ms, earlier than the previous {previous_ms}ms"
    )]
    UnorderedInput {
        index: usize,
        previous_ms: u64,
        timestamp_ms: u64,
    },

    #[error("invalid run submission: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("invalid analysis config: {0}")]
    InvalidConfig(String),
}

impl AnalysisError {
    pub fn malformed(index: usize, reason: impl Into<String>) -> Self {
        Self::MalformedInput {
            index,
            reason: reason.into(),
        }
    }
}
