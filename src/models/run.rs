use serde::{Deserialize, Serialize};

use super::log_record::LogRecord;

/// Free-text metadata submitted alongside a run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunMetadata {
    pub duration_ms: u64,
    #[serde(default)]
    pub competition: String,
    #[serde(default)]
    pub notes: String,
}

/// One complete recorded attempt through the course.
///
/// A run is never mutated by analysis; the engine only borrows it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Run {
    pub id: String,
    pub robot_id: String,
    pub run_number: u32,
    pub logs: Vec<LogRecord>,
    pub metadata: RunMetadata,
}

impl Run {
    pub fn new(id: impl Into<String>, logs: Vec<LogRecord>, metadata: RunMetadata) -> Self {
        Self {
            id: id.into(),
            robot_id: String::new(),
            run_number: 0,
            logs,
            metadata,
        }
    }

    pub fn reading_count(&self) -> usize {
        self.logs.len()
    }
}
