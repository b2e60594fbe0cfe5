//! Run submission ingestion.
//!
//! Accepts the JSON shape robots upload after a run and turns it into a
//! validated [`Run`]. Fields the analysis does not use (positions, path
//! segments, recorded events) are ignored.

use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;

use crate::analysis::{validate_logs, AnalysisError};
use crate::log_info;
use crate::models::{LogRecord, Run, RunMetadata, SectionId};

const ENABLE_LOGS: bool = true;

#[derive(Debug, Deserialize)]
struct RawRunSubmission {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    robot_id: Option<String>,
    #[serde(default)]
    run_number: Option<u32>,
    logs: Vec<RawLogRecord>,
    #[serde(default)]
    metadata: RawMetadata,
}

#[derive(Debug, Default, Deserialize)]
struct RawMetadata {
    #[serde(default)]
    duration_ms: Option<u64>,
    #[serde(default)]
    competition: Option<String>,
    #[serde(default)]
    notes: Option<String>,
}

/// One log entry as uploaded. Every field is optional here so that a missing
/// field is reported with the record's index instead of a bare serde error.
#[derive(Debug, Deserialize)]
struct RawLogRecord {
    section_id: Option<Value>,
    #[serde(alias = "timestamp_ms")]
    timestamp: Option<Value>,
    checkpoint_success: Option<Value>,
    #[serde(alias = "ultrasonic_distance_cm")]
    ultrasonic_distance: Option<Value>,
    #[serde(alias = "claw_angle_deg", alias = "claw_angle")]
    claw_status: Option<Value>,
}

/// Parse a run submission from JSON text.
pub fn parse_run(json: &str) -> Result<Run, AnalysisError> {
    let value: Value = serde_json::from_str(json)?;
    run_from_value(value)
}

/// Build a run from an already parsed submission.
pub fn run_from_value(value: Value) -> Result<Run, AnalysisError> {
    let raw: RawRunSubmission = serde_json::from_value(value)?;

    let logs = raw
        .logs
        .iter()
        .enumerate()
        .map(|(index, raw_record)| convert_record(index, raw_record))
        .collect::<Result<Vec<_>, _>>()?;
    validate_logs(&logs)?;

    let duration_ms = raw.metadata.duration_ms.unwrap_or_else(|| {
        logs.last().map(|r| r.timestamp_ms).unwrap_or(0)
    });

    let run = Run {
        id: raw.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
        robot_id: raw.robot_id.unwrap_or_default(),
        run_number: raw.run_number.unwrap_or(0),
        logs,
        metadata: RunMetadata {
            duration_ms,
            competition: raw.metadata.competition.unwrap_or_default(),
            notes: raw.metadata.notes.unwrap_or_default(),
        },
    };

    log_info!(
        "Ingested run {} (robot {:?}, #{}) with {} readings",
        run.id,
        run.robot_id,
        run.run_number,
        run.reading_count()
    );

    Ok(run)
}

fn convert_record(index: usize, raw: &RawLogRecord) -> Result<LogRecord, AnalysisError> {
    let section_value = require(index, "section_id", &raw.section_id)?;
    let section_id = as_whole_number(section_value)
        .and_then(|n| u8::try_from(n).ok())
        .and_then(SectionId::from_u8)
        .ok_or_else(|| {
            AnalysisError::malformed(index, format!("section_id {} is not one of 1, 2, 3", section_value))
        })?;

    let timestamp_value = require(index, "timestamp", &raw.timestamp)?;
    let timestamp_ms = as_whole_number(timestamp_value).ok_or_else(|| {
        AnalysisError::malformed(
            index,
            format!("timestamp {} must be a non-negative integer", timestamp_value),
        )
    })?;

    let checkpoint_value = require(index, "checkpoint_success", &raw.checkpoint_success)?;
    let checkpoint_success = match checkpoint_value {
        Value::Bool(flag) => *flag,
        other => match as_whole_number(other) {
            Some(0) => false,
            Some(1) => true,
            _ => {
                return Err(AnalysisError::malformed(
                    index,
                    format!("checkpoint_success {} must be 0 or 1", other),
                ))
            }
        },
    };

    let ultrasonic_distance_cm = as_number(index, "ultrasonic_distance", &raw.ultrasonic_distance)?;
    let claw_angle_deg = as_number(index, "claw_status", &raw.claw_status)?;

    let record = LogRecord::new(
        section_id,
        timestamp_ms,
        checkpoint_success,
        ultrasonic_distance_cm,
        claw_angle_deg,
    );
    if let Some(reason) = record.domain_violation() {
        return Err(AnalysisError::malformed(index, reason));
    }

    Ok(record)
}

fn require<'a>(
    index: usize,
    field: &str,
    value: &'a Option<Value>,
) -> Result<&'a Value, AnalysisError> {
    match value {
        Some(Value::Null) | None => Err(AnalysisError::malformed(
            index,
            format!("missing field `{}`", field),
        )),
        Some(value) => Ok(value),
    }
}

fn as_number(index: usize, field: &str, value: &Option<Value>) -> Result<f64, AnalysisError> {
    let value = require(index, field, value)?;
    value
        .as_f64()
        .ok_or_else(|| AnalysisError::malformed(index, format!("{} {} is not a number", field, value)))
}

/// Non-negative integers, also when written as `12.0`.
fn as_whole_number(value: &Value) -> Option<u64> {
    if let Some(n) = value.as_u64() {
        return Some(n);
    }
    let n = value.as_f64()?;
    if n.is_finite() && n >= 0.0 && n.fract() == 0.0 && n <= u64::MAX as f64 {
        Some(n as u64)
    } else {
        None
    }
}
