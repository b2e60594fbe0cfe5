//! Analysis record data model.
//!
//! The derived record the engine produces for one run. Field names on the
//! wire follow the documented analysis JSON contract.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::log_record::SectionId;

/// A contiguous stretch of samples taken in one section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionInterval {
    pub section_id: SectionId,
    pub start_ms: u64,
    /// Handoff timestamp: first sample of the next interval, or the last
    /// sample of the run for the final interval.
    pub end_ms: u64,
    pub duration_ms: u64,
    /// Timestamp of the last sample actually taken in this section.
    pub last_sample_ms: u64,
    pub first_index: usize,
    pub last_index: usize,
}

/// Total time per section id. Always holds all three sections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SectionTimes(BTreeMap<SectionId, u64>);

impl SectionTimes {
    pub fn zeroed() -> Self {
        Self(SectionId::ALL.iter().map(|id| (*id, 0)).collect())
    }

    pub fn add(&mut self, section: SectionId, duration_ms: u64) {
        *self.0.entry(section).or_insert(0) += duration_ms;
    }

    pub fn get(&self, section: SectionId) -> u64 {
        self.0.get(&section).copied().unwrap_or(0)
    }

    pub fn total_ms(&self) -> u64 {
        self.0.values().sum()
    }

    /// Iterate in section id order.
    pub fn iter(&self) -> impl Iterator<Item = (SectionId, u64)> + '_ {
        self.0.iter().map(|(id, ms)| (*id, *ms))
    }
}

impl Default for SectionTimes {
    fn default() -> Self {
        Self::zeroed()
    }
}

/// Coarse mission stage used to group timeline events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Phase {
    StartUnlock,
    RampTarget,
    ObstacleCourse,
    Conclusion,
}

impl Phase {
    pub fn number(self) -> u8 {
        match self {
            Phase::StartUnlock => 1,
            Phase::RampTarget => 2,
            Phase::ObstacleCourse => 3,
            Phase::Conclusion => 4,
        }
    }
}

impl From<Phase> for u8 {
    fn from(phase: Phase) -> Self {
        phase.number()
    }
}

impl TryFrom<u8> for Phase {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Phase::StartUnlock),
            2 => Ok(Phase::RampTarget),
            3 => Ok(Phase::ObstacleCourse),
            4 => Ok(Phase::Conclusion),
            other => Err(format!("phase {} is not one of 1..=4", other)),
        }
    }
}

/// A detected milestone on the mission timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineEvent {
    pub time_ms: u64,
    pub event: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phase: Option<Phase>,
}

/// The full derived analysis of one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRecord {
    pub section_times: SectionTimes,
    pub section_intervals: Vec<SectionInterval>,
    pub checkpoint_rate: f64,
    #[serde(rename = "ultrasonic_avg", default, skip_serializing_if = "Option::is_none")]
    pub ultrasonic_avg_cm: Option<f64>,
    #[serde(rename = "ultrasonic_min", default, skip_serializing_if = "Option::is_none")]
    pub ultrasonic_min_cm: Option<f64>,
    pub claw_changes: u32,
    pub timeline: Vec<TimelineEvent>,
    pub issues: Vec<String>,
    /// Natural-language summary produced outside the engine.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}
