//! Log record data model.
//!
//! One sampled telemetry tuple from a robot's run through the course.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the three course regions a sample can be taken in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum SectionId {
    RedPath,
    Ramp,
    GreenPath,
}

impl SectionId {
    pub const ALL: [SectionId; 3] = [SectionId::RedPath, SectionId::Ramp, SectionId::GreenPath];

    pub fn as_u8(self) -> u8 {
        match self {
            SectionId::RedPath => 1,
            SectionId::Ramp => 2,
            SectionId::GreenPath => 3,
        }
    }

    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            1 => Some(SectionId::RedPath),
            2 => Some(SectionId::Ramp),
            3 => Some(SectionId::GreenPath),
            _ => None,
        }
    }

    /// Human readable name used in issue strings.
    pub fn display_name(self) -> &'static str {
        match self {
            SectionId::RedPath => "Red Path",
            SectionId::Ramp => "Ramp",
            SectionId::GreenPath => "Green Path",
        }
    }
}

impl From<SectionId> for u8 {
    fn from(section: SectionId) -> Self {
        section.as_u8()
    }
}

impl TryFrom<u8> for SectionId {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        SectionId::from_u8(value).ok_or_else(|| format!("section_id {} is not one of 1, 2, 3", value))
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// A single validated telemetry sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogRecord {
    pub section_id: SectionId,
    /// Milliseconds since run start.
    pub timestamp_ms: u64,
    pub checkpoint_success: bool,
    pub ultrasonic_distance_cm: f64,
    pub claw_angle_deg: f64,
}

impl LogRecord {
    pub fn new(
        section_id: SectionId,
        timestamp_ms: u64,
        checkpoint_success: bool,
        ultrasonic_distance_cm: f64,
        claw_angle_deg: f64,
    ) -> Self {
        Self {
            section_id,
            timestamp_ms,
            checkpoint_success,
            ultrasonic_distance_cm,
            claw_angle_deg,
        }
    }

    /// Check the value domains that the type system cannot express.
    ///
    /// Returns a description of the first violated domain.
    pub fn domain_violation(&self) -> Option<String> {
        if !self.ultrasonic_distance_cm.is_finite() || self.ultrasonic_distance_cm < 0.0 {
            return Some(format!(
                "ultrasonic_distance_cm {} must be a non-negative number",
                self.ultrasonic_distance_cm
            ));
        }
        if !self.claw_angle_deg.is_finite() || !(0.0..=180.0).contains(&self.claw_angle_deg) {
            return Some(format!(
                "claw_angle_deg {} must be within [0, 180]",
                self.claw_angle_deg
            ));
        }
        None
    }
}
