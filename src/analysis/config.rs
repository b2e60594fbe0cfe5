use serde::{Deserialize, Serialize};

/// Configuration for the analysis engine with tunable thresholds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Adjacent claw samples further apart than this count as a change
    pub claw_change_threshold_deg: f64,

    /// Claw is considered closed below this angle
    pub claw_closed_below_deg: f64,

    /// Claw is considered open above this angle
    pub claw_open_above_deg: f64,

    /// Ultrasonic reading that starts an obstacle encounter
    pub obstacle_enter_below_cm: f64,

    /// Ultrasonic reading that ends an obstacle encounter
    pub obstacle_clear_above_cm: f64,

    /// Issue thresholds
    pub slow_section_ms: u64,
    pub min_checkpoint_rate: f64,
    pub close_obstacle_cm: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            claw_change_threshold_deg: 10.0,
            claw_closed_below_deg: 45.0,
            claw_open_above_deg: 90.0,
            obstacle_enter_below_cm: 15.0,
            obstacle_clear_above_cm: 30.0,
            slow_section_ms: 15_000,
            min_checkpoint_rate: 50.0,
            close_obstacle_cm: 10.0,
        }
    }
}

impl AnalysisConfig {
    /// Reject threshold combinations that would make the detectors ambiguous.
    pub fn validate(&self) -> Result<(), String> {
        if self.claw_closed_below_deg > self.claw_open_above_deg {
            return Err(format!(
                "claw_closed_below_deg ({}) must not exceed claw_open_above_deg ({})",
                self.claw_closed_below_deg, self.claw_open_above_deg
            ));
        }
        if self.obstacle_enter_below_cm > self.obstacle_clear_above_cm {
            return Err(format!(
                "obstacle_enter_below_cm ({}) must not exceed obstacle_clear_above_cm ({})",
                self.obstacle_enter_below_cm, self.obstacle_clear_above_cm
            ));
        }
        if self.claw_change_threshold_deg < 0.0 {
            return Err("claw_change_threshold_deg must be non-negative".to_string());
        }
        Ok(())
    }
}
