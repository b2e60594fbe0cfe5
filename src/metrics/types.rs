/// A run of consecutive readings below the close-obstacle threshold,
/// collapsed to its closest reading.
#[derive(Debug, Clone, PartialEq)]
pub struct CloseEncounter {
    pub min_distance_cm: f64,
    /// Timestamp of the first reading that reached the minimum.
    pub time_ms: u64,
    pub reading_count: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RunMetrics {
    pub reading_count: usize,
    pub checkpoint_hits: usize,
    pub checkpoint_rate: f64,
    pub ultrasonic_avg_cm: Option<f64>,
    pub ultrasonic_min_cm: Option<f64>,
    pub claw_changes: u32,
    pub close_encounters: Vec<CloseEncounter>,
}

impl Default for RunMetrics {
    fn default() -> Self {
        Self {
            reading_count: 0,
            checkpoint_hits: 0,
            checkpoint_rate: 0.0,
            ultrasonic_avg_cm: None,
            ultrasonic_min_cm: None,
            claw_changes: 0,
            close_encounters: Vec::new(),
        }
    }
}
