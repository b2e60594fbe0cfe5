use clap::ValueEnum;
use std::fmt;

/// How well the simulated robot performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PerformanceProfile {
    /// Fast traversal, short pauses
    Excellent,
    Good,
    /// Slow traversal, long pauses, frequently stuck
    Poor,
}

impl PerformanceProfile {
    pub const ALL: [PerformanceProfile; 3] = [
        PerformanceProfile::Excellent,
        PerformanceProfile::Good,
        PerformanceProfile::Poor,
    ];

    pub fn speed_multiplier(self) -> f64 {
        match self {
            PerformanceProfile::Excellent => 0.7,
            PerformanceProfile::Good => 1.0,
            PerformanceProfile::Poor => 1.5,
        }
    }

    pub fn pause_multiplier(self) -> f64 {
        match self {
            PerformanceProfile::Excellent => 0.5,
            PerformanceProfile::Good => 1.0,
            PerformanceProfile::Poor => 2.0,
        }
    }

    pub fn stuck_chance(self) -> f64 {
        match self {
            PerformanceProfile::Excellent => 0.02,
            PerformanceProfile::Good => 0.05,
            PerformanceProfile::Poor => 0.15,
        }
    }

    pub fn checkpoint_probability(self) -> f64 {
        match self {
            PerformanceProfile::Excellent => 0.95,
            PerformanceProfile::Good => 0.75,
            PerformanceProfile::Poor => 0.55,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PerformanceProfile::Excellent => "excellent",
            PerformanceProfile::Good => "good",
            PerformanceProfile::Poor => "poor",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            PerformanceProfile::Excellent => "Excellent",
            PerformanceProfile::Good => "Good",
            PerformanceProfile::Poor => "Poor",
        }
    }
}

impl fmt::Display for PerformanceProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
