//! Threshold-based issue detection over segmenter and metrics output.

use crate::analysis::AnalysisConfig;
use crate::metrics::RunMetrics;
use crate::models::SectionTimes;

/// Produce human-readable issues in detection order: slow sections,
/// then the checkpoint rate, then close obstacle encounters.
pub fn detect_issues(
    section_times: &SectionTimes,
    metrics: &RunMetrics,
    config: &AnalysisConfig,
) -> Vec<String> {
    let mut issues = Vec::new();

    for (section, duration_ms) in section_times.iter() {
        if duration_ms > config.slow_section_ms {
            issues.push(format!(
                "Slow section: {} took {:.3}s",
                section.display_name(),
                ms_to_secs(duration_ms)
            ));
        }
    }

    // An empty run has no rate to complain about.
    if metrics.reading_count > 0 && metrics.checkpoint_rate < config.min_checkpoint_rate {
        issues.push(format!(
            "Low checkpoint success rate: {:.1}%",
            metrics.checkpoint_rate
        ));
    }

    for encounter in &metrics.close_encounters {
        issues.push(format!(
            "Very close obstacle encounter: {:.1}cm at {:.3}s",
            encounter.min_distance_cm,
            ms_to_secs(encounter.time_ms)
        ));
    }

    issues
}

fn ms_to_secs(ms: u64) -> f64 {
    ms as f64 / 1000.0
}
