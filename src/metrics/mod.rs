mod types;

pub use types::{CloseEncounter, RunMetrics};

use crate::analysis::AnalysisConfig;
use crate::models::LogRecord;

/// Compute the scalar statistics for a whole run.
pub fn aggregate(records: &[LogRecord], config: &AnalysisConfig) -> RunMetrics {
    if records.is_empty() {
        return RunMetrics::default();
    }

    let checkpoint_hits = records.iter().filter(|r| r.checkpoint_success).count();
    let checkpoint_rate = 100.0 * checkpoint_hits as f64 / records.len() as f64;

    let (ultrasonic_avg_cm, ultrasonic_min_cm) = ultrasonic_stats(records);

    RunMetrics {
        reading_count: records.len(),
        checkpoint_hits,
        checkpoint_rate,
        ultrasonic_avg_cm,
        ultrasonic_min_cm,
        claw_changes: count_claw_changes(records, config.claw_change_threshold_deg),
        close_encounters: find_close_encounters(records, config.close_obstacle_cm),
    }
}

fn ultrasonic_stats(records: &[LogRecord]) -> (Option<f64>, Option<f64>) {
    if records.is_empty() {
        return (None, None);
    }

    let total: f64 = records.iter().map(|r| r.ultrasonic_distance_cm).sum();
    let min = records
        .iter()
        .map(|r| r.ultrasonic_distance_cm)
        .fold(f64::INFINITY, f64::min);

    (Some(total / records.len() as f64), Some(min))
}

/// Count adjacent pairs whose claw angles differ by more than the threshold.
///
/// Only neighbouring samples are compared, so slow drift never adds up to a
/// change.
pub fn count_claw_changes(records: &[LogRecord], threshold_deg: f64) -> u32 {
    records
        .windows(2)
        .filter(|pair| (pair[1].claw_angle_deg - pair[0].claw_angle_deg).abs() > threshold_deg)
        .count() as u32
}

/// Collapse consecutive readings below `threshold_cm` into one encounter each.
pub fn find_close_encounters(records: &[LogRecord], threshold_cm: f64) -> Vec<CloseEncounter> {
    let mut encounters = Vec::new();
    let mut current: Option<CloseEncounter> = None;

    for record in records {
        let distance = record.ultrasonic_distance_cm;
        if distance < threshold_cm {
            match &mut current {
                Some(encounter) => {
                    encounter.reading_count += 1;
                    if distance < encounter.min_distance_cm {
                        encounter.min_distance_cm = distance;
                        encounter.time_ms = record.timestamp_ms;
                    }
                }
                None => {
                    current = Some(CloseEncounter {
                        min_distance_cm: distance,
                        time_ms: record.timestamp_ms,
                        reading_count: 1,
                    });
                }
            }
        } else if let Some(encounter) = current.take() {
            encounters.push(encounter);
        }
    }

    if let Some(encounter) = current {
        encounters.push(encounter);
    }

    encounters
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SectionId;

    fn with_claw(angles: &[f64]) -> Vec<LogRecord> {
        angles
            .iter()
            .enumerate()
            .map(|(i, angle)| LogRecord::new(SectionId::RedPath, i as u64 * 100, false, 30.0, *angle))
            .collect()
    }

    fn with_ultrasonic(distances: &[f64]) -> Vec<LogRecord> {
        distances
            .iter()
            .enumerate()
            .map(|(i, d)| LogRecord::new(SectionId::RedPath, i as u64 * 100, true, *d, 90.0))
            .collect()
    }

    #[test]
    fn claw_changes_count_only_significant_steps() {
        let records = with_claw(&[0.0, 5.0, 8.0, 50.0, 95.0, 92.0]);
        assert_eq!(count_claw_changes(&records, 10.0), 2);

        let drift = with_claw(&[0.0, 5.0, 8.0, 12.0]);
        assert_eq!(count_claw_changes(&drift, 10.0), 0);
    }

    #[test]
    fn claw_change_at_exact_threshold_is_not_counted() {
        let records = with_claw(&[0.0, 10.0, 20.5]);
        assert_eq!(count_claw_changes(&records, 10.0), 1);
    }

    #[test]
    fn empty_run_has_zero_rate_and_no_ultrasonic_stats() {
        let metrics = aggregate(&[], &AnalysisConfig::default());
        assert_eq!(metrics.checkpoint_rate, 0.0);
        assert!(metrics.ultrasonic_avg_cm.is_none());
        assert!(metrics.ultrasonic_min_cm.is_none());
        assert_eq!(metrics.claw_changes, 0);
    }

    #[test]
    fn checkpoint_rate_and_ultrasonic_stats() {
        let mut records = with_ultrasonic(&[20.0, 40.0, 30.0, 10.0]);
        records[1].checkpoint_success = false;

        let metrics = aggregate(&records, &AnalysisConfig::default());
        assert_eq!(metrics.reading_count, 4);
        assert_eq!(metrics.checkpoint_hits, 3);
        assert!((metrics.checkpoint_rate - 75.0).abs() < 1e-9);
        assert_eq!(metrics.ultrasonic_avg_cm, Some(25.0));
        assert_eq!(metrics.ultrasonic_min_cm, Some(10.0));
    }

    #[test]
    fn close_encounters_collapse_consecutive_readings() {
        let records = with_ultrasonic(&[30.0, 9.0, 7.5, 7.5, 9.5, 25.0, 8.0, 40.0, 6.0]);
        let encounters = find_close_encounters(&records, 10.0);

        assert_eq!(encounters.len(), 3);
        assert_eq!(encounters[0].min_distance_cm, 7.5);
        assert_eq!(encounters[0].time_ms, 200);
        assert_eq!(encounters[0].reading_count, 4);
        assert_eq!(encounters[1].min_distance_cm, 8.0);
        assert_eq!(encounters[1].time_ms, 600);
        // Encounter still open at the end of the run.
        assert_eq!(encounters[2].time_ms, 800);
    }
}
