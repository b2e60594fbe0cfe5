use utra_analysis_lib::generator::{generate_run, GeneratorOptions, PerformanceProfile};
use utra_analysis_lib::ingest::parse_run;
use utra_analysis_lib::timeline::MissionEvent;
use utra_analysis_lib::{analyze_logs, analyze_run, AnalysisConfig, LogRecord, SectionId};

const SAMPLE_MS: u64 = 100;

/// Red 0–60s, Ramp 60–180s, Green 180–300s; 95% checkpoint hits,
/// ultrasonic around 35cm and never close.
fn three_section_run() -> Vec<LogRecord> {
    (0..3000u64)
        .map(|i| {
            let t = i * SAMPLE_MS;
            let section = if t < 60_000 {
                SectionId::RedPath
            } else if t < 180_000 {
                SectionId::Ramp
            } else {
                SectionId::GreenPath
            };
            let checkpoint = i % 20 != 0;
            let ultrasonic = 30.0 + (i % 11) as f64;
            LogRecord::new(section, t, checkpoint, ultrasonic, 100.0)
        })
        .collect()
}

fn sample_runs() -> Vec<Vec<LogRecord>> {
    let mut runs = vec![three_section_run()];
    for profile in PerformanceProfile::ALL {
        for seed in 0..4 {
            let options = GeneratorOptions {
                profile,
                seed,
                ..GeneratorOptions::default()
            };
            runs.push(generate_run(&options).logs);
        }
    }
    runs
}

fn count_events(labels: &[&str], event: MissionEvent) -> usize {
    labels.iter().filter(|l| **l == event.label()).count()
}

#[test]
fn three_section_scenario() {
    let logs = three_section_run();
    let record = analyze_logs(&logs, &AnalysisConfig::default()).unwrap();

    assert_eq!(record.section_times.get(SectionId::RedPath), 60_000);
    assert_eq!(record.section_times.get(SectionId::Ramp), 120_000);
    assert_eq!(record.section_times.get(SectionId::GreenPath), 119_900);
    assert!((record.checkpoint_rate - 95.0).abs() < 1e-9);
    let avg = record.ultrasonic_avg_cm.unwrap();
    assert!((avg - 35.0).abs() < 0.1, "avg was {}", avg);
    assert_eq!(record.ultrasonic_min_cm, Some(30.0));

    let reupload: Vec<u64> = record
        .timeline
        .iter()
        .filter(|e| e.event == MissionEvent::ReachesReuploadPoint.label())
        .map(|e| e.time_ms)
        .collect();
    assert_eq!(reupload, vec![120_000]);

    assert!(!record.issues.iter().any(|i| i.starts_with("Low checkpoint")));
    assert!(!record.issues.iter().any(|i| i.starts_with("Very close obstacle")));
    // Every section is well over the 15s threshold, so only slow-section
    // issues are reported.
    assert_eq!(record.issues.len(), 3);
    assert!(record.issues.iter().all(|i| i.starts_with("Slow section")));
}

#[test]
fn three_section_scenario_with_relaxed_section_threshold_is_clean() {
    let config = AnalysisConfig {
        slow_section_ms: 180_000,
        ..AnalysisConfig::default()
    };
    let record = analyze_logs(&three_section_run(), &config).unwrap();
    assert!(record.issues.is_empty(), "{:?}", record.issues);
}

#[test]
fn section_totals_tile_the_run() {
    for logs in sample_runs() {
        let record = analyze_logs(&logs, &AnalysisConfig::default()).unwrap();

        for section in SectionId::ALL {
            let from_intervals: u64 = record
                .section_intervals
                .iter()
                .filter(|i| i.section_id == section)
                .map(|i| i.duration_ms)
                .sum();
            assert_eq!(from_intervals, record.section_times.get(section));
        }

        let span = logs.last().unwrap().timestamp_ms - logs.first().unwrap().timestamp_ms;
        let total: u64 = record.section_intervals.iter().map(|i| i.duration_ms).sum();
        assert_eq!(total, span);
    }
}

#[test]
fn timeline_is_monotonic_and_rate_is_bounded() {
    for logs in sample_runs() {
        let record = analyze_logs(&logs, &AnalysisConfig::default()).unwrap();
        assert!(record
            .timeline
            .windows(2)
            .all(|pair| pair[0].time_ms <= pair[1].time_ms));
        assert!((0.0..=100.0).contains(&record.checkpoint_rate));
    }
}

#[test]
fn analysis_is_idempotent() {
    for logs in sample_runs() {
        let first = analyze_logs(&logs, &AnalysisConfig::default()).unwrap();
        let second = analyze_logs(&logs, &AnalysisConfig::default()).unwrap();
        assert_eq!(
            serde_json::to_vec(&first).unwrap(),
            serde_json::to_vec(&second).unwrap()
        );
    }
}

#[test]
fn empty_run_is_not_an_error() {
    let record = analyze_logs(&[], &AnalysisConfig::default()).unwrap();
    assert_eq!(record.checkpoint_rate, 0.0);
    assert!(record.timeline.is_empty());
    assert!(record.issues.is_empty());

    let json = serde_json::to_value(&record).unwrap();
    assert!(json.get("ultrasonic_avg").is_none());
    assert_eq!(json["section_times"], serde_json::json!({"1": 0, "2": 0, "3": 0}));
}

#[test]
fn single_obstacle_dip_yields_one_event_pair() {
    let mut distances = vec![40.0, 35.0, 14.0];
    // Lingering between the thresholds must not retrigger anything.
    distances.extend((0..25).map(|i| 16.0 + (i % 14) as f64));
    distances.extend([12.0, 29.0, 31.0, 38.0]);

    let logs: Vec<LogRecord> = distances
        .iter()
        .enumerate()
        .map(|(i, d)| LogRecord::new(SectionId::RedPath, i as u64 * SAMPLE_MS, true, *d, 100.0))
        .collect();
    let record = analyze_logs(&logs, &AnalysisConfig::default()).unwrap();
    let labels: Vec<&str> = record.timeline.iter().map(|e| e.event.as_str()).collect();

    assert_eq!(count_events(&labels, MissionEvent::DetectsObstruction), 1);
    assert_eq!(count_events(&labels, MissionEvent::ClearsObstacle), 1);
    let detect = labels
        .iter()
        .position(|l| *l == MissionEvent::DetectsObstruction.label())
        .unwrap();
    let clear = labels
        .iter()
        .position(|l| *l == MissionEvent::ClearsObstacle.label())
        .unwrap();
    assert!(detect < clear);
}

#[test]
fn claw_close_then_open_scenario() {
    let angles = [100.0, 40.0, 35.0, 60.0, 80.0, 150.0, 160.0];
    let logs: Vec<LogRecord> = angles
        .iter()
        .enumerate()
        .map(|(i, a)| LogRecord::new(SectionId::RedPath, i as u64 * SAMPLE_MS, true, 40.0, *a))
        .collect();
    let record = analyze_logs(&logs, &AnalysisConfig::default()).unwrap();
    let labels: Vec<&str> = record.timeline.iter().map(|e| e.event.as_str()).collect();

    assert_eq!(count_events(&labels, MissionEvent::ClawClosesForPickup), 1);
    assert_eq!(count_events(&labels, MissionEvent::ClawOpensForDrop), 1);
    let close = labels
        .iter()
        .position(|l| *l == MissionEvent::ClawClosesForPickup.label())
        .unwrap();
    let open = labels
        .iter()
        .position(|l| *l == MissionEvent::ClawOpensForDrop.label())
        .unwrap();
    assert!(close < open);
    assert_eq!(record.timeline[close].time_ms, 100);
    assert_eq!(record.timeline[open].time_ms, 500);
}

#[test]
fn claw_change_examples() {
    let to_logs = |angles: &[f64]| -> Vec<LogRecord> {
        angles
            .iter()
            .enumerate()
            .map(|(i, a)| LogRecord::new(SectionId::Ramp, i as u64 * SAMPLE_MS, true, 40.0, *a))
            .collect()
    };

    let config = AnalysisConfig::default();
    let record = analyze_logs(&to_logs(&[0.0, 5.0, 8.0, 50.0, 95.0, 92.0]), &config).unwrap();
    assert_eq!(record.claw_changes, 2);
    let record = analyze_logs(&to_logs(&[0.0, 5.0, 8.0, 12.0]), &config).unwrap();
    assert_eq!(record.claw_changes, 0);
}

#[test]
fn submission_json_round_trip_matches_direct_analysis() {
    let run = generate_run(&GeneratorOptions {
        robot_id: "Gamma".into(),
        run_number: 3,
        profile: PerformanceProfile::Poor,
        seed: 11,
    });
    let json = serde_json::to_string(&run).unwrap();
    let ingested = parse_run(&json).unwrap();
    assert_eq!(ingested, run);

    let config = AnalysisConfig::default();
    assert_eq!(
        analyze_run(&ingested, &config).unwrap(),
        analyze_run(&run, &config).unwrap()
    );
}

#[test]
fn ramp_visit_late_in_the_u64_range_still_gets_a_midpoint() {
    let start = 10_000_000_000_000_000_000u64;
    let logs = vec![
        LogRecord::new(SectionId::Ramp, start, true, 40.0, 100.0),
        LogRecord::new(SectionId::Ramp, start + 100, true, 40.0, 100.0),
        LogRecord::new(SectionId::Ramp, start + 200, true, 40.0, 100.0),
    ];
    let record = analyze_logs(&logs, &AnalysisConfig::default()).unwrap();

    let reupload: Vec<u64> = record
        .timeline
        .iter()
        .filter(|e| e.event == MissionEvent::ReachesReuploadPoint.label())
        .map(|e| e.time_ms)
        .collect();
    assert_eq!(reupload, vec![start + 100]);
    assert_eq!(record.section_times.get(SectionId::Ramp), 200);
}
