use crate::analysis::{AnalysisConfig, AnalysisError};
use crate::issues::detect_issues;
use crate::metrics;
use crate::models::{AnalysisRecord, LogRecord, Run};
use crate::segmentation::segment_sections;
use crate::timeline::detect_events;
use crate::{log_info, log_warn};

const ENABLE_LOGS: bool = true;

/// Analyze one run and assemble its analysis record.
pub fn analyze_run(run: &Run, config: &AnalysisConfig) -> Result<AnalysisRecord, AnalysisError> {
    let record = analyze_logs(&run.logs, config).map_err(|err| {
        log_warn!("Analysis of run {} failed: {}", run.id, err);
        err
    })?;

    log_info!(
        "Analyzed run {} ({} readings): {} timeline events, {} issues",
        run.id,
        run.reading_count(),
        record.timeline.len(),
        record.issues.len()
    );

    Ok(record)
}

/// Analyze an ordered log sequence.
///
/// Either a complete record is returned or an error; nothing is produced
/// for partially valid input. Identical input always yields an identical
/// record.
pub fn analyze_logs(
    records: &[LogRecord],
    config: &AnalysisConfig,
) -> Result<AnalysisRecord, AnalysisError> {
    config.validate().map_err(AnalysisError::InvalidConfig)?;
    validate_logs(records)?;

    let segmentation = segment_sections(records);
    let metrics = metrics::aggregate(records, config);
    let timeline = detect_events(records, &segmentation, config);
    let issues = detect_issues(&segmentation.section_times, &metrics, config);

    Ok(AnalysisRecord {
        section_times: segmentation.section_times,
        section_intervals: segmentation.intervals,
        checkpoint_rate: metrics.checkpoint_rate,
        ultrasonic_avg_cm: metrics.ultrasonic_avg_cm,
        ultrasonic_min_cm: metrics.ultrasonic_min_cm,
        claw_changes: metrics.claw_changes,
        timeline,
        issues,
        summary: None,
    })
}

/// Check value domains and ordering. Out-of-order input fails fast rather
/// than being sorted.
pub fn validate_logs(records: &[LogRecord]) -> Result<(), AnalysisError> {
    let mut previous_ms: Option<u64> = None;

    for (index, record) in records.iter().enumerate() {
        if let Some(reason) = record.domain_violation() {
            return Err(AnalysisError::malformed(index, reason));
        }

        if let Some(previous_ms) = previous_ms {
            if record.timestamp_ms < previous_ms {
                return Err(AnalysisError::UnorderedInput {
                    index,
                    previous_ms,
                    timestamp_ms: record.timestamp_ms,
                });
            }
        }
        previous_ms = Some(record.timestamp_ms);
    }

    Ok(())
}

/// A run together with its current analysis, if any.
///
/// Re-analysis replaces the stored record only when it succeeds, so a failed
/// attempt never disturbs the previous result.
#[derive(Debug, Clone)]
pub struct AnalyzedRun {
    run: Run,
    analysis: Option<AnalysisRecord>,
}

impl AnalyzedRun {
    pub fn new(run: Run) -> Self {
        Self { run, analysis: None }
    }

    pub fn run(&self) -> &Run {
        &self.run
    }

    pub fn analysis(&self) -> Option<&AnalysisRecord> {
        self.analysis.as_ref()
    }

    pub fn reanalyze(&mut self, config: &AnalysisConfig) -> Result<&AnalysisRecord, AnalysisError> {
        let record = analyze_run(&self.run, config)?;
        Ok(&*self.analysis.insert(record))
    }
}
