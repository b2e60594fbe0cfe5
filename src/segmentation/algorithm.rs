use crate::models::{LogRecord, SectionId, SectionInterval, SectionTimes};

/// A group of consecutive records with the same section_id.
#[derive(Debug, Clone)]
struct RecordGroup {
    section_id: SectionId,
    first_index: usize,
    last_index: usize,
    start_ms: u64,
    last_sample_ms: u64,
}

/// Output of the section segmenter: the interval list plus per-section totals.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Segmentation {
    pub intervals: Vec<SectionInterval>,
    pub section_times: SectionTimes,
}

impl Segmentation {
    pub fn intervals_for(&self, section: SectionId) -> impl Iterator<Item = &SectionInterval> {
        self.intervals
            .iter()
            .filter(move |interval| interval.section_id == section)
    }
}

/// Main segmentation function: partitions records into section intervals.
///
/// Each interval ends at the handoff timestamp (the first sample of the next
/// interval), so the intervals tile the run from the first to the last sample.
pub fn segment_sections(records: &[LogRecord]) -> Segmentation {
    // Edge case: empty records
    if records.is_empty() {
        return Segmentation::default();
    }

    let groups = group_records(records);

    let mut intervals = Vec::with_capacity(groups.len());
    let mut section_times = SectionTimes::zeroed();

    for (position, group) in groups.iter().enumerate() {
        let end_ms = groups
            .get(position + 1)
            .map(|next| next.start_ms)
            .unwrap_or(group.last_sample_ms);
        let duration_ms = end_ms.saturating_sub(group.start_ms);

        section_times.add(group.section_id, duration_ms);
        intervals.push(SectionInterval {
            section_id: group.section_id,
            start_ms: group.start_ms,
            end_ms,
            duration_ms,
            last_sample_ms: group.last_sample_ms,
            first_index: group.first_index,
            last_index: group.last_index,
        });
    }

    Segmentation {
        intervals,
        section_times,
    }
}

/// Group consecutive records by section_id.
fn group_records(records: &[LogRecord]) -> Vec<RecordGroup> {
    let mut groups = Vec::new();
    let mut current_group: Option<RecordGroup> = None;

    for (index, record) in records.iter().enumerate() {
        match &mut current_group {
            Some(group) if group.section_id == record.section_id => {
                group.last_index = index;
                group.last_sample_ms = record.timestamp_ms;
            }
            _ => {
                if let Some(group) = current_group.take() {
                    groups.push(group);
                }
                current_group = Some(RecordGroup {
                    section_id: record.section_id,
                    first_index: index,
                    last_index: index,
                    start_ms: record.timestamp_ms,
                    last_sample_ms: record.timestamp_ms,
                });
            }
        }
    }

    if let Some(group) = current_group {
        groups.push(group);
    }

    groups
}
