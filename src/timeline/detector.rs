use std::collections::BTreeSet;

use crate::analysis::AnalysisConfig;
use crate::models::{LogRecord, SectionId, TimelineEvent};
use crate::segmentation::Segmentation;
use crate::timeline::events::MissionEvent;
use crate::timeline::state::{ClawState, PhaseState};
use crate::log_debug;

const ENABLE_LOGS: bool = true;

/// What the detector knows about a record beyond its own fields.
#[derive(Debug, Clone, Copy)]
pub struct RecordContext {
    pub index: usize,
    pub is_first: bool,
    pub is_last: bool,
    pub previous_section: Option<SectionId>,
    pub is_ramp_midpoint: bool,
}

/// Scan the run once and emit the mission timeline.
pub fn detect_events(
    records: &[LogRecord],
    segmentation: &Segmentation,
    config: &AnalysisConfig,
) -> Vec<TimelineEvent> {
    scan(records, segmentation, config).1
}

/// Fold the rule table over the records, returning the final state as well.
pub fn scan(
    records: &[LogRecord],
    segmentation: &Segmentation,
    config: &AnalysisConfig,
) -> (PhaseState, Vec<TimelineEvent>) {
    let midpoints = ramp_midpoints(records, segmentation);
    let last_index = records.len().saturating_sub(1);

    records.iter().enumerate().fold(
        (PhaseState::new(), Vec::new()),
        |(state, mut timeline), (index, record)| {
            let context = RecordContext {
                index,
                is_first: index == 0,
                is_last: index == last_index,
                previous_section: index.checked_sub(1).map(|prev| records[prev].section_id),
                is_ramp_midpoint: midpoints.contains(&index),
            };

            let (next_state, fired) = step(state, record, &context, config);
            for event in fired {
                log_debug!("{} at {}ms (record {})", event.label(), record.timestamp_ms, index);
                timeline.push(event.at(record.timestamp_ms));
            }
            (next_state, timeline)
        },
    )
}

/// Apply every rule to one record, in priority order.
///
/// Several rules may fire on the same record; they are returned in table order.
pub fn step(
    state: PhaseState,
    record: &LogRecord,
    context: &RecordContext,
    config: &AnalysisConfig,
) -> (PhaseState, Vec<MissionEvent>) {
    let mut next = state.clone();
    let mut fired = Vec::new();

    let angle = record.claw_angle_deg;
    let close_edge = angle < config.claw_closed_below_deg && state.claw_state != ClawState::Closed;
    let open_edge = angle > config.claw_open_above_deg && state.claw_state == ClawState::Closed;

    let entered = match context.previous_section {
        Some(previous) if previous != record.section_id => Some((previous, record.section_id)),
        _ => None,
    };

    if context.is_first {
        fired.push(MissionEvent::LeavesBegin);
    }

    if close_edge && !state.claw_close_seen {
        fired.push(MissionEvent::ClawClosesForPickup);
    }

    if record.checkpoint_success && !state.first_checkpoint_seen {
        fired.push(MissionEvent::ReachesCheckpoint);
        next.first_checkpoint_seen = true;
    }

    if open_edge && !state.claw_open_seen {
        fired.push(MissionEvent::ClawOpensForDrop);
        next.claw_open_seen = true;
    }

    if let Some((_, SectionId::Ramp)) = entered {
        fired.push(MissionEvent::BeginsRampClimb);
    }

    if context.is_ramp_midpoint {
        fired.push(MissionEvent::ReachesReuploadPoint);
    }

    if let Some((SectionId::Ramp, _)) = entered {
        fired.push(MissionEvent::FinishesRampDescent);
    }

    if let Some((_, SectionId::RedPath)) = entered {
        fired.push(MissionEvent::EntersRedPath);
    }

    let distance = record.ultrasonic_distance_cm;
    if !state.in_obstacle && distance < config.obstacle_enter_below_cm {
        fired.push(MissionEvent::DetectsObstruction);
        next.in_obstacle = true;
    } else if state.in_obstacle && distance > config.obstacle_clear_above_cm {
        fired.push(MissionEvent::ClearsObstacle);
        next.in_obstacle = false;
    }

    if let Some((SectionId::RedPath, _)) = entered {
        fired.push(MissionEvent::ExitsRedPath);
    }

    if close_edge && state.claw_close_seen && !state.second_claw_close_seen {
        fired.push(MissionEvent::SecondBoxPickedUp);
        next.second_claw_close_seen = true;
    }

    if context.is_last {
        fired.push(MissionEvent::CrossesFinishLine);
    }

    if close_edge {
        next.claw_close_seen = true;
        next.claw_state = ClawState::Closed;
    } else if angle > config.claw_open_above_deg {
        next.claw_state = ClawState::Open;
    }

    for event in &fired {
        next.advance_to(event.phase());
    }

    (next, fired)
}

/// Index of the record nearest the temporal midpoint of every ramp interval.
///
/// Ties go to the earlier record.
pub fn ramp_midpoints(records: &[LogRecord], segmentation: &Segmentation) -> BTreeSet<usize> {
    segmentation
        .intervals_for(SectionId::Ramp)
        .filter_map(|interval| {
            // Doubled values in u128 stay exact for any u64 timestamps.
            let doubled_mid = u128::from(interval.start_ms) + u128::from(interval.end_ms);
            (interval.first_index..=interval.last_index)
                .filter(|index| *index < records.len())
                .min_by_key(|index| {
                    (2 * u128::from(records[*index].timestamp_ms)).abs_diff(doubled_mid)
                })
        })
        .collect()
}
