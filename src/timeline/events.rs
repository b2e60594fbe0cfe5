use crate::models::{Phase, TimelineEvent};

/// Milestones the phase detector can recognise, in rule priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MissionEvent {
    LeavesBegin,
    ClawClosesForPickup,
    ReachesCheckpoint,
    ClawOpensForDrop,
    BeginsRampClimb,
    ReachesReuploadPoint,
    FinishesRampDescent,
    EntersRedPath,
    DetectsObstruction,
    ClearsObstacle,
    ExitsRedPath,
    SecondBoxPickedUp,
    CrossesFinishLine,
}

impl MissionEvent {
    pub fn label(self) -> &'static str {
        match self {
            MissionEvent::LeavesBegin => "Robot leaves BEGIN area",
            MissionEvent::ClawClosesForPickup => "Claw closes to pick up box",
            MissionEvent::ReachesCheckpoint => "Reaches blue circle checkpoint",
            MissionEvent::ClawOpensForDrop => "Claw opens to drop box in white zone",
            MissionEvent::BeginsRampClimb => "Begins ramp climb",
            MissionEvent::ReachesReuploadPoint => "Reaches Purple Re-upload Point",
            MissionEvent::FinishesRampDescent => "Finishes ramp descent",
            MissionEvent::EntersRedPath => "Enters winding red path",
            MissionEvent::DetectsObstruction => "Detects first black obstruction",
            MissionEvent::ClearsObstacle => "Successfully clears final obstacle",
            MissionEvent::ExitsRedPath => "Exits red path",
            MissionEvent::SecondBoxPickedUp => "Second box picked up",
            MissionEvent::CrossesFinishLine => "Crosses BEGIN line to finish",
        }
    }

    pub fn phase(self) -> Phase {
        match self {
            MissionEvent::LeavesBegin
            | MissionEvent::ClawClosesForPickup
            | MissionEvent::ReachesCheckpoint
            | MissionEvent::ClawOpensForDrop => Phase::StartUnlock,
            MissionEvent::BeginsRampClimb
            | MissionEvent::ReachesReuploadPoint
            | MissionEvent::FinishesRampDescent => Phase::RampTarget,
            MissionEvent::EntersRedPath
            | MissionEvent::DetectsObstruction
            | MissionEvent::ClearsObstacle
            | MissionEvent::ExitsRedPath => Phase::ObstacleCourse,
            MissionEvent::SecondBoxPickedUp | MissionEvent::CrossesFinishLine => Phase::Conclusion,
        }
    }

    pub fn at(self, time_ms: u64) -> TimelineEvent {
        TimelineEvent {
            time_ms,
            event: self.label().to_string(),
            phase: Some(self.phase()),
        }
    }
}
