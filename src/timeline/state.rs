use crate::models::Phase;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClawState {
    #[default]
    Unknown,
    Open,
    Closed,
}

/// State carried across one chronological scan of a run.
///
/// A fresh value is created for every analysis; nothing is shared between runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseState {
    /// Highest phase reached so far. Never decreases.
    pub phase: Phase,
    pub claw_state: ClawState,
    pub first_checkpoint_seen: bool,
    /// Whether the last obstacle proximity event is still active.
    pub in_obstacle: bool,
    pub claw_close_seen: bool,
    pub second_claw_close_seen: bool,
    pub claw_open_seen: bool,
}

impl Default for PhaseState {
    fn default() -> Self {
        Self {
            phase: Phase::StartUnlock,
            claw_state: ClawState::Unknown,
            first_checkpoint_seen: false,
            in_obstacle: false,
            claw_close_seen: false,
            second_claw_close_seen: false,
            claw_open_seen: false,
        }
    }
}

impl PhaseState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance_to(&mut self, phase: Phase) {
        if phase > self.phase {
            self.phase = phase;
        }
    }
}
