//! Phase event detection: turns a run's records into a mission timeline.
//!
//! The detector is an explicit fold over the records carrying a small
//! [`PhaseState`]. Ramp midpoints need the whole ramp interval, so the
//! segmenter runs first and the detector re-walks the records with the
//! interval boundaries available.

pub mod detector;
pub mod events;
pub mod state;

pub use detector::{detect_events, ramp_midpoints, scan, step, RecordContext};
pub use events::MissionEvent;
pub use state::{ClawState, PhaseState};
