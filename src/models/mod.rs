pub mod analysis;
pub mod log_record;
pub mod run;

pub use analysis::{AnalysisRecord, Phase, SectionInterval, SectionTimes, TimelineEvent};
pub use log_record::{LogRecord, SectionId};
pub use run::{Run, RunMetadata};
