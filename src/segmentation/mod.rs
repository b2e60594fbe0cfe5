pub mod algorithm;

pub use algorithm::{segment_sections, Segmentation};
