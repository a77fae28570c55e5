//! I/O layer: raw band-buffer decoding, the typed AI-assessment boundary,
//! and the JSON report writer.
pub mod ai;
pub use ai::AiAssessment;

pub mod bands;
pub use bands::{decode_band, BandSample, BandSet};

pub mod report;
pub use report::{AnalysisReport, Coordinates};
