//! Input surfaces feeding the pipeline

pub mod capture;
pub mod upload;

pub use capture::{CaptureAdapter, CaptureOutcome};
pub use upload::{EnqueueError, FileAdapter};
