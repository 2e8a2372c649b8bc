pub mod adapter;
pub mod dashboard;
pub mod flight;
pub mod pipeline;
pub mod preprocess;
pub mod report;
pub mod state;
pub mod store;

pub use adapter::{CaptureAdapter, CaptureOutcome, EnqueueError, FileAdapter};
pub use pipeline::{InputRejected, Pipeline, SubmitError};
pub use report::{ReportDesk, ReportFlowError};
pub use state::AppState;
pub use store::{ReportCountUpdate, ResultStore, SharedStore};
