//! Activity submission for the course activity loader.
//!
//! [`dispatch`] issues one create call per member of every activity without
//! waiting on earlier calls. Each completion appends one
//! [`SubmissionOutcome`](cal_model::SubmissionOutcome) to its record's row
//! of the [`OutcomeBoard`] and advances the progress published on the
//! returned [`DispatchHandle`].

#![deny(unsafe_code)]

mod board;
mod dispatch;
mod error;
mod progress;
mod sink;

pub use board::{OutcomeBoard, RecordOutcomes};
pub use dispatch::{DispatchHandle, dispatch};
pub use error::{Result, SubmitError};
pub use progress::ProgressTracker;
pub use sink::{ACTIVITIES_PATH, ActivitySink, ActivitySubmission, RestActivitySink};
