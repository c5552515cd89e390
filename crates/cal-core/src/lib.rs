//! Pipeline orchestration for the course activity loader.
//!
//! A run moves through the [`Stage`]s in order: identities, courses and
//! configuration are fetched, courses are matched against the rule and
//! transformed into activities, and the activities are dispatched. The run
//! returns as soon as dispatch has started; submissions keep settling in
//! the background on the [`PipelineRun`]'s handle.
//!
//! Every input a run depends on is captured in its [`RunContext`].

#![deny(unsafe_code)]

pub mod context;
pub mod error;
pub mod pipeline;
pub mod stage;

pub use context::{IdentitySelection, PipelineRequest, RuleSource, RunContext};
pub use error::{PipelineError, Result, SourceKind};
pub use pipeline::{Pipeline, PipelineRun};
pub use stage::Stage;
