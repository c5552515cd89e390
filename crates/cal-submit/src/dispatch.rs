//! Fan-out of activity submissions.

use std::sync::Arc;

use futures_util::future::join_all;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{Instrument, debug, error, info_span, warn};

use cal_model::{Activity, PipelineStatus, SubmissionOutcome};

use crate::board::{OutcomeBoard, RecordOutcomes};
use crate::progress::ProgressTracker;
use crate::sink::{ActivitySink, ActivitySubmission};

/// In-flight submissions of one run.
///
/// Dropping the handle does not cancel anything; submissions keep running
/// and keep filling the board.
#[derive(Debug)]
pub struct DispatchHandle {
    board: Arc<OutcomeBoard>,
    progress: Arc<ProgressTracker>,
    tasks: Vec<JoinHandle<()>>,
}

impl DispatchHandle {
    /// Board that collects outcomes as they arrive.
    pub fn board(&self) -> Arc<OutcomeBoard> {
        Arc::clone(&self.board)
    }

    pub fn status(&self) -> PipelineStatus {
        self.progress.status()
    }

    /// Receiver of status updates, one per completion.
    pub fn progress(&self) -> watch::Receiver<PipelineStatus> {
        self.progress.subscribe()
    }

    /// Number of submissions issued.
    pub fn total(&self) -> usize {
        self.progress.total()
    }

    /// Waits for every submission to complete.
    pub async fn settle(self) -> Arc<OutcomeBoard> {
        for joined in join_all(self.tasks).await {
            if let Err(err) = joined {
                error!(error = %err, "submission task ended abnormally");
            }
        }
        self.board
    }
}

/// Issues one submission per member of every activity.
///
/// All submissions start immediately and complete in any order. A failed
/// submission is recorded on its row and never affects the others. Must be
/// called from within a Tokio runtime.
pub fn dispatch(sink: Arc<dyn ActivitySink>, activities: Vec<Activity>) -> DispatchHandle {
    let activities: Vec<Arc<Activity>> = activities.into_iter().map(Arc::new).collect();
    let total: usize = activities
        .iter()
        .map(|activity| activity.member_researcher.len())
        .sum();

    let mut board = OutcomeBoard::default();
    let rows: Vec<_> = activities
        .iter()
        .map(|activity| board.row_for(activity))
        .collect();
    let board = Arc::new(board);
    let progress = Arc::new(ProgressTracker::new(total));
    debug!(records = board.len(), submissions = total, "dispatching");

    let mut tasks = Vec::with_capacity(total);
    for (activity, row) in activities.iter().zip(rows) {
        for member in 0..activity.member_researcher.len() {
            let submission = ActivitySubmission::new(Arc::clone(activity), member);
            let sink = Arc::clone(&sink);
            let completion = Completion {
                row: Arc::clone(&row),
                progress: Arc::clone(&progress),
                researcher: submission.researcher().to_string(),
                recorded: false,
            };
            let span = info_span!("submit", record = %activity.id(), member);
            tasks.push(tokio::spawn(
                async move {
                    let outcome = match sink.create_activity(&submission).await {
                        Ok(()) => SubmissionOutcome::succeeded(completion.researcher.as_str()),
                        Err(err) => {
                            warn!(error = %err, "submission failed");
                            SubmissionOutcome::failed(
                                completion.researcher.as_str(),
                                err.outcome_message(),
                            )
                        }
                    };
                    completion.finish(outcome);
                }
                .instrument(span),
            ));
        }
    }

    DispatchHandle {
        board,
        progress,
        tasks,
    }
}

/// Records exactly one outcome for a submission.
///
/// A task that panics or is cancelled before finishing still records a
/// failed outcome and advances progress when this is dropped.
struct Completion {
    row: Arc<RecordOutcomes>,
    progress: Arc<ProgressTracker>,
    researcher: String,
    recorded: bool,
}

impl Completion {
    fn finish(mut self, outcome: SubmissionOutcome) {
        self.row.record(outcome);
        self.progress.complete();
        self.recorded = true;
    }
}

impl Drop for Completion {
    fn drop(&mut self) {
        if !self.recorded {
            error!(record = %self.row.id(), "submission ended without an outcome");
            self.row.record(SubmissionOutcome::failed(
                self.researcher.as_str(),
                "submission ended abnormally",
            ));
            self.progress.complete();
        }
    }
}
