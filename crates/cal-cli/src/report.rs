//! Outcome of a `cal run`, flattened for display.

use std::sync::Arc;

use cal_submit::OutcomeBoard;

/// A finished run.
#[derive(Debug)]
pub struct RunReport {
    pub rule: String,
    pub identity_count: usize,
    pub course_count: usize,
    pub matched_count: usize,
    pub board: Arc<OutcomeBoard>,
}

/// One submission as shown in the summary table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutcomeLine {
    pub activity: String,
    pub title: String,
    pub researcher: String,
    pub success: bool,
    pub message: String,
}

impl RunReport {
    pub fn succeeded(&self) -> usize {
        self.board.totals().0
    }

    pub fn failed(&self) -> usize {
        self.board.totals().1
    }

    /// True when submissions were made and none of them succeeded.
    pub fn all_failed(&self) -> bool {
        let (succeeded, failed) = self.board.totals();
        failed > 0 && succeeded == 0
    }

    /// Process exit code for the run.
    pub fn exit_code(&self) -> i32 {
        i32::from(self.all_failed())
    }

    /// Submissions in board order, one line per outcome.
    pub fn lines(&self) -> Vec<OutcomeLine> {
        self.board
            .rows()
            .flat_map(|row| {
                row.outcomes().into_iter().map(|outcome| OutcomeLine {
                    activity: row.id().to_string(),
                    title: row.title().to_string(),
                    researcher: outcome.researcher,
                    success: outcome.success,
                    message: outcome.message,
                })
            })
            .collect()
    }
}
