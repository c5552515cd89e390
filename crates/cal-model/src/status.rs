//! Submission outcomes and run progress.

use serde::{Deserialize, Serialize};

/// Result of one member submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionOutcome {
    /// Researcher the submission was made for.
    pub researcher: String,
    pub success: bool,
    /// Failure message; empty on success.
    pub message: String,
}

impl SubmissionOutcome {
    pub fn succeeded(researcher: impl Into<String>) -> Self {
        Self {
            researcher: researcher.into(),
            success: true,
            message: String::new(),
        }
    }

    pub fn failed(researcher: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            researcher: researcher.into(),
            success: false,
            message: message.into(),
        }
    }
}

/// Progress snapshot of a pipeline run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PipelineStatus {
    /// True while the sequential fetch/match/transform stages run.
    pub is_loading: bool,
    /// Submissions that have completed, successfully or not.
    pub attempted_count: usize,
    /// Submissions issued in total.
    pub total_count: usize,
    /// Completed share in 0-100; `None` until the first completion.
    pub percent_complete: Option<f64>,
}

impl PipelineStatus {
    pub fn loading() -> Self {
        Self {
            is_loading: true,
            ..Self::default()
        }
    }

    /// Status derived from completion counts.
    #[must_use]
    pub fn with_counts(mut self, completed: usize, total: usize) -> Self {
        self.attempted_count = completed;
        self.total_count = total;
        self.percent_complete = if completed == 0 || total == 0 {
            None
        } else {
            Some((completed as f64 / total as f64 * 100.0).min(100.0))
        };
        self
    }

    /// True once every issued submission has completed.
    pub fn is_settled(&self) -> bool {
        self.attempted_count >= self.total_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_is_undefined_before_first_completion() {
        let status = PipelineStatus::default().with_counts(0, 4);
        assert_eq!(status.percent_complete, None);
        assert!(!status.is_settled());
    }

    #[test]
    fn percent_tracks_completions() {
        let status = PipelineStatus::default().with_counts(1, 4);
        assert_eq!(status.percent_complete, Some(25.0));
        let status = status.with_counts(4, 4);
        assert_eq!(status.percent_complete, Some(100.0));
        assert!(status.is_settled());
    }
}
