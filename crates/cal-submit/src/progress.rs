//! Completion-based progress.

use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::sync::watch;

use cal_model::PipelineStatus;

/// Counts completed submissions and publishes the derived status.
#[derive(Debug)]
pub struct ProgressTracker {
    completed: AtomicUsize,
    total: usize,
    status: watch::Sender<PipelineStatus>,
}

impl ProgressTracker {
    pub fn new(total: usize) -> Self {
        let (status, _) = watch::channel(PipelineStatus::default().with_counts(0, total));
        Self {
            completed: AtomicUsize::new(0),
            total,
            status,
        }
    }

    /// Marks one submission as finished, successful or not.
    pub fn complete(&self) -> PipelineStatus {
        let completed = self.completed.fetch_add(1, Ordering::AcqRel) + 1;
        let next = PipelineStatus::default().with_counts(completed, self.total);
        // Completions can finish out of order; never move backwards.
        self.status.send_if_modified(|current| {
            if next.attempted_count > current.attempted_count {
                *current = next;
                true
            } else {
                false
            }
        });
        next
    }

    pub fn completed(&self) -> usize {
        self.completed.load(Ordering::Acquire)
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn status(&self) -> PipelineStatus {
        *self.status.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<PipelineStatus> {
        self.status.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_starts_undefined() {
        let tracker = ProgressTracker::new(4);
        let status = tracker.status();
        assert!(!status.is_loading);
        assert_eq!(status.total_count, 4);
        assert_eq!(status.percent_complete, None);
    }

    #[test]
    fn progress_reaches_full_on_last_completion() {
        let tracker = ProgressTracker::new(2);
        let receiver = tracker.subscribe();
        assert_eq!(tracker.complete().percent_complete, Some(50.0));
        tracker.complete();
        assert_eq!(receiver.borrow().percent_complete, Some(100.0));
        assert!(tracker.status().is_settled());
    }
}
