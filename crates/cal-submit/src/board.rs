//! Per-record outcome accumulation.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use cal_model::{Activity, SubmissionOutcome};

/// Outcomes of one activity, appended as submissions complete.
///
/// Each row has its own lock, so completions for different records never
/// contend.
#[derive(Debug)]
pub struct RecordOutcomes {
    id: String,
    title: String,
    outcomes: Mutex<Vec<SubmissionOutcome>>,
}

impl RecordOutcomes {
    fn new(id: &str, title: &str) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            outcomes: Mutex::new(Vec::new()),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn record(&self, outcome: SubmissionOutcome) {
        self.lock().push(outcome);
    }

    /// Copy of the outcomes recorded so far, in completion order.
    pub fn outcomes(&self) -> Vec<SubmissionOutcome> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<SubmissionOutcome>> {
        // A push cannot leave the list half-written, so a poisoned lock
        // still holds valid data.
        self.outcomes.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Outcome rows keyed by activity id, in first-dispatch order.
///
/// The set of rows is fixed when the board is built; only the rows'
/// outcome lists change afterwards.
#[derive(Debug, Default)]
pub struct OutcomeBoard {
    rows: Vec<Arc<RecordOutcomes>>,
    index: HashMap<String, usize>,
}

impl OutcomeBoard {
    /// One row per distinct activity id.
    pub fn for_activities<'a>(activities: impl IntoIterator<Item = &'a Activity>) -> Self {
        let mut board = Self::default();
        for activity in activities {
            board.row_for(activity);
        }
        board
    }

    /// Row of an activity, created on first sight of its id.
    pub(crate) fn row_for(&mut self, activity: &Activity) -> Arc<RecordOutcomes> {
        let next = self.rows.len();
        let position = *self.index.entry(activity.id().to_string()).or_insert(next);
        if position == next {
            self.rows
                .push(Arc::new(RecordOutcomes::new(activity.id(), activity.title())));
        }
        Arc::clone(&self.rows[position])
    }

    pub fn get(&self, id: &str) -> Option<&RecordOutcomes> {
        self.index.get(id).map(|&position| self.rows[position].as_ref())
    }

    pub fn rows(&self) -> impl Iterator<Item = &RecordOutcomes> {
        self.rows.iter().map(AsRef::as_ref)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// (succeeded, failed) across every row.
    pub fn totals(&self) -> (usize, usize) {
        self.rows().fold((0, 0), |(ok, failed), row| {
            let outcomes = row.lock();
            let succeeded = outcomes.iter().filter(|o| o.success).count();
            (ok + succeeded, failed + outcomes.len() - succeeded)
        })
    }
}

#[cfg(test)]
mod tests {
    use cal_model::LocalizedValue;

    use super::*;

    fn activity(id: &str, title: &str) -> Activity {
        Activity {
            activity_course_id: id.to_string(),
            activity_name: vec![LocalizedValue::new("en", title)],
            ..Activity::default()
        }
    }

    #[test]
    fn shared_ids_share_a_row() {
        let first = activity("BIO200", "Cell Biology");
        let second = activity("CHEM100", "Chemistry");
        let repeat = activity("BIO200", "Cell Biology (copy)");
        let board = OutcomeBoard::for_activities([&first, &second, &repeat]);

        let ids: Vec<&str> = board.rows().map(RecordOutcomes::id).collect();
        assert_eq!(ids, vec!["BIO200", "CHEM100"]);
        assert_eq!(board.get("BIO200").map(RecordOutcomes::title), Some("Cell Biology"));
    }

    #[test]
    fn totals_count_successes_and_failures() {
        let first = activity("BIO200", "Cell Biology");
        let board = OutcomeBoard::for_activities([&first]);
        let row = board.get("BIO200").unwrap();
        row.record(SubmissionOutcome::succeeded("R1"));
        row.record(SubmissionOutcome::failed("R2", "User not found"));
        row.record(SubmissionOutcome::succeeded("R3"));
        assert_eq!(board.totals(), (2, 1));
        assert_eq!(row.len(), 3);
    }
}
