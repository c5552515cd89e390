use std::sync::Arc;

use cal_cli::report::RunReport;
use cal_model::{Activity, LocalizedValue, SubmissionOutcome};
use cal_submit::OutcomeBoard;

fn activity(id: &str) -> Activity {
    Activity {
        activity_course_id: id.to_string(),
        activity_name: vec![LocalizedValue::new("en", format!("Course {id}"))],
        ..Activity::default()
    }
}

fn report(outcomes: &[(&str, SubmissionOutcome)]) -> RunReport {
    let activities = [activity("BIO200"), activity("CHEM100")];
    let board = OutcomeBoard::for_activities(&activities);
    for (id, outcome) in outcomes {
        board.get(id).expect("row").record(outcome.clone());
    }
    RunReport {
        rule: "Teaching".to_string(),
        identity_count: 2,
        course_count: 10,
        matched_count: 2,
        board: Arc::new(board),
    }
}

#[test]
fn partial_failure_exits_cleanly() {
    let report = report(&[
        ("BIO200", SubmissionOutcome::succeeded("R1")),
        ("BIO200", SubmissionOutcome::failed("R2", "User not found")),
    ]);
    assert_eq!(report.succeeded(), 1);
    assert_eq!(report.failed(), 1);
    assert_eq!(report.exit_code(), 0);
}

#[test]
fn total_failure_exits_with_error() {
    let report = report(&[
        ("BIO200", SubmissionOutcome::failed("R1", "User not found")),
        ("CHEM100", SubmissionOutcome::failed("R2", "Forbidden")),
    ]);
    assert!(report.all_failed());
    assert_eq!(report.exit_code(), 1);
}

#[test]
fn empty_run_is_not_a_failure() {
    assert_eq!(report(&[]).exit_code(), 0);
}

#[test]
fn lines_follow_board_order() {
    let report = report(&[
        ("CHEM100", SubmissionOutcome::succeeded("R3")),
        ("BIO200", SubmissionOutcome::succeeded("R1")),
    ]);
    let lines = report.lines();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0].activity, "BIO200");
    assert_eq!(lines[0].title, "Course BIO200");
    assert_eq!(lines[1].researcher, "R3");
}
