//! Matching scenarios over whole course lists.

use proptest::prelude::*;

use cal_map::{IdentitySet, Matcher, OrgUnitResolver};
use cal_model::{CodeValue, Course, Instructor, MappingRule, OrgUnitMapping};

fn teaching_rule(status: &str) -> MappingRule {
    MappingRule {
        name: "Teaching".to_string(),
        target_org_unit: "OU1".to_string(),
        activity_type: "lecture".to_string(),
        researcher_role: "instructor".to_string(),
        course_term: "AUTUMN".to_string(),
        course_status: status.to_string(),
    }
}

fn course(id: &str, status: &str, instructors: &[&str]) -> Course {
    Course {
        id: id.to_string(),
        code: format!("C{id}"),
        name: format!("Course {id}"),
        status: status.to_string(),
        term: vec![CodeValue::same("AUTUMN")],
        processing_department: CodeValue::same("SCI"),
        instructor: instructors.iter().copied().map(Instructor::new).collect(),
        ..Course::default()
    }
}

fn resolver() -> OrgUnitResolver {
    OrgUnitResolver::new(OrgUnitMapping::from_pairs([("SCI", "OU1")]))
}

#[test]
fn eligible_instructor_matches() {
    let rule = teaching_rule("ACTIVE");
    let resolver = resolver();
    let ids: IdentitySet = ["R1"].into_iter().collect();
    let matcher = Matcher::new(&rule, &resolver, &ids);
    assert!(matcher.matches(&course("1", "ACTIVE", &["R1", "R2"])));
}

#[test]
fn ineligible_instructors_do_not_match() {
    let rule = teaching_rule("ACTIVE");
    let resolver = resolver();
    let ids: IdentitySet = ["R9"].into_iter().collect();
    let matcher = Matcher::new(&rule, &resolver, &ids);
    assert!(!matcher.matches(&course("1", "ACTIVE", &["R1", "R2"])));
}

#[test]
fn all_status_accepts_any_status() {
    let rule = teaching_rule("All");
    let resolver = resolver();
    let ids: IdentitySet = ["R1"].into_iter().collect();
    let matcher = Matcher::new(&rule, &resolver, &ids);
    assert!(matcher.matches(&course("1", "ACTIVE", &["R1"])));
    assert!(matcher.matches(&course("2", "INACTIVE", &["R1"])));
}

#[test]
fn match_all_keeps_first_occurrence_per_id() {
    let rule = teaching_rule("ALL");
    let resolver = resolver();
    let ids: IdentitySet = ["R1", "R2"].into_iter().collect();
    let matcher = Matcher::new(&rule, &resolver, &ids);

    let mut duplicate = course("1", "ACTIVE", &["R2"]);
    duplicate.name = "Second copy".to_string();
    let courses = vec![
        course("1", "ACTIVE", &["R1"]),
        course("2", "ACTIVE", &["R9"]),
        course("3", "ACTIVE", &["R2"]),
        duplicate,
    ];

    let matched = matcher.match_all(&courses);
    let ids: Vec<&str> = matched.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "3"]);
    assert_eq!(matched[0].name, "Course 1");
}

fn arb_course() -> impl Strategy<Value = Course> {
    (
        0u8..6,
        prop::sample::select(vec!["ACTIVE", "INACTIVE"]),
        prop::sample::select(vec!["SCI", "ART"]),
        prop::collection::vec(prop::sample::select(vec!["R1", "R2", "R3"]), 0..3),
        any::<bool>(),
    )
        .prop_map(|(id, status, unit, instructors, autumn)| {
            let mut course = course(&id.to_string(), status, &instructors);
            course.processing_department = CodeValue::same(unit);
            if !autumn {
                course.term = vec![CodeValue::same("SPRING")];
            }
            course
        })
}

proptest! {
    #[test]
    fn match_all_never_repeats_an_id(
        courses in prop::collection::vec(arb_course(), 0..30),
        all_statuses in any::<bool>(),
    ) {
        let rule = teaching_rule(if all_statuses { "all" } else { "ACTIVE" });
        let resolver = resolver();
        let ids: IdentitySet = ["R1", "R3"].into_iter().collect();
        let matcher = Matcher::new(&rule, &resolver, &ids);

        let matched = matcher.match_all(&courses);
        let mut seen = std::collections::HashSet::new();
        for course in &matched {
            prop_assert!(seen.insert(course.id.clone()));
            prop_assert!(matcher.matches(course));
        }
        // Same inputs, same answer.
        prop_assert_eq!(matched, matcher.match_all(&courses));
    }
}
