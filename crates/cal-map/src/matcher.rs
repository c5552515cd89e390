//! Rule matching and deduplication of courses.

use std::collections::HashSet;
use std::fmt;

use tracing::trace;

use cal_model::{Course, MappingRule};

use crate::identity::IdentitySet;
use crate::resolver::OrgUnitResolver;

/// First predicate a course failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchFailure {
    /// No instructor is in the identity set.
    Instructor,
    /// Processing unit does not resolve to the rule's organizational unit.
    OrgUnit,
    /// Status differs and the rule does not accept all statuses.
    Status,
    /// Rule term is not among the course terms.
    Term,
}

impl fmt::Display for MatchFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Instructor => "no eligible instructor",
            Self::OrgUnit => "organizational unit differs",
            Self::Status => "status differs",
            Self::Term => "term missing",
        };
        f.write_str(text)
    }
}

/// Evaluates one mapping rule against courses.
#[derive(Debug, Clone, Copy)]
pub struct Matcher<'a> {
    rule: &'a MappingRule,
    org_units: &'a OrgUnitResolver,
    identities: &'a IdentitySet,
}

impl<'a> Matcher<'a> {
    pub fn new(
        rule: &'a MappingRule,
        org_units: &'a OrgUnitResolver,
        identities: &'a IdentitySet,
    ) -> Self {
        Self {
            rule,
            org_units,
            identities,
        }
    }

    /// Checks the four predicates in order and reports the first failure.
    pub fn check(&self, course: &Course) -> Result<(), MatchFailure> {
        if !course
            .instructor_ids()
            .any(|id| self.identities.contains(id))
        {
            return Err(MatchFailure::Instructor);
        }
        let org_unit = self.org_units.resolve(course.processing_unit());
        if org_unit != Some(self.rule.target_org_unit.as_str()) {
            return Err(MatchFailure::OrgUnit);
        }
        if !self.rule.matches_any_status() && course.status != self.rule.course_status {
            return Err(MatchFailure::Status);
        }
        if !course.term_values().any(|term| term == self.rule.course_term) {
            return Err(MatchFailure::Term);
        }
        Ok(())
    }

    pub fn matches(&self, course: &Course) -> bool {
        self.check(course).is_ok()
    }

    /// Matching courses in input order, one per course id.
    pub fn match_all(&self, courses: &[Course]) -> Vec<Course> {
        let mut seen = HashSet::new();
        let mut matched = Vec::new();
        for course in courses {
            if let Err(reason) = self.check(course) {
                trace!(course = %course.id, %reason, "course rejected");
                continue;
            }
            if seen.insert(course.id.as_str()) {
                matched.push(course.clone());
            }
        }
        matched
    }
}

#[cfg(test)]
mod tests {
    use cal_model::{CodeValue, Instructor, OrgUnitMapping};

    use super::*;

    fn rule(status: &str) -> MappingRule {
        MappingRule {
            name: "Teaching".to_string(),
            target_org_unit: "OU1".to_string(),
            course_term: "AUTUMN".to_string(),
            course_status: status.to_string(),
            ..MappingRule::default()
        }
    }

    fn course(status: &str) -> Course {
        Course {
            id: "1".to_string(),
            code: "BIO200".to_string(),
            status: status.to_string(),
            term: vec![CodeValue::same("SPRING"), CodeValue::same("AUTUMN")],
            processing_department: CodeValue::same("SCI"),
            instructor: vec![Instructor::new("R1"), Instructor::new("R2")],
            ..Course::default()
        }
    }

    fn resolver() -> OrgUnitResolver {
        OrgUnitResolver::new(OrgUnitMapping::from_pairs([("SCI", "OU1"), ("ART", "OU2")]))
    }

    #[test]
    fn reports_first_failing_predicate() {
        let rule = rule("ACTIVE");
        let resolver = resolver();
        let nobody: IdentitySet = ["R9"].into_iter().collect();
        let matcher = Matcher::new(&rule, &resolver, &nobody);

        // Every predicate fails here; the instructor check comes first.
        let mut other = course("INACTIVE");
        other.processing_department = CodeValue::same("ART");
        other.term.clear();
        assert_eq!(matcher.check(&other), Err(MatchFailure::Instructor));

        let ids: IdentitySet = ["R2"].into_iter().collect();
        let matcher = Matcher::new(&rule, &resolver, &ids);
        assert_eq!(matcher.check(&other), Err(MatchFailure::OrgUnit));
        other.processing_department = CodeValue::same("SCI");
        assert_eq!(matcher.check(&other), Err(MatchFailure::Status));
        other.status = "ACTIVE".to_string();
        assert_eq!(matcher.check(&other), Err(MatchFailure::Term));
    }

    #[test]
    fn unmapped_processing_unit_never_matches() {
        let rule = rule("ALL");
        let resolver = OrgUnitResolver::default();
        let ids: IdentitySet = ["R1"].into_iter().collect();
        let matcher = Matcher::new(&rule, &resolver, &ids);
        assert_eq!(matcher.check(&course("ACTIVE")), Err(MatchFailure::OrgUnit));
    }

    #[test]
    fn status_comparison_is_case_sensitive() {
        let rule = rule("active");
        let resolver = resolver();
        let ids: IdentitySet = ["R1"].into_iter().collect();
        let matcher = Matcher::new(&rule, &resolver, &ids);
        assert!(!matcher.matches(&course("ACTIVE")));
    }
}
