//! Activity construction.

use tracing::debug;

use cal_model::{
    Activity, CodeValue, Course, LocalizedValue, MappingRule, MemberResearcher, Settings,
    TEACHING_CATEGORY, activity_course_term,
};

use crate::dates::normalize_date;

/// Visibility and language applied to every activity of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityOptions {
    /// Portal (public profile) visibility.
    pub visibility_public: bool,
    /// Researcher profile visibility.
    pub visibility_researcher: bool,
    /// Language code of the activity name.
    pub language: String,
}

impl Default for ActivityOptions {
    fn default() -> Self {
        Self::from(&Settings::default())
    }
}

impl From<&Settings> for ActivityOptions {
    fn from(settings: &Settings) -> Self {
        Self {
            visibility_public: settings.visibility_public,
            visibility_researcher: settings.visibility_researcher,
            language: settings.language.clone(),
        }
    }
}

/// Maps courses to activities under one rule.
#[derive(Debug, Clone)]
pub struct Transformer<'a> {
    rule: &'a MappingRule,
    options: &'a ActivityOptions,
}

impl<'a> Transformer<'a> {
    pub fn new(rule: &'a MappingRule, options: &'a ActivityOptions) -> Self {
        Self { rule, options }
    }

    /// Build the activity for one course.
    ///
    /// Every instructor becomes a member with the rule's role, order 0,
    /// shown in the profile and not the creator.
    pub fn transform(&self, course: &Course) -> Activity {
        let member_researcher = course
            .instructor
            .iter()
            .map(|instructor| MemberResearcher {
                user_primary_id: instructor.primary_id.clone(),
                role: self.rule.researcher_role.clone(),
                order: 0,
                display_in_profile: true,
                creator: false,
            })
            .collect();

        let activity_type = (!self.rule.activity_type.is_empty())
            .then(|| CodeValue::same(self.rule.activity_type.as_str()));

        Activity {
            activity_category: CodeValue::same(TEACHING_CATEGORY),
            activity_type,
            activity_name: vec![LocalizedValue::new(
                self.options.language.as_str(),
                course.name.as_str(),
            )],
            activity_start_date: normalize_date(&course.start_date),
            activity_end_date: normalize_date(&course.end_date),
            member_researcher,
            profile_visibility: self.options.visibility_researcher,
            portal_visibility: self.options.visibility_public,
            repository_status: CodeValue::new("approved", "Approved"),
            input_method: CodeValue::same("activity.imported"),
            activity_course_term: activity_course_term(&self.rule.course_term),
            activity_course_enrollment: course.participants.clone(),
            activity_course_id: course.code.clone(),
            activity_course_name: course.name.clone(),
            activity_course_hours: course.weekly_hours.clone(),
        }
    }

    /// One activity per course, in course order.
    pub fn transform_all(&self, courses: &[Course]) -> Vec<Activity> {
        let activities: Vec<Activity> = courses.iter().map(|c| self.transform(c)).collect();
        debug!(count = activities.len(), rule = %self.rule.name, "built activities");
        activities
    }
}
