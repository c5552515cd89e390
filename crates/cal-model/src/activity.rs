//! Research activity records produced from matched courses.

use serde::{Deserialize, Serialize};

use crate::course::CodeValue;

/// Category code marking an activity as teaching.
pub const TEACHING_CATEGORY: &str = "activity.teaching";

/// A value tagged with its language code.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedValue {
    pub language: String,
    pub value: String,
}

impl LocalizedValue {
    pub fn new(language: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            value: value.into(),
        }
    }
}

/// A researcher attached to an activity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberResearcher {
    pub user_primary_id: String,
    pub role: String,
    pub order: u32,
    pub display_in_profile: bool,
    pub creator: bool,
}

/// A teaching activity, one per matched course.
///
/// `activity_course_id` (the course code) is the activity's identity for
/// outcome tracking.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    pub activity_category: CodeValue,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activity_type: Option<CodeValue>,
    pub activity_name: Vec<LocalizedValue>,
    pub activity_start_date: String,
    pub activity_end_date: String,
    pub member_researcher: Vec<MemberResearcher>,
    pub profile_visibility: bool,
    pub portal_visibility: bool,
    pub repository_status: CodeValue,
    pub input_method: CodeValue,
    pub activity_course_term: CodeValue,
    pub activity_course_enrollment: String,
    pub activity_course_id: String,
    pub activity_course_name: String,
    pub activity_course_hours: String,
}

impl Activity {
    pub fn id(&self) -> &str {
        &self.activity_course_id
    }

    /// First localized name, or empty.
    pub fn title(&self) -> &str {
        self.activity_name
            .first()
            .map(|name| name.value.as_str())
            .unwrap_or_default()
    }
}

/// Course-term code for an activity: `term.<lowercase term>`.
pub fn activity_course_term(term: &str) -> CodeValue {
    CodeValue::new(format!("term.{}", term.to_lowercase()), term)
}
