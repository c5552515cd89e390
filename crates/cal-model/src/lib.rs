//! Data model for the course activity loader.
//!
//! Source records (courses, researcher identities) are read from external
//! collections, matched against a [`MappingRule`], and turned into
//! [`Activity`] records that are submitted one member at a time.

pub mod activity;
pub mod course;
pub mod error;
pub mod org_unit;
pub mod rule;
pub mod settings;
pub mod status;

pub use activity::{
    Activity, LocalizedValue, MemberResearcher, TEACHING_CATEGORY, activity_course_term,
};
pub use course::{CodeValue, Course, Instructor};
pub use error::{ModelError, Result};
pub use org_unit::{MappingRow, OrgUnitMapping};
pub use rule::{ALL_STATUSES, MappingRule, MappingRules};
pub use settings::Settings;
pub use status::{PipelineStatus, SubmissionOutcome};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_defaults_match_loader_defaults() {
        let settings = Settings::default();
        assert!(settings.visibility_public);
        assert!(settings.visibility_researcher);
        assert_eq!(settings.language, "und");
        assert!(settings.mapping_rules.is_empty());
    }

    #[test]
    fn activity_serializes_snake_case() {
        let activity = Activity {
            activity_course_id: "HIST101".to_string(),
            activity_name: vec![LocalizedValue::new("en", "History")],
            ..Activity::default()
        };
        let json = serde_json::to_value(&activity).expect("serialize activity");
        assert_eq!(json["activity_course_id"], "HIST101");
        assert_eq!(json["activity_name"][0]["language"], "en");
        assert!(json.get("activity_type").is_none());
    }
}
