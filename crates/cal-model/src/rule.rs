//! Mapping rules: which courses become activities, and how.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// Status sentinel that matches every course status (compared case-insensitively).
pub const ALL_STATUSES: &str = "ALL";

/// A user-authored mapping rule.
///
/// Field names on the wire follow the settings format of the loader
/// (`esploroOrgUnit`, `activityResearcherRole`, ...). Missing fields decode
/// as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MappingRule {
    pub name: String,
    /// Organizational unit a course's processing unit must resolve to.
    #[serde(rename = "esploroOrgUnit")]
    pub target_org_unit: String,
    /// Activity type code; left off the activity when empty.
    pub activity_type: String,
    /// Role assigned to every member researcher.
    #[serde(rename = "activityResearcherRole")]
    pub researcher_role: String,
    /// Term value that must appear among the course terms.
    pub course_term: String,
    /// Required course status, or [`ALL_STATUSES`].
    pub course_status: String,
}

impl MappingRule {
    /// Parse a rule from its serialized JSON form.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::MalformedRule`] when the text is not a JSON
    /// object of the rule shape or when the rule has no name.
    pub fn from_json(text: &str) -> Result<Self> {
        let rule: MappingRule =
            serde_json::from_str(text).map_err(|error| ModelError::MalformedRule {
                reason: error.to_string(),
            })?;
        if rule.name.trim().is_empty() {
            return Err(ModelError::MalformedRule {
                reason: "rule name is empty".to_string(),
            });
        }
        Ok(rule)
    }

    /// Serialize the rule for hand-off to a pipeline run.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// True when the rule's status is the "all statuses" sentinel.
    pub fn matches_any_status(&self) -> bool {
        self.course_status.eq_ignore_ascii_case(ALL_STATUSES)
    }
}

/// Mapping rules keyed by rule name.
pub type MappingRules = BTreeMap<String, MappingRule>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_settings_field_names() {
        let rule = MappingRule::from_json(
            r#"{"name":"Teaching","esploroOrgUnit":"OU1","activityType":"lecture",
                "activityResearcherRole":"instructor","courseTerm":"AUTUMN","courseStatus":"All"}"#,
        )
        .expect("parse rule");
        assert_eq!(rule.target_org_unit, "OU1");
        assert_eq!(rule.researcher_role, "instructor");
        assert!(rule.matches_any_status());
    }

    #[test]
    fn rejects_non_object_text() {
        let err = MappingRule::from_json("not json").unwrap_err();
        assert!(matches!(err, ModelError::MalformedRule { .. }));
    }

    #[test]
    fn rejects_nameless_rule() {
        let err = MappingRule::from_json(r#"{"courseTerm":"AUTUMN"}"#).unwrap_err();
        assert!(err.to_string().contains("name"));
    }

    #[test]
    fn json_form_survives_hand_off() {
        let rule = MappingRule {
            name: "Teaching".to_string(),
            course_status: "ACTIVE".to_string(),
            ..MappingRule::default()
        };
        let text = rule.to_json().expect("serialize rule");
        assert!(text.contains("\"courseStatus\":\"ACTIVE\""));
        assert_eq!(MappingRule::from_json(&text).expect("parse rule"), rule);
    }
}
