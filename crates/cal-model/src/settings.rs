//! Loader settings.

use serde::{Deserialize, Serialize};

use crate::rule::{MappingRule, MappingRules};

/// Settings applied to every activity of a run.
///
/// Aliases accept the field names used by older settings documents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Show activities on the public profile (portal).
    #[serde(alias = "activitiesVisibilityPublicProfile")]
    pub visibility_public: bool,
    /// Show activities on the researcher profile.
    #[serde(alias = "activitiesVisibilityResearcherProfile")]
    pub visibility_researcher: bool,
    /// Language code for activity names.
    #[serde(alias = "activitiesLanguage")]
    pub language: String,
    #[serde(alias = "activityMapping")]
    pub mapping_rules: MappingRules,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            visibility_public: true,
            visibility_researcher: true,
            language: "und".to_string(),
            mapping_rules: MappingRules::new(),
        }
    }
}

impl Settings {
    /// Look up a rule by key, then by its `name` field.
    pub fn rule(&self, name: &str) -> Option<&MappingRule> {
        self.mapping_rules
            .get(name)
            .or_else(|| self.mapping_rules.values().find(|rule| rule.name == name))
    }

    /// Insert a rule under its own name.
    pub fn insert_rule(&mut self, rule: MappingRule) {
        self.mapping_rules.insert(rule.name.clone(), rule);
    }

    /// Remove a rule by key, then by its `name` field.
    pub fn remove_rule(&mut self, name: &str) -> Option<MappingRule> {
        if let Some(rule) = self.mapping_rules.remove(name) {
            return Some(rule);
        }
        let key = self
            .mapping_rules
            .iter()
            .find(|(_, rule)| rule.name == name)
            .map(|(key, _)| key.clone())?;
        self.mapping_rules.remove(&key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rule_lookup_by_key_or_name() {
        let mut settings = Settings::default();
        settings.mapping_rules.insert(
            "teaching".to_string(),
            MappingRule {
                name: "Undergraduate teaching".to_string(),
                ..MappingRule::default()
            },
        );
        assert!(settings.rule("teaching").is_some());
        assert!(settings.rule("Undergraduate teaching").is_some());
        assert!(settings.rule("missing").is_none());
    }

    #[test]
    fn remove_rule_by_key_or_name() {
        let mut settings = Settings::default();
        settings.mapping_rules.insert(
            "teaching".to_string(),
            MappingRule {
                name: "Undergraduate teaching".to_string(),
                ..MappingRule::default()
            },
        );
        settings.insert_rule(MappingRule {
            name: "Supervision".to_string(),
            ..MappingRule::default()
        });
        assert!(settings.remove_rule("Undergraduate teaching").is_some());
        assert!(settings.remove_rule("Supervision").is_some());
        assert!(settings.remove_rule("Supervision").is_none());
        assert!(settings.mapping_rules.is_empty());
    }

    #[test]
    fn legacy_field_names_decode() {
        let json = r#"{"activitiesVisibilityPublicProfile": false, "activitiesLanguage": "en"}"#;
        let settings: Settings = serde_json::from_str(json).expect("decode settings");
        assert!(!settings.visibility_public);
        assert!(settings.visibility_researcher);
        assert_eq!(settings.language, "en");
    }
}
