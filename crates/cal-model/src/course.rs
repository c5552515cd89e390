//! Course records as returned by the courses collection.

use serde::{Deserialize, Deserializer, Serialize};

/// A coded value with an optional description (`{ value, desc }`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodeValue {
    pub value: String,
    pub desc: String,
}

impl CodeValue {
    pub fn new(value: impl Into<String>, desc: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            desc: desc.into(),
        }
    }

    /// Code value whose description repeats the value.
    pub fn same(value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            desc: value.clone(),
            value,
        }
    }
}

/// A course instructor. Only `primary_id` takes part in matching.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Instructor {
    pub primary_id: String,
    pub first_name: String,
    pub last_name: String,
}

impl Instructor {
    pub fn new(primary_id: impl Into<String>) -> Self {
        Self {
            primary_id: primary_id.into(),
            ..Self::default()
        }
    }
}

/// A course considered for matching.
///
/// Dates stay in the source `DD/MM/YYYY` text form; normalization happens
/// in the transformer. Enrollment and weekly hours are kept as text because
/// the source sends them as either strings or numbers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Course {
    pub id: String,
    pub code: String,
    pub name: String,
    pub status: String,
    pub term: Vec<CodeValue>,
    pub processing_department: CodeValue,
    #[serde(deserialize_with = "lenient_text")]
    pub start_date: String,
    #[serde(deserialize_with = "lenient_text")]
    pub end_date: String,
    #[serde(deserialize_with = "lenient_text")]
    pub participants: String,
    #[serde(deserialize_with = "lenient_text")]
    pub weekly_hours: String,
    pub instructor: Vec<Instructor>,
}

impl Course {
    /// Instructor identities in source order.
    pub fn instructor_ids(&self) -> impl Iterator<Item = &str> {
        self.instructor.iter().map(|inst| inst.primary_id.as_str())
    }

    /// Term values in source order.
    pub fn term_values(&self) -> impl Iterator<Item = &str> {
        self.term.iter().map(|term| term.value.as_str())
    }

    pub fn processing_unit(&self) -> &str {
        &self.processing_department.value
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TextOrNumber {
    Text(String),
    Integer(i64),
    Float(f64),
    Flag(bool),
}

/// Accepts a string, a number, or null and yields text.
fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<TextOrNumber>::deserialize(deserializer)?;
    Ok(match value {
        None => String::new(),
        Some(TextOrNumber::Text(text)) => text,
        Some(TextOrNumber::Integer(number)) => number.to_string(),
        Some(TextOrNumber::Float(number)) => number.to_string(),
        Some(TextOrNumber::Flag(flag)) => flag.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn course_decodes_numeric_participants() {
        let json = r#"{
            "id": "1",
            "code": "BIO200",
            "name": "Cell Biology",
            "status": "ACTIVE",
            "participants": 42,
            "weekly_hours": null,
            "term": [{"value": "AUTUMN", "desc": "Autumn"}],
            "processing_department": {"value": "SCI"},
            "instructor": [{"primary_id": "R1", "first_name": "Ada"}]
        }"#;
        let course: Course = serde_json::from_str(json).expect("decode course");
        assert_eq!(course.participants, "42");
        assert_eq!(course.weekly_hours, "");
        assert_eq!(course.processing_unit(), "SCI");
        assert_eq!(course.term_values().collect::<Vec<_>>(), vec!["AUTUMN"]);
        assert_eq!(course.instructor_ids().collect::<Vec<_>>(), vec!["R1"]);
    }

    #[test]
    fn course_tolerates_missing_collections() {
        let course: Course = serde_json::from_str(r#"{"id": "7"}"#).expect("decode course");
        assert!(course.term.is_empty());
        assert!(course.instructor.is_empty());
        assert_eq!(course.start_date, "");
    }
}
