//! Processing unit to organizational unit lookup.

use cal_model::{MappingRow, OrgUnitMapping};

/// Flat lookup over an ordered mapping table.
///
/// Source codes may repeat; the first row wins.
#[derive(Debug, Clone, Default)]
pub struct OrgUnitResolver {
    rows: Vec<MappingRow>,
}

impl OrgUnitResolver {
    pub fn new(mapping: OrgUnitMapping) -> Self {
        Self { rows: mapping.row }
    }

    /// Organizational unit for a processing unit code.
    pub fn resolve(&self, source_code: &str) -> Option<&str> {
        self.rows
            .iter()
            .find(|row| row.column0 == source_code)
            .map(|row| row.column1.as_str())
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl From<OrgUnitMapping> for OrgUnitResolver {
    fn from(mapping: OrgUnitMapping) -> Self {
        Self::new(mapping)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_matching_row_wins() {
        let resolver = OrgUnitResolver::new(OrgUnitMapping::from_pairs([
            ("SCI", "OU1"),
            ("ART", "OU2"),
            ("SCI", "OU3"),
        ]));
        assert_eq!(resolver.resolve("SCI"), Some("OU1"));
        assert_eq!(resolver.resolve("ART"), Some("OU2"));
    }

    #[test]
    fn lookup_is_exact() {
        let resolver = OrgUnitResolver::new(OrgUnitMapping::from_pairs([("SCI", "OU1")]));
        assert_eq!(resolver.resolve("sci"), None);
        assert_eq!(resolver.resolve(""), None);
        assert!(OrgUnitResolver::default().resolve("SCI").is_none());
    }
}
