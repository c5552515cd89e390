use serde::{Deserialize, Serialize};

/// One row of a two-column mapping table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MappingRow {
    /// Source code (processing unit).
    pub column0: String,
    /// Target code (organizational unit).
    pub column1: String,
}

/// Ordered processing-unit to organizational-unit pairs.
///
/// Source codes are not required to be unique.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrgUnitMapping {
    pub row: Vec<MappingRow>,
}

impl OrgUnitMapping {
    pub fn from_pairs<I, S, T>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, T)>,
        S: Into<String>,
        T: Into<String>,
    {
        Self {
            row: pairs
                .into_iter()
                .map(|(source, target)| MappingRow {
                    column0: source.into(),
                    column1: target.into(),
                })
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.row.len()
    }

    pub fn is_empty(&self) -> bool {
        self.row.is_empty()
    }
}
