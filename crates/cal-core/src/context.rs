//! Run inputs and the per-run configuration snapshot.

use cal_ingest::DEFAULT_PAGE_SIZE;
use cal_map::{IdentitySet, Matcher, OrgUnitResolver};
use cal_model::{Course, MappingRule, OrgUnitMapping, Settings};
use cal_transform::{ActivityOptions, Transformer};

use crate::error::{PipelineError, Result};

/// Which researchers are eligible to trigger a match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentitySelection {
    /// Every member of a researcher set, fetched page by page.
    Set(String),
    /// A list given by the caller, used as is.
    Explicit(Vec<String>),
}

/// Where the mapping rule comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleSource {
    /// Serialized rule, parsed before anything is fetched.
    Json(String),
    /// Rule looked up by name in the fetched settings.
    Named(String),
}

/// What a caller asks a run to do.
#[derive(Debug, Clone)]
pub struct PipelineRequest {
    pub identities: Option<IdentitySelection>,
    pub rule: RuleSource,
    /// Courses supplied by the caller; skips the course fetch.
    pub courses: Option<Vec<Course>>,
    pub page_size: usize,
}

impl PipelineRequest {
    pub fn new(rule: RuleSource) -> Self {
        Self {
            identities: None,
            rule,
            courses: None,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    pub fn with_set(mut self, set_id: impl Into<String>) -> Self {
        self.identities = Some(IdentitySelection::Set(set_id.into()));
        self
    }

    pub fn with_identities<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.identities = Some(IdentitySelection::Explicit(
            ids.into_iter().map(Into::into).collect(),
        ));
        self
    }

    pub fn with_courses(mut self, courses: Vec<Course>) -> Self {
        self.courses = Some(courses);
        self
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }
}

/// Checks that a usable identity selection was given.
///
/// # Errors
///
/// [`PipelineError::MissingSelection`] when there is no selection, the set
/// id is blank, or the explicit list is empty.
pub(crate) fn require_selection(
    selection: Option<IdentitySelection>,
) -> Result<IdentitySelection> {
    match selection {
        Some(IdentitySelection::Set(id)) if !id.trim().is_empty() => {
            Ok(IdentitySelection::Set(id))
        }
        Some(IdentitySelection::Explicit(ids)) if !ids.is_empty() => {
            Ok(IdentitySelection::Explicit(ids))
        }
        _ => Err(PipelineError::MissingSelection),
    }
}

/// Configuration a run was executed with.
///
/// Built once per run from the fetched settings and mapping table; matching
/// and transformation read only from here.
#[derive(Debug, Clone)]
pub struct RunContext {
    pub rule: MappingRule,
    pub settings: Settings,
    pub org_units: OrgUnitResolver,
    pub options: ActivityOptions,
}

impl RunContext {
    pub fn new(rule: MappingRule, settings: Settings, mapping: OrgUnitMapping) -> Self {
        let options = ActivityOptions::from(&settings);
        Self {
            rule,
            settings,
            org_units: OrgUnitResolver::new(mapping),
            options,
        }
    }

    /// Resolve the rule source against the settings.
    ///
    /// # Errors
    ///
    /// [`PipelineError::MalformedRule`] for unparsable JSON and
    /// [`PipelineError::UnknownRule`] for a name missing from the settings.
    pub fn resolve_rule(source: &RuleSource, settings: &Settings) -> Result<MappingRule> {
        match source {
            RuleSource::Json(text) => Ok(MappingRule::from_json(text)?),
            RuleSource::Named(name) => settings
                .rule(name)
                .cloned()
                .ok_or_else(|| PipelineError::UnknownRule(name.clone())),
        }
    }

    pub fn matcher<'a>(&'a self, identities: &'a IdentitySet) -> Matcher<'a> {
        Matcher::new(&self.rule, &self.org_units, identities)
    }

    pub fn transformer(&self) -> Transformer<'_> {
        Transformer::new(&self.rule, &self.options)
    }
}
