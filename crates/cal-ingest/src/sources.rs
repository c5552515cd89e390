//! Collaborator interfaces for the source collections and configuration.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use cal_model::{Course, OrgUnitMapping, Settings};

use crate::error::Result;
use crate::pager::{Page, collect_pages};

/// Mapping table that translates processing units to organizational units.
pub const ORG_UNIT_MAPPING_TABLE: &str = "PlatformProcessingUnitToOrganizationalUnit";

/// Pages of researcher identities belonging to a set.
#[async_trait]
pub trait IdentitySource: Send + Sync {
    async fn list_ids(
        &self,
        set_id: &str,
        page_index: usize,
        page_size: usize,
    ) -> Result<Page<String>>;
}

/// Pages of active courses, newest start date first.
#[async_trait]
pub trait CourseSource: Send + Sync {
    async fn list_courses(&self, page_index: usize, page_size: usize) -> Result<Page<Course>>;
}

/// Loader settings and mapping tables.
#[async_trait]
pub trait ConfigSource: Send + Sync {
    async fn settings(&self) -> Result<Settings>;

    async fn mapping_table(&self, name: &str) -> Result<OrgUnitMapping>;
}

/// Every identity of a set, in source order.
pub async fn fetch_all_ids(
    source: &dyn IdentitySource,
    set_id: &str,
    page_size: usize,
) -> Result<Vec<String>> {
    collect_pages("set_members", page_size, move |page_index, page_size| {
        source.list_ids(set_id, page_index, page_size)
    })
    .await
}

/// Every course, in source order.
pub async fn fetch_all_courses(source: &dyn CourseSource, page_size: usize) -> Result<Vec<Course>> {
    collect_pages("courses", page_size, move |page_index, page_size| {
        source.list_courses(page_index, page_size)
    })
    .await
}

// === Wire types ===

/// A member entry of a researcher set.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct SetMember {
    pub id: String,
    pub description: String,
}

/// Response body of the set-members endpoint.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct SetMembers {
    pub member: Vec<SetMember>,
    pub total_record_count: usize,
}

impl From<SetMembers> for Page<String> {
    fn from(body: SetMembers) -> Self {
        Page::new(
            body.member.into_iter().map(|member| member.id).collect(),
            body.total_record_count,
        )
    }
}

/// Response body of the courses endpoint.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct CourseData {
    pub course: Vec<Course>,
    pub total_record_count: usize,
}

impl From<CourseData> for Page<Course> {
    fn from(body: CourseData) -> Self {
        Page::new(body.course, body.total_record_count)
    }
}

/// A researcher set as listed by the set search endpoint.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ResearcherSet {
    pub id: String,
    pub name: String,
    pub description: String,
    pub number_of_members: ResearcherSetSize,
}

/// Member count wrapper (`{ "value": n }`).
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ResearcherSetSize {
    pub value: usize,
}

/// Response body of the set search endpoint.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ResearcherSets {
    pub set: Vec<ResearcherSet>,
    pub total_record_count: usize,
}
