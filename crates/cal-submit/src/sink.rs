//! Destinations for activity submissions.

use std::sync::Arc;

use async_trait::async_trait;

use cal_ingest::RestClient;
use cal_model::{Activity, MemberResearcher};

use crate::error::Result;

/// Activity creation endpoint.
pub const ACTIVITIES_PATH: &str = "/esploro/v1/activities";

/// One create call: the whole activity plus the member it is made for.
#[derive(Debug, Clone)]
pub struct ActivitySubmission {
    pub activity: Arc<Activity>,
    /// Index into `activity.member_researcher`.
    pub member: usize,
}

impl ActivitySubmission {
    pub fn new(activity: Arc<Activity>, member: usize) -> Self {
        Self { activity, member }
    }

    pub fn member(&self) -> Option<&MemberResearcher> {
        self.activity.member_researcher.get(self.member)
    }

    /// Primary id of the member, or empty when the index is out of range.
    pub fn researcher(&self) -> &str {
        self.member()
            .map(|member| member.user_primary_id.as_str())
            .unwrap_or_default()
    }
}

/// Receives activity submissions.
#[async_trait]
pub trait ActivitySink: Send + Sync {
    async fn create_activity(&self, submission: &ActivitySubmission) -> Result<()>;
}

/// Posts activities to the research service, one call per member.
#[derive(Debug, Clone)]
pub struct RestActivitySink {
    client: RestClient,
}

impl RestActivitySink {
    pub fn new(client: RestClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ActivitySink for RestActivitySink {
    async fn create_activity(&self, submission: &ActivitySubmission) -> Result<()> {
        let query = [("user_primary_id", submission.researcher().to_string())];
        self.client
            .post_json(ACTIVITIES_PATH, &query, submission.activity.as_ref())
            .await?;
        Ok(())
    }
}
