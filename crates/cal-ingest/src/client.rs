//! REST client for the research and course services.
//!
//! Implements [`IdentitySource`] and [`CourseSource`] against the hosted
//! API and exposes the set search, mapping table, and JSON post calls used
//! by the rest of the loader.

use async_trait::async_trait;
use reqwest::Url;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue, USER_AGENT};
use serde::Serialize;
use serde::de::DeserializeOwned;

use cal_model::{Course, OrgUnitMapping};

use crate::error::{IngestError, Result};
use crate::pager::Page;
use crate::sources::{
    CourseData, CourseSource, IdentitySource, ResearcherSet, ResearcherSets, SetMembers,
};

/// User agent string for API requests.
const USER_AGENT_VALUE: &str = concat!("course-activity-loader/", env!("CARGO_PKG_VERSION"));

/// Query parameters as (name, value) pairs.
pub type Query<'a> = [(&'a str, String)];

/// Client for the hosted research and course APIs.
#[derive(Debug, Clone)]
pub struct RestClient {
    client: reqwest::Client,
    base_url: String,
}

impl RestClient {
    /// Creates a client for the given API root.
    ///
    /// # Arguments
    /// * `base_url` - API root, e.g. `https://api-eu.hosted.exlibrisgroup.com`
    /// * `api_key` - Key sent in the `Authorization: apikey ...` header
    pub fn new(base_url: impl Into<String>, api_key: Option<&str>) -> Result<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Url::parse(&base_url).map_err(|e| IngestError::InvalidUrl(format!("{base_url}: {e}")))?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));
        if let Some(key) = api_key {
            let value = HeaderValue::from_str(&format!("apikey {key}"))
                .map_err(|e| IngestError::InvalidUrl(format!("invalid API key header: {e}")))?;
            headers.insert(AUTHORIZATION, value);
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| IngestError::Network(format!("failed to create HTTP client: {e}")))?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Builds the absolute URL for an API path.
    pub fn url(&self, path: &str, query: &Query<'_>) -> Result<Url> {
        let raw = format!("{}{}", self.base_url, path);
        let parsed = if query.is_empty() {
            Url::parse(&raw)
        } else {
            Url::parse_with_params(&raw, query.iter().map(|(k, v)| (*k, v.as_str())))
        };
        parsed.map_err(|e| IngestError::InvalidUrl(format!("{raw}: {e}")))
    }

    /// Builds the URL for an API path followed by caller-supplied segments.
    ///
    /// Each segment is percent-encoded, so `/`, `?` and `#` inside an id stay
    /// part of that segment.
    pub fn url_with_segments(
        &self,
        path: &str,
        segments: &[&str],
        query: &Query<'_>,
    ) -> Result<Url> {
        let mut url = self.url(path, query)?;
        url.path_segments_mut()
            .map_err(|()| IngestError::InvalidUrl(format!("{}: not a base URL", self.base_url)))?
            .extend(segments);
        Ok(url)
    }

    /// GET a JSON document.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str, query: &Query<'_>) -> Result<T> {
        self.fetch_json(self.url(path, query)?).await
    }

    async fn fetch_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        // Queries can carry researcher ids; only the path is logged.
        tracing::debug!(path = url.path(), "GET");
        let response = self.client.get(url).send().await?;
        let response = Self::check_status(response).await?;
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// POST a JSON body, succeeding on any 2xx status.
    ///
    /// The reply body is not read; an empty 201 or 204 counts as success.
    pub async fn post_json<B>(&self, path: &str, query: &Query<'_>, body: &B) -> Result<()>
    where
        B: Serialize + ?Sized,
    {
        let url = self.url(path, query)?;
        tracing::debug!(path = url.path(), "POST");
        let payload = serde_json::to_vec(body)?;
        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .body(payload)
            .send()
            .await?;
        Self::check_status(response).await?;
        Ok(())
    }

    /// Turns a non-success status into [`IngestError::Http`].
    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(IngestError::Http {
            status: status.as_u16(),
            message: error_message(&body),
        })
    }

    /// Searches researcher sets, optionally by name fragment.
    pub async fn search_sets(&self, name: Option<&str>) -> Result<Vec<ResearcherSet>> {
        let mut query = vec![("content_type", "RESEARCHERS".to_string())];
        if let Some(name) = name.filter(|name| !name.trim().is_empty()) {
            query.push(("q", format!("name~{name}")));
        }
        let sets: ResearcherSets = self
            .get_json("/esploro/v1/researchconf/sets", &query)
            .await?;
        Ok(sets.set)
    }

    /// Fetches a two-column mapping table by name.
    pub async fn mapping_table(&self, name: &str) -> Result<OrgUnitMapping> {
        let url = self.url_with_segments("/esploro/v1/conf/mapping-tables", &[name], &[])?;
        self.fetch_json(url).await
    }
}

#[async_trait]
impl IdentitySource for RestClient {
    async fn list_ids(
        &self,
        set_id: &str,
        page_index: usize,
        page_size: usize,
    ) -> Result<Page<String>> {
        let query = page_query(page_index, page_size);
        let url =
            self.url_with_segments("/esploro/v1/researchconf/sets", &[set_id, "members"], &query)?;
        let body: SetMembers = self.fetch_json(url).await?;
        Ok(body.into())
    }
}

#[async_trait]
impl CourseSource for RestClient {
    async fn list_courses(&self, page_index: usize, page_size: usize) -> Result<Page<Course>> {
        let mut query = page_query(page_index, page_size);
        query.extend([
            ("status", "ACTIVE".to_string()),
            ("order_by", "start_date".to_string()),
            ("direction", "DESC".to_string()),
        ]);
        let body: CourseData = self.get_json("/almaws/v1/courses", &query).await?;
        Ok(body.into())
    }
}

/// `limit`/`offset` parameters for a page index.
fn page_query(page_index: usize, page_size: usize) -> Vec<(&'static str, String)> {
    vec![
        ("limit", page_size.to_string()),
        ("offset", (page_index * page_size).to_string()),
    ]
}

/// Pulls the first error message out of a service error body.
///
/// Error bodies look like
/// `{"errorList":{"error":[{"errorCode":"..","errorMessage":".."}]}}`;
/// anything else is returned trimmed.
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            value
                .pointer("/errorList/error/0/errorMessage")
                .and_then(|message| message.as_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| body.trim().to_string())
}
