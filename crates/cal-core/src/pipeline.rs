//! Sequential run driver.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{Instrument, error, info, info_span};

use cal_ingest::{
    ConfigSource, CourseSource, IdentitySource, ORG_UNIT_MAPPING_TABLE, fetch_all_courses,
    fetch_all_ids,
};
use cal_map::IdentitySet;
use cal_model::{MappingRule, PipelineStatus};
use cal_submit::{ActivitySink, DispatchHandle, OutcomeBoard, dispatch};

use crate::context::{
    IdentitySelection, PipelineRequest, RuleSource, RunContext, require_selection,
};
use crate::error::{PipelineError, Result, SourceKind};
use crate::stage::Stage;

/// Drives runs against a fixed set of collaborators.
pub struct Pipeline {
    identities: Arc<dyn IdentitySource>,
    courses: Arc<dyn CourseSource>,
    config: Arc<dyn ConfigSource>,
    sink: Arc<dyn ActivitySink>,
    mapping_table: String,
    stage: watch::Sender<Stage>,
    /// Progress of the latest dispatch, if the run got that far.
    progress: watch::Sender<Option<watch::Receiver<PipelineStatus>>>,
}

impl Pipeline {
    pub fn new(
        identities: Arc<dyn IdentitySource>,
        courses: Arc<dyn CourseSource>,
        config: Arc<dyn ConfigSource>,
        sink: Arc<dyn ActivitySink>,
    ) -> Self {
        Self {
            identities,
            courses,
            config,
            sink,
            mapping_table: ORG_UNIT_MAPPING_TABLE.to_string(),
            stage: watch::Sender::new(Stage::Idle),
            progress: watch::Sender::new(None),
        }
    }

    /// Use a different org-unit mapping table.
    pub fn with_mapping_table(mut self, name: impl Into<String>) -> Self {
        self.mapping_table = name.into();
        self
    }

    pub fn stage(&self) -> Stage {
        *self.stage.borrow()
    }

    /// Status of the current run.
    ///
    /// Loading while the sequential stages run, then the completion counts
    /// of the dispatched submissions.
    pub fn status(&self) -> PipelineStatus {
        if self.stage().is_loading() {
            return PipelineStatus::loading();
        }
        self.progress
            .borrow()
            .as_ref()
            .map(|progress| *progress.borrow())
            .unwrap_or_default()
    }

    /// Receiver of stage changes.
    pub fn subscribe_stage(&self) -> watch::Receiver<Stage> {
        self.stage.subscribe()
    }

    /// Run the pipeline up to the start of dispatch.
    ///
    /// Returns once every submission has been issued. Outcomes keep
    /// arriving on the returned run's board afterwards.
    ///
    /// # Errors
    ///
    /// Any fetch failure, a malformed or unknown rule, or a missing identity
    /// selection aborts the run. Nothing matched or transformed so far is
    /// kept.
    pub async fn run(&self, request: PipelineRequest) -> Result<PipelineRun> {
        let result = self.execute(request).await;
        if let Err(err) = &result {
            error!(stage = %self.stage(), error = %err, "pipeline aborted");
            self.enter(Stage::Failed);
        }
        result
    }

    async fn execute(&self, request: PipelineRequest) -> Result<PipelineRun> {
        let PipelineRequest {
            identities,
            rule,
            courses,
            page_size,
        } = request;

        self.enter(Stage::Idle);
        self.progress.send_replace(None);
        let selection = require_selection(identities)?;
        let parsed_rule = match &rule {
            RuleSource::Json(text) => Some(MappingRule::from_json(text)?),
            RuleSource::Named(_) => None,
        };

        self.enter(Stage::FetchingIdentities);
        let ids = match selection {
            IdentitySelection::Set(set_id) => {
                let span = info_span!("fetch_identities", set = %set_id);
                fetch_all_ids(self.identities.as_ref(), &set_id, page_size)
                    .instrument(span)
                    .await
                    .map_err(|e| PipelineError::source_unavailable(SourceKind::Identities, e))?
            }
            IdentitySelection::Explicit(ids) => ids,
        };
        let identity_count = ids.len();
        let identities: IdentitySet = ids.into_iter().collect();
        info!(identities = identity_count, "identities ready");

        self.enter(Stage::FetchingCourses);
        let courses = match courses {
            Some(courses) => courses,
            None => fetch_all_courses(self.courses.as_ref(), page_size)
                .instrument(info_span!("fetch_courses"))
                .await
                .map_err(|e| PipelineError::source_unavailable(SourceKind::Courses, e))?,
        };
        info!(courses = courses.len(), "courses ready");

        self.enter(Stage::FetchingConfig);
        let context = self
            .fetch_context(&rule, parsed_rule)
            .instrument(info_span!("fetch_config", table = %self.mapping_table))
            .await?;

        self.enter(Stage::Matching);
        let matched = info_span!("match", rule = %context.rule.name)
            .in_scope(|| context.matcher(&identities).match_all(&courses));
        info!(candidates = courses.len(), matched = matched.len(), "matched courses");

        self.enter(Stage::Transforming);
        let activities =
            info_span!("transform").in_scope(|| context.transformer().transform_all(&matched));

        self.enter(Stage::Dispatching);
        let handle = info_span!("dispatch", activities = activities.len())
            .in_scope(|| dispatch(Arc::clone(&self.sink), activities));
        info!(submissions = handle.total(), "dispatch started");
        self.progress.send_replace(Some(handle.progress()));
        self.enter(Stage::Settling);

        Ok(PipelineRun {
            context,
            identity_count,
            course_count: courses.len(),
            matched_count: matched.len(),
            handle,
        })
    }

    async fn fetch_context(
        &self,
        rule: &RuleSource,
        parsed_rule: Option<MappingRule>,
    ) -> Result<RunContext> {
        let settings = self
            .config
            .settings()
            .await
            .map_err(|e| PipelineError::source_unavailable(SourceKind::Settings, e))?;
        let mapping = self
            .config
            .mapping_table(&self.mapping_table)
            .await
            .map_err(|e| PipelineError::source_unavailable(SourceKind::MappingTable, e))?;
        let rule = match parsed_rule {
            Some(rule) => rule,
            None => RunContext::resolve_rule(rule, &settings)?,
        };
        info!(rule = %rule.name, mapping_rows = mapping.len(), "configuration ready");
        Ok(RunContext::new(rule, settings, mapping))
    }

    fn enter(&self, stage: Stage) {
        self.stage.send_replace(stage);
    }
}

/// A run whose submissions have been issued.
#[derive(Debug)]
pub struct PipelineRun {
    context: RunContext,
    identity_count: usize,
    course_count: usize,
    matched_count: usize,
    handle: DispatchHandle,
}

impl PipelineRun {
    pub fn context(&self) -> &RunContext {
        &self.context
    }

    pub fn identity_count(&self) -> usize {
        self.identity_count
    }

    /// Courses considered before matching.
    pub fn course_count(&self) -> usize {
        self.course_count
    }

    /// Matched courses, which is also the number of activities.
    pub fn matched_count(&self) -> usize {
        self.matched_count
    }

    /// Current status; never loading once the run exists.
    pub fn status(&self) -> PipelineStatus {
        self.handle.status()
    }

    pub fn handle(&self) -> &DispatchHandle {
        &self.handle
    }

    pub fn board(&self) -> Arc<OutcomeBoard> {
        self.handle.board()
    }

    /// Wait for every submission to complete.
    pub async fn settle(self) -> Arc<OutcomeBoard> {
        self.handle.settle().await
    }
}
