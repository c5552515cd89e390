use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, anyhow};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Deserialize;
use tracing::{error, info, warn};

use cal_cli::logging::redact_value;
use cal_cli::report::RunReport;
use cal_core::{Pipeline, PipelineRequest, PipelineRun, RuleSource};
use cal_ingest::{CourseData, ResearcherSet, RestClient, SettingsStore, StoredConfig};
use cal_model::{Course, MappingRule, Settings};
use cal_submit::RestActivitySink;

use crate::cli::{RulesAction, RulesArgs, RunArgs, ServiceArgs, SetsArgs};

fn settings_store(service: &ServiceArgs) -> SettingsStore {
    match &service.settings {
        Some(path) => SettingsStore::new(path),
        None => SettingsStore::at_default_path(),
    }
}

fn rest_client(service: &ServiceArgs) -> Result<RestClient> {
    RestClient::new(service.api_url.as_str(), service.api_key.as_deref())
        .map_err(|e| anyhow!("{} ({e})", e.user_message()))
}

pub async fn run(args: &RunArgs, service: &ServiceArgs) -> Result<RunReport> {
    let client = rest_client(service)?;
    let config = StoredConfig::new(settings_store(service), client.clone());
    let pipeline = Pipeline::new(
        Arc::new(client.clone()),
        Arc::new(client.clone()),
        Arc::new(config),
        Arc::new(RestActivitySink::new(client)),
    )
    .with_mapping_table(args.mapping_table.as_str());

    let rule = match (&args.rule, &args.rule_json) {
        (_, Some(json)) => RuleSource::Json(json.clone()),
        (Some(name), None) => RuleSource::Named(name.clone()),
        (None, None) => return Err(anyhow!("a mapping rule is required")),
    };
    let mut request = PipelineRequest::new(rule).with_page_size(args.page_size);
    request = match &args.set {
        Some(set_id) => request.with_set(set_id.as_str()),
        None => {
            if let Some(first) = args.ids.first() {
                info!(
                    count = args.ids.len(),
                    first = %redact_value(first),
                    "using listed identities"
                );
            }
            request.with_identities(args.ids.iter().cloned())
        }
    };
    if let Some(path) = &args.courses_json {
        request = request.with_courses(read_courses(path)?);
    }

    let run = pipeline.run(request).await.map_err(|e| {
        error!(error = %e, "run aborted");
        anyhow!("{} ({e})", e.user_message())
    })?;
    info!(
        identities = run.identity_count(),
        courses = run.course_count(),
        matched = run.matched_count(),
        "dispatch started"
    );
    Ok(settle_with_progress(run).await)
}

/// Waits for the submissions while drawing a progress bar on stderr.
async fn settle_with_progress(run: PipelineRun) -> RunReport {
    let total = run.handle().total();
    let bar = ProgressBar::new(total as u64);
    if let Ok(style) =
        ProgressStyle::with_template("{spinner} [{bar:40}] {pos}/{len} submissions {msg}")
    {
        bar.set_style(style.progress_chars("=> "));
    }

    let mut progress = run.handle().progress();
    loop {
        let status = *progress.borrow_and_update();
        bar.set_position(status.attempted_count as u64);
        if let Some(percent) = status.percent_complete {
            bar.set_message(format!("({percent:.0}%)"));
        }
        if status.is_settled() || progress.changed().await.is_err() {
            break;
        }
    }

    let report = RunReport {
        rule: run.context().rule.name.clone(),
        identity_count: run.identity_count(),
        course_count: run.course_count(),
        matched_count: run.matched_count(),
        board: run.settle().await,
    };
    bar.finish_and_clear();

    for line in report.lines().iter().filter(|line| !line.success) {
        warn!(
            activity = %line.activity,
            researcher = %redact_value(&line.researcher),
            message = %line.message,
            "activity not created"
        );
    }
    report
}

/// Course file: either `{"course": [...]}` as served by the course API or a
/// bare list.
#[derive(Deserialize)]
#[serde(untagged)]
enum CourseFile {
    List(Vec<Course>),
    Page(CourseData),
}

fn read_courses(path: &Path) -> Result<Vec<Course>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("read courses from {}", path.display()))?;
    let file: CourseFile = serde_json::from_str(&content)
        .with_context(|| format!("parse courses in {}", path.display()))?;
    Ok(match file {
        CourseFile::List(courses) => courses,
        CourseFile::Page(page) => page.course,
    })
}

pub async fn sets(args: &SetsArgs, service: &ServiceArgs) -> Result<Vec<ResearcherSet>> {
    let client = rest_client(service)?;
    client
        .search_sets(args.name.as_deref())
        .await
        .map_err(|e| anyhow!("{} ({e})", e.user_message()))
}

/// Applies the rules action, if any, and returns the resulting settings.
pub fn rules(args: &RulesArgs, service: &ServiceArgs) -> Result<Settings> {
    let store = settings_store(service);
    let mut settings = store
        .load()
        .with_context(|| format!("load settings from {}", store.path().display()))?;
    let Some(action) = &args.action else {
        return Ok(settings);
    };

    match action {
        RulesAction::Add { json } => {
            let rule = MappingRule::from_json(json).context("parse rule")?;
            info!(rule = %rule.name, "saving rule");
            settings.insert_rule(rule);
        }
        RulesAction::Remove { name } => {
            if settings.remove_rule(name).is_none() {
                return Err(anyhow!("no rule named {name}"));
            }
            info!(rule = %name, "removed rule");
        }
    }
    store
        .save(&settings)
        .with_context(|| format!("save settings to {}", store.path().display()))?;
    Ok(settings)
}
