//! Source ingestion for the course activity loader.
//!
//! This crate drains the paged researcher-set and course collections into
//! memory and provides the configuration inputs of a run.
//!
//! # Features
//!
//! - **Paging**: [`collect_pages`] requests pages strictly one after another
//!   and stops at the reported total or at a short page
//! - **Sources**: [`IdentitySource`], [`CourseSource`] and [`ConfigSource`]
//!   describe the collaborators; [`RestClient`] implements them over HTTP
//! - **Settings**: [`SettingsStore`] persists [`cal_model::Settings`] as TOML

mod client;
mod error;
mod pager;
mod settings;
mod sources;

// === Error Types ===
pub use error::{IngestError, Result};

// === Paging ===
pub use pager::{DEFAULT_PAGE_SIZE, Page, collect_pages};

// === Collaborators ===
pub use sources::{
    ConfigSource, CourseData, CourseSource, IdentitySource, ORG_UNIT_MAPPING_TABLE, ResearcherSet,
    ResearcherSetSize, ResearcherSets, SetMember, SetMembers, fetch_all_courses, fetch_all_ids,
};

// === HTTP ===
pub use client::{Query, RestClient};

// === Settings ===
pub use settings::{SettingsStore, StoredConfig};
