//! Relman GitHub - organization metadata aggregation for relman
//!
//! This crate drains GitHub's paginated listings into an in-memory
//! [`MetadataStore`] (projects, releases, per-repository milestones and
//! labels), resolves milestones by title, and creates projects, milestones
//! and labels, either directly or find-or-create through [`Ensurer`].
//!
//! All remote access goes through the [`GitHubApi`] trait; [`GitHubClient`]
//! implements it with octocrab.

mod api;
mod client;
mod creator;
mod ensure;
mod error;
mod issues;
mod loader;
mod models;
mod paginate;
mod resolver;
mod store;

#[cfg(test)]
mod testing;

pub use api::{GitHubApi, PageChunk, StateFilter};
pub use client::GitHubClient;
pub use creator::{parse_due_date, EntityCreator, DUE_DATE_FORMAT};
pub use ensure::{Ensured, Ensurer};
pub use error::{Error, LookupKind, Result, TransportSource};
pub use issues::{Issue, IssueState};
pub use loader::{load_repo, Loader};
pub use models::{Label, Milestone, MilestoneState, Project, Release};
pub use paginate::drain;
pub use resolver::MilestoneResolver;
pub use store::{MetadataStore, RepoMetadata};
