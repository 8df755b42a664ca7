//! Find-or-create operations over a loaded store
//!
//! Each operation looks the entity up in the [`MetadataStore`] first and only
//! creates it when missing. The store is not updated with created entities;
//! reload to see them.

use std::sync::Arc;

use tracing::info;

use crate::api::GitHubApi;
use crate::creator::{parse_due_date, EntityCreator};
use crate::store::{MetadataStore, RepoMetadata};
use crate::{Error, Label, Milestone, Project, Result};

/// Outcome of a find-or-create
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ensured<T> {
    /// Already present in the store; nothing was created
    Existing(T),
    /// Created by this call
    Created(T),
}

impl<T> Ensured<T> {
    /// Whether this call created the entity
    pub fn was_created(&self) -> bool {
        matches!(self, Ensured::Created(_))
    }

    /// Borrow the entity
    pub fn get(&self) -> &T {
        match self {
            Ensured::Existing(v) | Ensured::Created(v) => v,
        }
    }

    /// Take the entity, dropping the outcome
    pub fn into_inner(self) -> T {
        match self {
            Ensured::Existing(v) | Ensured::Created(v) => v,
        }
    }
}

/// Find-or-create layer on top of [`EntityCreator`]
pub struct Ensurer<C: ?Sized> {
    creator: EntityCreator<C>,
}

impl<C> Ensurer<C>
where
    C: GitHubApi + ?Sized,
{
    pub fn new(client: Arc<C>) -> Self {
        Self {
            creator: EntityCreator::new(client),
        }
    }

    /// Return the milestone titled `title`, creating it if the store has none
    ///
    /// The due date is validated even when the milestone already exists.
    /// A repository the store never loaded is rejected with
    /// [`Error::InvalidInput`] before any remote call.
    pub async fn ensure_milestone(
        &self,
        store: &MetadataStore,
        org: &str,
        repo: &str,
        title: &str,
        due_date: Option<&str>,
    ) -> Result<Ensured<Milestone>> {
        if let Some(date) = due_date {
            parse_due_date(date)?;
        }

        if let Some(existing) = loaded_repo(store, repo)?.milestone(title) {
            info!(repo, title, number = existing.number, "Milestone already exists, skipping");
            return Ok(Ensured::Existing(existing.clone()));
        }

        self.creator
            .create_milestone(org, repo, title, due_date)
            .await
            .map(Ensured::Created)
    }

    /// Return the label named `name`, creating it if the store has none
    ///
    /// An existing label is returned as-is even if its color differs.
    /// A repository the store never loaded is rejected like in
    /// [`Ensurer::ensure_milestone`].
    pub async fn ensure_label(
        &self,
        store: &MetadataStore,
        org: &str,
        repo: &str,
        name: &str,
        color: &str,
    ) -> Result<Ensured<Label>> {
        if let Some(existing) = loaded_repo(store, repo)?.label(name) {
            info!(repo, name, "Label already exists, skipping");
            return Ok(Ensured::Existing(existing.clone()));
        }

        self.creator
            .create_label(org, repo, name, color)
            .await
            .map(Ensured::Created)
    }

    /// Return the project named `name`, creating it with `columns` if missing
    pub async fn ensure_project(
        &self,
        store: &MetadataStore,
        org: &str,
        name: &str,
        description: &str,
        columns: &[String],
    ) -> Result<Ensured<Project>> {
        if let Some(existing) = store.project(name) {
            info!(name, id = existing.id, "Project already exists, skipping");
            return Ok(Ensured::Existing(existing.clone()));
        }

        self.creator
            .create_project(org, name, description, columns)
            .await
            .map(Ensured::Created)
    }
}

/// Metadata of `repo`, which must have been part of the load
fn loaded_repo<'s>(store: &'s MetadataStore, repo: &str) -> Result<&'s RepoMetadata> {
    store.repo(repo).ok_or_else(|| {
        Error::InvalidInput(format!(
            "repository {} is not in the loaded metadata; add it to the configured repos",
            repo
        ))
    })
}
