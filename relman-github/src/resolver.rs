//! Milestone title resolution and closed-issue listing

use std::sync::Arc;

use tracing::{debug, info};

use crate::api::{GitHubApi, StateFilter};
use crate::error::LookupKind;
use crate::store::MetadataStore;
use crate::{Error, Issue, Milestone, Result};

/// Resolves milestone titles against a loaded store
pub struct MilestoneResolver<C: ?Sized> {
    client: Arc<C>,
    org: String,
}

impl<C> MilestoneResolver<C>
where
    C: GitHubApi + ?Sized,
{
    /// Resolver issuing issue queries against repositories of `org`
    pub fn new(client: Arc<C>, org: impl Into<String>) -> Self {
        Self {
            client,
            org: org.into(),
        }
    }

    /// Find the milestone titled `title` in `repo`
    pub fn resolve<'s>(
        &self,
        store: &'s MetadataStore,
        repo: &str,
        title: &str,
    ) -> Result<&'s Milestone> {
        store.milestone(repo, title).ok_or_else(|| Error::NotFound {
            kind: LookupKind::Milestone,
            name: title.to_string(),
            repo: repo.to_string(),
        })
    }

    /// List the closed issues of the milestone titled `title` in `repo`
    ///
    /// Issues are returned exactly as the service lists them.
    pub async fn resolve_and_list_closed_issues(
        &self,
        store: &MetadataStore,
        repo: &str,
        title: &str,
    ) -> Result<Vec<Issue>> {
        let milestone = self.resolve(store, repo, title)?;
        let number = milestone.number.to_string();
        debug!(repo, title, milestone = %number, "Resolved milestone");

        let issues = self
            .client
            .list_issues_by_milestone(&self.org, repo, &number, StateFilter::Closed)
            .await?;

        info!(repo, title, count = issues.len(), "Fetched closed milestone issues");

        Ok(issues)
    }
}
