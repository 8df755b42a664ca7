//! Remote client abstraction over the GitHub calls relman needs

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::{Issue, Label, Milestone, Project, Release, Result};

/// State filter accepted by list endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateFilter {
    Open,
    Closed,
    All,
}

impl StateFilter {
    /// Query parameter value
    pub fn as_str(&self) -> &'static str {
        match self {
            StateFilter::Open => "open",
            StateFilter::Closed => "closed",
            StateFilter::All => "all",
        }
    }
}

/// One page of a paginated listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageChunk<T> {
    /// Items on this page, in service order
    pub items: Vec<T>,
    /// Last page number reported by the service (0 when unknown)
    pub last_page: u32,
}

impl<T> PageChunk<T> {
    /// Page of `items`, where `last_page` is the service's last page number
    pub fn new(items: Vec<T>, last_page: u32) -> Self {
        Self { items, last_page }
    }
}

/// Authenticated GitHub client as seen by the aggregation layer
///
/// Every method is a single remote call. Implementations surface failures as
/// [`crate::Error::Transport`] and never retry.
#[async_trait]
pub trait GitHubApi: Send + Sync {
    /// List the organization's projects
    async fn list_organization_projects(&self, org: &str) -> Result<Vec<Project>>;

    /// List a repository's milestones
    async fn list_milestones(
        &self,
        org: &str,
        repo: &str,
        state: StateFilter,
    ) -> Result<Vec<Milestone>>;

    /// Fetch one page of a repository's labels (pages start at 1)
    async fn list_labels(&self, org: &str, repo: &str, page: u32) -> Result<PageChunk<Label>>;

    /// List a repository's releases
    async fn list_releases(&self, org: &str, repo: &str) -> Result<Vec<Release>>;

    /// List issues assigned to a milestone
    ///
    /// `milestone` is the decimal milestone number, as the issue filter expects.
    async fn list_issues_by_milestone(
        &self,
        org: &str,
        repo: &str,
        milestone: &str,
        state: StateFilter,
    ) -> Result<Vec<Issue>>;

    /// Create an organization project
    async fn create_project(&self, org: &str, name: &str, description: &str) -> Result<Project>;

    /// Append a column to a project
    async fn create_project_column(&self, project_id: u64, name: &str) -> Result<()>;

    /// Create a milestone, optionally due at midnight UTC of `due_on`
    async fn create_milestone(
        &self,
        org: &str,
        repo: &str,
        title: &str,
        due_on: Option<NaiveDate>,
    ) -> Result<Milestone>;

    /// Create a label
    async fn create_label(&self, org: &str, repo: &str, name: &str, color: &str) -> Result<Label>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_filter_values() {
        assert_eq!(StateFilter::Open.as_str(), "open");
        assert_eq!(StateFilter::Closed.as_str(), "closed");
        assert_eq!(StateFilter::All.as_str(), "all");
    }
}
