//! GitHub API client using octocrab

use crate::api::{GitHubApi, PageChunk, StateFilter};
use crate::{Error, Issue, Label, Milestone, Project, Release, Result};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use octocrab::models::issues::Issue as OctocrabIssue;
use octocrab::{Octocrab, Page};
use relman_core::Secrets;
use serde::Serialize;
use tracing::{debug, info};

/// Page size requested from list endpoints (GitHub's maximum)
const PER_PAGE: u8 = 100;

/// GitHub API client for organization metadata
pub struct GitHubClient {
    client: Octocrab,
}

/// Query parameters shared by the list endpoints
#[derive(Debug, Default, Serialize)]
struct ListParams<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    state: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    milestone: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    page: Option<u32>,
    per_page: u8,
}

impl ListParams<'_> {
    fn new() -> Self {
        Self {
            per_page: PER_PAGE,
            ..Default::default()
        }
    }
}

#[derive(Debug, Serialize)]
struct CreateProjectBody<'a> {
    name: &'a str,
    body: &'a str,
}

#[derive(Debug, Serialize)]
struct CreateColumnBody<'a> {
    name: &'a str,
}

#[derive(Debug, Serialize)]
struct CreateMilestoneBody<'a> {
    title: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    due_on: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize)]
struct CreateLabelBody<'a> {
    name: &'a str,
    color: &'a str,
}

impl GitHubClient {
    /// Create a new GitHub client against api.github.com
    ///
    /// Credentials are loaded from (in priority order):
    /// 1. GITHUB_TOKEN / GITHUB_USERNAME environment variables
    /// 2. ~/.config/relman/secrets.toml
    pub fn new() -> Result<Self> {
        Self::with_api_url(None)
    }

    /// Create a new GitHub client, optionally against an Enterprise API URL
    pub fn with_api_url(api_url: Option<&str>) -> Result<Self> {
        let secrets = Secrets::load().map_err(|e| Error::Auth(e.to_string()))?;

        let token = secrets.github_token().ok_or_else(|| {
            Error::Auth(
                "GitHub token not found. Set GITHUB_TOKEN environment variable \
                 or add token to ~/.config/relman/secrets.toml"
                    .to_string(),
            )
        })?;

        let mut builder = match secrets.github_username() {
            Some(username) => Octocrab::builder().basic_auth(username, token),
            None => Octocrab::builder().personal_token(token),
        };

        if let Some(url) = api_url {
            builder = builder
                .base_uri(url)
                .map_err(|e| Error::Auth(format!("Invalid API URL {}: {}", url, e)))?;
        }

        let client = builder
            .build()
            .map_err(|e| Error::Auth(format!("Failed to create GitHub client: {}", e)))?;

        info!(api_url = api_url.unwrap_or("https://api.github.com"), "Created GitHub client");

        Ok(Self { client })
    }

    /// Wrap an already configured octocrab instance
    pub fn from_octocrab(client: Octocrab) -> Self {
        Self { client }
    }

    /// Get the underlying octocrab client
    pub fn client(&self) -> &Octocrab {
        &self.client
    }

    /// Test the connection by fetching organization info
    pub async fn test_connection(&self, org: &str) -> Result<()> {
        debug!(org, "Testing GitHub connection");

        self.client
            .get::<serde_json::Value, _, _>(format!("/orgs/{org}"), None::<&()>)
            .await
            .map_err(|e| {
                let friendly = match &e {
                    octocrab::Error::GitHub { source, .. } => {
                        connection_failure(&source.message, org)
                    }
                    _ => None,
                };
                friendly.unwrap_or_else(|| Error::from(e))
            })?;

        info!("GitHub connection successful");
        Ok(())
    }
}

#[async_trait]
impl GitHubApi for GitHubClient {
    async fn list_organization_projects(&self, org: &str) -> Result<Vec<Project>> {
        debug!(org, "Listing organization projects");

        let projects: Vec<Project> = self
            .client
            .get(format!("/orgs/{org}/projects"), Some(&ListParams::new()))
            .await?;

        Ok(projects)
    }

    async fn list_milestones(
        &self,
        org: &str,
        repo: &str,
        state: StateFilter,
    ) -> Result<Vec<Milestone>> {
        debug!(org, repo, state = state.as_str(), "Listing milestones");

        let params = ListParams {
            state: Some(state.as_str()),
            ..ListParams::new()
        };

        let milestones: Vec<Milestone> = self
            .client
            .get(format!("/repos/{org}/{repo}/milestones"), Some(&params))
            .await?;

        Ok(milestones)
    }

    async fn list_labels(&self, org: &str, repo: &str, page: u32) -> Result<PageChunk<Label>> {
        debug!(org, repo, page, "Listing labels");

        let params = ListParams {
            page: Some(page),
            ..ListParams::new()
        };

        let response: Page<Label> = self
            .client
            .get(format!("/repos/{org}/{repo}/labels"), Some(&params))
            .await?;

        // GitHub drops the `last` link on the final page
        let last_page = response.number_of_pages().unwrap_or(0);

        Ok(PageChunk::new(response.items, last_page))
    }

    async fn list_releases(&self, org: &str, repo: &str) -> Result<Vec<Release>> {
        debug!(org, repo, "Listing releases");

        let releases: Vec<Release> = self
            .client
            .get(format!("/repos/{org}/{repo}/releases"), Some(&ListParams::new()))
            .await?;

        Ok(releases)
    }

    async fn list_issues_by_milestone(
        &self,
        org: &str,
        repo: &str,
        milestone: &str,
        state: StateFilter,
    ) -> Result<Vec<Issue>> {
        debug!(org, repo, milestone, state = state.as_str(), "Listing milestone issues");

        let params = ListParams {
            state: Some(state.as_str()),
            milestone: Some(milestone),
            ..ListParams::new()
        };

        let issues: Vec<OctocrabIssue> = self
            .client
            .get(format!("/repos/{org}/{repo}/issues"), Some(&params))
            .await?;

        Ok(issues.into_iter().map(Issue::from).collect())
    }

    async fn create_project(&self, org: &str, name: &str, description: &str) -> Result<Project> {
        debug!(org, name, "Creating project");

        let project: Project = self
            .client
            .post(
                format!("/orgs/{org}/projects"),
                Some(&CreateProjectBody {
                    name,
                    body: description,
                }),
            )
            .await?;

        Ok(project)
    }

    async fn create_project_column(&self, project_id: u64, name: &str) -> Result<()> {
        debug!(project_id, name, "Creating project column");

        let _column: serde_json::Value = self
            .client
            .post(
                format!("/projects/{project_id}/columns"),
                Some(&CreateColumnBody { name }),
            )
            .await?;

        Ok(())
    }

    async fn create_milestone(
        &self,
        org: &str,
        repo: &str,
        title: &str,
        due_on: Option<NaiveDate>,
    ) -> Result<Milestone> {
        debug!(org, repo, title, ?due_on, "Creating milestone");

        let body = CreateMilestoneBody {
            title,
            due_on: due_on.map(midnight_utc),
        };

        let milestone: Milestone = self
            .client
            .post(format!("/repos/{org}/{repo}/milestones"), Some(&body))
            .await?;

        Ok(milestone)
    }

    async fn create_label(&self, org: &str, repo: &str, name: &str, color: &str) -> Result<Label> {
        debug!(org, repo, name, color, "Creating label");

        let label: Label = self
            .client
            .post(
                format!("/repos/{org}/{repo}/labels"),
                Some(&CreateLabelBody { name, color }),
            )
            .await?;

        Ok(label)
    }
}

impl std::fmt::Debug for GitHubClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubClient").finish_non_exhaustive()
    }
}

/// Timestamp GitHub stores for a due date
fn midnight_utc(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

/// Friendlier error for the GitHub messages `test_connection` commonly sees
///
/// Only a rejected token is an authentication problem. A missing or hidden
/// organization stays a transport failure.
fn connection_failure(message: &str, org: &str) -> Option<Error> {
    if message.contains("Bad credentials") {
        Some(Error::Auth("Invalid GitHub token".to_string()))
    } else if message.contains("Not Found") {
        Some(Error::transport(format!(
            "Organization {} not found or not accessible",
            org
        )))
    } else {
        None
    }
}
