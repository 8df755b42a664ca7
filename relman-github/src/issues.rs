//! Issue representation returned by milestone queries

use chrono::{DateTime, Utc};
use octocrab::models::issues::Issue as OctocrabIssue;
use serde::{Deserialize, Serialize};

/// Issue state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueState {
    Open,
    Closed,
}

impl From<octocrab::models::IssueState> for IssueState {
    fn from(state: octocrab::models::IssueState) -> Self {
        match state {
            octocrab::models::IssueState::Open => IssueState::Open,
            octocrab::models::IssueState::Closed => IssueState::Closed,
            _ => IssueState::Open, // Default to open for unknown states
        }
    }
}

/// GitHub issue representation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    /// Issue number
    pub number: u64,
    /// Issue title
    pub title: String,
    /// Issue body/description
    pub body: String,
    /// Current state (open/closed)
    pub state: IssueState,
    /// Labels attached to the issue
    pub labels: Vec<String>,
    /// Web URL of the issue
    pub html_url: String,
    /// When the issue was created
    pub created_at: DateTime<Utc>,
    /// When the issue was closed
    pub closed_at: Option<DateTime<Utc>>,
    /// Whether this issue is a pull request
    pub is_pull_request: bool,
}

impl From<OctocrabIssue> for Issue {
    fn from(issue: OctocrabIssue) -> Self {
        Issue {
            number: issue.number,
            title: issue.title,
            body: issue.body.unwrap_or_default(),
            state: issue.state.into(),
            labels: issue.labels.into_iter().map(|l| l.name).collect(),
            html_url: issue.html_url.to_string(),
            created_at: issue.created_at,
            closed_at: issue.closed_at,
            is_pull_request: issue.pull_request.is_some(),
        }
    }
}
