//! In-memory `GitHubApi` double for unit tests

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};

use crate::api::{GitHubApi, PageChunk, StateFilter};
use crate::{Error, Issue, IssueState, Label, Milestone, MilestoneState, Project, Release, Result};

/// A remote call observed by the fake
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    ListProjects {
        org: String,
    },
    ListMilestones {
        repo: String,
        state: StateFilter,
    },
    ListLabels {
        repo: String,
        page: u32,
    },
    ListReleases {
        repo: String,
    },
    ListIssues {
        repo: String,
        milestone: String,
        state: StateFilter,
    },
    CreateProject {
        name: String,
        description: String,
    },
    CreateColumn {
        project_id: u64,
        name: String,
    },
    CreateMilestone {
        repo: String,
        title: String,
        due_on: Option<NaiveDate>,
    },
    CreateLabel {
        repo: String,
        name: String,
        color: String,
    },
}

impl Call {
    pub fn is_create(&self) -> bool {
        matches!(
            self,
            Call::CreateProject { .. }
                | Call::CreateColumn { .. }
                | Call::CreateMilestone { .. }
                | Call::CreateLabel { .. }
        )
    }
}

type FailWhen = Box<dyn Fn(&Call) -> bool + Send + Sync>;

/// Scriptable fake GitHub that records every call
#[derive(Default)]
pub struct FakeGitHub {
    projects: Vec<Project>,
    milestones: HashMap<String, Vec<Milestone>>,
    label_pages: HashMap<String, Vec<Vec<Label>>>,
    releases: HashMap<String, Vec<Release>>,
    issues: HashMap<(String, String), Vec<Issue>>,
    fail_when: Vec<FailWhen>,
    milestone_delay: Option<Duration>,
    calls: Mutex<Vec<Call>>,
    next_id: AtomicU64,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl FakeGitHub {
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(1000),
            ..Default::default()
        }
    }

    pub fn with_projects(mut self, projects: Vec<Project>) -> Self {
        self.projects = projects;
        self
    }

    pub fn with_milestones(mut self, repo: &str, milestones: Vec<Milestone>) -> Self {
        self.milestones.insert(repo.to_string(), milestones);
        self
    }

    /// Labels served as the given pages, each reporting the page count as last page
    pub fn with_label_pages(mut self, repo: &str, pages: Vec<Vec<Label>>) -> Self {
        self.label_pages.insert(repo.to_string(), pages);
        self
    }

    pub fn with_releases(mut self, repo: &str, releases: Vec<Release>) -> Self {
        self.releases.insert(repo.to_string(), releases);
        self
    }

    pub fn with_issues(mut self, repo: &str, milestone: u64, issues: Vec<Issue>) -> Self {
        self.issues
            .insert((repo.to_string(), milestone.to_string()), issues);
        self
    }

    /// Fail every call matching `predicate` with a transport error
    pub fn fail_when(mut self, predicate: impl Fn(&Call) -> bool + Send + Sync + 'static) -> Self {
        self.fail_when.push(Box::new(predicate));
        self
    }

    /// Sleep inside each milestone listing
    pub fn with_milestone_delay(mut self, delay: Duration) -> Self {
        self.milestone_delay = Some(delay);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn create_calls(&self) -> Vec<Call> {
        self.calls().into_iter().filter(Call::is_create).collect()
    }

    /// Highest number of concurrent milestone listings seen
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    fn record(&self, call: Call) -> Result<()> {
        let fail = self.fail_when.iter().any(|p| p(&call));
        self.calls.lock().unwrap().push(call.clone());
        if fail {
            return Err(Error::transport(format!("injected failure: {:?}", call)));
        }
        Ok(())
    }

    fn next_id(&self) -> u64 {
        self.next_id.fetch_add(1, Ordering::SeqCst)
    }
}

#[async_trait]
impl GitHubApi for FakeGitHub {
    async fn list_organization_projects(&self, org: &str) -> Result<Vec<Project>> {
        self.record(Call::ListProjects {
            org: org.to_string(),
        })?;
        Ok(self.projects.clone())
    }

    async fn list_milestones(
        &self,
        _org: &str,
        repo: &str,
        state: StateFilter,
    ) -> Result<Vec<Milestone>> {
        self.record(Call::ListMilestones {
            repo: repo.to_string(),
            state,
        })?;

        if let Some(delay) = self.milestone_delay {
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_in_flight.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(delay).await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
        }

        Ok(self.milestones.get(repo).cloned().unwrap_or_default())
    }

    async fn list_labels(&self, _org: &str, repo: &str, page: u32) -> Result<PageChunk<Label>> {
        self.record(Call::ListLabels {
            repo: repo.to_string(),
            page,
        })?;

        let Some(pages) = self.label_pages.get(repo) else {
            return Ok(PageChunk::new(vec![], 0));
        };
        let items = pages
            .get(page as usize - 1)
            .cloned()
            .unwrap_or_default();
        Ok(PageChunk::new(items, pages.len() as u32))
    }

    async fn list_releases(&self, _org: &str, repo: &str) -> Result<Vec<Release>> {
        self.record(Call::ListReleases {
            repo: repo.to_string(),
        })?;
        Ok(self.releases.get(repo).cloned().unwrap_or_default())
    }

    async fn list_issues_by_milestone(
        &self,
        _org: &str,
        repo: &str,
        milestone: &str,
        state: StateFilter,
    ) -> Result<Vec<Issue>> {
        self.record(Call::ListIssues {
            repo: repo.to_string(),
            milestone: milestone.to_string(),
            state,
        })?;
        Ok(self
            .issues
            .get(&(repo.to_string(), milestone.to_string()))
            .cloned()
            .unwrap_or_default())
    }

    async fn create_project(&self, _org: &str, name: &str, description: &str) -> Result<Project> {
        self.record(Call::CreateProject {
            name: name.to_string(),
            description: description.to_string(),
        })?;
        Ok(Project {
            id: self.next_id(),
            name: name.to_string(),
            body: Some(description.to_string()),
            columns: vec![],
        })
    }

    async fn create_project_column(&self, project_id: u64, name: &str) -> Result<()> {
        self.record(Call::CreateColumn {
            project_id,
            name: name.to_string(),
        })
    }

    async fn create_milestone(
        &self,
        _org: &str,
        repo: &str,
        title: &str,
        due_on: Option<NaiveDate>,
    ) -> Result<Milestone> {
        self.record(Call::CreateMilestone {
            repo: repo.to_string(),
            title: title.to_string(),
            due_on,
        })?;
        let id = self.next_id();
        Ok(Milestone {
            due_on: due_on.map(|d| d.and_time(NaiveTime::MIN).and_utc()),
            id,
            ..milestone(id, title)
        })
    }

    async fn create_label(&self, _org: &str, repo: &str, name: &str, color: &str) -> Result<Label> {
        self.record(Call::CreateLabel {
            repo: repo.to_string(),
            name: name.to_string(),
            color: color.to_string(),
        })?;
        Ok(label(name, color))
    }
}

pub fn project(id: u64, name: &str) -> Project {
    Project {
        id,
        name: name.to_string(),
        body: None,
        columns: vec![],
    }
}

pub fn milestone(number: u64, title: &str) -> Milestone {
    Milestone {
        id: number * 100,
        number,
        title: title.to_string(),
        description: None,
        state: MilestoneState::Open,
        due_on: None,
    }
}

pub fn label(name: &str, color: &str) -> Label {
    Label {
        name: name.to_string(),
        color: color.to_string(),
        description: None,
    }
}

/// `count` labels named `{prefix}-{n}`
pub fn labels(prefix: &str, count: usize) -> Vec<Label> {
    (0..count)
        .map(|n| label(&format!("{prefix}-{n}"), "ededed"))
        .collect()
}

pub fn release(tag: &str) -> Release {
    Release {
        tag_name: tag.to_string(),
        name: Some(tag.to_string()),
        published_at: Utc.timestamp_opt(1_700_000_000, 0).single(),
        draft: false,
        prerelease: false,
    }
}

pub fn issue(number: u64, title: &str) -> Issue {
    Issue {
        number,
        title: title.to_string(),
        body: String::new(),
        state: IssueState::Closed,
        labels: vec![],
        html_url: format!("https://github.com/acme/core/issues/{number}"),
        created_at: Utc.timestamp_opt(1_700_000_000, 0).unwrap(),
        closed_at: Utc.timestamp_opt(1_700_100_000, 0).single(),
        is_pull_request: false,
    }
}
