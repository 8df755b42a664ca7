//! In-memory index of organization metadata

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{Label, Milestone, Project, Release};

/// Milestones and labels of one repository, in service order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoMetadata {
    pub milestones: Vec<Milestone>,
    pub labels: Vec<Label>,
}

impl RepoMetadata {
    /// Find a milestone by exact title
    pub fn milestone(&self, title: &str) -> Option<&Milestone> {
        self.milestones.iter().find(|m| m.title == title)
    }

    /// Find a label by exact name
    pub fn label(&self, name: &str) -> Option<&Label> {
        self.labels.iter().find(|l| l.name == name)
    }
}

/// Aggregated organization metadata from one load
///
/// The set of repository keys is fixed when the store is built. Lookups return
/// the first match; titles and names are trusted to be unique per repository.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataStore {
    projects: Vec<Project>,
    repos: HashMap<String, RepoMetadata>,
    releases: Vec<Release>,
}

impl MetadataStore {
    /// Build a store from fully drained listings, keyed by repository name
    pub fn new(
        projects: Vec<Project>,
        repos: HashMap<String, RepoMetadata>,
        releases: Vec<Release>,
    ) -> Self {
        Self {
            projects,
            repos,
            releases,
        }
    }

    /// Organization projects
    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    /// Release history of the release repository
    pub fn releases(&self) -> &[Release] {
        &self.releases
    }

    /// Metadata recorded for a repository
    pub fn repo(&self, name: &str) -> Option<&RepoMetadata> {
        self.repos.get(name)
    }

    /// Names of all indexed repositories, sorted
    pub fn repo_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.repos.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Find a milestone by repository and title
    pub fn milestone(&self, repo: &str, title: &str) -> Option<&Milestone> {
        self.repo(repo).and_then(|r| r.milestone(title))
    }

    /// Find a label by repository and name
    pub fn label(&self, repo: &str, name: &str) -> Option<&Label> {
        self.repo(repo).and_then(|r| r.label(name))
    }

    /// Find a project by name
    pub fn project(&self, name: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.name == name)
    }
}
