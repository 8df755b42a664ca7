//! Organization and repository metadata entities

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Organization project board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Project ID
    pub id: u64,
    /// Display name
    pub name: String,
    /// Free-text description
    #[serde(default)]
    pub body: Option<String>,
    /// Column names in board order (empty for projects discovered by a load)
    #[serde(default)]
    pub columns: Vec<String>,
}

/// Milestone state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MilestoneState {
    #[default]
    Open,
    Closed,
}

/// Repository milestone
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Milestone {
    /// Milestone ID
    pub id: u64,
    /// Per-repository milestone number, used to filter issues
    pub number: u64,
    /// Title, unique within a repository
    pub title: String,
    /// Description
    #[serde(default)]
    pub description: Option<String>,
    /// Current state (open/closed)
    #[serde(default)]
    pub state: MilestoneState,
    /// Due date, if any
    #[serde(default)]
    pub due_on: Option<DateTime<Utc>>,
}

/// Repository label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    /// Name, unique within a repository
    pub name: String,
    /// Hex color without the leading `#`
    pub color: String,
    /// Description
    #[serde(default)]
    pub description: Option<String>,
}

/// Published release of the release-history repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Release {
    /// Git tag
    pub tag_name: String,
    /// Release title
    #[serde(default)]
    pub name: Option<String>,
    /// When the release was published (None for drafts)
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
    /// Whether the release is a draft
    #[serde(default)]
    pub draft: bool,
    /// Whether the release is a prerelease
    #[serde(default)]
    pub prerelease: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_milestone_from_rest_payload() {
        let json = r#"{
            "url": "https://api.github.com/repos/revel/revel/milestones/7",
            "id": 1002604,
            "number": 7,
            "state": "closed",
            "title": "v0.21",
            "description": null,
            "open_issues": 0,
            "closed_issues": 12,
            "due_on": "2024-06-01T00:00:00Z"
        }"#;

        let milestone: Milestone = serde_json::from_str(json).unwrap();
        assert_eq!(milestone.number, 7);
        assert_eq!(milestone.title, "v0.21");
        assert_eq!(milestone.state, MilestoneState::Closed);
        assert_eq!(
            milestone.due_on.unwrap().to_rfc3339(),
            "2024-06-01T00:00:00+00:00"
        );
    }

    #[test]
    fn test_label_from_rest_payload() {
        let json = r#"{
            "id": 208045946,
            "name": "bug",
            "description": null,
            "color": "f29513",
            "default": true
        }"#;

        let label: Label = serde_json::from_str(json).unwrap();
        assert_eq!(label.name, "bug");
        assert_eq!(label.color, "f29513");
        assert!(label.description.is_none());
    }

    #[test]
    fn test_project_without_columns() {
        let json = r#"{ "id": 1002604, "name": "Release v1", "body": "Tracking", "state": "open" }"#;

        let project: Project = serde_json::from_str(json).unwrap();
        assert_eq!(project.id, 1002604);
        assert_eq!(project.body.as_deref(), Some("Tracking"));
        assert!(project.columns.is_empty());
    }

    #[test]
    fn test_draft_release_has_no_publish_time() {
        let json = r#"{ "tag_name": "v1.0.0", "name": null, "draft": true, "prerelease": false, "published_at": null }"#;

        let release: Release = serde_json::from_str(json).unwrap();
        assert_eq!(release.tag_name, "v1.0.0");
        assert!(release.draft);
        assert!(release.published_at.is_none());
    }
}
