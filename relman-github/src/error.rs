//! Error types for GitHub metadata operations

use std::fmt;

use thiserror::Error;

use crate::Project;

/// Result type for GitHub metadata operations
pub type Result<T> = std::result::Result<T, Error>;

/// Boxed cause of a failed remote call
pub type TransportSource = Box<dyn std::error::Error + Send + Sync + 'static>;

/// What a failed name lookup was searching for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupKind {
    Milestone,
    Label,
    Project,
}

impl fmt::Display for LookupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LookupKind::Milestone => write!(f, "milestone"),
            LookupKind::Label => write!(f, "label"),
            LookupKind::Project => write!(f, "project"),
        }
    }
}

/// Errors that can occur during GitHub metadata operations
#[derive(Error, Debug)]
pub enum Error {
    /// A remote call failed (network, auth, rate limit, service error)
    #[error("GitHub API error: {0}")]
    Transport(TransportSource),

    /// Authentication or client setup error
    #[error("GitHub authentication error: {0}")]
    Auth(String),

    /// A named entity is missing from the loaded metadata
    #[error("could not find {kind} '{name}' in repo {repo}")]
    NotFound {
        kind: LookupKind,
        name: String,
        repo: String,
    },

    /// Caller input rejected before any remote call was made
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A multi-step creation failed after the remote side already changed
    #[error(
        "project '{}' (id {}) was created but column '{failed_column}' failed after {} column(s): {source}",
        .project.name,
        .project.id,
        .created_columns.len()
    )]
    PartialCreation {
        /// The project as it now exists remotely
        project: Project,
        /// Columns created before the failure, in order
        created_columns: Vec<String>,
        /// Column whose creation failed
        failed_column: String,
        /// Underlying failure
        source: Box<Error>,
    },
}

impl Error {
    /// Wrap any error as a transport failure
    pub fn transport(err: impl Into<TransportSource>) -> Self {
        Error::Transport(err.into())
    }

    /// Check if this came from a failed remote call
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Transport(_))
    }

    /// Check if this is a lookup miss
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }

    /// Check if remote side effects happened before the failure
    pub fn is_partial(&self) -> bool {
        matches!(self, Error::PartialCreation { .. })
    }
}

impl From<octocrab::Error> for Error {
    fn from(err: octocrab::Error) -> Self {
        Error::Transport(Box::new(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_names_entity_and_repo() {
        let err = Error::NotFound {
            kind: LookupKind::Milestone,
            name: "v3".to_string(),
            repo: "x".to_string(),
        };
        assert_eq!(err.to_string(), "could not find milestone 'v3' in repo x");
        assert!(err.is_not_found());
        assert!(!err.is_transport());
    }

    #[test]
    fn test_partial_creation_message() {
        let err = Error::PartialCreation {
            project: Project {
                id: 42,
                name: "v1.2".to_string(),
                body: None,
                columns: vec!["To Do".to_string()],
            },
            created_columns: vec!["To Do".to_string()],
            failed_column: "Done".to_string(),
            source: Box::new(Error::transport("rate limited")),
        };

        let message = err.to_string();
        assert!(message.contains("'v1.2' (id 42)"));
        assert!(message.contains("column 'Done'"));
        assert!(message.contains("after 1 column(s)"));
        assert!(message.contains("rate limited"));
        assert!(err.is_partial());
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_transport_from_str() {
        let err = Error::transport("boom");
        assert!(err.is_transport());
        assert_eq!(err.to_string(), "GitHub API error: boom");
    }
}
