//! Creation of projects, milestones and labels
//!
//! These are plain create calls: nothing here checks whether the entity
//! already exists. Use [`crate::ensure`] for look-up-before-create.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::api::GitHubApi;
use crate::{Error, Label, Milestone, Project, Result};

/// Due dates are calendar dates, e.g. `2024-06-01`
pub const DUE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Issues creation calls against the remote service
pub struct EntityCreator<C: ?Sized> {
    client: Arc<C>,
}

impl<C> EntityCreator<C>
where
    C: GitHubApi + ?Sized,
{
    /// Creator issuing calls through `client`
    pub fn new(client: Arc<C>) -> Self {
        Self { client }
    }

    /// Create an organization project and its columns, in order
    ///
    /// Not atomic. If a column fails, the project stays on the remote side
    /// with the earlier columns and [`Error::PartialCreation`] is returned.
    pub async fn create_project(
        &self,
        org: &str,
        name: &str,
        description: &str,
        columns: &[String],
    ) -> Result<Project> {
        let mut project = self.client.create_project(org, name, description).await?;
        info!(org, name, id = project.id, "Created project");

        for column in columns {
            if let Err(e) = self.client.create_project_column(project.id, column).await {
                warn!(project = project.id, column = %column, error = %e, "Failed to create project column");
                let created_columns = project.columns.clone();
                return Err(Error::PartialCreation {
                    project,
                    created_columns,
                    failed_column: column.clone(),
                    source: Box::new(e),
                });
            }
            debug!(project = project.id, column = %column, "Created project column");
            project.columns.push(column.clone());
        }

        Ok(project)
    }

    /// Create a milestone, optionally due on a `YYYY-MM-DD` date
    ///
    /// A malformed date fails with [`Error::InvalidInput`] before any remote call.
    pub async fn create_milestone(
        &self,
        org: &str,
        repo: &str,
        title: &str,
        due_date: Option<&str>,
    ) -> Result<Milestone> {
        let due_on = due_date.map(parse_due_date).transpose()?;

        let milestone = self
            .client
            .create_milestone(org, repo, title, due_on)
            .await?;
        info!(repo, title, number = milestone.number, ?due_on, "Created milestone");

        Ok(milestone)
    }

    /// Create a label; the color is passed through unvalidated
    pub async fn create_label(
        &self,
        org: &str,
        repo: &str,
        name: &str,
        color: &str,
    ) -> Result<Label> {
        let label = self.client.create_label(org, repo, name, color).await?;
        info!(repo, name, color, "Created label");
        Ok(label)
    }
}

/// Parse a due date in [`DUE_DATE_FORMAT`]
pub fn parse_due_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, DUE_DATE_FORMAT).map_err(|e| {
        Error::InvalidInput(format!(
            "due date '{}' is not a valid YYYY-MM-DD date: {}",
            value, e
        ))
    })
}
