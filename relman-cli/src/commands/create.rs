//! Create commands - projects, milestones and labels

use std::sync::Arc;

use clap::{Args, Subcommand};
use relman_core::Config;
use relman_github::{EntityCreator, Ensured, Ensurer, Error, GitHubClient};

use super::{connect, load_store};

/// Create organization metadata
#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Load current metadata first and skip entities that already exist
    #[arg(long, global = true)]
    pub ensure: bool,

    #[command(subcommand)]
    pub command: CreateCommand,
}

#[derive(Subcommand, Debug)]
pub enum CreateCommand {
    /// Create an organization project with the configured columns
    Project {
        /// Project name
        name: String,

        /// Project description
        #[arg(short, long, default_value = "")]
        description: String,

        /// Column name (repeatable, overrides project.columns from config)
        #[arg(long = "column")]
        columns: Vec<String>,
    },

    /// Create a milestone
    Milestone {
        /// Repository name
        repo: String,

        /// Milestone title
        title: String,

        /// Due date (YYYY-MM-DD)
        #[arg(long)]
        due: Option<String>,
    },

    /// Create a label
    Label {
        /// Repository name
        repo: String,

        /// Label name
        name: String,

        /// Hex color without '#', e.g. 0e8a16
        color: String,
    },
}

impl CreateArgs {
    /// Execute the create command
    pub async fn execute(&self, verbose: bool, config: &Config) -> anyhow::Result<()> {
        if config.github.org.trim().is_empty() {
            anyhow::bail!("No organization configured. Set github.org, RELMAN_ORG or --org");
        }

        let client = connect(config)?;

        if self.ensure {
            return self.execute_ensure(verbose, config, client).await;
        }

        let org = config.github.org.as_str();
        let creator = EntityCreator::new(client);

        match &self.command {
            CreateCommand::Project {
                name,
                description,
                columns,
            } => {
                let columns = project_columns(columns, config);
                let project = creator
                    .create_project(org, name, description, &columns)
                    .await
                    .map_err(explain_partial)?;
                println!("Created project {} (id {})", project.name, project.id);
            }
            CreateCommand::Milestone { repo, title, due } => {
                let milestone = creator
                    .create_milestone(org, repo, title, due.as_deref())
                    .await?;
                println!("Created milestone {} #{} in {}", milestone.title, milestone.number, repo);
            }
            CreateCommand::Label { repo, name, color } => {
                let label = creator.create_label(org, repo, name, color).await?;
                println!("Created label {} ({}) in {}", label.name, label.color, repo);
            }
        }

        Ok(())
    }

    async fn execute_ensure(
        &self,
        verbose: bool,
        config: &Config,
        client: Arc<GitHubClient>,
    ) -> anyhow::Result<()> {
        if verbose {
            println!("Loading current metadata for {}...", config.github.org);
        }

        let store = load_store(config, client.clone()).await?;
        let org = config.github.org.as_str();
        let ensurer = Ensurer::new(client);

        match &self.command {
            CreateCommand::Project {
                name,
                description,
                columns,
            } => {
                let columns = project_columns(columns, config);
                let project = ensurer
                    .ensure_project(&store, org, name, description, &columns)
                    .await
                    .map_err(explain_partial)?;
                report("project", name, &project);
            }
            CreateCommand::Milestone { repo, title, due } => {
                let milestone = ensurer
                    .ensure_milestone(&store, org, repo, title, due.as_deref())
                    .await?;
                report("milestone", title, &milestone);
            }
            CreateCommand::Label { repo, name, color } => {
                let label = ensurer
                    .ensure_label(&store, org, repo, name, color)
                    .await?;
                report("label", name, &label);
            }
        }

        Ok(())
    }
}

fn project_columns(columns: &[String], config: &Config) -> Vec<String> {
    if columns.is_empty() {
        config.project.columns.clone()
    } else {
        columns.to_vec()
    }
}

fn report<T>(kind: &str, name: &str, outcome: &Ensured<T>) {
    if outcome.was_created() {
        println!("Created {} {}", kind, name);
    } else {
        println!("{} {} already exists, skipped", kind, name);
    }
}

/// Partial project creation needs manual cleanup; say so
fn explain_partial(err: Error) -> anyhow::Error {
    if let Error::PartialCreation { ref project, .. } = err {
        let id = project.id;
        return anyhow::Error::new(err).context(format!(
            "project {} exists remotely with missing columns; fix it by hand \
             before retrying, or a duplicate project will be created",
            id
        ));
    }
    err.into()
}
