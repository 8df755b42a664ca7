//! Sync command - load and summarize organization metadata

use clap::Args;
use relman_core::Config;

use super::{connect, load_store};

/// Load projects, milestones, labels and releases
#[derive(Args, Debug)]
pub struct SyncArgs {
    /// Print the whole store as JSON
    #[arg(long)]
    pub json: bool,
}

impl SyncArgs {
    /// Execute the sync command
    pub async fn execute(&self, verbose: bool, config: &Config) -> anyhow::Result<()> {
        let client = connect(config)?;

        if verbose {
            println!(
                "Loading {} repositories from {}...",
                config.repos.len(),
                config.github.org
            );
        }

        let store = load_store(config, client).await?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&store)?);
            return Ok(());
        }

        println!("Organization {}", config.github.org);
        println!("  projects: {}", store.projects().len());
        println!("  releases: {}", store.releases().len());
        println!();

        for name in store.repo_names() {
            if let Some(repo) = store.repo(name) {
                println!(
                    "  {}: {} milestones, {} labels",
                    name,
                    repo.milestones.len(),
                    repo.labels.len()
                );
            }
        }

        Ok(())
    }
}
