//! Issues command - closed issues of a milestone

use clap::Args;
use relman_core::Config;
use relman_github::MilestoneResolver;

use super::{connect, load_store};

/// List closed issues assigned to a milestone
#[derive(Args, Debug)]
pub struct IssuesArgs {
    /// Repository name
    pub repo: String,

    /// Milestone title
    pub milestone: String,
}

impl IssuesArgs {
    /// Execute the issues command
    pub async fn execute(&self, verbose: bool, config: &Config) -> anyhow::Result<()> {
        let client = connect(config)?;
        let store = load_store(config, client.clone()).await?;

        if verbose {
            println!(
                "Resolving milestone '{}' in {}/{}...",
                self.milestone, config.github.org, self.repo
            );
        }

        let resolver = MilestoneResolver::new(client, config.github.org.clone());
        let issues = resolver
            .resolve_and_list_closed_issues(&store, &self.repo, &self.milestone)
            .await?;

        if issues.is_empty() {
            println!("No closed issues.");
            return Ok(());
        }

        println!(
            "Closed issues in {} {} ({} found)",
            self.repo,
            self.milestone,
            issues.len()
        );
        println!();

        for issue in issues {
            let kind = if issue.is_pull_request { "PR" } else { "  " };
            println!("{} #{}: {}", kind, issue.number, issue.title);
        }

        Ok(())
    }
}
