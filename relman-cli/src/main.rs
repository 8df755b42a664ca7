//! Relman CLI - release and milestone management for a GitHub organization

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use relman_core::{Config, Secrets};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::{CreateArgs, IssuesArgs, SyncArgs};

/// relman: projects, milestones and labels across an organization's repositories
#[derive(Parser, Debug)]
#[command(name = "relman")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (defaults to ~/.config/relman/config.toml)
    #[arg(long, global = true, env = "RELMAN_CONFIG")]
    config: Option<PathBuf>,

    /// Organization (overrides config and env)
    #[arg(long, global = true)]
    org: Option<String>,

    /// Repository to track (repeatable, overrides config)
    #[arg(long = "repo", global = true)]
    repos: Vec<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show version information
    Version,

    /// Show current configuration
    Config,

    /// Create a secrets file template
    Init,

    /// Check the GitHub token against the organization
    Check,

    /// Load organization metadata and summarize it
    #[command(visible_alias = "s")]
    Sync(SyncArgs),

    /// List closed issues of a milestone
    Issues(IssuesArgs),

    /// Create a project, milestone or label
    #[command(visible_alias = "c")]
    Create(CreateArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let config = Config::load_with_overrides(cli.config.as_deref(), cli.org.clone(), cli.repos.clone())?;

    if cli.verbose {
        tracing::info!(
            org = %config.github.org,
            repos = ?config.repos,
            release_repo = ?config.release_repo(),
            "Configuration loaded"
        );
    }

    match cli.command {
        Some(Commands::Version) => {
            println!("relman {}", env!("CARGO_PKG_VERSION"));
        }
        Some(Commands::Config) => print_config(&config, cli.config.as_deref()),
        Some(Commands::Init) => {
            let path = Secrets::create_template()?;
            println!("Created {}", path.display());
            println!("Add your GitHub token to it, or set GITHUB_TOKEN");
        }
        Some(Commands::Check) => {
            config.validate_connection()?;
            let client = relman_github::GitHubClient::with_api_url(config.github.api_url.as_deref())?;
            client.test_connection(&config.github.org).await?;
            println!("GitHub connection to {} OK", config.github.org);
        }
        Some(Commands::Sync(args)) => {
            args.execute(cli.verbose, &config).await?;
        }
        Some(Commands::Issues(args)) => {
            args.execute(cli.verbose, &config).await?;
        }
        Some(Commands::Create(args)) => {
            args.execute(cli.verbose, &config).await?;
        }
        None => {
            println!("relman - release and milestone management for GitHub organizations");
            println!();
            println!("Use --help for usage information");
        }
    }

    Ok(())
}

fn print_config(config: &Config, path: Option<&std::path::Path>) {
    println!("relman Configuration");
    println!("====================");
    println!();
    println!("  org: {}", display_or(&config.github.org, "(not set)"));
    println!("  api_url: {}", config.github.api_url.as_deref().unwrap_or("(default)"));
    println!("  repos: {}", display_or(&config.repos.join(", "), "(none)"));
    println!("  release_repo: {}", config.release_repo().unwrap_or("(none)"));
    println!("  project columns: {}", config.project.columns.join(", "));
    println!("  concurrency: {}", config.concurrency);
    println!();

    let path = path.map(PathBuf::from).or_else(Config::default_config_path);
    if let Some(path) = path {
        println!("Config file: {}", path.display());
        if path.exists() {
            println!("  (exists)");
        } else {
            println!("  (not found - using defaults)");
        }
    }
}

fn display_or<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.is_empty() {
        fallback
    } else {
        value
    }
}
