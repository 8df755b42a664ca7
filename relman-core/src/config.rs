//! Configuration management for relman
//!
//! Configuration is loaded with the following priority (highest to lowest):
//! 1. CLI flags
//! 2. Environment variables (RELMAN_*)
//! 3. Config file (~/.config/relman/config.toml)
//! 4. Default values

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// GitHub connection settings
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct GitHubConfig {
    /// Organization that owns the tracked repositories and projects
    pub org: String,

    /// API base URL, for GitHub Enterprise installations
    pub api_url: Option<String>,
}

/// Defaults applied when creating organization projects
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ProjectConfig {
    /// Column names, created in this order
    pub columns: Vec<String>,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            columns: vec![
                "To Do".to_string(),
                "In Progress".to_string(),
                "Done".to_string(),
            ],
        }
    }
}

/// Root configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// GitHub configuration
    pub github: GitHubConfig,

    /// Repositories to aggregate milestones and labels for
    pub repos: Vec<String>,

    /// Repository whose releases are loaded (defaults to the first repo)
    pub release_repo: Option<String>,

    /// Project defaults
    pub project: ProjectConfig,

    /// Number of repositories fetched at once during a load
    pub concurrency: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            github: GitHubConfig::default(),
            repos: Vec::new(),
            release_repo: None,
            project: ProjectConfig::default(),
            concurrency: 1,
        }
    }
}

impl Config {
    /// Load configuration from the default config file location
    ///
    /// Returns default config if file doesn't exist
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();

        if let Some(path) = config_path {
            if path.exists() {
                return Self::load_from_file(&path);
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(Error::Io)?;
        toml::from_str(&contents)
            .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))
    }

    /// Get the default config file path
    ///
    /// Returns `~/.config/relman/config.toml` on Unix
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("relman").join("config.toml"))
    }

    /// Repository whose release history is aggregated
    pub fn release_repo(&self) -> Option<&str> {
        self.release_repo
            .as_deref()
            .or_else(|| self.repos.first().map(String::as_str))
    }

    /// Apply environment variable overrides
    ///
    /// Supported variables:
    /// - RELMAN_ORG: Organization name
    /// - RELMAN_RELEASE_REPO: Release history repository
    /// - RELMAN_API_URL: GitHub API base URL
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(org) = std::env::var("RELMAN_ORG") {
            self.github.org = org;
        }

        if let Ok(repo) = std::env::var("RELMAN_RELEASE_REPO") {
            self.release_repo = Some(repo);
        }

        if let Ok(url) = std::env::var("RELMAN_API_URL") {
            self.github.api_url = Some(url);
        }

        self
    }

    /// Apply CLI flag overrides
    pub fn with_cli_overrides(mut self, org: Option<String>, repos: Vec<String>) -> Self {
        if let Some(org) = org {
            self.github.org = org;
        }

        if !repos.is_empty() {
            self.repos = repos;
        }

        self
    }

    /// Load configuration with all overrides applied
    ///
    /// Priority: CLI > env > config file > defaults
    pub fn load_with_overrides(
        path: Option<&Path>,
        org: Option<String>,
        repos: Vec<String>,
    ) -> Result<Self> {
        let base = match path {
            Some(path) => Self::load_from_file(path)?,
            None => Self::load()?,
        };

        Ok(base.with_env_overrides().with_cli_overrides(org, repos))
    }

    /// Check that the configuration can drive a load
    pub fn validate(&self) -> Result<()> {
        self.validate_connection()?;

        if self.repos.is_empty() {
            return Err(Error::Config("No repositories configured".to_string()));
        }

        if self.concurrency == 0 {
            return Err(Error::Config("concurrency must be at least 1".to_string()));
        }

        Ok(())
    }

    /// Check only what is needed to reach the organization: org and api_url
    pub fn validate_connection(&self) -> Result<()> {
        if self.github.org.trim().is_empty() {
            return Err(Error::Config(
                "No organization configured. Set github.org or RELMAN_ORG".to_string(),
            ));
        }

        if let Some(ref api_url) = self.github.api_url {
            url::Url::parse(api_url)
                .map_err(|e| Error::Config(format!("Invalid api_url '{}': {}", api_url, e)))?;
        }

        Ok(())
    }
}
