//! Relman Core - configuration and secrets for relman
//!
//! This crate loads the tracked organization, the repositories to aggregate,
//! default project columns and the GitHub credentials used by `relman-github`.

pub mod config;
pub mod error;
pub mod secrets;

pub use config::{Config, GitHubConfig, ProjectConfig};
pub use error::{Error, Result};
pub use secrets::{GitHubSecrets, Secrets};
