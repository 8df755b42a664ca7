//! CLI command implementations

pub mod create;
pub mod issues;
pub mod sync;

pub use create::CreateArgs;
pub use issues::IssuesArgs;
pub use sync::SyncArgs;

use std::sync::Arc;

use relman_core::Config;
use relman_github::{GitHubClient, Loader, MetadataStore};

/// Build an authenticated client for the configured API
pub(crate) fn connect(config: &Config) -> anyhow::Result<Arc<GitHubClient>> {
    let client = GitHubClient::with_api_url(config.github.api_url.as_deref())?;
    Ok(Arc::new(client))
}

/// Run one full load for the configured organization
pub(crate) async fn load_store(
    config: &Config,
    client: Arc<GitHubClient>,
) -> anyhow::Result<MetadataStore> {
    config.validate()?;

    let release_repo = config
        .release_repo()
        .ok_or_else(|| anyhow::anyhow!("No release repository configured"))?;

    let store = Loader::new(client)
        .with_concurrency(config.concurrency)
        .load(&config.github.org, &config.repos, release_repo)
        .await?;

    Ok(store)
}
