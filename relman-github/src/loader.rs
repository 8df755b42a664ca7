//! One full aggregation pass over the organization

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, info};

use crate::api::{GitHubApi, StateFilter};
use crate::store::{MetadataStore, RepoMetadata};
use crate::{paginate, Error, Result};

/// Builds a [`MetadataStore`] from the remote service
///
/// Either every step succeeds and a complete store is returned, or the first
/// error is returned and nothing fetched so far is exposed.
#[derive(Debug)]
pub struct Loader<C: ?Sized> {
    client: Arc<C>,
    concurrency: usize,
}

impl<C: ?Sized> Clone for Loader<C> {
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
            concurrency: self.concurrency,
        }
    }
}

impl<C> Loader<C>
where
    C: GitHubApi + ?Sized + 'static,
{
    /// Create a loader that fetches repositories one at a time
    pub fn new(client: Arc<C>) -> Self {
        Self {
            client,
            concurrency: 1,
        }
    }

    /// Fetch up to `concurrency` repositories at once
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Maximum number of repositories fetched at the same time
    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Load projects, per-repository milestones and labels, then releases
    pub async fn load(
        &self,
        org: &str,
        repos: &[String],
        release_repo: &str,
    ) -> Result<MetadataStore> {
        info!(org, repos = repos.len(), release_repo, "Loading organization metadata");

        let projects = self.client.list_organization_projects(org).await?;
        info!(count = projects.len(), "Fetched projects");

        let repos = unique_repos(repos);
        let repo_map = if self.concurrency > 1 && repos.len() > 1 {
            self.load_repos_concurrently(org, &repos).await?
        } else {
            self.load_repos_sequentially(org, &repos).await?
        };

        let releases = self.client.list_releases(org, release_repo).await?;
        info!(count = releases.len(), repo = release_repo, "Fetched releases");

        Ok(MetadataStore::new(projects, repo_map, releases))
    }

    async fn load_repos_sequentially(
        &self,
        org: &str,
        repos: &[&str],
    ) -> Result<HashMap<String, RepoMetadata>> {
        let mut map = HashMap::with_capacity(repos.len());
        for repo in repos {
            let metadata = load_repo(self.client.as_ref(), org, repo).await?;
            map.insert(repo.to_string(), metadata);
        }
        Ok(map)
    }

    async fn load_repos_concurrently(
        &self,
        org: &str,
        repos: &[&str],
    ) -> Result<HashMap<String, RepoMetadata>> {
        debug!(concurrency = self.concurrency, "Loading repositories concurrently");

        let semaphore = Arc::new(Semaphore::new(self.concurrency));
        let mut set = JoinSet::new();

        for repo in repos {
            let client = Arc::clone(&self.client);
            let semaphore = Arc::clone(&semaphore);
            let org = org.to_string();
            let repo = repo.to_string();

            set.spawn(async move {
                let _permit = semaphore.acquire_owned().await.map_err(Error::transport)?;
                let metadata = load_repo(client.as_ref(), &org, &repo).await?;
                Ok::<_, Error>((repo, metadata))
            });
        }

        let mut map = HashMap::with_capacity(repos.len());
        while let Some(joined) = set.join_next().await {
            match joined {
                Ok(Ok((repo, metadata))) => {
                    map.insert(repo, metadata);
                }
                Ok(Err(e)) => {
                    set.abort_all();
                    return Err(e);
                }
                Err(e) if e.is_panic() => std::panic::resume_unwind(e.into_panic()),
                Err(e) => {
                    set.abort_all();
                    return Err(Error::transport(e));
                }
            }
        }

        Ok(map)
    }
}

/// Fetch all milestones and all labels of one repository
pub async fn load_repo<C>(client: &C, org: &str, repo: &str) -> Result<RepoMetadata>
where
    C: GitHubApi + ?Sized,
{
    let milestones = client.list_milestones(org, repo, StateFilter::All).await?;
    let labels = paginate::drain(|page| client.list_labels(org, repo, page)).await?;

    info!(
        repo,
        milestones = milestones.len(),
        labels = labels.len(),
        "Fetched repository metadata"
    );

    Ok(RepoMetadata { milestones, labels })
}

/// Configured repositories with duplicates dropped, first occurrence kept
fn unique_repos(repos: &[String]) -> Vec<&str> {
    let mut seen = HashSet::new();
    repos
        .iter()
        .map(String::as_str)
        .filter(|repo| seen.insert(*repo))
        .collect()
}
