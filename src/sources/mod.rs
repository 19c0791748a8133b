pub mod github;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{Commit, Repository};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error ({status}): {body}")]
    Status { status: u16, body: String },

    #[error("failed to decode response: {0}")]
    Decode(String),
}

/// Where the browser gets its repositories and commits from.
#[async_trait]
pub trait RepositorySource: Send + Sync {
    /// Repositories of the authenticated account, in API order, without commits.
    async fn list_repositories(&self) -> Result<Vec<Repository>, ApiError>;

    async fn list_commits(&self, owner: &str, name: &str) -> Result<Vec<Commit>, ApiError>;

    fn name(&self) -> &'static str;
}

pub use github::GitHubSource;
