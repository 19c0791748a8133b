use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::{ApiError, RepositorySource};
use crate::models::{Commit, Repository};

const USER_AGENT: &str = "repo-browser";

pub struct GitHubSource {
    client: Client,
    base_url: String,
    token: String,
    commit_limit: usize,
}

#[derive(Debug, Deserialize)]
struct GitHubRepo {
    name: String,
    description: Option<String>,
    owner: GitHubOwner,
}

#[derive(Debug, Deserialize)]
struct GitHubOwner {
    login: String,
}

#[derive(Debug, Deserialize)]
struct GitHubCommit {
    sha: String,
    commit: GitHubCommitDetail,
}

#[derive(Debug, Deserialize)]
struct GitHubCommitDetail {
    message: String,
    author: Option<GitHubCommitAuthor>,
}

#[derive(Debug, Deserialize)]
struct GitHubCommitAuthor {
    name: String,
    date: String,
}

impl GitHubRepo {
    fn into_repository(self) -> Repository {
        Repository::new(self.name, self.owner.login, self.description)
    }
}

impl GitHubCommit {
    fn into_commit(self) -> Commit {
        let (author_name, author_date) = match self.commit.author {
            Some(author) => (author.name, author.date),
            None => (String::new(), String::new()),
        };
        Commit {
            sha: self.sha,
            message: self.commit.message,
            author_name,
            author_date,
        }
    }
}

impl GitHubSource {
    pub fn new(base_url: String, token: String, commit_limit: usize) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
            commit_limit,
        }
    }

    fn repos_url(&self) -> String {
        format!("{}/user/repos", self.base_url)
    }

    fn commits_url(&self, owner: &str, name: &str) -> String {
        format!(
            "{}/repos/{}/{}/commits?per_page={}",
            self.base_url,
            urlencoding::encode(owner),
            urlencoding::encode(name),
            self.commit_limit
        )
    }

    fn build_request(&self, url: &str) -> reqwest::RequestBuilder {
        self.client
            .get(url)
            .header("Authorization", format!("Bearer {}", self.token))
            .header("User-Agent", USER_AGENT)
            .header("Accept", "application/vnd.github+json")
    }

    async fn fetch<T: DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        tracing::debug!(url, "GET");
        let response = self.build_request(url).send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status { status, body });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

#[async_trait]
impl RepositorySource for GitHubSource {
    async fn list_repositories(&self) -> Result<Vec<Repository>, ApiError> {
        let repos: Vec<GitHubRepo> = self.fetch(&self.repos_url()).await?;
        Ok(repos.into_iter().map(GitHubRepo::into_repository).collect())
    }

    async fn list_commits(&self, owner: &str, name: &str) -> Result<Vec<Commit>, ApiError> {
        let commits: Vec<GitHubCommit> = self.fetch(&self.commits_url(owner, name)).await?;
        Ok(commits.into_iter().map(GitHubCommit::into_commit).collect())
    }

    fn name(&self) -> &'static str {
        "GitHub"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source() -> GitHubSource {
        GitHubSource::new("https://api.github.com/".to_string(), "t".to_string(), 10)
    }

    #[test]
    fn test_repos_url_trims_trailing_slash() {
        assert_eq!(source().repos_url(), "https://api.github.com/user/repos");
    }

    #[test]
    fn test_commits_url_sends_limit() {
        assert_eq!(
            source().commits_url("octocat", "hello-world"),
            "https://api.github.com/repos/octocat/hello-world/commits?per_page=10"
        );
    }

    #[test]
    fn test_commits_url_encodes_segments() {
        assert_eq!(
            source().commits_url("a b", "c/d"),
            "https://api.github.com/repos/a%20b/c%2Fd/commits?per_page=10"
        );
    }

    #[test]
    fn test_parse_repository_list() {
        let json = r#"[
            {"name": "A", "description": "alpha tool", "owner": {"login": "me"}, "private": false},
            {"name": "B", "description": null, "owner": {"login": "me"}}
        ]"#;
        let repos: Vec<GitHubRepo> = serde_json::from_str(json).unwrap();
        let repos: Vec<Repository> = repos.into_iter().map(GitHubRepo::into_repository).collect();

        assert_eq!(repos.len(), 2);
        assert_eq!(repos[0].name, "A");
        assert_eq!(repos[0].owner.login, "me");
        assert_eq!(repos[0].description.as_deref(), Some("alpha tool"));
        assert!(repos[1].description.is_none());
        assert!(repos[1].commits.is_empty());
    }

    #[test]
    fn test_parse_commit() {
        let json = r#"{
            "sha": "6dcb09b",
            "commit": {
                "message": "Fix all the bugs",
                "author": {"name": "Monalisa Octocat", "email": "m@github.com", "date": "2011-04-14T16:00:49Z"}
            }
        }"#;
        let commit: Commit = serde_json::from_str::<GitHubCommit>(json).unwrap().into_commit();

        assert_eq!(commit.sha, "6dcb09b");
        assert_eq!(commit.message, "Fix all the bugs");
        assert_eq!(commit.author_name, "Monalisa Octocat");
        assert_eq!(commit.author_date, "2011-04-14T16:00:49Z");
    }

    #[test]
    fn test_parse_commit_without_author() {
        let json = r#"{"sha": "abc", "commit": {"message": "m", "author": null}}"#;
        let commit: Commit = serde_json::from_str::<GitHubCommit>(json).unwrap().into_commit();

        assert_eq!(commit.author_name, "");
        assert_eq!(commit.author_date, "");
    }
}
