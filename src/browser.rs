//! Repository browser core.
//!
//! [`ViewState`] holds everything a view needs to draw the repository list and
//! the detail panel. Every operation on it is a pure transition that returns a
//! new state; [`Browser`] owns the current state together with the
//! [`RepositorySource`] and notifies subscribers after each transition.

use std::sync::Arc;

use tokio::task::JoinSet;

use crate::models::{Commit, Repository};
use crate::sources::{ApiError, RepositorySource};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    repositories: Vec<Repository>,
    /// Indices into `repositories`, in full-set order.
    filtered: Vec<usize>,
    /// Index into `repositories`.
    selected: Option<usize>,
    detail_visible: bool,
    search_term: String,
    loading: bool,
}

impl ViewState {
    /// The full set.
    pub fn repositories(&self) -> &[Repository] {
        &self.repositories
    }

    /// The filtered set, in full-set order.
    pub fn filtered(&self) -> Vec<&Repository> {
        self.filtered.iter().map(|&i| &self.repositories[i]).collect()
    }

    pub fn selected_repository(&self) -> Option<&Repository> {
        self.selected.map(|i| &self.repositories[i])
    }

    pub fn is_detail_visible(&self) -> bool {
        self.detail_visible
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn with_loading(&self, loading: bool) -> Self {
        Self {
            loading,
            ..self.clone()
        }
    }

    /// Replaces the full set and resets the filtered set to match it.
    ///
    /// A previous selection carries over only if the same owner/name is
    /// present in the new set.
    pub fn loaded(&self, repositories: Vec<Repository>) -> Self {
        let selected = self
            .selected_repository()
            .and_then(|prev| {
                repositories
                    .iter()
                    .position(|r| r.is(&prev.owner.login, &prev.name))
            });

        Self {
            filtered: (0..repositories.len()).collect(),
            repositories,
            selected,
            detail_visible: self.detail_visible,
            search_term: String::new(),
            loading: false,
        }
    }

    /// Recomputes the filtered set. An empty term selects everything.
    pub fn filtered_by(&self, term: &str) -> Self {
        let needle = term.to_lowercase();
        let filtered = self
            .repositories
            .iter()
            .enumerate()
            .filter(|(_, repo)| needle.is_empty() || repo.matches(&needle))
            .map(|(i, _)| i)
            .collect();

        Self {
            filtered,
            search_term: term.to_string(),
            ..self.clone()
        }
    }

    /// Selects by owner and name within the full set and opens the detail.
    /// The detail opens even when nothing matches.
    pub fn with_selection(&self, owner: &str, name: &str) -> Self {
        let selected = self.repositories.iter().position(|r| r.is(owner, name));
        if selected.is_none() {
            tracing::error!(owner, name, "Repository not found");
        }

        Self {
            selected,
            detail_visible: true,
            ..self.clone()
        }
    }

    /// Hides the detail; the selection is kept.
    pub fn with_detail_closed(&self) -> Self {
        Self {
            detail_visible: false,
            ..self.clone()
        }
    }
}

type Subscriber = Box<dyn Fn(&ViewState) + Send + Sync>;

pub struct Browser {
    source: Arc<dyn RepositorySource>,
    commit_limit: usize,
    state: ViewState,
    subscribers: Vec<Subscriber>,
}

impl Browser {
    pub fn new(source: Arc<dyn RepositorySource>, commit_limit: usize) -> Self {
        Self {
            source,
            commit_limit,
            state: ViewState::default(),
            subscribers: Vec::new(),
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn commit_limit(&self) -> usize {
        self.commit_limit
    }

    /// Registers a callback invoked with the new state after every transition.
    pub fn subscribe<F>(&mut self, subscriber: F)
    where
        F: Fn(&ViewState) + Send + Sync + 'static,
    {
        self.subscribers.push(Box::new(subscriber));
    }

    /// Fetches repositories and their commits. On failure the previous
    /// repositories are kept and the error is logged.
    pub async fn load(&mut self) {
        self.set_state(self.state.with_loading(true));

        let fetched =
            fetch_repositories_with_commits(Arc::clone(&self.source), self.commit_limit).await;
        let next = match fetched {
            Ok(repositories) => {
                tracing::info!(
                    source = self.source.name(),
                    count = repositories.len(),
                    "Loaded repositories"
                );
                self.state.loaded(repositories)
            }
            Err(e) => {
                tracing::error!(source = self.source.name(), "Error fetching data: {}", e);
                self.state.with_loading(false)
            }
        };
        self.set_state(next);
    }

    pub fn filter(&mut self, term: &str) {
        self.set_state(self.state.filtered_by(term));
    }

    pub fn select_repository(&mut self, owner: &str, name: &str) {
        self.set_state(self.state.with_selection(owner, name));
    }

    /// For interactive front ends; the one-shot CLI never closes the detail.
    #[allow(dead_code)]
    pub fn close_detail(&mut self) {
        self.set_state(self.state.with_detail_closed());
    }

    fn set_state(&mut self, state: ViewState) {
        self.state = state;
        for subscriber in &self.subscribers {
            subscriber(&self.state);
        }
    }
}

/// Lists repositories, then fetches each repository's commits concurrently.
///
/// A failed commit fetch leaves that repository with no commits. Results are
/// placed back by position, so the output order is the listing order. Each
/// commit list is cut to `commit_limit`.
pub async fn fetch_repositories_with_commits(
    source: Arc<dyn RepositorySource>,
    commit_limit: usize,
) -> Result<Vec<Repository>, ApiError> {
    let repositories = source.list_repositories().await?;
    tracing::debug!(count = repositories.len(), "Fetching commits");

    let mut join_set = JoinSet::new();
    for (index, repo) in repositories.iter().enumerate() {
        let source = Arc::clone(&source);
        let owner = repo.owner.login.clone();
        let name = repo.name.clone();

        join_set.spawn(async move {
            let result = source.list_commits(&owner, &name).await;
            (index, result)
        });
    }

    let mut slots: Vec<Option<Vec<Commit>>> = vec![None; repositories.len()];
    while let Some(joined) = join_set.join_next().await {
        match joined {
            Ok((index, Ok(commits))) => {
                slots[index] = Some(commits);
            }
            Ok((index, Err(e))) => {
                tracing::error!(
                    repository = %repositories[index].name,
                    "Error fetching commits for repository: {}",
                    e
                );
            }
            Err(e) => {
                tracing::error!("Commit fetch task failed: {}", e);
            }
        }
    }

    let merged = repositories
        .into_iter()
        .zip(slots)
        .map(|(mut repo, commits)| {
            let mut commits = commits.unwrap_or_default();
            commits.truncate(commit_limit);
            repo.commits = commits;
            repo
        })
        .collect();

    Ok(merged)
}
