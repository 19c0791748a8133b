//! Presentation models derived from [`ViewState`]. Nothing here touches the
//! terminal; `output` decides how these are printed.

use serde::Serialize;
use tabled::Tabled;

use crate::browser::ViewState;
use crate::models::{Commit, Repository};

pub const NO_DESCRIPTION: &str = "No description provided.";
pub const NO_REPOSITORIES: &str = "No repositories found.";
pub const NO_COMMITS: &str = "No commits found.";
pub const NOT_FOUND: &str = "Repository not found.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Tabled)]
pub struct RepositoryCard {
    #[tabled(rename = "Name")]
    pub name: String,
    #[tabled(rename = "Owner")]
    pub owner: String,
    #[tabled(rename = "Description")]
    pub description: String,
    #[tabled(rename = "Commits")]
    pub commits: usize,
}

impl From<&Repository> for RepositoryCard {
    fn from(repo: &Repository) -> Self {
        Self {
            name: repo.name.clone(),
            owner: repo.owner.login.clone(),
            description: description_or_placeholder(repo),
            commits: repo.commits.len(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepositoryDetail {
    pub name: String,
    pub owner: String,
    pub description: String,
    pub commit_heading: String,
    pub commits: Vec<Commit>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DetailView {
    Hidden,
    NotFound,
    Repository(RepositoryDetail),
}

impl DetailView {
    pub fn from_state(state: &ViewState, commit_limit: usize) -> Self {
        if !state.is_detail_visible() {
            return DetailView::Hidden;
        }
        match state.selected_repository() {
            Some(repo) => DetailView::Repository(RepositoryDetail {
                name: repo.name.clone(),
                owner: repo.owner.login.clone(),
                description: description_or_placeholder(repo),
                commit_heading: format!("Last {} Commits:", commit_limit),
                commits: repo.commits.clone(),
            }),
            None => DetailView::NotFound,
        }
    }

    /// Plain-text rendering; empty when hidden.
    pub fn render(&self) -> String {
        match self {
            DetailView::Hidden => String::new(),
            DetailView::NotFound => NOT_FOUND.to_string(),
            DetailView::Repository(detail) => {
                let mut lines = vec![
                    detail.name.clone(),
                    format!("Owner: {}", detail.owner),
                    format!("Description: {}", detail.description),
                    String::new(),
                    detail.commit_heading.clone(),
                ];
                if detail.commits.is_empty() {
                    lines.push(NO_COMMITS.to_string());
                } else {
                    lines.extend(detail.commits.iter().map(commit_line));
                }
                lines.join("\n")
            }
        }
    }
}

pub fn cards(state: &ViewState) -> Vec<RepositoryCard> {
    state.filtered().into_iter().map(RepositoryCard::from).collect()
}

pub fn commit_line(commit: &Commit) -> String {
    format!(
        "Hash: {}, Message: {}, Date: {}, Author: {}",
        commit.sha,
        commit.message.lines().next().unwrap_or_default(),
        commit.author_date,
        commit.author_name
    )
}

fn description_or_placeholder(repo: &Repository) -> String {
    match repo.description.as_deref() {
        Some(d) if !d.is_empty() => d.to_string(),
        _ => NO_DESCRIPTION.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_with(repos: Vec<Repository>) -> ViewState {
        ViewState::default().loaded(repos)
    }

    fn sample_commit() -> Commit {
        Commit {
            sha: "abc123".to_string(),
            message: "Add parser\n\nLonger body".to_string(),
            author_name: "Ada".to_string(),
            author_date: "2024-05-01T10:00:00Z".to_string(),
        }
    }

    #[test]
    fn test_card_uses_placeholder_for_missing_description() {
        let card = RepositoryCard::from(&Repository::new("b", "me", None));
        assert_eq!(card.description, NO_DESCRIPTION);
        assert_eq!(card.owner, "me");
    }

    #[test]
    fn test_card_uses_placeholder_for_empty_description() {
        let card = RepositoryCard::from(&Repository::new("b", "me", Some(String::new())));
        assert_eq!(card.description, NO_DESCRIPTION);
    }

    #[test]
    fn test_cards_follow_filtered_set() {
        let state = state_with(vec![
            Repository::new("alpha", "me", None),
            Repository::new("beta", "me", None),
        ])
        .filtered_by("bet");

        let cards = cards(&state);
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].name, "beta");
    }

    #[test]
    fn test_detail_hidden_by_default() {
        let state = state_with(vec![Repository::new("a", "me", None)]);
        assert_eq!(DetailView::from_state(&state, 10), DetailView::Hidden);
        assert_eq!(DetailView::Hidden.render(), "");
    }

    #[test]
    fn test_detail_not_found() {
        let state = state_with(vec![]).with_selection("me", "ghost");
        let detail = DetailView::from_state(&state, 10);

        assert_eq!(detail, DetailView::NotFound);
        assert_eq!(detail.render(), NOT_FOUND);
    }

    #[test]
    fn test_detail_renders_commits() {
        let mut repo = Repository::new("a", "me", Some("alpha tool".to_string()));
        repo.commits.push(sample_commit());
        let state = state_with(vec![repo]).with_selection("me", "a");

        let rendered = DetailView::from_state(&state, 10).render();
        assert!(rendered.starts_with("a\nOwner: me\nDescription: alpha tool"));
        assert!(rendered.contains("Last 10 Commits:"));
        assert!(rendered.contains(
            "Hash: abc123, Message: Add parser, Date: 2024-05-01T10:00:00Z, Author: Ada"
        ));
    }

    #[test]
    fn test_detail_without_commits() {
        let state = state_with(vec![Repository::new("a", "me", None)]).with_selection("me", "a");
        let rendered = DetailView::from_state(&state, 5).render();

        assert!(rendered.contains("Description: No description provided."));
        assert!(rendered.contains("Last 5 Commits:"));
        assert!(rendered.ends_with(NO_COMMITS));
    }

    #[test]
    fn test_detail_serializes_with_status_tag() {
        let json = serde_json::to_value(DetailView::NotFound).unwrap();
        assert_eq!(json["status"], "not_found");
    }
}
