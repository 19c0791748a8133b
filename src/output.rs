use serde::Serialize;
use tabled::{settings::Style, Table};

use crate::browser::ViewState;
use crate::view::{self, DetailView, RepositoryCard};

#[derive(Debug, Serialize)]
pub struct BrowseResults {
    pub search: String,
    pub repositories: Vec<RepositoryCard>,
    pub total: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<DetailView>,
}

impl BrowseResults {
    pub fn from_state(state: &ViewState, commit_limit: usize) -> Self {
        let repositories = view::cards(state);
        let detail = match DetailView::from_state(state, commit_limit) {
            DetailView::Hidden => None,
            detail => Some(detail),
        };
        Self {
            search: state.search_term().to_string(),
            total: repositories.len(),
            repositories,
            detail,
        }
    }
}

pub fn print_results(results: &BrowseResults, as_json: bool) -> anyhow::Result<()> {
    if as_json {
        println!("{}", serde_json::to_string_pretty(results)?);
        return Ok(());
    }

    if results.repositories.is_empty() {
        println!("{}", view::NO_REPOSITORIES);
    } else {
        println!("Found {} repositories:\n", results.total);
        let table = Table::new(&results.repositories)
            .with(Style::rounded())
            .to_string();
        println!("{}", table);
    }

    if let Some(detail) = &results.detail {
        println!();
        println!("{}", detail.render());
    }

    Ok(())
}
