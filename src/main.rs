mod browser;
mod cli;
mod config;
mod logging;
mod models;
mod output;
mod sources;
mod view;

use std::sync::Arc;

use anyhow::Result;
use browser::Browser;
use config::Config;
use output::BrowseResults;
use sources::GitHubSource;

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::parse();
    let config = Config::load()?;
    logging::init(config.log_level());

    // Resolve settings: CLI > env > config > default
    let commit_limit = match config.resolve_commit_limit(args.commits) {
        Ok(limit) => limit,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    let url = args
        .url
        .clone()
        .unwrap_or_else(|| config.github_url().to_string());
    let token = config
        .resolve_token(args.token.as_deref())
        .map(str::to_string);

    if args.show_config {
        println!("Config file: {}", Config::config_path()?.display());
        println!("GitHub URL: {}", url);
        println!("Commit limit: {}", commit_limit);
        println!(
            "Token: {}",
            if token.is_some() { "configured" } else { "missing" }
        );
        return Ok(());
    }

    let token = match token {
        Some(t) => t,
        None => {
            eprintln!("Error: No GitHub token configured");
            eprintln!("Set GITHUB_TOKEN, pass --token, or add [github] token to the config file");
            std::process::exit(1);
        }
    };

    let source = GitHubSource::new(url, token, commit_limit);
    let mut browser = Browser::new(Arc::new(source), commit_limit);
    browser.subscribe(|state| {
        tracing::debug!(
            loading = state.is_loading(),
            repositories = state.repositories().len(),
            filtered = state.filtered().len(),
            detail = state.is_detail_visible(),
            "View state updated"
        );
    });

    browser.load().await;

    if let Some(search) = &args.search {
        browser.filter(search);
    }
    if let Some(repo) = &args.select {
        browser.select_repository(&repo.owner, &repo.name);
    }

    let results = BrowseResults::from_state(browser.state(), browser.commit_limit());
    output::print_results(&results, args.json)?;

    Ok(())
}
