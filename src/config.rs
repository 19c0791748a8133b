use anyhow::Result;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::PathBuf;

pub const DEFAULT_GITHUB_URL: &str = "https://api.github.com";
pub const DEFAULT_COMMIT_LIMIT: usize = 10;
/// GitHub caps `per_page` at 100.
pub const MAX_COMMIT_LIMIT: usize = 100;
pub const DEFAULT_LOG_LEVEL: &str = "warn";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub github: GitHubConfig,

    #[serde(default)]
    pub defaults: DefaultsConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GitHubConfig {
    pub token: Option<String>,
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DefaultsConfig {
    /// Commits fetched and shown per repository
    pub commit_limit: Option<usize>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoggingConfig {
    /// tracing filter directive, e.g. "info" or "repo_browser=debug"
    pub level: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from_file()?;
        config.apply_env_overrides();
        Ok(config)
    }

    fn load_from_file() -> Result<Self> {
        let config_path = Self::config_path()?;
        if !config_path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(&config_path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        Ok(config_dir.join("repo_browser").join("config.toml"))
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(token) = env::var("GITHUB_TOKEN") {
            self.github.token = Some(token);
        }
        if let Ok(url) = env::var("GITHUB_URL") {
            self.github.url = Some(url);
        }
        if let Ok(level) = env::var("REPO_BROWSER_LOG") {
            self.logging.level = Some(level);
        }
    }

    /// The configured token, ignoring blank values
    pub fn token(&self) -> Option<&str> {
        self.github.token.as_deref().and_then(non_blank)
    }

    /// A non-blank CLI token wins over the configured one.
    pub fn resolve_token<'a>(&'a self, cli_token: Option<&'a str>) -> Option<&'a str> {
        cli_token.and_then(non_blank).or_else(|| self.token())
    }

    /// A CLI limit wins over the configured one; either must be in 1..=100.
    pub fn resolve_commit_limit(&self, cli_limit: Option<u16>) -> Result<usize> {
        let limit = cli_limit
            .map(usize::from)
            .unwrap_or_else(|| self.commit_limit());
        check_commit_limit(limit)
    }

    pub fn github_url(&self) -> &str {
        self.github.url.as_deref().unwrap_or(DEFAULT_GITHUB_URL)
    }

    pub fn commit_limit(&self) -> usize {
        self.defaults.commit_limit.unwrap_or(DEFAULT_COMMIT_LIMIT)
    }

    pub fn log_level(&self) -> &str {
        self.logging.level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL)
    }

    /// Parse config from a TOML string (for testing)
    #[cfg(test)]
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }
}

pub fn check_commit_limit(limit: usize) -> Result<usize> {
    if (1..=MAX_COMMIT_LIMIT).contains(&limit) {
        Ok(limit)
    } else {
        anyhow::bail!(
            "commit limit must be between 1 and {}, got {}",
            MAX_COMMIT_LIMIT,
            limit
        )
    }
}

fn non_blank(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}
