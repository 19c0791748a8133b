use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "repo_browser")]
#[command(
    version,
    about = "Browse your GitHub repositories and their recent commits"
)]
pub struct Args {
    /// Only list repositories whose name or description contains this text
    pub search: Option<String>,

    /// Show details and recent commits for OWNER/NAME
    #[arg(short, long, value_name = "OWNER/NAME", value_parser = parse_repo_ref)]
    pub select: Option<RepoRef>,

    /// Commits to fetch per repository, 1-100 (default: 10, or from config)
    #[arg(short, long, value_parser = clap::value_parser!(u16).range(1..=100))]
    pub commits: Option<u16>,

    /// GitHub API base URL
    #[arg(short = 'u', long)]
    pub url: Option<String>,

    /// Personal access token (overrides GITHUB_TOKEN and config)
    #[arg(long)]
    pub token: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Print the resolved configuration and exit
    #[arg(long)]
    pub show_config: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRef {
    pub owner: String,
    pub name: String,
}

fn parse_repo_ref(value: &str) -> Result<RepoRef, String> {
    match value.split_once('/') {
        Some((owner, name)) if !owner.is_empty() && !name.is_empty() && !name.contains('/') => {
            Ok(RepoRef {
                owner: owner.to_string(),
                name: name.to_string(),
            })
        }
        _ => Err(format!("expected OWNER/NAME, got '{}'", value)),
    }
}

pub fn parse() -> Args {
    Args::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_repo_ref() {
        assert_eq!(
            parse_repo_ref("octocat/hello-world"),
            Ok(RepoRef {
                owner: "octocat".to_string(),
                name: "hello-world".to_string(),
            })
        );
    }

    #[test]
    fn test_parse_repo_ref_rejects_malformed() {
        assert!(parse_repo_ref("octocat").is_err());
        assert!(parse_repo_ref("/name").is_err());
        assert!(parse_repo_ref("owner/").is_err());
        assert!(parse_repo_ref("a/b/c").is_err());
    }

    #[test]
    fn test_args_parse() {
        let args = Args::try_parse_from([
            "repo_browser",
            "alpha",
            "--select",
            "me/B",
            "--commits",
            "5",
            "--json",
        ])
        .unwrap();

        assert_eq!(args.search.as_deref(), Some("alpha"));
        assert_eq!(args.select.unwrap().name, "B");
        assert_eq!(args.commits, Some(5));
        assert!(args.json);
        assert!(!args.show_config);
    }

    #[test]
    fn test_commits_out_of_range_rejected() {
        assert!(Args::try_parse_from(["repo_browser", "--commits", "0"]).is_err());
        assert!(Args::try_parse_from(["repo_browser", "--commits", "101"]).is_err());

        let args = Args::try_parse_from(["repo_browser", "--commits", "100"]).unwrap();
        assert_eq!(args.commits, Some(100));
    }
}
