use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Owner {
    pub login: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Commit {
    pub sha: String,
    pub message: String,
    pub author_name: String,
    pub author_date: String,
}

/// A repository as held by the browser, with its commits attached once fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Repository {
    pub name: String,
    pub owner: Owner,
    pub description: Option<String>,
    pub commits: Vec<Commit>,
}

impl Repository {
    pub fn new(
        name: impl Into<String>,
        owner: impl Into<String>,
        description: Option<String>,
    ) -> Self {
        Self {
            name: name.into(),
            owner: Owner {
                login: owner.into(),
            },
            description,
            commits: Vec::new(),
        }
    }

    pub fn is(&self, owner: &str, name: &str) -> bool {
        self.owner.login == owner && self.name == name
    }

    /// Case-insensitive substring match on name or description.
    /// `needle` must already be lowercase.
    pub fn matches(&self, needle: &str) -> bool {
        if self.name.to_lowercase().contains(needle) {
            return true;
        }
        self.description
            .as_deref()
            .map(|d| d.to_lowercase().contains(needle))
            .unwrap_or(false)
    }
}
