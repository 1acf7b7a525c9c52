//! Repository reference parsing and normalization

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::RepogramError;

/// Normalized `owner/name` repository reference.
///
/// Owner and name are lowercased at construction; the canonical form is
/// the first component of the cache key. The repair engine never sees
/// this type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RepoRef {
    owner: String,
    name: String,
}

impl RepoRef {
    /// Parse a repository reference from user input.
    ///
    /// Accepts `owner/name` or a full GitHub URL (with or without a
    /// `.git` suffix or trailing path segments).
    pub fn parse(input: &str) -> Result<Self, RepogramError> {
        let trimmed = input.trim().trim_end_matches('/');
        let rest = match trimmed.find("github.com/") {
            Some(i) => &trimmed[i + "github.com/".len()..],
            None => trimmed,
        };

        let mut parts = rest.split('/');
        let owner = parts.next().unwrap_or("").trim();
        let name = parts
            .next()
            .unwrap_or("")
            .trim()
            .trim_end_matches(".git");

        if owner.is_empty() || name.is_empty() {
            return Err(RepogramError::InvalidInput(format!(
                "expected 'owner/name' or a GitHub URL, got '{input}'"
            )));
        }

        Ok(RepoRef {
            owner: owner.to_lowercase(),
            name: name.to_lowercase(),
        })
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Canonical lowercase `owner/name` cache-key component.
    pub fn canonical(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }

    /// Base URL for source links in click directives.
    pub fn blob_base_url(&self, branch: &str) -> String {
        format!(
            "https://github.com/{}/{}/blob/{}/",
            self.owner, self.name, branch
        )
    }
}

impl fmt::Display for RepoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_owner_name() {
        let repo = RepoRef::parse("octocat/Hello-World").unwrap();
        assert_eq!(repo.owner(), "octocat");
        assert_eq!(repo.name(), "hello-world");
        assert_eq!(repo.canonical(), "octocat/hello-world");
    }

    #[test]
    fn parses_full_url() {
        let repo = RepoRef::parse("https://github.com/Octocat/Hello-World").unwrap();
        assert_eq!(repo.canonical(), "octocat/hello-world");
    }

    #[test]
    fn parses_url_with_git_suffix_and_trailing_segments() {
        let repo = RepoRef::parse("https://github.com/octocat/hello-world.git").unwrap();
        assert_eq!(repo.name(), "hello-world");

        let repo = RepoRef::parse("https://github.com/octocat/hello-world/tree/main/src").unwrap();
        assert_eq!(repo.canonical(), "octocat/hello-world");
    }

    #[test]
    fn rejects_garbage() {
        assert!(RepoRef::parse("").is_err());
        assert!(RepoRef::parse("just-a-name").is_err());
        assert!(RepoRef::parse("https://github.com/onlyowner").is_err());
        assert!(RepoRef::parse("/leading").is_err());
    }

    #[test]
    fn blob_base_url_includes_branch() {
        let repo = RepoRef::parse("octocat/hello-world").unwrap();
        assert_eq!(
            repo.blob_base_url("main"),
            "https://github.com/octocat/hello-world/blob/main/"
        );
    }
}
