//! GitHub API client
//!
//! Three calls per fetch: repository metadata (default branch), the
//! recursive git tree (file listing), and the README. The file listing is
//! filtered and capped before it reaches the prompt.

use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::error::FetchError;
use crate::source::{ContextSource, RepoContext};
use crate::Result;
use async_trait::async_trait;

/// Path fragments excluded from the file listing: dependency and VCS
/// directories, binary/image extensions, lockfiles, minified assets,
/// style/config extensions, and non-essential folders.
const EXCLUDED_FRAGMENTS: &[&str] = &[
    "node_modules/",
    "vendor/",
    "venv/",
    "__pycache__/",
    ".git/",
    ".jpg",
    ".png",
    ".gif",
    ".ico",
    ".svg",
    ".lock",
    ".min.js",
    ".map",
    ".css",
    ".scss",
    ".less",
    ".json",
    ".xml",
    ".yaml",
    ".yml",
    "test/",
    "tests/",
    "spec/",
    "docs/",
    "examples/",
];

/// Cap on file-listing entries, to keep prompts within context limits.
const MAX_FILES: usize = 80;

/// Cap on README characters.
const MAX_README_CHARS: usize = 15_000;

#[derive(Deserialize)]
struct RepoInfo {
    default_branch: Option<String>,
}

#[derive(Deserialize)]
struct TreeItem {
    path: String,
}

#[derive(Deserialize)]
struct TreeResponse {
    tree: Option<Vec<TreeItem>>,
}

#[derive(Deserialize)]
struct ReadmeInfo {
    download_url: Option<String>,
}

/// GitHub-backed implementation of [`ContextSource`].
pub struct GitHubContextSource {
    api_base: String,
    token: Option<String>,
    client: reqwest::Client,
}

impl GitHubContextSource {
    /// Create a client with an optional default access token.
    pub fn new(token: Option<String>) -> Self {
        let client = reqwest::Client::builder()
            .user_agent("repogram/0.1.0")
            .build()
            .expect("Failed to create HTTP client");

        if token.is_some() {
            info!("GitHubContextSource initialized with access token");
        } else {
            warn!("GitHubContextSource initialized without token (rate limits will be low)");
        }

        GitHubContextSource {
            api_base: "https://api.github.com".to_string(),
            token,
            client,
        }
    }

    /// Create a client from the `GITHUB_PAT` environment variable.
    pub fn from_env() -> Self {
        Self::new(std::env::var("GITHUB_PAT").ok())
    }

    /// Override the API base URL (for tests against a local stub).
    pub fn with_api_base(mut self, api_base: &str) -> Self {
        self.api_base = api_base.trim_end_matches('/').to_string();
        self
    }

    fn get(&self, url: &str, credential: Option<&str>) -> reqwest::RequestBuilder {
        let mut req = self
            .client
            .get(url)
            .header("Accept", "application/vnd.github.v3+json");
        if let Some(token) = credential.or(self.token.as_deref()) {
            req = req.header("Authorization", format!("token {}", token));
        }
        req
    }

    async fn default_branch(
        &self,
        owner: &str,
        name: &str,
        credential: Option<&str>,
    ) -> Result<String> {
        let url = format!("{}/repos/{}/{}", self.api_base, owner, name);
        debug!("Fetching default branch from: {}", url);
        let resp = self.get(&url, credential).send().await?;
        let status = resp.status();

        if status.as_u16() == 404 {
            warn!("Repository not found: {}/{}", owner, name);
            return Err(FetchError::NotFound);
        }
        if !status.is_success() {
            warn!("GitHub API error for {}/{}: {}", owner, name, status);
            return Err(FetchError::Upstream {
                status: status.as_u16(),
            });
        }

        let info: RepoInfo = resp.json().await?;
        let branch = info.default_branch.unwrap_or_else(|| "main".to_string());
        info!("Default branch for {}/{} is '{}'", owner, name, branch);
        Ok(branch)
    }

    async fn file_tree(
        &self,
        owner: &str,
        name: &str,
        branch: &str,
        credential: Option<&str>,
    ) -> Result<String> {
        let url = format!(
            "{}/repos/{}/{}/git/trees/{}?recursive=1",
            self.api_base, owner, name, branch
        );
        debug!("Fetching file tree from: {}", url);
        let resp = self.get(&url, credential).send().await?;
        let status = resp.status();

        if !status.is_success() {
            warn!("Failed to fetch file tree. Status: {}", status);
            return Err(FetchError::Upstream {
                status: status.as_u16(),
            });
        }

        let data: TreeResponse = resp.json().await?;
        let Some(items) = data.tree else {
            warn!("No 'tree' found in response data");
            return Err(FetchError::EmptyTree);
        };

        let paths: Vec<String> = items.into_iter().map(|i| i.path).collect();
        let tree = render_file_tree(&paths);
        if tree.is_empty() {
            return Err(FetchError::EmptyTree);
        }
        Ok(tree)
    }

    async fn readme(&self, owner: &str, name: &str, credential: Option<&str>) -> String {
        let url = format!("{}/repos/{}/{}/readme", self.api_base, owner, name);
        debug!("Fetching README from: {}", url);

        let resp = match self.get(&url, credential).send().await {
            Ok(resp) => resp,
            Err(e) => {
                warn!("README request failed: {}", e);
                return String::new();
            }
        };
        let status = resp.status();
        if !status.is_success() {
            warn!("README not found or inaccessible (Status: {})", status);
            return String::new();
        }

        let download_url = match resp.json::<ReadmeInfo>().await {
            Ok(info) => info.download_url,
            Err(_) => None,
        };
        let Some(download_url) = download_url else {
            return String::new();
        };

        debug!("Downloading README content from: {}", download_url);
        match self.client.get(&download_url).send().await {
            Ok(content_resp) => match content_resp.text().await {
                Ok(content) => {
                    info!("README fetched successfully");
                    truncate_readme(content)
                }
                Err(_) => String::new(),
            },
            Err(e) => {
                warn!("README download failed: {}", e);
                String::new()
            }
        }
    }
}

#[async_trait]
impl ContextSource for GitHubContextSource {
    async fn fetch_context(
        &self,
        owner: &str,
        name: &str,
        credential: Option<&str>,
    ) -> Result<RepoContext> {
        let default_branch = self.default_branch(owner, name, credential).await?;
        let file_tree = self
            .file_tree(owner, name, &default_branch, credential)
            .await?;
        let readme = self.readme(owner, name, credential).await;

        Ok(RepoContext {
            file_tree,
            default_branch,
            readme,
        })
    }
}

/// Whether a path belongs in the prompt's file listing.
fn should_include(path: &str) -> bool {
    let path_lower = path.to_lowercase();
    !EXCLUDED_FRAGMENTS.iter().any(|ex| path_lower.contains(ex))
}

/// Apply the inclusion filter and the entry cap, one path per line.
fn render_file_tree(paths: &[String]) -> String {
    let mut files: Vec<String> = Vec::new();
    for path in paths {
        if files.len() >= MAX_FILES {
            warn!("File limit ({}) reached. Truncating tree.", MAX_FILES);
            files.push(format!(
                "... (truncated, {} more files) ...",
                paths.len() - MAX_FILES
            ));
            break;
        }
        if should_include(path) {
            files.push(path.clone());
        }
    }
    info!("Found {} files in repository", files.len());
    files.join("\n")
}

/// Cap the README at `MAX_README_CHARS` characters.
fn truncate_readme(content: String) -> String {
    if content.chars().count() > MAX_README_CHARS {
        warn!("README too long, truncating to {} chars", MAX_README_CHARS);
        let capped: String = content.chars().take(MAX_README_CHARS).collect();
        format!("{}\n... (truncated) ...", capped)
    } else {
        content
    }
}
