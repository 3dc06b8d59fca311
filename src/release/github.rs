//! GitHub Releases backend over the REST API

use std::fmt;
use std::time::Duration;

use reqwest::blocking::{Client, Response};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CalverError, RepositoryError, Result};
use crate::release::{CreatedRelease, LatestRelease, ReleaseRepository};

pub const DEFAULT_API_URL: &str = "https://api.github.com";
const API_VERSION: &str = "2022-11-28";

/// `owner/repo` pair identifying a GitHub repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoSlug {
    pub owner: String,
    pub repo: String,
}

impl RepoSlug {
    /// Parse `owner/repo`
    pub fn parse(slug: &str) -> Result<Self> {
        let mut parts = slug.trim().split('/');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(owner), Some(repo), None) if !owner.is_empty() && !repo.is_empty() => {
                Ok(RepoSlug {
                    owner: owner.to_string(),
                    repo: repo.to_string(),
                })
            }
            _ => Err(CalverError::config(format!(
                "Invalid repository '{}' - expected owner/repo",
                slug
            ))),
        }
    }
}

impl fmt::Display for RepoSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

#[derive(Debug, Deserialize)]
struct ReleaseResponse {
    tag_name: String,
    #[serde(default)]
    html_url: String,
}

#[derive(Debug, Serialize)]
struct CreateReleaseRequest<'a> {
    tag_name: &'a str,
    name: &'a str,
    draft: bool,
    generate_release_notes: bool,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Releases of one GitHub repository
pub struct GitHubReleases {
    client: Client,
    api_url: String,
    slug: RepoSlug,
}

impl GitHubReleases {
    /// Build a client authenticated with `token`
    pub fn new(token: &str, slug: RepoSlug, api_url: &str, timeout: Duration) -> Result<Self> {
        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|_| CalverError::input("github-token contains invalid characters"))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert("x-github-api-version", HeaderValue::from_static(API_VERSION));

        let client = Client::builder()
            .user_agent(concat!("calver-release/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(GitHubReleases {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
            slug,
        })
    }

    fn releases_url(&self) -> String {
        format!(
            "{}/repos/{}/{}/releases",
            self.api_url, self.slug.owner, self.slug.repo
        )
    }
}

/// Turn a non-success response into a `RepositoryError`, keeping the API message
fn check_status(response: Response) -> std::result::Result<Response, RepositoryError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().unwrap_or_default();
    Err(RepositoryError::new(api_error_message(status, &body)))
}

fn api_error_message(status: reqwest::StatusCode, body: &str) -> String {
    let detail = serde_json::from_str::<ApiErrorBody>(body)
        .map(|b| b.message)
        .ok()
        .or_else(|| status.canonical_reason().map(str::to_string))
        .unwrap_or_else(|| "request failed".to_string());
    format!("{} ({})", detail, status.as_u16())
}

fn transport_error(err: reqwest::Error) -> RepositoryError {
    RepositoryError::new(err.to_string())
}

impl ReleaseRepository for GitHubReleases {
    fn list_latest(&self) -> std::result::Result<Option<LatestRelease>, RepositoryError> {
        let url = self.releases_url();
        debug!(%url, "listing latest release");

        let response = self
            .client
            .get(&url)
            .query(&[("per_page", "1"), ("page", "1")])
            .send()
            .map_err(transport_error)?;
        let releases: Vec<ReleaseResponse> =
            check_status(response)?.json().map_err(transport_error)?;

        Ok(releases
            .into_iter()
            .next()
            .map(|r| LatestRelease { tag: r.tag_name }))
    }

    fn create(
        &self,
        tag: &str,
        is_draft: bool,
    ) -> std::result::Result<CreatedRelease, RepositoryError> {
        let url = self.releases_url();
        debug!(%url, tag, is_draft, "creating release");

        let request = CreateReleaseRequest {
            tag_name: tag,
            name: tag,
            draft: is_draft,
            generate_release_notes: true,
        };
        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .map_err(transport_error)?;
        let release: ReleaseResponse = check_status(response)?.json().map_err(transport_error)?;

        debug!(tag = %release.tag_name, "release created");
        Ok(CreatedRelease {
            url: release.html_url,
        })
    }
}
