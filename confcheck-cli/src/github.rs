//! GitHub REST client.
//!
//! Lists the files changed by a pull request and serves their content to the
//! validation engine as a [`ContentSource`].

use async_trait::async_trait;
use confcheck::{ChangedFile, ContentSource, FetchError, FetchedContent};
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};
use reqwest::{StatusCode, Url};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::metadata::RepositoryMetadata;

pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Page size for the pull-request files listing (the API maximum).
const PER_PAGE: usize = 100;

/// The API stops listing pull-request files after 3000 entries.
const MAX_PAGES: usize = 30;

const API_VERSION: &str = "2022-11-28";

const CONTENT_OMITTED: &str = "content omitted by host (file too large)";

#[derive(Debug, Error)]
pub enum GitHubError {
    #[error("invalid API URL '{0}'")]
    InvalidApiUrl(String),
    #[error("invalid access token")]
    InvalidToken,
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} responded with status {status}: {message}")]
    Status {
        url: String,
        status: u16,
        message: String,
    },
}

#[derive(Debug, Deserialize)]
struct PullRequestFile {
    filename: String,
    #[serde(default)]
    status: String,
}

#[derive(Debug, Deserialize)]
struct ContentResponse {
    #[serde(default)]
    content: String,
    #[serde(default)]
    encoding: String,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Authenticated client scoped to one repository and one revision.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    http: reqwest::Client,
    api_url: Url,
    repository: RepositoryMetadata,
    revision: String,
}

impl GitHubClient {
    /// Build a client for `repository`, reading contents at `revision`.
    ///
    /// # Errors
    ///
    /// Returns an error if `api_url` is not a usable base URL, if the token
    /// cannot be sent as a header, or if the HTTP client fails to build.
    pub fn new(
        api_url: &str,
        token: &str,
        repository: RepositoryMetadata,
        revision: impl Into<String>,
    ) -> Result<Self, GitHubError> {
        let api_url = Url::parse(api_url)
            .ok()
            .filter(|url| !url.cannot_be_a_base())
            .ok_or_else(|| GitHubError::InvalidApiUrl(api_url.to_owned()))?;

        let mut auth = HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(|_| GitHubError::InvalidToken)?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "x-github-api-version",
            HeaderValue::from_static(API_VERSION),
        );

        let http = reqwest::Client::builder()
            .user_agent(concat!("confcheck/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .build()
            .map_err(GitHubError::Client)?;

        Ok(Self {
            http,
            api_url,
            repository,
            revision: revision.into(),
        })
    }

    fn endpoint<'a>(&self, segments: impl IntoIterator<Item = &'a str>) -> Url {
        let mut url = self.api_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty()
                .extend([
                    "repos",
                    self.repository.owner.as_str(),
                    self.repository.name.as_str(),
                ])
                .extend(segments);
        }
        url
    }

    /// List the files changed by pull request `number`, in API order.
    ///
    /// Removed files are skipped: they have no content at the head revision.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failures, non-success statuses or
    /// unparseable responses.
    pub async fn list_pull_request_files(
        &self,
        number: u64,
    ) -> Result<Vec<ChangedFile>, GitHubError> {
        let number = number.to_string();
        let mut files = Vec::new();

        for page in 1..=MAX_PAGES {
            let mut url = self.endpoint(["pulls", number.as_str(), "files"]);
            url.query_pairs_mut()
                .append_pair("per_page", &PER_PAGE.to_string())
                .append_pair("page", &page.to_string());

            let response = self.send(url.clone()).await?;
            let batch: Vec<PullRequestFile> =
                response.json().await.map_err(|source| GitHubError::Request {
                    url: url.to_string(),
                    source,
                })?;

            let fetched = batch.len();
            files.extend(
                batch
                    .into_iter()
                    .filter(|f| f.status != "removed")
                    .map(|f| ChangedFile::new(f.filename)),
            );
            debug!(page, fetched, "Listed pull request files");

            if fetched < PER_PAGE {
                break;
            }
        }

        Ok(files)
    }

    async fn send(&self, url: Url) -> Result<reqwest::Response, GitHubError> {
        let response = self
            .http
            .get(url.clone())
            .send()
            .await
            .map_err(|source| GitHubError::Request {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        Err(GitHubError::Status {
            url: url.to_string(),
            status: status.as_u16(),
            message: error_message(response).await,
        })
    }
}

/// Best-effort extraction of the API's error message.
async fn error_message(response: reqwest::Response) -> String {
    let status = response.status();
    match response.json::<ApiErrorBody>().await {
        Ok(body) => body.message,
        Err(_) => status
            .canonical_reason()
            .unwrap_or("unknown error")
            .to_owned(),
    }
}

#[async_trait]
impl ContentSource for GitHubClient {
    async fn get_file_content(&self, path: &str) -> Result<FetchedContent, FetchError> {
        let mut url = self.endpoint(std::iter::once("contents").chain(path.split('/')));
        url.query_pairs_mut().append_pair("ref", &self.revision);

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(FetchError::NotFound(path.to_owned()));
        }
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                message: error_message(response).await,
            });
        }

        // Directories come back as JSON arrays and fail to deserialize here.
        let body: ContentResponse = response
            .json()
            .await
            .map_err(|e| FetchError::Malformed(e.to_string()))?;

        // Files over 1 MB are listed without their content.
        if body.content.is_empty() && body.encoding.eq_ignore_ascii_case("none") {
            return Err(FetchError::Malformed(CONTENT_OMITTED.to_owned()));
        }

        Ok(FetchedContent::with_encoding(
            body.content.into_bytes(),
            body.encoding,
        ))
    }
}
