//! GitHub REST client

use std::time::Duration;

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use tfpr_core::{
    BranchCreator, ChangeProposer, ContentRepository, FileUpdate, ProposalRef, PullRequestDraft,
    RemoteFile, RepoError, RepoSlug, Settings,
};
use tracing::debug;

use crate::types::{
    ContentResponse, CreatePullRequest, CreateRefRequest, ErrorBody, PullRequestResponse,
    RefResponse, UpdateContentRequest, UpdateContentResponse,
};

/// REST API version sent with every request
pub const API_VERSION: &str = "2022-11-28";
/// User agent sent with every request
pub const USER_AGENT: &str = concat!("tfpr/", env!("CARGO_PKG_VERSION"));

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for one GitHub repository
#[derive(Debug, Clone)]
pub struct GitHubClient {
    http: reqwest::Client,
    api_url: String,
    repo: RepoSlug,
}

impl GitHubClient {
    /// Create a client authenticating with `token`
    pub fn new(api_url: &str, token: &str, repo: RepoSlug) -> Result<Self, RepoError> {
        let mut auth = HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(|_| RepoError::Transport("token contains invalid characters".into()))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));
        headers.insert("x-github-api-version", HeaderValue::from_static(API_VERSION));

        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| RepoError::Transport(e.to_string()))?;

        Ok(Self {
            http,
            api_url: api_url.trim_end_matches('/').to_string(),
            repo,
        })
    }

    /// Create a client from loaded settings
    pub fn from_settings(settings: &Settings) -> Result<Self, RepoError> {
        Self::new(
            &settings.api_url,
            &settings.github_token,
            settings.repository.clone(),
        )
    }

    pub fn repo(&self) -> &RepoSlug {
        &self.repo
    }

    fn repo_url(&self, tail: &str) -> String {
        format!(
            "{}/repos/{}/{}/{}",
            self.api_url, self.repo.owner, self.repo.name, tail
        )
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, RepoError> {
        let response = request
            .send()
            .await
            .map_err(|e| RepoError::Transport(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return response
                .json::<T>()
                .await
                .map_err(|e| RepoError::Decode(e.to_string()));
        }

        // GitHub puts a human-readable reason in `message`
        let message = match response.json::<ErrorBody>().await {
            Ok(body) => body.message,
            Err(_) => status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string(),
        };

        if status == StatusCode::NOT_FOUND {
            return Err(RepoError::NotFound(message));
        }
        Err(RepoError::Http {
            status: status.as_u16(),
            message,
        })
    }

    async fn branch_head(&self, branch: &str) -> Result<String, RepoError> {
        let url = self.repo_url(&format!("git/ref/heads/{branch}"));
        let head: RefResponse = self.send(self.http.get(url)).await?;
        Ok(head.object.sha)
    }
}

fn decode_content(path: &str, response: ContentResponse) -> Result<RemoteFile, RepoError> {
    match response.encoding.as_deref() {
        None | Some("base64") => {}
        Some(other) => {
            return Err(RepoError::Decode(format!(
                "unsupported content encoding '{other}' for {path}"
            )))
        }
    }

    // Contents are wrapped at 60 columns
    let compact: String = response
        .content
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();
    let bytes = STANDARD
        .decode(compact)
        .map_err(|e| RepoError::Decode(format!("invalid base64 content for {path}: {e}")))?;
    let content = String::from_utf8(bytes)
        .map_err(|_| RepoError::Decode(format!("{path} is not valid UTF-8")))?;

    Ok(RemoteFile {
        path: path.to_string(),
        content,
        sha: response.sha,
    })
}

#[async_trait]
impl ContentRepository for GitHubClient {
    async fn get_file(&self, path: &str, git_ref: &str) -> Result<RemoteFile, RepoError> {
        let url = self.repo_url(&format!("contents/{path}"));
        debug!(repo = %self.repo, path, git_ref, "fetching file");

        let response: ContentResponse = self
            .send(self.http.get(url).query(&[("ref", git_ref)]))
            .await?;
        decode_content(path, response)
    }

    async fn update_file(&self, update: &FileUpdate) -> Result<String, RepoError> {
        let url = self.repo_url(&format!("contents/{}", update.path));
        debug!(repo = %self.repo, path = %update.path, branch = %update.branch, "committing file");

        let body = UpdateContentRequest {
            message: &update.message,
            content: STANDARD.encode(update.content.as_bytes()),
            sha: &update.sha,
            branch: &update.branch,
        };
        let response: UpdateContentResponse = self.send(self.http.put(url).json(&body)).await?;
        Ok(response.commit.sha)
    }
}

#[async_trait]
impl BranchCreator for GitHubClient {
    async fn create_branch(&self, name: &str, from_ref: &str) -> Result<(), RepoError> {
        let sha = self.branch_head(from_ref).await?;
        debug!(repo = %self.repo, branch = name, from = from_ref, sha = %sha, "creating branch");

        let body = CreateRefRequest {
            git_ref: format!("refs/heads/{name}"),
            sha: &sha,
        };
        let _: RefResponse = self
            .send(self.http.post(self.repo_url("git/refs")).json(&body))
            .await?;
        Ok(())
    }
}

#[async_trait]
impl ChangeProposer for GitHubClient {
    async fn create_pull_request(&self, draft: &PullRequestDraft) -> Result<ProposalRef, RepoError> {
        debug!(repo = %self.repo, head = %draft.head, base = %draft.base, "opening pull request");

        let body = CreatePullRequest {
            title: &draft.title,
            body: &draft.body,
            head: &draft.head,
            base: &draft.base,
        };
        let response: PullRequestResponse = self
            .send(self.http.post(self.repo_url("pulls")).json(&body))
            .await?;

        Ok(ProposalRef {
            number: response.number,
            url: response.html_url,
        })
    }
}
