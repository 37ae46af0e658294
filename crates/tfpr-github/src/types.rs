//! GitHub REST payloads

use serde::{Deserialize, Serialize};

/// `GET /repos/{owner}/{repo}/contents/{path}`
#[derive(Debug, Deserialize)]
pub(crate) struct ContentResponse {
    pub sha: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub encoding: Option<String>,
}

/// `PUT /repos/{owner}/{repo}/contents/{path}`
#[derive(Debug, Serialize)]
pub(crate) struct UpdateContentRequest<'a> {
    pub message: &'a str,
    pub content: String,
    pub sha: &'a str,
    pub branch: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct UpdateContentResponse {
    pub commit: CommitObject,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CommitObject {
    pub sha: String,
}

/// `GET /repos/{owner}/{repo}/git/ref/heads/{branch}` and
/// `POST /repos/{owner}/{repo}/git/refs`
#[derive(Debug, Deserialize)]
pub(crate) struct RefResponse {
    pub object: RefObject,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RefObject {
    pub sha: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct CreateRefRequest<'a> {
    #[serde(rename = "ref")]
    pub git_ref: String,
    pub sha: &'a str,
}

/// `POST /repos/{owner}/{repo}/pulls`
#[derive(Debug, Serialize)]
pub(crate) struct CreatePullRequest<'a> {
    pub title: &'a str,
    pub body: &'a str,
    pub head: &'a str,
    pub base: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PullRequestResponse {
    pub number: u64,
    pub html_url: String,
}

/// Error body returned with non-2xx responses
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub message: String,
}
