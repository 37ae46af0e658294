//! Code host collaborator traits
//!
//! The provisioning workflow needs three capabilities from the host of the
//! infrastructure repository: reading and writing file contents, creating
//! branches, and opening pull requests. Each is its own trait;
//! [`CodeHost`] bundles them.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::RepoError;

/// A file read from the repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteFile {
    /// Repository path
    pub path: String,
    /// Decoded UTF-8 content
    pub content: String,
    /// Blob hash, required when writing the file back
    pub sha: String,
}

/// A commit replacing one file on a branch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUpdate {
    pub path: String,
    pub content: String,
    /// Blob hash of the version being replaced
    pub sha: String,
    pub branch: String,
    pub message: String,
}

/// A pull request to open
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequestDraft {
    pub title: String,
    pub body: String,
    /// Branch with the changes
    pub head: String,
    /// Branch to merge into
    pub base: String,
}

/// Reference to an opened pull request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalRef {
    pub number: u64,
    pub url: String,
}

/// Read and write file contents
#[async_trait]
pub trait ContentRepository: Send + Sync {
    /// Fetch a file at a branch, tag or commit
    async fn get_file(&self, path: &str, git_ref: &str) -> Result<RemoteFile, RepoError>;

    /// Commit new file content, returning the commit hash
    async fn update_file(&self, update: &FileUpdate) -> Result<String, RepoError>;
}

/// Create branches
#[async_trait]
pub trait BranchCreator: Send + Sync {
    /// Create branch `name` pointing at the head of `from_ref`
    async fn create_branch(&self, name: &str, from_ref: &str) -> Result<(), RepoError>;
}

/// Open change proposals
#[async_trait]
pub trait ChangeProposer: Send + Sync {
    async fn create_pull_request(&self, draft: &PullRequestDraft) -> Result<ProposalRef, RepoError>;
}

/// Everything the provisioning workflow needs from a code host
pub trait CodeHost: ContentRepository + BranchCreator + ChangeProposer {}

impl<T> CodeHost for T where T: ContentRepository + BranchCreator + ChangeProposer + ?Sized {}
