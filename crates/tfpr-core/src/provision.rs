//! Provisioning workflow
//!
//! Fetch the environment's `main.tf` from the base branch, patch the
//! engine's list, and when the patch changed something: create a branch,
//! commit the file to it, and open a pull request.
//!
//! Each remote call is made once. A failure aborts the request and is
//! returned to the caller; nothing is retried or rolled back.

use serde::Serialize;
use tfpr_hcl::PatchResult;
use tracing::{debug, info, warn};

use crate::branch::new_branch_name;
use crate::diff::unified_diff;
use crate::error::{ProvisionError, ProvisionResult};
use crate::host::{CodeHost, FileUpdate, ProposalRef, PullRequestDraft};
use crate::request::ProvisionRequest;
use crate::settings::Settings;

/// What a request would change, computed without writing anything
#[derive(Debug, Clone)]
pub struct ProvisionPlan {
    pub request: ProvisionRequest,
    /// Repository path of the patched file
    pub path: String,
    pub list_name: &'static str,
    /// Branch the file was read from and the pull request targets
    pub base_branch: String,
    /// Blob hash of the file as read
    pub file_sha: String,
    /// File content as read
    pub original: String,
    pub patch: PatchResult,
}

impl ProvisionPlan {
    /// Whether the database is already listed
    #[must_use]
    pub fn is_noop(&self) -> bool {
        !self.patch.changed
    }

    /// Unified diff of the planned change (empty for a no-op)
    #[must_use]
    pub fn diff(&self) -> String {
        unified_diff(&self.path, &self.original, &self.patch.text)
    }
}

/// Result of a provisioning request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ProvisionOutcome {
    /// A branch was pushed and a pull request opened
    Proposed {
        db_name: String,
        path: String,
        list_name: String,
        branch: String,
        pull_request: ProposalRef,
    },
    /// The database was already in the list; nothing was written
    AlreadyPresent {
        db_name: String,
        path: String,
        list_name: String,
    },
}

/// Runs provisioning requests against a code host
pub struct Provisioner<'a, H: CodeHost + ?Sized> {
    host: &'a H,
    base_branch: String,
    allowed_environments: Vec<String>,
}

impl<'a, H: CodeHost + ?Sized> Provisioner<'a, H> {
    /// Create a provisioner targeting `base_branch`, accepting any
    /// environment name
    pub fn new(host: &'a H, base_branch: impl Into<String>) -> Self {
        Self {
            host,
            base_branch: base_branch.into(),
            allowed_environments: Vec::new(),
        }
    }

    /// Create a provisioner from loaded settings
    pub fn from_settings(host: &'a H, settings: &Settings) -> Self {
        Self::new(host, settings.base_branch.clone())
            .with_allowed_environments(settings.allowed_environments.clone())
    }

    /// Restrict requests to these environments
    #[must_use]
    pub fn with_allowed_environments(mut self, environments: Vec<String>) -> Self {
        self.allowed_environments = environments;
        self
    }

    pub fn base_branch(&self) -> &str {
        &self.base_branch
    }

    pub fn allowed_environments(&self) -> &[String] {
        &self.allowed_environments
    }

    /// Fetch the target file and compute the patch without writing
    pub async fn plan(&self, request: &ProvisionRequest) -> ProvisionResult<ProvisionPlan> {
        let path = request.target_path();
        let list_name = request.list_name();

        let file = self
            .host
            .get_file(&path, &self.base_branch)
            .await
            .map_err(|source| ProvisionError::repository("fetch file", source))?;

        let patch = tfpr_hcl::patch(&file.content, list_name, &request.db_name)?;
        debug!(
            path = %path,
            list = list_name,
            changed = patch.changed,
            "computed list patch"
        );

        Ok(ProvisionPlan {
            request: request.clone(),
            path,
            list_name,
            base_branch: self.base_branch.clone(),
            file_sha: file.sha,
            original: file.content,
            patch,
        })
    }

    /// Plan the request and, if it changes the file, propose it
    pub async fn provision(&self, request: &ProvisionRequest) -> ProvisionResult<ProvisionOutcome> {
        let plan = self.plan(request).await?;
        self.apply(plan).await
    }

    /// Propose a computed plan
    ///
    /// A no-op plan returns [`ProvisionOutcome::AlreadyPresent`] without
    /// creating a branch, commit or pull request.
    pub async fn apply(&self, plan: ProvisionPlan) -> ProvisionResult<ProvisionOutcome> {
        let db_name = plan.request.db_name.clone();

        if plan.is_noop() {
            info!(
                db_name = %db_name,
                list = plan.list_name,
                "database already listed, skipping pull request"
            );
            return Ok(ProvisionOutcome::AlreadyPresent {
                db_name,
                path: plan.path,
                list_name: plan.list_name.to_string(),
            });
        }

        let branch = new_branch_name(&db_name);
        self.host
            .create_branch(&branch, &plan.base_branch)
            .await
            .map_err(|source| ProvisionError::repository("create branch", source))?;
        debug!(branch = %branch, base = %plan.base_branch, "created branch");

        let update = FileUpdate {
            path: plan.path.clone(),
            content: plan.patch.text,
            sha: plan.file_sha,
            branch: branch.clone(),
            message: commit_message(&db_name, plan.list_name),
        };
        let commit = match self.host.update_file(&update).await {
            Ok(commit) => commit,
            Err(source) => {
                warn!(branch = %branch, "commit failed, branch left without changes");
                return Err(ProvisionError::repository("update file", source));
            }
        };
        debug!(branch = %branch, commit = %commit, "committed patched file");

        let draft = PullRequestDraft {
            title: pull_request_title(&db_name),
            body: pull_request_body(&db_name, plan.list_name),
            head: branch.clone(),
            base: plan.base_branch,
        };
        let pull_request = match self.host.create_pull_request(&draft).await {
            Ok(pr) => pr,
            Err(source) => {
                warn!(branch = %branch, "pull request failed, branch left with commit");
                return Err(ProvisionError::repository("create pull request", source));
            }
        };

        info!(
            db_name = %db_name,
            branch = %branch,
            url = %pull_request.url,
            "opened pull request"
        );

        Ok(ProvisionOutcome::Proposed {
            db_name,
            path: plan.path,
            list_name: plan.list_name.to_string(),
            branch,
            pull_request,
        })
    }
}

fn commit_message(db_name: &str, list_name: &str) -> String {
    format!("Add {db_name} to {list_name}")
}

fn pull_request_title(db_name: &str) -> String {
    format!("Provision {db_name}")
}

fn pull_request_body(db_name: &str, list_name: &str) -> String {
    format!("Automated PR to add `{db_name}` to `{list_name}`.")
}
