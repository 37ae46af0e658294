//! tfpr Core - request validation and the provisioning workflow
//!
//! This crate turns a database provisioning request into a pull request
//! against the infrastructure repository: validate the request, patch the
//! environment's `main.tf`, push it to a fresh branch and open a PR.
//!
//! Remote access goes through the [`host::CodeHost`] traits so the
//! workflow never holds a global client.

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::must_use_candidate,
    clippy::module_name_repetitions
)]

pub mod branch;
pub mod diff;
pub mod error;
pub mod host;
pub mod provision;
pub mod queue;
pub mod request;
pub mod settings;
pub mod util;

pub use tfpr_hcl;

pub use error::{ProvisionError, ProvisionResult, RepoError};
pub use host::{
    BranchCreator, ChangeProposer, CodeHost, ContentRepository, FileUpdate, ProposalRef,
    PullRequestDraft, RemoteFile,
};
pub use provision::{ProvisionOutcome, ProvisionPlan, Provisioner};
pub use queue::{handle_event, HandlerResponse};
pub use request::{Engine, ProvisionRequest, RawRequest};
pub use settings::{RepoSlug, Settings, SettingsError};
