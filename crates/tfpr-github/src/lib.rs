//! tfpr GitHub - code host integration
//!
//! Implements the [`tfpr_core::host`] traits on top of the GitHub REST API:
//! - contents API for reading and committing `main.tf`
//! - git refs API for creating proposal branches
//! - pulls API for opening pull requests

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::missing_errors_doc, clippy::module_name_repetitions)]

mod client;
mod types;

pub use client::{GitHubClient, API_VERSION, USER_AGENT};
