//! CLI command handlers
//!
//! Each subcommand has its own module. Handlers print their result to
//! stdout and return errors to `main`.

pub mod event;
pub mod patch;
pub mod provision;

use anyhow::Result;
use tfpr_core::Settings;
use tfpr_github::GitHubClient;
use tracing::debug;

/// Load settings from the environment and connect to the configured repository
fn connect() -> Result<(Settings, GitHubClient)> {
    let settings = Settings::from_env()?;
    let client = GitHubClient::from_settings(&settings)?;
    debug!(repo = %settings.repository, base = %settings.base_branch, "connected");
    Ok((settings, client))
}
