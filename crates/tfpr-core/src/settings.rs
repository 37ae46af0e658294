//! Runtime settings
//!
//! Settings come from environment variables. [`Settings::from_lookup`]
//! takes any key lookup so callers and tests can supply their own source.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Repository used when `GITHUB_REPO` is not set
pub const DEFAULT_REPOSITORY: &str = "shakedkattan/automated_serverless_rds_cluster";
/// Base branch used when `BRANCH_BASE` is not set
pub const DEFAULT_BASE_BRANCH: &str = "main";
/// API root used when `GITHUB_API_URL` is not set
pub const DEFAULT_API_URL: &str = "https://api.github.com";
/// Environments accepted when `TFPR_ALLOWED_ENVS` is not set
pub const DEFAULT_ALLOWED_ENVS: &[&str] = &["dev", "prod"];

/// Errors while loading settings
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    #[error("Missing required setting: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {key}: {message}")]
    Invalid { key: &'static str, message: String },
}

/// `owner/name` of a hosted repository
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RepoSlug {
    pub owner: String,
    pub name: String,
}

impl fmt::Display for RepoSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

impl FromStr for RepoSlug {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || SettingsError::Invalid {
            key: "GITHUB_REPO",
            message: format!("expected 'owner/name', got '{s}'"),
        };

        let (owner, name) = s.trim().split_once('/').ok_or_else(invalid)?;
        if owner.is_empty() || name.is_empty() || name.contains('/') {
            return Err(invalid());
        }

        Ok(Self {
            owner: owner.to_string(),
            name: name.to_string(),
        })
    }
}

/// Settings for talking to the infrastructure repository
#[derive(Clone)]
pub struct Settings {
    pub github_token: String,
    pub repository: RepoSlug,
    pub base_branch: String,
    pub api_url: String,
    pub allowed_environments: Vec<String>,
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("github_token", &"<redacted>")
            .field("repository", &self.repository)
            .field("base_branch", &self.base_branch)
            .field("api_url", &self.api_url)
            .field("allowed_environments", &self.allowed_environments)
            .finish()
    }
}

impl Settings {
    /// Load settings from the process environment
    pub fn from_env() -> Result<Self, SettingsError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load settings from an arbitrary key lookup
    ///
    /// Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, SettingsError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let github_token = get("GITHUB_TOKEN").ok_or(SettingsError::Missing("GITHUB_TOKEN"))?;

        let repository: RepoSlug = get("GITHUB_REPO")
            .as_deref()
            .unwrap_or(DEFAULT_REPOSITORY)
            .parse()?;

        let base_branch = get("BRANCH_BASE").map_or_else(
            || DEFAULT_BASE_BRANCH.to_string(),
            |b| b.trim().to_string(),
        );

        let api_url = get("GITHUB_API_URL").map_or_else(
            || DEFAULT_API_URL.to_string(),
            |u| u.trim().trim_end_matches('/').to_string(),
        );
        if !(api_url.starts_with("https://") || api_url.starts_with("http://")) {
            return Err(SettingsError::Invalid {
                key: "GITHUB_API_URL",
                message: format!("expected an http(s) URL, got '{api_url}'"),
            });
        }

        let allowed_environments = match get("TFPR_ALLOWED_ENVS") {
            Some(list) => list
                .split(',')
                .map(str::trim)
                .filter(|e| !e.is_empty())
                .map(String::from)
                .collect(),
            None => DEFAULT_ALLOWED_ENVS.iter().map(|e| (*e).to_string()).collect(),
        };

        Ok(Self {
            github_token: github_token.trim().to_string(),
            repository,
            base_branch,
            api_url,
            allowed_environments,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::from_lookup(lookup(&[("GITHUB_TOKEN", "ghp_test")])).unwrap();
        assert_eq!(settings.github_token, "ghp_test");
        assert_eq!(settings.repository.to_string(), DEFAULT_REPOSITORY);
        assert_eq!(settings.base_branch, "main");
        assert_eq!(settings.api_url, "https://api.github.com");
        assert_eq!(settings.allowed_environments, vec!["dev", "prod"]);
    }

    #[test]
    fn test_overrides() {
        let settings = Settings::from_lookup(lookup(&[
            ("GITHUB_TOKEN", "t"),
            ("GITHUB_REPO", "acme/infra"),
            ("BRANCH_BASE", "develop"),
            ("GITHUB_API_URL", "http://localhost:8080/"),
            ("TFPR_ALLOWED_ENVS", "dev, staging ,prod,"),
        ]))
        .unwrap();
        assert_eq!(settings.repository.owner, "acme");
        assert_eq!(settings.repository.name, "infra");
        assert_eq!(settings.base_branch, "develop");
        assert_eq!(settings.api_url, "http://localhost:8080");
        assert_eq!(settings.allowed_environments, vec!["dev", "staging", "prod"]);
    }

    #[test]
    fn test_missing_token() {
        let err = Settings::from_lookup(lookup(&[("GITHUB_TOKEN", "  ")])).unwrap_err();
        assert_eq!(err, SettingsError::Missing("GITHUB_TOKEN"));
    }

    #[test]
    fn test_invalid_repo_slug() {
        for bad in ["noslash", "/name", "owner/", "a/b/c"] {
            assert!(bad.parse::<RepoSlug>().is_err(), "{bad}");
        }
    }

    #[test]
    fn test_invalid_api_url() {
        let err = Settings::from_lookup(lookup(&[
            ("GITHUB_TOKEN", "t"),
            ("GITHUB_API_URL", "api.github.com"),
        ]))
        .unwrap_err();
        assert!(matches!(err, SettingsError::Invalid { key: "GITHUB_API_URL", .. }));
    }

    #[test]
    fn test_debug_redacts_token() {
        let settings = Settings::from_lookup(lookup(&[("GITHUB_TOKEN", "ghp_secret")])).unwrap();
        assert!(!format!("{settings:?}").contains("ghp_secret"));
    }
}
