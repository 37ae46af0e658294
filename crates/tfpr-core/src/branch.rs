//! Branch naming for proposal branches

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Prefix shared by every branch this tool creates
pub const BRANCH_PREFIX: &str = "rds-pr";

/// Build a branch name from its parts
///
/// `rds-pr-{db_name}-{%Y%m%d%H%M%S}-{disambiguator}`. The timestamp alone
/// has one-second resolution, so two requests for the same database in
/// the same second would collide without the disambiguator.
#[must_use]
pub fn branch_name(db_name: &str, at: DateTime<Utc>, disambiguator: &str) -> String {
    format!(
        "{BRANCH_PREFIX}-{db_name}-{}-{disambiguator}",
        at.format("%Y%m%d%H%M%S")
    )
}

/// Branch name for a new proposal, stamped with the current time and a
/// random suffix
#[must_use]
pub fn new_branch_name(db_name: &str) -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    branch_name(db_name, Utc::now(), &suffix[..8])
}
