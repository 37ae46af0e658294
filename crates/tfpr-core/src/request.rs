//! Provisioning requests
//!
//! A request arrives as JSON with `db_name`, `env` and `engine`. The client
//! script sends the environment as `environment`, so both keys are
//! accepted.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{ProvisionError, ProvisionResult};
use crate::util::{environment_main_tf, validate_segment};

/// Longest accepted database name
pub const MAX_DB_NAME_LEN: usize = 63;

/// Database engine of the requested cluster
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Engine {
    Mysql,
    Postgresql,
}

impl Engine {
    /// Name of the Terraform list that holds clusters of this engine
    #[must_use]
    pub fn list_name(self) -> &'static str {
        match self {
            Self::Mysql => "mysql_list",
            Self::Postgresql => "postgres_list",
        }
    }
}

impl fmt::Display for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mysql => write!(f, "mysql"),
            Self::Postgresql => write!(f, "postgresql"),
        }
    }
}

impl FromStr for Engine {
    type Err = ProvisionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mysql" => Ok(Self::Mysql),
            "postgresql" | "postgres" => Ok(Self::Postgresql),
            other => Err(ProvisionError::InvalidRequest(format!(
                "unsupported engine '{other}', use 'mysql' or 'postgresql'"
            ))),
        }
    }
}

/// Request as received, before validation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRequest {
    #[serde(default)]
    pub db_name: Option<String>,
    #[serde(default, alias = "environment")]
    pub env: Option<String>,
    #[serde(default)]
    pub engine: Option<String>,
}

impl RawRequest {
    /// Parse a request from a JSON message body
    pub fn from_json(body: &str) -> ProvisionResult<Self> {
        serde_json::from_str(body)
            .map_err(|e| ProvisionError::InvalidRequest(format!("malformed request body: {e}")))
    }

    /// Check presence and shape of every field
    ///
    /// `allowed_environments` lists the environments that have a Terraform
    /// root module; an empty slice accepts any safe environment name.
    pub fn validate(&self, allowed_environments: &[String]) -> ProvisionResult<ProvisionRequest> {
        let db_name = required(self.db_name.as_deref(), "db_name")?;
        let env = required(self.env.as_deref(), "env")?;
        let engine: Engine = required(self.engine.as_deref(), "engine")?.parse()?;

        validate_db_name(db_name)?;

        validate_segment(env)
            .map_err(|e| ProvisionError::InvalidRequest(format!("invalid env: {e}")))?;
        if !allowed_environments.is_empty() && !allowed_environments.iter().any(|e| e == env) {
            return Err(ProvisionError::InvalidRequest(format!(
                "unknown env '{env}', expected one of: {}",
                allowed_environments.join(", ")
            )));
        }

        Ok(ProvisionRequest {
            db_name: db_name.to_string(),
            environment: env.to_string(),
            engine,
        })
    }
}

fn required<'a>(value: Option<&'a str>, field: &str) -> ProvisionResult<&'a str> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(ProvisionError::InvalidRequest(format!(
            "missing field: {field}"
        ))),
    }
}

/// Database names end up in a Terraform list and in a branch name, so only
/// letters, digits, `-` and `_` are allowed.
fn validate_db_name(name: &str) -> ProvisionResult<()> {
    if name.len() > MAX_DB_NAME_LEN {
        return Err(ProvisionError::InvalidRequest(format!(
            "db_name cannot exceed {MAX_DB_NAME_LEN} characters"
        )));
    }

    if !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ProvisionError::InvalidRequest(format!(
            "db_name '{name}' may only contain letters, digits, '-' and '_'"
        )));
    }

    Ok(())
}

/// A validated provisioning request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvisionRequest {
    pub db_name: String,
    pub environment: String,
    pub engine: Engine,
}

impl ProvisionRequest {
    /// Parse and validate a JSON message body in one step
    pub fn from_json(body: &str, allowed_environments: &[String]) -> ProvisionResult<Self> {
        RawRequest::from_json(body)?.validate(allowed_environments)
    }

    /// Repository path of the Terraform file to patch
    #[must_use]
    pub fn target_path(&self) -> String {
        environment_main_tf(&self.environment)
    }

    /// List the database name is added to
    #[must_use]
    pub fn list_name(&self) -> &'static str {
        self.engine.list_name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn envs() -> Vec<String> {
        vec!["dev".to_string(), "prod".to_string()]
    }

    fn raw(db_name: &str, env: &str, engine: &str) -> RawRequest {
        RawRequest {
            db_name: Some(db_name.into()),
            env: Some(env.into()),
            engine: Some(engine.into()),
        }
    }

    #[test]
    fn test_engine_from_str() {
        assert_eq!("mysql".parse::<Engine>().unwrap(), Engine::Mysql);
        assert_eq!("PostgreSQL".parse::<Engine>().unwrap(), Engine::Postgresql);
        assert_eq!(" postgres ".parse::<Engine>().unwrap(), Engine::Postgresql);
        assert!("oracle".parse::<Engine>().is_err());
        assert!("".parse::<Engine>().is_err());
    }

    #[test]
    fn test_engine_list_name() {
        assert_eq!(Engine::Mysql.list_name(), "mysql_list");
        assert_eq!(Engine::Postgresql.list_name(), "postgres_list");
    }

    #[test]
    fn test_validate_ok() {
        let request = raw("orders-db", "dev", "mysql").validate(&envs()).unwrap();
        assert_eq!(request.db_name, "orders-db");
        assert_eq!(request.environment, "dev");
        assert_eq!(request.engine, Engine::Mysql);
        assert_eq!(request.target_path(), "terraform/env/dev/main.tf");
        assert_eq!(request.list_name(), "mysql_list");
    }

    #[test]
    fn test_validate_trims_fields() {
        let request = raw(" orders ", " prod ", " mysql ").validate(&envs()).unwrap();
        assert_eq!(request.db_name, "orders");
        assert_eq!(request.environment, "prod");
    }

    #[test]
    fn test_validate_missing_fields() {
        let mut request = raw("orders", "dev", "mysql");
        request.env = None;
        let err = request.validate(&envs()).unwrap_err();
        assert_eq!(err.to_string(), "Invalid request: missing field: env");

        let err = raw("  ", "dev", "mysql").validate(&envs()).unwrap_err();
        assert_eq!(err.to_string(), "Invalid request: missing field: db_name");
    }

    #[test]
    fn test_validate_unknown_engine_is_rejected() {
        let err = raw("orders", "dev", "mariadb").validate(&envs()).unwrap_err();
        assert_eq!(err.code(), "INVALID_REQUEST");
    }

    #[test]
    fn test_validate_env_rules() {
        assert!(raw("orders", "staging", "mysql").validate(&envs()).is_err());
        assert!(raw("orders", "staging", "mysql").validate(&[]).is_ok());
        assert!(raw("orders", "../prod", "mysql").validate(&[]).is_err());
    }

    #[test]
    fn test_validate_db_name_rules() {
        assert!(raw("orders,db", "dev", "mysql").validate(&envs()).is_err());
        assert!(raw("orders db", "dev", "mysql").validate(&envs()).is_err());
        assert!(raw(&"a".repeat(64), "dev", "mysql").validate(&envs()).is_err());
        assert!(raw(&"a".repeat(63), "dev", "mysql").validate(&envs()).is_ok());
    }

    #[test]
    fn test_from_json_accepts_environment_alias() {
        let body = r#"{"db_name": "orders-db", "engine": "postgresql", "environment": "prod"}"#;
        let request = ProvisionRequest::from_json(body, &envs()).unwrap();
        assert_eq!(request.environment, "prod");
        assert_eq!(request.engine, Engine::Postgresql);
    }

    #[test]
    fn test_from_json_malformed() {
        let err = ProvisionRequest::from_json("{not json", &envs()).unwrap_err();
        assert_eq!(err.code(), "INVALID_REQUEST");
    }
}
