//! Queue ingestion
//!
//! Requests arrive as queue events in the SQS envelope shape:
//! `{"Records": [{"messageId": "...", "body": "{\"db_name\": ...}"}]}`.
//! Every record is handled in order and answered with a status code and a
//! short body.

use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::host::CodeHost;
use crate::provision::{ProvisionOutcome, Provisioner};
use crate::request::ProvisionRequest;

/// Queue event envelope
#[derive(Debug, Clone, Deserialize)]
pub struct QueueEvent {
    #[serde(rename = "Records", default)]
    pub records: Vec<QueueRecord>,
}

/// A single queued message
#[derive(Debug, Clone, Deserialize)]
pub struct QueueRecord {
    #[serde(rename = "messageId", default)]
    pub message_id: Option<String>,
    pub body: String,
}

/// Response for one handled message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandlerResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub body: String,
}

impl HandlerResponse {
    fn new(status_code: u16, body: impl Into<String>) -> Self {
        Self {
            status_code,
            body: body.into(),
        }
    }

    fn invalid_request() -> Self {
        Self::new(400, "Invalid request")
    }

    /// Whether the status is 2xx
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }
}

/// Handle a raw queue event
///
/// An envelope that cannot be parsed, or one without records, yields a
/// single 400 response.
pub async fn handle_event<H: CodeHost + ?Sized>(
    provisioner: &Provisioner<'_, H>,
    event: &str,
) -> Vec<HandlerResponse> {
    let event: QueueEvent = match serde_json::from_str(event) {
        Ok(event) => event,
        Err(e) => {
            error!(error = %e, "bad event envelope");
            return vec![HandlerResponse::invalid_request()];
        }
    };

    if event.records.is_empty() {
        warn!("event contains no records");
        return vec![HandlerResponse::invalid_request()];
    }

    let mut responses = Vec::with_capacity(event.records.len());
    for record in &event.records {
        responses.push(handle_record(provisioner, record).await);
    }
    responses
}

/// Handle one queued message
pub async fn handle_record<H: CodeHost + ?Sized>(
    provisioner: &Provisioner<'_, H>,
    record: &QueueRecord,
) -> HandlerResponse {
    let message_id = record.message_id.as_deref().unwrap_or("-");

    let request = match ProvisionRequest::from_json(&record.body, provisioner.allowed_environments())
    {
        Ok(request) => request,
        Err(e) => {
            error!(message_id, error = %e, "bad payload");
            return HandlerResponse::invalid_request();
        }
    };

    info!(
        message_id,
        db_name = %request.db_name,
        env = %request.environment,
        engine = %request.engine,
        "handling provisioning request"
    );

    match provisioner.provision(&request).await {
        Ok(ProvisionOutcome::Proposed { pull_request, .. }) => {
            HandlerResponse::new(200, format!("PR created: {}", pull_request.url))
        }
        Ok(ProvisionOutcome::AlreadyPresent {
            db_name, list_name, ..
        }) => HandlerResponse::new(200, format!("No change: {db_name} already in {list_name}")),
        Err(e) if e.status_code() == 400 => {
            error!(message_id, code = e.code(), error = %e, "rejected request");
            HandlerResponse::invalid_request()
        }
        Err(e) => {
            error!(message_id, code = e.code(), error = %e, "failed to create PR");
            HandlerResponse::new(500, "Error creating PR")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_envelope_parses() {
        let raw = r#"{"Records": [{"messageId": "m-1", "body": "{\"db_name\": \"orders\"}"}]}"#;
        let event: QueueEvent = serde_json::from_str(raw).unwrap();
        assert_eq!(event.records.len(), 1);
        assert_eq!(event.records[0].message_id.as_deref(), Some("m-1"));
        assert_eq!(event.records[0].body, r#"{"db_name": "orders"}"#);
    }

    #[test]
    fn test_response_serializes_status_code_key() {
        let response = HandlerResponse::new(200, "PR created: https://example.test/pr/1");
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["statusCode"], 200);
        assert!(response.is_success());
        assert!(!HandlerResponse::invalid_request().is_success());
    }
}
