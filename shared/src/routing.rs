//! Routing-number lookup boundary.
//!
//! The lookup service answers `GET <url>?rn=<routing number>` with a body of
//! the shape `{"code": 200, "name": "First Bank"}`. Anything other than a
//! `200` code means the number is unknown.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::LookupError;
use crate::form::Validation;

/// Status code the lookup service uses for a known routing number
pub const FOUND: u16 = 200;

/// Default lookup endpoint
pub const DEFAULT_LOOKUP_URL: &str = "https://www.routingnumbers.info/api/name.json";

/// Body returned by the lookup service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupResponse {
    pub code: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl LookupResponse {
    pub fn found(name: impl Into<String>) -> Self {
        Self {
            code: FOUND,
            name: Some(name.into()),
        }
    }

    pub fn not_found(code: u16) -> Self {
        Self { code, name: None }
    }

    /// Maps the service's answer onto a field validation.
    pub fn into_validation(self) -> Validation {
        if self.code == FOUND {
            Validation::valid_with(self.name.unwrap_or_default())
        } else {
            Validation::invalid()
        }
    }
}

/// Remote lookup keyed by the raw routing number.
///
/// The host is single threaded, so implementations are not required to be
/// `Send`.
#[async_trait(?Send)]
pub trait RoutingLookup {
    async fn lookup(&self, routing_number: &str) -> Result<LookupResponse, LookupError>;
}

/// Collapses every lookup outcome into a validation. Errors count as "no match".
pub fn interpret(result: Result<LookupResponse, LookupError>) -> Validation {
    match result {
        Ok(response) => response.into_validation(),
        Err(e) => {
            tracing::warn!("Routing number lookup failed: {}", e);
            Validation::invalid()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_found_response_is_valid_with_bank_name() {
        let validation = interpret(Ok(LookupResponse::found("First Bank")));
        assert!(validation.valid);
        assert_eq!(validation.info.as_deref(), Some("First Bank"));
    }

    #[test]
    fn test_found_without_name_has_empty_info() {
        let validation = interpret(Ok(LookupResponse {
            code: FOUND,
            name: None,
        }));
        assert!(validation.valid);
        assert_eq!(validation.info.as_deref(), Some(""));
    }

    #[test]
    fn test_not_found_response_is_invalid() {
        let validation = interpret(Ok(LookupResponse::not_found(404)));
        assert!(!validation.valid);
        assert_eq!(validation.info, None);
    }

    #[test]
    fn test_errors_collapse_to_invalid() {
        for err in [
            LookupError::Transport("offline".to_string()),
            LookupError::Status(500),
            LookupError::Parse("expected value".to_string()),
        ] {
            let validation = interpret(Err(err));
            assert!(!validation.valid);
            assert_eq!(validation.info, None);
        }
    }

    #[test]
    fn test_response_parses_with_and_without_name() {
        let found: LookupResponse =
            serde_json::from_str(r#"{"code":200,"name":"First Bank","rn":"011000015"}"#).unwrap();
        assert_eq!(found, LookupResponse::found("First Bank"));

        let missing: LookupResponse = serde_json::from_str(r#"{"code":404}"#).unwrap();
        assert_eq!(missing, LookupResponse::not_found(404));
    }
}
