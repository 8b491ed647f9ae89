//! Error types shared by the form engine and its collaborators.
//!
//! None of these reach the user as a fault: lookup errors are downgraded to an
//! invalid field, calendar errors are logged and leave the list empty.

use thiserror::Error;

/// Failure of the remote routing-number lookup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    /// The request never produced a response
    #[error("Lookup request failed: {0}")]
    Transport(String),

    /// The service answered with a non-success HTTP status
    #[error("Lookup service returned HTTP {0}")]
    Status(u16),

    /// The response body was not a lookup record
    #[error("Failed to parse lookup response: {0}")]
    Parse(String),
}

/// Failure while talking to the calendar service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalendarError {
    /// No access token is available yet
    #[error("Not signed in")]
    NotAuthenticated,

    #[error("Calendar request failed: {0}")]
    Transport(String),

    #[error("Calendar service returned HTTP {0}")]
    Status(u16),

    #[error("Failed to parse calendar response: {0}")]
    Parse(String),
}

/// Failure converting an accepted submission into payment details.
#[derive(Debug, Error)]
pub enum FormError {
    /// A submitted value broke a payment-details rule
    #[error("Invalid payment details: {0}")]
    Invalid(#[from] validator::ValidationErrors),

    #[error("Failed to serialize submission: {0}")]
    Serialize(#[from] serde_json::Error),
}
