use super::registry::FieldName;
use crate::routing::{self, RoutingLookup};

/// Outcome of running a validator against a value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validation {
    pub valid: bool,
    pub info: Option<String>,
}

impl Validation {
    pub fn valid() -> Self {
        Self {
            valid: true,
            info: None,
        }
    }

    pub fn valid_with(info: impl Into<String>) -> Self {
        Self {
            valid: true,
            info: Some(info.into()),
        }
    }

    pub fn invalid() -> Self {
        Self {
            valid: false,
            info: None,
        }
    }

    fn check(valid: bool) -> Self {
        if valid {
            Self::valid()
        } else {
            Self::invalid()
        }
    }
}

/// Read-only access to another field's current value.
pub trait FieldPeek {
    fn peek(&self, name: FieldName) -> Option<String>;
}

impl<F> FieldPeek for F
where
    F: Fn(FieldName) -> Option<String>,
{
    fn peek(&self, name: FieldName) -> Option<String> {
        self(name)
    }
}

/// Collaborators a validator may consult
pub struct ValidationContext<'a> {
    pub peek: &'a dyn FieldPeek,
    pub lookup: &'a dyn RoutingLookup,
}

/// Rule deciding whether a field value is acceptable.
///
/// Validators keep no state between calls; the same value and context always
/// produce the same outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validator {
    /// Trimmed value must not be empty
    NonEmpty,
    /// Character count must lie in `min..=max`
    LengthRange { min: usize, max: usize },
    /// Must equal another field's current value and be non-empty
    MatchesField(FieldName),
    /// Must be a routing number known to the lookup service
    RoutingLookup,
}

impl Validator {
    /// Whether validation goes over the network
    pub fn is_remote(&self) -> bool {
        matches!(self, Validator::RoutingLookup)
    }

    pub async fn validate(&self, value: &str, ctx: &ValidationContext<'_>) -> Validation {
        match *self {
            Validator::NonEmpty => Validation::check(!value.trim().is_empty()),
            Validator::LengthRange { min, max } => {
                let len = value.chars().count();
                Validation::check(len >= min && len <= max)
            }
            Validator::MatchesField(other) => {
                if value.is_empty() {
                    return Validation::invalid();
                }
                // Compared against what the other field holds right now.
                let current = ctx.peek.peek(other).unwrap_or_default();
                Validation::check(current == value)
            }
            Validator::RoutingLookup => {
                if value.is_empty() {
                    return Validation::invalid();
                }
                tracing::debug!("Looking up routing number {}", value);
                routing::interpret(ctx.lookup.lookup(value).await)
            }
        }
    }
}
