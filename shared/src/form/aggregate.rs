use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use validator::Validate;

use super::registry::FieldName;
use super::store::{FieldState, FormStore};
use crate::error::FormError;

/// True when every field is valid and holds a non-blank value.
pub fn is_submittable<'a>(states: impl IntoIterator<Item = &'a FieldState>) -> bool {
    states.into_iter().all(FieldState::is_complete)
}

/// Values of every field at the moment a submission was accepted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Submission(BTreeMap<FieldName, String>);

impl Submission {
    pub fn from_store(store: &FormStore) -> Self {
        Self(
            store
                .iter()
                .map(|(name, state)| (name, state.value.clone()))
                .collect(),
        )
    }

    pub fn get(&self, name: FieldName) -> Option<&str> {
        self.0.get(&name).map(String::as_str)
    }

    pub fn values(&self) -> &BTreeMap<FieldName, String> {
        &self.0
    }

    pub fn to_json(&self) -> Result<String, FormError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Re-checks the snapshot against the payment-details rules.
    pub fn to_details(&self) -> Result<PaymentDetails, FormError> {
        let value = |name: FieldName| self.get(name).unwrap_or_default().to_string();
        let details = PaymentDetails {
            customer_name: value(FieldName::CustomerName),
            routing_number: value(FieldName::RoutingNumber),
            bank_account: value(FieldName::BankAccount),
            re_bank_account: value(FieldName::ReBankAccount),
            account_nickname: value(FieldName::AccountNickname),
        };
        details.validate()?;
        Ok(details)
    }
}

/// Typed bank-account record built from an accepted submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PaymentDetails {
    #[validate(length(min = 1))]
    pub customer_name: String,

    #[validate(length(min = 1))]
    pub routing_number: String,

    #[validate(length(min = 5, max = 17))]
    pub bank_account: String,

    #[validate(must_match = "bank_account")]
    pub re_bank_account: String,

    #[validate(length(min = 1))]
    pub account_nickname: String,
}

/// Receives accepted submissions
pub trait SubmitSink {
    fn accept(&self, submission: &Submission);
}

impl<F> SubmitSink for F
where
    F: Fn(&Submission),
{
    fn accept(&self, submission: &Submission) {
        self(submission)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Accepted(Submission),
    Rejected,
}

/// Hands the current values to `sink` if the form is submittable.
///
/// This check is authoritative even when the UI has already disabled its
/// submit control.
pub fn submit(store: &FormStore, sink: &dyn SubmitSink) -> SubmitOutcome {
    if !is_submittable(store.states()) {
        tracing::debug!("Submit ignored, form has invalid or empty fields");
        return SubmitOutcome::Rejected;
    }

    let submission = Submission::from_store(store);
    sink.accept(&submission);
    tracing::info!("Submission accepted");
    SubmitOutcome::Accepted(submission)
}
