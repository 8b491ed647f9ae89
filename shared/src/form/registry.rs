use serde::{Deserialize, Serialize};
use std::fmt;

use super::validators::Validator;

/// Key of a payment form field. Ordering follows the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldName {
    CustomerName,
    RoutingNumber,
    BankAccount,
    ReBankAccount,
    AccountNickname,
}

impl FieldName {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldName::CustomerName => "customerName",
            FieldName::RoutingNumber => "routingNumber",
            FieldName::BankAccount => "bankAccount",
            FieldName::ReBankAccount => "reBankAccount",
            FieldName::AccountNickname => "accountNickname",
        }
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Input kind rendered for a field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Number,
}

impl FieldKind {
    /// HTML `type` attribute for the input element
    pub fn input_type(&self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Number => "number",
        }
    }
}

/// Static configuration of one form input
#[derive(Debug, PartialEq)]
pub struct FieldDescriptor {
    pub name: FieldName,
    pub label: &'static str,
    pub error_message: &'static str,
    pub kind: FieldKind,
    pub validator: Validator,
}

impl FieldDescriptor {
    /// Whether a blur should show the loading placeholder until the validator settles.
    pub fn shows_loading(&self) -> bool {
        self.validator.is_remote()
    }
}

/// Every field of the payment form, in render order.
pub static FIELDS: [FieldDescriptor; 5] = [
    FieldDescriptor {
        name: FieldName::CustomerName,
        label: "Customer Name",
        error_message: "Customer Name is mandatory.",
        kind: FieldKind::Text,
        validator: Validator::NonEmpty,
    },
    FieldDescriptor {
        name: FieldName::RoutingNumber,
        label: "Routing Number",
        error_message: "Not a valid Routing Number.",
        kind: FieldKind::Text,
        validator: Validator::RoutingLookup,
    },
    FieldDescriptor {
        name: FieldName::BankAccount,
        label: "Bank Account",
        error_message:
            "Invalid Bank Account Number. Account Number length should be in the range 5 to 17",
        kind: FieldKind::Number,
        validator: Validator::LengthRange { min: 5, max: 17 },
    },
    FieldDescriptor {
        name: FieldName::ReBankAccount,
        label: "Re-enter Bank Account",
        error_message: "Mismatch in Bank Account Number.",
        kind: FieldKind::Number,
        validator: Validator::MatchesField(FieldName::BankAccount),
    },
    FieldDescriptor {
        name: FieldName::AccountNickname,
        label: "Account Nickname",
        error_message: "Account Nickname is mandatory.",
        kind: FieldKind::Text,
        validator: Validator::NonEmpty,
    },
];

/// Looks up the descriptor for a field.
pub fn descriptor(name: FieldName) -> &'static FieldDescriptor {
    match name {
        FieldName::CustomerName => &FIELDS[0],
        FieldName::RoutingNumber => &FIELDS[1],
        FieldName::BankAccount => &FIELDS[2],
        FieldName::ReBankAccount => &FIELDS[3],
        FieldName::AccountNickname => &FIELDS[4],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_names_are_unique() {
        let names: HashSet<FieldName> = FIELDS.iter().map(|d| d.name).collect();
        assert_eq!(names.len(), FIELDS.len());
    }

    #[test]
    fn test_descriptor_matches_registry_slot() {
        for field in FIELDS.iter() {
            assert_eq!(descriptor(field.name), field);
        }
    }

    #[test]
    fn test_registry_order_matches_name_order() {
        let names: Vec<FieldName> = FIELDS.iter().map(|d| d.name).collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
    }

    #[test]
    fn test_only_routing_number_shows_loading() {
        let loading: Vec<FieldName> = FIELDS
            .iter()
            .filter(|d| d.shows_loading())
            .map(|d| d.name)
            .collect();
        assert_eq!(loading, vec![FieldName::RoutingNumber]);
    }

    #[test]
    fn test_name_serializes_camel_case() {
        let json = serde_json::to_string(&FieldName::ReBankAccount).unwrap();
        assert_eq!(json, r#""reBankAccount""#);
        assert_eq!(FieldName::ReBankAccount.to_string(), "reBankAccount");
    }
}
