use std::collections::BTreeMap;
use std::ops::Index;

use super::registry::{descriptor, FieldName, FIELDS};
use super::validators::{FieldPeek, Validation};

/// Info line shown while the remote lookup is in flight
pub const LOADING_INFO: &str = "Loading...";

/// Where a field is in its edit/validate cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldPhase {
    #[default]
    Pristine,
    Editing,
    Validating,
    Valid,
    Invalid,
}

/// Runtime state of one field
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldState {
    pub value: String,
    pub is_invalid: bool,
    pub info: String,
    pub phase: FieldPhase,
    /// Number of blurs issued for this field
    pub generation: u64,
}

impl FieldState {
    /// Whether this field counts towards a submittable form
    pub fn is_complete(&self) -> bool {
        !self.is_invalid && !self.value.trim().is_empty()
    }
}

/// A validator run started by a blur. Hand it back with the result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingValidation {
    pub field: FieldName,
    pub generation: u64,
    pub value: String,
}

/// What happened to a validator result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// The field state was updated
    Applied,
    /// A newer blur superseded this run; the result was dropped
    Stale,
    /// The form was torn down before the run settled
    Detached,
}

/// Per-field state for the whole form, seeded from the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormStore {
    fields: BTreeMap<FieldName, FieldState>,
}

impl Default for FormStore {
    fn default() -> Self {
        Self::new()
    }
}

impl FormStore {
    pub fn new() -> Self {
        let fields = FIELDS.iter().fold(BTreeMap::new(), |mut fields, d| {
            fields.insert(d.name, FieldState::default());
            fields
        });
        Self { fields }
    }

    pub fn field(&self, name: FieldName) -> &FieldState {
        &self[name]
    }

    pub fn value(&self, name: FieldName) -> &str {
        &self[name].value
    }

    /// Field states in registry order
    pub fn iter(&self) -> impl Iterator<Item = (FieldName, &FieldState)> {
        self.fields.iter().map(|(name, state)| (*name, state))
    }

    pub fn states(&self) -> impl Iterator<Item = &FieldState> {
        self.fields.values()
    }

    fn field_mut(&mut self, name: FieldName) -> &mut FieldState {
        self.fields.entry(name).or_default()
    }

    /// Records a keystroke. Validity and info are left alone.
    pub fn on_change(&mut self, name: FieldName, value: impl Into<String>) {
        let state = self.field_mut(name);
        state.value = value.into();
        state.phase = FieldPhase::Editing;
    }

    /// Starts validating a field that lost focus.
    pub fn on_blur(&mut self, name: FieldName) -> PendingValidation {
        let shows_loading = descriptor(name).shows_loading();
        let state = self.field_mut(name);
        state.is_invalid = false;
        if shows_loading {
            state.info = LOADING_INFO.to_string();
        }
        state.phase = FieldPhase::Validating;
        state.generation += 1;

        tracing::debug!("Validating {} (run {})", name, state.generation);

        PendingValidation {
            field: name,
            generation: state.generation,
            value: state.value.clone(),
        }
    }

    /// Applies a validator result unless a later blur has superseded it.
    pub fn on_validator_resolved(
        &mut self,
        pending: &PendingValidation,
        outcome: Validation,
    ) -> Resolution {
        let state = self.field_mut(pending.field);
        if state.generation != pending.generation {
            tracing::debug!(
                "Dropping stale result for {} (run {}, latest {})",
                pending.field,
                pending.generation,
                state.generation
            );
            return Resolution::Stale;
        }

        if outcome.valid {
            state.is_invalid = false;
            state.info = outcome.info.unwrap_or_default();
            state.phase = FieldPhase::Valid;
        } else {
            state.is_invalid = true;
            state.info.clear();
            state.phase = FieldPhase::Invalid;
        }
        Resolution::Applied
    }
}

impl Index<FieldName> for FormStore {
    type Output = FieldState;

    /// Every field is seeded at construction, so lookups cannot miss.
    fn index(&self, name: FieldName) -> &FieldState {
        &self.fields[&name]
    }
}

impl FieldPeek for FormStore {
    fn peek(&self, name: FieldName) -> Option<String> {
        self.fields.get(&name).map(|state| state.value.clone())
    }
}
