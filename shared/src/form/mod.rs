//! Asynchronous field-validation engine for the payment form.
//!
//! Fields are declared once in [`registry::FIELDS`]. Every field carries a
//! [`FieldState`] in the [`FormStore`]; edits only touch the value, a blur
//! starts that field's [`Validator`] and its resolution sets the invalid flag
//! and info line. [`is_submittable`] derives whether the form may be sent.

pub mod aggregate;
pub mod registry;
pub mod session;
pub mod store;
pub mod validators;

pub use aggregate::{is_submittable, submit, PaymentDetails, SubmitOutcome, SubmitSink, Submission};
pub use registry::{descriptor, FieldDescriptor, FieldKind, FieldName, FIELDS};
pub use session::FormSession;
pub use store::{FieldPhase, FieldState, FormStore, PendingValidation, Resolution, LOADING_INFO};
pub use validators::{FieldPeek, Validation, ValidationContext, Validator};
