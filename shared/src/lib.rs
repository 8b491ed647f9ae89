//! Platform-independent core of the payments portal.
//!
//! The payment form's validation engine lives in [`form`]; the remote
//! routing-number lookup contract in [`routing`]; the calendar page's data
//! model and sign-in polling in [`calendar`].

pub mod calendar;
pub mod config;
pub mod error;
pub mod form;
pub mod routing;
