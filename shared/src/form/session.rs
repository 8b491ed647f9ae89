//! Async driver tying the store, the validators and the UI together.
//!
//! A [`FormSession`] is owned by the mounted form. Validator runs only keep a
//! weak handle to its store, so a run that settles after the form is gone
//! changes nothing.

use std::cell::RefCell;
use std::future::Future;
use std::rc::{Rc, Weak};

use super::aggregate::{self, SubmitOutcome, SubmitSink};
use super::registry::{descriptor, FieldName};
use super::store::{FieldState, FormStore, Resolution};
use super::validators::{FieldPeek, ValidationContext};
use crate::routing::RoutingLookup;

type Listener = Rc<dyn Fn()>;

/// Reads another field through the live store at validation time.
struct LivePeek(Weak<RefCell<FormStore>>);

impl FieldPeek for LivePeek {
    fn peek(&self, name: FieldName) -> Option<String> {
        let store = self.0.upgrade()?;
        let value = store.borrow().peek(name);
        value
    }
}

pub struct FormSession {
    store: Rc<RefCell<FormStore>>,
    lookup: Rc<dyn RoutingLookup>,
    listener: Option<Listener>,
}

impl FormSession {
    pub fn new(lookup: Rc<dyn RoutingLookup>) -> Self {
        Self {
            store: Rc::new(RefCell::new(FormStore::new())),
            lookup,
            listener: None,
        }
    }

    /// Registers a callback run after every store mutation.
    pub fn with_listener(mut self, listener: impl Fn() + 'static) -> Self {
        self.listener = Some(Rc::new(listener));
        self
    }

    pub fn field(&self, name: FieldName) -> FieldState {
        self.store.borrow().field(name).clone()
    }

    /// Copy of the whole store
    pub fn snapshot(&self) -> FormStore {
        self.store.borrow().clone()
    }

    pub fn is_submittable(&self) -> bool {
        aggregate::is_submittable(self.store.borrow().states())
    }

    pub fn change(&self, name: FieldName, value: impl Into<String>) {
        self.store.borrow_mut().on_change(name, value);
        notify(&self.listener);
    }

    /// Marks `name` as validating and returns the validator run.
    ///
    /// The returned future owns everything it needs and may be spawned on the
    /// local executor. Dropping it leaves the field in the validating phase.
    pub fn blur(&self, name: FieldName) -> impl Future<Output = Resolution> + 'static {
        let pending = self.store.borrow_mut().on_blur(name);
        notify(&self.listener);

        let store = Rc::downgrade(&self.store);
        let lookup = Rc::clone(&self.lookup);
        let listener = self.listener.clone();

        async move {
            let peek = LivePeek(store.clone());
            let ctx = ValidationContext {
                peek: &peek,
                lookup: lookup.as_ref(),
            };
            let outcome = descriptor(pending.field)
                .validator
                .validate(&pending.value, &ctx)
                .await;

            let Some(store) = store.upgrade() else {
                tracing::debug!("Form gone before {} finished validating", pending.field);
                return Resolution::Detached;
            };
            let resolution = store.borrow_mut().on_validator_resolved(&pending, outcome);
            if resolution == Resolution::Applied {
                notify(&listener);
            }
            resolution
        }
    }

    pub fn submit(&self, sink: &dyn SubmitSink) -> SubmitOutcome {
        let store = self.store.borrow();
        aggregate::submit(&store, sink)
    }
}

fn notify(listener: &Option<Listener>) {
    if let Some(listener) = listener {
        listener();
    }
}
