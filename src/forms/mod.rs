//! A small reactive form control: value, interaction flags, validators and a
//! status-change notification list. This is the collaborator the tooltip
//! observes; any host form layer that can produce a [`ControlSnapshot`] and
//! call back on status changes can stand in for it.

mod validators;

pub use validators::Validator;

use serde_json::Value;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::{Rc, Weak};

/// error code -> payload, ordered by code.
pub type ValidationErrors = BTreeMap<String, Value>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "UPPERCASE")]
pub enum ControlStatus {
    Valid,
    Invalid,
}

/// The control's interaction and validation flags at one instant.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ControlSnapshot {
    pub dirty: bool,
    pub touched: bool,
    pub invalid: bool,
    pub errors: ValidationErrors,
}

struct ControlInner {
    value: String,
    dirty: bool,
    touched: bool,
    validators: Vec<Validator>,
    errors: ValidationErrors,
}

impl ControlInner {
    fn revalidate(&mut self) {
        self.errors = validators::run_all(&self.validators, &self.value);
    }

    fn status(&self) -> ControlStatus {
        if self.errors.is_empty() {
            ControlStatus::Valid
        } else {
            ControlStatus::Invalid
        }
    }
}

type StatusListener = Rc<dyn Fn(ControlStatus)>;

#[derive(Default)]
struct Listeners {
    next_id: u64,
    entries: Vec<(u64, StatusListener)>,
}

/// Shared handle to one form control. Clones observe and mutate the same
/// control.
#[derive(Clone)]
pub struct FormControl {
    inner: Rc<RefCell<ControlInner>>,
    listeners: Rc<RefCell<Listeners>>,
}

impl FormControl {
    pub fn new(initial: impl Into<String>, validators: Vec<Validator>) -> Self {
        let mut inner = ControlInner {
            value: initial.into(),
            dirty: false,
            touched: false,
            validators,
            errors: ValidationErrors::new(),
        };
        inner.revalidate();

        Self {
            inner: Rc::new(RefCell::new(inner)),
            listeners: Rc::new(RefCell::new(Listeners::default())),
        }
    }

    pub fn value(&self) -> String {
        self.inner.borrow().value.clone()
    }

    pub fn status(&self) -> ControlStatus {
        self.inner.borrow().status()
    }

    pub fn errors(&self) -> ValidationErrors {
        self.inner.borrow().errors.clone()
    }

    pub fn snapshot(&self) -> ControlSnapshot {
        let inner = self.inner.borrow();
        ControlSnapshot {
            dirty: inner.dirty,
            touched: inner.touched,
            invalid: inner.status() == ControlStatus::Invalid,
            errors: inner.errors.clone(),
        }
    }

    /// Programmatic change. Does not mark the control dirty.
    pub fn set_value(&self, value: impl Into<String>) {
        {
            let mut inner = self.inner.borrow_mut();
            inner.value = value.into();
            inner.revalidate();
        }
        self.emit();
    }

    /// Change coming from the user.
    pub fn input(&self, value: impl Into<String>) {
        self.inner.borrow_mut().dirty = true;
        self.set_value(value);
    }

    /// Does not emit a status change.
    pub fn mark_as_touched(&self) {
        self.inner.borrow_mut().touched = true;
    }

    pub fn reset(&self, value: impl Into<String>) {
        {
            let mut inner = self.inner.borrow_mut();
            inner.value = value.into();
            inner.dirty = false;
            inner.touched = false;
            inner.revalidate();
        }
        self.emit();
    }

    /// Registers `listener` for status notifications until the returned
    /// [`Subscription`] is dropped.
    pub fn status_changes(&self, listener: impl Fn(ControlStatus) + 'static) -> Subscription {
        let mut listeners = self.listeners.borrow_mut();
        let id = listeners.next_id;
        listeners.next_id += 1;
        listeners.entries.push((id, Rc::new(listener)));

        Subscription {
            id,
            listeners: Rc::downgrade(&self.listeners),
        }
    }

    pub fn downgrade(&self) -> WeakFormControl {
        WeakFormControl {
            inner: Rc::downgrade(&self.inner),
            listeners: Rc::downgrade(&self.listeners),
        }
    }

    #[cfg(test)]
    pub(crate) fn listener_count(&self) -> usize {
        self.listeners.borrow().entries.len()
    }

    fn emit(&self) {
        let status = self.status();
        // Snapshot the list so listeners may (un)subscribe or read the control.
        let entries: Vec<StatusListener> = self
            .listeners
            .borrow()
            .entries
            .iter()
            .map(|(_, l)| Rc::clone(l))
            .collect();
        for listener in entries {
            listener(status);
        }
    }
}

/// Non-owning reference to a [`FormControl`], for listeners that must not
/// keep the control alive.
#[derive(Clone)]
pub struct WeakFormControl {
    inner: Weak<RefCell<ControlInner>>,
    listeners: Weak<RefCell<Listeners>>,
}

impl WeakFormControl {
    pub fn upgrade(&self) -> Option<FormControl> {
        Some(FormControl {
            inner: self.inner.upgrade()?,
            listeners: self.listeners.upgrade()?,
        })
    }
}

/// Disposer for a status-change listener.
#[must_use = "dropping a Subscription unsubscribes the listener"]
pub struct Subscription {
    id: u64,
    listeners: Weak<RefCell<Listeners>>,
}

impl Subscription {
    pub fn unsubscribe(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(listeners) = self.listeners.upgrade() {
            listeners.borrow_mut().entries.retain(|(id, _)| *id != self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn required() -> FormControl {
        FormControl::new("", vec![Validator::Required, Validator::MinLength(3)])
    }

    #[test]
    fn test_new_control_is_pristine_and_validated() {
        let c = required();
        let s = c.snapshot();
        assert!(!s.dirty);
        assert!(!s.touched);
        assert!(s.invalid);
        assert!(s.errors.contains_key("required"));
        assert_eq!(c.status().to_string(), "INVALID");
    }

    #[test]
    fn test_input_marks_dirty_and_emits() {
        let c = required();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let seen2 = seen.clone();
        let _sub = c.status_changes(move |s| seen2.borrow_mut().push(s));

        c.input("ab");
        c.input("abc");

        assert_eq!(*seen.borrow(), vec![ControlStatus::Invalid, ControlStatus::Valid]);
        assert!(c.snapshot().dirty);
        assert_eq!(c.value(), "abc");
    }

    #[test]
    fn test_set_value_does_not_mark_dirty() {
        let c = required();
        c.set_value("abcd");
        assert!(!c.snapshot().dirty);
        assert_eq!(c.status(), ControlStatus::Valid);
    }

    #[test]
    fn test_mark_as_touched_is_silent() {
        let c = required();
        let count = Rc::new(Cell::new(0));
        let count2 = count.clone();
        let _sub = c.status_changes(move |_| count2.set(count2.get() + 1));

        c.mark_as_touched();
        assert!(c.snapshot().touched);
        assert_eq!(count.get(), 0);
    }

    #[test]
    fn test_reset_clears_flags() {
        let c = required();
        c.input("x");
        c.mark_as_touched();
        c.reset("");
        let s = c.snapshot();
        assert!(!s.dirty);
        assert!(!s.touched);
    }

    #[test]
    fn test_drop_subscription_unsubscribes() {
        let c = required();
        let count = Rc::new(Cell::new(0));
        let count2 = count.clone();
        let sub = c.status_changes(move |_| count2.set(count2.get() + 1));
        assert_eq!(c.listener_count(), 1);

        c.input("a");
        sub.unsubscribe();
        c.input("ab");

        assert_eq!(count.get(), 1);
        assert_eq!(c.listener_count(), 0);
    }

    #[test]
    fn test_listener_can_read_control() {
        let c = required();
        let weak = c.downgrade();
        let last = Rc::new(RefCell::new(None));
        let last2 = last.clone();
        let _sub = c.status_changes(move |_| {
            if let Some(c) = weak.upgrade() {
                *last2.borrow_mut() = Some(c.snapshot());
            }
        });

        c.input("ab");
        let snap = last.borrow().clone().expect("listener should have run");
        assert!(snap.errors.contains_key("minlength"));
    }

    #[test]
    fn test_weak_control_does_not_keep_alive() {
        let c = required();
        let weak = c.downgrade();
        drop(c);
        assert!(weak.upgrade().is_none());
    }
}
