//! Decides when a field's tooltip is shown, and for which error.
//!
//! States are `Hidden` and `Shown(code)`. A status notification or focus
//! re-evaluates the field; blur always returns to `Hidden`. At most one
//! overlay and one scroll listener are alive per field, and both are torn
//! down together.

use crate::config::TooltipOptions;
use crate::forms::{ControlSnapshot, FormControl, Subscription};
use crate::overlay::{OverlayFactory, OverlayHandle, TooltipProps};
use crate::position::{LayoutProbe, PositionTracker, ScrollEvents, ScrollSubscription};
use crate::validation::{ErrorMessageMap, ValidationState};
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TooltipState {
    /// True iff an overlay is attached to the document.
    pub is_showing: bool,
    /// Last error code evaluated while the show condition held. Recorded even
    /// when no message exists for it.
    pub current_error_code: Option<String>,
}

struct ActiveOverlay<H> {
    handle: Rc<RefCell<H>>,
    _scroll: ScrollSubscription,
}

struct Inner<F: OverlayFactory, P, S> {
    messages: ErrorMessageMap,
    factory: F,
    tracker: PositionTracker<P>,
    scroll: S,
    current_error: Option<String>,
    active: Option<ActiveOverlay<F::Handle>>,
}

impl<F, P, S> Inner<F, P, S>
where
    F: OverlayFactory,
    P: LayoutProbe + 'static,
    S: ScrollEvents,
{
    fn evaluate(&mut self, snapshot: &ControlSnapshot) {
        let Some(code) = ValidationState::new(snapshot).visible_error() else {
            self.remove_tooltip();
            self.current_error = None;
            return;
        };

        if self.current_error.as_deref() == Some(code) {
            return;
        }

        self.remove_tooltip();
        self.current_error = Some(code.to_string());

        match self.messages.get(code).map(str::to_owned) {
            Some(message) => self.add_tooltip(message),
            None => log::debug!("no tooltip message for `{code}`"),
        }
    }

    fn add_tooltip(&mut self, message: String) {
        let mut handle = match self.factory.create(TooltipProps::with_message(message)) {
            Ok(handle) => handle,
            Err(err) => {
                log::error!("failed to create tooltip: {err}");
                return;
            }
        };
        self.tracker.adjust_position(&mut handle);

        let handle = Rc::new(RefCell::new(handle));
        let weak = Rc::downgrade(&handle);
        let tracker = self.tracker.clone();
        let on_scroll = Box::new(move || {
            let Some(handle) = weak.upgrade() else {
                return;
            };
            let borrowed = handle.try_borrow_mut();
            if let Ok(mut handle) = borrowed {
                tracker.refresh(&mut *handle);
            }
        });

        match self.scroll.subscribe(on_scroll) {
            Ok(scroll) => {
                self.active = Some(ActiveOverlay {
                    handle,
                    _scroll: scroll,
                });
                log::debug!("tooltip shown for `{}`", self.current_error.as_deref().unwrap_or(""));
            }
            Err(err) => {
                log::error!("failed to track scrolling for tooltip: {err}");
                handle.borrow_mut().destroy();
            }
        }
    }

    fn remove_tooltip(&mut self) {
        if let Some(active) = self.active.take() {
            active.handle.borrow_mut().destroy();
            log::debug!("tooltip removed");
        }
    }
}

/// Tooltip controller for one form field.
///
/// Feed it notifications through [`attach`](Self::attach) (status changes),
/// [`on_focus`](Self::on_focus) and [`on_blur`](Self::on_blur). Dropping it
/// removes any visible tooltip and its listeners.
pub struct InvalidTooltip<F: OverlayFactory, P, S> {
    inner: Rc<RefCell<Inner<F, P, S>>>,
    status: RefCell<Option<Subscription>>,
}

impl<F, P, S> InvalidTooltip<F, P, S>
where
    F: OverlayFactory + 'static,
    P: LayoutProbe + 'static,
    S: ScrollEvents + 'static,
{
    pub fn new(messages: ErrorMessageMap, factory: F, probe: P, scroll: S) -> Self {
        Self::with_options(messages, factory, probe, scroll, TooltipOptions::default())
    }

    pub fn with_options(
        messages: ErrorMessageMap,
        factory: F,
        probe: P,
        scroll: S,
        options: TooltipOptions,
    ) -> Self {
        let inner = Inner {
            messages,
            factory,
            tracker: PositionTracker::new(probe, options),
            scroll,
            current_error: None,
            active: None,
        };

        Self {
            inner: Rc::new(RefCell::new(inner)),
            status: RefCell::new(None),
        }
    }

    /// Starts observing `control`'s status changes, replacing any earlier
    /// control. Neither side keeps the other alive.
    pub fn attach(&self, control: &FormControl) {
        let inner = Rc::downgrade(&self.inner);
        let weak_control = control.downgrade();

        let subscription = control.status_changes(move |_status| {
            let (Some(inner), Some(control)) = (inner.upgrade(), weak_control.upgrade()) else {
                return;
            };
            let snapshot = control.snapshot();
            let borrowed = inner.try_borrow_mut();
            if let Ok(mut inner) = borrowed {
                inner.evaluate(&snapshot);
            }
        });

        *self.status.borrow_mut() = Some(subscription);
    }

    pub fn detach(&self) {
        self.status.borrow_mut().take();
    }

    /// Runs the show/update/hide decision against `snapshot`.
    pub fn evaluate(&self, snapshot: &ControlSnapshot) {
        self.inner.borrow_mut().evaluate(snapshot);
    }

    pub fn on_focus(&self, snapshot: &ControlSnapshot) {
        self.evaluate(snapshot);
    }

    pub fn on_blur(&self) {
        let mut inner = self.inner.borrow_mut();
        inner.remove_tooltip();
        inner.current_error = None;
    }

    pub fn state(&self) -> TooltipState {
        let inner = self.inner.borrow();
        TooltipState {
            is_showing: inner.active.is_some(),
            current_error_code: inner.current_error.clone(),
        }
    }

    /// Props of the visible overlay, if any.
    pub fn overlay_props(&self) -> Option<TooltipProps> {
        let inner = self.inner.borrow();
        inner.active.as_ref().map(|a| a.handle.borrow().props())
    }
}

impl<F: OverlayFactory, P, S> Drop for InvalidTooltip<F, P, S> {
    fn drop(&mut self) {
        self.status.get_mut().take();
        if let Ok(mut inner) = self.inner.try_borrow_mut() {
            if let Some(active) = inner.active.take() {
                active.handle.borrow_mut().destroy();
            }
        }
    }
}
