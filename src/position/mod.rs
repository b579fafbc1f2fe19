use crate::config::TooltipOptions;
use crate::error::TooltipError;
use crate::overlay::OverlayHandle;
use std::rc::Rc;

/// The parts of the anchor's layout box the tracker reads.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub client_height: f64,
}

/// Geometry queries against the anchored input.
pub trait LayoutProbe {
    fn anchor_rect(&self) -> Rect;

    /// Whether the anchor itself is the topmost element at the viewport point.
    fn anchor_is_topmost_at(&self, x: f64, y: f64) -> bool;
}

/// Capturing-phase scroll notifications for the whole document, so that
/// scrolling any ancestor of the anchor is seen.
pub trait ScrollEvents {
    fn subscribe(&self, listener: Box<dyn FnMut()>) -> Result<ScrollSubscription, TooltipError>;
}

/// Removes its scroll listener on [`cancel`](Self::cancel) or drop.
#[must_use = "dropping a ScrollSubscription removes the listener"]
pub struct ScrollSubscription {
    dispose: Option<Box<dyn FnOnce()>>,
}

impl ScrollSubscription {
    pub fn new(dispose: impl FnOnce() + 'static) -> Self {
        Self {
            dispose: Some(Box::new(dispose)),
        }
    }

    pub fn cancel(self) {}
}

impl Drop for ScrollSubscription {
    fn drop(&mut self) {
        if let Some(dispose) = self.dispose.take() {
            dispose();
        }
    }
}

/// Tooltip origin: just inside the anchor's bottom-left corner.
pub fn compute_position(rect: Rect, options: &TooltipOptions) -> (f64, f64) {
    let x = rect.left + options.anchor_offset;
    let y = rect.top + rect.client_height - options.anchor_offset;
    (x, y)
}

/// True when something else covers the anchor's top-left corner.
pub fn compute_hidden(probe: &impl LayoutProbe, options: &TooltipOptions) -> bool {
    let rect = probe.anchor_rect();
    let x = rect.left + options.probe_inset;
    let y = rect.top + options.probe_inset;
    !probe.anchor_is_topmost_at(x, y)
}

/// Keeps an overlay aligned with its anchor.
pub struct PositionTracker<P> {
    probe: Rc<P>,
    options: Rc<TooltipOptions>,
}

impl<P> Clone for PositionTracker<P> {
    fn clone(&self) -> Self {
        Self {
            probe: Rc::clone(&self.probe),
            options: Rc::clone(&self.options),
        }
    }
}

impl<P: LayoutProbe> PositionTracker<P> {
    pub fn new(probe: P, options: TooltipOptions) -> Self {
        Self {
            probe: Rc::new(probe),
            options: Rc::new(options),
        }
    }

    pub fn adjust_position<H: OverlayHandle + ?Sized>(&self, overlay: &mut H) {
        let (x, y) = compute_position(self.probe.anchor_rect(), &self.options);
        overlay.set_position(x, y);
    }

    pub fn adjust_hidden<H: OverlayHandle + ?Sized>(&self, overlay: &mut H) {
        overlay.set_hidden(compute_hidden(&*self.probe, &self.options));
    }

    /// Scroll handler body.
    pub fn refresh<H: OverlayHandle + ?Sized>(&self, overlay: &mut H) {
        self.adjust_position(overlay);
        self.adjust_hidden(overlay);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overlay::TooltipProps;
    use std::cell::Cell;

    struct Probe {
        rect: Rect,
        // viewport rectangle of a covering element, if any
        cover: Option<(f64, f64, f64, f64)>,
    }

    impl LayoutProbe for Probe {
        fn anchor_rect(&self) -> Rect {
            self.rect
        }

        fn anchor_is_topmost_at(&self, x: f64, y: f64) -> bool {
            match self.cover {
                Some((l, t, w, h)) => !(x >= l && x < l + w && y >= t && y < t + h),
                None => true,
            }
        }
    }

    #[derive(Default)]
    struct Overlay(TooltipProps);

    impl OverlayHandle for Overlay {
        fn props(&self) -> TooltipProps {
            self.0.clone()
        }
        fn set_position(&mut self, x: f64, y: f64) {
            self.0.x = x;
            self.0.y = y;
        }
        fn set_hidden(&mut self, hidden: bool) {
            self.0.hidden = hidden;
        }
        fn destroy(&mut self) {}
    }

    const RECT: Rect = Rect {
        left: 40.0,
        top: 100.0,
        client_height: 32.0,
    };

    #[test]
    fn test_compute_position_uses_fixed_offset() {
        let (x, y) = compute_position(RECT, &TooltipOptions::default());
        assert_eq!(x, 50.0);
        assert_eq!(y, 122.0);
    }

    #[test]
    fn test_compute_hidden_probes_inside_corner() {
        let options = TooltipOptions::default();
        let uncovered = Probe { rect: RECT, cover: None };
        assert!(!compute_hidden(&uncovered, &options));

        // Covers exactly (41, 101), the probe point.
        let covered = Probe { rect: RECT, cover: Some((41.0, 101.0, 1.0, 1.0)) };
        assert!(compute_hidden(&covered, &options));

        // Covers the corner pixel only, not the probe point.
        let corner = Probe { rect: RECT, cover: Some((40.0, 100.0, 1.0, 1.0)) };
        assert!(!compute_hidden(&corner, &options));
    }

    #[test]
    fn test_refresh_updates_position_and_hidden() {
        let tracker = PositionTracker::new(
            Probe { rect: RECT, cover: Some((0.0, 0.0, 500.0, 500.0)) },
            TooltipOptions::default(),
        );
        let mut overlay = Overlay::default();
        tracker.refresh(&mut overlay);
        assert_eq!(overlay.props().x, 50.0);
        assert!(overlay.props().hidden);
    }

    #[test]
    fn test_subscription_disposes_once() {
        let calls = Rc::new(Cell::new(0));
        let calls2 = calls.clone();
        let sub = ScrollSubscription::new(move || calls2.set(calls2.get() + 1));
        sub.cancel();
        assert_eq!(calls.get(), 1);
    }
}
