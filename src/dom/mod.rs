use crate::error::TooltipError;
use crate::position::{LayoutProbe, Rect, ScrollEvents, ScrollSubscription};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

pub fn window() -> Result<web_sys::Window, TooltipError> {
    web_sys::window().ok_or(TooltipError::NoWindow)
}

pub fn document() -> Result<web_sys::Document, TooltipError> {
    window()?.document().ok_or(TooltipError::NoDocument)
}

pub fn body() -> Result<web_sys::HtmlElement, TooltipError> {
    document()?.body().ok_or(TooltipError::NoBody)
}

/// The input element a tooltip is anchored to.
#[derive(Clone)]
pub struct DomAnchor {
    element: web_sys::HtmlElement,
}

impl DomAnchor {
    pub fn new(element: web_sys::HtmlElement) -> Self {
        Self { element }
    }
}

impl LayoutProbe for DomAnchor {
    fn anchor_rect(&self) -> Rect {
        let r = self.element.get_bounding_client_rect();
        Rect {
            left: r.left(),
            top: r.top(),
            client_height: self.element.client_height() as f64,
        }
    }

    fn anchor_is_topmost_at(&self, x: f64, y: f64) -> bool {
        let document = match document() {
            Ok(d) => d,
            Err(err) => {
                log::warn!("occlusion probe skipped: {err}");
                return true;
            }
        };

        let anchor: &web_sys::Node = self.element.as_ref();
        match document.element_from_point(x as f32, y as f32) {
            Some(topmost) => topmost.is_same_node(Some(anchor)),
            // Point is outside the viewport.
            None => false,
        }
    }
}

/// Scroll events anywhere in the document, captured on the way down.
#[derive(Clone, Copy, Debug, Default)]
pub struct DocumentScroll;

impl ScrollEvents for DocumentScroll {
    fn subscribe(&self, mut listener: Box<dyn FnMut()>) -> Result<ScrollSubscription, TooltipError> {
        let document = document()?;
        let closure = Closure::<dyn FnMut(web_sys::Event)>::new(move |_ev: web_sys::Event| listener());

        document.add_event_listener_with_callback_and_bool(
            "scroll",
            closure.as_ref().unchecked_ref(),
            true,
        )?;

        Ok(ScrollSubscription::new(move || {
            let _ = document.remove_event_listener_with_callback_and_bool(
                "scroll",
                closure.as_ref().unchecked_ref(),
                true,
            );
        }))
    }
}
