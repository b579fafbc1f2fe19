//! Validation tooltips for form fields.
//!
//! A field wearing the tooltip shows a small bubble with the message for its
//! first validation error once the user has changed or left the field, and
//! hides it again when the field becomes valid or loses focus.
//!
//! The show/hide decision ([`observer`]) runs against traits for the overlay
//! ([`overlay`]) and the page geometry ([`position`]); [`dom`] and
//! [`components`] provide the browser and Leptos implementations.

pub mod components;
pub mod config;
pub mod dom;
pub mod error;
pub mod forms;
pub mod logging;
pub mod observer;
pub mod overlay;
pub mod position;
pub mod validation;

#[cfg(feature = "playground")]
pub mod playground;

pub use components::ui::{DomInvalidTooltip, LeptosOverlayFactory, ValidatedInput, ValidationTooltip};
pub use config::TooltipOptions;
pub use error::TooltipError;
pub use forms::{ControlSnapshot, ControlStatus, FormControl, Subscription, Validator};
pub use observer::{InvalidTooltip, TooltipState};
pub use overlay::{OverlayFactory, OverlayHandle, TooltipProps};
pub use position::{LayoutProbe, PositionTracker, Rect, ScrollEvents, ScrollSubscription};
pub use validation::{ErrorMessageMap, ValidationState};

// Needed for `#[wasm_bindgen(start)]` on the wasm entrypoint.
#[cfg(all(feature = "playground", target_arch = "wasm32", not(test)))]
use wasm_bindgen::prelude::wasm_bindgen;

// Only register the WASM start function for normal builds (not for tests),
// otherwise wasm-bindgen-test will end up with multiple entry symbols.
#[cfg(feature = "playground")]
#[cfg_attr(all(target_arch = "wasm32", not(test)), wasm_bindgen(start))]
pub fn main() {
    console_error_panic_hook::set_once();
    if let Err(err) = logging::init(log::LevelFilter::Debug) {
        web_sys::console::warn_1(&err.to_string().into());
    }
    leptos::mount::mount_to_body(playground::Playground);
}
