use crate::dom;
use crate::error::TooltipError;
use crate::overlay::{OverlayFactory, OverlayHandle, TooltipProps};
use leptos::mount::{mount_to, UnmountHandle};
use leptos::prelude::*;
use leptos::tachys::view::any_view::AnyViewState;
use tw_merge::tw_merge;
use wasm_bindgen::JsCast;

const BUBBLE_CLASSES: &str = "fixed z-[1000000] py-1.5 px-2.5 max-w-xs text-xs rounded-md shadow-lg pointer-events-none whitespace-normal transition-opacity duration-150 text-destructive-foreground bg-destructive/90";
const ARROW_CLASSES: &str = "absolute bottom-full left-2 bg-transparent border-transparent border-6 border-b-destructive/90";

/// Reactive backing store for one tooltip bubble.
#[derive(Clone, Copy)]
pub struct TooltipSignals {
    pub x: RwSignal<f64>,
    pub y: RwSignal<f64>,
    pub message: RwSignal<String>,
    pub hidden: RwSignal<bool>,
}

impl TooltipSignals {
    pub fn new(props: &TooltipProps) -> Self {
        Self {
            x: RwSignal::new(props.x),
            y: RwSignal::new(props.y),
            message: RwSignal::new(props.message.clone()),
            hidden: RwSignal::new(props.hidden),
        }
    }

    pub fn props(&self) -> TooltipProps {
        TooltipProps {
            x: self.x.get_untracked(),
            y: self.y.get_untracked(),
            message: self.message.get_untracked(),
            hidden: self.hidden.get_untracked(),
        }
    }

    fn dispose(self) {
        self.x.dispose();
        self.y.dispose();
        self.message.dispose();
        self.hidden.dispose();
    }
}

/// The floating bubble. Positioned in viewport coordinates; `hidden` keeps
/// its layout but makes it invisible.
#[component]
pub fn ValidationTooltip(
    signals: TooltipSignals,
    #[prop(into, optional)] id: String,
    #[prop(into, optional)] class: String,
) -> impl IntoView {
    let bubble_class = tw_merge!(BUBBLE_CLASSES, class);
    let class = move || {
        if signals.hidden.get() {
            format!("{bubble_class} invisible")
        } else {
            bubble_class.clone()
        }
    };
    let style = move || format!("left: {}px; top: {}px;", signals.x.get(), signals.y.get());

    view! {
        <div
            data-name="ValidationTooltip"
            role="tooltip"
            id=id
            class=class
            style=style
            aria-hidden=move || signals.hidden.get().to_string()
        >
            <div data-name="ValidationTooltipArrow" class=ARROW_CLASSES />
            {move || signals.message.get()}
        </div>
    }
}

/// Mounts [`ValidationTooltip`] into a fresh container at the end of `body`.
#[derive(Clone, Debug, Default)]
pub struct LeptosOverlayFactory {
    id: String,
    class: String,
}

impl LeptosOverlayFactory {
    pub fn new(id: impl Into<String>, class: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            class: class.into(),
        }
    }
}

impl OverlayFactory for LeptosOverlayFactory {
    type Handle = LeptosOverlay;

    fn create(&self, props: TooltipProps) -> Result<LeptosOverlay, TooltipError> {
        let document = dom::document()?;
        let body = dom::body()?;

        let container = document.create_element("div")?;
        container.set_attribute("data-name", "ValidationTooltipHost")?;
        body.append_child(&container)?;

        let signals = TooltipSignals::new(&props);
        let id = self.id.clone();
        let class = self.class.clone();
        let mount = mount_to(container.clone().unchecked_into(), move || {
            view! { <ValidationTooltip signals=signals id=id class=class /> }.into_any()
        });

        Ok(LeptosOverlay {
            signals,
            container: Some(container),
            mount: Some(mount),
        })
    }
}

pub struct LeptosOverlay {
    signals: TooltipSignals,
    container: Option<web_sys::Element>,
    mount: Option<UnmountHandle<AnyViewState>>,
}

impl OverlayHandle for LeptosOverlay {
    fn props(&self) -> TooltipProps {
        self.signals.props()
    }

    fn set_position(&mut self, x: f64, y: f64) {
        self.signals.x.set(x);
        self.signals.y.set(y);
    }

    fn set_hidden(&mut self, hidden: bool) {
        self.signals.hidden.set(hidden);
    }

    fn destroy(&mut self) {
        // Unmount before the signals the view reads are disposed.
        drop(self.mount.take());
        if let Some(container) = self.container.take() {
            container.remove();
            self.signals.dispose();
        }
    }
}

impl Drop for LeptosOverlay {
    fn drop(&mut self) {
        self.destroy();
    }
}
