use crate::components::hooks::use_tooltip_id;
use crate::components::ui::LeptosOverlayFactory;
use crate::config::TooltipOptions;
use crate::dom::{DocumentScroll, DomAnchor};
use crate::forms::{ControlStatus, FormControl};
use crate::observer::InvalidTooltip;
use crate::validation::ErrorMessageMap;
use leptos::html;
use leptos::prelude::*;
use std::rc::Rc;
use tw_merge::tw_merge;
use wasm_bindgen::JsCast;

/// The tooltip controller as wired to a real page.
pub type DomInvalidTooltip = InvalidTooltip<LeptosOverlayFactory, DomAnchor, DocumentScroll>;

struct TooltipSetup {
    messages: ErrorMessageMap,
    factory: LeptosOverlayFactory,
    options: TooltipOptions,
}

#[derive(Clone, Copy)]
struct FieldStores {
    setup: StoredValue<TooltipSetup>,
    control: StoredValue<FormControl, LocalStorage>,
    observer: StoredValue<Option<Rc<DomInvalidTooltip>>, LocalStorage>,
}

impl FieldStores {
    fn ensure_observer(&self, element: web_sys::HtmlElement) -> Option<Rc<DomInvalidTooltip>> {
        if let Some(existing) = self.observer.try_get_value().flatten() {
            return Some(existing);
        }

        let tooltip = self.setup.try_with_value(|setup| {
            InvalidTooltip::with_options(
                setup.messages.clone(),
                setup.factory.clone(),
                DomAnchor::new(element),
                DocumentScroll,
                setup.options.clone(),
            )
        })?;
        let tooltip = Rc::new(tooltip);
        tooltip.attach(&self.control.try_get_value()?);
        self.observer.set_value(Some(Rc::clone(&tooltip)));
        Some(tooltip)
    }
}

/// An `<input>` bound to `control`, showing a validation tooltip for the
/// first error once the field is dirty or touched.
#[component]
pub fn ValidatedInput(
    // Styling
    #[prop(into, optional)] class: String,

    // Common HTML attributes
    #[prop(into, default = "text")] r#type: &'static str,
    #[prop(into, optional)] placeholder: String,
    #[prop(into, optional)] name: String,
    #[prop(into, optional)] id: String,
    #[prop(optional)] autofocus: bool,

    control: FormControl,
    #[prop(into)] messages: ErrorMessageMap,
    #[prop(optional)] options: TooltipOptions,

    #[prop(optional)] node_ref: NodeRef<html::Input>,
) -> impl IntoView {
    let merged_class = tw_merge!(
        "placeholder:text-muted-foreground selection:bg-primary selection:text-primary-foreground dark:bg-input/30 border-input flex h-9 w-full min-w-0 rounded-md border bg-transparent px-3 py-1 text-base shadow-xs transition-[color,box-shadow] outline-none md:text-sm",
        "focus-visible:border-ring focus-visible:ring-ring/50",
        "focus-visible:ring-2",
        "aria-invalid:ring-destructive/20 dark:aria-invalid:ring-destructive/40 aria-invalid:border-destructive",
        class
    );

    let tooltip_id = use_tooltip_id(if name.is_empty() { &id } else { &name });
    let value = control.value();
    let is_invalid = RwSignal::new(control.status() == ControlStatus::Invalid);

    let status_sub = control.status_changes(move |status| {
        let _ = is_invalid.try_set(status == ControlStatus::Invalid);
    });
    let status_sub = StoredValue::new_local(Some(status_sub));
    let control = StoredValue::new_local(control);
    // Values are cloned out of the stores before use: showing a tooltip
    // creates signals, which must not happen while a store is borrowed.
    let observer = StoredValue::new_local(None::<Rc<DomInvalidTooltip>>);

    let setup = StoredValue::new(TooltipSetup {
        messages,
        factory: LeptosOverlayFactory::new(tooltip_id.clone(), options.class.clone()),
        options,
    });
    let fields = FieldStores {
        setup,
        control,
        observer,
    };

    // Status changes before the first focus need the observer as soon as the
    // element exists; focus builds it on demand if this has not run yet.
    Effect::new(move |_| {
        if let Some(input) = node_ref.get() {
            fields.ensure_observer(input.into());
        }
    });

    on_cleanup(move || {
        let tooltip = observer.try_update_value(Option::take).flatten();
        drop(tooltip);
        let sub = status_sub.try_update_value(Option::take).flatten();
        drop(sub);
    });

    let on_input = move |ev: web_sys::Event| {
        if let Some(target) = ev.target() {
            if let Some(input) = target.dyn_ref::<web_sys::HtmlInputElement>() {
                let value = input.value();
                control.get_value().input(value);
            }
        }
    };

    let on_focus = move |_| {
        let Some(input) = node_ref.get_untracked() else {
            return;
        };
        let snapshot = control.get_value().snapshot();
        if let Some(tooltip) = fields.ensure_observer(input.into()) {
            tooltip.on_focus(&snapshot);
        }
    };

    let on_blur = move |_| {
        control.get_value().mark_as_touched();
        if let Some(tooltip) = observer.get_value() {
            tooltip.on_blur();
        }
    };

    view! {
        <input
            data-name="ValidatedInput"
            type=r#type
            class=merged_class
            placeholder=placeholder
            name=name
            id=id
            autofocus=autofocus
            value=value
            aria-invalid=move || is_invalid.get().to_string()
            aria-describedby=tooltip_id
            on:input=on_input
            on:focus=on_focus
            on:blur=on_blur
            node_ref=node_ref
        />
    }
    .into_any()
}
