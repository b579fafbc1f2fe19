//! Demo page for trying the tooltip by hand.

use crate::components::ui::ValidatedInput;
use crate::forms::{FormControl, Validator};
use crate::validation::ErrorMessageMap;
use leptos::prelude::*;
use leptos_ui::clx;

clx! {PlaygroundCard, div, "flex flex-col gap-5 p-6 mx-auto mt-16 w-full max-w-sm rounded-xl border shadow-sm bg-card text-card-foreground"}
clx! {Field, div, "flex flex-col gap-2"}

const LABEL_CLASSES: &str = "text-sm font-medium leading-none select-none";

fn default_messages() -> ErrorMessageMap {
    [
        ("required", "This field is required"),
        ("minlength", "Too short"),
        ("email", "Not a valid email address"),
    ]
    .into_iter()
    .collect()
}

/// `raw` wins when it parses; otherwise the built-in messages are used.
pub(crate) fn resolve_messages(raw: Option<&str>) -> ErrorMessageMap {
    match raw.map(ErrorMessageMap::from_json) {
        Some(Ok(messages)) => messages,
        Some(Err(err)) => {
            log::warn!("ignoring window.ENV.TOOLTIP_MESSAGES: {err}");
            default_messages()
        }
        None => default_messages(),
    }
}

/// Reads `window.ENV.TOOLTIP_MESSAGES`, given either as a JSON string or as
/// a plain object.
fn env_messages() -> Option<String> {
    let env = web_sys::window()?.get("ENV")?;
    if env.is_undefined() || !env.is_object() {
        return None;
    }

    let raw = js_sys::Reflect::get(&env, &"TOOLTIP_MESSAGES".into()).ok()?;
    if raw.is_undefined() || raw.is_null() {
        return None;
    }
    if let Some(text) = raw.as_string() {
        return Some(text);
    }
    js_sys::JSON::stringify(&raw).ok().map(String::from)
}

// Controls are `!Send`; they are built inside the `Send` children closures.
fn username_control() -> FormControl {
    FormControl::new("", vec![Validator::Required, Validator::MinLength(3)])
}

fn email_control() -> FormControl {
    FormControl::new("", vec![Validator::Required, Validator::Email])
}

#[component]
pub fn Playground() -> impl IntoView {
    let username_messages = resolve_messages(env_messages().as_deref());
    let email_messages = username_messages.clone();

    view! {
        <div class="min-h-[200vh] bg-background">
            // Scrolling under this bar hides a tooltip whose field it covers.
            <header class="sticky top-0 z-10 py-3 px-4 text-sm font-medium border-b bg-background">
                "invalid-tooltip playground"
            </header>
            <PlaygroundCard>
                <Field>
                    <label for="username" class=LABEL_CLASSES>"Username"</label>
                    <ValidatedInput id="username" name="username" control=username_control() messages=username_messages />
                </Field>
                <Field>
                    <label for="email" class=LABEL_CLASSES>"Email"</label>
                    <ValidatedInput id="email" name="email" r#type="email" control=email_control() messages=email_messages />
                </Field>
            </PlaygroundCard>
        </div>
    }
}
