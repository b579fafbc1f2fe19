use wasm_bindgen::JsValue;

/// Failures at the boundary with the host page.
///
/// Browser callbacks never surface these; they are logged and the tooltip
/// stays hidden for that notification.
#[derive(Debug, thiserror::Error)]
pub enum TooltipError {
    #[error("no global `window` available")]
    NoWindow,

    #[error("window has no document")]
    NoDocument,

    #[error("document has no body")]
    NoBody,

    #[error("DOM call failed: {0}")]
    Js(String),

    #[error("invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("a logger is already installed")]
    LoggerAlreadySet,
}

impl From<JsValue> for TooltipError {
    fn from(value: JsValue) -> Self {
        let text = value.as_string().unwrap_or_else(|| format!("{value:?}"));
        TooltipError::Js(text)
    }
}
