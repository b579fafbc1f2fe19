use crate::error::TooltipError;
use serde::{Deserialize, Serialize};

/// Distance from the anchor's left and bottom edges to the tooltip origin.
pub const DEFAULT_ANCHOR_OFFSET: f64 = 10.0;

/// How far inside the anchor's top-left corner the occlusion probe lands.
pub const DEFAULT_PROBE_INSET: f64 = 1.0;

/// Per-field tuning for the tooltip. Every field is optional when
/// deserializing; missing fields take the defaults above.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct TooltipOptions {
    pub anchor_offset: f64,
    pub probe_inset: f64,

    /// Extra Tailwind classes merged onto the tooltip bubble.
    pub class: String,
}

impl TooltipOptions {
    pub fn from_json(json: &str) -> Result<Self, TooltipError> {
        Ok(serde_json::from_str(json)?)
    }
}

impl Default for TooltipOptions {
    fn default() -> Self {
        Self {
            anchor_offset: DEFAULT_ANCHOR_OFFSET,
            probe_inset: DEFAULT_PROBE_INSET,
            class: String::new(),
        }
    }
}
