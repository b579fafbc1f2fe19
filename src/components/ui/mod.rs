pub mod input;
pub mod tooltip;

// Re-export component symbols so callers can `use crate::components::ui::ValidatedInput` etc.
pub use input::*;
pub use tooltip::*;
