use crate::error::TooltipError;

/// Everything the tooltip bubble renders.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TooltipProps {
    pub x: f64,
    pub y: f64,
    pub message: String,
    pub hidden: bool,
}

impl TooltipProps {
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Default::default()
        }
    }
}

/// A live, attached tooltip element.
pub trait OverlayHandle {
    fn props(&self) -> TooltipProps;

    fn set_position(&mut self, x: f64, y: f64);

    fn set_hidden(&mut self, hidden: bool);

    /// Detaches the element synchronously. Calling it twice is a no-op.
    fn destroy(&mut self);
}

/// Creates tooltip elements and inserts them into the page.
pub trait OverlayFactory {
    type Handle: OverlayHandle + 'static;

    fn create(&self, props: TooltipProps) -> Result<Self::Handle, TooltipError>;
}
