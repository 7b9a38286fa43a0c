use serde_json::Value;

use crate::render::{RenderPayload, render_json_ui, render_text};

/// Abstraction over UI frontends that render the same payload into
/// different transports.
pub trait FormFrontend {
    fn render_text_ui(&self, payload: &RenderPayload) -> String;
    fn render_json_ui(&self, payload: &RenderPayload) -> Value;
}

/// Default frontend implementation that reuses the built-in renderers.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultFormFrontend;

impl FormFrontend for DefaultFormFrontend {
    fn render_text_ui(&self, payload: &RenderPayload) -> String {
        render_text(payload)
    }

    fn render_json_ui(&self, payload: &RenderPayload) -> Value {
        render_json_ui(payload)
    }
}
