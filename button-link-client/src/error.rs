use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Error)]
pub enum BindError {
    #[error("window is unavailable")]
    NoWindow,
    #[error("document is unavailable")]
    NoDocument,
    #[error("failed to register {event} listener: {message}")]
    Listener {
        event: &'static str,
        message: String,
    },
}

impl BindError {
    pub(crate) fn listener(event: &'static str, error: JsValue) -> Self {
        Self::Listener {
            event,
            message: error
                .as_string()
                .unwrap_or_else(|| format!("{:?}", error)),
        }
    }
}

impl From<BindError> for JsValue {
    fn from(error: BindError) -> Self {
        JsValue::from_str(&error.to_string())
    }
}
