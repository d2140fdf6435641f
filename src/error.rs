use thiserror::Error;
use wasm_bindgen::JsValue;

pub type Result<T> = std::result::Result<T, SlasherError>;

#[derive(Debug, Error)]
pub enum SlasherError {
    #[error("browser call failed: {0}")]
    Js(String),
    #[error("stored command data could not be decoded: {0}")]
    Decode(String),
    #[error("caret could not be placed: {0}")]
    Caret(String),
    #[error("invalid settings: {0}")]
    Config(#[from] serde_json::Error),
}

impl From<JsValue> for SlasherError {
    fn from(value: JsValue) -> Self {
        let message = value
            .as_string()
            .or_else(|| {
                js_sys::Reflect::get(&value, &JsValue::from_str("message"))
                    .ok()
                    .and_then(|m| m.as_string())
            })
            .unwrap_or_else(|| format!("{value:?}"));
        Self::Js(message)
    }
}

impl From<serde_wasm_bindgen::Error> for SlasherError {
    fn from(value: serde_wasm_bindgen::Error) -> Self {
        Self::Decode(value.to_string())
    }
}
