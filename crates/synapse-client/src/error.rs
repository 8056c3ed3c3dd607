use synapse_core::ConfigError;
use wasm_bindgen::JsValue;

/// Failure while wiring an enhancement to the page.
///
/// Missing elements are not errors; setups return `Ok(None)` for those.
#[derive(Debug, thiserror::Error)]
pub enum SetupError {
    #[error("JavaScript error: {0}")]
    Js(String),
    #[error("canvas does not provide a 2d context")]
    NoContext,
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl From<JsValue> for SetupError {
    fn from(value: JsValue) -> Self {
        Self::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}
