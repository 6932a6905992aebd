//! Error type shared by the DOM bindings

use e46_core::{ConfigError, ExportError, SpecError};
use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Error, Debug)]
pub enum PageError {
    #[error("No window object")]
    NoWindow,
    #[error("No document object")]
    NoDocument,
    #[error("Missing element: {0}")]
    MissingElement(String),
    #[error("Unexpected element type: {0}")]
    WrongType(String),
    #[error("JavaScript error: {0}")]
    Js(String),
    #[error(transparent)]
    Spec(#[from] SpecError),
    #[error(transparent)]
    Export(#[from] ExportError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl From<JsValue> for PageError {
    fn from(value: JsValue) -> Self {
        PageError::Js(format!("{:?}", value))
    }
}
