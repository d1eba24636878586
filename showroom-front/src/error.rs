use std::fmt;
use wasm_bindgen::JsValue;

#[derive(Debug)]
pub enum FrontError {
    /// An exception thrown by a browser API
    Js(String),
    /// A fetch answered with a non-success status
    Http(u16, String),
    MissingElement(String),
    Data(showroom_common::Error),
}

impl fmt::Display for FrontError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrontError::Js(e) => write!(f, "{}", e),
            FrontError::Http(status, url) => write!(f, "{} answered with status {}", url, status),
            FrontError::MissingElement(selector) => write!(f, "no element matches {}", selector),
            FrontError::Data(e) => write!(f, "{}", e),
        }
    }
}

impl From<JsValue> for FrontError {
    fn from(value: JsValue) -> Self {
        FrontError::Js(
            value
                .as_string()
                .unwrap_or_else(|| format!("{:?}", value)),
        )
    }
}

impl From<showroom_common::Error> for FrontError {
    fn from(err: showroom_common::Error) -> Self {
        FrontError::Data(err)
    }
}

impl From<serde_json::Error> for FrontError {
    fn from(err: serde_json::Error) -> Self {
        FrontError::Data(err.into())
    }
}
