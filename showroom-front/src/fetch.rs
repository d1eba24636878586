use crate::{dom::win, error::FrontError};
use serde::de::DeserializeOwned;
use tracing::debug;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::Response;

/// GETs `url` and returns the body as text. Non-success statuses are errors.
pub async fn fetch_text(url: &str) -> Result<String, FrontError> {
    let response: Response = JsFuture::from(win()?.fetch_with_str(url))
        .await?
        .dyn_into()?;
    if !response.ok() {
        return Err(FrontError::Http(response.status(), url.to_owned()));
    }
    let text = JsFuture::from(response.text()?).await?;
    debug!("Fetched {}", url);
    text.as_string()
        .ok_or_else(|| FrontError::Js(format!("{} didn't return text", url)))
}

pub async fn fetch_json<T: DeserializeOwned>(url: &str) -> Result<T, FrontError> {
    let text = fetch_text(url).await?;
    Ok(serde_json::from_str(&text)?)
}
