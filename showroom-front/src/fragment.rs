use crate::{dom::select, error::FrontError, fetch::fetch_text};
use tracing::{error, warn};

/// Fetches the HTML at `url` and puts it inside the element matching
/// `selector`.
///
/// Returns whether the fragment was mounted. Failures are logged, never retried.
pub async fn load(selector: &str, url: &str) -> bool {
    let html = match fetch_text(url).await {
        Ok(html) => html,
        Err(e) => {
            error!("Error loading {}: {}", url, e);
            return false;
        }
    };
    match select(selector) {
        Some(mount) => {
            mount.set_inner_html(&html);
            true
        }
        None => {
            warn!(
                "Can't mount {}: {}",
                url,
                FrontError::MissingElement(selector.to_owned())
            );
            false
        }
    }
}
