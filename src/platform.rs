//! URL opening.
//!
//! Activating an action hands its resolved URL to a [`UrlOpener`]; the
//! component itself never performs network requests.

use crate::error::{WebsearchError, WebsearchResult};

/// Opens URLs on behalf of activated actions.
pub trait UrlOpener {
    /// Open a URL in the default browser.
    fn open_url(&self, url: &str) -> WebsearchResult<()>;
}

/// Opens URLs with the desktop's default handler.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemOpener;

impl UrlOpener for SystemOpener {
    fn open_url(&self, url: &str) -> WebsearchResult<()> {
        tracing::debug!("Opening {}", url);
        open::that_detached(url)
            .map_err(|e| WebsearchError::Launch(format!("Failed to open URL: {}", e)))
    }
}
