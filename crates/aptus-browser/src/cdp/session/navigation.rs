//! Navigation operations for CDP page session.

use std::time::{Duration, Instant};

use serde_json::json;
use tracing::debug;

use crate::cdp::error::CdpError;

use super::core::PageSession;

/// Upper bound on waiting for `document.readyState`.
const LOAD_TIMEOUT: Duration = Duration::from_secs(30);

/// Poll interval for load and unload checks.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Property set on `window` before a click; it disappears once a navigation
/// replaces the document.
const UNLOAD_MARKER: &str = "__aptusBeforeClick";

impl PageSession {
    /// Navigate to URL and wait for the new document to load.
    pub async fn navigate(&self, url: &str) -> Result<String, CdpError> {
        let result = self
            .call("Page.navigate", Some(json!({"url": url})))
            .await?;

        if let Some(error) = result.get("errorText").and_then(|e| e.as_str()) {
            return Err(CdpError::NavigationFailed(format!("{}: {}", url, error)));
        }

        let frame_id = result["frameId"].as_str().unwrap_or("main").to_string();

        self.wait_for_load().await?;

        debug!("Navigated to {}", url);
        Ok(frame_id)
    }

    /// Wait until `document.readyState` is `complete`.
    pub async fn wait_for_load(&self) -> Result<(), CdpError> {
        let start = Instant::now();

        loop {
            // The context can be torn down mid-navigation; just retry.
            if let Ok(state) = self.evaluate("document.readyState").await {
                if state.as_str() == Some("complete") {
                    return Ok(());
                }
            }

            if start.elapsed() > LOAD_TIMEOUT {
                return Err(CdpError::Timeout("Page load timeout".to_string()));
            }

            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }

    /// Mark the current document so [`Self::settle_after_click`] can tell
    /// whether a click navigated away.
    pub async fn mark_document(&self) -> Result<(), CdpError> {
        self.evaluate(&format!("window.{} = true", UNLOAD_MARKER))
            .await?;
        Ok(())
    }

    /// Wait for a navigation triggered by a click.
    ///
    /// Returns as soon as the marked document is gone and the new one has
    /// loaded, or after `grace` if the click did not navigate.
    pub async fn settle_after_click(&self, grace: Duration) -> Result<(), CdpError> {
        let start = Instant::now();
        let expression = format!("window.{} === true", UNLOAD_MARKER);

        loop {
            match self.evaluate(&expression).await {
                Ok(marked) if marked.as_bool() == Some(true) => {}
                // Marker gone or context swapped out: a navigation happened.
                _ => break,
            }

            if start.elapsed() > grace {
                debug!("Click did not navigate within {:?}", grace);
                return Ok(());
            }

            tokio::time::sleep(POLL_INTERVAL).await;
        }

        self.wait_for_load().await
    }

    /// Get current URL.
    pub async fn get_url(&self) -> Result<String, CdpError> {
        let result = self.evaluate("window.location.href").await?;
        Ok(result.as_str().unwrap_or("").to_string())
    }
}
