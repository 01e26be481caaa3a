//! Manager configuration and the error type of the [`Browser`] trait.
//!
//! [`Browser`]: crate::Browser

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::cdp::CdpError;

/// Errors surfaced through the [`Browser`](crate::Browser) trait.
#[derive(Debug, Error)]
pub enum BrowserError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Navigation failed: {0}")]
    NavigationFailed(String),

    /// No match within the implicit wait.
    #[error("Element not found: {0}")]
    ElementNotFound(String),

    /// The handle outlived the page it was found on.
    #[error("Stale element: node {0} is no longer attached")]
    StaleElement(i64),

    #[error("Browser action failed: {0}")]
    ActionFailed(String),

    #[error("Browser not connected")]
    NotConnected,

    #[error("No Chrome, Chromium or Edge installation found")]
    ChromeNotFound,

    #[error("Failed to launch Chrome: {0}")]
    LaunchFailed(String),
}

impl From<CdpError> for BrowserError {
    fn from(e: CdpError) -> Self {
        match e {
            CdpError::ChromeNotAvailable(msg) | CdpError::ConnectionFailed(msg) => {
                BrowserError::ConnectionFailed(msg)
            }
            CdpError::NavigationFailed(msg) => BrowserError::NavigationFailed(msg),
            CdpError::StaleNode(id) => BrowserError::StaleElement(id),
            CdpError::SessionClosed => BrowserError::NotConnected,
            other => BrowserError::ActionFailed(other.to_string()),
        }
    }
}

/// How the manager finds or starts Chrome and how patient it is with pages.
#[derive(Debug, Clone)]
pub struct BrowserManagerConfig {
    /// Remote debugging port to attach to (or launch Chrome on).
    pub debug_port: u16,
    /// User data directory for a launched Chrome.
    pub profile_dir: Option<PathBuf>,
    pub headless: bool,
    /// How long `find_element` keeps polling before giving up.
    pub implicit_wait: Duration,
}

impl Default for BrowserManagerConfig {
    fn default() -> Self {
        Self {
            debug_port: 9222,
            profile_dir: None,
            headless: false,
            implicit_wait: Duration::from_secs(10),
        }
    }
}

impl BrowserManagerConfig {
    /// How long a click may take to start a navigation. A slow form post is
    /// given the same patience as a slow element.
    pub fn click_settle_timeout(&self) -> Duration {
        self.implicit_wait
    }

    /// Profile directory, `~/.aptus/browser-profile` unless configured.
    pub fn get_profile_dir(&self) -> PathBuf {
        match &self.profile_dir {
            Some(dir) => dir.clone(),
            None => dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".aptus")
                .join("browser-profile"),
        }
    }

    /// HTTP endpoint of the debugging port.
    pub fn endpoint(&self) -> String {
        format!("http://localhost:{}", self.debug_port)
    }
}
