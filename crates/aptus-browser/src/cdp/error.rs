//! CDP error types.

use thiserror::Error;

/// Errors talking to Chrome over CDP.
#[derive(Debug, Error)]
pub enum CdpError {
    /// Nothing answers on the debugging endpoint.
    #[error("Chrome not available at {0}; is it running with --remote-debugging-port?")]
    ChromeNotAvailable(String),

    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// WebSocket or HTTP failure below the protocol.
    #[error("Transport error: {0}")]
    Transport(String),

    /// Error object returned for a command.
    #[error("CDP error {code}: {message}")]
    Protocol { code: i64, message: String },

    #[error("Malformed CDP message: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Navigation failed: {0}")]
    NavigationFailed(String),

    /// Node has no box model, so there is nothing to click.
    #[error("Node {0} is not rendered")]
    NotRendered(i64),

    /// Node id no longer exists, usually because the document was replaced.
    #[error("Stale node: {0}")]
    StaleNode(i64),

    /// Page script threw.
    #[error("JavaScript error: {0}")]
    JavaScript(String),

    #[error("Timeout: {0}")]
    Timeout(String),

    /// The socket closed while a command was waiting.
    #[error("Session closed")]
    SessionClosed,
}

impl From<tokio_tungstenite::tungstenite::Error> for CdpError {
    fn from(e: tokio_tungstenite::tungstenite::Error) -> Self {
        CdpError::Transport(format!("websocket: {}", e))
    }
}

impl From<reqwest::Error> for CdpError {
    fn from(e: reqwest::Error) -> Self {
        CdpError::Transport(format!("http: {}", e))
    }
}
