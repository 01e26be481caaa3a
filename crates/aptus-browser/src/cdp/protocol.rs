//! CDP wire types. Only the fields the client reads are modelled.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Command sent over the browser socket.
#[derive(Debug, Serialize)]
pub struct CdpRequest {
    pub id: u64,
    pub method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
    /// Target session for page-level commands; absent for browser commands.
    #[serde(rename = "sessionId", skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

/// Incoming message. Events carry no `id` and are dropped by the client.
#[derive(Debug, Deserialize)]
pub struct CdpResponse {
    pub id: Option<u64>,
    pub result: Option<Value>,
    pub error: Option<CdpErrorResponse>,
}

#[derive(Debug, Deserialize)]
pub struct CdpErrorResponse {
    pub code: i64,
    pub message: String,
}

/// Target created by `PUT /json/new`.
#[derive(Debug, Clone, Deserialize)]
pub struct PageInfo {
    pub id: String,
    #[serde(rename = "type")]
    pub page_type: String,
    pub url: String,
}

/// `GET /json/version`. Chrome uses PascalCase for most keys here.
#[derive(Debug, Clone, Deserialize)]
pub struct BrowserVersion {
    #[serde(rename = "Browser")]
    pub browser: String,
    #[serde(rename = "webSocketDebuggerUrl")]
    pub web_socket_debugger_url: String,
}

/// Node returned by `DOM.getDocument`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomNode {
    pub node_id: i64,
    pub node_name: String,
}

/// `DOM.getBoxModel` result; quads are flat `[x1, y1, .., x4, y4]` lists.
#[derive(Debug, Clone, Deserialize)]
pub struct BoxModel {
    pub content: Vec<f64>,
}

/// Find `name` in CDP's flat `[name, value, name, value, ...]` attribute list.
/// HTML attribute names are case-insensitive.
pub fn attribute_value(attributes: &[String], name: &str) -> Option<String> {
    attributes
        .chunks_exact(2)
        .find(|pair| pair[0].eq_ignore_ascii_case(name))
        .map(|pair| pair[1].clone())
}

/// Handle to a JavaScript object from `DOM.resolveNode`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteObject {
    pub object_id: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MouseButton {
    Left,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum MouseEventType {
    MouseMoved,
    MousePressed,
    MouseReleased,
}

/// `RawKeyDown` rather than `KeyDown`, so Chrome runs editing shortcuts
/// such as select-all.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum KeyEventType {
    RawKeyDown,
    KeyUp,
}

#[cfg(test)]
#[path = "protocol_tests.rs"]
mod tests;
