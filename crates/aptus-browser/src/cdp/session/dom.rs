//! DOM operations for CDP page session.

use serde_json::json;

use crate::cdp::error::CdpError;
use crate::cdp::protocol::{attribute_value, BoxModel, DomNode, RemoteObject};

use super::core::PageSession;

/// CDP's generic "server error" code, returned for unknown node ids.
const SERVER_ERROR: i64 = -32000;

impl PageSession {
    /// Get the document root node.
    ///
    /// Every call invalidates node ids handed out for the previous document
    /// root, so callers fetch it once per page load.
    pub async fn get_document(&self) -> Result<DomNode, CdpError> {
        let result = self
            .call("DOM.getDocument", Some(json!({"depth": 0})))
            .await?;

        let root: DomNode = serde_json::from_value(result["root"].clone())?;
        Ok(root)
    }

    /// Query selector under `node_id`.
    pub async fn query_selector(
        &self,
        node_id: i64,
        selector: &str,
    ) -> Result<Option<i64>, CdpError> {
        let result = self
            .call(
                "DOM.querySelector",
                Some(json!({
                    "nodeId": node_id,
                    "selector": selector,
                })),
            )
            .await
            .map_err(|e| Self::stale(e, node_id))?;

        let found = result["nodeId"].as_i64().unwrap_or(0);
        if found == 0 {
            Ok(None)
        } else {
            Ok(Some(found))
        }
    }

    /// Query selector all under `node_id`, in document order.
    pub async fn query_selector_all(
        &self,
        node_id: i64,
        selector: &str,
    ) -> Result<Vec<i64>, CdpError> {
        let result = self
            .call(
                "DOM.querySelectorAll",
                Some(json!({
                    "nodeId": node_id,
                    "selector": selector,
                })),
            )
            .await
            .map_err(|e| Self::stale(e, node_id))?;

        let node_ids: Vec<i64> = result["nodeIds"]
            .as_array()
            .map(|arr| arr.iter().filter_map(|v| v.as_i64()).collect())
            .unwrap_or_default();

        Ok(node_ids)
    }

    /// Read a single attribute of a node.
    pub async fn get_attribute(&self, node_id: i64, name: &str) -> Result<Option<String>, CdpError> {
        let result = self
            .call("DOM.getAttributes", Some(json!({"nodeId": node_id})))
            .await
            .map_err(|e| Self::stale(e, node_id))?;

        let attributes: Vec<String> =
            serde_json::from_value(result["attributes"].clone()).unwrap_or_default();

        Ok(attribute_value(&attributes, name))
    }

    /// Get box model for node.
    pub async fn get_box_model(&self, node_id: i64) -> Result<Option<BoxModel>, CdpError> {
        let result = self
            .call("DOM.getBoxModel", Some(json!({"nodeId": node_id})))
            .await;

        match result {
            Ok(r) => {
                let model: BoxModel = serde_json::from_value(r["model"].clone())?;
                Ok(Some(model))
            }
            // Element not rendered (display: none and friends).
            Err(CdpError::Protocol { code: SERVER_ERROR, .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Scroll the node into view so it can be clicked.
    pub async fn scroll_into_view(&self, node_id: i64) -> Result<(), CdpError> {
        self.call(
            "DOM.scrollIntoViewIfNeeded",
            Some(json!({"nodeId": node_id})),
        )
        .await
        .map_err(|e| Self::stale(e, node_id))?;
        Ok(())
    }

    /// Resolve node to runtime object.
    pub async fn resolve_node(&self, node_id: i64) -> Result<RemoteObject, CdpError> {
        let result = self
            .call("DOM.resolveNode", Some(json!({"nodeId": node_id})))
            .await
            .map_err(|e| Self::stale(e, node_id))?;

        let obj: RemoteObject = serde_json::from_value(result["object"].clone())?;
        Ok(obj)
    }

    /// Focus element.
    pub async fn focus(&self, node_id: i64) -> Result<(), CdpError> {
        self.call("DOM.focus", Some(json!({"nodeId": node_id})))
            .await
            .map_err(|e| Self::stale(e, node_id))?;
        Ok(())
    }

    /// Replace the value of an input element by typing into it.
    pub async fn set_node_value(&self, node_id: i64, value: &str) -> Result<(), CdpError> {
        self.focus(node_id).await?;
        self.press_key_combo("Control+a").await?;
        self.press_key("Delete").await?;
        if !value.is_empty() {
            self.type_text(value).await?;
        }
        Ok(())
    }

    /// Click the center of a node.
    pub async fn click_node(&self, node_id: i64) -> Result<(), CdpError> {
        self.scroll_into_view(node_id).await?;

        let box_model = self
            .get_box_model(node_id)
            .await?
            .ok_or(CdpError::NotRendered(node_id))?;

        let (x, y) = Self::quad_center(&box_model.content);
        self.click(x, y).await
    }

    /// Calculate center point of a quad.
    pub(super) fn quad_center(quad: &[f64]) -> (f64, f64) {
        if quad.len() >= 8 {
            let x = (quad[0] + quad[2] + quad[4] + quad[6]) / 4.0;
            let y = (quad[1] + quad[3] + quad[5] + quad[7]) / 4.0;
            (x, y)
        } else {
            (0.0, 0.0)
        }
    }

    /// Map "no node with given id" protocol errors to [`CdpError::StaleNode`].
    pub(super) fn stale(error: CdpError, node_id: i64) -> CdpError {
        match error {
            CdpError::Protocol { code: SERVER_ERROR, ref message }
                if message.contains("Could not find node") =>
            {
                CdpError::StaleNode(node_id)
            }
            other => other,
        }
    }
}
