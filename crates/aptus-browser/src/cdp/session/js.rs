//! JavaScript execution operations for CDP page session.

use serde_json::{json, Value};

use crate::cdp::error::CdpError;

use super::core::PageSession;

impl PageSession {
    /// Evaluate JavaScript expression.
    pub async fn evaluate(&self, expression: &str) -> Result<Value, CdpError> {
        let result = self
            .call(
                "Runtime.evaluate",
                Some(json!({
                    "expression": expression,
                    "returnByValue": true,
                    "awaitPromise": true,
                })),
            )
            .await?;

        Self::check_exception(&result)?;
        Ok(result["result"]["value"].clone())
    }

    /// Call function on remote object.
    pub async fn call_function_on(
        &self,
        object_id: &str,
        function: &str,
        args: Option<Vec<Value>>,
    ) -> Result<Value, CdpError> {
        let mut params = json!({
            "objectId": object_id,
            "functionDeclaration": function,
            "returnByValue": true,
            "awaitPromise": true,
        });

        if let Some(a) = args {
            params["arguments"] =
                json!(a.into_iter().map(|v| json!({"value": v})).collect::<Vec<_>>());
        }

        let result = self.call("Runtime.callFunctionOn", Some(params)).await?;

        Self::check_exception(&result)?;
        Ok(result["result"]["value"].clone())
    }

    /// Run `function` with `this` bound to the DOM node.
    pub async fn call_on_node(&self, node_id: i64, function: &str) -> Result<Value, CdpError> {
        let object = self.resolve_node(node_id).await?;
        let object_id = object
            .object_id
            .ok_or_else(|| CdpError::InvalidResponse("Node has no object id".to_string()))?;

        let value = self.call_function_on(&object_id, function, None).await;

        let _ = self
            .call("Runtime.releaseObject", Some(json!({"objectId": object_id})))
            .await;

        value
    }

    /// `textContent` of a node.
    pub async fn text_content(&self, node_id: i64) -> Result<String, CdpError> {
        let value = self
            .call_on_node(node_id, "function() { return this.textContent; }")
            .await?;
        Ok(value.as_str().unwrap_or_default().to_string())
    }

    /// Current `value` property of a form control.
    pub async fn input_value(&self, node_id: i64) -> Result<String, CdpError> {
        let value = self
            .call_on_node(
                node_id,
                "function() { return this.value === undefined ? null : String(this.value); }",
            )
            .await?;
        Ok(value.as_str().unwrap_or_default().to_string())
    }

    fn check_exception(result: &Value) -> Result<(), CdpError> {
        if let Some(exception) = result.get("exceptionDetails") {
            let text = exception["text"].as_str().unwrap_or("Unknown error");
            return Err(CdpError::JavaScript(text.to_string()));
        }
        Ok(())
    }
}
