//! Input (mouse and keyboard) operations for CDP page session.

use serde_json::json;
use tracing::debug;

use crate::cdp::error::CdpError;
use crate::cdp::protocol::{KeyEventType, MouseButton, MouseEventType};

use super::core::PageSession;

impl PageSession {
    /// Click at coordinates.
    pub async fn click(&self, x: f64, y: f64) -> Result<(), CdpError> {
        self.call(
            "Input.dispatchMouseEvent",
            Some(json!({
                "type": MouseEventType::MouseMoved,
                "x": x,
                "y": y,
            })),
        )
        .await?;

        for event_type in [MouseEventType::MousePressed, MouseEventType::MouseReleased] {
            self.call(
                "Input.dispatchMouseEvent",
                Some(json!({
                    "type": event_type,
                    "x": x,
                    "y": y,
                    "button": MouseButton::Left,
                    "clickCount": 1,
                })),
            )
            .await?;
        }

        debug!("Clicked at ({}, {})", x, y);
        Ok(())
    }

    /// Type text into the focused element.
    pub async fn type_text(&self, text: &str) -> Result<(), CdpError> {
        self.call("Input.insertText", Some(json!({"text": text})))
            .await?;
        debug!("Typed {} characters", text.chars().count());
        Ok(())
    }

    /// Press a key.
    pub async fn press_key(&self, key: &str) -> Result<(), CdpError> {
        self.press_key_combo(key).await
    }

    /// Press key combination (e.g., "Control+a").
    pub async fn press_key_combo(&self, combo: &str) -> Result<(), CdpError> {
        let parts: Vec<&str> = combo.split('+').collect();
        let (key, modifiers) = match parts.split_last() {
            Some((key, modifiers)) => (*key, Self::get_modifiers(modifiers)),
            None => ("", 0),
        };

        for event_type in [KeyEventType::RawKeyDown, KeyEventType::KeyUp] {
            self.call(
                "Input.dispatchKeyEvent",
                Some(json!({
                    "type": event_type,
                    "key": key,
                    "modifiers": modifiers,
                    "windowsVirtualKeyCode": Self::virtual_key_code(key),
                })),
            )
            .await?;
        }

        Ok(())
    }

    /// Get modifier flags from modifier names.
    pub(super) fn get_modifiers(modifiers: &[&str]) -> i32 {
        let mut flags = 0;
        for m in modifiers {
            match m.to_lowercase().as_str() {
                "alt" => flags |= 1,
                "control" | "ctrl" => flags |= 2,
                "meta" | "command" | "cmd" => flags |= 4,
                "shift" => flags |= 8,
                _ => {}
            }
        }
        flags
    }

    /// Windows virtual key code Chrome needs to run editing commands.
    pub(super) fn virtual_key_code(key: &str) -> i32 {
        match key {
            "Backspace" => 8,
            "Tab" => 9,
            "Enter" => 13,
            "Delete" => 46,
            k if k.len() == 1 => k.to_ascii_uppercase().as_bytes()[0] as i32,
            _ => 0,
        }
    }
}
