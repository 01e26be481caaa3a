//! Browser instance manager.
//!
//! Launches (or reuses) a Chrome with remote debugging enabled, attaches a
//! single page session to it and exposes that page through the [`Browser`]
//! trait.
//!
//! [`Browser`]: crate::Browser

mod manager_browser;
mod manager_core;
mod manager_types;

pub use manager_core::BrowserManager;
pub use manager_types::{BrowserError, BrowserManagerConfig};

#[cfg(test)]
#[path = "manager_tests.rs"]
mod tests;
