//! Browser automation primitive for the Aptus dump tool.
//!
//! Drives a Chrome tab over the Chrome DevTools Protocol (CDP). The scraper is
//! written against the [`Browser`] trait; [`BrowserManager`] is the real
//! implementation.
//!
//! ```text
//! ┌─────────────────┐    WebSocket     ┌──────────────────┐
//! │  aptus-core     │ ◄──────────────► │   Chrome/Edge    │
//! │  (via Browser)  │       CDP        │  (one tab)       │
//! └─────────────────┘                  └──────────────────┘
//! ```
//!
//! If nothing listens on the configured debug port, Chrome is launched with
//! `--remote-debugging-port` and a dedicated profile directory, and shut down
//! again by [`Browser::close`].
//!
//! Lookups wait implicitly: [`Browser::find_element`] polls until the element
//! shows up or the configured wait runs out, while [`Browser::find_elements`]
//! returns whatever is on the page right now.

pub mod browser;
pub mod cdp;
pub mod manager;

pub use browser::{Browser, By, Element};
pub use cdp::{CdpClient, CdpError, PageSession};
pub use manager::{BrowserError, BrowserManager, BrowserManagerConfig};
