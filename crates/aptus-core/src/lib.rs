//! # Aptus Core
//!
//! Scrapes the Aptus property-management portal through a [`Browser`]:
//!
//! - [`navigator`]: opens portal pages, logging in again whenever the portal
//!   bounces a request to its login page
//! - [`extract`] and [`links`]: turn detail and list tables into typed values
//!   with strict shape checks
//! - [`dump`]: one dumper per entity (authorities, customers, keys, ...)
//! - [`orchestrator`]: runs whole dump families and writes the JSON documents
//! - [`updater`]: pushes edited key fields back through the edit form
//!
//! Every shape mismatch is fatal. Expected absence (a customer id that does
//! not exist, a customer without entry phone) is modelled as data, not as an
//! error.
//!
//! [`Browser`]: aptus_browser::Browser

pub mod dump;
pub mod error;
pub mod extract;
pub mod links;
pub mod navigator;
pub mod orchestrator;
pub mod records;
pub mod updater;

#[cfg(test)]
mod fake_browser;

pub use error::{Result, ScrapeError};
pub use navigator::{Navigator, SessionState};
pub use orchestrator::{DumpFamily, DumpSummary, Orchestrator};
pub use records::*;
pub use updater::{KeyUpdate, UpdateOutcome};
