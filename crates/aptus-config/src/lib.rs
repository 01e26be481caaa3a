//! # Aptus Config
//!
//! Configuration for the Aptus dump tool: vendor endpoint and credentials,
//! browser settings and dump output location.

mod error;
mod loader;
mod schema;
mod validator;

pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use schema::*;
pub use validator::{ConfigValidator, ValidationError, ValidationResult, ValidationWarning};
