//! Configuration schema definitions.

use std::ops::Range;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub aptus: AptusConfig,

    #[serde(default)]
    pub browser: BrowserConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

/// Vendor system endpoint, credentials and customer id range.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AptusConfig {
    /// Base URL every relative page path is joined onto.
    #[serde(default)]
    pub base_url: String,

    #[serde(default)]
    pub username: String,

    #[serde(default)]
    pub password: String,

    /// First customer id to try (inclusive).
    #[serde(default)]
    pub min_customer_id: u32,

    /// Last customer id to try (exclusive).
    #[serde(default = "default_max_customer_id")]
    pub max_customer_id: u32,
}

impl Default for AptusConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            username: String::new(),
            password: String::new(),
            min_customer_id: 0,
            max_customer_id: default_max_customer_id(),
        }
    }
}

impl AptusConfig {
    /// Customer ids to try, `[min, max)`.
    pub fn customer_ids(&self) -> Range<u32> {
        self.min_customer_id..self.max_customer_id
    }
}

fn default_max_customer_id() -> u32 {
    600
}

/// Browser (Chrome over CDP) configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrowserConfig {
    #[serde(default = "default_debug_port")]
    pub debug_port: u16,

    #[serde(default)]
    pub headless: bool,

    /// How long element lookups wait for an element to appear.
    #[serde(default = "default_implicit_wait_ms")]
    pub implicit_wait_ms: u64,

    /// Chrome profile directory. Defaults to `~/.aptus/browser-profile`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_dir: Option<PathBuf>,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            debug_port: default_debug_port(),
            headless: false,
            implicit_wait_ms: default_implicit_wait_ms(),
            profile_dir: None,
        }
    }
}

impl BrowserConfig {
    /// Profile directory, falling back to `~/.aptus/browser-profile`.
    pub fn profile_dir_or_default(&self) -> PathBuf {
        self.profile_dir
            .clone()
            .unwrap_or_else(|| aptus_home().join("browser-profile"))
    }
}

/// The `~/.aptus` directory holding logs and the browser profile.
pub fn aptus_home() -> PathBuf {
    dirs::home_dir()
        .map(|h| h.join(".aptus"))
        .unwrap_or_else(|| PathBuf::from(".aptus"))
}

fn default_debug_port() -> u16 {
    9222
}

fn default_implicit_wait_ms() -> u64 {
    10_000
}

/// Dump output configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory under which one dated directory per run is created.
    #[serde(default = "default_dump_root")]
    pub dump_root: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dump_root: default_dump_root(),
        }
    }
}

fn default_dump_root() -> PathBuf {
    PathBuf::from("dumps")
}
