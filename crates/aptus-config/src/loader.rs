//! Configuration loader.

use std::fs;
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::ConfigError;
use crate::schema::Config;

static ENV_VAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is valid"));

/// Configuration loader with environment variable substitution.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Config, ConfigError> {
        if !path.is_file() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }
        let content = fs::read_to_string(path)?;
        Self::load_str(&content)
    }

    /// Load configuration from a string.
    ///
    /// `${VAR}` references are resolved inside string values only, after
    /// parsing, so comments are left alone and substituted values are taken
    /// literally.
    pub fn load_str(content: &str) -> Result<Config, ConfigError> {
        let mut value: toml::Value = toml::from_str(content)?;
        Self::expand_env_vars(&mut value)?;
        let mut config: Config = value.try_into()?;

        config.output.dump_root = Self::expand_path_buf(&config.output.dump_root);
        if let Some(dir) = config.browser.profile_dir.take() {
            config.browser.profile_dir = Some(Self::expand_path_buf(&dir));
        }

        Ok(config)
    }

    /// Expand `${VAR}` in every string of a parsed document.
    fn expand_env_vars(value: &mut toml::Value) -> Result<(), ConfigError> {
        match value {
            toml::Value::String(s) => *s = Self::expand_str(s)?,
            toml::Value::Array(items) => {
                for item in items {
                    Self::expand_env_vars(item)?;
                }
            }
            toml::Value::Table(table) => {
                for (_, item) in table.iter_mut() {
                    Self::expand_env_vars(item)?;
                }
            }
            _ => {}
        }
        Ok(())
    }

    /// Replace each `${VAR}` in `s` with the variable's value.
    fn expand_str(s: &str) -> Result<String, ConfigError> {
        let mut result = String::with_capacity(s.len());
        let mut last = 0;

        for cap in ENV_VAR.captures_iter(s) {
            let Some(whole) = cap.get(0) else {
                continue;
            };
            let var_name = &cap[1];
            let var_value = std::env::var(var_name)
                .map_err(|_| ConfigError::EnvVarNotSet(var_name.to_string()))?;

            result.push_str(&s[last..whole.start()]);
            result.push_str(&var_value);
            last = whole.end();
        }

        result.push_str(&s[last..]);
        Ok(result)
    }

    /// Expand shell-style paths (e.g., `~/.aptus`).
    pub fn expand_path(path: &str) -> String {
        shellexpand::tilde(path).to_string()
    }

    fn expand_path_buf(path: &Path) -> PathBuf {
        match path.to_str() {
            Some(s) => PathBuf::from(Self::expand_path(s)),
            None => path.to_path_buf(),
        }
    }
}
