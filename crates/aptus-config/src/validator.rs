//! Configuration validation.

use crate::error::ConfigError;
use crate::schema::Config;

/// Ranges wider than this take hours to walk and are probably a typo.
const LARGE_CUSTOMER_RANGE: u32 = 10_000;

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    /// Collapse the errors into a single `ConfigError::Invalid`.
    pub fn into_result(self) -> Result<Vec<ValidationWarning>, ConfigError> {
        if self.is_valid() {
            return Ok(self.warnings);
        }
        let message = self
            .errors
            .iter()
            .map(|e| format!("{}: {}", e.path, e.message))
            .collect::<Vec<_>>()
            .join("; ");
        Err(ConfigError::Invalid(message))
    }
}

/// A validation error.
#[derive(Debug)]
pub struct ValidationError {
    pub path: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// A validation warning.
#[derive(Debug)]
pub struct ValidationWarning {
    pub path: String,
    pub message: String,
}

impl ValidationWarning {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the configuration.
    pub fn validate(config: &Config) -> Result<ValidationResult, ConfigError> {
        let mut result = ValidationResult::default();

        Self::validate_aptus(config, &mut result);
        Self::validate_browser(config, &mut result);

        Ok(result)
    }

    fn validate_aptus(config: &Config, result: &mut ValidationResult) {
        let aptus = &config.aptus;

        if aptus.base_url.is_empty() {
            result.add_error(ValidationError::new(
                "aptus.base_url",
                "Base URL cannot be empty",
            ));
        } else if !aptus.base_url.starts_with("http://") && !aptus.base_url.starts_with("https://")
        {
            result.add_error(ValidationError::new(
                "aptus.base_url",
                "base_url must start with http:// or https://",
            ));
        }

        if aptus.username.is_empty() {
            result.add_error(ValidationError::new(
                "aptus.username",
                "Username cannot be empty",
            ));
        }

        if aptus.password.is_empty() {
            result.add_error(ValidationError::new(
                "aptus.password",
                "Password cannot be empty",
            ));
        }

        if aptus.min_customer_id >= aptus.max_customer_id {
            result.add_error(ValidationError::new(
                "aptus.max_customer_id",
                format!(
                    "Customer id range {}..{} is empty",
                    aptus.min_customer_id, aptus.max_customer_id
                ),
            ));
        } else if aptus.max_customer_id - aptus.min_customer_id > LARGE_CUSTOMER_RANGE {
            result.add_warning(ValidationWarning::new(
                "aptus.max_customer_id",
                format!(
                    "Customer id range spans more than {} ids, the dump will take a long time",
                    LARGE_CUSTOMER_RANGE
                ),
            ));
        }
    }

    fn validate_browser(config: &Config, result: &mut ValidationResult) {
        if config.browser.debug_port == 0 {
            result.add_error(ValidationError::new(
                "browser.debug_port",
                "Port cannot be 0",
            ));
        }

        if config.browser.implicit_wait_ms == 0 {
            result.add_error(ValidationError::new(
                "browser.implicit_wait_ms",
                "implicit_wait_ms must be greater than 0",
            ));
        }
    }
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
