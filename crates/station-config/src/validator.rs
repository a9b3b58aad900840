//! Configuration validation.

use url::Url;

use crate::error::ConfigError;
use crate::schema::StationConfig;

/// Station refuses wallet passwords of this length or shorter.
const MIN_PASSWORD_LEN: usize = 10;

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

    /// Turn the first error into a [`ConfigError`].
    pub fn into_result(self) -> Result<Vec<ValidationWarning>, ConfigError> {
        match self.errors.into_iter().next() {
            Some(err) => Err(ConfigError::InvalidValue {
                field: err.path,
                message: err.message,
            }),
            None => Ok(self.warnings),
        }
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
    pub fn validate(config: &StationConfig) -> ValidationResult {
        let mut result = ValidationResult::default();

        Self::validate_browser(config, &mut result);
        Self::validate_timeouts(config, &mut result);
        Self::validate_retry(config, &mut result);
        Self::validate_wallet(config, &mut result);

        result
    }

    fn validate_browser(config: &StationConfig, result: &mut ValidationResult) {
        let endpoint = config.browser.endpoint.trim();
        if endpoint.is_empty() {
            result.add_error(ValidationError::new(
                "browser.endpoint",
                "Endpoint cannot be empty",
            ));
        } else {
            match Url::parse(endpoint) {
                Ok(url) if matches!(url.scheme(), "http" | "https") => {}
                Ok(url) => result.add_error(ValidationError::new(
                    "browser.endpoint",
                    format!("Unsupported scheme '{}', expected http or https", url.scheme()),
                )),
                Err(e) => result.add_error(ValidationError::new(
                    "browser.endpoint",
                    format!("Invalid URL: {}", e),
                )),
            }
        }

        if let Some(slow_mo) = config.browser.slow_mo_ms {
            if slow_mo > 1000 {
                result.add_warning(ValidationWarning::new(
                    "browser.slow_mo_ms",
                    "slow_mo_ms is above one second, scenarios will be very slow",
                ));
            }
        }
    }

    fn validate_timeouts(config: &StationConfig, result: &mut ValidationResult) {
        let timeouts = &config.timeouts;
        for (path, value) in [
            ("timeouts.expect_ms", timeouts.expect_ms),
            ("timeouts.navigation_ms", timeouts.navigation_ms),
            ("timeouts.load_ms", timeouts.load_ms),
            ("timeouts.transaction_ms", timeouts.transaction_ms),
            ("timeouts.poll_interval_ms", timeouts.poll_interval_ms),
        ] {
            if value == 0 {
                result.add_error(ValidationError::new(path, "must be greater than 0"));
            }
        }

        if timeouts.poll_interval_ms > timeouts.expect_ms {
            result.add_warning(ValidationWarning::new(
                "timeouts.poll_interval_ms",
                "poll interval exceeds the expect timeout, assertions poll only once",
            ));
        }
    }

    fn validate_retry(config: &StationConfig, result: &mut ValidationResult) {
        if config.retry.max_attempts == 0 {
            result.add_error(ValidationError::new(
                "retry.max_attempts",
                "max_attempts must be at least 1",
            ));
        }

        if config.retry.backoff_multiplier < 1.0 {
            result.add_error(ValidationError::new(
                "retry.backoff_multiplier",
                "backoff_multiplier must be >= 1.0",
            ));
        }
    }

    fn validate_wallet(config: &StationConfig, result: &mut ValidationResult) {
        if config.wallet.name.trim().is_empty() {
            result.add_error(ValidationError::new("wallet.name", "Wallet name cannot be empty"));
        }

        if config.wallet.password.chars().count() <= MIN_PASSWORD_LEN {
            result.add_error(ValidationError::new(
                "wallet.password",
                format!("Password must be longer than {} characters", MIN_PASSWORD_LEN),
            ));
        }

        if config.wallet.seed_phrase.is_none() {
            result.add_warning(ValidationWarning::new(
                "wallet.seed_phrase",
                "No seed phrase configured, set SEED_PHRASE before running setup",
            ));
        }
    }
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
