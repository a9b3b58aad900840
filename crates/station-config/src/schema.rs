//! Configuration schema definitions.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Environment variable holding the primary recovery phrase.
pub const ENV_SEED_PHRASE: &str = "SEED_PHRASE";
/// Environment variable holding the secondary recovery phrase.
pub const ENV_SEED_PHRASE_TWO: &str = "SEED_PHRASE_TWO";
/// Environment variable holding the private key used by the import scenarios.
pub const ENV_PRIVATE_KEY: &str = "PRIVATE_KEY";
/// Environment variable enabling slow motion.
pub const ENV_SLOW_MODE: &str = "SLOW_MODE";

/// Slow-motion delay used when `SLOW_MODE` is set to a non-numeric value.
pub const DEFAULT_SLOW_MO_MS: u64 = 50;

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StationConfig {
    #[serde(default)]
    pub browser: BrowserConfig,

    #[serde(default)]
    pub timeouts: TimeoutConfig,

    #[serde(default)]
    pub retry: RetryConfig,

    #[serde(default)]
    pub wallet: WalletConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl StationConfig {
    /// Overlay values taken from the process environment.
    pub fn apply_env(&mut self) {
        self.apply_env_with(|key| std::env::var(key).ok());
    }

    /// Overlay values from an arbitrary variable lookup.
    ///
    /// Empty values are treated as unset.
    pub fn apply_env_with<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(seed) = get(ENV_SEED_PHRASE) {
            self.wallet.seed_phrase = Some(seed);
        }
        if let Some(seed) = get(ENV_SEED_PHRASE_TWO) {
            self.wallet.seed_phrase_two = Some(seed);
        }
        if let Some(key) = get(ENV_PRIVATE_KEY) {
            self.wallet.private_key = Some(key);
        }
        if let Some(slow) = get(ENV_SLOW_MODE) {
            self.browser.slow_mo_ms = Some(parse_slow_mode(&slow));
        }
    }
}

/// Interpret a `SLOW_MODE` value: a number is taken as milliseconds, anything
/// else enables the default delay.
pub fn parse_slow_mode(value: &str) -> u64 {
    value.trim().parse::<u64>().unwrap_or(DEFAULT_SLOW_MO_MS)
}

/// Browser connection configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrowserConfig {
    /// Remote debugging endpoint of the running Chromium.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Delay inserted before every input action.
    #[serde(default)]
    pub slow_mo_ms: Option<u64>,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            slow_mo_ms: None,
        }
    }
}

impl BrowserConfig {
    pub fn slow_mo(&self) -> Option<Duration> {
        self.slow_mo_ms.map(Duration::from_millis)
    }
}

fn default_endpoint() -> String {
    "http://127.0.0.1:9222".to_string()
}

/// Wait budgets used by the page objects.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeoutConfig {
    /// Visibility assertions.
    #[serde(default = "default_expect_ms")]
    pub expect_ms: u64,

    /// Waiting for a route tab to open.
    #[serde(default = "default_navigation_ms")]
    pub navigation_ms: u64,

    /// Document load after navigation or reload.
    #[serde(default = "default_load_ms")]
    pub load_ms: u64,

    /// Broadcast and confirmation of a transaction.
    #[serde(default = "default_transaction_ms")]
    pub transaction_ms: u64,

    /// Interval between visibility polls.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            expect_ms: default_expect_ms(),
            navigation_ms: default_navigation_ms(),
            load_ms: default_load_ms(),
            transaction_ms: default_transaction_ms(),
            poll_interval_ms: default_poll_interval_ms(),
        }
    }
}

impl TimeoutConfig {
    pub fn expect(&self) -> Duration {
        Duration::from_millis(self.expect_ms)
    }

    pub fn navigation(&self) -> Duration {
        Duration::from_millis(self.navigation_ms)
    }

    pub fn load(&self) -> Duration {
        Duration::from_millis(self.load_ms)
    }

    pub fn transaction(&self) -> Duration {
        Duration::from_millis(self.transaction_ms)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

fn default_expect_ms() -> u64 {
    10_000
}

fn default_navigation_ms() -> u64 {
    30_000
}

fn default_load_ms() -> u64 {
    30_000
}

fn default_transaction_ms() -> u64 {
    180_000
}

fn default_poll_interval_ms() -> u64 {
    100
}

/// Retry policy for flaky UI steps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    #[serde(default = "default_base_delay_ms")]
    pub base_delay_ms: u64,

    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,

    #[serde(default = "default_backoff_multiplier")]
    pub backoff_multiplier: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            base_delay_ms: default_base_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
            backoff_multiplier: default_backoff_multiplier(),
        }
    }
}

fn default_max_attempts() -> u32 {
    3
}

fn default_base_delay_ms() -> u64 {
    500
}

fn default_max_delay_ms() -> u64 {
    10_000
}

fn default_backoff_multiplier() -> f64 {
    2.0
}

/// Wallet fixtures shared by the scenarios.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalletConfig {
    /// Name of the wallet created by the setup scenario.
    #[serde(default = "default_wallet_name")]
    pub name: String,

    #[serde(default = "default_wallet_password")]
    pub password: String,

    /// Accessible name suffix of the wallet button in the manage menu.
    #[serde(default = "default_address_label")]
    pub address_label: String,

    #[serde(default)]
    pub seed_phrase: Option<String>,

    #[serde(default)]
    pub seed_phrase_two: Option<String>,

    #[serde(default)]
    pub private_key: Option<String>,
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            name: default_wallet_name(),
            password: default_wallet_password(),
            address_label: default_address_label(),
            seed_phrase: None,
            seed_phrase_two: None,
            private_key: None,
        }
    }
}

fn default_wallet_name() -> String {
    "Test wallet 1".to_string()
}

fn default_wallet_password() -> String {
    "Testtest123!".to_string()
}

fn default_address_label() -> String {
    "terra1...6cw6qmfdnl9un23yxs".to_string()
}

/// Log output configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_dir")]
    pub dir: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            dir: default_log_dir(),
        }
    }
}

fn default_log_dir() -> String {
    "~/.station-e2e/logs".to_string()
}
