//! Settings shared by every page object.

use station_config::{StationConfig, TimeoutConfig, WalletConfig};

use crate::retry::RetryPolicy;

/// Timeouts, retry policy and wallet fixtures, derived from [`StationConfig`].
#[derive(Debug, Clone, Default)]
pub struct PageSettings {
    pub timeouts: TimeoutConfig,
    pub retry: RetryPolicy,
    pub wallet: WalletConfig,
}

impl PageSettings {
    pub fn from_config(config: &StationConfig) -> Self {
        Self {
            timeouts: config.timeouts.clone(),
            retry: RetryPolicy::from(&config.retry),
            wallet: config.wallet.clone(),
        }
    }
}
