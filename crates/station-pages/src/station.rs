//! Scenario commands run against a connected browser.

use std::future::Future;
use std::sync::Arc;

use station_browser::{BrowserContext, CdpContext, ContextOptions};
use station_config::{StationConfig, ENV_PRIVATE_KEY, ENV_SEED_PHRASE, ENV_SEED_PHRASE_TWO};
use tokio_util::sync::CancellationToken;
use tracing::{error, info, info_span, Instrument};

use crate::error::PageError;
use crate::factory::PageFactory;
use crate::home::{HomePage, SendScenario};
use crate::routes::check_multisig_arguments;
use crate::settings::PageSettings;

/// Name of the wallet recovered from the second seed phrase.
pub const SECOND_WALLET_NAME: &str = "Test wallet 2";
/// Malformed key used by the invalid-key scenario.
pub const INVALID_PRIVATE_KEY: &str = "123123awe";
/// Password used by the wrong-password scenario.
pub const WRONG_PASSWORD: &str = "Wrongpassword123!";

/// Entry point for scenario commands.
///
/// Every page is built through one [`PageFactory`], which holds the browser
/// context, the shared settings and the token that aborts navigation waits.
pub struct Station {
    factory: PageFactory,
}

impl Station {
    pub fn new(context: Arc<dyn BrowserContext>, settings: PageSettings) -> Self {
        Self {
            factory: PageFactory::new(context, Arc::new(settings), CancellationToken::new()),
        }
    }

    /// Connect to the configured browser endpoint.
    pub async fn connect(config: &StationConfig) -> Result<Self, PageError> {
        let options = ContextOptions {
            slow_mo: config.browser.slow_mo(),
            load_timeout: config.timeouts.load(),
        };
        let context = CdpContext::connect(&config.browser.endpoint, options).await?;
        Ok(Self::new(Arc::new(context), PageSettings::from_config(config)))
    }

    pub fn settings(&self) -> &PageSettings {
        self.factory.settings()
    }

    /// Builder every scenario opens its pages through.
    pub fn factory(&self) -> &PageFactory {
        &self.factory
    }

    /// Abort pending navigation waits. Later waits return immediately.
    pub fn cancel(&self) {
        info!("Cancelling pending navigation");
        self.factory.cancel_token().cancel();
    }

    pub fn cancel_token(&self) -> CancellationToken {
        self.factory.cancel_token().clone()
    }

    fn secret<'a>(value: Option<&'a str>, var: &'static str) -> Result<&'a str, PageError> {
        value
            .filter(|v| !v.is_empty())
            .ok_or(PageError::MissingSecret(var))
    }

    fn seed_phrase(&self) -> Result<&str, PageError> {
        Self::secret(self.settings().wallet.seed_phrase.as_deref(), ENV_SEED_PHRASE)
    }

    fn seed_phrase_two(&self) -> Result<&str, PageError> {
        Self::secret(self.settings().wallet.seed_phrase_two.as_deref(), ENV_SEED_PHRASE_TWO)
    }

    fn private_key(&self) -> Result<&str, PageError> {
        Self::secret(self.settings().wallet.private_key.as_deref(), ENV_PRIVATE_KEY)
    }

    async fn home(&self) -> Result<HomePage, PageError> {
        self.factory.home().await
    }

    /// Home page with the manage-wallets menu open on "Add a wallet".
    async fn manage_wallets(&self) -> Result<HomePage, PageError> {
        let home = self.home().await?;
        home.go_to_manage_wallets_menu_from_home().await?;
        Ok(home)
    }

    async fn run<F, T>(&self, command: &'static str, f: F) -> Result<T, PageError>
    where
        F: Future<Output = Result<T, PageError>>,
    {
        let span = info_span!("command", name = command);
        async {
            info!("Starting");
            let result = f.await;
            match &result {
                Ok(_) => info!("Finished"),
                Err(e) => error!("Failed: {}", e),
            }
            result
        }
        .instrument(span)
        .await
    }

    /// Recover the default wallet from `SEED_PHRASE` and check it is listed.
    pub async fn setup_station(&self) -> Result<(), PageError> {
        self.run("setup_station", async {
            let seed = self.seed_phrase()?;
            let wallet = &self.settings().wallet;

            let home = self.home().await?;
            let mut page = self.factory.seed_from(home.clone()).await?;
            page.fill_seed_form(&wallet.name, &wallet.password, seed)
                .await?;

            home.refresh().await?;
            home.verify_first_wallet_added().await
        })
        .await
    }

    /// Add a second wallet from `SEED_PHRASE_TWO`.
    pub async fn recover_wallet_from_seed(&self) -> Result<(), PageError> {
        self.run("recover_wallet_from_seed", async {
            let seed = self.seed_phrase_two()?;
            let home = self.manage_wallets().await?;
            let mut page = self.factory.seed_from(home).await?;
            page.fill_seed_form(SECOND_WALLET_NAME, &self.settings().wallet.password, seed)
                .await
        })
        .await
    }

    pub async fn verify_manage_wallets_form(&self) -> Result<(), PageError> {
        self.run("verify_manage_wallets_form", async {
            let home = self.manage_wallets().await?;
            home.verify_elements_manage_wallets_form().await
        })
        .await
    }

    pub async fn create_wallet(&self, name: &str) -> Result<(), PageError> {
        self.run("create_wallet", async {
            let home = self.manage_wallets().await?;
            let mut page = self.factory.new_wallet_from(home).await?;
            page.fill_create_wallet_form(name, &self.settings().wallet.password)
                .await
        })
        .await
    }

    pub async fn import_wallet_from_private_key(&self) -> Result<(), PageError> {
        self.run("import_wallet_from_private_key", async {
            let key = self.private_key()?;
            let home = self.manage_wallets().await?;
            let mut page = self.factory.private_key_from(home).await?;
            page.import_wallet(key, &self.settings().wallet.password).await
        })
        .await
    }

    pub async fn import_wallet_from_private_key_invalid_key(&self) -> Result<(), PageError> {
        self.run("import_wallet_from_private_key_invalid_key", async {
            let home = self.manage_wallets().await?;
            let mut page = self.factory.private_key_from(home).await?;
            page.expect_invalid_key(INVALID_PRIVATE_KEY, &self.settings().wallet.password)
                .await
        })
        .await
    }

    pub async fn import_wallet_from_private_key_wrong_password(&self) -> Result<(), PageError> {
        self.run("import_wallet_from_private_key_wrong_password", async {
            let key = self.private_key()?;
            let home = self.manage_wallets().await?;
            let mut page = self.factory.private_key_from(home).await?;
            page.expect_wrong_password(key, WRONG_PASSWORD).await
        })
        .await
    }

    pub async fn evaluate_main_page(&self) -> Result<(), PageError> {
        self.run("evaluate_main_page", async {
            self.home()
                .await?
                .evaluate_main_page(&self.settings().wallet.name)
                .await
        })
        .await
    }

    pub async fn evaluate_settings(&self) -> Result<(), PageError> {
        self.run("evaluate_settings", async {
            self.home().await?.evaluate_settings().await
        })
        .await
    }

    pub async fn evaluate_manage_wallet(&self) -> Result<(), PageError> {
        self.run("evaluate_manage_wallet", async {
            self.home().await?.evaluate_manage_wallet().await
        })
        .await
    }

    pub async fn evaluate_manage_assets(&self) -> Result<(), PageError> {
        self.run("evaluate_manage_assets", async {
            self.home().await?.evaluate_manage_assets().await
        })
        .await
    }

    /// Send and send back the default amount of axlUSDC.
    pub async fn evaluate_send(&self) -> Result<(), PageError> {
        self.evaluate_send_with(&SendScenario::default()).await
    }

    pub async fn evaluate_send_with(&self, scenario: &SendScenario) -> Result<(), PageError> {
        self.run("evaluate_send", async {
            self.home().await?.evaluate_send(scenario).await
        })
        .await
    }

    pub async fn create_multisig_wallet(
        &self,
        addresses: &[String],
        threshold: usize,
        name: &str,
    ) -> Result<(), PageError> {
        self.run("create_multisig_wallet", async {
            check_multisig_arguments(addresses, threshold)?;
            let home = self.manage_wallets().await?;
            let mut page = self.factory.multisig_from(home).await?;
            page.create_multisig_wallet(addresses, threshold, name).await
        })
        .await
    }
}

#[cfg(test)]
#[path = "station_tests.rs"]
mod tests;
