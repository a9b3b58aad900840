//! Wallet recovery from a seed phrase.

use std::sync::Arc;

use station_browser::{BrowserContext, Locator};
use tokio_util::sync::CancellationToken;
use tracing::info;

use super::{Route, RouteSession};
use crate::actions::{ButtonLookup, PageActions};
use crate::error::PageError;
use crate::forms::{DONE_ALL_ICON, SEED_FORM};
use crate::home::HomePage;
use crate::settings::PageSettings;

/// Fragment the recovery flow reaches once the wallet is stored.
const RECOVERED_FRAGMENT: &str = "recover#3";

/// The "Import from seed phrase" tab.
pub struct SeedPage {
    session: RouteSession,
}

impl SeedPage {
    pub async fn open(
        context: Arc<dyn BrowserContext>,
        settings: Arc<PageSettings>,
        cancel: &CancellationToken,
    ) -> Result<Self, PageError> {
        let session = RouteSession::open(context, settings, Route::Seed, cancel).await?;
        Ok(Self { session })
    }

    pub async fn from_home(home: HomePage, cancel: &CancellationToken) -> Result<Self, PageError> {
        let session = RouteSession::from_home(home, Route::Seed, cancel).await?;
        Ok(Self { session })
    }

    pub fn session(&self) -> &RouteSession {
        &self.session
    }

    /// Recover a wallet and connect it.
    pub async fn fill_seed_form(
        &mut self,
        name: &str,
        password: &str,
        seed: &str,
    ) -> Result<(), PageError> {
        let result = self.submit_seed_form(name, password, seed).await;
        self.session.settle(result)?;
        info!("Recovered wallet '{}'", name);
        Ok(())
    }

    async fn submit_seed_form(&self, name: &str, password: &str, seed: &str) -> Result<(), PageError> {
        let page = self.session.actions();
        let form = SEED_FORM;

        page.focus_loaded().await?;
        page.fill(&Locator::css(form.name), name).await?;
        page.fill(&Locator::css(form.password), password).await?;
        page.fill(&Locator::css(form.confirm), password).await?;
        page.fill(&Locator::css(form.mnemonic), seed).await?;
        page.click(&Locator::css(form.submit)).await?;
        page.wait_for_url(
            RECOVERED_FRAGMENT,
            self.session.settings().timeouts.navigation(),
        )
        .await?;

        connect_wallet(page).await
    }
}

/// Wait for the completion screen and press Connect.
pub(super) async fn connect_wallet(page: &PageActions) -> Result<(), PageError> {
    page.expect_button(ButtonLookup::test_id(DONE_ALL_ICON), "button", false)
        .await?;
    page.click_button(ButtonLookup::name("Connect")).await
}
