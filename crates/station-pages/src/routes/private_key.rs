//! Wallet import from a private key.

use std::sync::Arc;

use station_browser::{BrowserContext, Locator};
use tokio_util::sync::CancellationToken;
use tracing::info;

use super::seed::connect_wallet;
use super::{Route, RouteSession};
use crate::error::PageError;
use crate::forms::PRIVATE_KEY_FORM;
use crate::home::HomePage;
use crate::settings::PageSettings;

/// The "Import from private key" tab.
pub struct PrivateKeyPage {
    session: RouteSession,
}

impl PrivateKeyPage {
    pub async fn open(
        context: Arc<dyn BrowserContext>,
        settings: Arc<PageSettings>,
        cancel: &CancellationToken,
    ) -> Result<Self, PageError> {
        let session = RouteSession::open(context, settings, Route::PrivateKey, cancel).await?;
        Ok(Self { session })
    }

    pub async fn from_home(home: HomePage, cancel: &CancellationToken) -> Result<Self, PageError> {
        let session = RouteSession::from_home(home, Route::PrivateKey, cancel).await?;
        Ok(Self { session })
    }

    pub fn session(&self) -> &RouteSession {
        &self.session
    }

    pub async fn fill_private_key_form(&self, key: &str, password: &str) -> Result<(), PageError> {
        let page = self.session.actions();
        page.focus_loaded().await?;
        page.fill(&Locator::css(PRIVATE_KEY_FORM.key), key).await?;
        page.fill(&Locator::css(PRIVATE_KEY_FORM.password), password)
            .await
    }

    /// Import the key and connect the wallet.
    pub async fn import_wallet(&mut self, key: &str, password: &str) -> Result<(), PageError> {
        let result = async {
            self.fill_private_key_form(key, password).await?;
            self.session.actions().submit().await?;
            connect_wallet(self.session.actions()).await
        }
        .await;
        self.session.settle(result)?;
        info!("Imported wallet from private key");
        Ok(())
    }

    /// A malformed key shows "Invalid" and keeps Submit disabled.
    pub async fn expect_invalid_key(&mut self, key: &str, password: &str) -> Result<(), PageError> {
        let result = async {
            self.fill_private_key_form(key, password).await?;
            self.session.actions().see("Invalid").await?;
            self.session.actions().assert_submit_disabled().await
        }
        .await;
        self.session.settle_rejected(result)
    }

    /// A valid key with the wrong password is refused on submit.
    pub async fn expect_wrong_password(
        &mut self,
        key: &str,
        password: &str,
    ) -> Result<(), PageError> {
        let result = async {
            self.fill_private_key_form(key, password).await?;
            self.session.actions().submit().await?;
            self.session.actions().see("Incorrect password").await
        }
        .await;
        self.session.settle_rejected(result)
    }
}
