//! Ledger access. Only the route itself is checked.

use std::sync::Arc;

use station_browser::BrowserContext;
use tokio_util::sync::CancellationToken;

use super::{Route, RouteSession};
use crate::error::PageError;
use crate::home::HomePage;
use crate::settings::PageSettings;

/// The "Access with ledger" tab.
pub struct LedgerPage {
    session: RouteSession,
}

impl LedgerPage {
    pub async fn open(
        context: Arc<dyn BrowserContext>,
        settings: Arc<PageSettings>,
        cancel: &CancellationToken,
    ) -> Result<Self, PageError> {
        let session = RouteSession::open(context, settings, Route::Ledger, cancel).await?;
        Ok(Self { session })
    }

    pub async fn from_home(home: HomePage, cancel: &CancellationToken) -> Result<Self, PageError> {
        let session = RouteSession::from_home(home, Route::Ledger, cancel).await?;
        Ok(Self { session })
    }

    pub fn session(&self) -> &RouteSession {
        &self.session
    }

    /// The ledger tab is loaded and still on its route.
    pub async fn verify_ledger_page(&mut self) -> Result<(), PageError> {
        let result = async {
            let page = self.session.actions();
            page.focus_loaded().await?;
            page.wait_for_url(
                Route::Ledger.fragment(),
                self.session.settings().timeouts.expect(),
            )
            .await
        }
        .await;
        self.session.settle(result)
    }
}
