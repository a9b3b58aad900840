//! Manage-assets modal.

use station_browser::{Locator, TextMatch};
use tracing::debug;

use super::core::HomePage;
use crate::actions::{ButtonLookup, TextExpectation};
use crate::error::PageError;

/// Assets the test wallets do not hold.
const UNAVAILABLE_ASSETS: [&str; 3] = ["AKT", "BNB", "DOT"];

/// Filters and an asset each one affects.
const FILTERS: [(&str, &str); 2] = [
    ("Hide non-whitelisted", "ATOM-OSMO LP"),
    ("Hide low-balance", "axlUSDT"),
];

impl HomePage {
    /// Row of `symbol` in the asset list.
    pub(super) fn asset_row(symbol: &str) -> Locator {
        let symbol = regex::escape(symbol);
        Locator::role("article")
            .filter_has_text(TextMatch::pattern(format!("^{symbol}.*?{symbol}$")))
    }

    async fn open_manage_assets(&self) -> Result<(), PageError> {
        self.actions.click_button(ButtonLookup::name("Manage")).await
    }

    /// Toggle `symbol` on and off in the manage-assets modal, checking the asset list each time.
    pub async fn evaluate_asset(&self, symbol: &str) -> Result<(), PageError> {
        let row = Self::asset_row(symbol);
        for shown in [true, false] {
            self.open_manage_assets().await?;
            self.actions.user_input(symbol, None).await?;
            self.actions
                .click_button(ButtonLookup::Asset(symbol.to_string()))
                .await?;
            self.actions.close_modal().await?;

            if shown {
                self.actions.expect_visible(&row, None).await?;
            } else {
                self.actions.expect_hidden(&row, None).await?;
            }
            debug!("Asset {} shown={}", symbol, shown);
        }
        Ok(())
    }

    /// Toggle `filter` on and off, checking `asset` after each toggle.
    pub async fn evaluate_filter(&self, filter: &str, asset: &str) -> Result<(), PageError> {
        let item = Locator::text(TextMatch::contains(asset)).first();
        for checked in [true, false] {
            self.open_manage_assets().await?;
            self.actions
                .expect_text(
                    TextMatch::exact(filter),
                    TextExpectation::clicked().and_close(),
                )
                .await?;

            if checked {
                self.actions.expect_visible(&item, None).await?;
            } else {
                self.actions.expect_hidden(&item, None).await?;
            }
        }
        Ok(())
    }

    pub async fn evaluate_manage_assets(&self) -> Result<(), PageError> {
        self.actions.reload().await?;
        for symbol in UNAVAILABLE_ASSETS {
            self.evaluate_asset(symbol).await?;
        }
        for (filter, asset) in FILTERS {
            self.evaluate_filter(filter, asset).await?;
        }
        Ok(())
    }
}
