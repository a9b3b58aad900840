//! Settings modal: network, language, currency, theme and advanced.

use station_browser::TextMatch;

use super::core::HomePage;
use crate::actions::{ButtonLookup, TextExpectation};
use crate::error::PageError;
use crate::forms::SETTINGS_ICON;

const THEMES: [&str; 5] = ["Blossom", "Light", "Madness", "Moon", "Whale"];

impl HomePage {
    /// Click a settings button, opening the modal first when `initialize` is set.
    pub async fn select_settings(
        &self,
        button: &str,
        initialize: bool,
        close: bool,
    ) -> Result<(), PageError> {
        if initialize {
            self.actions
                .click_button(ButtonLookup::test_id(SETTINGS_ICON))
                .await?;
        }
        self.actions.click_button(ButtonLookup::name(button)).await?;
        if close {
            self.actions.close_modal().await?;
        }
        Ok(())
    }

    pub async fn evaluate_settings(&self) -> Result<(), PageError> {
        self.evaluate_network().await?;
        self.evaluate_language().await?;
        self.evaluate_currency().await?;
        self.evaluate_theme().await?;
        self.evaluate_advanced().await
    }

    async fn evaluate_network(&self) -> Result<(), PageError> {
        self.select_settings("Network Mainnet", true, false).await?;
        self.select_settings("Testnets", false, false).await?;
        self.actions.see("TESTNET").await?;

        self.select_settings("Network Testnet", true, false).await?;
        self.select_settings("Terra Classic", false, false).await?;
        self.actions.see("CLASSIC").await?;

        self.select_settings("Network Classic", true, false).await?;
        self.select_settings("Mainnets", false, false).await
    }

    async fn evaluate_language(&self) -> Result<(), PageError> {
        self.select_settings("Language English", true, false).await?;
        self.select_settings("Español", false, true).await?;
        self.actions.see("Reciba").await?;

        self.select_settings("Idioma Español", true, false).await?;
        self.select_settings("中文", false, true).await?;
        self.actions.see("购买").await?;

        self.select_settings("语言 中文", true, false).await?;
        self.select_settings("English", false, true).await
    }

    async fn evaluate_currency(&self) -> Result<(), PageError> {
        self.select_settings("Currency USD", true, false).await?;
        self.actions.user_input("JPY", None).await?;
        self.select_settings("¥ - Japanese Yen", false, true).await?;
        self.actions.see("¥ —").await?;

        self.select_settings("Currency JPY", true, false).await?;
        self.actions.user_input("USD", None).await?;
        self.select_settings("$ - United States Dollar", false, true)
            .await?;
        self.actions.see("$ —").await
    }

    async fn evaluate_theme(&self) -> Result<(), PageError> {
        self.select_settings("Theme Dark", true, false).await?;
        for theme in THEMES {
            self.actions
                .expect_text(TextMatch::exact(theme), TextExpectation::clicked())
                .await?;
        }
        self.actions
            .expect_text(
                TextMatch::exact("Dark"),
                TextExpectation::clicked().and_close(),
            )
            .await
    }

    async fn evaluate_advanced(&self) -> Result<(), PageError> {
        self.select_settings("Advanced", true, false).await?;
        self.actions
            .expect_text(
                TextMatch::exact("Developer Mode"),
                TextExpectation::clicked().and_close(),
            )
            .await?;
        self.actions
            .expect_text(
                TextMatch::pattern(r"^LUNA \d+$"),
                TextExpectation::heading().and_click(),
            )
            .await?;
        self.actions.see("uluna").await
    }
}
