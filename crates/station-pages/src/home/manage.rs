//! Manage-wallet menu: export, change password, lock and delete.

use station_browser::TextMatch;
use tracing::info;

use super::core::HomePage;
use crate::actions::{ButtonLookup, TextExpectation};
use crate::error::PageError;
use crate::forms::CHANGE_PASSWORD_FORM;

const WRONG_PASSWORD: &str = "wrong password";
/// Password the change-password step switches to.
pub(super) const CHANGED_PASSWORD: &str = "newpassword";

impl HomePage {
    /// Click a manage-wallet control, opening the wallet menu first when `initialize` is set.
    pub async fn select_manage(
        &self,
        link: &str,
        initialize: bool,
        role: &str,
    ) -> Result<(), PageError> {
        if initialize {
            let name = self.settings.wallet.name.as_str();
            self.actions.click_button(ButtonLookup::name(name)).await?;
            self.actions
                .click_button(ButtonLookup::name(self.wallet_entry(name)))
                .await?;
        }
        self.actions
            .expect_button(ButtonLookup::name(link), role, true)
            .await
    }

    /// Run export, change password, lock/unlock and delete against the default wallet.
    ///
    /// Leaves the extension with no wallet and its password changed.
    pub async fn evaluate_manage_wallet(&self) -> Result<(), PageError> {
        self.evaluate_export().await?;
        self.evaluate_change_password().await?;
        self.evaluate_lock().await?;
        self.evaluate_delete().await
    }

    async fn evaluate_export(&self) -> Result<(), PageError> {
        let password = self.settings.wallet.password.as_str();
        self.select_manage("Export wallet", true, "link").await?;

        self.actions.user_input(WRONG_PASSWORD, None).await?;
        self.actions.see("Incorrect password").await?;

        self.actions.user_input(password, None).await?;
        self.actions.submit().await?;
        self.actions
            .expect_text(
                TextMatch::exact("QR code"),
                TextExpectation::heading().and_close(),
            )
            .await?;

        self.actions
            .expect_text(TextMatch::exact("Private key"), TextExpectation::clicked())
            .await?;
        self.actions.user_input(password, None).await?;
        self.actions.submit().await?;
        self.actions
            .expect_text(
                TextMatch::exact("Private key"),
                TextExpectation::heading().and_close(),
            )
            .await
    }

    async fn evaluate_change_password(&self) -> Result<(), PageError> {
        let form = CHANGE_PASSWORD_FORM;
        self.select_manage("Change password", true, "link").await?;

        self.actions
            .user_input(WRONG_PASSWORD, Some(form.current))
            .await?;
        self.actions.see("Incorrect password").await?;

        self.actions.user_input("new", Some(form.password)).await?;
        self.actions
            .see("Password must be longer than 10 characters")
            .await?;

        self.actions
            .user_input(CHANGED_PASSWORD, Some(form.password))
            .await?;
        self.actions.user_input("newpass", Some(form.confirm)).await?;
        self.actions.see("Password does not match").await?;

        self.actions
            .user_input(&self.settings.wallet.password, Some(form.current))
            .await?;
        self.actions
            .user_input(CHANGED_PASSWORD, Some(form.password))
            .await?;
        self.actions
            .user_input(CHANGED_PASSWORD, Some(form.confirm))
            .await?;
        self.actions.submit().await?;
        self.actions.click_button(ButtonLookup::name("Confirm")).await?;
        info!("Wallet password changed");
        Ok(())
    }

    async fn evaluate_lock(&self) -> Result<(), PageError> {
        self.select_manage("Lock", true, "button").await?;

        self.select_manage(&self.settings.wallet.name, false, "link")
            .await?;
        self.actions.user_input(WRONG_PASSWORD, None).await?;
        self.actions.assert_submit_disabled().await?;

        self.actions.user_input(CHANGED_PASSWORD, None).await?;
        self.actions.submit().await
    }

    async fn evaluate_delete(&self) -> Result<(), PageError> {
        self.select_manage("Delete wallet", true, "link").await?;

        self.actions.user_input("Wrong name 1", None).await?;
        self.actions.assert_submit_disabled().await?;

        self.actions
            .user_input(&self.settings.wallet.name, None)
            .await?;
        self.actions.submit().await?;
        self.actions.click_button(ButtonLookup::name("Confirm")).await?;
        self.actions.see("Connect to Station").await?;
        info!("Wallet '{}' deleted", self.settings.wallet.name);
        Ok(())
    }
}
