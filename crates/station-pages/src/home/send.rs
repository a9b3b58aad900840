//! Send and send-back transactions with balance audits.

use std::time::Duration;

use regex::Regex;
use station_browser::{Locator, TextMatch};
use tracing::{debug, info};

use super::core::HomePage;
use crate::actions::{ButtonLookup, TextExpectation};
use crate::error::PageError;
use crate::forms::{AMOUNT_INPUT, BACK_ICON, CONTACTS_ICON, PASSWORD_INPUT};
use crate::retry::retry_action;

const TX_LINK: &str = "https://terrasco.pe/mainnet/tx/";
const ADDRESS_LINK: &str = "https://terrasco.pe/mainnet/address/";

const SEND_FORM_TEXTS: [&str; 14] = [
    "Send",
    "Asset",
    "axlUSDC",
    "Source chain",
    "Terra",
    "Recipient",
    "Amount",
    "Memo (optional)",
    "Check if this transaction requires a memo",
    "Fee",
    "LUNA",
    "Balance",
    "Balance after tx",
    "Password",
];

const SEND_BACK_FORM_TEXTS: [&str; 5] = ["Amount", "Fee", "Balance", "Balance after tx", "Password"];

/// A send to one of the wallet's own addresses, followed by a send back.
#[derive(Debug, Clone)]
pub struct SendScenario {
    pub token: String,
    /// Chain the token is sent from.
    pub origin: String,
    /// Chain path the token is sent to, hops separated by `-`.
    pub destination: String,
    pub amount: f64,
    /// Accessible name of the recipient in "Select from your addresses".
    pub recipient: String,
    /// Heading of the destination row holding the "Send back" control.
    pub send_back_heading: String,
    /// Wait for balances to refresh before reading them.
    pub settle: Duration,
}

impl Default for SendScenario {
    fn default() -> Self {
        Self {
            token: "axlUSDC".to_string(),
            origin: "Terra".to_string(),
            destination: "Axelar-Terra-Osmosis".to_string(),
            amount: 0.01,
            recipient: "Osmosis Osmosis osmo16...m4f9mj".to_string(),
            send_back_heading: "Osmosis Send back Axelar → Terra → Osmosis".to_string(),
            settle: Duration::from_secs(5),
        }
    }
}

impl SendScenario {
    /// Last chain of the destination path.
    pub fn destination_chain(&self) -> &str {
        self.destination.rsplit('-').next().unwrap_or(&self.destination)
    }
}

/// Pattern for a chain row on an asset page. Group 1 captures the token amount.
///
/// A chain path (`Axelar-Terra-Osmosis`) matches the row of its last chain,
/// which carries a "Send back" control and the path joined with arrows.
pub fn amount_pattern(token: &str, chain: &str) -> String {
    let amount = format!(r"\$ \d+\.[\d]{{2}}(\d+\.[\d]{{2}}) {token}$");
    match chain.rsplit_once('-') {
        Some((_, last)) => {
            let path = chain.replace('-', " → ");
            format!("^{last}Send back{path}{amount}")
        }
        None => format!("^{chain}{amount}"),
    }
}

/// Amount captured by `pattern` in `text`.
pub fn parse_amount(pattern: &str, text: &str) -> Option<f64> {
    let re = Regex::new(pattern).ok()?;
    re.captures(text)?.get(1)?.as_str().parse().ok()
}

pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn same_cents(a: f64, b: f64) -> bool {
    (round_cents(a) - round_cents(b)).abs() < 0.005
}

impl HomePage {
    /// Amount of `token` on `chain`, read from the open asset page.
    pub async fn extract_amount(&self, token: &str, chain: &str) -> Result<f64, PageError> {
        let pattern = amount_pattern(token, chain);
        self.actions
            .expect_text(
                TextMatch::pattern(pattern.as_str()),
                TextExpectation::default().within(self.settings.timeouts.navigation()),
            )
            .await?;

        let row = Locator::role("article").filter_has_text(TextMatch::pattern(pattern.as_str()));
        let text = self
            .page()
            .text_content(&row)
            .await?
            .unwrap_or_default();
        // textContent keeps the markup's line breaks and indentation.
        let text = text.split_whitespace().collect::<Vec<_>>().join(" ");
        parse_amount(&pattern, &text).ok_or_else(|| {
            PageError::AssertionFailed(format!("no {} amount for {} in '{}'", token, chain, text))
        })
    }

    /// Open the token's asset page and read its amounts on both chains.
    pub async fn evaluate_amounts(
        &self,
        token: &str,
        origin: &str,
        destination: &str,
        settle: Duration,
    ) -> Result<(f64, f64), PageError> {
        retry_action(
            self.page().as_ref(),
            || async move {
                self.go_to_asset_page(token, settle).await?;
                let origin_amount = self.extract_amount(token, origin).await?;
                let destination_amount = self.extract_amount(token, destination).await?;
                Ok((origin_amount, destination_amount))
            },
            || async { Ok(()) },
            &self.settings.retry,
        )
        .await
    }

    /// Navigate from the main page to the token's asset page.
    pub async fn go_to_asset_page(&self, token: &str, settle: Duration) -> Result<(), PageError> {
        let title = TextMatch::pattern(format!(r"^{} \d*$", regex::escape(token)));
        retry_action(
            self.page().as_ref(),
            || {
                let title = title.clone();
                async move {
                    self.actions.pause(settle).await;
                    self.actions.click(&Locator::role("heading").first()).await?;
                    self.actions
                        .expect_text(title, TextExpectation::heading().and_click())
                        .await?;
                    self.actions
                        .expect_visible(&Locator::text(TextMatch::contains(token)).first(), None)
                        .await
                }
            },
            || async { Ok(()) },
            &self.settings.retry,
        )
        .await
    }

    /// Check balances moved by `amount` from origin to destination.
    ///
    /// Balances lag behind the chain, so the whole read is retried under the
    /// configured policy until the amounts agree.
    #[allow(clippy::too_many_arguments)]
    pub async fn audit_transaction(
        &self,
        before_origin: f64,
        before_destination: f64,
        amount: f64,
        token: &str,
        origin: &str,
        destination: &str,
        settle: Duration,
    ) -> Result<(), PageError> {
        let expected_origin = round_cents(before_origin - amount);
        let expected_destination = round_cents(before_destination + amount);

        retry_action(
            self.page().as_ref(),
            || async move {
                self.actions.pause(settle).await;
                self.actions.reload().await?;
                let (after_origin, after_destination) = self
                    .evaluate_amounts(token, origin, destination, settle)
                    .await?;
                debug!(
                    before_origin,
                    after_origin, before_destination, after_destination, "Auditing balances"
                );

                if !same_cents(after_origin, expected_origin)
                    || !same_cents(after_destination, expected_destination)
                {
                    return Err(PageError::AssertionFailed(format!(
                        "expected {expected_origin}/{expected_destination} {token}, found {after_origin}/{after_destination}"
                    )));
                }
                self.actions
                    .click_button(ButtonLookup::test_id(BACK_ICON))
                    .await
            },
            || async { Ok(()) },
            &self.settings.retry,
        )
        .await?;

        info!("Confirmed {} {} moved from {} to {}", amount, token, origin, destination);
        Ok(())
    }

    async fn fill_send_form(&self, amount: f64) -> Result<(), PageError> {
        self.actions
            .user_input(&amount.to_string(), Some(AMOUNT_INPUT))
            .await?;
        self.actions
            .user_input(&self.settings.wallet.password, Some(PASSWORD_INPUT))
            .await?;
        self.actions.submit().await
    }

    async fn expect_broadcast_success(&self) -> Result<(), PageError> {
        let upper_hash = TextMatch::pattern("[A-Z0-9]{6}[.]{3}[A-Z0-9]{6}");
        let lower_address = TextMatch::pattern("[a-z0-9]{6}[.]{3}[a-z0-9]{6}");

        self.actions
            .expect_text(
                TextMatch::exact("Broadcasting transaction"),
                TextExpectation::heading(),
            )
            .await?;
        self.actions
            .expect_text(TextMatch::exact("Tx hash"), TextExpectation::heading())
            .await?;
        self.actions.expect_link(upper_hash.clone(), TX_LINK).await?;

        self.actions
            .expect_text(
                TextMatch::exact("Success!"),
                TextExpectation::heading().within(self.settings.timeouts.transaction()),
            )
            .await?;
        self.actions
            .expect_text(TextMatch::exact("Tx hash"), TextExpectation::heading())
            .await?;
        self.actions.expect_link(lower_address, ADDRESS_LINK).await?;
        self.actions.expect_link(upper_hash, TX_LINK).await?;
        self.actions.click_button(ButtonLookup::name("Confirm")).await
    }

    /// Send the scenario amount to the wallet's own address, then send it back.
    pub async fn evaluate_send(&self, scenario: &SendScenario) -> Result<(), PageError> {
        let SendScenario {
            token,
            origin,
            destination,
            amount,
            settle,
            ..
        } = scenario;
        let (amount, settle) = (*amount, *settle);

        let (before_origin, before_destination) = self
            .evaluate_amounts(token, origin, destination, settle)
            .await?;

        self.actions.click_button(ButtonLookup::name("Send")).await?;
        for text in SEND_FORM_TEXTS {
            self.actions.see(text).await?;
        }

        self.actions
            .click_button(ButtonLookup::test_id(CONTACTS_ICON))
            .await?;
        self.actions
            .click_button(ButtonLookup::name("Select from your addresses"))
            .await?;
        self.actions
            .click_button(ButtonLookup::name(scenario.recipient.as_str()))
            .await?;
        self.actions
            .see(&format!("Destination chain: {}", scenario.destination_chain()))
            .await?;

        self.fill_send_form(amount).await?;
        self.expect_broadcast_success().await?;
        self.audit_transaction(
            before_origin,
            before_destination,
            amount,
            token,
            origin,
            destination,
            settle,
        )
        .await?;

        self.evaluate_send_back(scenario).await
    }

    async fn evaluate_send_back(&self, scenario: &SendScenario) -> Result<(), PageError> {
        let SendScenario {
            token,
            origin,
            destination,
            amount,
            settle,
            send_back_heading,
            ..
        } = scenario;
        let (amount, settle) = (*amount, *settle);

        let (before_destination, before_origin) = self
            .evaluate_amounts(token, destination, origin, settle)
            .await?;

        retry_action(
            self.page().as_ref(),
            || async move {
                self.actions.pause(settle).await;
                self.actions
                    .click_button(ButtonLookup::SendBack(send_back_heading.clone()))
                    .await
            },
            || async move { self.go_to_asset_page(token, settle).await },
            &self.settings.retry,
        )
        .await?;

        self.actions
            .expect_visible(&Locator::role("dialog"), None)
            .await?;
        for text in SEND_BACK_FORM_TEXTS {
            self.actions.see(text).await?;
        }
        self.fill_send_form(amount).await?;
        self.actions.pause(settle).await;

        for text in SEND_BACK_FORM_TEXTS {
            self.actions
                .expect_text(
                    TextMatch::exact(text),
                    TextExpectation::default().within(self.settings.timeouts.transaction()),
                )
                .await?;
        }

        // Submitting again without a password is rejected.
        self.actions.submit().await?;
        self.actions
            .expect_text(
                TextMatch::exact("Incorrect password"),
                TextExpectation::default().and_close(),
            )
            .await?;

        self.audit_transaction(
            before_destination,
            before_origin,
            amount,
            token,
            destination,
            origin,
            settle,
        )
        .await
    }
}
