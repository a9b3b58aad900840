//! Multisig wallet creation.

use std::sync::Arc;

use station_browser::{BrowserContext, Locator};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use super::{Route, RouteSession};
use crate::actions::ButtonLookup;
use crate::error::PageError;
use crate::forms::{
    ADD_ICON, DEFAULT_MULTISIG_INPUTS, DONE_ALL_ICON, MULTISIG_FORM, REMOVE_ICON, SEED_FORM,
};
use crate::home::HomePage;
use crate::settings::PageSettings;

/// Clicks needed to go from the default signer inputs to the wanted count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignerAdjustment {
    Remove(usize),
    Add(usize),
    Keep,
}

pub fn signer_adjustment(signers: usize) -> SignerAdjustment {
    use std::cmp::Ordering;

    match signers.cmp(&DEFAULT_MULTISIG_INPUTS) {
        Ordering::Less => SignerAdjustment::Remove(DEFAULT_MULTISIG_INPUTS - signers),
        Ordering::Greater => SignerAdjustment::Add(signers - DEFAULT_MULTISIG_INPUTS),
        Ordering::Equal => SignerAdjustment::Keep,
    }
}

/// Reject an empty signer list or a threshold outside `1..=signers`.
pub fn check_multisig_arguments(addresses: &[String], threshold: usize) -> Result<(), PageError> {
    if addresses.is_empty() {
        return Err(PageError::InvalidArgument(
            "a multisig wallet needs at least one address".into(),
        ));
    }
    if threshold == 0 || threshold > addresses.len() {
        return Err(PageError::InvalidArgument(format!(
            "threshold {} outside 1..={}",
            threshold,
            addresses.len()
        )));
    }
    Ok(())
}

/// The "New multisig wallet" tab.
pub struct MultiSigPage {
    session: RouteSession,
}

impl MultiSigPage {
    pub async fn open(
        context: Arc<dyn BrowserContext>,
        settings: Arc<PageSettings>,
        cancel: &CancellationToken,
    ) -> Result<Self, PageError> {
        let session = RouteSession::open(context, settings, Route::MultiSig, cancel).await?;
        Ok(Self { session })
    }

    pub async fn from_home(home: HomePage, cancel: &CancellationToken) -> Result<Self, PageError> {
        let session = RouteSession::from_home(home, Route::MultiSig, cancel).await?;
        Ok(Self { session })
    }

    pub fn session(&self) -> &RouteSession {
        &self.session
    }

    /// Create an M-of-N multisig wallet from signer addresses.
    ///
    /// Arguments are checked before anything is clicked.
    pub async fn create_multisig_wallet(
        &mut self,
        addresses: &[String],
        threshold: usize,
        name: &str,
    ) -> Result<(), PageError> {
        check_multisig_arguments(addresses, threshold)?;

        let result = self.build_wallet(addresses, threshold, name).await;
        self.session.settle(result)?;
        info!(
            "Created {}-of-{} multisig wallet '{}'",
            threshold,
            addresses.len(),
            name
        );
        Ok(())
    }

    async fn build_wallet(
        &self,
        addresses: &[String],
        threshold: usize,
        name: &str,
    ) -> Result<(), PageError> {
        let page = self.session.actions();
        let form = MULTISIG_FORM;
        let submit = Locator::css(SEED_FORM.submit);

        page.focus_loaded().await?;
        let adjustment = match signer_adjustment(addresses.len()) {
            SignerAdjustment::Remove(n) => Some((Locator::test_id(REMOVE_ICON).last(), n)),
            SignerAdjustment::Add(n) => Some((Locator::test_id(ADD_ICON).first(), n)),
            SignerAdjustment::Keep => None,
        };
        if let Some((control, clicks)) = adjustment {
            debug!("Adjusting signer inputs with {} click(s) on {}", clicks, control);
            for _ in 0..clicks {
                page.click(&control).await?;
            }
        }

        for (index, address) in addresses.iter().enumerate() {
            page.fill(&Locator::css(form.address_input(index)), address)
                .await?;
        }
        page.fill(&Locator::css(form.threshold), &threshold.to_string())
            .await?;
        page.click(&submit).await?;

        page.fill(&Locator::css(form.name), name).await?;
        page.click(&submit).await?;
        page.expect_button(ButtonLookup::test_id(DONE_ALL_ICON), "button", false)
            .await
    }
}
