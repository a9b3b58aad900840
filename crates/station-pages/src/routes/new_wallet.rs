//! New wallet creation, including the mnemonic quiz.

use std::sync::Arc;

use station_browser::{BrowserContext, Locator};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use super::seed::connect_wallet;
use super::{Route, RouteSession};
use crate::actions::ButtonLookup;
use crate::error::PageError;
use crate::forms::CREATE_WALLET_FORM;
use crate::home::HomePage;
use crate::settings::PageSettings;

/// Quiz questions asked after the mnemonic is shown.
const QUIZ_QUESTIONS: i64 = 2;

/// 1-based word index from a quiz label such as "3rd word".
pub fn parse_quiz_index(label: &str) -> Option<usize> {
    label
        .split(|c: char| !c.is_ascii_digit())
        .find(|digits| !digits.is_empty())?
        .parse()
        .ok()
        .filter(|index| *index > 0)
}

/// Word at a 1-based `index` of a mnemonic.
pub fn word_at(mnemonic: &str, index: usize) -> Option<&str> {
    mnemonic.split_whitespace().nth(index.checked_sub(1)?)
}

/// The "New wallet" tab.
pub struct NewWalletPage {
    session: RouteSession,
}

impl NewWalletPage {
    pub async fn open(
        context: Arc<dyn BrowserContext>,
        settings: Arc<PageSettings>,
        cancel: &CancellationToken,
    ) -> Result<Self, PageError> {
        let session = RouteSession::open(context, settings, Route::NewWallet, cancel).await?;
        Ok(Self { session })
    }

    pub async fn from_home(home: HomePage, cancel: &CancellationToken) -> Result<Self, PageError> {
        let session = RouteSession::from_home(home, Route::NewWallet, cancel).await?;
        Ok(Self { session })
    }

    pub fn session(&self) -> &RouteSession {
        &self.session
    }

    /// Create a wallet, pass the mnemonic quiz, connect, and check the home screen.
    pub async fn fill_create_wallet_form(
        &mut self,
        name: &str,
        password: &str,
    ) -> Result<(), PageError> {
        let result = self.create_wallet(name, password).await;
        self.session.settle(result)?;
        info!("Created wallet '{}'", name);
        Ok(())
    }

    async fn create_wallet(&self, name: &str, password: &str) -> Result<(), PageError> {
        let page = self.session.actions();
        let form = CREATE_WALLET_FORM;

        page.focus_loaded().await?;
        page.fill(&Locator::css(form.name), name).await?;
        page.fill(&Locator::css(form.password), password).await?;
        page.fill(&Locator::css(form.confirm), password).await?;

        let mnemonic_field = Locator::css(form.mnemonic_text);
        page.expect_visible(&mnemonic_field, None).await?;
        let mnemonic = page
            .page()
            .text_content(&mnemonic_field)
            .await?
            .ok_or_else(|| PageError::AssertionFailed("mnemonic not shown".into()))?;

        page.click(&Locator::css(form.checkbox)).await?;
        page.click(&Locator::css(form.submit)).await?;

        for question in 0..QUIZ_QUESTIONS {
            let label = Locator::css(form.quiz_label).nth(question);
            page.expect_visible(&label, None).await?;
            let text = page.page().text_content(&label).await?.unwrap_or_default();
            let word = parse_quiz_index(&text)
                .and_then(|index| word_at(&mnemonic, index))
                .ok_or_else(|| {
                    PageError::AssertionFailed(format!("cannot answer quiz label '{}'", text))
                })?;
            debug!("Quiz '{}' answered", text);
            page.click_button(ButtonLookup::name(word)).await?;
        }

        page.click(&Locator::css(form.submit)).await?;
        connect_wallet(page).await?;

        let home = self.session.home();
        home.refresh().await?;
        home.verify_wallet_home(name).await
    }
}
