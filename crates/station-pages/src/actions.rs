//! Interaction primitives shared by every page object.

use std::sync::Arc;
use std::time::Duration;

use regex::Regex;
use station_browser::{Locator, PageHandle, TextMatch};
use station_config::TimeoutConfig;
use tokio::time::{sleep, Instant};
use tracing::{debug, trace};

use crate::error::PageError;

/// Test id of the modal close control.
pub const CLOSE_ICON: &str = "CloseIcon";

/// How [`PageActions::expect_button`] finds its button.
#[derive(Debug, Clone, PartialEq)]
pub enum ButtonLookup {
    /// Accessible name.
    Name(TextMatch),
    /// `data-testid`.
    TestId(String),
    /// Inside a `div` whose text matches.
    Element(TextMatch),
    /// Inside a list item whose text starts with the asset symbol.
    Asset(String),
    /// The "Send back" control inside the heading with this name.
    SendBack(String),
}

impl ButtonLookup {
    /// Exact accessible name.
    pub fn name(name: impl Into<String>) -> Self {
        ButtonLookup::Name(TextMatch::exact(name))
    }

    pub fn test_id(id: impl Into<String>) -> Self {
        ButtonLookup::TestId(id.into())
    }

    /// Locator for a control with `role` found through this lookup.
    pub fn locator(&self, role: &str) -> Locator {
        match self {
            ButtonLookup::Name(name) => Locator::role_named(role, name.clone()),
            ButtonLookup::TestId(id) => Locator::test_id(id.as_str()),
            ButtonLookup::Element(text) => Locator::css("div")
                .filter_has_text(text.clone())
                .within(Locator::role(role)),
            ButtonLookup::Asset(symbol) => Locator::role("listitem")
                .filter_has_text(TextMatch::pattern(format!("^{}", regex::escape(symbol))))
                .within(Locator::role(role)),
            ButtonLookup::SendBack(heading) => {
                Locator::role_named("heading", TextMatch::contains(heading.as_str()))
                    .within(Locator::role_named(role, TextMatch::contains("Send back")))
            }
        }
    }
}

/// Options for [`PageActions::expect_text`].
#[derive(Debug, Clone, Copy, Default)]
pub struct TextExpectation {
    pub click: bool,
    pub close_modal: bool,
    pub heading: bool,
    /// Defaults to the configured expect timeout.
    pub timeout: Option<Duration>,
}

impl TextExpectation {
    pub fn clicked() -> Self {
        Self {
            click: true,
            ..Self::default()
        }
    }

    pub fn heading() -> Self {
        Self {
            heading: true,
            ..Self::default()
        }
    }

    pub fn and_click(mut self) -> Self {
        self.click = true;
        self
    }

    pub fn and_close(mut self) -> Self {
        self.close_modal = true;
        self
    }

    pub fn within(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Whether `href` is `prefix` followed by at least one alphanumeric character.
pub fn href_matches(prefix: &str, href: &str) -> bool {
    Regex::new(&format!("{}[a-zA-Z0-9]+", regex::escape(prefix)))
        .map(|re| re.is_match(href))
        .unwrap_or(false)
}

/// A page handle paired with the configured waits.
///
/// Page objects own one of these instead of inheriting from a base page.
#[derive(Clone)]
pub struct PageActions {
    page: Arc<dyn PageHandle>,
    timeouts: TimeoutConfig,
}

impl PageActions {
    pub fn new(page: Arc<dyn PageHandle>, timeouts: TimeoutConfig) -> Self {
        Self { page, timeouts }
    }

    pub fn page(&self) -> &Arc<dyn PageHandle> {
        &self.page
    }

    pub fn timeouts(&self) -> &TimeoutConfig {
        &self.timeouts
    }

    /// Poll until the locator's visibility equals `visible` or `timeout` passes.
    async fn wait_for_visibility(
        &self,
        locator: &Locator,
        visible: bool,
        timeout: Duration,
    ) -> bool {
        let deadline = Instant::now() + timeout;
        loop {
            match self.page.is_visible(locator).await {
                Ok(state) if state == visible => return true,
                Ok(_) => {}
                // The document may be swapped out mid-query; treat as not yet.
                Err(e) => trace!("Visibility check for {} failed: {}", locator, e),
            }
            if Instant::now() >= deadline {
                return false;
            }
            sleep(self.timeouts.poll_interval()).await;
        }
    }

    pub async fn expect_visible(
        &self,
        locator: &Locator,
        timeout: Option<Duration>,
    ) -> Result<(), PageError> {
        let timeout = timeout.unwrap_or_else(|| self.timeouts.expect());
        if self.wait_for_visibility(locator, true, timeout).await {
            Ok(())
        } else {
            Err(PageError::not_visible(locator, timeout))
        }
    }

    pub async fn expect_hidden(
        &self,
        locator: &Locator,
        timeout: Option<Duration>,
    ) -> Result<(), PageError> {
        let timeout = timeout.unwrap_or_else(|| self.timeouts.expect());
        if self.wait_for_visibility(locator, false, timeout).await {
            Ok(())
        } else {
            Err(PageError::still_visible(locator, timeout))
        }
    }

    /// Wait for a locator to be visible, then click it.
    pub async fn click(&self, locator: &Locator) -> Result<(), PageError> {
        self.expect_visible(locator, None).await?;
        self.page.click(locator).await?;
        Ok(())
    }

    /// Wait for a locator to be visible, then fill it.
    pub async fn fill(&self, locator: &Locator, value: &str) -> Result<(), PageError> {
        self.expect_visible(locator, None).await?;
        self.page.fill(locator, value).await?;
        Ok(())
    }

    /// Assert a button is visible, clicking it when `click` is set.
    pub async fn expect_button(
        &self,
        lookup: ButtonLookup,
        role: &str,
        click: bool,
    ) -> Result<(), PageError> {
        let locator = lookup.locator(role);
        self.expect_visible(&locator, None).await?;
        if click {
            debug!("Clicking {}", locator);
            self.page.click(&locator).await?;
        }
        Ok(())
    }

    /// Shorthand for clicking a `button` role control.
    pub async fn click_button(&self, lookup: ButtonLookup) -> Result<(), PageError> {
        self.expect_button(lookup, "button", true).await
    }

    /// Assert the first text (or heading) match is visible.
    pub async fn expect_text(
        &self,
        text: TextMatch,
        expectation: TextExpectation,
    ) -> Result<(), PageError> {
        let locator = if expectation.heading {
            Locator::role_named("heading", text)
        } else {
            Locator::text(text)
        }
        .first();

        self.expect_visible(&locator, expectation.timeout).await?;

        if expectation.click {
            self.page.click(&locator).await?;
        }
        if expectation.close_modal {
            self.close_modal().await?;
        }
        Ok(())
    }

    /// Assert exact text is visible.
    pub async fn see(&self, text: &str) -> Result<(), PageError> {
        self.expect_text(TextMatch::exact(text), TextExpectation::default())
            .await
    }

    /// Fill `selector`, or the first textbox when no selector is given.
    pub async fn user_input(&self, text: &str, selector: Option<&str>) -> Result<(), PageError> {
        let locator = match selector {
            Some(selector) => Locator::css(selector),
            None => Locator::role("textbox"),
        }
        .first();
        self.fill(&locator, text).await
    }

    fn submit_button() -> Locator {
        Locator::role_named("button", TextMatch::contains("Submit"))
    }

    /// Click the Submit button.
    pub async fn submit(&self) -> Result<(), PageError> {
        self.click(&Self::submit_button()).await
    }

    /// Assert the Submit button carries an empty `disabled` attribute. Never clicks.
    pub async fn assert_submit_disabled(&self) -> Result<(), PageError> {
        let button = Self::submit_button();
        self.expect_visible(&button, None).await?;

        let timeout = self.timeouts.expect();
        let deadline = Instant::now() + timeout;
        loop {
            let disabled = self.page.get_attribute(&button, "disabled").await?;
            if disabled.as_deref() == Some("") {
                return Ok(());
            }
            if Instant::now() >= deadline {
                return Err(PageError::AssertionFailed(format!(
                    "{} not disabled within {:?}",
                    button, timeout
                )));
            }
            sleep(self.timeouts.poll_interval()).await;
        }
    }

    /// Assert a link is visible and its href is `href_prefix` plus an id.
    pub async fn expect_link(&self, name: TextMatch, href_prefix: &str) -> Result<(), PageError> {
        let link = Locator::role_named("link", name).first();
        self.expect_visible(&link, None).await?;

        let href = self
            .page
            .get_attribute(&link, "href")
            .await?
            .unwrap_or_default();
        if href_matches(href_prefix, &href) {
            Ok(())
        } else {
            Err(PageError::AssertionFailed(format!(
                "{} href '{}' does not start with '{}'",
                link, href, href_prefix
            )))
        }
    }

    /// Poll until the page URL contains `fragment`.
    pub async fn wait_for_url(&self, fragment: &str, timeout: Duration) -> Result<(), PageError> {
        let deadline = Instant::now() + timeout;
        loop {
            if self.page.url().await?.contains(fragment) {
                return Ok(());
            }
            if Instant::now() >= deadline {
                return Err(PageError::NavigationTimedOut {
                    fragment: fragment.to_string(),
                    timeout,
                });
            }
            sleep(self.timeouts.poll_interval()).await;
        }
    }

    pub async fn reload(&self) -> Result<(), PageError> {
        self.page.reload().await?;
        Ok(())
    }

    pub async fn bring_to_front(&self) -> Result<(), PageError> {
        self.page.bring_to_front().await?;
        Ok(())
    }

    /// Bring the page forward and wait for its document to load.
    pub async fn focus_loaded(&self) -> Result<(), PageError> {
        self.page.bring_to_front().await?;
        self.page.wait_for_load_state().await?;
        Ok(())
    }

    pub async fn close_modal(&self) -> Result<(), PageError> {
        self.click_button(ButtonLookup::test_id(CLOSE_ICON)).await
    }

    pub async fn pause(&self, duration: Duration) {
        sleep(duration).await;
    }
}

#[cfg(test)]
#[path = "actions_tests.rs"]
mod tests;
