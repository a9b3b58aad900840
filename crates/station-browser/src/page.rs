//! Page abstraction and its CDP implementation.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use crate::cdp::{CdpError, PageSession};
use crate::error::BrowserError;
use crate::locator::{locator_script, Locator, LocatorAction};

/// A single browser tab.
#[async_trait]
pub trait PageHandle: Send + Sync {
    fn target_id(&self) -> &str;

    async fn url(&self) -> Result<String, BrowserError>;

    /// Navigate and wait for the document to load.
    async fn goto(&self, url: &str) -> Result<(), BrowserError>;

    async fn reload(&self) -> Result<(), BrowserError>;

    async fn bring_to_front(&self) -> Result<(), BrowserError>;

    async fn wait_for_load_state(&self) -> Result<(), BrowserError>;

    /// Number of elements the locator matches right now.
    async fn count(&self, locator: &Locator) -> Result<usize, BrowserError>;

    /// Whether any matched element is currently visible.
    async fn is_visible(&self, locator: &Locator) -> Result<bool, BrowserError>;

    /// Click the centre of the first visible match.
    async fn click(&self, locator: &Locator) -> Result<(), BrowserError>;

    /// Replace the value of the first visible match.
    async fn fill(&self, locator: &Locator, value: &str) -> Result<(), BrowserError>;

    async fn text_content(&self, locator: &Locator) -> Result<Option<String>, BrowserError>;

    async fn get_attribute(
        &self,
        locator: &Locator,
        name: &str,
    ) -> Result<Option<String>, BrowserError>;
}

#[derive(Debug, Deserialize)]
struct Point {
    x: f64,
    y: f64,
}

/// [`PageHandle`] over an attached CDP session.
pub struct CdpPage {
    session: PageSession,
    load_timeout: Duration,
}

impl CdpPage {
    pub(crate) fn new(session: PageSession, load_timeout: Duration) -> Self {
        Self {
            session,
            load_timeout,
        }
    }

    async fn resolve(
        &self,
        locator: &Locator,
        action: LocatorAction,
        arg: Value,
    ) -> Result<Value, BrowserError> {
        let steps = serde_json::to_value(locator).map_err(CdpError::from)?;
        let value = self
            .session
            .call_function_on(locator_script(), &[steps, json!(action), arg])
            .await?;
        Ok(value)
    }
}

#[async_trait]
impl PageHandle for CdpPage {
    fn target_id(&self) -> &str {
        self.session.target_id()
    }

    async fn url(&self) -> Result<String, BrowserError> {
        Ok(self.session.get_url().await?)
    }

    async fn goto(&self, url: &str) -> Result<(), BrowserError> {
        self.session.navigate(url, self.load_timeout).await?;
        Ok(())
    }

    async fn reload(&self) -> Result<(), BrowserError> {
        Ok(self.session.reload(self.load_timeout).await?)
    }

    async fn bring_to_front(&self) -> Result<(), BrowserError> {
        Ok(self.session.bring_to_front().await?)
    }

    async fn wait_for_load_state(&self) -> Result<(), BrowserError> {
        Ok(self.session.wait_for_load(self.load_timeout).await?)
    }

    async fn count(&self, locator: &Locator) -> Result<usize, BrowserError> {
        let value = self.resolve(locator, LocatorAction::Count, Value::Null).await?;
        Ok(value.as_u64().unwrap_or(0) as usize)
    }

    async fn is_visible(&self, locator: &Locator) -> Result<bool, BrowserError> {
        let value = self.resolve(locator, LocatorAction::Visible, Value::Null).await?;
        Ok(value.as_bool().unwrap_or(false))
    }

    async fn click(&self, locator: &Locator) -> Result<(), BrowserError> {
        let value = self.resolve(locator, LocatorAction::Point, Value::Null).await?;
        if value.is_null() {
            return Err(BrowserError::ElementNotFound(locator.to_string()));
        }
        let point: Point = serde_json::from_value(value).map_err(CdpError::from)?;
        debug!("Clicking {}", locator);
        Ok(self.session.click(point.x, point.y).await?)
    }

    async fn fill(&self, locator: &Locator, value: &str) -> Result<(), BrowserError> {
        let focused = self.resolve(locator, LocatorAction::Focus, Value::Null).await?;
        if focused.as_bool() != Some(true) {
            return Err(BrowserError::ElementNotFound(locator.to_string()));
        }

        self.session.press_key_combo("Control+a").await?;
        if value.is_empty() {
            self.session.press_key("Backspace").await?;
        } else {
            self.session.type_text(value).await?;
        }
        debug!("Filled {}", locator);
        Ok(())
    }

    async fn text_content(&self, locator: &Locator) -> Result<Option<String>, BrowserError> {
        let value = self.resolve(locator, LocatorAction::Text, Value::Null).await?;
        Ok(value.as_str().map(str::to_string))
    }

    async fn get_attribute(
        &self,
        locator: &Locator,
        name: &str,
    ) -> Result<Option<String>, BrowserError> {
        let value = self
            .resolve(locator, LocatorAction::Attribute, json!(name))
            .await?;
        Ok(value.as_str().map(str::to_string))
    }
}
