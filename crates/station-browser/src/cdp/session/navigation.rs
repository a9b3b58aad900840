//! Navigation operations for CDP page session.

use std::time::{Duration, Instant};

use serde_json::json;
use tracing::debug;

use crate::cdp::error::CdpError;

use super::core::PageSession;

const READY_POLL: Duration = Duration::from_millis(100);

impl PageSession {
    /// Navigate to URL and wait until the document is loaded.
    pub async fn navigate(&self, url: &str, timeout: Duration) -> Result<String, CdpError> {
        let result = self
            .call("Page.navigate", Some(json!({"url": url})))
            .await?;

        if let Some(error) = result.get("errorText") {
            return Err(CdpError::NavigationFailed(
                error.as_str().unwrap_or("Unknown error").to_string(),
            ));
        }

        let frame_id = result["frameId"]
            .as_str()
            .unwrap_or("main")
            .to_string();

        self.wait_for_load(timeout).await?;

        debug!("Navigated to {}", url);
        Ok(frame_id)
    }

    /// Wait until `document.readyState` is `complete`.
    pub async fn wait_for_load(&self, timeout: Duration) -> Result<(), CdpError> {
        let start = Instant::now();

        loop {
            // Evaluations can fail transiently while the execution context is swapped.
            if let Ok(state) = self.evaluate("document.readyState").await {
                if state.as_str().is_some_and(is_loaded) {
                    return Ok(());
                }
            }

            if start.elapsed() > timeout {
                return Err(CdpError::Timeout(format!(
                    "Page load exceeded {}ms",
                    timeout.as_millis()
                )));
            }

            tokio::time::sleep(READY_POLL).await;
        }
    }

    /// Reload page.
    pub async fn reload(&self, timeout: Duration) -> Result<(), CdpError> {
        self.call("Page.reload", None).await?;
        // Give the old document a moment to unload before polling readyState.
        tokio::time::sleep(READY_POLL).await;
        self.wait_for_load(timeout).await
    }

    /// Bring this page's tab to the foreground.
    pub async fn bring_to_front(&self) -> Result<(), CdpError> {
        self.call("Page.bringToFront", None).await?;
        Ok(())
    }

    /// Get current URL.
    pub async fn get_url(&self) -> Result<String, CdpError> {
        let result = self.evaluate("window.location.href").await?;
        Ok(result.as_str().unwrap_or("").to_string())
    }
}

pub(super) fn is_loaded(ready_state: &str) -> bool {
    ready_state == "complete"
}
