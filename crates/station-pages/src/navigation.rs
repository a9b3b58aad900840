//! Waiting for route tabs opened from the home page.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use station_browser::{BrowserContext, BrowserError, Locator, PageEvent, PageHandle, TextMatch};
use tokio::sync::broadcast;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::actions::PageActions;
use crate::error::PageError;

/// How a [`PageWaiter`] finished.
pub enum NavigationOutcome {
    Found(Arc<dyn PageHandle>),
    TimedOut,
    Cancelled,
}

impl fmt::Debug for NavigationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NavigationOutcome::Found(page) => f.debug_tuple("Found").field(&page.target_id()).finish(),
            NavigationOutcome::TimedOut => f.write_str("TimedOut"),
            NavigationOutcome::Cancelled => f.write_str("Cancelled"),
        }
    }
}

/// A subscription for the next page whose URL contains a fragment.
///
/// Subscribe before triggering the navigation; events emitted before
/// [`PageWaiter::subscribe`] are not observed.
pub struct PageWaiter {
    context: Arc<dyn BrowserContext>,
    fragment: String,
    events: broadcast::Receiver<PageEvent>,
}

impl PageWaiter {
    pub fn subscribe(context: Arc<dyn BrowserContext>, fragment: impl Into<String>) -> Self {
        let events = context.page_events();
        Self {
            context,
            fragment: fragment.into(),
            events,
        }
    }

    pub fn fragment(&self) -> &str {
        &self.fragment
    }

    /// Wait for a matching page, the timeout, or cancellation, whichever comes first.
    pub async fn wait(
        mut self,
        timeout: Duration,
        cancel: &CancellationToken,
    ) -> Result<NavigationOutcome, PageError> {
        let deadline = sleep(timeout);
        tokio::pin!(deadline);

        loop {
            tokio::select! {
                biased;

                _ = cancel.cancelled() => {
                    debug!("Wait for '{}' cancelled", self.fragment);
                    return Ok(NavigationOutcome::Cancelled);
                }
                _ = &mut deadline => {
                    debug!("No page matching '{}' within {:?}", self.fragment, timeout);
                    return Ok(NavigationOutcome::TimedOut);
                }
                event = self.events.recv() => match event {
                    Ok(event) if event.url.contains(&self.fragment) => {
                        debug!("Page {} matched '{}'", event.target_id, self.fragment);
                        let page = self.context.attach(&event.target_id).await?;
                        return Ok(NavigationOutcome::Found(page));
                    }
                    Ok(_) => {}
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        warn!("Missed {} page events waiting for '{}'", skipped, self.fragment);
                    }
                    Err(broadcast::error::RecvError::Closed) => {
                        return Err(BrowserError::NotConnected.into());
                    }
                },
            }
        }
    }
}

/// The home-page link that opens a route.
pub fn route_link(link_text: &str) -> Locator {
    Locator::text(TextMatch::exact(link_text)).first()
}

/// Click `link_text` on the home page and wait for the tab it opens.
pub async fn open_route(
    context: &Arc<dyn BrowserContext>,
    home: &PageActions,
    link_text: &str,
    fragment: &str,
    timeout: Duration,
    cancel: &CancellationToken,
) -> Result<Arc<dyn PageHandle>, PageError> {
    let waiter = PageWaiter::subscribe(context.clone(), fragment);
    home.click(&route_link(link_text)).await?;

    match waiter.wait(timeout, cancel).await? {
        NavigationOutcome::Found(page) => Ok(page),
        NavigationOutcome::TimedOut => Err(PageError::NavigationTimedOut {
            fragment: fragment.to_string(),
            timeout,
        }),
        NavigationOutcome::Cancelled => Err(PageError::NavigationCancelled(fragment.to_string())),
    }
}
