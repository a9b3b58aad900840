//! Browser context abstraction and its CDP implementation.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::{broadcast, Mutex};
use tracing::{debug, info, warn};

use crate::cdp::{CdpClient, CdpEvent, TargetInfo};
use crate::error::BrowserError;
use crate::page::{CdpPage, PageHandle};

/// Default time allowed for a document to finish loading.
pub const DEFAULT_LOAD_TIMEOUT: Duration = Duration::from_secs(30);

const PAGE_EVENT_CAPACITY: usize = 64;

/// A page target appeared or changed URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageEvent {
    pub target_id: String,
    pub url: String,
}

impl PageEvent {
    /// Translate a raw target discovery event, ignoring non-page targets.
    pub fn from_cdp(event: &CdpEvent) -> Option<Self> {
        let info = event.target_info()?;
        info.is_page().then(|| PageEvent {
            target_id: info.target_id,
            url: info.url,
        })
    }
}

/// An open page tab as listed by the browser, not yet attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageTarget {
    pub target_id: String,
    pub url: String,
}

impl PageTarget {
    /// `None` for service workers and other non-page targets.
    pub fn from_info(info: TargetInfo) -> Option<Self> {
        info.is_page().then(|| PageTarget {
            target_id: info.target_id,
            url: info.url,
        })
    }
}

/// A browser the page objects can discover tabs in and open tabs on.
#[async_trait]
pub trait BrowserContext: Send + Sync {
    /// URLs of running service workers, including extension background scripts.
    async fn service_worker_urls(&self) -> Result<Vec<String>, BrowserError>;

    /// Open page tabs with their URLs. Listing does not attach.
    async fn page_targets(&self) -> Result<Vec<PageTarget>, BrowserError>;

    /// Open a blank tab.
    async fn new_page(&self) -> Result<Arc<dyn PageHandle>, BrowserError>;

    /// Handle for an existing page target.
    async fn attach(&self, target_id: &str) -> Result<Arc<dyn PageHandle>, BrowserError>;

    /// Subscribe to page creation and URL changes. Only later events are seen.
    fn page_events(&self) -> broadcast::Receiver<PageEvent>;
}

/// Options for [`CdpContext::connect`].
#[derive(Debug, Clone)]
pub struct ContextOptions {
    /// Delay inserted before every input action.
    pub slow_mo: Option<Duration>,
    /// Load-state timeout used by pages of this context.
    pub load_timeout: Duration,
}

impl Default for ContextOptions {
    fn default() -> Self {
        Self {
            slow_mo: None,
            load_timeout: DEFAULT_LOAD_TIMEOUT,
        }
    }
}

/// [`BrowserContext`] over a CDP connection to a running browser.
pub struct CdpContext {
    client: CdpClient,
    /// Attached pages by target id.
    pages: Mutex<HashMap<String, Arc<CdpPage>>>,
    events: broadcast::Sender<PageEvent>,
    load_timeout: Duration,
    _event_task: tokio::task::JoinHandle<()>,
}

impl CdpContext {
    /// Connect to the browser's debugging endpoint and start target discovery.
    pub async fn connect(endpoint: &str, options: ContextOptions) -> Result<Self, BrowserError> {
        let client = CdpClient::connect(endpoint, options.slow_mo).await?;

        let (events, _) = broadcast::channel(PAGE_EVENT_CAPACITY);
        let event_task = {
            let raw = client.subscribe_events();
            let events = events.clone();
            tokio::spawn(Self::forward_page_events(raw, events))
        };

        client.set_discover_targets(true).await?;
        info!("Connected to browser at {}", endpoint);

        Ok(Self {
            client,
            pages: Mutex::new(HashMap::new()),
            events,
            load_timeout: options.load_timeout,
            _event_task: event_task,
        })
    }

    async fn forward_page_events(
        mut raw: broadcast::Receiver<CdpEvent>,
        events: broadcast::Sender<PageEvent>,
    ) {
        loop {
            match raw.recv().await {
                Ok(event) => {
                    if let Some(page_event) = PageEvent::from_cdp(&event) {
                        debug!("Page event: {} {}", page_event.target_id, page_event.url);
                        let _ = events.send(page_event);
                    }
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!("Dropped {} browser events", skipped);
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    }
}

#[async_trait]
impl BrowserContext for CdpContext {
    async fn service_worker_urls(&self) -> Result<Vec<String>, BrowserError> {
        let targets = self.client.get_targets().await?;
        Ok(targets
            .into_iter()
            .filter(|t| t.is_service_worker())
            .map(|t| t.url)
            .collect())
    }

    async fn page_targets(&self) -> Result<Vec<PageTarget>, BrowserError> {
        let targets = self.client.get_targets().await?;
        Ok(targets.into_iter().filter_map(PageTarget::from_info).collect())
    }

    async fn new_page(&self) -> Result<Arc<dyn PageHandle>, BrowserError> {
        let target_id = self.client.create_target("about:blank").await?;
        self.attach(&target_id).await
    }

    async fn attach(&self, target_id: &str) -> Result<Arc<dyn PageHandle>, BrowserError> {
        // Held across the attach so concurrent callers never attach twice.
        let mut pages = self.pages.lock().await;
        if let Some(page) = pages.get(target_id) {
            return Ok(page.clone());
        }

        let session = self.client.attach(target_id).await?;
        let page = Arc::new(CdpPage::new(session, self.load_timeout));
        pages.insert(target_id.to_string(), page.clone());
        debug!("Attached to page {}", target_id);
        Ok(page)
    }

    fn page_events(&self) -> broadcast::Receiver<PageEvent> {
        self.events.subscribe()
    }
}

impl Drop for CdpContext {
    fn drop(&mut self) {
        self._event_task.abort();
    }
}

/// Connect to a running browser over CDP with default options.
pub async fn connect_over_cdp(
    endpoint: &str,
    slow_mo: Option<Duration>,
) -> Result<CdpContext, BrowserError> {
    CdpContext::connect(
        endpoint,
        ContextOptions {
            slow_mo,
            ..ContextOptions::default()
        },
    )
    .await
}
