//! In-memory browser for page-object tests.
//!
//! Elements are addressed by their locator's display string. Everything is
//! visible unless hidden, and clicks can be wired to open tabs, navigate or
//! hide elements.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Weak};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use station_browser::{BrowserContext, BrowserError, Locator, PageEvent, PageHandle, PageTarget};
use station_config::TimeoutConfig;
use tokio::sync::broadcast;

use crate::retry::RetryPolicy;
use crate::settings::PageSettings;

pub(crate) const WORKER_URL: &str = "chrome-extension://abc/background.js";
pub(crate) const HOME_URL: &str = "chrome-extension://abc/index.html#/";

/// Settings with short waits so failing expectations resolve quickly.
pub(crate) fn fast_settings() -> Arc<PageSettings> {
    Arc::new(PageSettings {
        timeouts: TimeoutConfig {
            expect_ms: 60,
            navigation_ms: 200,
            load_ms: 200,
            transaction_ms: 200,
            poll_interval_ms: 5,
        },
        retry: RetryPolicy {
            max_attempts: 2,
            base_delay: Duration::from_millis(1),
            max_delay: Duration::from_millis(2),
            backoff_multiplier: 2.0,
        },
        ..PageSettings::default()
    })
}

/// What a click on a given locator does.
#[derive(Debug, Clone)]
pub(crate) enum ClickEffect {
    /// Open a new tab at the URL.
    OpenTab(String),
    /// Change the clicked page's URL.
    Navigate(String),
    /// Hide another element.
    Hide(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Interaction {
    Click { target: String, locator: String },
    Fill { target: String, locator: String, value: String },
}

struct Shared {
    workers: Mutex<Vec<String>>,
    pages: Mutex<Vec<Arc<FakePage>>>,
    events: broadcast::Sender<PageEvent>,
    next_id: AtomicUsize,
    new_page_calls: AtomicUsize,
    hidden: Mutex<HashSet<String>>,
    texts: Mutex<HashMap<String, String>>,
    attributes: Mutex<HashMap<(String, String), String>>,
    effects: Mutex<HashMap<String, ClickEffect>>,
    log: Mutex<Vec<Interaction>>,
}

impl Shared {
    fn spawn(self: &Arc<Self>, url: &str) -> Arc<FakePage> {
        let id = format!("T{}", self.next_id.fetch_add(1, Ordering::SeqCst) + 1);
        let page = Arc::new(FakePage {
            target_id: id,
            url: Mutex::new(url.to_string()),
            reloads: AtomicUsize::new(0),
            failing_reloads: AtomicUsize::new(0),
            detached: AtomicBool::new(false),
            shared: Arc::downgrade(self),
        });
        self.pages.lock().push(page.clone());
        page.announce();
        page
    }
}

#[derive(Clone)]
pub(crate) struct FakeContext {
    shared: Arc<Shared>,
}

impl FakeContext {
    /// A browser with no extension installed.
    pub(crate) fn new() -> Self {
        let (events, _) = broadcast::channel(64);
        Self {
            shared: Arc::new(Shared {
                workers: Mutex::new(Vec::new()),
                pages: Mutex::new(Vec::new()),
                events,
                next_id: AtomicUsize::new(0),
                new_page_calls: AtomicUsize::new(0),
                hidden: Mutex::new(HashSet::new()),
                texts: Mutex::new(HashMap::new()),
                attributes: Mutex::new(HashMap::new()),
                effects: Mutex::new(HashMap::new()),
                log: Mutex::new(Vec::new()),
            }),
        }
    }

    /// A browser running the Station background worker.
    pub(crate) fn with_extension() -> Self {
        let context = Self::new();
        context.shared.workers.lock().push(WORKER_URL.to_string());
        context
    }

    pub(crate) fn handle(&self) -> Arc<dyn BrowserContext> {
        Arc::new(self.clone())
    }

    pub(crate) fn open_page(&self, url: &str) -> Arc<FakePage> {
        self.shared.spawn(url)
    }

    /// A tab whose document is gone: it still lists, but cannot be attached
    /// and its URL cannot be read.
    pub(crate) fn open_detached_page(&self, url: &str) -> Arc<FakePage> {
        let page = self.shared.spawn(url);
        page.detached.store(true, Ordering::SeqCst);
        page
    }

    pub(crate) fn hide(&self, locator: &Locator) {
        self.shared.hidden.lock().insert(locator.to_string());
    }

    pub(crate) fn set_text(&self, locator: &Locator, text: &str) {
        self.shared
            .texts
            .lock()
            .insert(locator.to_string(), text.to_string());
    }

    pub(crate) fn set_attribute(&self, locator: &Locator, name: &str, value: &str) {
        self.shared
            .attributes
            .lock()
            .insert((locator.to_string(), name.to_string()), value.to_string());
    }

    pub(crate) fn on_click(&self, locator: &Locator, effect: ClickEffect) {
        self.shared.effects.lock().insert(locator.to_string(), effect);
    }

    pub(crate) fn pages_with_url(&self, part: &str) -> usize {
        self.shared
            .pages
            .lock()
            .iter()
            .filter(|p| p.url.lock().contains(part))
            .count()
    }

    pub(crate) fn new_page_calls(&self) -> usize {
        self.shared.new_page_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn interactions(&self) -> Vec<Interaction> {
        self.shared.log.lock().clone()
    }

    /// Locators clicked, in order.
    pub(crate) fn clicks(&self) -> Vec<String> {
        self.interactions()
            .into_iter()
            .filter_map(|i| match i {
                Interaction::Click { locator, .. } => Some(locator),
                Interaction::Fill { .. } => None,
            })
            .collect()
    }

    pub(crate) fn click_count(&self, locator: &Locator) -> usize {
        let wanted = locator.to_string();
        self.clicks().iter().filter(|c| **c == wanted).count()
    }

    /// Values filled per locator, in order.
    pub(crate) fn fills(&self) -> Vec<(String, String)> {
        self.interactions()
            .into_iter()
            .filter_map(|i| match i {
                Interaction::Fill { locator, value, .. } => Some((locator, value)),
                Interaction::Click { .. } => None,
            })
            .collect()
    }
}

#[async_trait]
impl BrowserContext for FakeContext {
    async fn service_worker_urls(&self) -> Result<Vec<String>, BrowserError> {
        Ok(self.shared.workers.lock().clone())
    }

    async fn page_targets(&self) -> Result<Vec<PageTarget>, BrowserError> {
        Ok(self
            .shared
            .pages
            .lock()
            .iter()
            .map(|p| PageTarget {
                target_id: p.target_id.clone(),
                url: p.url.lock().clone(),
            })
            .collect())
    }

    async fn new_page(&self) -> Result<Arc<dyn PageHandle>, BrowserError> {
        self.shared.new_page_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.shared.spawn("about:blank"))
    }

    async fn attach(&self, target_id: &str) -> Result<Arc<dyn PageHandle>, BrowserError> {
        self.shared
            .pages
            .lock()
            .iter()
            .find(|p| p.target_id == target_id && !p.is_detached())
            .map(|p| p.clone() as Arc<dyn PageHandle>)
            .ok_or_else(|| BrowserError::PageNotFound(target_id.to_string()))
    }

    fn page_events(&self) -> broadcast::Receiver<PageEvent> {
        self.shared.events.subscribe()
    }
}

pub(crate) struct FakePage {
    target_id: String,
    url: Mutex<String>,
    reloads: AtomicUsize,
    failing_reloads: AtomicUsize,
    detached: AtomicBool,
    shared: Weak<Shared>,
}

impl FakePage {
    pub(crate) fn reloads(&self) -> usize {
        self.reloads.load(Ordering::SeqCst)
    }

    /// Make the next `count` reloads time out.
    pub(crate) fn fail_reloads(&self, count: usize) {
        self.failing_reloads.store(count, Ordering::SeqCst);
    }

    fn is_detached(&self) -> bool {
        self.detached.load(Ordering::SeqCst)
    }

    fn shared(&self) -> Result<Arc<Shared>, BrowserError> {
        self.shared.upgrade().ok_or(BrowserError::NotConnected)
    }

    fn announce(&self) {
        if let Some(shared) = self.shared.upgrade() {
            let _ = shared.events.send(PageEvent {
                target_id: self.target_id.clone(),
                url: self.url.lock().clone(),
            });
        }
    }

    fn ensure_visible(&self, shared: &Shared, locator: &Locator) -> Result<(), BrowserError> {
        if shared.hidden.lock().contains(&locator.to_string()) {
            return Err(BrowserError::ElementNotFound(locator.to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl PageHandle for FakePage {
    fn target_id(&self) -> &str {
        &self.target_id
    }

    async fn url(&self) -> Result<String, BrowserError> {
        if self.is_detached() {
            return Err(BrowserError::ActionFailed(
                "JS error: context destroyed".to_string(),
            ));
        }
        Ok(self.url.lock().clone())
    }

    async fn goto(&self, url: &str) -> Result<(), BrowserError> {
        *self.url.lock() = url.to_string();
        self.announce();
        Ok(())
    }

    async fn reload(&self) -> Result<(), BrowserError> {
        self.reloads.fetch_add(1, Ordering::SeqCst);
        let failing = self
            .failing_reloads
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1));
        if failing.is_ok() {
            return Err(BrowserError::Timeout("Page load exceeded 30000ms".to_string()));
        }
        Ok(())
    }

    async fn bring_to_front(&self) -> Result<(), BrowserError> {
        Ok(())
    }

    async fn wait_for_load_state(&self) -> Result<(), BrowserError> {
        Ok(())
    }

    async fn count(&self, locator: &Locator) -> Result<usize, BrowserError> {
        let shared = self.shared()?;
        Ok(usize::from(self.ensure_visible(&shared, locator).is_ok()))
    }

    async fn is_visible(&self, locator: &Locator) -> Result<bool, BrowserError> {
        let shared = self.shared()?;
        Ok(self.ensure_visible(&shared, locator).is_ok())
    }

    async fn click(&self, locator: &Locator) -> Result<(), BrowserError> {
        let shared = self.shared()?;
        self.ensure_visible(&shared, locator)?;
        let key = locator.to_string();
        shared.log.lock().push(Interaction::Click {
            target: self.target_id.clone(),
            locator: key.clone(),
        });

        let effect = shared.effects.lock().get(&key).cloned();
        match effect {
            Some(ClickEffect::OpenTab(url)) => {
                shared.spawn(&url);
            }
            Some(ClickEffect::Navigate(url)) => {
                *self.url.lock() = url;
                self.announce();
            }
            Some(ClickEffect::Hide(other)) => {
                shared.hidden.lock().insert(other);
            }
            None => {}
        }
        Ok(())
    }

    async fn fill(&self, locator: &Locator, value: &str) -> Result<(), BrowserError> {
        let shared = self.shared()?;
        self.ensure_visible(&shared, locator)?;
        shared.log.lock().push(Interaction::Fill {
            target: self.target_id.clone(),
            locator: locator.to_string(),
            value: value.to_string(),
        });
        Ok(())
    }

    async fn text_content(&self, locator: &Locator) -> Result<Option<String>, BrowserError> {
        let shared = self.shared()?;
        Ok(shared.texts.lock().get(&locator.to_string()).cloned())
    }

    async fn get_attribute(
        &self,
        locator: &Locator,
        name: &str,
    ) -> Result<Option<String>, BrowserError> {
        let shared = self.shared()?;
        Ok(shared
            .attributes
            .lock()
            .get(&(locator.to_string(), name.to_string()))
            .cloned())
    }
}
