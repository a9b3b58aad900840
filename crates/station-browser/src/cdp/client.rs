//! CDP WebSocket client.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use futures::stream::{SplitSink, SplitStream};
use futures::{SinkExt, StreamExt};
use parking_lot::Mutex;
use serde_json::{json, Value};
use tokio::net::TcpStream;
use tokio::sync::{broadcast, oneshot};
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};
use tracing::{debug, error, trace, warn};
use url::Url;

use super::error::CdpError;
use super::protocol::{BrowserVersion, CdpEvent, CdpRequest, CdpResponse, PageInfo, TargetInfo};
use super::session::PageSession;

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;
type WsSink = SplitSink<WsStream, Message>;
type WsSource = SplitStream<WsStream>;

type PendingMap = Arc<Mutex<HashMap<u64, oneshot::Sender<Result<Value, CdpError>>>>>;

/// Per-request response timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Capacity of the browser event fan-out.
const EVENT_CHANNEL_CAPACITY: usize = 256;

/// Request plumbing shared by the client and every page session.
pub(crate) struct Transport {
    ws_tx: tokio::sync::Mutex<WsSink>,
    request_id: AtomicU64,
    pending: PendingMap,
}

impl Transport {
    /// Send a command and wait for its response.
    pub(crate) async fn call(
        &self,
        method: &str,
        params: Option<Value>,
        session_id: Option<&str>,
    ) -> Result<Value, CdpError> {
        let id = self.request_id.fetch_add(1, Ordering::SeqCst);

        let request = CdpRequest {
            id,
            method: method.to_string(),
            params,
            session_id: session_id.map(|s| s.to_string()),
        };

        let json = serde_json::to_string(&request)?;
        trace!("CDP send: {}", json);

        let (tx, rx) = oneshot::channel();
        self.pending.lock().insert(id, tx);

        {
            let mut ws = self.ws_tx.lock().await;
            if let Err(e) = ws.send(Message::Text(json.into())).await {
                self.pending.lock().remove(&id);
                return Err(e.into());
            }
        }

        match tokio::time::timeout(REQUEST_TIMEOUT, rx).await {
            Ok(Ok(result)) => result,
            Ok(Err(_)) => Err(CdpError::SessionClosed),
            Err(_) => {
                self.pending.lock().remove(&id);
                Err(CdpError::Timeout(format!("Request {} timed out", method)))
            }
        }
    }
}

/// Fetch `/json/version` from a remote-debugging endpoint.
pub async fn fetch_version(endpoint: &str) -> Result<BrowserVersion, CdpError> {
    let http_endpoint = endpoint.trim_end_matches('/');
    Url::parse(http_endpoint)?;

    let version_url = format!("{}/json/version", http_endpoint);
    debug!("Fetching browser version from {}", version_url);

    reqwest::get(&version_url)
        .await
        .map_err(|e| CdpError::ChromeNotAvailable(format!("{}: {}", endpoint, e)))?
        .error_for_status()
        .map_err(|e| CdpError::ChromeNotAvailable(format!("{}: {}", endpoint, e)))?
        .json()
        .await
        .map_err(|e| CdpError::InvalidResponse(format!("{}: {}", version_url, e)))
}

/// CDP client for browser automation.
///
/// Connects to the browser-level WebSocket and hands out [`PageSession`]s
/// attached in flatten mode over the same socket.
pub struct CdpClient {
    /// HTTP endpoint for page discovery.
    http_endpoint: String,
    /// Browser WebSocket URL.
    browser_ws_url: String,
    transport: Arc<Transport>,
    /// Browser events, including target discovery.
    events: broadcast::Sender<CdpEvent>,
    /// Delay applied before input actions on attached sessions.
    slow_mo: Option<Duration>,
    /// Background task handle.
    _recv_task: tokio::task::JoinHandle<()>,
}

impl CdpClient {
    /// Connect to the browser at the given endpoint.
    ///
    /// # Arguments
    ///
    /// * `endpoint` - Debugging endpoint (e.g., "http://127.0.0.1:9222")
    /// * `slow_mo` - Optional delay inserted before every input action
    pub async fn connect(endpoint: &str, slow_mo: Option<Duration>) -> Result<Self, CdpError> {
        let http_endpoint = endpoint.trim_end_matches('/').to_string();

        let version = fetch_version(&http_endpoint).await?;
        debug!("Connected to browser: {}", version.browser);

        let browser_ws_url = version.web_socket_debugger_url;

        let (ws_stream, _) = tokio_tungstenite::connect_async(browser_ws_url.as_str())
            .await
            .map_err(|e| CdpError::ConnectionFailed(format!("WebSocket: {}", e)))?;

        let (ws_sink, ws_source) = ws_stream.split();
        let pending: PendingMap = Arc::new(Mutex::new(HashMap::new()));
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);

        let recv_task = {
            let pending = pending.clone();
            let events = events.clone();
            tokio::spawn(async move {
                Self::receive_loop(ws_source, pending, events).await;
            })
        };

        let transport = Arc::new(Transport {
            ws_tx: tokio::sync::Mutex::new(ws_sink),
            request_id: AtomicU64::new(1),
            pending,
        });

        debug!("CDP client connected to {}", browser_ws_url);

        Ok(Self {
            http_endpoint,
            browser_ws_url,
            transport,
            events,
            slow_mo,
            _recv_task: recv_task,
        })
    }

    /// WebSocket receive loop.
    async fn receive_loop(
        mut ws_source: WsSource,
        pending: PendingMap,
        events: broadcast::Sender<CdpEvent>,
    ) {
        while let Some(msg) = ws_source.next().await {
            match msg {
                Ok(Message::Text(text)) => {
                    trace!("CDP recv: {}", text);
                    match serde_json::from_str::<CdpResponse>(&text) {
                        Ok(resp) => Self::dispatch(resp, &pending, &events),
                        Err(e) => warn!("Failed to parse CDP message: {}", e),
                    }
                }
                Ok(Message::Close(_)) => {
                    debug!("WebSocket closed");
                    break;
                }
                Err(e) => {
                    error!("WebSocket error: {}", e);
                    break;
                }
                _ => {}
            }
        }

        // Fail outstanding requests so callers do not wait for the timeout.
        pending.lock().clear();
    }

    fn dispatch(
        resp: CdpResponse,
        pending: &PendingMap,
        events: &broadcast::Sender<CdpEvent>,
    ) {
        if let Some(id) = resp.id {
            let waiter = pending.lock().remove(&id);
            if let Some(tx) = waiter {
                let result = match resp.error {
                    Some(error) => Err(CdpError::Protocol {
                        code: error.code,
                        message: error.message,
                    }),
                    None => Ok(resp.result.unwrap_or(Value::Null)),
                };
                let _ = tx.send(result);
            }
        } else if let Some(method) = resp.method {
            // No receivers is fine: nobody is waiting on a tab right now.
            let _ = events.send(CdpEvent {
                method,
                params: resp.params.unwrap_or(Value::Null),
                session_id: resp.session_id,
            });
        }
    }

    /// Send a browser-level CDP command and wait for response.
    pub async fn call(&self, method: &str, params: Option<Value>) -> Result<Value, CdpError> {
        self.transport.call(method, params, None).await
    }

    /// Get browser WebSocket URL.
    pub fn browser_ws_url(&self) -> &str {
        &self.browser_ws_url
    }

    /// Subscribe to browser events. Only events emitted after this call are seen.
    pub fn subscribe_events(&self) -> broadcast::Receiver<CdpEvent> {
        self.events.subscribe()
    }

    // ========================================================================
    // Target Management
    // ========================================================================

    /// Ask the browser to emit `Target.targetCreated`/`targetInfoChanged` events.
    pub async fn set_discover_targets(&self, discover: bool) -> Result<(), CdpError> {
        self.call("Target.setDiscoverTargets", Some(json!({"discover": discover})))
            .await?;
        Ok(())
    }

    /// Get all targets, including extension service workers.
    pub async fn get_targets(&self) -> Result<Vec<TargetInfo>, CdpError> {
        let result = self.call("Target.getTargets", None).await?;
        let targets: Vec<TargetInfo> = serde_json::from_value(result["targetInfos"].clone())?;
        Ok(targets)
    }

    /// Open a new tab at `url` and return its target id.
    pub async fn create_target(&self, url: &str) -> Result<String, CdpError> {
        // Chrome requires PUT method for /json/new
        let mut create_url = Url::parse(&format!("{}/json/new", self.http_endpoint))?;
        create_url.set_query(Some(url));
        let page_info: PageInfo = reqwest::Client::new()
            .put(create_url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        debug!("Created new page: {} - {}", page_info.id, page_info.url);
        Ok(page_info.id)
    }

    /// Attach to an existing target.
    pub async fn attach(&self, target_id: &str) -> Result<PageSession, CdpError> {
        let result = self
            .call(
                "Target.attachToTarget",
                Some(json!({
                    "targetId": target_id,
                    "flatten": true
                })),
            )
            .await?;

        let session_id = result["sessionId"]
            .as_str()
            .ok_or_else(|| CdpError::InvalidResponse("Missing sessionId".to_string()))?
            .to_string();

        let session = PageSession::new(
            target_id.to_string(),
            session_id,
            self.transport.clone(),
            self.slow_mo,
        );

        session.enable_domains().await?;

        Ok(session)
    }
}

impl Drop for CdpClient {
    fn drop(&mut self) {
        self._recv_task.abort();
    }
}
