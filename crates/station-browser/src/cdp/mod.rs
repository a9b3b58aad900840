//! Chrome DevTools Protocol (CDP) client implementation.
//!
//! Connects to a running Chromium over WebSocket and speaks the CDP
//! JSON-RPC protocol. Browser-level events (target discovery) are fanned
//! out on a broadcast channel so several waiters can observe new tabs.
//!
//! ## Usage
//!
//! 1. Start Chromium with remote debugging and the extension loaded:
//!    ```bash
//!    chromium --remote-debugging-port=9222 --load-extension=./station
//!    ```
//!
//! 2. Connect and attach:
//!    ```rust,ignore
//!    let client = CdpClient::connect("http://127.0.0.1:9222", None).await?;
//!    let targets = client.get_targets().await?;
//!    let page = client.attach(&targets[0].target_id).await?;
//!    ```

mod client;
mod error;
mod protocol;
mod session;

pub use client::{fetch_version, CdpClient};
pub use error::CdpError;
pub use protocol::*;
pub use session::PageSession;
