//! Browser access for the Station E2E driver.
//!
//! Drives an already running Chromium (with the Station extension loaded)
//! over the Chrome DevTools Protocol. Nothing here launches a browser.
//!
//! ```text
//! ┌──────────────────┐    WebSocket     ┌──────────────────────┐
//! │  station-pages   │ ◄──────────────► │  Chromium + Station  │
//! │  (page objects)  │       CDP        │  (remote debugging)  │
//! └──────────────────┘                  └──────────────────────┘
//! ```
//!
//! ## Layers
//!
//! - [`cdp`]: WebSocket client, page sessions and protocol types.
//! - [`BrowserContext`] / [`PageHandle`]: the seam page objects are written
//!   against. [`CdpContext`] and [`CdpPage`] implement it over CDP; tests can
//!   substitute their own.
//! - [`Locator`]: Playwright-style element queries (role, text, test id,
//!   CSS, filters) resolved in the page by one embedded script.
//!
//! ## Setup
//!
//! ```bash
//! chromium --remote-debugging-port=9222 \
//!   --disable-extensions-except=./station --load-extension=./station
//! ```

pub mod cdp;
mod context;
mod error;
mod locator;
mod page;

pub use cdp::{CdpClient, CdpError, PageSession};
pub use context::{
    connect_over_cdp, BrowserContext, CdpContext, ContextOptions, PageEvent, PageTarget,
    DEFAULT_LOAD_TIMEOUT,
};
pub use error::BrowserError;
pub use locator::{Locator, Step, TextMatch};
pub use page::{CdpPage, PageHandle};
