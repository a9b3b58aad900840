//! The extension's primary tab and the scenarios run from it.
//!
//! [`HomePage`] is split across files by feature area, each adding an
//! `impl HomePage` block:
//!
//! - `core`: start-page discovery, wallet menus and the main page
//! - `settings`: network, language, currency, theme and advanced settings
//! - `manage`: export, change password, lock and delete
//! - `assets`: manage-assets modal and list filters
//! - `send`: send and send-back transactions with balance audits

mod assets;
mod core;
mod manage;
mod send;
mod settings;

pub use self::core::HomePage;
pub use self::send::{amount_pattern, parse_amount, round_cents, SendScenario};
