//! # Station Pages
//!
//! Page objects for the Station wallet extension and the scenario commands
//! built on them.
//!
//! - [`PageActions`]: wait, click, fill and assert primitives over one tab
//! - [`HomePage`]: the extension's primary tab and the scenarios run from it
//! - [`routes`]: tabs opened from the home page (new wallet, seed,
//!   private key, multisig, ledger)
//! - [`PageFactory`]: keyword-driven construction of initialized pages
//! - [`Station`]: whole scenarios, one method per command
//!
//! ```rust,ignore
//! let config = ConfigLoader::load_or_default(Path::new("config/station.toml"))?;
//! let station = Station::connect(&config).await?;
//! station.setup_station().await?;
//! station.create_wallet("Test wallet 3").await?;
//! ```

pub mod actions;
mod error;
pub mod factory;
pub mod forms;
pub mod home;
pub mod navigation;
pub mod retry;
pub mod routes;
mod settings;
mod station;

#[cfg(test)]
mod testing;

pub use actions::{ButtonLookup, PageActions, TextExpectation};
pub use error::PageError;
pub use factory::{PageFactory, PageKind, StationPage};
pub use home::{HomePage, SendScenario};
pub use navigation::{open_route, NavigationOutcome, PageWaiter};
pub use retry::{retry_action, RetryPolicy};
pub use routes::{Route, RouteSession, RouteState};
pub use settings::PageSettings;
pub use station::{Station, INVALID_PRIVATE_KEY, SECOND_WALLET_NAME, WRONG_PASSWORD};
