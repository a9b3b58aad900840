//! Route pages: the tabs the home page opens for wallet creation and import.
//!
//! Every route page owns a [`RouteSession`], which walks
//! `Uninitialized -> HomeReady -> RouteReady` while opening the tab and
//! ends in `Confirmed` or `Failed` after the page's terminal action.

mod ledger;
mod multisig;
mod new_wallet;
mod private_key;
mod seed;

use std::fmt;
use std::sync::Arc;

use station_browser::{BrowserContext, PageHandle};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::actions::PageActions;
use crate::error::PageError;
use crate::home::HomePage;
use crate::navigation::open_route;
use crate::settings::PageSettings;

pub use ledger::LedgerPage;
pub use multisig::{check_multisig_arguments, signer_adjustment, MultiSigPage, SignerAdjustment};
pub use new_wallet::{parse_quiz_index, word_at, NewWalletPage};
pub use private_key::PrivateKeyPage;
pub use seed::SeedPage;

/// Extension screens opened in their own tab from the home page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    NewWallet,
    Seed,
    PrivateKey,
    MultiSig,
    Ledger,
}

impl Route {
    pub const ALL: [Route; 5] = [
        Route::NewWallet,
        Route::Seed,
        Route::PrivateKey,
        Route::MultiSig,
        Route::Ledger,
    ];

    /// Text of the home-page link that opens the route.
    pub fn link_text(self) -> &'static str {
        match self {
            Route::NewWallet => "New wallet",
            Route::Seed => "Import from seed phrase",
            Route::PrivateKey => "Import from private key",
            Route::MultiSig => "New multisig wallet",
            Route::Ledger => "Access with ledger",
        }
    }

    /// URL fragment identifying the route's tab.
    pub fn fragment(self) -> &'static str {
        match self {
            Route::NewWallet => "auth/new",
            Route::Seed => "auth/recover",
            Route::PrivateKey => "auth/import",
            Route::MultiSig => "auth/multisig/new",
            Route::Ledger => "auth/ledger",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.fragment())
    }
}

/// Lifecycle of a route page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteState {
    Uninitialized,
    HomeReady,
    RouteReady,
    /// The terminal action completed.
    Confirmed,
    /// The terminal action failed, or the form was rejected as expected.
    Failed,
}

/// A route tab paired with the home page that opened it.
pub struct RouteSession {
    route: Route,
    home: HomePage,
    actions: PageActions,
    state: RouteState,
}

impl RouteSession {
    /// Find or open the home tab, then open `route` from it.
    pub async fn open(
        context: Arc<dyn BrowserContext>,
        settings: Arc<PageSettings>,
        route: Route,
        cancel: &CancellationToken,
    ) -> Result<Self, PageError> {
        debug!("{}: {:?}", route, RouteState::Uninitialized);
        let home = HomePage::open(context, settings).await?;
        Self::from_home(home, route, cancel).await
    }

    /// Open `route` from an already assigned home page.
    pub async fn from_home(
        home: HomePage,
        route: Route,
        cancel: &CancellationToken,
    ) -> Result<Self, PageError> {
        debug!("{}: {:?}", route, RouteState::HomeReady);
        let page = open_route(
            home.context(),
            home.actions(),
            route.link_text(),
            route.fragment(),
            home.settings().timeouts.navigation(),
            cancel,
        )
        .await?;

        let actions = PageActions::new(page, home.settings().timeouts.clone());
        debug!("{}: {:?}", route, RouteState::RouteReady);
        Ok(Self {
            route,
            home,
            actions,
            state: RouteState::RouteReady,
        })
    }

    pub fn route(&self) -> Route {
        self.route
    }

    pub fn state(&self) -> RouteState {
        self.state
    }

    pub fn home(&self) -> &HomePage {
        &self.home
    }

    /// Interactions on the route tab.
    pub fn actions(&self) -> &PageActions {
        &self.actions
    }

    pub fn page(&self) -> &Arc<dyn PageHandle> {
        self.actions.page()
    }

    pub(crate) fn settings(&self) -> &PageSettings {
        self.home.settings()
    }

    fn transition(&mut self, state: RouteState) {
        debug!("{}: {:?} -> {:?}", self.route, self.state, state);
        self.state = state;
    }

    /// Record the outcome of a terminal action.
    pub(crate) fn settle<T>(&mut self, result: Result<T, PageError>) -> Result<T, PageError> {
        match &result {
            Ok(_) => self.transition(RouteState::Confirmed),
            Err(e) => {
                warn!("{} failed: {}", self.route, e);
                self.transition(RouteState::Failed);
            }
        }
        result
    }

    /// Record a terminal action that expects the form to be rejected.
    pub(crate) fn settle_rejected<T>(
        &mut self,
        result: Result<T, PageError>,
    ) -> Result<T, PageError> {
        if let Err(e) = &result {
            warn!("{} rejection not observed: {}", self.route, e);
        }
        self.transition(RouteState::Failed);
        result
    }
}

#[cfg(test)]
#[path = "tests.rs"]
mod tests;
