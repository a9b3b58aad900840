//! Keyed construction of initialized page objects.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use station_browser::{BrowserContext, PageHandle};
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::error::PageError;
use crate::home::HomePage;
use crate::routes::{LedgerPage, MultiSigPage, NewWalletPage, PrivateKeyPage, Route, SeedPage};
use crate::settings::PageSettings;

/// Page keywords accepted by [`PageFactory::create_by_name`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageKind {
    Home,
    NewWallet,
    Seed,
    MultiSig,
    Ledger,
    PrivateKey,
}

impl PageKind {
    pub const ALL: [PageKind; 6] = [
        PageKind::NewWallet,
        PageKind::Seed,
        PageKind::MultiSig,
        PageKind::Ledger,
        PageKind::Home,
        PageKind::PrivateKey,
    ];

    pub fn keyword(self) -> &'static str {
        match self {
            PageKind::Home => "home",
            PageKind::NewWallet => "newWallet",
            PageKind::Seed => "seed",
            PageKind::MultiSig => "multi",
            PageKind::Ledger => "ledger",
            PageKind::PrivateKey => "privateKey",
        }
    }

    /// Route opened for this kind; `None` for the home page.
    pub fn route(self) -> Option<Route> {
        match self {
            PageKind::Home => None,
            PageKind::NewWallet => Some(Route::NewWallet),
            PageKind::Seed => Some(Route::Seed),
            PageKind::MultiSig => Some(Route::MultiSig),
            PageKind::Ledger => Some(Route::Ledger),
            PageKind::PrivateKey => Some(Route::PrivateKey),
        }
    }

    /// URL fragment of the tab a page of this kind owns.
    pub fn fragment(self) -> &'static str {
        self.route().map_or("index.html", Route::fragment)
    }
}

impl FromStr for PageKind {
    type Err = PageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PageKind::ALL
            .into_iter()
            .find(|kind| kind.keyword() == s)
            .ok_or_else(|| PageError::UnknownPageKind(s.to_string()))
    }
}

impl fmt::Display for PageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// A page object built by [`PageFactory`].
pub enum StationPage {
    Home(HomePage),
    NewWallet(NewWalletPage),
    Seed(SeedPage),
    MultiSig(MultiSigPage),
    Ledger(LedgerPage),
    PrivateKey(PrivateKeyPage),
}

impl StationPage {
    pub fn kind(&self) -> PageKind {
        match self {
            StationPage::Home(_) => PageKind::Home,
            StationPage::NewWallet(_) => PageKind::NewWallet,
            StationPage::Seed(_) => PageKind::Seed,
            StationPage::MultiSig(_) => PageKind::MultiSig,
            StationPage::Ledger(_) => PageKind::Ledger,
            StationPage::PrivateKey(_) => PageKind::PrivateKey,
        }
    }

    /// The tab this page object drives.
    pub fn page(&self) -> &Arc<dyn PageHandle> {
        match self {
            StationPage::Home(home) => home.page(),
            StationPage::NewWallet(p) => p.session().page(),
            StationPage::Seed(p) => p.session().page(),
            StationPage::MultiSig(p) => p.session().page(),
            StationPage::Ledger(p) => p.session().page(),
            StationPage::PrivateKey(p) => p.session().page(),
        }
    }
}

/// Builds page objects against one browser context.
#[derive(Clone)]
pub struct PageFactory {
    context: Arc<dyn BrowserContext>,
    settings: Arc<PageSettings>,
    cancel: CancellationToken,
}

impl PageFactory {
    pub fn new(
        context: Arc<dyn BrowserContext>,
        settings: Arc<PageSettings>,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            context,
            settings,
            cancel,
        }
    }

    pub fn context(&self) -> &Arc<dyn BrowserContext> {
        &self.context
    }

    pub fn settings(&self) -> &PageSettings {
        &self.settings
    }

    pub fn cancel_token(&self) -> &CancellationToken {
        &self.cancel
    }

    /// Find or open the home tab.
    pub async fn home(&self) -> Result<HomePage, PageError> {
        HomePage::open(self.context.clone(), self.settings.clone()).await
    }

    /// Assign the home page and, for route kinds, open the route tab.
    pub async fn create(&self, kind: PageKind) -> Result<StationPage, PageError> {
        info!("Creating {} page", kind);
        let home = self.home().await?;
        self.create_from(home, kind).await
    }

    /// Build a page of `kind` from an already assigned home page.
    ///
    /// Route kinds open their tab from whatever view `home` is showing, so
    /// callers can first open a menu that hosts the route link.
    pub async fn create_from(&self, home: HomePage, kind: PageKind) -> Result<StationPage, PageError> {
        Ok(match kind {
            PageKind::Home => StationPage::Home(home),
            PageKind::NewWallet => StationPage::NewWallet(self.new_wallet_from(home).await?),
            PageKind::Seed => StationPage::Seed(self.seed_from(home).await?),
            PageKind::MultiSig => StationPage::MultiSig(self.multisig_from(home).await?),
            PageKind::Ledger => StationPage::Ledger(self.ledger_from(home).await?),
            PageKind::PrivateKey => StationPage::PrivateKey(self.private_key_from(home).await?),
        })
    }

    pub async fn new_wallet_from(&self, home: HomePage) -> Result<NewWalletPage, PageError> {
        NewWalletPage::from_home(home, &self.cancel).await
    }

    pub async fn seed_from(&self, home: HomePage) -> Result<SeedPage, PageError> {
        SeedPage::from_home(home, &self.cancel).await
    }

    pub async fn multisig_from(&self, home: HomePage) -> Result<MultiSigPage, PageError> {
        MultiSigPage::from_home(home, &self.cancel).await
    }

    pub async fn ledger_from(&self, home: HomePage) -> Result<LedgerPage, PageError> {
        LedgerPage::from_home(home, &self.cancel).await
    }

    pub async fn private_key_from(&self, home: HomePage) -> Result<PrivateKeyPage, PageError> {
        PrivateKeyPage::from_home(home, &self.cancel).await
    }

    /// Parse a page keyword, then [`create`](Self::create) it.
    ///
    /// Unknown keywords fail before the browser is touched.
    pub async fn create_by_name(&self, name: &str) -> Result<StationPage, PageError> {
        let kind: PageKind = name.parse()?;
        self.create(kind).await
    }
}
