//! Home page ownership and wallet menus.

use std::sync::Arc;

use station_browser::{BrowserContext, Locator, PageHandle, TextMatch};
use tracing::{debug, info};

use crate::actions::{ButtonLookup, PageActions, TextExpectation};
use crate::error::PageError;
use crate::forms::{MODAL_CLOSE, SETTINGS_ICON};
use crate::settings::PageSettings;

const WORKER_SCRIPT: &str = "background.js";
const ENTRY_PAGE: &str = "index.html#/";

/// Route buttons listed in the manage-wallets menu.
const MANAGE_WALLETS_BUTTONS: [&str; 5] = [
    "New wallet",
    "Import from seed phrase",
    "Import from private key",
    "New multisig wallet",
    "Access with ledger",
];

/// The Station extension's primary tab.
#[derive(Clone)]
pub struct HomePage {
    pub(super) context: Arc<dyn BrowserContext>,
    pub(super) actions: PageActions,
    pub(super) settings: Arc<PageSettings>,
}

impl HomePage {
    /// Find or open the home tab.
    pub async fn open(
        context: Arc<dyn BrowserContext>,
        settings: Arc<PageSettings>,
    ) -> Result<Self, PageError> {
        let page = Self::assign_start_page(context.as_ref()).await?;
        let actions = PageActions::new(page, settings.timeouts.clone());
        Ok(Self {
            context,
            actions,
            settings,
        })
    }

    /// Entry URL derived from the extension's background worker.
    pub async fn extension_start_url(context: &dyn BrowserContext) -> Result<String, PageError> {
        context
            .service_worker_urls()
            .await?
            .into_iter()
            .find(|url| url.contains(WORKER_SCRIPT))
            .map(|url| url.replace(WORKER_SCRIPT, ENTRY_PAGE))
            .ok_or(PageError::ExtensionNotFound)
    }

    /// Reuse the open extension tab, or open one.
    ///
    /// A tab at exactly the entry URL wins over other extension tabs, so
    /// route tabs left open by earlier scenarios are not mistaken for home.
    pub async fn assign_start_page(
        context: &dyn BrowserContext,
    ) -> Result<Arc<dyn PageHandle>, PageError> {
        let start_url = Self::extension_start_url(context).await?;

        let targets = context.page_targets().await?;
        let exact = targets.iter().filter(|t| t.url == start_url);
        let others = targets
            .iter()
            .filter(|t| t.url != start_url && t.url.contains("index.html"));

        for target in exact.chain(others) {
            match context.attach(&target.target_id).await {
                Ok(page) => {
                    debug!("Reusing extension page {} ({}) as home", target.target_id, target.url);
                    return Ok(page);
                }
                Err(e) => debug!("Skipping unreadable page {}: {}", target.target_id, e),
            }
        }

        info!("Opening home page at {}", start_url);
        let page = context.new_page().await?;
        page.goto(&start_url).await?;
        Ok(page)
    }

    pub fn page(&self) -> &Arc<dyn PageHandle> {
        self.actions.page()
    }

    pub fn actions(&self) -> &PageActions {
        &self.actions
    }

    pub fn context(&self) -> &Arc<dyn BrowserContext> {
        &self.context
    }

    pub fn settings(&self) -> &PageSettings {
        &self.settings
    }

    /// Accessible name of the wallet entry in the manage-wallets menu.
    pub(super) fn wallet_entry(&self, wallet_name: &str) -> String {
        format!("{} {}", wallet_name, self.settings.wallet.address_label)
    }

    /// Bring the tab forward and reload it.
    pub async fn refresh(&self) -> Result<(), PageError> {
        self.actions.bring_to_front().await?;
        self.actions.reload().await
    }

    pub async fn verify_elements_manage_wallets_form(&self) -> Result<(), PageError> {
        self.actions.see("Manage Wallets").await?;
        for name in MANAGE_WALLETS_BUTTONS {
            self.actions
                .expect_button(ButtonLookup::name(name), "button", false)
                .await?;
        }
        Ok(())
    }

    /// Open the wallet menu and choose "Add a wallet".
    pub async fn go_to_manage_wallets_menu_from_home(&self) -> Result<(), PageError> {
        self.refresh().await?;
        self.actions
            .click_button(ButtonLookup::name(self.settings.wallet.name.as_str()))
            .await?;
        self.actions.see("Manage Wallets").await?;
        self.actions
            .click_button(ButtonLookup::Name(TextMatch::contains("Add a wallet")))
            .await
    }

    /// Check the default wallet is listed in the wallet menu, then close it.
    pub async fn verify_first_wallet_added(&self) -> Result<(), PageError> {
        let name = self.settings.wallet.name.as_str();
        self.actions
            .expect_button(ButtonLookup::Name(TextMatch::contains(name)), "button", false)
            .await?;
        self.actions
            .click(&Locator::text(TextMatch::contains(name)).first())
            .await?;
        self.actions
            .expect_visible(&Locator::text(TextMatch::contains("Manage Wallets")).first(), None)
            .await?;
        self.actions
            .expect_button(
                ButtonLookup::Name(TextMatch::contains(self.wallet_entry(name))),
                "button",
                false,
            )
            .await?;
        self.actions
            .expect_visible(&Locator::text(TextMatch::contains("Add a wallet")).first(), None)
            .await?;
        self.actions.click(&Locator::css(MODAL_CLOSE)).await
    }

    /// Check the wallet's home screen after it was created or imported.
    pub async fn verify_wallet_home(&self, wallet_name: &str) -> Result<(), PageError> {
        self.actions
            .expect_button(ButtonLookup::name(wallet_name), "button", false)
            .await?;
        for text in ["Portfolio value", "Send", "Receive", "Buy"] {
            self.actions.see(text).await?;
        }

        let luna = Locator::role("article").filter_has_text(TextMatch::contains("LUNA"));
        self.actions.expect_visible(&luna, None).await?;
        self.actions
            .expect_visible(
                &luna.clone().within(Locator::text(TextMatch::exact("0"))).first(),
                None,
            )
            .await?;
        self.actions
            .expect_visible(
                &luna.within(Locator::text(TextMatch::contains(".00"))).first(),
                None,
            )
            .await
    }

    /// Check the main page's buttons and texts.
    pub async fn evaluate_main_page(&self, wallet_name: &str) -> Result<(), PageError> {
        self.actions.reload().await?;

        let buttons = [
            ButtonLookup::name(wallet_name),
            ButtonLookup::test_id(SETTINGS_ICON),
            ButtonLookup::Element(TextMatch::pattern("^Send$")),
            ButtonLookup::Element(TextMatch::pattern("^Receive$")),
            ButtonLookup::Element(TextMatch::pattern("^Buy$")),
            ButtonLookup::name("Manage"),
        ];
        for button in buttons {
            self.actions.expect_button(button, "button", false).await?;
        }

        let texts = [
            TextMatch::exact("Portfolio value"),
            TextMatch::pattern(r"\$ [\d]{1,5}\.[\d]{2}"),
            TextMatch::exact("Send"),
            TextMatch::exact("Receive"),
            TextMatch::exact("Buy"),
            TextMatch::exact("Assets"),
        ];
        for text in texts {
            self.actions
                .expect_text(text, TextExpectation::default())
                .await?;
        }
        Ok(())
    }
}
