use station_browser::{Locator, TextMatch};
use tokio_util::sync::CancellationToken;

use super::*;
use crate::actions::ButtonLookup;
use crate::forms::{ADD_ICON, CREATE_WALLET_FORM, REMOVE_ICON, SEED_FORM};
use crate::navigation::route_link;
use crate::testing::{fast_settings, ClickEffect, FakeContext, Interaction};

const EXTENSION: &str = "chrome-extension://abc/index.html#/";

/// A browser whose home-page link for `route` opens the route's tab.
fn browser_with_route(route: Route) -> FakeContext {
    let context = FakeContext::with_extension();
    context.on_click(
        &route_link(route.link_text()),
        ClickEffect::OpenTab(format!("{EXTENSION}{}", route.fragment())),
    );
    context
}

async fn session(context: &FakeContext, route: Route) -> RouteSession {
    RouteSession::open(context.handle(), fast_settings(), route, &CancellationToken::new())
        .await
        .unwrap()
}

fn connect_button() -> Locator {
    ButtonLookup::name("Connect").locator("button")
}

#[test]
fn test_route_table() {
    let table: Vec<_> = Route::ALL
        .iter()
        .map(|r| (r.link_text(), r.fragment()))
        .collect();
    assert_eq!(
        table,
        vec![
            ("New wallet", "auth/new"),
            ("Import from seed phrase", "auth/recover"),
            ("Import from private key", "auth/import"),
            ("New multisig wallet", "auth/multisig/new"),
            ("Access with ledger", "auth/ledger"),
        ]
    );
}

#[tokio::test]
async fn test_open_reaches_route_ready() {
    for route in Route::ALL {
        let context = browser_with_route(route);
        let session = session(&context, route).await;

        assert_eq!(session.state(), RouteState::RouteReady);
        assert!(session.page().url().await.unwrap().contains(route.fragment()));
        assert_ne!(session.page().target_id(), session.home().page().target_id());
    }
}

#[tokio::test]
async fn test_open_times_out_without_tab() {
    let context = FakeContext::with_extension();

    let err = RouteSession::open(
        context.handle(),
        fast_settings(),
        Route::Ledger,
        &CancellationToken::new(),
    )
    .await
    .err()
    .unwrap();
    assert!(matches!(err, PageError::NavigationTimedOut { .. }));
}

#[tokio::test]
async fn test_fill_seed_form_connects() {
    let context = browser_with_route(Route::Seed);
    context.on_click(
        &Locator::css(SEED_FORM.submit),
        ClickEffect::Navigate(format!("{EXTENSION}auth/recover#3")),
    );
    let mut page = SeedPage::from_home(
        HomePage::open(context.handle(), fast_settings()).await.unwrap(),
        &CancellationToken::new(),
    )
    .await
    .unwrap();

    page.fill_seed_form("Test wallet 1", "Testtest123!", "word ".repeat(24).trim())
        .await
        .unwrap();

    assert_eq!(page.session().state(), RouteState::Confirmed);
    let route_tab = page.session().page().target_id().to_string();
    let filled: Vec<_> = context
        .interactions()
        .into_iter()
        .filter_map(|i| match i {
            Interaction::Fill { target, locator, .. } if target == route_tab => Some(locator),
            _ => None,
        })
        .collect();
    assert_eq!(
        filled,
        vec![
            "css=[name=\"name\"]",
            "css=[name=\"password\"]",
            "css=[name=\"confirm\"]",
            "css=[name=\"mnemonic\"]",
        ]
    );
    assert_eq!(context.click_count(&connect_button()), 1);
}

#[tokio::test]
async fn test_fill_seed_form_never_completes_without_connect() {
    let context = browser_with_route(Route::Seed);
    context.on_click(
        &Locator::css(SEED_FORM.submit),
        ClickEffect::Navigate(format!("{EXTENSION}auth/recover#3")),
    );
    context.hide(&connect_button());
    let mut page = SeedPage::open(context.handle(), fast_settings(), &CancellationToken::new())
        .await
        .unwrap();

    let err = page
        .fill_seed_form("Test wallet 1", "Testtest123!", "seed")
        .await
        .unwrap_err();
    assert!(matches!(err, PageError::ElementNotVisible { .. }));
    assert_eq!(page.session().state(), RouteState::Failed);
}

#[tokio::test]
async fn test_fill_seed_form_waits_for_confirmation_url() {
    let context = browser_with_route(Route::Seed);
    let mut page = SeedPage::open(context.handle(), fast_settings(), &CancellationToken::new())
        .await
        .unwrap();

    let err = page
        .fill_seed_form("Test wallet 1", "Testtest123!", "seed")
        .await
        .unwrap_err();
    assert!(matches!(err, PageError::NavigationTimedOut { .. }));
    assert_eq!(context.click_count(&connect_button()), 0);
}

#[test]
fn test_parse_quiz_index() {
    assert_eq!(parse_quiz_index("3rd word"), Some(3));
    assert_eq!(parse_quiz_index("Word #12"), Some(12));
    assert_eq!(parse_quiz_index("first word"), None);
    assert_eq!(parse_quiz_index("0th word"), None);
}

#[test]
fn test_word_at() {
    let mnemonic = "alpha bravo  charlie\ndelta";
    assert_eq!(word_at(mnemonic, 1), Some("alpha"));
    assert_eq!(word_at(mnemonic, 3), Some("charlie"));
    assert_eq!(word_at(mnemonic, 4), Some("delta"));
    assert_eq!(word_at(mnemonic, 0), None);
    assert_eq!(word_at(mnemonic, 5), None);
}

#[tokio::test]
async fn test_create_wallet_answers_quiz() {
    let context = browser_with_route(Route::NewWallet);
    let form = CREATE_WALLET_FORM;
    context.set_text(
        &Locator::css(form.mnemonic_text),
        "alpha bravo charlie delta echo foxtrot golf hotel india juliet kilo lima",
    );
    context.set_text(&Locator::css(form.quiz_label).nth(0), "3rd word");
    context.set_text(&Locator::css(form.quiz_label).nth(1), "11th word");
    let mut page = NewWalletPage::open(context.handle(), fast_settings(), &CancellationToken::new())
        .await
        .unwrap();

    page.fill_create_wallet_form("Test wallet 3", "Testtest123!")
        .await
        .unwrap();

    assert_eq!(page.session().state(), RouteState::Confirmed);
    let clicks = context.clicks();
    let charlie = clicks
        .iter()
        .position(|c| c == "role=button[name=\"charlie\"]")
        .unwrap();
    let kilo = clicks
        .iter()
        .position(|c| c == "role=button[name=\"kilo\"]")
        .unwrap();
    assert!(charlie < kilo);
    assert_eq!(context.click_count(&Locator::css(form.submit)), 2);
    assert_eq!(context.click_count(&connect_button()), 1);
}

#[tokio::test]
async fn test_create_wallet_fails_on_unreadable_quiz() {
    let context = browser_with_route(Route::NewWallet);
    context.set_text(&Locator::css(CREATE_WALLET_FORM.mnemonic_text), "alpha bravo");
    context.set_text(&Locator::css(CREATE_WALLET_FORM.quiz_label).nth(0), "9th word");
    let mut page = NewWalletPage::open(context.handle(), fast_settings(), &CancellationToken::new())
        .await
        .unwrap();

    let err = page
        .fill_create_wallet_form("Test wallet 3", "Testtest123!")
        .await
        .unwrap_err();
    assert!(matches!(err, PageError::AssertionFailed(_)));
    assert_eq!(page.session().state(), RouteState::Failed);
}

#[tokio::test]
async fn test_import_private_key() {
    let context = browser_with_route(Route::PrivateKey);
    let mut page = PrivateKeyPage::open(context.handle(), fast_settings(), &CancellationToken::new())
        .await
        .unwrap();

    page.import_wallet("deadbeef", "Testtest123!").await.unwrap();
    assert_eq!(page.session().state(), RouteState::Confirmed);
    assert_eq!(
        context.fills(),
        vec![
            ("css=[name=\"key\"]".to_string(), "deadbeef".to_string()),
            ("css=[name=\"password\"]".to_string(), "Testtest123!".to_string()),
        ]
    );
}

#[tokio::test]
async fn test_invalid_private_key_keeps_submit_disabled() {
    let context = browser_with_route(Route::PrivateKey);
    let submit = Locator::role_named("button", TextMatch::contains("Submit"));
    context.set_attribute(&submit, "disabled", "");
    let mut page = PrivateKeyPage::open(context.handle(), fast_settings(), &CancellationToken::new())
        .await
        .unwrap();

    page.expect_invalid_key("123123awe", "Testtest123!")
        .await
        .unwrap();
    assert_eq!(page.session().state(), RouteState::Failed);
    assert_eq!(context.click_count(&submit), 0);
}

#[tokio::test]
async fn test_wrong_password_is_submitted() {
    let context = browser_with_route(Route::PrivateKey);
    let mut page = PrivateKeyPage::open(context.handle(), fast_settings(), &CancellationToken::new())
        .await
        .unwrap();

    page.expect_wrong_password("deadbeef", "Wrongpassword123!")
        .await
        .unwrap();
    let submit = Locator::role_named("button", TextMatch::contains("Submit"));
    assert_eq!(context.click_count(&submit), 1);
}

#[test]
fn test_signer_adjustment() {
    assert_eq!(signer_adjustment(1), SignerAdjustment::Remove(2));
    assert_eq!(signer_adjustment(2), SignerAdjustment::Remove(1));
    assert_eq!(signer_adjustment(3), SignerAdjustment::Keep);
    assert_eq!(signer_adjustment(5), SignerAdjustment::Add(2));
}

async fn multisig(context: &FakeContext) -> MultiSigPage {
    MultiSigPage::open(context.handle(), fast_settings(), &CancellationToken::new())
        .await
        .unwrap()
}

fn addresses(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("terra1signer{i}")).collect()
}

#[tokio::test]
async fn test_multisig_input_clicks() {
    for (signers, removes, adds) in [(1, 2, 0), (2, 1, 0), (3, 0, 0), (5, 0, 2)] {
        let context = browser_with_route(Route::MultiSig);
        let mut page = multisig(&context).await;

        page.create_multisig_wallet(&addresses(signers), 1, "Test multisig 1")
            .await
            .unwrap();

        assert_eq!(
            context.click_count(&Locator::test_id(REMOVE_ICON).last()),
            removes,
            "{signers} signers"
        );
        assert_eq!(
            context.click_count(&Locator::test_id(ADD_ICON).first()),
            adds,
            "{signers} signers"
        );
        assert_eq!(page.session().state(), RouteState::Confirmed);
    }
}

#[tokio::test]
async fn test_multisig_fills_addresses_then_threshold() {
    let context = browser_with_route(Route::MultiSig);
    let mut page = multisig(&context).await;

    page.create_multisig_wallet(&addresses(2), 2, "Test multisig 1")
        .await
        .unwrap();

    let values: Vec<_> = context.fills().into_iter().map(|(_, v)| v).collect();
    assert_eq!(
        values,
        vec!["terra1signer0", "terra1signer1", "2", "Test multisig 1"]
    );
    assert_eq!(context.click_count(&Locator::css(SEED_FORM.submit)), 2);
}

#[tokio::test]
async fn test_multisig_rejects_bad_arguments_before_clicking() {
    let context = browser_with_route(Route::MultiSig);
    let mut page = multisig(&context).await;
    let clicks_after_open = context.clicks().len();

    for (signers, threshold) in [(0, 1), (2, 0), (2, 3)] {
        let err = page
            .create_multisig_wallet(&addresses(signers), threshold, "Test multisig 1")
            .await
            .unwrap_err();
        assert!(matches!(err, PageError::InvalidArgument(_)));
    }
    assert_eq!(context.clicks().len(), clicks_after_open);
    assert_eq!(page.session().state(), RouteState::RouteReady);
}

#[tokio::test]
async fn test_verify_ledger_page() {
    let context = browser_with_route(Route::Ledger);
    let mut page = LedgerPage::open(context.handle(), fast_settings(), &CancellationToken::new())
        .await
        .unwrap();

    page.verify_ledger_page().await.unwrap();
    assert_eq!(page.session().state(), RouteState::Confirmed);
}
