//! Live tests against a running Chromium.
//!
//! Skipped unless `STATION_CDP_ENDPOINT` points at a remote-debugging endpoint:
//! `STATION_CDP_ENDPOINT=http://127.0.0.1:9222 cargo test -p station-browser --test live_browser`

use std::sync::Arc;

use station_browser::{
    connect_over_cdp, BrowserContext, CdpContext, Locator, PageHandle, TextMatch,
};

const FIXTURE: &str = "data:text/html,\
<h1>Wallets</h1>\
<ul><li>LUNA 0.00</li><li>OSMO 1.50</li></ul>\
<input placeholder='Name' oninput='document.getElementById(\"echo\").textContent=this.value' />\
<span id='echo'></span>\
<button data-testid='SubmitIcon' disabled>Submit</button>\
<a href='%23/auth/new'>New wallet</a>\
<div style='display:none'>Hidden</div>";

async fn connect() -> Option<CdpContext> {
    let endpoint = match std::env::var("STATION_CDP_ENDPOINT") {
        Ok(endpoint) => endpoint,
        Err(_) => {
            eprintln!("STATION_CDP_ENDPOINT not set, skipping");
            return None;
        }
    };
    Some(connect_over_cdp(&endpoint, None).await.unwrap())
}

async fn fixture_page(context: &CdpContext) -> Arc<dyn PageHandle> {
    let page = context.new_page().await.unwrap();
    page.goto(FIXTURE).await.unwrap();
    page
}

#[tokio::test]
async fn test_locators_resolve_in_page() {
    let Some(context) = connect().await else {
        return;
    };
    let page = fixture_page(&context).await;

    let heading = Locator::role_named("heading", TextMatch::exact("Wallets"));
    assert!(page.is_visible(&heading).await.unwrap());

    let items = Locator::role("listitem");
    assert_eq!(page.count(&items).await.unwrap(), 2);

    let luna = items.filter_has_text(TextMatch::pattern("^LUNA"));
    assert_eq!(page.count(&luna).await.unwrap(), 1);

    let hidden = Locator::text(TextMatch::exact("Hidden"));
    assert!(!page.is_visible(&hidden).await.unwrap());

    let submit = Locator::test_id("SubmitIcon");
    assert_eq!(
        page.get_attribute(&submit, "disabled").await.unwrap(),
        Some(String::new())
    );
}

#[tokio::test]
async fn test_fill_and_read_back() {
    let Some(context) = connect().await else {
        return;
    };
    let page = fixture_page(&context).await;

    let input = Locator::role("textbox").first();
    page.fill(&input, "Test wallet 1").await.unwrap();
    page.fill(&input, "Test wallet 2").await.unwrap();

    let echo = page.text_content(&Locator::css("#echo")).await.unwrap();
    assert_eq!(echo.as_deref(), Some("Test wallet 2"));

    page.fill(&input, "").await.unwrap();
    let echo = page.text_content(&Locator::css("#echo")).await.unwrap();
    assert_eq!(echo.as_deref(), Some(""));
}

#[tokio::test]
async fn test_link_click_emits_page_event() {
    let Some(context) = connect().await else {
        return;
    };
    let page = fixture_page(&context).await;
    let mut events = context.page_events();

    page.click(&Locator::role_named("link", TextMatch::exact("New wallet")))
        .await
        .unwrap();

    let event = tokio::time::timeout(std::time::Duration::from_secs(5), async {
        loop {
            let event = events.recv().await.unwrap();
            if event.target_id == page.target_id() && event.url.ends_with("#/auth/new") {
                return event;
            }
        }
    })
    .await
    .unwrap();
    assert!(event.url.contains("auth/new"));
}

#[tokio::test]
async fn test_pages_are_attached_once() {
    let Some(context) = connect().await else {
        return;
    };
    let page = fixture_page(&context).await;

    let again = context.attach(page.target_id()).await.unwrap();
    assert!(Arc::ptr_eq(&page, &again));
}
