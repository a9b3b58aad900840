use super::*;
use crate::testing::{fast_settings, ClickEffect, FakeContext, HOME_URL};

fn actions(context: &FakeContext) -> PageActions {
    let page = context.open_page(HOME_URL);
    PageActions::new(page, fast_settings().timeouts.clone())
}

#[test]
fn test_button_lookup_locators() {
    assert_eq!(
        ButtonLookup::name("Connect").locator("button").to_string(),
        "role=button[name=\"Connect\"]"
    );
    assert_eq!(
        ButtonLookup::test_id("AddIcon").locator("button").to_string(),
        "test-id=AddIcon"
    );
    assert_eq!(
        ButtonLookup::Element(TextMatch::pattern("^Send$"))
            .locator("button")
            .to_string(),
        "css=div >> has-text=/^Send$/ >> role=button"
    );
    assert_eq!(
        ButtonLookup::Asset("AKT".into()).locator("checkbox").to_string(),
        "role=listitem >> has-text=/^AKT/ >> role=checkbox"
    );
    assert_eq!(
        ButtonLookup::SendBack("Osmosis".into())
            .locator("button")
            .to_string(),
        "role=heading[name=Osmosis] >> role=button[name=Send back]"
    );
}

#[test]
fn test_href_matches() {
    let prefix = "https://terrasco.pe/mainnet/tx/";
    assert!(href_matches(prefix, "https://terrasco.pe/mainnet/tx/ABC123"));
    assert!(!href_matches(prefix, "https://terrasco.pe/mainnet/tx/"));
    assert!(!href_matches(prefix, "https://terrascoXpe/mainnet/tx/ABC123"));
}

#[tokio::test]
async fn test_expect_visible_and_hidden() {
    let context = FakeContext::with_extension();
    let actions = actions(&context);
    let shown = Locator::test_id("DoneAllIcon");
    let gone = Locator::test_id("RemoveIcon");
    context.hide(&gone);

    actions.expect_visible(&shown, None).await.unwrap();
    actions.expect_hidden(&gone, None).await.unwrap();

    let err = actions.expect_visible(&gone, None).await.unwrap_err();
    assert!(matches!(err, PageError::ElementNotVisible { .. }));
    let err = actions.expect_hidden(&shown, None).await.unwrap_err();
    assert!(matches!(err, PageError::ElementStillVisible { .. }));
}

#[tokio::test]
async fn test_expect_button_without_click() {
    let context = FakeContext::with_extension();
    let actions = actions(&context);

    actions
        .expect_button(ButtonLookup::name("Manage"), "button", false)
        .await
        .unwrap();
    assert!(context.clicks().is_empty());

    actions
        .expect_button(ButtonLookup::name("Manage"), "button", true)
        .await
        .unwrap();
    assert_eq!(context.clicks(), vec!["role=button[name=\"Manage\"]"]);
}

#[tokio::test]
async fn test_submit_clicks() {
    let context = FakeContext::with_extension();
    let actions = actions(&context);

    actions.submit().await.unwrap();
    assert_eq!(context.clicks(), vec!["role=button[name=Submit]"]);
}

#[tokio::test]
async fn test_assert_submit_disabled_never_clicks() {
    let context = FakeContext::with_extension();
    let actions = actions(&context);
    let submit = Locator::role_named("button", TextMatch::contains("Submit"));
    context.set_attribute(&submit, "disabled", "");

    actions.assert_submit_disabled().await.unwrap();
    assert!(context.clicks().is_empty());
}

#[tokio::test]
async fn test_assert_submit_disabled_fails_when_enabled() {
    let context = FakeContext::with_extension();
    let actions = actions(&context);

    let err = actions.assert_submit_disabled().await.unwrap_err();
    assert!(matches!(err, PageError::AssertionFailed(_)));
    assert!(context.clicks().is_empty());
}

#[tokio::test]
async fn test_expect_text_click_and_close() {
    let context = FakeContext::with_extension();
    let actions = actions(&context);

    actions
        .expect_text(
            TextMatch::exact("Dark"),
            TextExpectation::clicked().and_close(),
        )
        .await
        .unwrap();
    assert_eq!(
        context.clicks(),
        vec!["text=\"Dark\" >> nth=0", "test-id=CloseIcon"]
    );
}

#[tokio::test]
async fn test_expect_heading_uses_role() {
    let context = FakeContext::with_extension();
    let actions = actions(&context);
    let heading = Locator::role_named("heading", TextMatch::exact("Tx hash")).first();
    context.hide(&heading);

    let err = actions
        .expect_text(TextMatch::exact("Tx hash"), TextExpectation::heading())
        .await
        .unwrap_err();
    match err {
        PageError::ElementNotVisible { description, .. } => {
            assert_eq!(description, heading.to_string());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_user_input_defaults_to_first_textbox() {
    let context = FakeContext::with_extension();
    let actions = actions(&context);

    actions.user_input("JPY", None).await.unwrap();
    actions
        .user_input("newpass", Some("input[name=\"confirm\"]"))
        .await
        .unwrap();

    assert_eq!(
        context.fills(),
        vec![
            ("role=textbox >> nth=0".to_string(), "JPY".to_string()),
            (
                "css=input[name=\"confirm\"] >> nth=0".to_string(),
                "newpass".to_string()
            ),
        ]
    );
}

#[tokio::test]
async fn test_expect_link() {
    let context = FakeContext::with_extension();
    let actions = actions(&context);
    let name = TextMatch::pattern("[A-Z0-9]{6}[.]{3}[A-Z0-9]{6}");
    let link = Locator::role_named("link", name.clone()).first();

    context.set_attribute(&link, "href", "https://terrasco.pe/mainnet/tx/9F8E7D");
    actions
        .expect_link(name.clone(), "https://terrasco.pe/mainnet/tx/")
        .await
        .unwrap();

    let err = actions
        .expect_link(name, "https://terrasco.pe/mainnet/address/")
        .await
        .unwrap_err();
    assert!(matches!(err, PageError::AssertionFailed(_)));
}

#[tokio::test]
async fn test_wait_for_url() {
    let context = FakeContext::with_extension();
    let actions = actions(&context);
    let submit = Locator::css("[type=\"submit\"]");
    context.on_click(
        &submit,
        ClickEffect::Navigate("chrome-extension://abc/index.html#/auth/recover#3".into()),
    );

    let err = actions
        .wait_for_url("recover#3", Duration::from_millis(20))
        .await
        .unwrap_err();
    assert!(matches!(err, PageError::NavigationTimedOut { .. }));

    actions.click(&submit).await.unwrap();
    actions
        .wait_for_url("recover#3", Duration::from_millis(20))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_close_modal_fails_without_icon() {
    let context = FakeContext::with_extension();
    let actions = actions(&context);
    context.hide(&Locator::test_id(CLOSE_ICON));

    assert!(actions.close_modal().await.is_err());
}

#[tokio::test]
async fn test_close_modal_hides_dialog() {
    let context = FakeContext::with_extension();
    let actions = actions(&context);
    let dialog = Locator::role("dialog");
    context.on_click(
        &Locator::test_id(CLOSE_ICON),
        ClickEffect::Hide(dialog.to_string()),
    );

    actions.expect_visible(&dialog, None).await.unwrap();
    actions.close_modal().await.unwrap();
    actions.expect_hidden(&dialog, None).await.unwrap();
}
