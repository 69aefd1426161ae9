//! Live scenario: a brand-new user opens a savings account.
//!
//! Requires a running deployment (`DEMOBANK_BASE_URL`) and a Playwright
//! installation; skipped otherwise.

mod common;

use demobank_e2e::pages::{AccountActivityPage, HomePage};
use demobank_e2e::{suite_registry, UserWithSavings};

#[tokio::test]
async fn new_user_opens_a_savings_account_funded_from_checking() {
    common::init_tracing();
    let Some(config) = common::live_config() else { return };

    let registry = suite_registry(config).unwrap();
    let fixtures = registry
        .resolve(&["user_with_savings", "home_page", "account_activity_page"])
        .await
        .unwrap();

    let with_savings = fixtures.get::<UserWithSavings>("user_with_savings").unwrap();
    let savings_id = &with_savings.savings_account_id;
    assert!(
        !savings_id.is_empty() && savings_id.chars().all(|c| c.is_ascii_digit()),
        "savings account id `{savings_id}` is not numeric"
    );

    // The fixture logs out after setup; sign back in to inspect the account.
    let home = fixtures.get::<HomePage>("home_page").unwrap();
    home.open().await.unwrap();
    home.log_in(
        &with_savings.user.identity.username,
        &with_savings.user.identity.password,
    )
    .await
    .unwrap();

    let activity = fixtures.get::<AccountActivityPage>("account_activity_page").unwrap();
    activity.open(savings_id).await.unwrap();
    assert_eq!(activity.balance_text().await.unwrap(), "$100.00");
    assert_eq!(activity.account_type().await.unwrap(), "SAVINGS");

    fixtures.teardown().await;
}
