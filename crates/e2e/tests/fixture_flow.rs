//! Business-process fixtures exercised against the scripted in-memory page.
//!
//! These run everywhere: they validate the composition layer's wiring, the
//! page modules' interactions, and the setup-confirmation semantics without
//! needing a deployment or a browser.

mod common;

use std::sync::Arc;

use common::FakeBankPage;
use demobank_common::fixture::FixtureRegistry;
use demobank_common::store::CredentialStore;
use demobank_common::{Error, SuiteConfig};
use demobank_e2e::fixtures::{
    business_fixtures, core_fixtures, page_fixtures, SharedPage,
};
use demobank_e2e::{RegisteredUser, UserWithSavings};

fn test_config(dir: &tempfile::TempDir) -> SuiteConfig {
    let mut config = SuiteConfig::for_base_url("http://127.0.0.1:8080/demobank");
    config.credentials_file = dir.path().join("credentials.json");
    config
}

/// Full namespace with the scripted page standing in for the browser session.
fn registry_with(fake: Arc<FakeBankPage>, config: SuiteConfig) -> FixtureRegistry {
    let mut registry = FixtureRegistry::new();
    registry.merge(core_fixtures(config).unwrap()).unwrap();
    let shared: SharedPage = fake;
    registry.provide_value("session", shared).unwrap();
    registry.merge(page_fixtures().unwrap()).unwrap();
    registry.merge(business_fixtures().unwrap()).unwrap();
    registry
}

#[tokio::test]
async fn registered_user_creates_account_and_persists_credentials() {
    common::init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let fake = Arc::new(FakeBankPage::new());
    let registry = registry_with(fake.clone(), test_config(&dir));

    let fixtures = registry.resolve(&["registered_user", "store"]).await.unwrap();
    let user = fixtures.get::<RegisteredUser>("registered_user").unwrap();

    assert_eq!(user.checking_account_id, "13344");
    assert_eq!(
        fake.filled("input[id='customer.username']").as_deref(),
        Some(user.identity.username.as_str())
    );
    assert!(!fake.logged_in(), "fixture must log back out");

    let store = fixtures.get::<CredentialStore>("store").unwrap();
    let record = store.latest().unwrap();
    assert_eq!(record.username, user.identity.username);
    assert_eq!(record.checking_account_id.as_deref(), Some("13344"));
    assert_eq!(record.savings_account_id, None);

    fixtures.teardown().await;
}

#[tokio::test]
async fn user_with_savings_funds_from_checking_explicitly() {
    let dir = tempfile::tempdir().unwrap();
    let fake = Arc::new(FakeBankPage::new());
    let registry = registry_with(fake.clone(), test_config(&dir));

    let fixtures = registry
        .resolve(&["user_with_savings", "store"])
        .await
        .unwrap();
    let with_savings = fixtures.get::<UserWithSavings>("user_with_savings").unwrap();

    assert_eq!(with_savings.user.checking_account_id, "13344");
    assert_eq!(with_savings.savings_account_id, "13455");

    // The savings account must be funded from the confirmed checking account,
    // not whatever the form preselects.
    assert_eq!(
        fake.selected("select#fromAccountId").as_deref(),
        Some("13344")
    );
    assert_eq!(fake.selected("select#type").as_deref(), Some("1"));

    // Enrichment is a second, append-only record carrying both ids.
    let store = fixtures.get::<CredentialStore>("store").unwrap();
    let record = store.latest().unwrap();
    assert_eq!(record.username, with_savings.user.identity.username);
    assert_eq!(record.checking_account_id.as_deref(), Some("13344"));
    assert_eq!(record.savings_account_id.as_deref(), Some("13455"));

    fixtures.teardown().await;
}

#[tokio::test]
async fn non_numeric_account_id_fails_the_fixture_with_context() {
    let dir = tempfile::tempdir().unwrap();
    let fake = Arc::new(FakeBankPage::with_bad_account_ids("n/a"));
    let registry = registry_with(fake, test_config(&dir));

    let err = registry.resolve(&["registered_user"]).await.unwrap_err();
    match err {
        Error::SetupFailed { fixture, username, reason } => {
            assert_eq!(fixture, "registered_user");
            assert!(!username.is_empty());
            assert!(reason.contains("n/a"), "{reason}");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn transfer_page_echoes_the_submitted_order() {
    use demobank_e2e::pages::{TransferFundsPage, TransferOrder};

    let fake = Arc::new(FakeBankPage::new());
    let page = TransferFundsPage::new(fake.clone());

    page.open().await.unwrap();
    page.transfer(&TransferOrder {
        amount: "10.00".into(),
        from_account_id: "13455".into(),
        to_account_id: "13344".into(),
    })
    .await
    .unwrap();

    assert_eq!(
        page.confirmation_text().await.unwrap(),
        "$10.00 has been transferred from account #13455 to account #13344."
    );
}

#[tokio::test]
async fn activity_page_reads_balance_and_type() {
    use demobank_e2e::pages::AccountActivityPage;

    let fake = Arc::new(FakeBankPage::new());
    let page = AccountActivityPage::new(fake.clone());

    page.open("13455").await.unwrap();
    assert_eq!(fake.visited().last().unwrap(), "/activity.htm?id=13455");
    assert_eq!(page.balance_text().await.unwrap(), "$100.00");
    assert_eq!(page.balance().await.unwrap(), 100.0);
    assert_eq!(page.account_type().await.unwrap(), "SAVINGS");
}
