//! Live scenario: the REST surface — form login with an observable redirect
//! and session cookie, profile fetch, transfer, and transaction lookup.

mod common;

use demobank_common::http::extract_cookie;
use demobank_e2e::{suite_registry, BankApi, UserWithSavings};

#[tokio::test]
async fn form_login_redirects_and_sets_a_session_cookie() {
    common::init_tracing();
    let Some(config) = common::live_config() else { return };

    let registry = suite_registry(config).unwrap();
    let fixtures = registry
        .resolve(&["registered_user", "api"])
        .await
        .unwrap();

    let user = fixtures
        .get::<demobank_e2e::RegisteredUser>("registered_user")
        .unwrap();
    let api = fixtures.get::<BankApi>("api").unwrap();

    let response = api
        .login_form(&user.identity.username, &user.identity.password)
        .await
        .unwrap();

    assert!(
        matches!(response.status, 301 | 302),
        "expected a redirect, got {}",
        response.status
    );
    let cookie = extract_cookie(&response.headers, "JSESSIONID");
    assert!(cookie.is_some(), "no JSESSIONID cookie in {:?}", response.headers);
    assert!(cookie.unwrap().starts_with("JSESSIONID="));

    fixtures.teardown().await;
}

#[tokio::test]
async fn rest_transfer_confirms_and_shows_up_in_transactions() {
    common::init_tracing();
    let Some(config) = common::live_config() else { return };

    let registry = suite_registry(config).unwrap();
    let fixtures = registry
        .resolve(&["user_with_savings", "api"])
        .await
        .unwrap();

    let with_savings = fixtures.get::<UserWithSavings>("user_with_savings").unwrap();
    let api = fixtures.get::<BankApi>("api").unwrap();

    // The service wants an authenticated session; the profile endpoint both
    // checks credentials and establishes it.
    let login = api
        .profile(
            &with_savings.user.identity.username,
            &with_savings.user.identity.password,
        )
        .await
        .unwrap();
    assert_eq!(login.status, 200, "profile fetch failed: {:?}", login.body);
    let api = match extract_cookie(&login.headers, "JSESSIONID") {
        Some(cookie) => (*api).clone().with_session_cookie(cookie),
        None => (*api).clone(),
    };

    let savings = &with_savings.savings_account_id;
    let checking = &with_savings.user.checking_account_id;

    let savings_before = api.account(savings).await.unwrap();
    let owned = api.accounts_of(savings_before.customer_id).await.unwrap();
    for id in [savings, checking] {
        let id: i64 = id.parse().unwrap();
        assert!(
            owned.iter().any(|a| a.id == id),
            "account {id} missing from {owned:?}"
        );
    }

    let confirmation = api.transfer(savings, checking, "10.00").await.unwrap();
    assert!(
        confirmation.contains("transferred") && confirmation.contains("10"),
        "unexpected confirmation: {confirmation}"
    );

    let savings_after = api.account(savings).await.unwrap();
    assert!(
        (savings_after.balance - (savings_before.balance - 10.0)).abs() < 0.005,
        "savings balance {} -> {}",
        savings_before.balance,
        savings_after.balance
    );

    let transactions = api.transactions_by_amount(savings, "10.00").await.unwrap();
    assert!(
        transactions.iter().any(|t| (t.amount - 10.0).abs() < 0.005),
        "no 10.00 transaction on account {savings}: {transactions:?}"
    );

    fixtures.teardown().await;
}
