//! Suite fixture wiring
//!
//! Four independently-defined fixture sets compose into one namespace:
//! core (config, HTTP adapter, REST client, credential store), browser
//! (the live session), pages (one module per screen), and business-process
//! fixtures built on top of them. Business fixtures expose plain data to
//! dependents, never page modules.

use std::sync::Arc;

use tracing::{info, warn};

use demobank_common::fixture::{FixtureOutput, FixtureRegistry, Resolved};
use demobank_common::identity::generate_identity;
use demobank_common::retry::{retry, RetrySchedule};
use demobank_common::store::{CredentialRecord, CredentialStore};
use demobank_common::{Error, HttpAdapter, Result, SuiteConfig};

use crate::api::BankApi;
use crate::driver::Page;
use crate::pages::{
    AccountActivityPage, AccountType, AccountsOverviewPage, BillPayPage, HomePage,
    OpenAccountPage, RegisterPage, TransferFundsPage,
};
use crate::playwright::{PlaywrightConfig, PlaywrightSession};

/// The page handle as fixtures share it
pub type SharedPage = Arc<dyn Page>;

/// Result of the `registered_user` fixture: a user that exists in the
/// application, with the system-assigned default checking account.
#[derive(Debug, Clone)]
pub struct RegisteredUser {
    pub identity: demobank_common::Identity,
    pub checking_account_id: String,
}

/// Result of the `user_with_savings` fixture
#[derive(Debug, Clone)]
pub struct UserWithSavings {
    pub user: RegisteredUser,
    pub savings_account_id: String,
}

/// The full namespace: core + browser + pages + business fixtures.
pub fn suite_registry(config: SuiteConfig) -> Result<FixtureRegistry> {
    let mut registry = FixtureRegistry::new();
    registry.merge(core_fixtures(config)?)?;
    registry.merge(browser_fixtures()?)?;
    registry.merge(page_fixtures()?)?;
    registry.merge(business_fixtures()?)?;
    Ok(registry)
}

/// `config`, `http`, `api`, and `store`.
pub fn core_fixtures(config: SuiteConfig) -> Result<FixtureRegistry> {
    let mut registry = FixtureRegistry::new();
    registry.provide_value("config", config)?;

    registry.provide("http", &[], |_| {
        Box::pin(async { Ok(FixtureOutput::value(HttpAdapter::new()?)) })
    })?;

    registry.provide("api", &["config", "http"], |deps| {
        Box::pin(async move {
            let config = deps.get::<SuiteConfig>("config")?;
            let http = deps.get::<HttpAdapter>("http")?;
            Ok(FixtureOutput::value(BankApi::new((*http).clone(), &config)))
        })
    })?;

    registry.provide("store", &["config"], |deps| {
        Box::pin(async move {
            let config = deps.get::<SuiteConfig>("config")?;
            Ok(FixtureOutput::value(CredentialStore::new(
                config.credentials_file.clone(),
            )))
        })
    })?;

    Ok(registry)
}

/// The live browser `session`, torn down after the test.
pub fn browser_fixtures() -> Result<FixtureRegistry> {
    let mut registry = FixtureRegistry::new();
    registry.provide("session", &["config"], |deps| {
        Box::pin(async move {
            let config = deps.get::<SuiteConfig>("config")?;
            let session =
                PlaywrightSession::launch(PlaywrightConfig::from_suite(&config)).await?;
            let page: SharedPage = Arc::new(session);
            let for_teardown = page.clone();
            Ok(FixtureOutput::value(page).with_teardown(async move {
                if let Err(e) = for_teardown.close().await {
                    warn!(error = %e, "browser session teardown failed");
                }
            }))
        })
    })?;
    Ok(registry)
}

/// One fixture per page module, each over the shared `session`.
pub fn page_fixtures() -> Result<FixtureRegistry> {
    let mut registry = FixtureRegistry::new();

    macro_rules! page_fixture {
        ($name:literal, $ty:ident) => {
            registry.provide($name, &["session"], |deps| {
                Box::pin(async move {
                    let session = deps.get::<SharedPage>("session")?;
                    Ok(FixtureOutput::value($ty::new((*session).clone())))
                })
            })?;
        };
    }

    page_fixture!("home_page", HomePage);
    page_fixture!("register_page", RegisterPage);
    page_fixture!("open_account_page", OpenAccountPage);
    page_fixture!("accounts_overview_page", AccountsOverviewPage);
    page_fixture!("account_activity_page", AccountActivityPage);
    page_fixture!("transfer_funds_page", TransferFundsPage);
    page_fixture!("bill_pay_page", BillPayPage);

    Ok(registry)
}

/// `registered_user` and `user_with_savings`.
pub fn business_fixtures() -> Result<FixtureRegistry> {
    let mut registry = FixtureRegistry::new();

    registry.provide(
        "registered_user",
        &["home_page", "register_page", "accounts_overview_page", "store"],
        |deps| Box::pin(async move { register_user(deps).await }),
    )?;

    registry.provide(
        "user_with_savings",
        &["registered_user", "home_page", "open_account_page", "store"],
        |deps| Box::pin(async move { open_savings(deps).await }),
    )?;

    Ok(registry)
}

fn numeric_id(raw: &str) -> bool {
    !raw.is_empty() && raw.chars().all(|c| c.is_ascii_digit())
}

fn setup_failed(fixture: &str, username: &str, reason: impl std::fmt::Display) -> Error {
    Error::SetupFailed {
        fixture: fixture.to_string(),
        username: username.to_string(),
        reason: reason.to_string(),
    }
}

/// Register a fresh identity, confirm the welcome message, discover the
/// default checking account, persist the credentials, and log back out.
async fn register_user(deps: Resolved) -> Result<FixtureOutput> {
    const FIXTURE: &str = "registered_user";
    let home = deps.get::<HomePage>("home_page")?;
    let register = deps.get::<RegisterPage>("register_page")?;
    let overview = deps.get::<AccountsOverviewPage>("accounts_overview_page")?;
    let store = deps.get::<CredentialStore>("store")?;

    let identity = generate_identity();
    let username = identity.username.clone();
    info!(%username, "registering user");

    home.open().await?;
    home.go_to_registration().await?;
    register.register(&identity.flattened()).await?;

    let schedule = RetrySchedule::default();
    retry("confirm registration", &schedule, || async {
        let title = register.welcome_title().await?;
        if title.contains(&username) {
            Ok(())
        } else {
            Err(Error::Page(format!("unexpected post-registration title `{title}`")))
        }
    })
    .await
    .map_err(|e| setup_failed(FIXTURE, &username, e))?;

    // A just-created account is not always visible on the first overview load.
    let checking_account_id = retry("discover default account", &schedule, || async {
        overview.open().await?;
        overview.first_account_id().await
    })
    .await
    .map_err(|e| setup_failed(FIXTURE, &username, e))?;

    if !numeric_id(&checking_account_id) {
        return Err(setup_failed(
            FIXTURE,
            &username,
            format!("default account id `{checking_account_id}` is not numeric"),
        ));
    }

    store.append(CredentialRecord::from_identity(
        &identity,
        Some(checking_account_id.clone()),
        None,
    ))?;
    home.log_out().await?;

    Ok(FixtureOutput::value(RegisteredUser {
        identity,
        checking_account_id,
    }))
}

/// Log the registered user back in and open a savings account funded
/// explicitly from the checking account.
async fn open_savings(deps: Resolved) -> Result<FixtureOutput> {
    const FIXTURE: &str = "user_with_savings";
    let user = deps.get::<RegisteredUser>("registered_user")?;
    let home = deps.get::<HomePage>("home_page")?;
    let open_account = deps.get::<OpenAccountPage>("open_account_page")?;
    let store = deps.get::<CredentialStore>("store")?;

    let username = user.identity.username.clone();
    info!(%username, funding = %user.checking_account_id, "opening savings account");

    home.open().await?;
    home.log_in(&username, &user.identity.password).await?;
    open_account.open().await?;
    open_account
        .open_account(AccountType::Savings, &user.checking_account_id)
        .await?;

    let schedule = RetrySchedule::default();
    let savings_account_id = retry("discover new savings account", &schedule, || async {
        open_account.new_account_id().await
    })
    .await
    .map_err(|e| setup_failed(FIXTURE, &username, e))?;

    if !numeric_id(&savings_account_id) {
        return Err(setup_failed(
            FIXTURE,
            &username,
            format!("new account id `{savings_account_id}` is not numeric"),
        ));
    }

    // The store is append-only: enrichment lands as a new record.
    store.append(CredentialRecord::from_identity(
        &user.identity,
        Some(user.checking_account_id.clone()),
        Some(savings_account_id.clone()),
    ))?;
    home.log_out().await?;

    Ok(FixtureOutput::value(UserWithSavings {
        user: (*user).clone(),
        savings_account_id,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config(dir: &tempfile::TempDir) -> SuiteConfig {
        let mut config = SuiteConfig::for_base_url("http://127.0.0.1:8080/demobank");
        config.credentials_file = dir.path().join("credentials.json");
        config
    }

    #[tokio::test]
    async fn suite_namespace_composes_without_collisions() {
        let dir = tempfile::tempdir().unwrap();
        let registry = suite_registry(test_config(&dir)).unwrap();
        for name in [
            "config",
            "http",
            "api",
            "store",
            "session",
            "home_page",
            "transfer_funds_page",
            "registered_user",
            "user_with_savings",
        ] {
            assert!(registry.contains(name), "missing fixture `{name}`");
        }
    }

    #[tokio::test]
    async fn api_resolves_without_touching_the_browser() {
        // `session` is lazy; requesting only REST-side fixtures must not
        // require Playwright to be installed.
        let dir = tempfile::tempdir().unwrap();
        let registry = suite_registry(test_config(&dir)).unwrap();
        let fixtures = registry.resolve(&["api", "store"]).await.unwrap();
        assert!(fixtures.get::<BankApi>("api").is_ok());
        assert!(fixtures.get::<CredentialStore>("store").is_ok());
        fixtures.teardown().await;
    }

    #[test]
    fn numeric_id_matches_digit_strings_only() {
        assert!(numeric_id("13344"));
        assert!(!numeric_id(""));
        assert!(!numeric_id("13 344"));
        assert!(!numeric_id("n/a"));
    }
}
