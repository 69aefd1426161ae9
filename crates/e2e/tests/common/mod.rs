//! Shared test support: live-deployment gating and a scripted in-memory
//! `Page` used to exercise page modules and business fixtures without a
//! browser.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use demobank_common::{Error, Result, SuiteConfig};
use demobank_e2e::Page;

/// Configuration for live scenarios, or `None` (skip) when no deployment is
/// configured.
pub fn live_config() -> Option<SuiteConfig> {
    if std::env::var("DEMOBANK_BASE_URL").is_err() {
        eprintln!("skipping live scenario: DEMOBANK_BASE_URL is not set");
        return None;
    }
    match SuiteConfig::from_env() {
        Ok(config) => Some(config),
        Err(e) => panic!("invalid suite configuration: {e}"),
    }
}

pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();
}

#[derive(Default)]
struct BankState {
    visited: Vec<String>,
    clicked: Vec<String>,
    filled: HashMap<String, String>,
    selected: HashMap<String, String>,
    accounts: Vec<String>,
    next_account_id: u64,
    logged_in: bool,
}

/// A scripted page that mimics just enough of the banking UI: registration
/// assigns an account id, opening an account assigns another, and result
/// panels echo what was submitted.
pub struct FakeBankPage {
    state: Mutex<BankState>,
    /// When set, newly assigned account ids are this string instead of a
    /// number (used to exercise setup-confirmation failures).
    pub bad_account_id: Option<String>,
}

impl FakeBankPage {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(BankState {
                next_account_id: 13344,
                ..Default::default()
            }),
            bad_account_id: None,
        }
    }

    pub fn with_bad_account_ids(id: &str) -> Self {
        let mut page = Self::new();
        page.bad_account_id = Some(id.to_string());
        page
    }

    pub fn shared(self) -> Arc<dyn Page> {
        Arc::new(self)
    }

    pub fn visited(&self) -> Vec<String> {
        self.state.lock().visited.clone()
    }

    pub fn filled(&self, selector: &str) -> Option<String> {
        self.state.lock().filled.get(selector).cloned()
    }

    pub fn selected(&self, selector: &str) -> Option<String> {
        self.state.lock().selected.get(selector).cloned()
    }

    pub fn logged_in(&self) -> bool {
        self.state.lock().logged_in
    }

    fn assign_account_id(&self, state: &mut BankState) -> String {
        let id = match &self.bad_account_id {
            Some(bad) => bad.clone(),
            None => {
                let id = state.next_account_id.to_string();
                state.next_account_id += 111;
                id
            }
        };
        state.accounts.push(id.clone());
        id
    }
}

#[async_trait]
impl Page for FakeBankPage {
    async fn goto(&self, path: &str) -> Result<()> {
        self.state.lock().visited.push(path.to_string());
        Ok(())
    }

    async fn click(&self, selector: &str) -> Result<()> {
        let mut state = self.state.lock();
        state.clicked.push(selector.to_string());
        match selector {
            "input[value='Register']" | "input[value='Log In']" => {
                state.logged_in = true;
                if selector == "input[value='Register']" {
                    self.assign_account_id(&mut state);
                }
            }
            "input[value='Open New Account']" => {
                self.assign_account_id(&mut state);
            }
            s if s.contains("logout.htm") => state.logged_in = false,
            s if s.contains("register.htm") => state.visited.push("/register.htm".into()),
            _ => {}
        }
        Ok(())
    }

    async fn fill(&self, selector: &str, value: &str) -> Result<()> {
        self.state
            .lock()
            .filled
            .insert(selector.to_string(), value.to_string());
        Ok(())
    }

    async fn select(&self, selector: &str, value: &str) -> Result<()> {
        self.state
            .lock()
            .selected
            .insert(selector.to_string(), value.to_string());
        Ok(())
    }

    async fn inner_text(&self, selector: &str) -> Result<String> {
        let state = self.state.lock();
        let text = match selector {
            "#rightPanel h1.title" => {
                let username = state
                    .filled
                    .get("input[id='customer.username']")
                    .cloned()
                    .unwrap_or_default();
                format!("Welcome {username}")
            }
            "#accountTable tbody tr:first-child td:first-child a" => state
                .accounts
                .first()
                .cloned()
                .ok_or_else(|| Error::Page("no accounts yet".into()))?,
            "#newAccountId" => state
                .accounts
                .last()
                .cloned()
                .ok_or_else(|| Error::Page("no new account yet".into()))?,
            "#balance" => "$100.00".to_string(),
            "#accountType" => "SAVINGS".to_string(),
            "#showResult p" => {
                let amount = state.filled.get("input#amount").cloned().unwrap_or_default();
                let from = state
                    .selected
                    .get("select#fromAccountId")
                    .cloned()
                    .unwrap_or_default();
                let to = state
                    .selected
                    .get("select#toAccountId")
                    .cloned()
                    .unwrap_or_default();
                format!("${amount} has been transferred from account #{from} to account #{to}.")
            }
            "#billpayResult p" => {
                let name = state
                    .filled
                    .get("input[name='payee.name']")
                    .cloned()
                    .unwrap_or_default();
                let amount = state
                    .filled
                    .get("input[name='amount']")
                    .cloned()
                    .unwrap_or_default();
                format!("Bill Payment to {name} in the amount of ${amount} was successful.")
            }
            s if s.contains("td:nth-child(2)") => "$100.00".to_string(),
            other => return Err(Error::Page(format!("fake page has no text for `{other}`"))),
        };
        Ok(text)
    }

    async fn input_value(&self, selector: &str) -> Result<String> {
        Ok(self.state.lock().filled.get(selector).cloned().unwrap_or_default())
    }

    async fn wait_for(&self, _selector: &str) -> Result<()> {
        Ok(())
    }

    async fn is_visible(&self, selector: &str) -> Result<bool> {
        if selector.contains("logout.htm") {
            return Ok(self.state.lock().logged_in);
        }
        Ok(true)
    }

    async fn url(&self) -> Result<String> {
        Ok(self
            .state
            .lock()
            .visited
            .last()
            .cloned()
            .unwrap_or_else(|| "/".into()))
    }

    async fn close(&self) -> Result<()> {
        Ok(())
    }
}
