//! Accounts overview screen

use std::sync::Arc;

use demobank_common::Result;

use crate::driver::Page;

use super::parse_money;

pub struct AccountsOverviewPage {
    page: Arc<dyn Page>,
}

impl AccountsOverviewPage {
    pub fn new(page: Arc<dyn Page>) -> Self {
        Self { page }
    }

    fn first_account_link() -> &'static str {
        "#accountTable tbody tr:first-child td:first-child a"
    }

    fn balance_cell(account_id: &str) -> String {
        format!("#accountTable tr:has(a[href$='id={account_id}']) td:nth-child(2)")
    }

    pub async fn open(&self) -> Result<()> {
        self.page.goto("/overview.htm").await
    }

    /// The id of the first listed account (the default account after
    /// registration).
    pub async fn first_account_id(&self) -> Result<String> {
        self.page.inner_text(Self::first_account_link()).await
    }

    /// Displayed balance of one account, parsed to a number.
    pub async fn balance_of(&self, account_id: &str) -> Result<f64> {
        let text = self.page.inner_text(&Self::balance_cell(account_id)).await?;
        parse_money(&text)
    }
}
