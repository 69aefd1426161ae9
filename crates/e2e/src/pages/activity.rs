//! Account activity screen

use std::sync::Arc;

use demobank_common::Result;

use crate::driver::Page;

use super::parse_money;

pub struct AccountActivityPage {
    page: Arc<dyn Page>,
}

impl AccountActivityPage {
    pub fn new(page: Arc<dyn Page>) -> Self {
        Self { page }
    }

    fn account_type_selector() -> &'static str {
        "#accountType"
    }

    fn balance_selector() -> &'static str {
        "#balance"
    }

    pub async fn open(&self, account_id: &str) -> Result<()> {
        self.page.goto(&format!("/activity.htm?id={account_id}")).await
    }

    /// Displayed account type, e.g. `CHECKING` or `SAVINGS`.
    pub async fn account_type(&self) -> Result<String> {
        self.page.inner_text(Self::account_type_selector()).await
    }

    /// Displayed balance as shown, e.g. `$100.00`.
    pub async fn balance_text(&self) -> Result<String> {
        self.page.inner_text(Self::balance_selector()).await
    }

    pub async fn balance(&self) -> Result<f64> {
        parse_money(&self.balance_text().await?)
    }
}
