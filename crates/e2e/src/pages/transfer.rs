//! Transfer-funds screen

use std::sync::Arc;

use demobank_common::Result;

use crate::driver::Page;

/// One transfer as the form takes it; amount stays a string so tests control
/// the exact digits submitted.
#[derive(Debug, Clone)]
pub struct TransferOrder {
    pub amount: String,
    pub from_account_id: String,
    pub to_account_id: String,
}

pub struct TransferFundsPage {
    page: Arc<dyn Page>,
}

impl TransferFundsPage {
    pub fn new(page: Arc<dyn Page>) -> Self {
        Self { page }
    }

    fn amount_input() -> &'static str {
        "input#amount"
    }

    fn from_select() -> &'static str {
        "select#fromAccountId"
    }

    fn to_select() -> &'static str {
        "select#toAccountId"
    }

    fn transfer_button() -> &'static str {
        "input[value='Transfer']"
    }

    fn result_message() -> &'static str {
        "#showResult p"
    }

    pub async fn open(&self) -> Result<()> {
        self.page.goto("/transfer.htm").await
    }

    pub async fn transfer(&self, order: &TransferOrder) -> Result<()> {
        // Account selects are populated asynchronously after page load.
        self.page.wait_for(Self::from_select()).await?;
        self.page.fill(Self::amount_input(), &order.amount).await?;
        self.page
            .select(Self::from_select(), &order.from_account_id)
            .await?;
        self.page
            .select(Self::to_select(), &order.to_account_id)
            .await?;
        self.page.click(Self::transfer_button()).await
    }

    /// Confirmation line, e.g. `$10.00 has been transferred from account
    /// #13344 to account #13455.`
    pub async fn confirmation_text(&self) -> Result<String> {
        self.page.inner_text(Self::result_message()).await
    }
}
