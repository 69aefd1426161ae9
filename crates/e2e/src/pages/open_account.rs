//! Open-new-account screen

use std::sync::Arc;

use demobank_common::Result;

use crate::driver::Page;

/// Account kinds the application offers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountType {
    Checking,
    Savings,
}

impl AccountType {
    /// The option value the account-type `<select>` uses.
    pub fn form_value(&self) -> &'static str {
        match self {
            AccountType::Checking => "0",
            AccountType::Savings => "1",
        }
    }

    /// The label the UI displays, e.g. on the activity screen.
    pub fn label(&self) -> &'static str {
        match self {
            AccountType::Checking => "CHECKING",
            AccountType::Savings => "SAVINGS",
        }
    }
}

pub struct OpenAccountPage {
    page: Arc<dyn Page>,
}

impl OpenAccountPage {
    pub fn new(page: Arc<dyn Page>) -> Self {
        Self { page }
    }

    fn type_select() -> &'static str {
        "select#type"
    }

    fn funding_select() -> &'static str {
        "select#fromAccountId"
    }

    fn open_button() -> &'static str {
        "input[value='Open New Account']"
    }

    fn new_account_id_selector() -> &'static str {
        "#newAccountId"
    }

    pub async fn open(&self) -> Result<()> {
        self.page.goto("/openaccount.htm").await
    }

    /// Open an account of the given type, funded from an explicit account.
    pub async fn open_account(
        &self,
        account_type: AccountType,
        funding_account_id: &str,
    ) -> Result<()> {
        // The funding select is populated asynchronously after page load.
        self.page.wait_for(Self::funding_select()).await?;
        self.page
            .select(Self::type_select(), account_type.form_value())
            .await?;
        self.page
            .select(Self::funding_select(), funding_account_id)
            .await?;
        self.page.click(Self::open_button()).await
    }

    /// The id of the account just opened, once the confirmation renders.
    pub async fn new_account_id(&self) -> Result<String> {
        self.page.inner_text(Self::new_account_id_selector()).await
    }
}
