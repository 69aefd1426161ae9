//! Bill-payment screen

use std::sync::Arc;

use demobank_common::Result;

use crate::driver::Page;

/// One bill payment as the form takes it
#[derive(Debug, Clone)]
pub struct BillPayment {
    pub payee_name: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub phone_number: String,
    pub payee_account_id: String,
    pub amount: String,
    pub from_account_id: String,
}

pub struct BillPayPage {
    page: Arc<dyn Page>,
}

impl BillPayPage {
    pub fn new(page: Arc<dyn Page>) -> Self {
        Self { page }
    }

    fn payee_field(name: &str) -> String {
        format!("input[name='payee.{name}']")
    }

    fn verify_account_input() -> &'static str {
        "input[name='verifyAccount']"
    }

    fn amount_input() -> &'static str {
        "input[name='amount']"
    }

    fn from_select() -> &'static str {
        "select[name='fromAccountId']"
    }

    fn send_button() -> &'static str {
        "input[value='Send Payment']"
    }

    fn result_message() -> &'static str {
        "#billpayResult p"
    }

    pub async fn open(&self) -> Result<()> {
        self.page.goto("/billpay.htm").await
    }

    pub async fn pay(&self, payment: &BillPayment) -> Result<()> {
        let fields = [
            ("name", payment.payee_name.as_str()),
            ("address.street", payment.street.as_str()),
            ("address.city", payment.city.as_str()),
            ("address.state", payment.state.as_str()),
            ("address.zipCode", payment.zip_code.as_str()),
            ("phoneNumber", payment.phone_number.as_str()),
            ("accountNumber", payment.payee_account_id.as_str()),
        ];
        for (field, value) in fields {
            self.page.fill(&Self::payee_field(field), value).await?;
        }
        self.page
            .fill(Self::verify_account_input(), &payment.payee_account_id)
            .await?;
        self.page.fill(Self::amount_input(), &payment.amount).await?;
        self.page.wait_for(Self::from_select()).await?;
        self.page
            .select(Self::from_select(), &payment.from_account_id)
            .await?;
        self.page.click(Self::send_button()).await
    }

    /// Confirmation line naming the payee and amount.
    pub async fn confirmation_text(&self) -> Result<String> {
        self.page.inner_text(Self::result_message()).await
    }
}
