//! Registration screen

use std::sync::Arc;

use demobank_common::identity::IdentityForm;
use demobank_common::Result;

use crate::driver::Page;

pub struct RegisterPage {
    page: Arc<dyn Page>,
}

impl RegisterPage {
    pub fn new(page: Arc<dyn Page>) -> Self {
        Self { page }
    }

    fn customer_field(name: &str) -> String {
        format!("input[id='customer.{name}']")
    }

    fn repeated_password_input() -> &'static str {
        "input[id='repeatedPassword']"
    }

    fn register_button() -> &'static str {
        "input[value='Register']"
    }

    fn title() -> &'static str {
        "#rightPanel h1.title"
    }

    fn message() -> &'static str {
        "#rightPanel p"
    }

    pub async fn open(&self) -> Result<()> {
        self.page.goto("/register.htm").await
    }

    /// Fill the whole registration form from a flattened identity and submit.
    pub async fn register(&self, form: &IdentityForm) -> Result<()> {
        let fields = [
            ("firstName", form.first_name.as_str()),
            ("lastName", form.last_name.as_str()),
            ("address.street", form.street.as_str()),
            ("address.city", form.city.as_str()),
            ("address.state", form.state.as_str()),
            ("address.zipCode", form.zip_code.as_str()),
            ("phoneNumber", form.phone_number.as_str()),
            ("ssn", form.ssn.as_str()),
            ("username", form.username.as_str()),
            ("password", form.password.as_str()),
        ];
        for (field, value) in fields {
            self.page.fill(&Self::customer_field(field), value).await?;
        }
        self.page
            .fill(Self::repeated_password_input(), &form.confirm_password)
            .await?;
        self.page.click(Self::register_button()).await
    }

    /// Title shown after submission, e.g. `Welcome {username}`.
    pub async fn welcome_title(&self) -> Result<String> {
        self.page.inner_text(Self::title()).await
    }

    pub async fn confirmation_text(&self) -> Result<String> {
        self.page.inner_text(Self::message()).await
    }
}
