//! Landing page: login form, registration link, logout

use std::sync::Arc;

use demobank_common::Result;

use crate::driver::Page;

pub struct HomePage {
    page: Arc<dyn Page>,
}

impl HomePage {
    pub fn new(page: Arc<dyn Page>) -> Self {
        Self { page }
    }

    fn username_input() -> &'static str {
        "input[name='username']"
    }

    fn password_input() -> &'static str {
        "input[name='password']"
    }

    fn login_button() -> &'static str {
        "input[value='Log In']"
    }

    fn register_link() -> &'static str {
        "a[href*='register.htm']"
    }

    fn logout_link() -> &'static str {
        "a[href*='logout.htm']"
    }

    fn error_panel() -> &'static str {
        "#rightPanel .error"
    }

    pub async fn open(&self) -> Result<()> {
        self.page.goto("/index.htm").await
    }

    pub async fn log_in(&self, username: &str, password: &str) -> Result<()> {
        self.page.fill(Self::username_input(), username).await?;
        self.page.fill(Self::password_input(), password).await?;
        self.page.click(Self::login_button()).await
    }

    pub async fn go_to_registration(&self) -> Result<()> {
        self.page.click(Self::register_link()).await
    }

    pub async fn log_out(&self) -> Result<()> {
        self.page.click(Self::logout_link()).await
    }

    pub async fn is_logged_in(&self) -> Result<bool> {
        self.page.is_visible(Self::logout_link()).await
    }

    pub async fn error_text(&self) -> Result<String> {
        self.page.inner_text(Self::error_panel()).await
    }
}
