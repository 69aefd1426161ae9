//! Typed REST client for the banking services
//!
//! Every call goes through the shared [`HttpAdapter`], so redirect statuses
//! and `set-cookie` headers stay observable; this layer only knows paths and
//! response shapes.

use std::collections::HashMap;

use serde::Deserialize;
use serde_json::json;

use demobank_common::{ApiRequest, ApiResponse, Error, HttpAdapter, Method, Result, SuiteConfig};

/// An account as the REST surface reports it
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: i64,
    pub customer_id: i64,
    #[serde(rename = "type")]
    pub account_type: String,
    pub balance: f64,
}

/// One transaction row
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: i64,
    pub account_id: i64,
    #[serde(rename = "type")]
    pub transaction_type: String,
    pub amount: f64,
    #[serde(default)]
    pub description: Option<String>,
}

/// REST client bound to one deployment
#[derive(Debug, Clone)]
pub struct BankApi {
    adapter: HttpAdapter,
    app_base: String,
    rest_base: String,
    session_cookie: Option<String>,
}

impl BankApi {
    pub fn new(adapter: HttpAdapter, config: &SuiteConfig) -> Self {
        Self {
            adapter,
            app_base: config.base_url.clone(),
            rest_base: config.rest_base.clone(),
            session_cookie: None,
        }
    }

    /// Attach a session cookie (`name=value`) to subsequent calls.
    pub fn with_session_cookie(mut self, cookie: impl Into<String>) -> Self {
        self.session_cookie = Some(cookie.into());
        self
    }

    fn apply_session(&self, request: ApiRequest) -> ApiRequest {
        match &self.session_cookie {
            Some(cookie) => {
                let mut headers = HashMap::new();
                headers.insert("cookie".to_string(), cookie.clone());
                request.headers(headers)
            }
            None => request,
        }
    }

    /// `POST /login.htm` with form-encoded credentials. Returns the raw
    /// response: success is a redirect status plus a `JSESSIONID` cookie, and
    /// both must stay visible to the caller.
    pub async fn login_form(&self, username: &str, password: &str) -> Result<ApiResponse> {
        let request = ApiRequest::new(Method::Post, "/login.htm")
            .base_url(&self.app_base)
            .form_body(json!({ "username": username, "password": password }));
        self.adapter.send(request).await
    }

    /// Profile fetch; doubles as a credentials check.
    pub async fn profile(&self, username: &str, password: &str) -> Result<ApiResponse> {
        let request = ApiRequest::new(Method::Get, format!("/login/{username}/{password}"))
            .base_url(&self.rest_base);
        self.adapter.send(self.apply_session(request)).await
    }

    /// Transfer between accounts; the service answers with a plain-text
    /// confirmation line.
    pub async fn transfer(&self, from_account_id: &str, to_account_id: &str, amount: &str) -> Result<String> {
        let url = format!(
            "/transfer?fromAccountId={from_account_id}&toAccountId={to_account_id}&amount={amount}"
        );
        let request = ApiRequest::new(Method::Post, url).base_url(&self.rest_base);
        let response = self.adapter.send(self.apply_session(request)).await?;
        Self::expect_success(&response)?;
        Ok(response.body.to_text())
    }

    /// Transactions on an account filtered by exact amount.
    pub async fn transactions_by_amount(
        &self,
        account_id: &str,
        amount: &str,
    ) -> Result<Vec<Transaction>> {
        let url = format!("/accounts/{account_id}/transactions/amount/{amount}");
        let request = ApiRequest::new(Method::Get, url).base_url(&self.rest_base);
        let response = self.adapter.send(self.apply_session(request)).await?;
        Self::decode(response)
    }

    pub async fn account(&self, account_id: &str) -> Result<Account> {
        let request = ApiRequest::new(Method::Get, format!("/accounts/{account_id}"))
            .base_url(&self.rest_base);
        let response = self.adapter.send(self.apply_session(request)).await?;
        Self::decode(response)
    }

    pub async fn accounts_of(&self, customer_id: i64) -> Result<Vec<Account>> {
        let request = ApiRequest::new(Method::Get, format!("/customers/{customer_id}/accounts"))
            .base_url(&self.rest_base);
        let response = self.adapter.send(self.apply_session(request)).await?;
        Self::decode(response)
    }

    fn expect_success(response: &ApiResponse) -> Result<()> {
        if (200..300).contains(&response.status) {
            Ok(())
        } else {
            Err(Error::Api {
                status: response.status,
                body: response.body.to_text(),
            })
        }
    }

    fn decode<T: serde::de::DeserializeOwned>(response: ApiResponse) -> Result<T> {
        Self::expect_success(&response)?;
        match response.body.as_json() {
            Some(value) => Ok(serde_json::from_value(value.clone())?),
            None => Err(Error::Api {
                status: response.status,
                body: response.body.to_text(),
            }),
        }
    }
}
