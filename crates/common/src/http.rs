//! HTTP request adapter
//!
//! Single entry point for every REST call in the suite. Redirects are never
//! followed (the application signals success with 301/302 plus a session
//! cookie, which must stay observable), response bodies degrade to raw text
//! when they are not valid JSON, and header keys are lowercased.

use std::collections::HashMap;
use std::time::Duration;

use serde_json::Value;
use tracing::debug;

use crate::error::{Error, Result};

/// The verbs the adapter dispatches; anything else fails before network I/O
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
    Patch,
}

impl Method {
    pub fn parse(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(Method::Get),
            "POST" => Ok(Method::Post),
            "PUT" => Ok(Method::Put),
            "DELETE" => Ok(Method::Delete),
            "PATCH" => Ok(Method::Patch),
            other => Err(Error::UnsupportedMethod(other.to_string())),
        }
    }

    fn as_reqwest(self) -> reqwest::Method {
        match self {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
            Method::Patch => reqwest::Method::PATCH,
        }
    }
}

/// Authorization input: either a bare bearer token or a full header map
/// merged over the adapter defaults.
#[derive(Debug, Clone)]
pub enum Auth {
    Bearer(String),
    Headers(HashMap<String, String>),
}

/// One outbound request
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    pub base_url: Option<String>,
    pub body: Option<Value>,
    pub auth: Option<Auth>,
    /// form-urlencoded body instead of JSON
    pub form: bool,
}

impl ApiRequest {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            base_url: None,
            body: None,
            auth: None,
            form: false,
        }
    }

    pub fn base_url(mut self, base: impl Into<String>) -> Self {
        self.base_url = Some(base.into());
        self
    }

    pub fn json_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self.form = false;
        self
    }

    pub fn form_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self.form = true;
        self
    }

    pub fn bearer(mut self, token: impl Into<String>) -> Self {
        self.auth = Some(Auth::Bearer(token.into()));
        self
    }

    pub fn headers(mut self, headers: HashMap<String, String>) -> Self {
        self.auth = Some(Auth::Headers(headers));
        self
    }

    fn full_url(&self) -> String {
        match &self.base_url {
            Some(base) => format!("{}{}", base.trim_end_matches('/'), self.url),
            None => self.url.clone(),
        }
    }
}

/// Parsed response body: JSON when well-formed, raw text otherwise
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    Json(Value),
    Text(String),
}

impl Body {
    /// Decode without ever failing: JSON if the text parses, else the text.
    pub fn parse(text: String) -> Self {
        match serde_json::from_str::<Value>(&text) {
            Ok(value) => Body::Json(value),
            Err(_) => Body::Text(text),
        }
    }

    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Body::Json(v) => Some(v),
            Body::Text(_) => None,
        }
    }

    /// The body as text: raw for `Text`, serialized for `Json`.
    pub fn to_text(&self) -> String {
        match self {
            Body::Json(v) => v.to_string(),
            Body::Text(t) => t.clone(),
        }
    }
}

/// One inbound response; header keys are lowercase, `set-cookie` may repeat
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Body,
    pub headers: HashMap<String, Vec<String>>,
}

/// Thin wrapper over one `reqwest::Client` with redirects disabled
#[derive(Debug, Clone)]
pub struct HttpAdapter {
    client: reqwest::Client,
}

impl HttpAdapter {
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self { client })
    }

    /// Dispatch a request; transport failures propagate unretried.
    pub async fn send(&self, req: ApiRequest) -> Result<ApiResponse> {
        let url = req.full_url();
        debug!(method = ?req.method, %url, form = req.form, "sending request");

        let mut builder = self.client.request(req.method.as_reqwest(), &url);

        let mut supplied_content_type = false;
        match &req.auth {
            Some(Auth::Bearer(token)) => {
                builder = builder.header("authorization", format!("Bearer {}", token));
            }
            Some(Auth::Headers(map)) => {
                for (key, value) in map {
                    if key.eq_ignore_ascii_case("content-type") {
                        supplied_content_type = true;
                    }
                    builder = builder.header(key, value);
                }
            }
            None => {}
        }

        if let Some(body) = &req.body {
            if req.form {
                builder = builder.form(&form_pairs(body));
            } else {
                if !supplied_content_type {
                    builder = builder.header("content-type", "application/json");
                }
                builder = builder.body(body.to_string());
            }
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();

        let mut headers: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in response.headers() {
            headers
                .entry(name.as_str().to_ascii_lowercase())
                .or_default()
                .push(String::from_utf8_lossy(value.as_bytes()).into_owned());
        }

        let text = response.text().await?;
        Ok(ApiResponse {
            status,
            body: Body::parse(text),
            headers,
        })
    }
}

/// Flatten a JSON object into form parameters; non-object scalars become a
/// single `value` parameter so callers get a descriptive 4xx rather than a
/// silent empty body.
fn form_pairs(body: &Value) -> Vec<(String, String)> {
    match body {
        Value::Object(map) => map
            .iter()
            .map(|(k, v)| (k.clone(), scalar_text(v)))
            .collect(),
        other => vec![("value".to_string(), scalar_text(other))],
    }
}

fn scalar_text(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Find a `set-cookie` entry whose name matches case-insensitively and return
/// just the `name=value` segment (text before the first `;`), if any.
pub fn extract_cookie(headers: &HashMap<String, Vec<String>>, name: &str) -> Option<String> {
    let values = headers
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case("set-cookie"))
        .map(|(_, values)| values)?;

    for raw in values {
        let pair = raw.split(';').next().unwrap_or("").trim();
        if let Some((cookie_name, _)) = pair.split_once('=') {
            if cookie_name.trim().eq_ignore_ascii_case(name) {
                return Some(pair.to_string());
            }
        }
    }
    None
}
