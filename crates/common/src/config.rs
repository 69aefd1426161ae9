//! Suite configuration
//!
//! All knobs come from environment variables with per-environment defaults.
//! A missing base URL is a hard error raised before anything touches the
//! network, so misconfigured CI jobs fail with a message naming the variable.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::error::{Error, Result};

const BASE_URL_VAR: &str = "DEMOBANK_BASE_URL";
const REST_BASE_VAR: &str = "DEMOBANK_REST_BASE";
const ENV_VAR: &str = "DEMOBANK_ENV";
const CREDENTIALS_VAR: &str = "DEMOBANK_CREDENTIALS_FILE";

/// Which deployment of the application the suite targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Local,
    Staging,
    Ci,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Staging => "staging",
            Environment::Ci => "ci",
        }
    }

    /// Default base URL for this environment, if it has one.
    ///
    /// Only local carries a default; remote deployments must be named
    /// explicitly so tests never hit an unintended host.
    fn default_base_url(&self) -> Option<&'static str> {
        match self {
            Environment::Local => Some("http://127.0.0.1:8080/demobank"),
            Environment::Staging | Environment::Ci => None,
        }
    }
}

impl FromStr for Environment {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "local" => Ok(Environment::Local),
            "staging" => Ok(Environment::Staging),
            "ci" => Ok(Environment::Ci),
            other => Err(Error::InvalidEnvironment(other.to_string())),
        }
    }
}

/// Resolved suite configuration
#[derive(Debug, Clone)]
pub struct SuiteConfig {
    pub environment: Environment,
    /// Root of the web UI, e.g. `http://127.0.0.1:8080/demobank`
    pub base_url: String,
    /// Root of the REST surface, e.g. `{base_url}/services/bank`
    pub rest_base: String,
    /// Where generated credentials are appended
    pub credentials_file: PathBuf,
    pub headless: bool,
    pub viewport_width: u32,
    pub viewport_height: u32,
    /// Per-action timeout for page operations
    pub nav_timeout: Duration,
}

impl SuiteConfig {
    /// Build configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        let environment = match std::env::var(ENV_VAR) {
            Ok(v) => v.parse::<Environment>()?,
            Err(_) => Environment::default(),
        };

        let base_url = match std::env::var(BASE_URL_VAR) {
            Ok(v) => v,
            Err(_) => environment
                .default_base_url()
                .map(String::from)
                .ok_or_else(|| Error::MissingBaseUrl {
                    var: BASE_URL_VAR.to_string(),
                    environment: environment.as_str().to_string(),
                })?,
        };
        let base_url = base_url.trim_end_matches('/').to_string();

        let rest_base = std::env::var(REST_BASE_VAR)
            .unwrap_or_else(|_| format!("{}/services/bank", base_url));

        let credentials_file = std::env::var(CREDENTIALS_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("test-results/credentials.json"));

        let headless = std::env::var("DEMOBANK_HEADLESS")
            .map(|v| v != "0" && v != "false")
            .unwrap_or(true);

        Ok(Self {
            environment,
            base_url,
            rest_base,
            credentials_file,
            headless,
            viewport_width: 1280,
            viewport_height: 720,
            nav_timeout: Duration::from_secs(15),
        })
    }

    /// Configuration pointing at an explicit base URL (mostly for tests).
    pub fn for_base_url(base_url: &str) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();
        Self {
            environment: Environment::Local,
            rest_base: format!("{}/services/bank", base_url),
            credentials_file: PathBuf::from("test-results/credentials.json"),
            headless: true,
            viewport_width: 1280,
            viewport_height: 720,
            nav_timeout: Duration::from_secs(15),
            base_url,
        }
    }
}
