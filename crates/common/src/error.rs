//! Error types for the DemoBank E2E harness

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using the harness Error
pub type Result<T> = std::result::Result<T, Error>;

/// Harness error types
///
/// Configuration and fixture-graph errors are raised before any side effect
/// happens; setup-confirmation errors name the fixture and user context that
/// failed, so a red test is diagnosable from the message alone.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Base URL not configured: set {var} (environment `{environment}` has no default)")]
    MissingBaseUrl { var: String, environment: String },

    #[error("Unknown environment `{0}` (expected one of: local, staging, ci)")]
    InvalidEnvironment(String),

    #[error("Unsupported HTTP method: {0}")]
    UnsupportedMethod(String),

    #[error("Fixture name collision: `{0}` is already registered")]
    FixtureCollision(String),

    #[error("Unknown fixture: `{0}`")]
    UnknownFixture(String),

    #[error("Fixture `{name}` resolved to an unexpected type")]
    FixtureType { name: String },

    #[error("Fixture dependency cycle: {}", .0.join(" -> "))]
    FixtureCycle(Vec<String>),

    #[error("Fixture `{fixture}` failed for user `{username}`: {reason}")]
    SetupFailed {
        fixture: String,
        username: String,
        reason: String,
    },

    #[error("`{label}` did not succeed after {attempts} attempts: {last}")]
    RetriesExhausted {
        label: String,
        attempts: usize,
        last: String,
    },

    #[error("Credential file does not exist: {}", .0.display())]
    StoreMissing(PathBuf),

    #[error("Credential file contains no records: {}", .0.display())]
    StoreEmpty(PathBuf),

    #[error("Credential file is malformed: {}: {reason}", .path.display())]
    StoreMalformed { path: PathBuf, reason: String },

    #[error("API call failed with status {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Page operation failed: {0}")]
    Page(String),

    #[error("Browser driver error: {0}")]
    Driver(String),

    #[error("Playwright not found. Install with: npx playwright install")]
    PlaywrightNotFound,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
