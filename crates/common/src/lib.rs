//! DemoBank E2E Common Library
//!
//! Shared harness primitives for the DemoBank end-to-end suite: fixture
//! composition, the HTTP request adapter, synthetic identity generation,
//! the credential store, and the bounded-retry combinator.

pub mod config;
pub mod error;
pub mod fixture;
pub mod http;
pub mod identity;
pub mod retry;
pub mod store;

// Re-export commonly used types
pub use config::{Environment, SuiteConfig};
pub use error::{Error, Result};
pub use fixture::{FixtureOutput, FixtureRegistry, Fixtures, Resolved};
pub use http::{ApiRequest, ApiResponse, Body, HttpAdapter, Method};
pub use identity::{Identity, IdentityForm, PasswordPolicy};
pub use retry::{retry, RetrySchedule};
pub use store::{CredentialRecord, CredentialStore};

/// Harness version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
