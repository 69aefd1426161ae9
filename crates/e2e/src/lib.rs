//! DemoBank E2E browser layer
//!
//! Drives the DemoBank web UI and REST surface end to end:
//! - a generic page-automation handle ([`driver::Page`]) with a
//!   Playwright-over-Node implementation ([`playwright::PlaywrightSession`])
//! - one page module per application screen ([`pages`])
//! - a typed REST client over the shared HTTP adapter ([`api`])
//! - business-process fixtures composing the above ([`fixtures`])
//!
//! Scenario tests live under `tests/`; they are skipped unless the target
//! deployment is configured via `DEMOBANK_BASE_URL`.

pub mod api;
pub mod driver;
pub mod fixtures;
pub mod pages;
pub mod playwright;

pub use api::BankApi;
pub use driver::Page;
pub use fixtures::{suite_registry, RegisteredUser, UserWithSavings};
pub use playwright::{PlaywrightConfig, PlaywrightSession};

pub use demobank_common::{Error, Result};
