//! Generic page-automation handle
//!
//! Page modules depend on this trait only, never on a concrete browser
//! engine. Elements are always addressed by selector string evaluated at
//! call time, so dynamically rendered elements are looked up fresh on every
//! operation (no cached element handles).

use async_trait::async_trait;

use demobank_common::Result;

/// One browser page, exclusively owned by a single test
#[async_trait]
pub trait Page: Send + Sync {
    /// Navigate to a path relative to the configured base URL.
    async fn goto(&self, path: &str) -> Result<()>;

    async fn click(&self, selector: &str) -> Result<()>;

    async fn fill(&self, selector: &str, value: &str) -> Result<()>;

    /// Select an option by value in a `<select>` element.
    async fn select(&self, selector: &str, value: &str) -> Result<()>;

    /// Wait for the element to be visible and return its trimmed text.
    async fn inner_text(&self, selector: &str) -> Result<String>;

    /// Current value of an input element.
    async fn input_value(&self, selector: &str) -> Result<String>;

    /// Wait for the element to become visible.
    async fn wait_for(&self, selector: &str) -> Result<()>;

    async fn is_visible(&self, selector: &str) -> Result<bool>;

    /// Current page URL.
    async fn url(&self) -> Result<String>;

    /// Shut the underlying browser session down.
    async fn close(&self) -> Result<()>;
}
