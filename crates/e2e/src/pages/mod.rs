//! Page interaction modules, one per application screen
//!
//! Each module wraps a single screen behind typed operations (fill form,
//! submit, read result) and depends only on the generic [`crate::Page`]
//! handle. Selectors are produced by functions evaluated at call time so
//! dynamically rendered elements are always addressed fresh.

mod activity;
mod bill_pay;
mod home;
mod open_account;
mod overview;
mod register;
mod transfer;

pub use activity::AccountActivityPage;
pub use bill_pay::{BillPayPage, BillPayment};
pub use home::HomePage;
pub use open_account::{AccountType, OpenAccountPage};
pub use overview::AccountsOverviewPage;
pub use register::RegisterPage;
pub use transfer::{TransferFundsPage, TransferOrder};

use demobank_common::{Error, Result};

/// Parse a displayed balance like `$1,234.56` (or `-$12.00`) into a number.
pub fn parse_money(text: &str) -> Result<f64> {
    let cleaned: String = text
        .trim()
        .chars()
        .filter(|c| !matches!(c, '$' | ','))
        .collect();
    cleaned
        .parse::<f64>()
        .map_err(|_| Error::Page(format!("not a money amount: `{text}`")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_money_handles_display_formats() {
        assert_eq!(parse_money("$100.00").unwrap(), 100.0);
        assert_eq!(parse_money(" $1,250.50 ").unwrap(), 1250.5);
        assert_eq!(parse_money("-$12.00").unwrap(), -12.0);
        assert!(parse_money("N/A").is_err());
    }
}
