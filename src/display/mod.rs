//! Display formatting for terminal output
//!
//! Plain-text tables for the CLI. Formatters take records and return a
//! `String`; printing is left to the caller.

pub mod document;
pub mod party;
pub mod transaction;

pub use document::{format_bill_list, format_invoice_list, format_order_list};
pub use party::{format_customer_list, format_vendor_list};
pub use transaction::format_transaction_list;

/// Shorten `s` to at most `max` characters, marking the cut with "..."
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a very long account name", 10), "a very ...");
    }
}
