//! Strongly-typed ID wrappers for all entity types
//!
//! Using newtype wrappers prevents accidentally mixing up IDs from different
//! entity types at compile time. IDs are prefixed strings so that snapshots
//! written by older versions (which used free-form string IDs) load verbatim.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::hash::Hash;
use std::str::FromStr;
use uuid::Uuid;

/// Behaviour shared by every entity ID type
pub trait RecordId:
    Clone + fmt::Debug + fmt::Display + PartialEq + Eq + Hash + Serialize + DeserializeOwned
{
    /// Prefix identifying the owning collection (e.g. "inv")
    const PREFIX: &'static str;

    /// Mint a fresh, collision-free ID
    fn generate() -> Self;

    /// Wrap an existing ID string without validation
    fn from_raw(raw: impl Into<String>) -> Self;

    /// Borrow the ID as a string slice
    fn as_str(&self) -> &str;
}

/// Macro to generate ID newtype wrappers
macro_rules! define_id {
    ($name:ident, $prefix:literal) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID (prefix + time-ordered UUID)
            pub fn new() -> Self {
                <Self as RecordId>::generate()
            }
        }

        impl RecordId for $name {
            const PREFIX: &'static str = $prefix;

            fn generate() -> Self {
                Self(format!("{}-{}", $prefix, Uuid::now_v7().simple()))
            }

            fn from_raw(raw: impl Into<String>) -> Self {
                Self(raw.into())
            }

            fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl FromStr for $name {
            type Err = Infallible;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(s.trim().to_string()))
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(AccountId, "acc");
define_id!(TransactionId, "txn");
define_id!(CustomerId, "cus");
define_id!(VendorId, "ven");
define_id!(InvoiceId, "inv");
define_id!(SalesOrderId, "so");
define_id!(PurchaseOrderId, "po");
define_id!(BillId, "bill");
define_id!(RecurringInvoiceId, "rinv");
define_id!(RecurringBillId, "rbill");
define_id!(RecurringExpenseId, "rexp");
define_id!(PaymentReceivedId, "pay");
define_id!(PaymentMadeId, "pmt");
define_id!(AchievementId, "ach");
define_id!(LineItemId, "li");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_has_collection_prefix() {
        let id = InvoiceId::new();
        assert!(id.as_str().starts_with("inv-"));
        // "inv-" + 32 hex chars
        assert_eq!(id.as_str().len(), 36);
    }

    #[test]
    fn test_ids_are_unique() {
        let ids: std::collections::HashSet<_> = (0..1000).map(|_| BillId::new()).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn test_legacy_ids_load_verbatim() {
        let id: CustomerId = serde_json::from_str("\"cus-1700000000000\"").unwrap();
        assert_eq!(id.to_string(), "cus-1700000000000");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"cus-1700000000000\"");
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let id: AccountId = "  acc-1 ".parse().unwrap();
        assert_eq!(id, AccountId::from("acc-1"));
    }

    #[test]
    fn test_different_id_types_not_mixable() {
        // InvoiceId and BillId are distinct types; only their strings compare
        let invoice_id = InvoiceId::from_raw("x-1");
        let bill_id = BillId::from_raw("x-1");
        assert_eq!(invoice_id.as_str(), bill_id.as_str());
    }
}
