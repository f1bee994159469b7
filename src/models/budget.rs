//! Budget category model
//!
//! Budgets are keyed by category name rather than a surrogate id. The
//! `spent` figure is aggregated from transactions by the read layer.

use serde::{Deserialize, Serialize};

use super::money::Money;

/// Category every orphaned transaction falls back to
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Monthly budget for a single category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    /// Category name (unique, case-insensitive)
    pub category: String,

    /// Monthly ceiling
    pub budget: Money,

    /// Amount spent, as last aggregated
    #[serde(default)]
    pub spent: Money,
}

impl Budget {
    pub fn new(category: impl Into<String>, budget: Money) -> Self {
        Self {
            category: category.into(),
            budget,
            spent: Money::zero(),
        }
    }

    /// Whether this budget is keyed by the given name (case-insensitive)
    pub fn matches(&self, name: &str) -> bool {
        self.category.eq_ignore_ascii_case(name.trim())
    }

    /// Default categories shipped with a fresh ledger
    pub fn defaults() -> Vec<Budget> {
        vec![
            Budget::new("Software", Money::from_dollars(500)),
            Budget::new("Marketing", Money::from_dollars(1000)),
            Budget::new("Freelancers", Money::from_dollars(2000)),
            Budget::new(UNCATEGORIZED, Money::zero()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_include_uncategorized() {
        let defaults = Budget::defaults();
        assert_eq!(defaults.len(), 4);
        assert!(defaults.iter().any(|b| b.category == UNCATEGORIZED));
        assert!(defaults.iter().all(|b| b.spent.is_zero()));
    }

    #[test]
    fn test_matches_is_case_insensitive() {
        let budget = Budget::new("Marketing", Money::from_dollars(10));
        assert!(budget.matches("marketing"));
        assert!(budget.matches(" MARKETING "));
        assert!(!budget.matches("Market"));
    }
}
