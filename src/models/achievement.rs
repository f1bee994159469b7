//! Achievements (gamified milestones)
//!
//! The unlocked flag is computed by callers; the ledger only stores it.

use serde::{Deserialize, Serialize};

use super::ids::{AchievementId, RecordId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Achievement {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub unlocked: bool,
}

impl Achievement {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            unlocked: false,
        }
    }

    /// Built-in achievement definitions with their fixed ids
    pub fn defaults() -> Vec<(AchievementId, Achievement)> {
        [
            ("a1", "First Earning", "Receive your first payment."),
            ("a2", "Profitability Pro", "Achieve a net positive month."),
            ("a3", "$10k Revenue", "Reach $10,000 in total revenue."),
            ("a4", "Budget Master", "Stay under budget for all categories in a month."),
            ("a5", "Customer Magnet", "Onboard 5 customers."),
            ("a6", "Runway Rockstar", "Maintain a runway of over 90 days."),
        ]
        .into_iter()
        .map(|(id, title, description)| {
            (AchievementId::from_raw(id), Achievement::new(title, description))
        })
        .collect()
    }
}
