use std::fmt;

use serde::{Deserialize, Serialize};

/// Urgency attached to a routing decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    #[default]
    Low,
    Medium,
    High,
}

impl Priority {
    /// Map a score onto a priority using strict lower bounds:
    /// `score > high` is `High`, `score > medium` is `Medium`, anything else is `Low`.
    pub fn from_score(score: f64, medium: f64, high: f64) -> Self {
        if score > high { Priority::High }
        else if score > medium { Priority::Medium }
        else { Priority::Low }
    }

    pub fn to_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_str())
    }
}
