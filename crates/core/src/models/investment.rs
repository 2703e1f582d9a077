use serde::{Deserialize, Serialize};

use crate::services::analytics_service::roi;

/// Spending category of an investment. Used to group portfolio
/// aggregates in reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// CRM & sales tooling (Salesforce, HubSpot, etc.)
    Crm,
    /// Paid and organic marketing spend
    Marketing,
    /// General SaaS tools
    SaaS,
    /// Workflow automation
    Automation,
    /// Communication tools
    Communication,
    /// Development tooling
    Development,
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Category::Crm => write!(f, "CRM"),
            Category::Marketing => write!(f, "Marketing"),
            Category::SaaS => write!(f, "SaaS"),
            Category::Automation => write!(f, "Automation"),
            Category::Communication => write!(f, "Communication"),
            Category::Development => write!(f, "Development"),
        }
    }
}

/// Categorical reliability label for an investment's figures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Confidence {
    High,
    Medium,
    Low,
}

impl std::fmt::Display for Confidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Confidence::High => write!(f, "High"),
            Confidence::Medium => write!(f, "Medium"),
            Confidence::Low => write!(f, "Low"),
        }
    }
}

/// A single tracked cost/revenue investment.
///
/// Immutable once created — edits are modeled as delete + re-add.
/// The statistical fields (`coefficient`, `p_value`) are carried values,
/// not computed from real data: seeded records hold analytic constants,
/// user-added records get derived defaults at creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Investment {
    /// Unique within the owning portfolio, assigned by the store
    pub id: u64,

    /// Non-empty display label
    pub name: String,

    /// Monthly cost, always >= 0
    pub cost: f64,

    /// Monthly revenue, always >= 0
    pub revenue: f64,

    /// Grouping category
    pub category: Category,

    /// Reliability label; absent records read as Low downstream
    #[serde(default)]
    pub confidence: Option<Confidence>,

    /// Assumed revenue generated per dollar spent (β). Undefined when
    /// the investment was created with zero cost.
    #[serde(default)]
    pub coefficient: Option<f64>,

    /// Statistical-significance placeholder in [0, 1]
    #[serde(default)]
    pub p_value: Option<f64>,
}

impl Investment {
    /// ROI ratio for this investment (0 when cost is 0).
    #[must_use]
    pub fn roi(&self) -> f64 {
        roi(self.cost, self.revenue)
    }

    // ── Default resolution ──────────────────────────────────────────
    // Absent optional fields resolve in exactly one place, so every
    // report and aggregate sees the same fallback values.

    /// Confidence for display and counting; absent reads as Low.
    #[must_use]
    pub fn confidence_or_default(&self) -> Confidence {
        self.confidence.unwrap_or(Confidence::Low)
    }

    /// p-value for display; absent reads as 0.5.
    #[must_use]
    pub fn p_value_or_default(&self) -> f64 {
        self.p_value.unwrap_or(0.5)
    }

    /// p-value for the most-significant comparison only; absent reads
    /// as 1.0 so a record without one never wins.
    #[must_use]
    pub fn significance_p_value(&self) -> f64 {
        self.p_value.unwrap_or(1.0)
    }

    /// Coefficient for display; absent reads as 1.0.
    #[must_use]
    pub fn coefficient_or_default(&self) -> f64 {
        self.coefficient.unwrap_or(1.0)
    }

    /// Coefficient for the recommendation fold; absent reads as 0.0.
    #[must_use]
    pub fn coefficient_or_zero(&self) -> f64 {
        self.coefficient.unwrap_or(0.0)
    }
}
