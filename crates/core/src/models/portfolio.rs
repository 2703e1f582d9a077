use serde::{Deserialize, Serialize};

use super::investment::{Category, Confidence, Investment};

/// The owning container for all tracked investments.
///
/// The sequence is insertion-ordered; ordering matters for display but
/// never affects aggregate arithmetic. Every derived figure (totals,
/// category stats, KPIs) is recomputed from this list on each read —
/// nothing derived is cached here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Portfolio {
    /// All tracked investments, in insertion order
    pub investments: Vec<Investment>,

    /// Next id to hand out; ids are monotonic within the process
    #[serde(default)]
    pub next_id: u64,
}

impl Portfolio {
    /// A portfolio pre-seeded with the four demo investments. The
    /// coefficients and p-values here are carried analytic constants,
    /// independent of the revenue/cost ratio.
    #[must_use]
    pub fn with_sample_data() -> Self {
        let investments = vec![
            Investment {
                id: 1,
                name: "Salesforce (Human and AI Agents)".to_string(),
                cost: 150.0,
                revenue: 5000.0,
                category: Category::Crm,
                confidence: Some(Confidence::High),
                coefficient: Some(4.7),
                p_value: Some(0.001),
            },
            Investment {
                id: 2,
                name: "Google Ads".to_string(),
                cost: 1200.0,
                revenue: 3800.0,
                category: Category::Marketing,
                confidence: Some(Confidence::High),
                coefficient: Some(3.2),
                p_value: Some(0.01),
            },
            Investment {
                id: 3,
                name: "Content Marketing".to_string(),
                cost: 800.0,
                revenue: 1680.0,
                category: Category::Marketing,
                confidence: Some(Confidence::Medium),
                coefficient: Some(2.1),
                p_value: Some(0.04),
            },
            Investment {
                id: 4,
                name: "LinkedIn Ads".to_string(),
                cost: 300.0,
                revenue: 420.0,
                category: Category::Marketing,
                confidence: Some(Confidence::Low),
                coefficient: Some(1.4),
                p_value: Some(0.15),
            },
        ];

        Self {
            next_id: 5,
            investments,
        }
    }
}
