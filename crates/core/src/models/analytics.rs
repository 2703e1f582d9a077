use serde::{Deserialize, Serialize};

use super::investment::Category;

/// Portfolio-level totals at the moment of computation.
///
/// Ephemeral — recomputed from the current investment list on every
/// read, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PortfolioTotals {
    /// Sum of monthly costs across all investments
    pub total_spend: f64,

    /// Sum of monthly revenues across all investments
    pub total_revenue: f64,

    /// total_revenue / total_spend, or 0 when nothing is spent
    pub overall_roi: f64,
}

/// Accumulated figures for one category bucket.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategoryStats {
    /// Total monthly cost in this category
    pub cost: f64,

    /// Total monthly revenue in this category
    pub revenue: f64,

    /// Number of investments in this category
    pub count: usize,

    /// revenue / cost for the bucket, or 0 when cost is 0
    pub roi: f64,
}

/// Per-category breakdown in first-seen order.
///
/// Category totals partition the portfolio exactly: summing `cost`
/// across all buckets reproduces the portfolio's total spend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryBreakdown {
    pub buckets: Vec<(Category, CategoryStats)>,
}

impl CategoryBreakdown {
    /// Look up a bucket by category.
    #[must_use]
    pub fn get(&self, category: Category) -> Option<&CategoryStats> {
        self.buckets
            .iter()
            .find(|(c, _)| *c == category)
            .map(|(_, stats)| stats)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.buckets.len()
    }
}

/// Reference to a selected investment in a KPI slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiSelection {
    pub id: u64,
    pub name: String,
}

/// Key performance indicators scanned from a non-empty investment list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiSummary {
    /// Investment with the highest ROI (first wins on ties)
    pub best_performer: KpiSelection,

    /// Investment with the lowest ROI (first wins on ties)
    pub worst_performer: KpiSelection,

    /// Investment with the lowest p-value (absent reads as 1.0)
    pub most_significant: KpiSelection,

    /// Recommendation target. Folded from the first investment; only a
    /// candidate with a strictly higher coefficient AND p < 0.05
    /// replaces it, so the first investment comes back unchanged when
    /// nothing qualifies.
    pub recommendation: KpiSelection,

    /// Number of investments whose confidence resolves to High
    pub high_confidence_count: usize,

    /// Mean per-investment ROI across the portfolio
    pub average_roi: f64,
}
