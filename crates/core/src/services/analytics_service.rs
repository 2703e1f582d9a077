use crate::models::analytics::{
    CategoryBreakdown, CategoryStats, KpiSelection, KpiSummary, PortfolioTotals,
};
use crate::models::investment::{Confidence, Investment};

/// ROI ratio for a cost/revenue pair. Total — a zero cost yields 0
/// rather than dividing. Used uniformly for per-investment,
/// per-category, and portfolio-level ratios.
#[must_use]
pub fn roi(cost: f64, revenue: f64) -> f64 {
    if cost > 0.0 {
        revenue / cost
    } else {
        0.0
    }
}

/// Derives portfolio totals, per-category statistics, and KPI
/// selections from the current investment list.
///
/// Pure computation over a slice — every call recomputes from scratch,
/// so the output is always a function of the list it was given.
pub struct AnalyticsService;

impl AnalyticsService {
    pub fn new() -> Self {
        Self
    }

    /// Portfolio-level spend, revenue, and overall ROI.
    #[must_use]
    pub fn totals(&self, investments: &[Investment]) -> PortfolioTotals {
        let total_spend: f64 = investments.iter().map(|inv| inv.cost).sum();
        let total_revenue: f64 = investments.iter().map(|inv| inv.revenue).sum();

        PortfolioTotals {
            total_spend,
            total_revenue,
            overall_roi: roi(total_spend, total_revenue),
        }
    }

    /// Per-category accumulation in a single pass. Buckets appear in
    /// the order their category is first seen in the list.
    #[must_use]
    pub fn category_breakdown(&self, investments: &[Investment]) -> CategoryBreakdown {
        let mut breakdown = CategoryBreakdown::default();

        for inv in investments {
            match breakdown
                .buckets
                .iter_mut()
                .find(|(c, _)| *c == inv.category)
            {
                Some((_, stats)) => {
                    stats.cost += inv.cost;
                    stats.revenue += inv.revenue;
                    stats.count += 1;
                }
                None => breakdown.buckets.push((
                    inv.category,
                    CategoryStats {
                        cost: inv.cost,
                        revenue: inv.revenue,
                        count: 1,
                        roi: 0.0,
                    },
                )),
            }
        }

        for (_, stats) in &mut breakdown.buckets {
            stats.roi = roi(stats.cost, stats.revenue);
        }

        breakdown
    }

    /// KPI selections scanned from the list. Returns `None` on an empty
    /// list — there is nothing to select from.
    ///
    /// Every slot is a left-fold with a strict comparison, so ties
    /// resolve to the first-encountered investment.
    #[must_use]
    pub fn kpis(&self, investments: &[Investment]) -> Option<KpiSummary> {
        let (first, rest) = investments.split_first()?;

        let mut best = first;
        let mut worst = first;
        let mut most_significant = first;
        // Seeded with the first investment and only replaced on the
        // compound condition. When no candidate ever satisfies it, the
        // seed comes back even if the seed itself fails the condition.
        let mut recommendation = first;

        for inv in rest {
            if inv.roi() > best.roi() {
                best = inv;
            }
            if inv.roi() < worst.roi() {
                worst = inv;
            }
            if inv.significance_p_value() < most_significant.significance_p_value() {
                most_significant = inv;
            }
            if inv.coefficient_or_zero() > recommendation.coefficient_or_zero()
                && inv.significance_p_value() < 0.05
            {
                recommendation = inv;
            }
        }

        let high_confidence_count = investments
            .iter()
            .filter(|inv| inv.confidence_or_default() == Confidence::High)
            .count();

        let roi_sum: f64 = investments.iter().map(Investment::roi).sum();
        let average_roi = roi_sum / investments.len() as f64;

        Some(KpiSummary {
            best_performer: select(best),
            worst_performer: select(worst),
            most_significant: select(most_significant),
            recommendation: select(recommendation),
            high_confidence_count,
            average_roi,
        })
    }
}

fn select(inv: &Investment) -> KpiSelection {
    KpiSelection {
        id: inv.id,
        name: inv.name.clone(),
    }
}

impl Default for AnalyticsService {
    fn default() -> Self {
        Self::new()
    }
}
