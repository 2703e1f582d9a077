use tracing::debug;

use crate::errors::CoreError;
use crate::models::investment::{Category, Confidence, Investment};
use crate::models::portfolio::Portfolio;

/// Manages the investment collection: add, remove, clear.
///
/// Pure business logic — no I/O. Investments are immutable once added;
/// an edit is a remove followed by a fresh add.
pub struct PortfolioService;

impl PortfolioService {
    pub fn new() -> Self {
        Self
    }

    /// Add a new investment to the portfolio.
    ///
    /// Rejects (with no state change) an empty or whitespace-only name,
    /// or a cost/revenue that is negative or not finite. On success
    /// assigns the next monotonic id and the creation defaults:
    /// confidence Medium, p-value 0.1, coefficient revenue/cost
    /// (omitted when cost is 0 — the ratio is undefined there).
    pub fn add_investment<'a>(
        &self,
        portfolio: &'a mut Portfolio,
        name: &str,
        cost: f64,
        revenue: f64,
        category: Category,
    ) -> Result<&'a Investment, CoreError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CoreError::ValidationError(
                "Investment name must not be empty".into(),
            ));
        }
        if !cost.is_finite() || cost < 0.0 {
            return Err(CoreError::ValidationError(format!(
                "Monthly cost must be a non-negative number, got {cost}"
            )));
        }
        if !revenue.is_finite() || revenue < 0.0 {
            return Err(CoreError::ValidationError(format!(
                "Monthly revenue must be a non-negative number, got {revenue}"
            )));
        }

        let id = portfolio.next_id.max(1);
        portfolio.next_id = id + 1;

        let coefficient = if cost > 0.0 { Some(revenue / cost) } else { None };

        let investment = Investment {
            id,
            name: name.to_string(),
            cost,
            revenue,
            category,
            confidence: Some(Confidence::Medium),
            coefficient,
            p_value: Some(0.1),
        };

        debug!(id, name, cost, revenue, %category, "adding investment");
        portfolio.investments.push(investment);
        let idx = portfolio.investments.len() - 1;
        Ok(&portfolio.investments[idx])
    }

    /// Add an investment from raw form input, parsing cost and revenue
    /// from strings. Unparseable numbers reject the add.
    pub fn add_investment_from_input<'a>(
        &self,
        portfolio: &'a mut Portfolio,
        name: &str,
        cost: &str,
        revenue: &str,
        category: Category,
    ) -> Result<&'a Investment, CoreError> {
        let cost: f64 = cost.trim().parse().map_err(|_| {
            CoreError::ValidationError(format!("Monthly cost '{cost}' is not a number"))
        })?;
        let revenue: f64 = revenue.trim().parse().map_err(|_| {
            CoreError::ValidationError(format!("Monthly revenue '{revenue}' is not a number"))
        })?;
        self.add_investment(portfolio, name, cost, revenue, category)
    }

    /// Remove the investment with the given id. Returns `true` if one
    /// was removed; an absent id is a no-op, not an error.
    pub fn remove_investment(&self, portfolio: &mut Portfolio, id: u64) -> bool {
        let before = portfolio.investments.len();
        portfolio.investments.retain(|inv| inv.id != id);
        let removed = portfolio.investments.len() < before;
        if removed {
            debug!(id, "removed investment");
        }
        removed
    }

    /// Empty the portfolio. Confirmation is the caller's concern.
    pub fn clear(&self, portfolio: &mut Portfolio) {
        debug!(count = portfolio.investments.len(), "clearing all investments");
        portfolio.investments.clear();
    }
}

impl Default for PortfolioService {
    fn default() -> Self {
        Self::new()
    }
}
