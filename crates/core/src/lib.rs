pub mod errors;
pub mod models;
pub mod services;

use chrono::NaiveDate;
use models::{
    analytics::{CategoryBreakdown, KpiSummary, PortfolioTotals},
    investment::{Category, Investment},
    portfolio::Portfolio,
    report::{ReportArtifacts, ReportState},
};
use services::{
    analytics_service::AnalyticsService, portfolio_service::PortfolioService,
    report_service::{ReportJob, ReportService},
};

use errors::CoreError;

pub use services::analytics_service::roi;

/// Main entry point for the AppROI Tracker core library.
/// Holds the investment portfolio and the services that operate on it.
///
/// All state is transient for the process lifetime; nothing is
/// persisted. Derived figures (totals, category stats, KPIs) are
/// recomputed from the current investment list on every read.
#[must_use]
pub struct RoiTracker {
    portfolio: Portfolio,
    portfolio_service: PortfolioService,
    analytics_service: AnalyticsService,
    report_service: ReportService,
    /// Lifecycle of the most recently requested report.
    report_state: ReportState,
}

impl std::fmt::Debug for RoiTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoiTracker")
            .field("investments", &self.portfolio.investments.len())
            .field("report_state", &self.report_state)
            .finish()
    }
}

impl RoiTracker {
    /// Create a tracker with an empty portfolio.
    pub fn new() -> Self {
        Self::build(Portfolio::default())
    }

    /// Create a tracker pre-seeded with the four demo investments.
    pub fn with_sample_data() -> Self {
        Self::build(Portfolio::with_sample_data())
    }

    // ── Investment Management ───────────────────────────────────────

    /// Add an investment. Rejects an empty name or a negative/non-finite
    /// cost or revenue, leaving the portfolio unchanged.
    /// Returns a copy of the stored record.
    pub fn add_investment(
        &mut self,
        name: &str,
        cost: f64,
        revenue: f64,
        category: Category,
    ) -> Result<Investment, CoreError> {
        self.portfolio_service
            .add_investment(&mut self.portfolio, name, cost, revenue, category)
            .map(Investment::clone)
    }

    /// Add an investment from raw form input, parsing cost and revenue
    /// from strings. Unparseable numbers reject the add.
    pub fn add_investment_from_input(
        &mut self,
        name: &str,
        cost: &str,
        revenue: &str,
        category: Category,
    ) -> Result<Investment, CoreError> {
        self.portfolio_service
            .add_investment_from_input(&mut self.portfolio, name, cost, revenue, category)
            .map(Investment::clone)
    }

    /// Remove an investment by id. Returns `true` if one was removed;
    /// an absent id is a no-op.
    pub fn remove_investment(&mut self, id: u64) -> bool {
        self.portfolio_service
            .remove_investment(&mut self.portfolio, id)
    }

    /// Empty the portfolio. The confirmation dialog is the calling
    /// layer's concern; this call clears unconditionally.
    pub fn clear_all(&mut self) {
        self.portfolio_service.clear(&mut self.portfolio);
    }

    /// Get a single investment by id.
    #[must_use]
    pub fn get_investment(&self, id: u64) -> Option<&Investment> {
        self.portfolio.investments.iter().find(|inv| inv.id == id)
    }

    /// All investments in insertion order.
    #[must_use]
    pub fn investments(&self) -> &[Investment] {
        &self.portfolio.investments
    }

    #[must_use]
    pub fn investment_count(&self) -> usize {
        self.portfolio.investments.len()
    }

    // ── Analytics ───────────────────────────────────────────────────

    /// Portfolio totals, recomputed from the current list.
    #[must_use]
    pub fn totals(&self) -> PortfolioTotals {
        self.analytics_service.totals(&self.portfolio.investments)
    }

    /// Per-category statistics in first-seen order.
    #[must_use]
    pub fn category_breakdown(&self) -> CategoryBreakdown {
        self.analytics_service
            .category_breakdown(&self.portfolio.investments)
    }

    /// KPI selections; `None` while the portfolio is empty.
    #[must_use]
    pub fn kpis(&self) -> Option<KpiSummary> {
        self.analytics_service.kpis(&self.portfolio.investments)
    }

    // ── Reports ─────────────────────────────────────────────────────

    /// Start a report build dated today. See [`Self::start_report_on`].
    pub fn start_report(&mut self) -> Result<ReportJob, CoreError> {
        self.start_report_on(chrono::Utc::now().date_naive())
    }

    /// Start a report build for a given date. Captures a snapshot of
    /// the current investments and moves the report state to
    /// `Generating`; mutations made while the job is pending do not
    /// affect the in-flight report. Fails with `EmptyPortfolio` when
    /// there is nothing to report on.
    pub fn start_report_on(&mut self, generated: NaiveDate) -> Result<ReportJob, CoreError> {
        let job = ReportJob::new(&self.portfolio.investments, generated)?;
        self.report_state = ReportState::Generating;
        Ok(job)
    }

    /// Store a finished report, moving the state to `Ready`.
    pub fn complete_report(&mut self, artifacts: ReportArtifacts) {
        self.report_state = ReportState::Ready(artifacts);
    }

    /// Discard any pending or finished report, back to `Idle`.
    pub fn discard_report(&mut self) {
        self.report_state = ReportState::Idle;
    }

    #[must_use]
    pub fn report_state(&self) -> &ReportState {
        &self.report_state
    }

    // ── Export / Share ──────────────────────────────────────────────

    /// The text artifact as `(filename, bytes)` for download. The
    /// filename follows `AppROI-Report-<ISO date>.txt`.
    #[must_use]
    pub fn export_report_as_text_file(&self, artifacts: &ReportArtifacts) -> (String, Vec<u8>) {
        self.report_service.to_text_file(artifacts)
    }

    /// Short text blurb for share-sheet or clipboard fallback.
    #[must_use]
    pub fn shareable_summary(&self) -> String {
        self.report_service
            .shareable_summary(&self.totals(), self.portfolio.investments.len())
    }

    /// Export all investments as a pretty-printed JSON string.
    pub fn to_json(&self) -> Result<String, CoreError> {
        serde_json::to_string_pretty(&self.portfolio.investments).map_err(CoreError::from)
    }

    /// Export all investments as a CSV string.
    /// Columns: id, name, category, cost, revenue, roi, confidence, coefficient, p_value
    #[must_use]
    pub fn export_investments_to_csv(&self) -> String {
        let mut csv =
            String::from("id,name,category,cost,revenue,roi,confidence,coefficient,p_value\n");
        for inv in &self.portfolio.investments {
            // Escape CSV: quote names containing commas, quotes, or newlines
            let escaped_name = if inv.name.contains(',')
                || inv.name.contains('"')
                || inv.name.contains('\n')
            {
                format!("\"{}\"", inv.name.replace('"', "\"\""))
            } else {
                inv.name.clone()
            };
            let coefficient = inv
                .coefficient
                .map(|c| c.to_string())
                .unwrap_or_default();
            csv.push_str(&format!(
                "{},{},{},{},{},{},{},{},{}\n",
                inv.id,
                escaped_name,
                inv.category,
                inv.cost,
                inv.revenue,
                inv.roi(),
                inv.confidence_or_default(),
                coefficient,
                inv.p_value_or_default(),
            ));
        }
        csv
    }

    // ── Internal ────────────────────────────────────────────────────

    fn build(portfolio: Portfolio) -> Self {
        Self {
            portfolio,
            portfolio_service: PortfolioService::new(),
            analytics_service: AnalyticsService::new(),
            report_service: ReportService::new(),
            report_state: ReportState::Idle,
        }
    }
}

impl Default for RoiTracker {
    fn default() -> Self {
        Self::new()
    }
}
