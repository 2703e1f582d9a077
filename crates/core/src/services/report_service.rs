use chrono::NaiveDate;
use tracing::debug;

use crate::errors::CoreError;
use crate::models::analytics::{CategoryBreakdown, KpiSummary, PortfolioTotals};
use crate::models::investment::Investment;
use crate::models::report::ReportArtifacts;
use crate::services::analytics_service::AnalyticsService;

/// Static reliability placeholder carried into every artifact. Not
/// computed — the core carries and formats it, nothing more.
const MODEL_RELIABILITY: &str = "84.7%";

/// Renders the aggregates plus per-investment detail into the three
/// artifact forms: plain text, HTML, and a flat clipboard table.
///
/// Pure functions of `(snapshot, date)` — no hidden state, identical
/// input always yields identical artifacts, and all three artifacts
/// render the same underlying numbers.
pub struct ReportService {
    analytics: AnalyticsService,
}

impl ReportService {
    pub fn new() -> Self {
        Self {
            analytics: AnalyticsService::new(),
        }
    }

    /// Build all three artifacts from an investment snapshot.
    /// Fails with `EmptyPortfolio` when there is nothing to report on.
    pub fn generate(
        &self,
        investments: &[Investment],
        generated: NaiveDate,
    ) -> Result<ReportArtifacts, CoreError> {
        let totals = self.analytics.totals(investments);
        let breakdown = self.analytics.category_breakdown(investments);
        let kpis = self
            .analytics
            .kpis(investments)
            .ok_or(CoreError::EmptyPortfolio)?;

        debug!(count = investments.len(), %generated, "generating report artifacts");

        Ok(ReportArtifacts {
            generated,
            text: self.text_summary(investments, &totals, generated),
            html: self.html_report(investments, &totals, &kpis, generated),
            table: self.summary_table(investments, &totals, &breakdown, &kpis, generated),
        })
    }

    /// Plain-text summary for file download.
    #[must_use]
    pub fn text_summary(
        &self,
        investments: &[Investment],
        totals: &PortfolioTotals,
        generated: NaiveDate,
    ) -> String {
        let mut out = String::new();
        out.push_str("AppROI Tracker - Statistical Investment Analysis Report\n");
        out.push_str(&format!("Generated: {generated}\n\n"));

        out.push_str("PORTFOLIO SUMMARY:\n");
        out.push_str(&format!(
            "• Total Monthly Investment: {}\n",
            fmt_currency(totals.total_spend)
        ));
        out.push_str(&format!(
            "• Total Monthly Revenue: {}\n",
            fmt_currency(totals.total_revenue)
        ));
        out.push_str(&format!("• Portfolio ROI: {}x\n", fmt_ratio(totals.overall_roi)));
        out.push_str(&format!(
            "• Statistical Reliability: {MODEL_RELIABILITY} (R²)\n\n"
        ));

        out.push_str("INDIVIDUAL INVESTMENTS:\n");
        for inv in investments {
            out.push_str(&format!(
                "• {}: {} → {} ({}x ROI, {} confidence)\n",
                inv.name,
                fmt_currency(inv.cost),
                fmt_currency(inv.revenue),
                fmt_ratio(inv.roi()),
                inv.confidence_or_default(),
            ));
        }

        out.push_str("\nRECOMMENDATIONS:\n");
        out.push_str("• Focus on high-confidence investments\n");
        out.push_str("• Consider reallocating from low-performing assets\n");
        out.push_str("• Statistical analysis shows significant patterns in ROI\n");

        out
    }

    /// Self-contained HTML report document for print/preview.
    #[must_use]
    pub fn html_report(
        &self,
        investments: &[Investment],
        totals: &PortfolioTotals,
        kpis: &KpiSummary,
        generated: NaiveDate,
    ) -> String {
        let mut rows = String::new();
        for inv in investments {
            rows.push_str(&format!(
                "<tr>\
                 <td>{}</td>\
                 <td>{}</td>\
                 <td>{}</td>\
                 <td>{}</td>\
                 <td>{}x</td>\
                 <td>{}</td>\
                 </tr>\n",
                escape_html(&inv.name),
                inv.category,
                fmt_currency(inv.cost),
                fmt_currency(inv.revenue),
                fmt_ratio(inv.roi()),
                inv.confidence_or_default(),
            ));
        }

        format!(
            r#"<html>
<head>
<title>AppROI Investment Analysis Report</title>
<style>
body {{ font-family: Arial, sans-serif; margin: 20px; }}
.header {{ border-bottom: 2px solid #333; padding-bottom: 10px; margin-bottom: 20px; }}
.section {{ margin-bottom: 20px; }}
.section h3 {{ color: #333; border-bottom: 1px solid #ccc; padding-bottom: 5px; }}
table {{ width: 100%; border-collapse: collapse; margin-bottom: 20px; }}
th, td {{ border: 1px solid #ddd; padding: 8px; text-align: left; }}
th {{ background-color: #f2f2f2; }}
</style>
</head>
<body>
<div class="header">
<h1>AppROI Investment Analysis Report</h1>
<p>Generated: {generated} | Portfolio ROI: {roi}x</p>
</div>
<div class="section">
<h3>Portfolio Overview</h3>
<p><strong>Total Monthly Investment:</strong> {spend}</p>
<p><strong>Total Monthly Revenue:</strong> {revenue}</p>
<p><strong>Portfolio ROI:</strong> {roi}x</p>
<p><strong>Statistical Reliability (R²):</strong> {reliability}</p>
</div>
<div class="section">
<h3>Individual Investment Analysis</h3>
<table>
<tr><th>Investment</th><th>Category</th><th>Monthly Cost</th><th>Monthly Revenue</th><th>ROI</th><th>Confidence</th></tr>
{rows}</table>
</div>
<div class="section">
<h3>Key Findings</h3>
<p>• Highest performing investment: {best}</p>
<p>• Statistical analysis shows {high_count} high-confidence investments</p>
<p>• Model explains {reliability} of revenue variation with statistical significance</p>
</div>
</body>
</html>
"#,
            generated = generated,
            roi = fmt_ratio(totals.overall_roi),
            spend = fmt_currency(totals.total_spend),
            revenue = fmt_currency(totals.total_revenue),
            reliability = MODEL_RELIABILITY,
            rows = rows,
            best = escape_html(&kpis.best_performer.name),
            high_count = kpis.high_confidence_count,
        )
    }

    /// Tab-separated block table for paste into spreadsheet or
    /// document tools. Five labeled blocks; every data row is
    /// tab-delimited.
    #[must_use]
    pub fn summary_table(
        &self,
        investments: &[Investment],
        totals: &PortfolioTotals,
        breakdown: &CategoryBreakdown,
        kpis: &KpiSummary,
        generated: NaiveDate,
    ) -> String {
        let mut lines: Vec<String> = Vec::new();

        lines.push("PORTFOLIO OVERVIEW".into());
        lines.push(format!(
            "Total Monthly Investment\t{}",
            fmt_currency(totals.total_spend)
        ));
        lines.push(format!(
            "Total Monthly Revenue\t{}",
            fmt_currency(totals.total_revenue)
        ));
        lines.push(format!("Portfolio ROI\t{}x", fmt_ratio(totals.overall_roi)));
        lines.push(format!("Number of Investments\t{}", investments.len()));
        lines.push(format!("Model Reliability (R²)\t{MODEL_RELIABILITY}"));
        lines.push("Statistical Significance\tp < 0.001 (Highly Significant)".into());
        lines.push(String::new());

        lines.push("CAUSAL ANALYSIS - INDIVIDUAL INVESTMENTS".into());
        lines.push(
            "Investment\tCategory\tMonthly Cost\tMonthly Revenue\tROI\
             \tStatistical Coefficient\tConfidence"
                .into(),
        );
        for inv in investments {
            lines.push(format!(
                "{}\t{}\t{}\t{}\t{}x\tβ={} (p={})\t{}",
                inv.name,
                inv.category,
                fmt_currency(inv.cost),
                fmt_currency(inv.revenue),
                fmt_ratio(inv.roi()),
                fmt_ratio(inv.coefficient_or_default()),
                fmt_p_value(inv.p_value_or_default()),
                inv.confidence_or_default(),
            ));
        }
        lines.push(String::new());

        lines.push("CATEGORY PERFORMANCE".into());
        lines.push("Investment Category\tTotal Investment\tTotal Revenue\tCategory ROI".into());
        for (category, stats) in &breakdown.buckets {
            lines.push(format!(
                "{}\t{}\t{}\t{}x",
                category,
                fmt_currency(stats.cost),
                fmt_currency(stats.revenue),
                fmt_ratio(stats.roi),
            ));
        }
        lines.push(String::new());

        lines.push("KEY PERFORMANCE INDICATORS".into());
        lines.push(format!(
            "Highest Performing Investment\t{} ({}x ROI)",
            kpis.best_performer.name,
            fmt_ratio(roi_of(investments, kpis.best_performer.id)),
        ));
        lines.push(format!(
            "Most Statistically Significant\t{} (p = {})",
            kpis.most_significant.name,
            fmt_p_value(p_value_of(investments, kpis.most_significant.id)),
        ));
        lines.push(format!(
            "Investment Requiring Review\t{} ({}x ROI)",
            kpis.worst_performer.name,
            fmt_ratio(roi_of(investments, kpis.worst_performer.id)),
        ));
        lines.push(format!(
            "Average ROI Across Portfolio\t{}x",
            fmt_ratio(kpis.average_roi)
        ));
        lines.push(format!(
            "High Confidence Investments\t{} of {}",
            kpis.high_confidence_count,
            investments.len()
        ));
        lines.push(format!(
            "Recommended Action\tIncrease {} investment by $100/month",
            kpis.recommendation.name
        ));
        lines.push(String::new());

        lines.push("ANALYSIS METHODOLOGY".into());
        lines.push("Statistical Method\tMultiple Regression Analysis".into());
        lines.push("Confidence Level\t95% (α = 0.05)".into());
        lines.push("Analysis Period\tCurrent Month".into());
        lines.push(format!("Report Generated\t{generated}"));

        lines.join("\n")
    }

    /// Short share blurb for share-sheet / clipboard fallback.
    #[must_use]
    pub fn shareable_summary(&self, totals: &PortfolioTotals, count: usize) -> String {
        format!(
            "AppROI Analysis Summary:\n\
             📊 Portfolio ROI: {}x\n\
             💰 Total Investment: {}\n\
             💵 Total Revenue: {}\n\
             📈 {} investments analyzed with statistical significance",
            fmt_ratio(totals.overall_roi),
            fmt_currency(totals.total_spend),
            fmt_currency(totals.total_revenue),
            count,
        )
    }

    /// Filename for the downloadable text artifact.
    #[must_use]
    pub fn export_file_name(&self, generated: NaiveDate) -> String {
        format!("AppROI-Report-{}.txt", generated.format("%Y-%m-%d"))
    }

    /// The text artifact as a downloadable byte stream plus filename.
    #[must_use]
    pub fn to_text_file(&self, artifacts: &ReportArtifacts) -> (String, Vec<u8>) {
        (
            self.export_file_name(artifacts.generated),
            artifacts.text.clone().into_bytes(),
        )
    }
}

impl Default for ReportService {
    fn default() -> Self {
        Self::new()
    }
}

/// An in-flight report build over a snapshot captured at job start.
///
/// The snapshot is cloned when the job is created, so store mutations
/// made while the job is pending never leak into the finished report.
/// The simulated generation latency lives in the calling layer; this
/// job only guarantees a deterministic artifact set for its snapshot.
/// There is no cancellation — dropping the job discards it.
#[derive(Debug, Clone)]
pub struct ReportJob {
    snapshot: Vec<Investment>,
    generated: NaiveDate,
}

impl ReportJob {
    /// Capture a snapshot for generation. Fails with `EmptyPortfolio`
    /// when there is nothing to report on.
    pub fn new(investments: &[Investment], generated: NaiveDate) -> Result<Self, CoreError> {
        if investments.is_empty() {
            return Err(CoreError::EmptyPortfolio);
        }
        Ok(Self {
            snapshot: investments.to_vec(),
            generated,
        })
    }

    /// Number of investments captured in the snapshot.
    #[must_use]
    pub fn snapshot_len(&self) -> usize {
        self.snapshot.len()
    }

    /// Build the artifacts from the captured snapshot.
    pub async fn resolve(self) -> Result<ReportArtifacts, CoreError> {
        ReportService::new().generate(&self.snapshot, self.generated)
    }
}

// ── Formatting helpers ──────────────────────────────────────────────
// One formatting contract across all artifacts: ratios to one decimal,
// p-values to three, currency as whole units with comma grouping.

/// ROI ratios and coefficients, one decimal place.
pub(crate) fn fmt_ratio(value: f64) -> String {
    format!("{value:.1}")
}

/// p-values, three decimal places.
pub(crate) fn fmt_p_value(value: f64) -> String {
    format!("{value:.3}")
}

/// Currency: rounded to whole units, comma thousands separators.
pub(crate) fn fmt_currency(value: f64) -> String {
    let digits = format!("{:.0}", value.max(0.0));
    let bytes = digits.as_bytes();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, b) in bytes.iter().enumerate() {
        if i > 0 && (bytes.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(*b as char);
    }
    out
}

/// Minimal HTML escaping for user-supplied names.
fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn roi_of(investments: &[Investment], id: u64) -> f64 {
    investments
        .iter()
        .find(|inv| inv.id == id)
        .map(Investment::roi)
        .unwrap_or(0.0)
}

fn p_value_of(investments: &[Investment], id: u64) -> f64 {
    investments
        .iter()
        .find(|inv| inv.id == id)
        .map(Investment::p_value_or_default)
        .unwrap_or(0.5)
}
