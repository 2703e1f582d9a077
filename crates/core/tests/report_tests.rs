// ═══════════════════════════════════════════════════════════════════
// Report Tests — artifact content, formatting contract, report task
// ═══════════════════════════════════════════════════════════════════

use chrono::NaiveDate;

use approi_tracker_core::errors::CoreError;
use approi_tracker_core::models::investment::Category;
use approi_tracker_core::models::portfolio::Portfolio;
use approi_tracker_core::models::report::{ReportArtifacts, ReportState};
use approi_tracker_core::services::report_service::{ReportJob, ReportService};
use approi_tracker_core::RoiTracker;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn sample_artifacts() -> ReportArtifacts {
    let p = Portfolio::with_sample_data();
    ReportService::new()
        .generate(&p.investments, d(2025, 6, 1))
        .unwrap()
}

// ═══════════════════════════════════════════════════════════════════
//  Generation
// ═══════════════════════════════════════════════════════════════════

mod generation {
    use super::*;

    #[test]
    fn empty_snapshot_is_rejected() {
        let result = ReportService::new().generate(&[], d(2025, 6, 1));
        assert!(matches!(result, Err(CoreError::EmptyPortfolio)));
    }

    #[test]
    fn identical_input_yields_identical_artifacts() {
        let a = sample_artifacts();
        let b = sample_artifacts();
        assert_eq!(a, b);
    }

    #[test]
    fn generated_date_is_carried() {
        let artifacts = sample_artifacts();
        assert_eq!(artifacts.generated, d(2025, 6, 1));
        assert!(artifacts.text.contains("Generated: 2025-06-01"));
        assert!(artifacts.html.contains("Generated: 2025-06-01"));
        assert!(artifacts.table.contains("Report Generated\t2025-06-01"));
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Text summary
// ═══════════════════════════════════════════════════════════════════

mod text_summary {
    use super::*;

    #[test]
    fn contains_header_and_totals() {
        let text = sample_artifacts().text;
        assert!(text.starts_with("AppROI Tracker - Statistical Investment Analysis Report"));
        assert!(text.contains("• Total Monthly Investment: 2,450"));
        assert!(text.contains("• Total Monthly Revenue: 10,900"));
        assert!(text.contains("• Portfolio ROI: 4.4x"));
    }

    #[test]
    fn contains_static_reliability_annotation() {
        let text = sample_artifacts().text;
        assert!(text.contains("Statistical Reliability: 84.7% (R²)"));
    }

    #[test]
    fn one_line_per_investment() {
        let text = sample_artifacts().text;
        assert!(text.contains(
            "• Salesforce (Human and AI Agents): 150 → 5,000 (33.3x ROI, High confidence)"
        ));
        assert!(text.contains("• Google Ads: 1,200 → 3,800 (3.2x ROI, High confidence)"));
        assert!(text.contains("• Content Marketing: 800 → 1,680 (2.1x ROI, Medium confidence)"));
        assert!(text.contains("• LinkedIn Ads: 300 → 420 (1.4x ROI, Low confidence)"));
    }

    #[test]
    fn contains_recommendations_section() {
        let text = sample_artifacts().text;
        assert!(text.contains("RECOMMENDATIONS:"));
        assert!(text.contains("• Focus on high-confidence investments"));
    }
}

// ═══════════════════════════════════════════════════════════════════
//  HTML report
// ═══════════════════════════════════════════════════════════════════

mod html_report {
    use super::*;

    #[test]
    fn is_a_self_contained_document() {
        let html = sample_artifacts().html;
        assert!(html.starts_with("<html>"));
        assert!(html.contains("<style>"));
        assert!(html.trim_end().ends_with("</html>"));
    }

    #[test]
    fn header_carries_overall_roi() {
        let html = sample_artifacts().html;
        assert!(html.contains("Portfolio ROI: 4.4x"));
    }

    #[test]
    fn table_rows_carry_investment_figures() {
        let html = sample_artifacts().html;
        assert!(html.contains("<td>Google Ads</td>"));
        assert!(html.contains("<td>Marketing</td>"));
        assert!(html.contains("<td>1,200</td>"));
        assert!(html.contains("<td>3,800</td>"));
        assert!(html.contains("<td>3.2x</td>"));
        assert!(html.contains("<td>High</td>"));
    }

    #[test]
    fn findings_name_best_performer_and_high_confidence_count() {
        let html = sample_artifacts().html;
        assert!(html
            .contains("Highest performing investment: Salesforce (Human and AI Agents)"));
        assert!(html.contains("2 high-confidence investments"));
    }

    #[test]
    fn investment_names_are_escaped() {
        let mut p = Portfolio::default();
        p.investments.push(approi_tracker_core::models::investment::Investment {
            id: 1,
            name: "<script>alert(1)</script> & Co".to_string(),
            cost: 100.0,
            revenue: 200.0,
            category: Category::SaaS,
            confidence: None,
            coefficient: None,
            p_value: None,
        });
        let artifacts = ReportService::new()
            .generate(&p.investments, d(2025, 6, 1))
            .unwrap();
        assert!(!artifacts.html.contains("<script>"));
        assert!(artifacts
            .html
            .contains("&lt;script&gt;alert(1)&lt;/script&gt; &amp; Co"));
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Flat clipboard table
// ═══════════════════════════════════════════════════════════════════

mod summary_table {
    use super::*;

    #[test]
    fn has_all_five_blocks() {
        let table = sample_artifacts().table;
        for block in [
            "PORTFOLIO OVERVIEW",
            "CAUSAL ANALYSIS - INDIVIDUAL INVESTMENTS",
            "CATEGORY PERFORMANCE",
            "KEY PERFORMANCE INDICATORS",
            "ANALYSIS METHODOLOGY",
        ] {
            assert!(table.contains(block), "missing block: {block}");
        }
    }

    #[test]
    fn overview_rows_are_tab_separated() {
        let table = sample_artifacts().table;
        assert!(table.contains("Total Monthly Investment\t2,450"));
        assert!(table.contains("Total Monthly Revenue\t10,900"));
        assert!(table.contains("Portfolio ROI\t4.4x"));
        assert!(table.contains("Number of Investments\t4"));
        assert!(table.contains("Model Reliability (R²)\t84.7%"));
    }

    #[test]
    fn causal_rows_carry_coefficient_and_p_value() {
        let table = sample_artifacts().table;
        assert!(table.contains(
            "Salesforce (Human and AI Agents)\tCRM\t150\t5,000\t33.3x\tβ=4.7 (p=0.001)\tHigh"
        ));
        assert!(table
            .contains("LinkedIn Ads\tMarketing\t300\t420\t1.4x\tβ=1.4 (p=0.150)\tLow"));
    }

    #[test]
    fn category_rows_carry_bucket_figures() {
        let table = sample_artifacts().table;
        assert!(table.contains("CRM\t150\t5,000\t33.3x"));
        assert!(table.contains("Marketing\t2,300\t5,900\t2.6x"));
    }

    #[test]
    fn kpi_rows() {
        let table = sample_artifacts().table;
        assert!(table.contains(
            "Highest Performing Investment\tSalesforce (Human and AI Agents) (33.3x ROI)"
        ));
        assert!(table.contains(
            "Most Statistically Significant\tSalesforce (Human and AI Agents) (p = 0.001)"
        ));
        assert!(table.contains("Investment Requiring Review\tLinkedIn Ads (1.4x ROI)"));
        assert!(table.contains("Average ROI Across Portfolio\t10.0x"));
        assert!(table.contains("High Confidence Investments\t2 of 4"));
        assert!(table.contains(
            "Recommended Action\tIncrease Salesforce (Human and AI Agents) investment by $100/month"
        ));
    }

    #[test]
    fn methodology_rows_are_static() {
        let table = sample_artifacts().table;
        assert!(table.contains("Statistical Method\tMultiple Regression Analysis"));
        assert!(table.contains("Confidence Level\t95% (α = 0.05)"));
        assert!(table.contains("Analysis Period\tCurrent Month"));
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Cross-format consistency
// ═══════════════════════════════════════════════════════════════════

mod consistency {
    use super::*;

    #[test]
    fn all_artifacts_render_the_same_figures() {
        let artifacts = sample_artifacts();
        for figure in ["2,450", "10,900", "4.4", "33.3", "1.4", "84.7%"] {
            assert!(artifacts.text.contains(figure), "text missing {figure}");
            assert!(artifacts.html.contains(figure), "html missing {figure}");
            assert!(artifacts.table.contains(figure), "table missing {figure}");
        }
    }

    #[test]
    fn large_currency_values_group_correctly() {
        let mut tracker = RoiTracker::new();
        tracker
            .add_investment("Big Spend", 1_234_567.0, 2_000_000.0, Category::Marketing)
            .unwrap();
        let artifacts = ReportService::new()
            .generate(tracker.investments(), d(2025, 6, 1))
            .unwrap();
        assert!(artifacts.text.contains("1,234,567"));
        assert!(artifacts.text.contains("2,000,000"));
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Export & share
// ═══════════════════════════════════════════════════════════════════

mod export {
    use super::*;

    #[test]
    fn filename_follows_iso_date_pattern() {
        let svc = ReportService::new();
        assert_eq!(
            svc.export_file_name(d(2025, 6, 1)),
            "AppROI-Report-2025-06-01.txt"
        );
    }

    #[test]
    fn text_file_bytes_match_the_text_artifact() {
        let tracker = RoiTracker::with_sample_data();
        let artifacts = sample_artifacts();
        let (filename, bytes) = tracker.export_report_as_text_file(&artifacts);
        assert_eq!(filename, "AppROI-Report-2025-06-01.txt");
        assert_eq!(bytes, artifacts.text.as_bytes());
    }

    #[test]
    fn shareable_summary_carries_totals_and_count() {
        let tracker = RoiTracker::with_sample_data();
        let blurb = tracker.shareable_summary();
        assert!(blurb.starts_with("AppROI Analysis Summary:"));
        assert!(blurb.contains("Portfolio ROI: 4.4x"));
        assert!(blurb.contains("Total Investment: 2,450"));
        assert!(blurb.contains("Total Revenue: 10,900"));
        assert!(blurb.contains("4 investments analyzed"));
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Report task & state
// ═══════════════════════════════════════════════════════════════════

mod report_task {
    use super::*;

    #[test]
    fn starting_on_empty_portfolio_fails() {
        let mut tracker = RoiTracker::new();
        let result = tracker.start_report_on(d(2025, 6, 1));
        assert!(matches!(result, Err(CoreError::EmptyPortfolio)));
        assert_eq!(*tracker.report_state(), ReportState::Idle);
    }

    #[test]
    fn state_moves_through_the_lifecycle() {
        let mut tracker = RoiTracker::with_sample_data();
        assert_eq!(*tracker.report_state(), ReportState::Idle);

        let _job = tracker.start_report_on(d(2025, 6, 1)).unwrap();
        assert!(tracker.report_state().is_generating());

        tracker.complete_report(sample_artifacts());
        assert!(tracker.report_state().is_ready());

        tracker.discard_report();
        assert_eq!(*tracker.report_state(), ReportState::Idle);
    }

    #[tokio::test]
    async fn in_flight_report_uses_the_starting_snapshot() {
        let mut tracker = RoiTracker::with_sample_data();
        let job = tracker.start_report_on(d(2025, 6, 1)).unwrap();
        assert_eq!(job.snapshot_len(), 4);

        // Mutations after the snapshot must not leak into the report.
        tracker
            .add_investment("Late Addition", 9999.0, 1.0, Category::Development)
            .unwrap();
        tracker.remove_investment(1);

        let artifacts = job.resolve().await.unwrap();
        assert!(artifacts.text.contains("Salesforce (Human and AI Agents)"));
        assert!(!artifacts.text.contains("Late Addition"));
        assert!(artifacts.table.contains("Number of Investments\t4"));
    }

    #[tokio::test]
    async fn resolved_job_matches_direct_generation() {
        let mut tracker = RoiTracker::with_sample_data();
        let job = tracker.start_report_on(d(2025, 6, 1)).unwrap();
        let artifacts = job.resolve().await.unwrap();
        assert_eq!(artifacts, sample_artifacts());
    }
}
