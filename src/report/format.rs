//! Formatted text output for an analysis report.
//!
//! We keep formatting code in one place so:
//! - the math/fitting code stays clean and testable
//! - output changes are localized (important for snapshot-style tests)
//!
//! The structured `AnalysisReport` remains the contract with the presentation
//! layer; this is a diagnostics convenience.

use crate::domain::{AnalysisReport, AnalysisStatus, BinValidity, Insight, MetricAnalysis};

/// Render the full report: top insights, per-metric groups, diagnostics.
pub fn format_report(report: &AnalysisReport) -> String {
    let mut out = String::new();

    out.push_str("=== Sleep insights ===\n");
    out.push_str(&format!("Top associations (n={}):\n", report.top.len()));
    for (rank, insight) in report.top.iter().enumerate() {
        out.push_str(&format!("{:>2}. {}\n", rank + 1, format_insight(insight)));
    }

    for group in &report.groups {
        out.push_str(&format!("\n## {}\n", group.metric));
        for insight in &group.headline {
            out.push_str(&format!("* {}\n", format_insight(insight)));
        }
        for insight in &group.additional {
            out.push_str(&format!("  {}\n", format_insight(insight)));
        }
    }

    out.push_str("\nDiagnostics:\n");
    for metric in &report.metrics {
        out.push_str(&format_metric_status(metric));
    }

    out
}

fn format_insight(insight: &Insight) -> String {
    let mut line = format!(
        "{} -> {}: impact {:+.1}% of range, p={:.4} ({}), n={}",
        insight.predictor,
        insight.metric,
        insight.impact_pct,
        insight.p_value,
        insight.confidence.display_name(),
        insight.sample_size,
    );
    if let Some(bins) = &insight.bins {
        if bins.validity == BinValidity::Valid {
            let buckets: Vec<String> = bins
                .bins
                .iter()
                .map(|b| format!("{} avg {:.1} (n={})", b.label, b.average_dependent, b.sample_count))
                .collect();
            line.push_str(&format!(
                " | baseline {:.1} | {}",
                bins.baseline,
                buckets.join("; ")
            ));
        }
    }
    line
}

fn format_metric_status(metric: &MetricAnalysis) -> String {
    let status = match &metric.status {
        AnalysisStatus::Complete => format!(
            "complete ({} coefficients, {} bin analyses)",
            metric.regression.len(),
            metric.bins.len()
        ),
        AnalysisStatus::InsufficientData { current, required } => {
            format!("insufficient data ({current}/{required} days)")
        }
        AnalysisStatus::Degenerate(reason) => format!("degenerate fit: {reason}"),
    };
    format!("- {} [n={}]: {}\n", metric.metric, metric.sample_size, status)
}
