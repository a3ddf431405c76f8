use std::collections::HashMap;
use std::fmt::Write;

use chrono::NaiveDate;

use crate::aggregate::ReportIndex;
use crate::insights;
use crate::models::{Analytics, CenterPerformance, DailyReport};

#[derive(Debug, Clone, PartialEq)]
pub struct CategorySummary {
    pub category: String,
    pub items: usize,
    pub problems: usize,
}

impl CategorySummary {
    pub fn problem_share(&self) -> f64 {
        if self.items == 0 {
            0.0
        } else {
            self.problems as f64 * 100.0 / self.items as f64
        }
    }
}

/// Item and problem counts per category over current, consumable reports.
pub fn summarize_by_category(reports: &[DailyReport]) -> Vec<CategorySummary> {
    let index = ReportIndex::build(reports);
    let mut map: HashMap<&str, (usize, usize)> = HashMap::new();

    for item in index.reports().flat_map(|report| report.items.iter()) {
        let entry = map.entry(item.category.as_str()).or_insert((0, 0));
        entry.0 += 1;
        if item.status.is_problem() {
            entry.1 += 1;
        }
    }

    let mut summaries: Vec<CategorySummary> = map
        .into_iter()
        .map(|(category, (items, problems))| CategorySummary {
            category: category.to_string(),
            items,
            problems,
        })
        .collect();

    summaries.sort_by(|a, b| {
        b.problems
            .cmp(&a.problems)
            .then_with(|| a.category.cmp(&b.category))
    });
    summaries
}

/// Centers by health score, best first; ties keep center id order.
pub fn rank_centers(analytics: &Analytics) -> Vec<&CenterPerformance> {
    let mut ranked: Vec<&CenterPerformance> = analytics.center_performance.iter().collect();
    ranked.sort_by(|a, b| {
        b.health_score
            .cmp(&a.health_score)
            .then_with(|| a.center_id.cmp(&b.center_id))
    });
    ranked
}

pub fn build_report(analytics: &Analytics, reports: &[DailyReport], as_of: NaiveDate) -> String {
    let summaries = summarize_by_category(reports);
    let ranked = rank_centers(analytics);
    let insights = insights::generate_insights(analytics);

    let mut output = String::new();

    let _ = writeln!(output, "# Campus Health Report");
    let _ = writeln!(
        output,
        "Generated for {} centers (reports up to {})",
        analytics.center_performance.len(),
        as_of
    );
    let _ = writeln!(output);
    let _ = writeln!(output, "## Category Issue Mix");

    if summaries.is_empty() {
        let _ = writeln!(output, "No inspected items recorded for this window.");
    } else {
        for summary in summaries.iter() {
            let _ = writeln!(
                output,
                "- {}: {} open of {} items ({:.1}%)",
                summary.category,
                summary.problems,
                summary.items,
                summary.problem_share()
            );
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Center Ranking");

    if ranked.is_empty() {
        let _ = writeln!(output, "No centers in the directory.");
    } else {
        for entry in ranked.iter() {
            let _ = writeln!(
                output,
                "- {}: health {} ({}, {} risk), efficiency {}, compliance {}",
                entry.center_id,
                entry.health_score,
                entry.trend,
                entry.risk_level,
                entry.efficiency,
                entry.compliance
            );
        }
    }

    let benchmarks = &analytics.benchmarks;
    let _ = writeln!(output);
    let _ = writeln!(output, "## Benchmarks");
    let _ = writeln!(
        output,
        "Industry average {}, top performer {}, target improvement {:.1}%",
        benchmarks.industry_average, benchmarks.top_performer, benchmarks.improvement_pct
    );
    for comparison in analytics.benchmark_comparisons().iter() {
        let _ = writeln!(
            output,
            "- {}: {:+} vs industry, {:+} vs top performer",
            comparison.center_id, comparison.delta.vs_industry, comparison.delta.vs_top_performer
        );
    }

    let predictions = &analytics.predictions;
    let _ = writeln!(output);
    let _ = writeln!(output, "## Forecast");
    let _ = writeln!(
        output,
        "Expected issues next week: {} (budget estimate {:.2})",
        predictions.next_week_issues, predictions.budget_forecast
    );
    if predictions.maintenance_needed.is_empty() {
        let _ = writeln!(output, "No infrastructure maintenance flagged.");
    } else {
        let _ = writeln!(
            output,
            "Maintenance needed: {}",
            predictions.maintenance_needed.join(", ")
        );
    }
    if !predictions.risk_areas.is_empty() {
        let _ = writeln!(output, "Risk areas: {}", predictions.risk_areas.join(", "));
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Insights");

    if insights.is_empty() {
        let _ = writeln!(output, "No insights available.");
    } else {
        for line in insights.iter() {
            let _ = writeln!(output, "- {}", line);
        }
    }

    output
}
