use crate::config::StatusWeights;
use crate::models::{DailyReport, ItemStatus};

/// Score reported for a submission that inspected nothing.
pub const EMPTY_REPORT_SCORE: u8 = 100;

/// `round(numerator / denominator)` with halves rounded up.
fn rounded_div(numerator: u64, denominator: u64) -> u64 {
    (2 * numerator + denominator) / (2 * denominator)
}

fn percent(part: usize, whole: usize) -> u8 {
    if whole == 0 {
        return EMPTY_REPORT_SCORE;
    }
    rounded_div(100 * part as u64, whole as u64).min(100) as u8
}

/// Weighted share of satisfactory items, 0..=100.
pub fn health_score(report: &DailyReport, weights: &StatusWeights) -> u8 {
    if report.items.is_empty() {
        return EMPTY_REPORT_SCORE;
    }
    let points: u64 = report
        .items
        .iter()
        .map(|item| u64::from(weights.points(item.status)))
        .sum();
    rounded_div(points, report.items.len() as u64).min(100) as u8
}

/// Share of items marked OK.
pub fn efficiency(report: &DailyReport) -> u8 {
    percent(report.count_status(ItemStatus::Ok), report.items.len())
}

/// Share of critical-category items that are OK or NA.
pub fn compliance(report: &DailyReport, critical_categories: &[String]) -> u8 {
    let mut critical = 0usize;
    let mut compliant = 0usize;

    for item in report.items.iter() {
        if !critical_categories.iter().any(|category| *category == item.category) {
            continue;
        }
        critical += 1;
        if matches!(item.status, ItemStatus::Ok | ItemStatus::Na) {
            compliant += 1;
        }
    }

    percent(compliant, critical)
}
