//! Short-term forecast over a window of recent reports.
//!
//! `nextWeekIssues` applies a flat growth heuristic to the mean problem count
//! per report; it is not a fitted model. Ordering of `maintenanceNeeded` and
//! the tie-break in `riskAreas` follow the order reports are supplied in.

use std::collections::{HashMap, HashSet};

use crate::config::{CostModel, PredictionConfig};
use crate::models::{DailyReport, Prediction};

/// `ceil(total * (100 + growth_pct) / (reports * 100))` in integers.
pub fn next_week_issues(total_problems: usize, reports: usize, growth_pct: u32) -> u32 {
    if reports == 0 {
        return 0;
    }
    let numerator = total_problems as u64 * (100 + u64::from(growth_pct));
    let denominator = reports as u64 * 100;
    u32::try_from(numerator.div_ceil(denominator)).unwrap_or(u32::MAX)
}

pub fn maintenance_needed(recent: &[&DailyReport], config: &PredictionConfig) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut names = Vec::new();

    for item in recent.iter().flat_map(|report| report.items.iter()) {
        if names.len() == config.max_maintenance_items {
            break;
        }
        if item.category != config.maintenance_category || !item.status.is_problem() {
            continue;
        }
        if seen.insert(item.name.as_str()) {
            names.push(item.name.clone());
        }
    }

    names
}

pub fn risk_areas(recent: &[&DailyReport], limit: usize) -> Vec<String> {
    let mut tally: HashMap<&str, (usize, usize)> = HashMap::new();

    for item in recent.iter().flat_map(|report| report.items.iter()) {
        if !item.status.is_problem() {
            continue;
        }
        let first_seen = tally.len();
        let entry = tally.entry(item.category.as_str()).or_insert((0, first_seen));
        entry.0 += 1;
    }

    let mut ranked: Vec<(&str, (usize, usize))> = tally.into_iter().collect();
    ranked.sort_by(|a, b| b.1 .0.cmp(&a.1 .0).then(a.1 .1.cmp(&b.1 .1)));
    ranked
        .into_iter()
        .take(limit)
        .map(|(category, _)| category.to_string())
        .collect()
}

pub fn predict(recent: &[&DailyReport], config: &PredictionConfig, cost: &CostModel) -> Prediction {
    let total_problems: usize = recent.iter().map(|report| report.problem_count()).sum();
    let next_week_issues = next_week_issues(total_problems, recent.len(), config.growth_pct);

    Prediction {
        next_week_issues,
        maintenance_needed: maintenance_needed(recent, config),
        risk_areas: risk_areas(recent, config.max_risk_areas),
        budget_forecast: cost.forecast(next_week_issues),
    }
}
