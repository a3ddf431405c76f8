use chrono::{Duration, NaiveDate};

use crate::config::{RiskThresholds, TrendConfig};
use crate::models::{DailyReport, ItemStatus, RiskLevel, Trend};

/// `(2 * HIGH_RISK + ISSUE) / items`, zero for an empty report.
pub fn risk_ratio(report: &DailyReport) -> f64 {
    if report.items.is_empty() {
        return 0.0;
    }
    let high_risk = report.count_status(ItemStatus::HighRisk);
    let issues = report.count_status(ItemStatus::Issue);
    (2 * high_risk + issues) as f64 / report.items.len() as f64
}

pub fn risk_level(report: &DailyReport, thresholds: &RiskThresholds) -> RiskLevel {
    classify_ratio(risk_ratio(report), thresholds)
}

pub fn classify_ratio(ratio: f64, thresholds: &RiskThresholds) -> RiskLevel {
    if ratio > thresholds.critical {
        RiskLevel::Critical
    } else if ratio > thresholds.high {
        RiskLevel::High
    } else if ratio > thresholds.medium {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

pub fn trend(current: u8, previous: u8, config: &TrendConfig) -> Trend {
    let delta = i32::from(current) - i32::from(previous);
    if delta > config.band {
        Trend::Improving
    } else if delta < -config.band {
        Trend::Declining
    } else {
        Trend::Stable
    }
}

/// Baseline used when a center has no earlier report.
pub fn fallback_baseline(current: u8, config: &TrendConfig) -> u8 {
    (i32::from(current) - config.missing_history_offset).clamp(0, 100) as u8
}

/// First day of a window of `window_days` days ending on `as_of` (inclusive).
pub fn window_start(as_of: NaiveDate, window_days: i64) -> NaiveDate {
    as_of - Duration::days(window_days.max(1) - 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{day, statuses};

    fn level_of(list: &[ItemStatus]) -> RiskLevel {
        risk_level(&statuses("C1", day(2), list), &RiskThresholds::default())
    }

    #[test]
    fn tiers_follow_expected_thresholds() {
        let thresholds = RiskThresholds::default();
        assert_eq!(classify_ratio(0.0, &thresholds), RiskLevel::Low);
        assert_eq!(classify_ratio(0.1, &thresholds), RiskLevel::Low);
        assert_eq!(classify_ratio(0.11, &thresholds), RiskLevel::Medium);
        assert_eq!(classify_ratio(0.3, &thresholds), RiskLevel::Medium);
        assert_eq!(classify_ratio(0.31, &thresholds), RiskLevel::High);
        assert_eq!(classify_ratio(0.5, &thresholds), RiskLevel::High);
        assert_eq!(classify_ratio(0.51, &thresholds), RiskLevel::Critical);
        assert_eq!(classify_ratio(2.0, &thresholds), RiskLevel::Critical);
    }

    #[test]
    fn high_risk_items_count_double() {
        let report = statuses(
            "C1",
            day(2),
            &[ItemStatus::Ok, ItemStatus::Ok, ItemStatus::Issue, ItemStatus::HighRisk],
        );
        assert!((risk_ratio(&report) - 0.75).abs() < f64::EPSILON);
        assert_eq!(risk_level(&report, &RiskThresholds::default()), RiskLevel::Critical);
    }

    #[test]
    fn uniform_reports_classify_at_the_extremes() {
        assert_eq!(level_of(&[ItemStatus::Ok; 5]), RiskLevel::Low);
        assert_eq!(level_of(&[ItemStatus::HighRisk; 5]), RiskLevel::Critical);
        assert_eq!(level_of(&[]), RiskLevel::Low);
    }

    #[test]
    fn ratio_boundaries_are_exclusive() {
        let mut list = vec![ItemStatus::Ok; 9];
        list.push(ItemStatus::Issue);
        assert_eq!(level_of(&list), RiskLevel::Low);

        let mut list = vec![ItemStatus::Ok; 7];
        list.extend([ItemStatus::Issue; 3]);
        assert_eq!(level_of(&list), RiskLevel::Medium);

        let mut list = vec![ItemStatus::Ok; 2];
        list.push(ItemStatus::HighRisk);
        // 2 / 3 of the items
        assert_eq!(level_of(&list), RiskLevel::Critical);

        let list = [ItemStatus::Ok, ItemStatus::Issue];
        assert_eq!(level_of(&list), RiskLevel::High);
    }

    #[test]
    fn trend_band_is_inclusive_stable() {
        let config = TrendConfig::default();
        assert_eq!(trend(82, 75, &config), Trend::Improving);
        assert_eq!(trend(80, 75, &config), Trend::Stable);
        assert_eq!(trend(70, 75, &config), Trend::Stable);
        assert_eq!(trend(60, 75, &config), Trend::Declining);
    }

    #[test]
    fn fallback_baseline_applies_offset_within_bounds() {
        let config = TrendConfig {
            band: 5,
            missing_history_offset: 10,
        };
        assert_eq!(fallback_baseline(80, &config), 70);
        assert_eq!(fallback_baseline(4, &config), 0);
        assert_eq!(fallback_baseline(80, &TrendConfig::default()), 80);
    }

    #[test]
    fn window_start_respects_window_days() {
        assert_eq!(window_start(day(10), 7), day(4));
        assert_eq!(window_start(day(10), 1), day(10));
        assert_eq!(window_start(day(10), 0), day(10));
    }
}
