use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::config::EngineConfig;
use crate::models::{
    Analytics, Benchmark, Center, CenterPerformance, DailyReport, RiskLevel, Trend,
};
use crate::prediction;
use crate::repository::ReportRepository;
use crate::risk;
use crate::score;

/// Health reported for a center that submitted nothing. Distinct from
/// [`score::EMPTY_REPORT_SCORE`], which covers a submission with no items.
pub const NO_REPORT_SCORE: u8 = 0;

/// Per-report metrics before a trend baseline is attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportMetrics {
    pub health_score: u8,
    pub efficiency: u8,
    pub compliance: u8,
    pub risk_level: RiskLevel,
}

/// Current (non-superseded, consumable) reports keyed by center then date.
#[derive(Debug, Default)]
pub struct ReportIndex<'a> {
    by_center: BTreeMap<&'a str, BTreeMap<NaiveDate, &'a DailyReport>>,
}

impl<'a> ReportIndex<'a> {
    pub fn build(reports: &'a [DailyReport]) -> Self {
        let mut by_center: BTreeMap<&'a str, BTreeMap<NaiveDate, &'a DailyReport>> =
            BTreeMap::new();

        for report in reports.iter() {
            if !report.status.is_consumable() {
                continue;
            }
            let days = by_center.entry(report.center_id.as_str()).or_default();
            let replace = days
                .get(&report.date)
                .map_or(true, |existing| supersedes(report, existing));
            if replace {
                days.insert(report.date, report);
            }
        }

        Self { by_center }
    }

    /// The center's report on the latest date it has one.
    pub fn current(&self, center_id: &str) -> Option<&'a DailyReport> {
        self.by_center
            .get(center_id)
            .and_then(|days| days.values().next_back().copied())
    }

    /// The center's report on the most recent date before `date`.
    pub fn previous(&self, center_id: &str, date: NaiveDate) -> Option<&'a DailyReport> {
        self.by_center
            .get(center_id)
            .and_then(|days| days.range(..date).next_back().map(|(_, report)| *report))
    }

    pub fn latest_date(&self) -> Option<NaiveDate> {
        self.by_center
            .values()
            .filter_map(|days| days.keys().next_back().copied())
            .max()
    }

    pub fn reports(&self) -> impl Iterator<Item = &'a DailyReport> + '_ {
        self.by_center.values().flat_map(|days| days.values().copied())
    }
}

fn supersedes(candidate: &DailyReport, existing: &DailyReport) -> bool {
    (candidate.submitted_at, candidate.id) > (existing.submitted_at, existing.id)
}

pub struct AnalyticsAggregator {
    config: EngineConfig,
}

impl AnalyticsAggregator {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn evaluate(&self, report: &DailyReport) -> ReportMetrics {
        ReportMetrics {
            health_score: score::health_score(report, &self.config.weights),
            efficiency: score::efficiency(report),
            compliance: score::compliance(report, &self.config.compliance.critical_categories),
            risk_level: risk::risk_level(report, &self.config.risk),
        }
    }

    fn center_performance(&self, center: &Center, index: &ReportIndex<'_>) -> CenterPerformance {
        let Some(current) = index.current(&center.id) else {
            debug!(center = %center.id, "no submitted report, applying defaults");
            return CenterPerformance {
                center_id: center.id.clone(),
                health_score: NO_REPORT_SCORE,
                trend: Trend::Stable,
                risk_level: RiskLevel::Low,
                efficiency: 0,
                compliance: 0,
            };
        };

        let metrics = self.evaluate(current);
        let baseline = match index.previous(&center.id, current.date) {
            Some(previous) => score::health_score(previous, &self.config.weights),
            None => risk::fallback_baseline(metrics.health_score, &self.config.trend),
        };
        let trend = risk::trend(metrics.health_score, baseline, &self.config.trend);

        debug!(
            center = %center.id,
            date = %current.date,
            health = metrics.health_score,
            baseline,
            risk = %metrics.risk_level,
            "scored center"
        );

        CenterPerformance {
            center_id: center.id.clone(),
            health_score: metrics.health_score,
            trend,
            risk_level: metrics.risk_level,
            efficiency: metrics.efficiency,
            compliance: metrics.compliance,
        }
    }

    /// Reports inside the prediction window, oldest first, then in directory order.
    pub fn recent_window<'a>(
        &self,
        centers: &[Center],
        index: &ReportIndex<'a>,
    ) -> Vec<&'a DailyReport> {
        let Some(latest) = index.latest_date() else {
            return Vec::new();
        };
        let start = risk::window_start(latest, self.config.prediction.window_days);
        let position: HashMap<&str, usize> = centers
            .iter()
            .enumerate()
            .map(|(idx, center)| (center.id.as_str(), idx))
            .collect();

        let mut recent: Vec<(&'a DailyReport, usize)> = index
            .reports()
            .filter(|report| report.date >= start)
            .filter_map(|report| {
                position
                    .get(report.center_id.as_str())
                    .map(|idx| (report, *idx))
            })
            .collect();
        recent.sort_by(|a, b| a.0.date.cmp(&b.0.date).then(a.1.cmp(&b.1)));
        recent.into_iter().map(|(report, _)| report).collect()
    }

    pub fn aggregate(
        &self,
        centers: &[Center],
        reports: &[DailyReport],
        benchmark: &Benchmark,
    ) -> Analytics {
        let index = ReportIndex::build(reports);

        let center_performance: Vec<CenterPerformance> = centers
            .iter()
            .map(|center| self.center_performance(center, &index))
            .collect();

        let recent = self.recent_window(centers, &index);
        let predictions =
            prediction::predict(&recent, &self.config.prediction, &self.config.cost);

        info!(
            centers = centers.len(),
            reports = reports.len(),
            window = recent.len(),
            next_week_issues = predictions.next_week_issues,
            "aggregated campus analytics"
        );

        Analytics {
            center_performance,
            predictions,
            benchmarks: benchmark.clone(),
        }
    }

    /// Reads the directory and the window ending on `as_of`, then aggregates
    /// against the configured benchmark.
    pub fn aggregate_from<R: ReportRepository + ?Sized>(
        &self,
        repository: &R,
        as_of: NaiveDate,
    ) -> Analytics {
        let centers = repository.list_centers();
        let from = risk::window_start(as_of, self.config.prediction.window_days);
        let reports = repository.list_reports_between(from, as_of);
        debug!(%from, %as_of, reports = reports.len(), "loaded reports from repository");
        self.aggregate(&centers, &reports, &self.config.benchmark)
    }
}

impl Default for AnalyticsAggregator {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}
