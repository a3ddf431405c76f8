use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AnalyticsError;

/// Outcome recorded for one inspected checklist line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ItemStatus {
    Ok,
    Issue,
    HighRisk,
    Na,
}

impl ItemStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemStatus::Ok => "OK",
            ItemStatus::Issue => "ISSUE",
            ItemStatus::HighRisk => "HIGH_RISK",
            ItemStatus::Na => "NA",
        }
    }

    /// ISSUE and HIGH_RISK both count as open problems.
    pub fn is_problem(&self) -> bool {
        matches!(self, ItemStatus::Issue | ItemStatus::HighRisk)
    }
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemStatus {
    type Err = AnalyticsError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "OK" => Ok(ItemStatus::Ok),
            "ISSUE" => Ok(ItemStatus::Issue),
            "HIGH_RISK" => Ok(ItemStatus::HighRisk),
            "NA" => Ok(ItemStatus::Na),
            _ => Err(AnalyticsError::UnknownStatus {
                value: value.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportItem {
    pub name: String,
    pub category: String,
    pub status: ItemStatus,
    #[serde(default)]
    pub remarks: Option<String>,
    pub timestamp: DateTime<Utc>,
}

/// Lifecycle of a daily submission. Variants are declared in lifecycle order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReportStatus {
    Draft,
    Submitted,
    Reviewed,
    Approved,
}

impl ReportStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportStatus::Draft => "DRAFT",
            ReportStatus::Submitted => "SUBMITTED",
            ReportStatus::Reviewed => "REVIEWED",
            ReportStatus::Approved => "APPROVED",
        }
    }

    pub fn is_consumable(&self) -> bool {
        *self >= ReportStatus::Submitted
    }
}

impl FromStr for ReportStatus {
    type Err = AnalyticsError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "DRAFT" => Ok(ReportStatus::Draft),
            "SUBMITTED" => Ok(ReportStatus::Submitted),
            "REVIEWED" => Ok(ReportStatus::Reviewed),
            "APPROVED" => Ok(ReportStatus::Approved),
            _ => Err(AnalyticsError::UnknownReportStatus {
                value: value.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyReport {
    pub id: Uuid,
    pub center_id: String,
    pub date: NaiveDate,
    pub items: Vec<ReportItem>,
    pub submitted_by: String,
    pub submitted_at: DateTime<Utc>,
    pub status: ReportStatus,
}

impl DailyReport {
    pub fn count_status(&self, status: ItemStatus) -> usize {
        self.items.iter().filter(|item| item.status == status).count()
    }

    pub fn problem_count(&self) -> usize {
        self.items.iter().filter(|item| item.status.is_problem()).count()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Center {
    pub id: String,
    pub name: String,
    pub location: String,
    pub region: String,
    #[serde(default)]
    pub capacity: Option<u32>,
    #[serde(default)]
    pub current_strength: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Trend {
    Improving,
    Declining,
    Stable,
}

impl Trend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Trend::Improving => "IMPROVING",
            Trend::Declining => "DECLINING",
            Trend::Stable => "STABLE",
        }
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordinal risk tier, lowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "LOW",
            RiskLevel::Medium => "MEDIUM",
            RiskLevel::High => "HIGH",
            RiskLevel::Critical => "CRITICAL",
        }
    }

    pub fn is_elevated(&self) -> bool {
        *self >= RiskLevel::High
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CenterPerformance {
    pub center_id: String,
    pub health_score: u8,
    pub trend: Trend,
    pub risk_level: RiskLevel,
    pub efficiency: u8,
    pub compliance: u8,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prediction {
    pub next_week_issues: u32,
    pub maintenance_needed: Vec<String>,
    pub risk_areas: Vec<String>,
    pub budget_forecast: f64,
}

/// Externally supplied reference scores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Benchmark {
    pub industry_average: u8,
    pub top_performer: u8,
    pub improvement_pct: f64,
}

impl Default for Benchmark {
    fn default() -> Self {
        Self {
            industry_average: 78,
            top_performer: 95,
            improvement_pct: 12.5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BenchmarkDelta {
    pub vs_industry: i32,
    pub vs_top_performer: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BenchmarkComparison {
    pub center_id: String,
    #[serde(flatten)]
    pub delta: BenchmarkDelta,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Analytics {
    pub center_performance: Vec<CenterPerformance>,
    pub predictions: Prediction,
    pub benchmarks: Benchmark,
}

impl Analytics {
    pub fn average_health(&self) -> Option<f64> {
        if self.center_performance.is_empty() {
            return None;
        }
        let total: u32 = self
            .center_performance
            .iter()
            .map(|entry| u32::from(entry.health_score))
            .sum();
        Some(total as f64 / self.center_performance.len() as f64)
    }

    pub fn benchmark_comparisons(&self) -> Vec<BenchmarkComparison> {
        self.center_performance
            .iter()
            .map(|entry| BenchmarkComparison {
                center_id: entry.center_id.clone(),
                delta: crate::benchmark::compare(entry.health_score, &self.benchmarks),
            })
            .collect()
    }
}
