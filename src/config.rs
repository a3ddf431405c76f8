use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::models::{Benchmark, ItemStatus};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineConfig {
    #[serde(default)]
    pub weights: StatusWeights,
    #[serde(default)]
    pub compliance: ComplianceConfig,
    #[serde(default)]
    pub risk: RiskThresholds,
    #[serde(default)]
    pub trend: TrendConfig,
    #[serde(default)]
    pub prediction: PredictionConfig,
    #[serde(default)]
    pub cost: CostModel,
    #[serde(default)]
    pub benchmark: Benchmark,
    #[serde(default)]
    pub cache: CacheConfig,
}

/// Health weights in points out of 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusWeights {
    pub ok: u32,
    pub issue: u32,
    pub high_risk: u32,
    pub na: u32,
}

impl StatusWeights {
    pub fn points(&self, status: ItemStatus) -> u32 {
        match status {
            ItemStatus::Ok => self.ok,
            ItemStatus::Issue => self.issue,
            ItemStatus::HighRisk => self.high_risk,
            ItemStatus::Na => self.na,
        }
    }
}

impl Default for StatusWeights {
    fn default() -> Self {
        Self {
            ok: 100,
            issue: 70,
            high_risk: 30,
            na: 90,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceConfig {
    pub critical_categories: Vec<String>,
}

impl Default for ComplianceConfig {
    fn default() -> Self {
        Self {
            critical_categories: vec![
                "Hygiene & Cleanliness".to_string(),
                "Infrastructure".to_string(),
            ],
        }
    }
}

/// Lower bounds (exclusive) of each risk tier's ratio.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskThresholds {
    pub medium: f64,
    pub high: f64,
    pub critical: f64,
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self {
            medium: 0.1,
            high: 0.3,
            critical: 0.5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendConfig {
    /// Deltas strictly beyond this band change the trend.
    pub band: i32,
    /// Subtracted from the current score when a center has no earlier report.
    pub missing_history_offset: i32,
}

impl Default for TrendConfig {
    fn default() -> Self {
        Self {
            band: 5,
            missing_history_offset: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionConfig {
    pub window_days: i64,
    pub growth_pct: u32,
    pub maintenance_category: String,
    pub max_maintenance_items: usize,
    pub max_risk_areas: usize,
}

impl Default for PredictionConfig {
    fn default() -> Self {
        Self {
            window_days: 7,
            growth_pct: 10,
            maintenance_category: "Infrastructure".to_string(),
            max_maintenance_items: 5,
            max_risk_areas: 3,
        }
    }
}

/// Linear cost model behind `budgetForecast`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostModel {
    pub base: f64,
    pub per_issue: f64,
}

impl CostModel {
    pub fn forecast(&self, next_week_issues: u32) -> f64 {
        self.base + self.per_issue * f64::from(next_week_issues)
    }
}

impl Default for CostModel {
    fn default() -> Self {
        Self {
            base: 0.0,
            per_issue: 2500.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheConfig {
    /// Upper bound on memoized aggregation results.
    pub max_entries: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { max_entries: 64 }
    }
}

impl EngineConfig {
    /// Loads a TOML config, falling back to defaults when the file is absent.
    pub fn load_from_path(path: &Path) -> anyhow::Result<Self> {
        debug!("Loading engine configuration from {:?}", path);

        if !path.exists() {
            warn!("Configuration file not found at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        let config = Self::from_toml(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;

        info!("Loaded engine configuration from {:?}", path);
        Ok(config)
    }

    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        let config: EngineConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        let risk = &self.risk;
        if !(risk.medium <= risk.high && risk.high <= risk.critical) {
            anyhow::bail!(
                "risk thresholds must be ascending (medium {}, high {}, critical {})",
                risk.medium,
                risk.high,
                risk.critical
            );
        }
        if self.trend.band < 0 {
            anyhow::bail!("trend band must not be negative, got {}", self.trend.band);
        }
        if self.prediction.window_days < 1 {
            anyhow::bail!(
                "prediction window must cover at least one day, got {}",
                self.prediction.window_days
            );
        }
        if self.cache.max_entries == 0 {
            anyhow::bail!("cache must hold at least one entry");
        }
        let weights = [
            self.weights.ok,
            self.weights.issue,
            self.weights.high_risk,
            self.weights.na,
        ];
        if weights.iter().any(|points| *points > 100) {
            anyhow::bail!("status weights are points out of 100, got {:?}", weights);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_yields_defaults() {
        let config = EngineConfig::from_toml("").unwrap();
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.weights.points(ItemStatus::Na), 90);
        assert_eq!(config.prediction.window_days, 7);
    }

    #[test]
    fn partial_sections_override_fields() {
        let config = EngineConfig::from_toml(
            r#"
            [cost]
            base = 1000.0
            perIssue = 300.0

            [benchmark]
            industryAverage = 70
            topPerformer = 98
            improvementPct = 4.0
            "#,
        )
        .unwrap();
        assert_eq!(config.cost.forecast(2), 1600.0);
        assert_eq!(config.benchmark.top_performer, 98);
        assert_eq!(config.trend, TrendConfig::default());
    }

    #[test]
    fn descending_thresholds_are_rejected() {
        let result = EngineConfig::from_toml(
            r#"
            [risk]
            medium = 0.6
            high = 0.3
            critical = 0.5
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let path = std::env::temp_dir().join("campus-health-missing-config.toml");
        let _ = std::fs::remove_file(&path);
        let config = EngineConfig::load_from_path(&path).unwrap();
        assert_eq!(config, EngineConfig::default());
    }
}
