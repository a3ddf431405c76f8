use std::io::Write;

use anyhow::Context;

use crate::models::{Analytics, CenterPerformance};

pub const TABULAR_HEADER: [&str; 6] = [
    "Center ID",
    "Health Score",
    "Trend",
    "Risk Level",
    "Efficiency",
    "Compliance",
];

pub fn tabular_row(entry: &CenterPerformance) -> [String; 6] {
    [
        entry.center_id.clone(),
        entry.health_score.to_string(),
        entry.trend.as_str().to_string(),
        entry.risk_level.as_str().to_string(),
        entry.efficiency.to_string(),
        entry.compliance.to_string(),
    ]
}

/// One header row, then one row per center in `centerPerformance` order.
pub fn write_tabular<W: Write>(analytics: &Analytics, out: W) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(TABULAR_HEADER)?;
    for entry in analytics.center_performance.iter() {
        writer.write_record(tabular_row(entry))?;
    }
    writer.flush().context("failed to flush tabular export")?;
    Ok(())
}

pub fn to_tabular(analytics: &Analytics) -> anyhow::Result<String> {
    let mut buffer = Vec::new();
    write_tabular(analytics, &mut buffer)?;
    String::from_utf8(buffer).context("tabular export is not valid UTF-8")
}

pub fn to_structured(analytics: &Analytics) -> anyhow::Result<String> {
    serde_json::to_string_pretty(analytics).context("failed to serialize analytics")
}

pub fn from_structured(raw: &str) -> anyhow::Result<Analytics> {
    serde_json::from_str(raw).context("failed to parse structured analytics")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Benchmark, Prediction, RiskLevel, Trend};

    fn sample() -> Analytics {
        Analytics {
            center_performance: vec![
                CenterPerformance {
                    center_id: "NORTH-01".to_string(),
                    health_score: 75,
                    trend: Trend::Improving,
                    risk_level: RiskLevel::Critical,
                    efficiency: 50,
                    compliance: 67,
                },
                CenterPerformance {
                    center_id: "SOUTH-02".to_string(),
                    health_score: 0,
                    trend: Trend::Stable,
                    risk_level: RiskLevel::Low,
                    efficiency: 0,
                    compliance: 0,
                },
            ],
            predictions: Prediction {
                next_week_issues: 4,
                maintenance_needed: vec!["Classroom AC".to_string()],
                risk_areas: vec!["Infrastructure".to_string(), "Network".to_string()],
                budget_forecast: 10000.0,
            },
            benchmarks: Benchmark::default(),
        }
    }

    #[test]
    fn tabular_export_has_header_and_rows() {
        let csv = to_tabular(&sample()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(
            lines,
            vec![
                "Center ID,Health Score,Trend,Risk Level,Efficiency,Compliance",
                "NORTH-01,75,IMPROVING,CRITICAL,50,67",
                "SOUTH-02,0,STABLE,LOW,0,0",
            ]
        );
    }

    #[test]
    fn tabular_export_of_no_centers_is_header_only() {
        let mut analytics = sample();
        analytics.center_performance.clear();
        let csv = to_tabular(&analytics).unwrap();
        assert_eq!(csv.lines().count(), 1);
    }

    #[test]
    fn structured_export_is_readable_by_a_typed_consumer() {
        let analytics = sample();
        let raw = to_structured(&analytics).unwrap();
        assert!(raw.contains("\"centerPerformance\""));
        assert!(raw.contains("\"maintenanceNeeded\""));
        assert!(raw.contains("\"topPerformer\""));
        assert_eq!(from_structured(&raw).unwrap(), analytics);
    }
}
