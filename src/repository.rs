use std::path::Path;

use anyhow::Context;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::models::{Center, DailyReport};

/// Read-only access to the center directory and submitted reports.
pub trait ReportRepository {
    fn list_centers(&self) -> Vec<Center>;

    fn list_reports_for_date(&self, date: NaiveDate) -> Vec<DailyReport>;

    /// Reports dated within `from..=to`.
    fn list_reports_between(&self, from: NaiveDate, to: NaiveDate) -> Vec<DailyReport>;
}

/// Fully materialized centers and reports.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(default)]
    pub centers: Vec<Center>,
    #[serde(default)]
    pub reports: Vec<DailyReport>,
}

impl Snapshot {
    /// Reads a JSON snapshot. Unknown item statuses fail the whole load.
    pub fn load_json(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read snapshot {}", path.display()))?;
        let snapshot: Snapshot = serde_json::from_str(&content)
            .with_context(|| format!("invalid snapshot {}", path.display()))?;
        info!(
            centers = snapshot.centers.len(),
            reports = snapshot.reports.len(),
            "loaded snapshot from {}",
            path.display()
        );
        Ok(snapshot)
    }
}

impl ReportRepository for Snapshot {
    fn list_centers(&self) -> Vec<Center> {
        self.centers.clone()
    }

    fn list_reports_for_date(&self, date: NaiveDate) -> Vec<DailyReport> {
        self.list_reports_between(date, date)
    }

    fn list_reports_between(&self, from: NaiveDate, to: NaiveDate) -> Vec<DailyReport> {
        self.reports
            .iter()
            .filter(|report| report.date >= from && report.date <= to)
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ItemStatus;
    use crate::test_support::{center, day, statuses};

    fn snapshot() -> Snapshot {
        Snapshot {
            centers: vec![center("C1"), center("C2")],
            reports: vec![
                statuses("C1", day(1), &[ItemStatus::Ok]),
                statuses("C2", day(2), &[ItemStatus::Issue]),
                statuses("C1", day(3), &[ItemStatus::Na]),
            ],
        }
    }

    #[test]
    fn lists_reports_by_date_and_range() {
        let snapshot = snapshot();
        assert_eq!(snapshot.list_centers().len(), 2);
        assert_eq!(snapshot.list_reports_for_date(day(2)).len(), 1);
        assert_eq!(snapshot.list_reports_between(day(2), day(3)).len(), 2);
        assert!(snapshot.list_reports_between(day(4), day(9)).is_empty());
    }

    #[test]
    fn json_snapshot_loads_and_rejects_bad_status() {
        let dir = std::env::temp_dir();
        let good = dir.join(format!("campus-health-snapshot-{}.json", uuid::Uuid::new_v4()));
        let expected = snapshot();
        std::fs::write(&good, serde_json::to_string(&expected).unwrap()).unwrap();
        assert_eq!(Snapshot::load_json(&good).unwrap(), expected);
        std::fs::remove_file(&good).unwrap();

        let bad = dir.join(format!("campus-health-snapshot-{}.json", uuid::Uuid::new_v4()));
        let raw = serde_json::to_string(&snapshot())
            .unwrap()
            .replace("\"ISSUE\"", "\"BROKEN\"");
        std::fs::write(&bad, raw).unwrap();
        assert!(Snapshot::load_json(&bad).is_err());
        std::fs::remove_file(&bad).unwrap();
    }
}
