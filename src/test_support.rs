use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use uuid::Uuid;

use crate::models::{Center, DailyReport, ItemStatus, ReportItem, ReportStatus};

pub fn day(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, day).unwrap()
}

pub fn at(day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, day, hour, 0, 0).unwrap()
}

pub fn item(name: &str, category: &str, status: ItemStatus) -> ReportItem {
    ReportItem {
        name: name.to_string(),
        category: category.to_string(),
        status,
        remarks: None,
        timestamp: at(1, 8),
    }
}

pub fn report_with(center_id: &str, date: NaiveDate, items: Vec<ReportItem>) -> DailyReport {
    DailyReport {
        id: Uuid::new_v4(),
        center_id: center_id.to_string(),
        date,
        items,
        submitted_by: "warden@campus.example".to_string(),
        submitted_at: date.and_hms_opt(18, 0, 0).unwrap().and_utc(),
        status: ReportStatus::Submitted,
    }
}

pub fn statuses(center_id: &str, date: NaiveDate, statuses: &[ItemStatus]) -> DailyReport {
    let items = statuses
        .iter()
        .enumerate()
        .map(|(idx, status)| item(&format!("Item {idx}"), "Infrastructure", *status))
        .collect();
    report_with(center_id, date, items)
}

pub fn center(id: &str) -> Center {
    Center {
        id: id.to_string(),
        name: format!("{id} Campus"),
        location: "North Block".to_string(),
        region: "East".to_string(),
        capacity: Some(400),
        current_strength: Some(350),
    }
}
