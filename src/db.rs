use std::collections::HashMap;

use anyhow::Context;
use campus_health_analytics::models::{
    Center, DailyReport, ItemStatus, ReportItem, ReportStatus,
};
use campus_health_analytics::Snapshot;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use sqlx::{PgPool, Row};
use tracing::info;
use uuid::Uuid;

pub async fn init_db(pool: &PgPool) -> anyhow::Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

pub async fn seed(pool: &PgPool) -> anyhow::Result<()> {
    let centers = vec![
        ("NORTH-01", "North Campus", "Sector 4", "North", Some(480)),
        ("EAST-02", "East Campus", "Lake Road", "East", Some(320)),
        ("SOUTH-03", "South Campus", "Old Town", "South", None),
    ];

    for (id, name, location, region, capacity) in centers {
        sqlx::query(
            r#"
            INSERT INTO campus_health.centers (id, name, location, region, capacity)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (id) DO UPDATE
            SET name = EXCLUDED.name, location = EXCLUDED.location, region = EXCLUDED.region
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(location)
        .bind(region)
        .bind(capacity)
        .execute(pool)
        .await?;
    }

    let reports = vec![
        (
            "seed-001",
            "NORTH-01",
            NaiveDate::from_ymd_opt(2026, 10, 16).context("invalid date")?,
            vec![
                ("Classroom AC", "Infrastructure", "OK"),
                ("Washrooms", "Hygiene & Cleanliness", "OK"),
                ("Network", "IT", "ISSUE"),
            ],
        ),
        (
            "seed-002",
            "NORTH-01",
            NaiveDate::from_ymd_opt(2026, 10, 17).context("invalid date")?,
            vec![
                ("Classroom AC", "Infrastructure", "ISSUE"),
                ("Washrooms", "Hygiene & Cleanliness", "OK"),
                ("Network", "IT", "OK"),
            ],
        ),
        (
            "seed-003",
            "EAST-02",
            NaiveDate::from_ymd_opt(2026, 10, 17).context("invalid date")?,
            vec![
                ("Water cooler", "Infrastructure", "HIGH_RISK"),
                ("Kitchen", "Hygiene & Cleanliness", "ISSUE"),
                ("Fire extinguishers", "Safety", "NA"),
            ],
        ),
    ];

    for (source_key, center_id, date, items) in reports {
        let submitted_at = date
            .and_hms_opt(18, 0, 0)
            .map(|value| Utc.from_utc_datetime(&value))
            .context("invalid submission time")?;

        let inserted = sqlx::query(
            r#"
            INSERT INTO campus_health.daily_reports
            (id, center_id, report_date, submitted_by, submitted_at, status, source_key)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (source_key) DO NOTHING
            RETURNING id
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(center_id)
        .bind(date)
        .bind("facilities@campus.example")
        .bind(submitted_at)
        .bind(ReportStatus::Submitted.as_str())
        .bind(source_key)
        .fetch_optional(pool)
        .await?;

        let Some(row) = inserted else {
            continue;
        };
        let report_id: Uuid = row.get("id");

        for (position, (name, category, status)) in items.into_iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO campus_health.report_items
                (id, report_id, position, name, category, status, created_at)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                "#,
            )
            .bind(Uuid::new_v4())
            .bind(report_id)
            .bind(position as i32)
            .bind(name)
            .bind(category)
            .bind(status)
            .bind(submitted_at)
            .execute(pool)
            .await?;
        }
    }

    Ok(())
}

pub async fn fetch_centers(pool: &PgPool) -> anyhow::Result<Vec<Center>> {
    let rows = sqlx::query(
        "SELECT id, name, location, region, capacity, current_strength \
         FROM campus_health.centers ORDER BY id",
    )
    .fetch_all(pool)
    .await?;

    let mut centers = Vec::new();
    for row in rows {
        let capacity: Option<i32> = row.get("capacity");
        let current_strength: Option<i32> = row.get("current_strength");
        centers.push(Center {
            id: row.get("id"),
            name: row.get("name"),
            location: row.get("location"),
            region: row.get("region"),
            capacity: capacity.and_then(|value| u32::try_from(value).ok()),
            current_strength: current_strength.and_then(|value| u32::try_from(value).ok()),
        });
    }

    Ok(centers)
}

pub async fn fetch_reports(
    pool: &PgPool,
    from: NaiveDate,
    to: NaiveDate,
) -> anyhow::Result<Vec<DailyReport>> {
    let report_rows = sqlx::query(
        "SELECT id, center_id, report_date, submitted_by, submitted_at, status \
         FROM campus_health.daily_reports \
         WHERE report_date >= $1 AND report_date <= $2 \
         ORDER BY report_date, center_id, submitted_at",
    )
    .bind(from)
    .bind(to)
    .fetch_all(pool)
    .await?;

    let report_ids: Vec<Uuid> = report_rows.iter().map(|row| row.get("id")).collect();
    let item_rows = sqlx::query(
        "SELECT report_id, name, category, status, remarks, created_at \
         FROM campus_health.report_items \
         WHERE report_id = ANY($1) \
         ORDER BY report_id, position",
    )
    .bind(&report_ids)
    .fetch_all(pool)
    .await?;

    let mut items: HashMap<Uuid, Vec<ReportItem>> = HashMap::new();
    for row in item_rows {
        let report_id: Uuid = row.get("report_id");
        let raw_status: String = row.get("status");
        let status: ItemStatus = raw_status
            .parse()
            .with_context(|| format!("report {report_id} carries an invalid item"))?;
        let timestamp: DateTime<Utc> = row.get("created_at");
        items.entry(report_id).or_default().push(ReportItem {
            name: row.get("name"),
            category: row.get("category"),
            status,
            remarks: row.get("remarks"),
            timestamp,
        });
    }

    let mut reports = Vec::new();
    for row in report_rows {
        let id: Uuid = row.get("id");
        let raw_status: String = row.get("status");
        let status: ReportStatus = raw_status
            .parse()
            .with_context(|| format!("report {id} has an invalid lifecycle status"))?;
        reports.push(DailyReport {
            id,
            center_id: row.get("center_id"),
            date: row.get("report_date"),
            items: items.remove(&id).unwrap_or_default(),
            submitted_by: row.get("submitted_by"),
            submitted_at: row.get("submitted_at"),
            status,
        });
    }

    Ok(reports)
}

/// Materializes the directory and the reports dated `from..=to`.
pub async fn load_snapshot(
    pool: &PgPool,
    from: NaiveDate,
    to: NaiveDate,
) -> anyhow::Result<Snapshot> {
    let centers = fetch_centers(pool).await?;
    let reports = fetch_reports(pool, from, to).await?;
    info!(
        centers = centers.len(),
        reports = reports.len(),
        %from,
        %to,
        "loaded snapshot from Postgres"
    );
    Ok(Snapshot { centers, reports })
}
