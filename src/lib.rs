//! Operational health analytics for campus daily checklists.
//!
//! Turns per-item status records submitted by each center into a health
//! score, trend, risk tier, short-term forecast and benchmark deltas. The
//! engine is synchronous and performs no I/O; callers hand it fully
//! materialized centers and reports, usually through a [`ReportRepository`].

pub mod aggregate;
pub mod benchmark;
pub mod cache;
pub mod config;
pub mod error;
pub mod export;
pub mod insights;
pub mod models;
pub mod prediction;
pub mod report;
pub mod repository;
pub mod risk;
pub mod score;

#[cfg(test)]
mod test_support;

pub use aggregate::AnalyticsAggregator;
pub use cache::AnalyticsCache;
pub use config::EngineConfig;
pub use error::AnalyticsError;
pub use models::{
    Analytics, Benchmark, Center, CenterPerformance, DailyReport, ItemStatus, Prediction,
    ReportItem, ReportStatus, RiskLevel, Trend,
};
pub use repository::{ReportRepository, Snapshot};
