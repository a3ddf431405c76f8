use std::sync::atomic::{AtomicU64, Ordering};

use moka::sync::Cache;
use tracing::debug;

use crate::aggregate::AnalyticsAggregator;
use crate::models::{Analytics, Benchmark, Center, DailyReport};

/// Full input contents, so any edit to a report or center yields a new key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    centers: Vec<Center>,
    reports: Vec<DailyReport>,
    benchmark: (u8, u8, u64),
}

impl CacheKey {
    fn new(centers: &[Center], reports: &[DailyReport], benchmark: &Benchmark) -> Self {
        let mut reports = reports.to_vec();
        reports.sort_by(|a, b| (a.id, a.submitted_at).cmp(&(b.id, b.submitted_at)));

        Self {
            centers: centers.to_vec(),
            reports,
            benchmark: (
                benchmark.industry_average,
                benchmark.top_performer,
                benchmark.improvement_pct.to_bits(),
            ),
        }
    }
}

/// Memoizes aggregation results, bounded by `cache.maxEntries`.
pub struct AnalyticsCache {
    aggregator: AnalyticsAggregator,
    cache: Cache<CacheKey, Analytics>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl AnalyticsCache {
    pub fn new(aggregator: AnalyticsAggregator) -> Self {
        let cache = Cache::builder()
            .max_capacity(aggregator.config().cache.max_entries)
            .build();
        Self {
            aggregator,
            cache,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    pub fn aggregate(
        &self,
        centers: &[Center],
        reports: &[DailyReport],
        benchmark: &Benchmark,
    ) -> Analytics {
        let key = CacheKey::new(centers, reports, benchmark);
        if let Some(cached) = self.cache.get(&key) {
            let hits = self.hits.fetch_add(1, Ordering::Relaxed) + 1;
            debug!(hits, "analytics cache hit");
            return cached;
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        let analytics = self.aggregator.aggregate(centers, reports, benchmark);
        self.cache.insert(key, analytics.clone());
        analytics
    }

    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }

    /// Entry count after pending evictions are applied.
    pub fn len(&self) -> u64 {
        self.cache.run_pending_tasks();
        self.cache.entry_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.cache.invalidate_all();
    }
}
