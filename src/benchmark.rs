use crate::models::{Benchmark, BenchmarkDelta};

/// Signed distance of a center's score from the reference points.
pub fn compare(center_score: u8, benchmark: &Benchmark) -> BenchmarkDelta {
    let score = i32::from(center_score);
    BenchmarkDelta {
        vs_industry: score - i32::from(benchmark.industry_average),
        vs_top_performer: score - i32::from(benchmark.top_performer),
    }
}
