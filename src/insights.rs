use crate::models::{Analytics, Trend};

/// Rule-based summary lines. Empty input yields no lines.
pub fn generate_insights(analytics: &Analytics) -> Vec<String> {
    let Some(average) = analytics.average_health() else {
        return Vec::new();
    };
    let total = analytics.center_performance.len();
    let mut insights = Vec::new();

    if average > 90.0 {
        insights.push(format!(
            "Overall campus health is excellent with an average score of {:.1}",
            average
        ));
    } else if average > 75.0 {
        insights.push(format!(
            "Overall campus health is good with an average score of {:.1}",
            average
        ));
    } else {
        insights.push(format!(
            "Overall campus health needs attention: average score is {:.1}",
            average
        ));
    }

    let elevated = analytics
        .center_performance
        .iter()
        .filter(|entry| entry.risk_level.is_elevated())
        .count();
    if elevated > 0 {
        insights.push(format!(
            "{} {} at high or critical risk and {} immediate follow-up",
            elevated,
            if elevated == 1 { "center is" } else { "centers are" },
            if elevated == 1 { "needs" } else { "need" }
        ));
    }

    let improving = analytics
        .center_performance
        .iter()
        .filter(|entry| entry.trend == Trend::Improving)
        .count();
    if improving * 2 > total {
        insights.push(format!(
            "Most centers are improving ({} of {})",
            improving, total
        ));
    }

    insights
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Benchmark, CenterPerformance, Prediction, RiskLevel};

    fn analytics_of(entries: &[(u8, Trend, RiskLevel)]) -> Analytics {
        Analytics {
            center_performance: entries
                .iter()
                .enumerate()
                .map(|(idx, (score, trend, risk_level))| CenterPerformance {
                    center_id: format!("C{idx}"),
                    health_score: *score,
                    trend: *trend,
                    risk_level: *risk_level,
                    efficiency: *score,
                    compliance: 100,
                })
                .collect(),
            predictions: Prediction::default(),
            benchmarks: Benchmark::default(),
        }
    }

    #[test]
    fn no_centers_produce_no_insights() {
        assert!(generate_insights(&analytics_of(&[])).is_empty());
    }

    #[test]
    fn health_bands_pick_the_headline() {
        let excellent = generate_insights(&analytics_of(&[(95, Trend::Stable, RiskLevel::Low)]));
        assert!(excellent[0].contains("excellent"));

        let good = generate_insights(&analytics_of(&[(90, Trend::Stable, RiskLevel::Low)]));
        assert!(good[0].contains("good"));

        let poor = generate_insights(&analytics_of(&[(75, Trend::Stable, RiskLevel::Low)]));
        assert!(poor[0].contains("needs attention"));
        assert_eq!(poor.len(), 1);
    }

    #[test]
    fn elevated_risk_is_counted() {
        let insights = generate_insights(&analytics_of(&[
            (60, Trend::Stable, RiskLevel::Critical),
            (70, Trend::Stable, RiskLevel::High),
            (80, Trend::Stable, RiskLevel::Medium),
        ]));
        assert_eq!(insights.len(), 2);
        assert!(insights[1].starts_with("2 centers are at high or critical risk"));
    }

    #[test]
    fn improving_majority_requires_more_than_half() {
        let half = generate_insights(&analytics_of(&[
            (92, Trend::Improving, RiskLevel::Low),
            (92, Trend::Stable, RiskLevel::Low),
        ]));
        assert_eq!(half.len(), 1);

        let majority = generate_insights(&analytics_of(&[
            (92, Trend::Improving, RiskLevel::Low),
            (92, Trend::Improving, RiskLevel::Low),
            (92, Trend::Declining, RiskLevel::Low),
        ]));
        assert_eq!(majority.last().unwrap(), "Most centers are improving (2 of 3)");
    }
}
