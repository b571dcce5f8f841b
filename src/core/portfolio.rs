use crate::domain::model::{
    MeasureEntry, PortfolioSummary, WorstRating, GATE_FAILED, GATE_METRIC,
};
use std::collections::{HashMap, HashSet};

/// Integer value of a rating entry. The server writes ratings as "2" or
/// "2.0"; anything unparseable counts as zero.
fn parse_rating(raw: &str) -> i64 {
    raw.parse::<i64>()
        .or_else(|_| raw.parse::<f64>().map(|value| value as i64))
        .unwrap_or(0)
}

/// Rounded average with half-up ties (2.5 becomes 3, never 2). f64::round
/// rounds half away from zero, which is half-up for the non-negative sums
/// ratings produce.
fn round_half_up(sum: i64, count: usize) -> i64 {
    (sum as f64 / count as f64).round() as i64
}

fn track_worst(tracker: &mut WorstRating, value: i64) {
    if value > tracker.value {
        tracker.value = value;
        tracker.projects_count = 1;
    } else if value == tracker.value {
        tracker.projects_count += 1;
    }
}

/// Maps the gate pass ratio to a 1 (best) .. 5 (worst) grade. Thresholds are
/// strict, so an exact boundary falls to the stricter grade; comparing in
/// integers keeps the boundaries exact.
fn releasability_rating(passed: usize, total: usize) -> u8 {
    if 5 * passed > 4 * total {
        1
    } else if 5 * passed > 3 * total {
        2
    } else if 5 * passed > 2 * total {
        3
    } else if 5 * passed > total {
        4
    } else {
        5
    }
}

/// Reduces raw measure entries to portfolio statistics: per-metric averages,
/// quality-gate failure count, releasability grade and worst-rating extrema.
/// Zero entries yield `PortfolioSummary::empty`, never an error.
pub fn aggregate(entries: &[MeasureEntry], requested_count: usize) -> PortfolioSummary {
    if entries.is_empty() {
        return PortfolioSummary::empty(requested_count);
    }

    let mut sums: HashMap<String, i64> = HashMap::new();
    let mut responding: HashSet<&str> = HashSet::new();
    let mut failed_gate = 0usize;
    let mut worst_security = WorstRating::default();
    let mut worst_reliability = WorstRating::default();

    for entry in entries {
        responding.insert(entry.component.as_str());

        // the gate is tallied, not averaged
        if entry.metric == GATE_METRIC {
            if entry.value == GATE_FAILED {
                failed_gate += 1;
            }
            continue;
        }

        let value = parse_rating(&entry.value);
        *sums.entry(entry.metric.clone()).or_insert(0) += value;

        match entry.metric.as_str() {
            "security_rating" => track_worst(&mut worst_security, value),
            "reliability_rating" => track_worst(&mut worst_reliability, value),
            _ => {}
        }
    }

    let count = responding.len();
    let ratings = sums
        .into_iter()
        .map(|(metric, sum)| (metric, round_half_up(sum, count)))
        .collect();

    PortfolioSummary {
        ratings,
        releasability_rating: releasability_rating(count.saturating_sub(failed_gate), count),
        projects_count_request: requested_count,
        projects_count_with_measures: count,
        projects_failed_quality_gate: failed_gate,
        worst_security_rating: worst_security,
        worst_reliability_rating: worst_reliability,
    }
}
