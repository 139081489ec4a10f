//! Dataset-wide import aggregates per tariff period label.

use std::collections::BTreeMap;

use super::round_to;
use super::types::{DailySummary, PeriodSummary};

/// Sums import energy and cost per tariff period (peak/shoulder/offPeak)
/// across all days. Intervals without a period label are excluded.
/// Labels are rendered with an upper-cased first letter and sorted.
pub fn period_summaries(days: &[DailySummary]) -> Vec<PeriodSummary> {
    let mut totals: BTreeMap<&str, (f64, f64)> = BTreeMap::new();

    for day in days {
        for iv in &day.intervals {
            if iv.period.is_empty() {
                continue;
            }
            let entry = totals.entry(iv.period.as_str()).or_insert((0.0, 0.0));
            entry.0 += iv.import_kwh;
            entry.1 += iv.import_cost;
        }
    }

    totals
        .into_iter()
        .map(|(period, (kwh, cost))| PeriodSummary {
            period: capitalize(period),
            kwh: round_to(kwh, 1),
            cost: round_to(cost, 2),
            avg_price: if kwh > 0.0 { round_to(cost / kwh, 1) } else { 0.0 },
        })
        .collect()
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
