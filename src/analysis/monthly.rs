//! Calendar-month rollups of daily summaries.

use std::collections::BTreeMap;

use super::round_to;
use super::types::{DailySummary, MonthlySummary};

/// Rolls daily summaries up by calendar month (`YYYY-MM` key), months
/// ascending. Average daily cost is `net cost / day count`.
pub fn monthly_summaries(days: &[DailySummary]) -> Vec<MonthlySummary> {
    let mut by_month: BTreeMap<&str, Vec<&DailySummary>> = BTreeMap::new();
    for day in days {
        let month = if day.date.len() >= 7 { &day.date[..7] } else { day.date.as_str() };
        by_month.entry(month).or_default().push(day);
    }

    by_month
        .into_iter()
        .map(|(month, days)| {
            let import_kwh: f64 = days.iter().map(|d| d.import_kwh).sum();
            let export_kwh: f64 = days.iter().map(|d| d.export_kwh).sum();
            // Rounded before the subtraction so the netCost identity
            // holds on the stored fields.
            let import_cost = round_to(days.iter().map(|d| d.import_cost).sum(), 2);
            let export_revenue = round_to(days.iter().map(|d| d.export_revenue).sum(), 2);
            let net_cost = import_cost - export_revenue;

            MonthlySummary {
                month: month.to_string(),
                import_kwh: round_to(import_kwh, 2),
                export_kwh: round_to(export_kwh, 2),
                import_cost,
                export_revenue,
                net_cost,
                days: days.len(),
                avg_daily_cost: round_to(net_cost / days.len() as f64, 2),
            }
        })
        .collect()
}
