//! Per-date rollups of merged intervals.

use std::collections::BTreeMap;

use super::round_to;
use super::types::{DailySummary, Interval};

/// Builds one [`DailySummary`] per date, dates ascending.
///
/// Intervals within each date are sorted by timestamp (lexicographic,
/// which is chronological for ISO-formatted NEM times). Average prices
/// are cost-weighted ratios (`cost / energy`), 0 when no energy flowed
/// on that side. Currency fields round to 2 decimals, energy to 3,
/// renewables to 1.
pub fn daily_summaries(by_date: BTreeMap<String, Vec<Interval>>) -> Vec<DailySummary> {
    let mut summaries = Vec::with_capacity(by_date.len());

    for (date, mut intervals) in by_date {
        intervals.sort_by(|a, b| a.nem_time.cmp(&b.nem_time));

        let mut import_kwh = 0.0;
        let mut export_kwh = 0.0;
        let mut import_cost = 0.0;
        let mut export_revenue = 0.0;
        let mut peak_import_price = 0.0_f64;
        let mut spike_count = 0;
        let mut high_count = 0;
        let mut renewables_sum = 0.0;

        for iv in &intervals {
            import_kwh += iv.import_kwh;
            export_kwh += iv.export_kwh;
            import_cost += iv.import_cost;
            export_revenue += iv.export_revenue;
            renewables_sum += iv.renewables;

            if iv.import_price > peak_import_price {
                peak_import_price = iv.import_price;
            }
            if iv.spike_status == "spike" {
                spike_count += 1;
            }
            if iv.descriptor == "high" || iv.descriptor == "spike" {
                high_count += 1;
            }
        }

        let avg_import_price = if import_kwh > 0.0 {
            import_cost / import_kwh
        } else {
            0.0
        };
        let avg_export_price = if export_kwh > 0.0 {
            export_revenue / export_kwh
        } else {
            0.0
        };
        let renewables_avg = if intervals.is_empty() {
            0.0
        } else {
            renewables_sum / intervals.len() as f64
        };

        // Net cost derives from the rounded components so the
        // netCost == importCost - exportRevenue identity holds on the
        // stored fields.
        let import_cost = round_to(import_cost, 2);
        let export_revenue = round_to(export_revenue, 2);

        summaries.push(DailySummary {
            date,
            import_kwh: round_to(import_kwh, 3),
            export_kwh: round_to(export_kwh, 3),
            import_cost,
            export_revenue,
            net_cost: import_cost - export_revenue,
            avg_import_price: round_to(avg_import_price, 2),
            avg_export_price: round_to(avg_export_price, 2),
            peak_import_price: round_to(peak_import_price, 2),
            spike_count,
            high_count,
            renewables_avg: round_to(renewables_avg, 1),
            intervals,
        });
    }

    summaries
}
