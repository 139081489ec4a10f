//! Dataset-wide statistics and the flat-tariff counterfactual.

use super::round_to;
use super::types::{
    BatteryDayAnalysis, DailySummary, DateRange, FlatRateComparison, OverallStats,
};
use crate::config::TariffSection;

/// Reduces all daily summaries and battery analyses into one record.
///
/// The flat-tariff counterfactual applies the configured flat rates to
/// the total energy; positive `savings` means the wholesale strategy
/// beat the flat tariff.
///
/// # Panics
///
/// Panics if `days` is empty — computing per-day averages over zero days
/// is a caller error, not a recoverable condition.
pub fn overall_stats(
    days: &[DailySummary],
    battery: &[BatteryDayAnalysis],
    tariff: &TariffSection,
) -> OverallStats {
    assert!(!days.is_empty(), "overall stats require at least one day");

    let total_import_kwh: f64 = days.iter().map(|d| d.import_kwh).sum();
    let total_export_kwh: f64 = days.iter().map(|d| d.export_kwh).sum();
    // Rounded before the subtractions so the netCost and savings
    // identities hold on the stored fields.
    let total_import_cost = round_to(days.iter().map(|d| d.import_cost).sum(), 2);
    let total_export_revenue = round_to(days.iter().map(|d| d.export_revenue).sum(), 2);
    let total_net_cost = total_import_cost - total_export_revenue;
    let total_days = days.len();

    let flat_import_cost = round_to(total_import_kwh * tariff.flat_import_rate, 2);
    let flat_export_revenue = round_to(total_export_kwh * tariff.flat_export_rate, 2);
    let flat_net_cost = flat_import_cost - flat_export_revenue;
    let savings = flat_net_cost - total_net_cost;

    let avg_battery_score = if battery.is_empty() {
        0.0
    } else {
        battery.iter().map(|b| b.score as f64).sum::<f64>() / battery.len() as f64
    };
    let total_missed_savings: f64 = battery.iter().map(|b| b.missed_savings).sum();

    OverallStats {
        total_import_kwh: round_to(total_import_kwh, 2),
        total_export_kwh: round_to(total_export_kwh, 2),
        total_import_cost,
        total_export_revenue,
        total_net_cost,
        avg_daily_import: round_to(total_import_kwh / total_days as f64, 2),
        avg_daily_export: round_to(total_export_kwh / total_days as f64, 2),
        avg_daily_cost: round_to(total_net_cost / total_days as f64, 2),
        total_days,
        date_range: DateRange {
            start: days[0].date.clone(),
            end: days[total_days - 1].date.clone(),
        },
        flat_rate_comparison: FlatRateComparison {
            flat_import_cost,
            flat_export_revenue,
            flat_net_cost,
            savings,
        },
        avg_battery_score: round_to(avg_battery_score, 1),
        total_missed_savings: round_to(total_missed_savings, 2),
    }
}
