//! Currency formatting and the end-of-run report.

use std::fmt;

use crate::analysis::PipelineOutput;

/// Renders signed cents as a dollar string: `1234.0` → `"$12.34"`,
/// `-50.0` → `"-$0.50"`.
pub fn format_cents(cents: f64) -> String {
    let dollars = cents / 100.0;
    if dollars < 0.0 {
        format!("-${:.2}", dollars.abs())
    } else {
        format!("${dollars:.2}")
    }
}

/// Renders cents per kWh compactly: `26.04` → `"26.0c"`.
pub fn format_cents_short(cents: f64) -> String {
    format!("{cents:.1}c")
}

/// Human-readable summary of one pipeline run, printed after the result
/// sets are written.
pub struct RunReport<'a>(pub &'a PipelineOutput);

impl fmt::Display for RunReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let out = self.0;
        let stats = &out.overall_stats;
        let flat = &stats.flat_rate_comparison;

        writeln!(f, "--- Run Report ---")?;
        writeln!(
            f,
            "Days processed:     {} ({} to {})",
            stats.total_days, stats.date_range.start, stats.date_range.end
        )?;
        writeln!(
            f,
            "Total import:       {:.1} kWh ({})",
            stats.total_import_kwh,
            format_cents(stats.total_import_cost)
        )?;
        writeln!(
            f,
            "Total export:       {:.1} kWh ({})",
            stats.total_export_kwh,
            format_cents(stats.total_export_revenue)
        )?;
        writeln!(f, "Net cost:           {}", format_cents(stats.total_net_cost))?;
        writeln!(f, "Flat tariff cost:   {}", format_cents(flat.flat_net_cost))?;
        writeln!(f, "Wholesale savings:  {}", format_cents(flat.savings))?;
        writeln!(f, "Avg battery score:  {:.1}%", stats.avg_battery_score)?;
        writeln!(
            f,
            "Missed savings:     {}",
            format_cents(stats.total_missed_savings)
        )?;
        write!(
            f,
            "Data quality:       {} dropped group(s), {} duplicate channel reading(s)",
            out.dropped_groups, out.duplicate_channels
        )
    }
}
