//! CSV export of daily summaries.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::analysis::types::DailySummary;

/// Column header for the daily-summary CSV export.
const HEADER: &str = "date,importKwh,exportKwh,importCost,exportRevenue,netCost,\
                      avgImportPrice,avgExportPrice,peakImportPrice,\
                      spikeCount,highCount,renewablesAvg";

/// Exports daily summaries to a CSV file at the given path.
///
/// Writes a header row followed by one data row per day. Produces
/// deterministic output for identical inputs.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_csv(days: &[DailySummary], path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_csv(days, buf)
}

/// Writes daily summaries as CSV to any writer.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_csv(days: &[DailySummary], writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    wtr.write_record(HEADER.split(',').map(str::trim))?;

    for d in days {
        wtr.write_record(&[
            d.date.clone(),
            format!("{:.3}", d.import_kwh),
            format!("{:.3}", d.export_kwh),
            format!("{:.2}", d.import_cost),
            format!("{:.2}", d.export_revenue),
            format!("{:.2}", d.net_cost),
            format!("{:.2}", d.avg_import_price),
            format!("{:.2}", d.avg_export_price),
            format!("{:.2}", d.peak_import_price),
            d.spike_count.to_string(),
            d.high_count.to_string(),
            format!("{:.1}", d.renewables_avg),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
