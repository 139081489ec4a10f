//! JSON storage: raw readings in, result sets out, per-date lookups.

use std::fmt;
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use crate::analysis::PipelineOutput;
use crate::analysis::types::{DailySummary, RawReading};

/// Storage-boundary error: file I/O or JSON (de)serialization.
#[derive(Debug)]
pub enum StoreError {
    Io(io::Error),
    Json(serde_json::Error),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Io(e) => write!(f, "storage I/O error: {e}"),
            StoreError::Json(e) => write!(f, "storage JSON error: {e}"),
        }
    }
}

impl From<io::Error> for StoreError {
    fn from(e: io::Error) -> Self {
        StoreError::Io(e)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Json(e)
    }
}

/// Reads the full raw usage dataset once from a JSON array file.
///
/// # Errors
///
/// Returns a `StoreError` if the file cannot be opened or parsed.
pub fn load_usage(path: &Path) -> Result<Vec<RawReading>, StoreError> {
    let file = File::open(path)?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}

/// Writes all result sets under `out_dir`, plus one detail file per date
/// under `out_dir/days/`.
///
/// The daily listing is written without interval detail; the per-date
/// files carry the full interval sequence for on-demand retrieval.
///
/// # Errors
///
/// Returns a `StoreError` on the first failed write.
pub fn write_outputs(output: &PipelineOutput, out_dir: &Path) -> Result<(), StoreError> {
    fs::create_dir_all(out_dir)?;

    let compact: Vec<DailySummary> = output
        .daily_summaries
        .iter()
        .map(|d| DailySummary {
            intervals: Vec::new(),
            ..d.clone()
        })
        .collect();

    write_json(&out_dir.join("daily-summaries.json"), &compact)?;
    write_json(&out_dir.join("monthly-summaries.json"), &output.monthly_summaries)?;
    write_json(&out_dir.join("battery-analysis.json"), &output.battery_analysis)?;
    write_json(&out_dir.join("price-distribution.json"), &output.price_distribution)?;
    write_json(&out_dir.join("hour-day-prices.json"), &output.hour_day_prices)?;
    write_json(&out_dir.join("period-summaries.json"), &output.period_summaries)?;
    write_json(&out_dir.join("overall-stats.json"), &output.overall_stats)?;

    let days_dir = out_dir.join("days");
    fs::create_dir_all(&days_dir)?;
    for day in &output.daily_summaries {
        write_json(&days_dir.join(format!("{}.json", day.date)), day)?;
    }

    Ok(())
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), StoreError> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer(&mut writer, value)?;
    writer.flush()?;
    Ok(())
}

/// Loads one date's detail record from `out_dir/days/<date>.json`.
///
/// A missing file means "no data for that date" and returns `Ok(None)`;
/// it is not a failure.
///
/// # Errors
///
/// Returns a `StoreError` for any I/O failure other than the file being
/// absent, or if the file exists but does not parse.
pub fn load_day(out_dir: &Path, date: &str) -> Result<Option<DailySummary>, StoreError> {
    let path = out_dir.join("days").join(format!("{date}.json"));
    let file = match File::open(&path) {
        Ok(f) => f,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    Ok(Some(serde_json::from_reader(BufReader::new(file))?))
}

/// Looks up a daily summary by date in an in-memory listing.
pub fn find_day<'a>(days: &'a [DailySummary], date: &str) -> Option<&'a DailySummary> {
    days.iter().find(|d| d.date == date)
}

/// Returns the most recent `count` days (the listing is date-ascending).
pub fn recent_days(days: &[DailySummary], count: usize) -> &[DailySummary] {
    &days[days.len().saturating_sub(count)..]
}
