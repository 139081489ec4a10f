//! Record types shared across the pipeline stages.
//!
//! Field names serialize as camelCase so the JSON result sets match the
//! shape the dashboard consumes.

use chrono::{DateTime, Datelike, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

/// Meter channel a raw reading belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChannelKind {
    /// Grid import (consumption).
    #[serde(rename = "general")]
    General,
    /// Grid export (solar feed-in).
    #[serde(rename = "feedIn")]
    FeedIn,
    /// Any other channel (e.g. controlled load); treated as export-side.
    #[serde(other)]
    Other,
}

/// Tariff metadata attached to a raw reading.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TariffInformation {
    /// Tariff period label (e.g. `peak`, `shoulder`, `offPeak`).
    #[serde(default)]
    pub period: String,
    /// Tariff season label.
    #[serde(default)]
    pub season: String,
}

/// One channel's meter reading for one 5-minute interval, as loaded from
/// storage. Immutable input to the pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawReading {
    /// Calendar date (`YYYY-MM-DD`).
    #[serde(default)]
    pub date: String,
    /// Interval-ending timestamp in NEM time (RFC 3339).
    #[serde(default)]
    pub nem_time: String,
    /// Energy for the interval (kWh, non-negative).
    #[serde(default)]
    pub kwh: f64,
    /// Cost for the interval (cents, signed).
    #[serde(default)]
    pub cost: f64,
    /// Per-unit price (c/kWh, signed).
    #[serde(default)]
    pub per_kwh: f64,
    /// Wholesale spot price (c/kWh, signed).
    #[serde(default)]
    pub spot_per_kwh: f64,
    /// Which meter channel this reading belongs to.
    pub channel_type: ChannelKind,
    /// Qualitative price descriptor (`neutral`, `high`, `spike`, ...).
    #[serde(default)]
    pub descriptor: String,
    /// Price spike flag (`none` or `spike`).
    #[serde(default)]
    pub spike_status: String,
    /// Tariff period/season labels.
    #[serde(default)]
    pub tariff_information: TariffInformation,
    /// Grid renewables percentage at the time of the reading.
    #[serde(default)]
    pub renewables: f64,
}

/// One merged 5-minute interval: paired import and export readings for a
/// single timestamp. Created once by the merge pass; never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Interval {
    /// Interval-ending timestamp in NEM time.
    pub nem_time: String,
    /// Hour of day (0-23), from the timestamp's own offset.
    pub hour: u32,
    /// Minute of hour (0-59).
    pub minute: u32,
    /// Grid import (kWh).
    pub import_kwh: f64,
    /// Grid export (kWh).
    pub export_kwh: f64,
    /// Import price (c/kWh, signed).
    pub import_price: f64,
    /// Export price magnitude (c/kWh, non-negative).
    pub export_price: f64,
    /// Import cost (cents, signed).
    pub import_cost: f64,
    /// Export revenue magnitude (cents, non-negative).
    pub export_revenue: f64,
    /// Price descriptor, import side preferred.
    pub descriptor: String,
    /// Spike flag from the import side (`none` when absent).
    pub spike_status: String,
    /// Tariff period label from the import side.
    pub period: String,
    /// Renewables percentage.
    pub renewables: f64,
}

/// One calendar date's rollup, with its constituent intervals.
///
/// The `intervals` field is omitted from JSON when empty, so the compact
/// daily listing and the per-date detail file share one type.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailySummary {
    /// Calendar date (`YYYY-MM-DD`).
    pub date: String,
    /// Total import (kWh).
    pub import_kwh: f64,
    /// Total export (kWh).
    pub export_kwh: f64,
    /// Total import cost (cents).
    pub import_cost: f64,
    /// Total export revenue (cents).
    pub export_revenue: f64,
    /// `import_cost - export_revenue` (cents).
    pub net_cost: f64,
    /// Cost-weighted average import price (c/kWh, 0 if no import).
    pub avg_import_price: f64,
    /// Cost-weighted average export price (c/kWh, 0 if no export).
    pub avg_export_price: f64,
    /// Highest import price observed (c/kWh, 0 if no import).
    pub peak_import_price: f64,
    /// Number of spike-flagged intervals.
    pub spike_count: usize,
    /// Number of `high` or `spike` descriptor intervals.
    pub high_count: usize,
    /// Average renewables percentage.
    pub renewables_avg: f64,
    /// Constituent intervals, sorted by timestamp ascending.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub intervals: Vec<Interval>,
}

/// One calendar month's rollup of its daily summaries.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySummary {
    /// Month key (`YYYY-MM`).
    pub month: String,
    pub import_kwh: f64,
    pub export_kwh: f64,
    pub import_cost: f64,
    pub export_revenue: f64,
    pub net_cost: f64,
    /// Number of days with data in the month.
    pub days: usize,
    /// `net_cost / days` (cents).
    pub avg_daily_cost: f64,
}

/// Kind of sub-optimal battery behavior detected in an interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BatteryErrorKind {
    /// Imported heavily while the price was above the threshold.
    HighImport,
    /// Exported while the price was negative.
    LowExport,
}

/// One interval where battery behavior appears sub-optimal.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatteryErrorInterval {
    pub nem_time: String,
    pub hour: u32,
    /// The relevant energy quantity (import for `high_import`, export
    /// for `low_export`).
    pub import_kwh: f64,
    /// The interval's import price (c/kWh).
    pub price: f64,
    #[serde(rename = "type")]
    pub kind: BatteryErrorKind,
    /// Estimated saving had the battery been used correctly (cents).
    pub potential_saving: f64,
}

/// One date's battery-performance verdict.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatteryDayAnalysis {
    pub date: String,
    /// 0-100: share of expensive intervals the battery covered. 100 when
    /// the day had no expensive intervals.
    pub score: u32,
    /// Net benefit of the theoretically optimal schedule (cents).
    pub optimal_savings: f64,
    /// What grid import actually cost that day (cents).
    pub actual_behavior: f64,
    /// Sum of all flagged errors' potential savings (cents). Computed
    /// over the full error set, not the truncated list below.
    pub missed_savings: f64,
    /// Flagged intervals, truncated to at most 20 for storage economy.
    pub error_intervals: Vec<BatteryErrorInterval>,
    pub charge_intervals: usize,
    pub discharge_intervals: usize,
    pub idle_intervals: usize,
    /// Volume-weighted average price of the optimal charge schedule.
    pub optimal_charge_price: f64,
    /// Volume-weighted average price of the optimal discharge schedule.
    pub optimal_discharge_price: f64,
}

/// One price bucket and the count of import readings falling in it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceBucketCount {
    /// Display label (e.g. `"30 to 40"`).
    pub bucket: String,
    pub count: usize,
    /// Lower bound for display scaling; open ends use finite sentinels.
    pub min: f64,
    /// Upper bound for display scaling.
    pub max: f64,
}

/// Average import price for one (hour-of-day, day-of-week) cell.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HourDayPrice {
    /// Hour of day (0-23).
    pub hour: u32,
    /// Day of week (0 = Sunday .. 6 = Saturday).
    pub day_of_week: u32,
    pub avg_price: f64,
    pub count: usize,
}

/// Dataset-wide import aggregate for one tariff period label.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodSummary {
    /// Period label with an upper-cased first letter (e.g. `Peak`).
    pub period: String,
    pub kwh: f64,
    pub cost: f64,
    pub avg_price: f64,
}

/// First and last dates covered by the dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DateRange {
    pub start: String,
    pub end: String,
}

/// What the same energy would have cost on a flat tariff.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlatRateComparison {
    pub flat_import_cost: f64,
    pub flat_export_revenue: f64,
    pub flat_net_cost: f64,
    /// `flat_net_cost - actual net cost`; positive means the wholesale
    /// strategy beat the flat tariff.
    pub savings: f64,
}

/// Single dataset-wide summary, computed last.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverallStats {
    pub total_import_kwh: f64,
    pub total_export_kwh: f64,
    pub total_import_cost: f64,
    pub total_export_revenue: f64,
    pub total_net_cost: f64,
    pub avg_daily_import: f64,
    pub avg_daily_export: f64,
    pub avg_daily_cost: f64,
    pub total_days: usize,
    pub date_range: DateRange,
    pub flat_rate_comparison: FlatRateComparison,
    pub avg_battery_score: f64,
    pub total_missed_savings: f64,
}

/// Parses a NEM timestamp: RFC 3339 with offset, falling back to a naive
/// `YYYY-MM-DDTHH:MM:SS` form. The embedded offset's wall-clock time is
/// kept, so results do not depend on the host timezone.
pub fn parse_nem_time(s: &str) -> Option<NaiveDateTime> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.naive_local())
        .ok()
        .or_else(|| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S").ok())
}

/// Extracts (hour, minute) from a NEM timestamp, (0, 0) if unparseable.
pub fn clock_parts(nem_time: &str) -> (u32, u32) {
    match parse_nem_time(nem_time) {
        Some(dt) => (dt.hour(), dt.minute()),
        None => (0, 0),
    }
}

/// Extracts (hour, day-of-week) from a NEM timestamp, with Sunday = 0.
pub fn hour_and_weekday(nem_time: &str) -> Option<(u32, u32)> {
    parse_nem_time(nem_time).map(|dt| (dt.hour(), dt.weekday().num_days_from_sunday()))
}
