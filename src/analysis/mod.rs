//! The offline analytics pipeline: raw readings in, result sets out.
//!
//! Data flows one way: readings are merged into intervals, rolled up per
//! day, and the per-day results feed the monthly, battery, price, and
//! overall stages. The whole pass is deterministic — re-running on the
//! same input and configuration yields byte-identical output.

pub mod battery;
pub mod daily;
pub mod merge;
pub mod monthly;
pub mod overall;
pub mod periods;
pub mod prices;
pub mod types;

use crate::config::AnalysisConfig;
use types::{
    BatteryDayAnalysis, DailySummary, HourDayPrice, MonthlySummary, OverallStats, PeriodSummary,
    PriceBucketCount, RawReading,
};

/// Everything one pipeline run produces.
#[derive(Debug)]
pub struct PipelineOutput {
    /// Daily summaries with their interval detail attached.
    pub daily_summaries: Vec<DailySummary>,
    pub monthly_summaries: Vec<MonthlySummary>,
    pub battery_analysis: Vec<BatteryDayAnalysis>,
    pub price_distribution: Vec<PriceBucketCount>,
    pub hour_day_prices: Vec<HourDayPrice>,
    pub period_summaries: Vec<PeriodSummary>,
    pub overall_stats: OverallStats,
    /// Record groups dropped for missing both date and timestamp.
    pub dropped_groups: usize,
    /// Same-channel duplicate readings resolved last-write-wins.
    pub duplicate_channels: usize,
}

/// Runs the full pipeline over the raw dataset.
///
/// # Panics
///
/// Panics if no reading carries a usable date and timestamp (the overall
/// stage requires at least one day of data — see
/// [`overall::overall_stats`]).
pub fn run(readings: &[RawReading], cfg: &AnalysisConfig) -> PipelineOutput {
    let merged = merge::merge_readings(readings);
    let daily = daily::daily_summaries(merged.by_date);

    let monthly = monthly::monthly_summaries(&daily);
    let battery = battery::battery_analysis(&daily, &cfg.battery);
    let distribution = prices::price_distribution(readings);
    let grid = prices::hour_day_prices(readings);
    let period = periods::period_summaries(&daily);
    let stats = overall::overall_stats(&daily, &battery, &cfg.tariff);

    PipelineOutput {
        daily_summaries: daily,
        monthly_summaries: monthly,
        battery_analysis: battery,
        price_distribution: distribution,
        hour_day_prices: grid,
        period_summaries: period,
        overall_stats: stats,
        dropped_groups: merged.dropped_groups,
        duplicate_channels: merged.duplicate_channels,
    }
}

/// Rounds to `decimals` places, halves away from zero.
pub(crate) fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}
