//! Shared builders for integration tests.

use energy_insights::analysis::types::{ChannelKind, RawReading, TariffInformation};
use energy_insights::config::AnalysisConfig;

/// Default analysis configuration (reference installation constants).
pub fn default_config() -> AnalysisConfig {
    AnalysisConfig::default()
}

/// One raw reading with the given channel, energy, cost, and price.
pub fn reading(
    date: &str,
    nem_time: &str,
    channel: ChannelKind,
    kwh: f64,
    cost: f64,
    per_kwh: f64,
) -> RawReading {
    RawReading {
        date: date.to_string(),
        nem_time: nem_time.to_string(),
        kwh,
        cost,
        per_kwh,
        spot_per_kwh: per_kwh,
        channel_type: channel,
        descriptor: "neutral".to_string(),
        spike_status: "none".to_string(),
        tariff_information: TariffInformation::default(),
        renewables: 0.0,
    }
}

/// Import-channel reading; cost derived from energy and price.
pub fn import_reading(date: &str, nem_time: &str, kwh: f64, per_kwh: f64) -> RawReading {
    reading(date, nem_time, ChannelKind::General, kwh, kwh * per_kwh, per_kwh)
}

/// Export-channel reading with the source's negative sign convention.
pub fn export_reading(date: &str, nem_time: &str, kwh: f64, per_kwh: f64) -> RawReading {
    reading(
        date,
        nem_time,
        ChannelKind::FeedIn,
        kwh,
        -(kwh * per_kwh),
        -per_kwh,
    )
}

/// A full day of 5-minute import readings at a flat price.
pub fn flat_price_day(date: &str, kwh_per_interval: f64, per_kwh: f64) -> Vec<RawReading> {
    let mut readings = Vec::new();
    for hour in 0..24 {
        for slot in 0..12 {
            let nem_time = format!("{date}T{hour:02}:{:02}:00+10:00", slot * 5);
            readings.push(import_reading(date, &nem_time, kwh_per_interval, per_kwh));
        }
    }
    readings
}
