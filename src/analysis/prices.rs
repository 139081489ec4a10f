//! Dataset-wide price distribution and (hour, day-of-week) price grid.

use std::collections::BTreeMap;

use super::round_to;
use super::types::{ChannelKind, HourDayPrice, PriceBucketCount, RawReading, hour_and_weekday};

/// Fixed price buckets: label, inclusive lower bound, exclusive upper
/// bound (c/kWh). Contiguous and non-overlapping; the open outer ends
/// match everything below/above.
const BUCKETS: &[(&str, f64, f64)] = &[
    ("< -10", f64::NEG_INFINITY, -10.0),
    ("-10 to 0", -10.0, 0.0),
    ("0 to 10", 0.0, 10.0),
    ("10 to 20", 10.0, 20.0),
    ("20 to 30", 20.0, 30.0),
    ("30 to 40", 30.0, 40.0),
    ("40 to 50", 40.0, 50.0),
    ("50 to 75", 50.0, 75.0),
    ("75 to 100", 75.0, 100.0),
    ("100+", 100.0, f64::INFINITY),
];

/// Finite stand-ins for the open bucket ends, for display scaling only.
const MIN_SENTINEL: f64 = -100.0;
const MAX_SENTINEL: f64 = 500.0;

/// Counts every import-channel price into its `[min, max)` bucket.
///
/// Each reading lands in exactly one bucket, so the counts sum to the
/// number of import readings in the dataset.
pub fn price_distribution(readings: &[RawReading]) -> Vec<PriceBucketCount> {
    BUCKETS
        .iter()
        .map(|&(label, min, max)| {
            let count = readings
                .iter()
                .filter(|r| r.channel_type == ChannelKind::General)
                .filter(|r| r.per_kwh >= min && r.per_kwh < max)
                .count();
            PriceBucketCount {
                bucket: label.to_string(),
                count,
                min: if min == f64::NEG_INFINITY { MIN_SENTINEL } else { min },
                max: if max == f64::INFINITY { MAX_SENTINEL } else { max },
            }
        })
        .collect()
}

/// Average import price per (hour-of-day, day-of-week) cell across the
/// whole dataset. Cells with no samples are absent; output is sorted by
/// hour then day-of-week.
pub fn hour_day_prices(readings: &[RawReading]) -> Vec<HourDayPrice> {
    let mut cells: BTreeMap<(u32, u32), (f64, usize)> = BTreeMap::new();

    for record in readings {
        if record.channel_type != ChannelKind::General {
            continue;
        }
        let Some((hour, dow)) = hour_and_weekday(&record.nem_time) else {
            continue;
        };
        let cell = cells.entry((hour, dow)).or_insert((0.0, 0));
        cell.0 += record.per_kwh;
        cell.1 += 1;
    }

    cells
        .into_iter()
        .map(|((hour, day_of_week), (sum, count))| HourDayPrice {
            hour,
            day_of_week,
            avg_price: round_to(sum / count as f64, 2),
            count,
        })
        .collect()
}
