//! Pairs raw import/export readings that share a timestamp into merged
//! intervals.

use std::collections::BTreeMap;

use super::types::{ChannelKind, Interval, RawReading, clock_parts};

/// Result of the merge pass: intervals grouped by date plus data-quality
/// counters.
#[derive(Debug, Default)]
pub struct MergeOutcome {
    /// Merged intervals keyed by calendar date. Intervals within a date
    /// are in group-key order, not yet sorted by timestamp.
    pub by_date: BTreeMap<String, Vec<Interval>>,
    /// Groups dropped because neither channel carried a date and
    /// timestamp. A data-quality signal, not an error.
    pub dropped_groups: usize,
    /// Readings that replaced an earlier reading on the same channel for
    /// the same (date, timestamp) key. Last write wins.
    pub duplicate_channels: usize,
}

#[derive(Default)]
struct ChannelPair<'a> {
    import: Option<&'a RawReading>,
    export: Option<&'a RawReading>,
}

/// Groups readings by `(date, nemTime)` and merges each group into one
/// [`Interval`]. Pure function over the input collection.
///
/// At most one import and one export reading are kept per key; duplicates
/// on the same channel are counted and the last one wins. Export price
/// and cost are stored as absolute values regardless of the source's sign
/// convention. Descriptor, tariff period, and renewables prefer the
/// import side, falling back to the export side, then to defaults.
pub fn merge_readings(readings: &[RawReading]) -> MergeOutcome {
    let mut groups: BTreeMap<(&str, &str), ChannelPair<'_>> = BTreeMap::new();

    let mut duplicate_channels = 0;
    for record in readings {
        let pair = groups
            .entry((record.date.as_str(), record.nem_time.as_str()))
            .or_default();
        let slot = match record.channel_type {
            ChannelKind::General => &mut pair.import,
            ChannelKind::FeedIn | ChannelKind::Other => &mut pair.export,
        };
        if slot.replace(record).is_some() {
            duplicate_channels += 1;
        }
    }

    let mut by_date: BTreeMap<String, Vec<Interval>> = BTreeMap::new();
    let mut dropped_groups = 0;

    for pair in groups.values() {
        let import = pair.import;
        let export = pair.export;

        let date = import
            .map(|r| r.date.as_str())
            .filter(|d| !d.is_empty())
            .or_else(|| export.map(|r| r.date.as_str()))
            .unwrap_or("");
        let nem_time = import
            .map(|r| r.nem_time.as_str())
            .filter(|t| !t.is_empty())
            .or_else(|| export.map(|r| r.nem_time.as_str()))
            .unwrap_or("");

        if date.is_empty() || nem_time.is_empty() {
            dropped_groups += 1;
            continue;
        }

        let (hour, minute) = clock_parts(nem_time);

        let descriptor = import
            .map(|r| r.descriptor.as_str())
            .filter(|d| !d.is_empty())
            .or_else(|| export.map(|r| r.descriptor.as_str()).filter(|d| !d.is_empty()))
            .unwrap_or("neutral");
        let renewables = import
            .map(|r| r.renewables)
            .filter(|r| *r != 0.0)
            .or_else(|| export.map(|r| r.renewables))
            .unwrap_or(0.0);

        let interval = Interval {
            nem_time: nem_time.to_string(),
            hour,
            minute,
            import_kwh: import.map(|r| r.kwh).unwrap_or(0.0),
            export_kwh: export.map(|r| r.kwh).unwrap_or(0.0),
            import_price: import.map(|r| r.per_kwh).unwrap_or(0.0),
            export_price: export.map(|r| r.per_kwh.abs()).unwrap_or(0.0),
            import_cost: import.map(|r| r.cost).unwrap_or(0.0),
            export_revenue: export.map(|r| r.cost.abs()).unwrap_or(0.0),
            descriptor: descriptor.to_string(),
            spike_status: import
                .map(|r| r.spike_status.as_str())
                .filter(|s| !s.is_empty())
                .unwrap_or("none")
                .to_string(),
            period: import
                .map(|r| r.tariff_information.period.clone())
                .unwrap_or_default(),
            renewables,
        };

        by_date.entry(date.to_string()).or_default().push(interval);
    }

    MergeOutcome {
        by_date,
        dropped_groups,
        duplicate_channels,
    }
}
