//! End-to-end tests for the full analytics pipeline.

mod common;

use energy_insights::analysis;
use energy_insights::analysis::types::{BatteryErrorKind, ChannelKind};

use common::{default_config, export_reading, flat_price_day, import_reading, reading};

#[test]
fn worked_example_expensive_morning_interval() {
    // Two readings for 2024-01-01 05:00 — import 0.5 kWh at 45c, export 0 kWh
    let readings = vec![
        import_reading("2024-01-01", "2024-01-01T05:00:00+10:00", 0.5, 45.0),
        export_reading("2024-01-01", "2024-01-01T05:00:00+10:00", 0.0, 5.0),
    ];
    let output = analysis::run(&readings, &default_config());

    assert_eq!(output.daily_summaries.len(), 1);
    let day = &output.daily_summaries[0];
    assert_eq!(day.intervals.len(), 1);
    let iv = &day.intervals[0];
    assert_eq!(iv.import_kwh, 0.5);
    assert_eq!(iv.import_price, 45.0);
    assert_eq!(iv.export_kwh, 0.0);

    assert_eq!(day.import_cost, 22.5);
    assert_eq!(day.net_cost, 22.5);
    assert_eq!(day.avg_import_price, 45.0);
    assert_eq!(day.peak_import_price, 45.0);

    // 45c > 30c threshold with 0.5 kWh > 0.05 tolerance
    let verdict = &output.battery_analysis[0];
    assert_eq!(verdict.error_intervals.len(), 1);
    assert_eq!(verdict.error_intervals[0].kind, BatteryErrorKind::HighImport);
    assert_eq!(verdict.error_intervals[0].potential_saving, 20.0);
    assert_eq!(verdict.missed_savings, 20.0);
    // The sole expensive interval had heavy import
    assert_eq!(verdict.score, 0);
}

#[test]
fn worked_example_cheap_day_scores_vacuous_100() {
    // No interval ever prices above the 30c threshold
    let readings = flat_price_day("2024-01-01", 0.3, 22.0);
    let output = analysis::run(&readings, &default_config());

    let verdict = &output.battery_analysis[0];
    assert_eq!(verdict.score, 100);
    assert!(verdict.error_intervals.is_empty());
    assert_eq!(verdict.missed_savings, 0.0);
}

#[test]
fn daily_totals_match_interval_sums_within_tolerance() {
    let mut readings = flat_price_day("2024-01-01", 0.137, 24.5);
    readings.extend(flat_price_day("2024-01-02", 0.201, 18.0));
    let output = analysis::run(&readings, &default_config());

    for day in &output.daily_summaries {
        let kwh_sum: f64 = day.intervals.iter().map(|iv| iv.import_kwh).sum();
        assert!(
            (kwh_sum - day.import_kwh).abs() < 0.001,
            "interval energies should sum to the daily total on {}",
            day.date
        );
    }
}

#[test]
fn net_cost_identity_holds_everywhere() {
    let mut readings = flat_price_day("2024-01-01", 0.3, 28.0);
    readings.push(export_reading("2024-01-01", "2024-01-01T12:02:00+10:00", 1.5, 6.0));
    readings.extend(flat_price_day("2024-02-01", 0.2, 31.0));
    let output = analysis::run(&readings, &default_config());

    for day in &output.daily_summaries {
        assert_eq!(day.net_cost, day.import_cost - day.export_revenue);
    }
    for month in &output.monthly_summaries {
        assert_eq!(month.net_cost, month.import_cost - month.export_revenue);
    }
}

#[test]
fn zero_energy_sides_have_zero_average_price() {
    // Import-only day: export average must be 0, and vice versa
    let readings = vec![
        import_reading("2024-01-01", "2024-01-01T10:00:00+10:00", 0.5, 20.0),
        export_reading("2024-01-02", "2024-01-02T10:00:00+10:00", 0.5, 6.0),
    ];
    let output = analysis::run(&readings, &default_config());

    let day1 = &output.daily_summaries[0];
    assert_eq!(day1.avg_export_price, 0.0);
    let day2 = &output.daily_summaries[1];
    assert_eq!(day2.import_kwh, 0.0);
    assert_eq!(day2.avg_import_price, 0.0);
}

#[test]
fn battery_scores_stay_in_bounds() {
    let mut readings = flat_price_day("2024-01-01", 0.4, 45.0);
    readings.extend(flat_price_day("2024-01-02", 0.01, 45.0));
    readings.extend(flat_price_day("2024-01-03", 0.3, 10.0));
    let output = analysis::run(&readings, &default_config());

    for verdict in &output.battery_analysis {
        assert!(verdict.score <= 100, "score out of range on {}", verdict.date);
        assert!(verdict.missed_savings >= 0.0);
    }
    // Heavy import at 45c all day: every expensive interval uncovered
    assert_eq!(output.battery_analysis[0].score, 0);
    // Near-zero import at 45c all day: every expensive interval covered
    assert_eq!(output.battery_analysis[1].score, 100);
    // Never expensive: vacuously perfect
    assert_eq!(output.battery_analysis[2].score, 100);
}

#[test]
fn optimal_savings_bounded_by_capacity_times_price_spread() {
    // 288 intervals of 1 kWh at 50c: the greedy discharge cannot bank
    // more than capacity * peak price
    let readings = flat_price_day("2024-01-01", 1.0, 50.0);
    let cfg = default_config();
    let output = analysis::run(&readings, &cfg);

    let verdict = &output.battery_analysis[0];
    let ceiling = cfg.battery.capacity_kwh * 50.0;
    assert!(
        verdict.optimal_savings <= ceiling,
        "optimal savings {} exceeds discharge ceiling {}",
        verdict.optimal_savings,
        ceiling
    );
    assert_eq!(verdict.optimal_discharge_price, 50.0);
    assert_eq!(verdict.optimal_charge_price, 50.0);
}

#[test]
fn price_bucket_counts_cover_every_import_reading() {
    let mut readings = flat_price_day("2024-01-01", 0.2, 27.3);
    readings.push(import_reading("2024-01-02", "2024-01-02T00:05:00+10:00", 0.1, -42.0));
    readings.push(import_reading("2024-01-02", "2024-01-02T00:10:00+10:00", 0.1, 300.0));
    readings.push(export_reading("2024-01-02", "2024-01-02T12:00:00+10:00", 1.0, 5.0));
    let output = analysis::run(&readings, &default_config());

    let import_count = readings
        .iter()
        .filter(|r| r.channel_type == ChannelKind::General)
        .count();
    let bucketed: usize = output.price_distribution.iter().map(|b| b.count).sum();
    assert_eq!(bucketed, import_count);
}

#[test]
fn rerun_produces_identical_output() {
    let mut readings = flat_price_day("2024-01-01", 0.31, 24.0);
    readings.extend(flat_price_day("2024-01-02", 0.27, 33.5));
    readings.push(export_reading("2024-01-01", "2024-01-01T13:00:00+10:00", 1.1, 7.0));
    let cfg = default_config();

    let out1 = analysis::run(&readings, &cfg);
    let out2 = analysis::run(&readings, &cfg);

    let ser = |o: &analysis::PipelineOutput| {
        (
            serde_json::to_string(&o.daily_summaries),
            serde_json::to_string(&o.monthly_summaries),
            serde_json::to_string(&o.battery_analysis),
            serde_json::to_string(&o.price_distribution),
            serde_json::to_string(&o.hour_day_prices),
            serde_json::to_string(&o.period_summaries),
            serde_json::to_string(&o.overall_stats),
        )
    };
    let a = ser(&out1);
    let b = ser(&out2);
    assert_eq!(a.0.ok(), b.0.ok());
    assert_eq!(a.1.ok(), b.1.ok());
    assert_eq!(a.2.ok(), b.2.ok());
    assert_eq!(a.3.ok(), b.3.ok());
    assert_eq!(a.4.ok(), b.4.ok());
    assert_eq!(a.5.ok(), b.5.ok());
    assert_eq!(a.6.ok(), b.6.ok());
}

#[test]
fn overall_stats_flat_tariff_counterfactual() {
    // One day: 2.4 kWh import at 20c (48c), no export.
    // Flat tariff: 2.4 * 30c = 72c, so wholesale saved 24c.
    let readings: Vec<_> = (0..12)
        .map(|slot| {
            import_reading(
                "2024-01-01",
                &format!("2024-01-01T10:{:02}:00+10:00", slot * 5),
                0.2,
                20.0,
            )
        })
        .collect();
    let output = analysis::run(&readings, &default_config());

    let stats = &output.overall_stats;
    assert_eq!(stats.total_import_kwh, 2.4);
    assert_eq!(stats.total_net_cost, 48.0);
    assert_eq!(stats.flat_rate_comparison.flat_net_cost, 72.0);
    assert_eq!(stats.flat_rate_comparison.savings, 24.0);
    assert_eq!(stats.total_days, 1);
    assert_eq!(stats.date_range.start, "2024-01-01");
    assert_eq!(stats.date_range.end, "2024-01-01");
}

#[test]
fn dropped_and_duplicate_counters_surface_data_quality() {
    let readings = vec![
        import_reading("2024-01-01", "2024-01-01T10:00:00+10:00", 0.5, 20.0),
        // Same key and channel twice: last write wins
        import_reading("2024-01-01", "2024-01-01T10:00:00+10:00", 0.6, 20.0),
        // No date or timestamp on either side: silently dropped
        reading("", "", ChannelKind::General, 0.5, 10.0, 20.0),
    ];
    let output = analysis::run(&readings, &default_config());
    assert_eq!(output.duplicate_channels, 1);
    assert_eq!(output.dropped_groups, 1);
    assert_eq!(output.daily_summaries[0].import_kwh, 0.6);
}

#[test]
fn tariff_period_summaries_aggregate_import_only() {
    let mut peak = import_reading("2024-01-01", "2024-01-01T18:00:00+10:00", 1.0, 40.0);
    peak.tariff_information.period = "peak".to_string();
    let mut off = import_reading("2024-01-01", "2024-01-01T02:00:00+10:00", 2.0, 10.0);
    off.tariff_information.period = "offPeak".to_string();
    let unlabeled = import_reading("2024-01-01", "2024-01-01T03:00:00+10:00", 1.0, 10.0);

    let output = analysis::run(&[peak, off, unlabeled], &default_config());
    let periods = &output.period_summaries;
    assert_eq!(periods.len(), 2);
    assert_eq!(periods[0].period, "OffPeak");
    assert_eq!(periods[0].kwh, 2.0);
    assert_eq!(periods[1].period, "Peak");
    assert_eq!(periods[1].cost, 40.0);
}

#[test]
fn hour_day_grid_only_contains_observed_cells() {
    let readings = vec![
        import_reading("2024-01-01", "2024-01-01T10:00:00+10:00", 0.5, 20.0),
        import_reading("2024-01-01", "2024-01-01T10:05:00+10:00", 0.5, 30.0),
    ];
    let output = analysis::run(&readings, &default_config());
    assert_eq!(output.hour_day_prices.len(), 1);
    let cell = &output.hour_day_prices[0];
    assert_eq!(cell.hour, 10);
    // 2024-01-01 was a Monday
    assert_eq!(cell.day_of_week, 1);
    assert_eq!(cell.avg_price, 25.0);
    assert_eq!(cell.count, 2);
}
