//! Battery behavior inference and scoring.
//!
//! No battery telemetry is available, so everything here is inferred from
//! grid import/export patterns: the battery is assumed to be charging
//! when a solar-hours interval shows no meaningful grid flow on either
//! side, and discharging when a non-solar interval shows no meaningful
//! import. The optimal schedule is a greedy capacity-bounded fill of the
//! day's best-priced intervals; round-trip losses are not modeled.

use super::round_to;
use super::types::{
    BatteryDayAnalysis, BatteryErrorInterval, BatteryErrorKind, DailySummary, Interval,
};
use crate::config::BatterySection;

/// Persisted error intervals are capped per day for storage economy. The
/// missed-savings total is always taken over the full set.
const MAX_ERROR_INTERVALS: usize = 20;

/// Analyzes every day's battery behavior. One verdict per input day, in
/// input order.
pub fn battery_analysis(days: &[DailySummary], cfg: &BatterySection) -> Vec<BatteryDayAnalysis> {
    days.iter().map(|day| analyze_day(day, cfg)).collect()
}

/// Analyzes a single day: optimal schedule value, deviation errors, and
/// the 0-100 score.
///
/// A day with no intervals yields zero savings, empty errors, and the
/// vacuous score of 100.
pub fn analyze_day(day: &DailySummary, cfg: &BatterySection) -> BatteryDayAnalysis {
    let intervals = &day.intervals;

    let (discharge_kwh, discharge_value) = optimal_discharge(intervals, cfg);
    let (charge_kwh, charge_cost) = optimal_charge(intervals, cfg);
    let optimal_savings = discharge_value - charge_cost;

    let tol = cfg.flow_tolerance_kwh;
    let mut error_intervals = Vec::new();
    let mut missed_savings = 0.0;
    let mut charge_intervals = 0;
    let mut discharge_intervals = 0;
    let mut idle_intervals = 0;
    let mut expensive = 0_usize;
    let mut covered = 0_usize;

    for iv in intervals {
        // High price + meaningful import: the battery should have discharged.
        if iv.import_price > cfg.price_threshold && iv.import_kwh > tol {
            let saving = round_to(
                iv.import_kwh * (iv.import_price - cfg.discharge_floor_price),
                2,
            );
            missed_savings += saving;
            error_intervals.push(BatteryErrorInterval {
                nem_time: iv.nem_time.clone(),
                hour: iv.hour,
                import_kwh: round_to(iv.import_kwh, 3),
                price: round_to(iv.import_price, 2),
                kind: BatteryErrorKind::HighImport,
                potential_saving: saving,
            });
        }

        // Negative price + meaningful export: the battery should have
        // absorbed the power instead. Uses the interval's (negative)
        // import price, not a separate charge-opportunity price.
        if iv.import_price < 0.0 && iv.export_kwh > tol {
            let saving = round_to(iv.export_kwh * iv.import_price.abs(), 2);
            missed_savings += saving;
            error_intervals.push(BatteryErrorInterval {
                nem_time: iv.nem_time.clone(),
                hour: iv.hour,
                import_kwh: round_to(iv.export_kwh, 3),
                price: round_to(iv.import_price, 2),
                kind: BatteryErrorKind::LowExport,
                potential_saving: saving,
            });
        }

        // Three-state behavior inference from grid flow alone.
        let solar_hour = iv.hour >= cfg.solar_start_hour && iv.hour < cfg.solar_end_hour;
        if solar_hour && iv.export_kwh < tol && iv.import_kwh < tol {
            charge_intervals += 1;
        } else if !solar_hour && iv.import_kwh < tol {
            discharge_intervals += 1;
        } else {
            idle_intervals += 1;
        }

        if iv.import_price > cfg.price_threshold {
            expensive += 1;
            if iv.import_kwh < tol {
                covered += 1;
            }
        }
    }

    // Share of expensive intervals where the battery appears to have
    // covered load. Vacuously 100 when the day had none.
    let score = if expensive > 0 {
        (covered as f64 / expensive as f64 * 100.0).round() as u32
    } else {
        100
    };

    error_intervals.truncate(MAX_ERROR_INTERVALS);

    BatteryDayAnalysis {
        date: day.date.clone(),
        score,
        optimal_savings: round_to(optimal_savings, 2),
        actual_behavior: round_to(day.import_cost, 2),
        missed_savings: round_to(missed_savings, 2),
        error_intervals,
        charge_intervals,
        discharge_intervals,
        idle_intervals,
        optimal_charge_price: if charge_kwh > 0.0 {
            round_to(charge_cost / charge_kwh, 2)
        } else {
            0.0
        },
        optimal_discharge_price: if discharge_kwh > 0.0 {
            round_to(discharge_value / discharge_kwh, 2)
        } else {
            0.0
        },
    }
}

/// Greedy optimal discharge: fill the highest-priced intervals first,
/// bounded by each interval's observed import (the load the discharge
/// could have served) or the quantum when no import was observed, until
/// capacity is reached. Returns `(volume, value)`.
fn optimal_discharge(intervals: &[Interval], cfg: &BatterySection) -> (f64, f64) {
    let mut sorted: Vec<&Interval> = intervals.iter().collect();
    sorted.sort_by(|a, b| b.import_price.total_cmp(&a.import_price));

    let mut volume = 0.0;
    let mut value = 0.0;
    for iv in sorted {
        if volume >= cfg.capacity_kwh {
            break;
        }
        let demand = if iv.import_kwh > 0.0 {
            iv.import_kwh
        } else {
            cfg.quantum_kwh
        };
        let discharge = demand.min(cfg.capacity_kwh - volume);
        if discharge > 0.0 {
            volume += discharge;
            value += discharge * iv.import_price;
        }
    }
    (volume, value)
}

/// Greedy optimal charge: fill the cheapest intervals at the fixed
/// quantum (charging quantity is a policy choice, not an observed one)
/// until capacity is reached. Returns `(volume, cost)`.
fn optimal_charge(intervals: &[Interval], cfg: &BatterySection) -> (f64, f64) {
    let mut sorted: Vec<&Interval> = intervals.iter().collect();
    sorted.sort_by(|a, b| a.import_price.total_cmp(&b.import_price));

    let mut volume = 0.0;
    let mut cost = 0.0;
    for iv in sorted {
        if volume >= cfg.capacity_kwh {
            break;
        }
        let charge = cfg.quantum_kwh.min(cfg.capacity_kwh - volume);
        volume += charge;
        cost += charge * iv.import_price;
    }
    (volume, cost)
}
