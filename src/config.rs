//! TOML-based analysis configuration.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::Deserialize;

/// Top-level analysis configuration parsed from TOML.
///
/// All fields default to the reference installation's constants. Load
/// from TOML with [`AnalysisConfig::from_toml_file`] or use
/// [`AnalysisConfig::default`] directly.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisConfig {
    /// Battery behavior analysis parameters.
    pub battery: BatterySection,
    /// Flat-tariff counterfactual rates.
    pub tariff: TariffSection,
}

/// Battery behavior analysis parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BatterySection {
    /// Usable battery capacity (kWh).
    pub capacity_kwh: f64,
    /// Charge/discharge quantum per 5-minute interval (kWh), used when
    /// an interval carried no observable import.
    pub quantum_kwh: f64,
    /// Import price above which an interval counts as expensive (c/kWh).
    pub price_threshold: f64,
    /// Assumed forgone discharge price when flagging high-price import
    /// errors (c/kWh).
    pub discharge_floor_price: f64,
    /// Grid flow below this magnitude counts as "no meaningful flow" (kWh).
    pub flow_tolerance_kwh: f64,
    /// First hour of the solar window (inclusive).
    pub solar_start_hour: u32,
    /// End hour of the solar window (exclusive).
    pub solar_end_hour: u32,
}

impl Default for BatterySection {
    fn default() -> Self {
        Self {
            capacity_kwh: 12.8,
            quantum_kwh: 0.4,
            price_threshold: 30.0,
            discharge_floor_price: 5.0,
            flow_tolerance_kwh: 0.05,
            solar_start_hour: 6,
            solar_end_hour: 18,
        }
    }
}

/// Flat-tariff counterfactual rates.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TariffSection {
    /// Flat import rate (c/kWh).
    pub flat_import_rate: f64,
    /// Flat export rate (c/kWh).
    pub flat_export_rate: f64,
}

impl Default for TariffSection {
    fn default() -> Self {
        Self {
            flat_import_rate: 30.0,
            flat_export_rate: 5.0,
        }
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug)]
pub struct ConfigError {
    /// Dotted field path (e.g., `"battery.capacity_kwh"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "config error: {} — {}", self.field, self.message)
    }
}

impl AnalysisConfig {
    /// Parses a configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is
    /// invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError {
            field: "config".to_string(),
            message: format!("cannot read \"{}\": {e}", path.display()),
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown
    /// fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError {
            field: "toml".to_string(),
            message: e.to_string(),
        })
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        let b = &self.battery;

        if b.capacity_kwh <= 0.0 {
            errors.push(ConfigError {
                field: "battery.capacity_kwh".into(),
                message: "must be > 0".into(),
            });
        }
        if b.quantum_kwh <= 0.0 {
            errors.push(ConfigError {
                field: "battery.quantum_kwh".into(),
                message: "must be > 0".into(),
            });
        }
        if b.flow_tolerance_kwh < 0.0 {
            errors.push(ConfigError {
                field: "battery.flow_tolerance_kwh".into(),
                message: "must be >= 0".into(),
            });
        }
        if b.solar_start_hour >= b.solar_end_hour {
            errors.push(ConfigError {
                field: "battery.solar_start_hour".into(),
                message: "must be < battery.solar_end_hour".into(),
            });
        }
        if b.solar_end_hour > 24 {
            errors.push(ConfigError {
                field: "battery.solar_end_hour".into(),
                message: "must be <= 24".into(),
            });
        }

        let t = &self.tariff;
        if t.flat_import_rate < 0.0 {
            errors.push(ConfigError {
                field: "tariff.flat_import_rate".into(),
                message: "must be >= 0".into(),
            });
        }
        if t.flat_export_rate < 0.0 {
            errors.push(ConfigError {
                field: "tariff.flat_export_rate".into(),
                message: "must be >= 0".into(),
            });
        }

        errors
    }
}
