//! Calculator settings
//!
//! Layered loading:
//! 1. Default values in code
//! 2. Optional `config/calculator` file (toml, json, ...)
//! 3. Environment variable overrides with COSTOS_ prefix

use config::{Environment, File, FileFormat};
use serde::Deserialize;

use crate::error::{CalculatorError, CalculatorResult};
use crate::models::Percentages;

/// Settings the presentation layer pre-populates its forms with
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct CalculatorSettings {
    /// Default overhead percentages
    pub percentages: Percentages,

    /// Default order quantity for a new calculation
    pub default_order_quantity: u32,

    /// Log filter directive, e.g. `info` or `cost_calculator_shared=debug`
    pub log_level: String,
}

impl CalculatorSettings {
    /// Load from code defaults, the optional config file and the environment
    pub fn load() -> CalculatorResult<Self> {
        let builder = Self::defaults()?
            .add_source(File::with_name("config/calculator").required(false))
            .add_source(
                Environment::with_prefix("COSTOS")
                    .separator("__")
                    .try_parsing(true),
            );
        Self::finish(builder)
    }

    /// Load from code defaults overlaid with an in-memory JSON document
    pub fn from_json(json: &str) -> CalculatorResult<Self> {
        let builder = Self::defaults()?.add_source(File::from_str(json, FileFormat::Json));
        Self::finish(builder)
    }

    fn defaults() -> CalculatorResult<config::ConfigBuilder<config::builder::DefaultState>> {
        Ok(config::Config::builder()
            .set_default("percentages.waste", Percentages::DEFAULT_WASTE)?
            .set_default("percentages.fixed_costs", Percentages::DEFAULT_FIXED_COSTS)?
            .set_default("percentages.labor", Percentages::DEFAULT_LABOR)?
            .set_default("default_order_quantity", 1)?
            .set_default("log_level", "info")?)
    }

    fn finish(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> CalculatorResult<Self> {
        let settings: Self = builder.build()?.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> CalculatorResult<()> {
        let Percentages {
            waste,
            fixed_costs,
            labor,
        } = self.percentages;
        for (name, value) in [("waste", waste), ("fixed_costs", fixed_costs), ("labor", labor)] {
            if !value.is_finite() || value < 0.0 {
                return Err(CalculatorError::InvalidSetting(format!(
                    "percentages.{} must be a non-negative number",
                    name
                )));
            }
        }
        if self.default_order_quantity == 0 {
            return Err(CalculatorError::InvalidSetting(
                "default_order_quantity must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for CalculatorSettings {
    fn default() -> Self {
        Self {
            percentages: Percentages::default(),
            default_order_quantity: 1,
            log_level: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_json_gives_defaults() {
        let settings = CalculatorSettings::from_json("{}").unwrap();
        assert_eq!(settings, CalculatorSettings::default());
    }

    #[test]
    fn test_load_without_file_gives_defaults() {
        let settings = CalculatorSettings::load().unwrap();
        assert_eq!(settings.default_order_quantity, 1);
        assert_eq!(settings.percentages, Percentages::default());
    }

    #[test]
    fn test_json_overrides_single_percentage() {
        let settings =
            CalculatorSettings::from_json(r#"{"percentages": {"labor": 35}}"#).unwrap();
        assert_eq!(settings.percentages.waste, 10.0);
        assert_eq!(settings.percentages.fixed_costs, 20.0);
        assert_eq!(settings.percentages.labor, 35.0);
    }

    #[test]
    fn test_negative_percentage_rejected() {
        let err = CalculatorSettings::from_json(r#"{"percentages": {"waste": -5}}"#).unwrap_err();
        assert_eq!(err.code(), "CONFIGURATION_ERROR");
    }

    #[test]
    fn test_zero_order_quantity_rejected() {
        assert!(CalculatorSettings::from_json(r#"{"default_order_quantity": 0}"#).is_err());
    }

    #[test]
    fn test_malformed_json_rejected() {
        let err = CalculatorSettings::from_json("{ nope").unwrap_err();
        assert!(matches!(err, CalculatorError::Configuration(_)));
    }
}
