//! Error handling for the cost calculator
//!
//! Engine operations never fail; these errors come from intake validation,
//! settings and the JSON boundary.

use thiserror::Error;

use crate::validation::ValidationError;

/// Calculator error types
#[derive(Error, Debug)]
pub enum CalculatorError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("No calculation to save")]
    NoCurrentCalculation,

    #[error("Invalid JSON: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Configuration(#[from] config::ConfigError),

    #[error("Invalid setting: {0}")]
    InvalidSetting(String),
}

impl CalculatorError {
    /// Stable code for the presentation layer
    pub fn code(&self) -> &'static str {
        match self {
            CalculatorError::Validation(_) => "VALIDATION_ERROR",
            CalculatorError::NoCurrentCalculation => "NO_CURRENT_CALCULATION",
            CalculatorError::Serialization(_) => "SERIALIZATION_ERROR",
            CalculatorError::Configuration(_) | CalculatorError::InvalidSetting(_) => {
                "CONFIGURATION_ERROR"
            }
        }
    }

    /// User-facing message in Spanish
    pub fn message_es(&self) -> String {
        match self {
            CalculatorError::Validation(err) => err.message_es(),
            CalculatorError::NoCurrentCalculation => {
                "Primero debes realizar un cálculo".to_string()
            }
            CalculatorError::Serialization(err) => format!("Datos inválidos: {}", err),
            CalculatorError::Configuration(err) => {
                format!("Error en la configuración: {}", err)
            }
            CalculatorError::InvalidSetting(msg) => {
                format!("Error en la configuración: {}", msg)
            }
        }
    }
}

/// Result type alias for calculator operations
pub type CalculatorResult<T> = Result<T, CalculatorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_converts() {
        let err: CalculatorError = ValidationError::NoIngredients.into();
        assert_eq!(err.code(), "VALIDATION_ERROR");
        assert_eq!(err.message_es(), "Debes añadir al menos un ingrediente");
    }

    #[test]
    fn test_no_current_calculation_message() {
        let err = CalculatorError::NoCurrentCalculation;
        assert_eq!(err.code(), "NO_CURRENT_CALCULATION");
        assert_eq!(err.message_es(), "Primero debes realizar un cálculo");
    }

    #[test]
    fn test_serialization_error_converts() {
        let parse: Result<u32, _> = serde_json::from_str("not json");
        let err: CalculatorError = parse.unwrap_err().into();
        assert_eq!(err.code(), "SERIALIZATION_ERROR");
    }
}
