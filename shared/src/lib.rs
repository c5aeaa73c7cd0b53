//! Cost calculator core for small producers
//!
//! Records raw-material purchases, converts them to base units and costs
//! product orders from a recipe plus layered overhead percentages. Shared
//! by the browser bindings (via WASM) and any other front end.

pub mod config;
pub mod display;
pub mod engine;
pub mod error;
pub mod models;
pub mod types;
pub mod units;
pub mod validation;

pub use self::config::CalculatorSettings;
pub use engine::CostEngine;
pub use error::{CalculatorError, CalculatorResult};
pub use models::*;
pub use types::*;
pub use units::{BaseQuantity, Unit, UnitCatalog, UnitCategory, STANDARD_UNITS};
pub use validation::*;
