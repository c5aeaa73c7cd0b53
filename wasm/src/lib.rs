//! WebAssembly module for the cost calculator
//!
//! Provides the browser front end with:
//! - Supply intake with unit conversion
//! - Recipe costing with layered overhead
//! - Calculation history
//!
//! Form inputs are validated here before they reach the engine. Records
//! cross the boundary as JSON strings; identifiers as plain numbers.

pub mod logging;

use cost_calculator_shared::display::{BreakdownView, SupplyView};
use cost_calculator_shared::{
    validate_calculation, validate_supply, CalculationRequest, CalculatorError,
    CalculatorResult, CalculatorSettings, CostEngine, HistoryId, Supply, SupplyId, UnitCatalog,
};
use wasm_bindgen::prelude::*;

// Re-export shared types for Rust callers
pub use cost_calculator_shared as shared;

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    logging::init(&CalculatorSettings::default().log_level);
}

fn to_js_error(err: CalculatorError) -> JsValue {
    tracing::warn!(code = err.code(), "{}", err);
    js_sys::Error::new(&err.message_es()).into()
}

/// Identifiers arrive as JS numbers; anything but a non-negative integer
/// matches no record
fn whole_id(id: f64) -> Option<u64> {
    if !id.is_finite() || id < 0.0 || id.fract() != 0.0 || id > u64::MAX as f64 {
        return None;
    }
    Some(id as u64)
}

fn supply_id(id: f64) -> Option<SupplyId> {
    whole_id(id).map(SupplyId)
}

fn history_id(id: f64) -> Option<HistoryId> {
    whole_id(id).map(HistoryId)
}

/// Calculator session held by the page
#[wasm_bindgen]
pub struct CostCalculator {
    engine: CostEngine,
    settings: CalculatorSettings,
}

impl Default for CostCalculator {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl CostCalculator {
    #[wasm_bindgen(constructor)]
    pub fn new() -> CostCalculator {
        Self::from_settings(CalculatorSettings::default())
    }

    /// Create a session from a JSON settings document
    #[wasm_bindgen(js_name = withSettings)]
    pub fn with_settings(json: &str) -> Result<CostCalculator, JsValue> {
        CalculatorSettings::from_json(json)
            .map(Self::from_settings)
            .map_err(to_js_error)
    }

    /// Form defaults: percentages and order quantity
    #[wasm_bindgen(js_name = formDefaults)]
    pub fn form_defaults_js(&self) -> Result<String, JsValue> {
        self.form_defaults().map_err(to_js_error)
    }

    #[wasm_bindgen(js_name = addSupply)]
    pub fn add_supply_js(
        &mut self,
        name: &str,
        quantity: f64,
        unit: &str,
        price: f64,
    ) -> Result<String, JsValue> {
        self.add_supply(name, quantity, unit, price)
            .and_then(|supply| Ok(serde_json::to_string(&supply)?))
            .map_err(to_js_error)
    }

    #[wasm_bindgen(js_name = listSupplies)]
    pub fn list_supplies_js(&self) -> Result<String, JsValue> {
        self.list_supplies().map_err(to_js_error)
    }

    /// Supplies rounded for the table
    #[wasm_bindgen(js_name = supplyTable)]
    pub fn supply_table_js(&self) -> Result<String, JsValue> {
        self.supply_table().map_err(to_js_error)
    }

    #[wasm_bindgen(js_name = removeSupply)]
    pub fn remove_supply(&mut self, id: f64) {
        if let Some(id) = supply_id(id) {
            self.engine.remove_supply(id);
        }
    }

    /// Preview cost of an ingredient line; 0 for an unknown supply
    #[wasm_bindgen(js_name = lineCost)]
    pub fn line_cost(&self, supply: f64, quantity: f64) -> f64 {
        supply_id(supply)
            .map(|id| self.engine.cost_of_line(id, quantity))
            .unwrap_or(0.0)
    }

    /// Cost a JSON `CalculationRequest` and return the breakdown. Lines
    /// naming a deleted supply are skipped by the engine.
    #[wasm_bindgen(js_name = calculate)]
    pub fn calculate_js(&mut self, request_json: &str) -> Result<String, JsValue> {
        self.calculate(request_json).map_err(to_js_error)
    }

    /// Rounded results panel for the current calculation
    #[wasm_bindgen(js_name = currentResults)]
    pub fn current_results_js(&self) -> Result<String, JsValue> {
        self.current_results().map_err(to_js_error)
    }

    /// Save the current calculation; returns the history entry id
    #[wasm_bindgen(js_name = saveCalculation)]
    pub fn save_calculation_js(&mut self) -> Result<f64, JsValue> {
        self.save_calculation()
            .map(|id| id.0 as f64)
            .map_err(to_js_error)
    }

    #[wasm_bindgen(js_name = listHistory)]
    pub fn list_history_js(&self) -> Result<String, JsValue> {
        self.list_history().map_err(to_js_error)
    }

    #[wasm_bindgen(js_name = removeHistoryEntry)]
    pub fn remove_history_entry(&mut self, id: f64) {
        if let Some(id) = history_id(id) {
            self.engine.remove_history_entry(id);
        }
    }

    #[wasm_bindgen(js_name = clearHistory)]
    pub fn clear_history(&mut self) {
        self.engine.clear_history();
    }
}

impl CostCalculator {
    pub fn from_settings(settings: CalculatorSettings) -> Self {
        Self {
            engine: CostEngine::new(),
            settings,
        }
    }

    pub fn engine(&self) -> &CostEngine {
        &self.engine
    }

    pub fn form_defaults(&self) -> CalculatorResult<String> {
        Ok(serde_json::to_string(&serde_json::json!({
            "percentages": self.settings.percentages,
            "order_quantity": self.settings.default_order_quantity,
        }))?)
    }

    pub fn add_supply(
        &mut self,
        name: &str,
        quantity: f64,
        unit: &str,
        price: f64,
    ) -> CalculatorResult<Supply> {
        validate_supply(self.engine.catalog(), name, quantity, unit, price)?;
        Ok(self.engine.add_supply(name, quantity, unit, price))
    }

    pub fn list_supplies(&self) -> CalculatorResult<String> {
        Ok(serde_json::to_string(self.engine.list_supplies())?)
    }

    pub fn supply_table(&self) -> CalculatorResult<String> {
        let catalog = self.engine.catalog();
        let rows: Vec<SupplyView> = self
            .engine
            .list_supplies()
            .iter()
            .map(|supply| SupplyView::new(supply, catalog))
            .collect();
        Ok(serde_json::to_string(&rows)?)
    }

    pub fn calculate(&mut self, request_json: &str) -> CalculatorResult<String> {
        let request: CalculationRequest = serde_json::from_str(request_json)?;
        validate_calculation(&request)?;
        let breakdown = self.engine.calculate(&request);
        Ok(serde_json::to_string(&breakdown)?)
    }

    pub fn current_results(&self) -> CalculatorResult<String> {
        let current = self
            .engine
            .current_calculation()
            .ok_or(CalculatorError::NoCurrentCalculation)?;
        Ok(serde_json::to_string(&BreakdownView::from(current))?)
    }

    pub fn save_calculation(&mut self) -> CalculatorResult<HistoryId> {
        self.engine
            .commit_current_to_history()
            .ok_or(CalculatorError::NoCurrentCalculation)
    }

    pub fn list_history(&self) -> CalculatorResult<String> {
        Ok(serde_json::to_string(self.engine.list_history())?)
    }
}

/// Supported units as JSON, in dropdown order
#[wasm_bindgen(js_name = unitCatalog)]
pub fn unit_catalog() -> String {
    serde_json::to_string(UnitCatalog::default().units()).unwrap_or_else(|_| "[]".to_string())
}

/// Convert a quantity to its base unit; unknown units give `{quantity: 0, unit: ""}`
#[wasm_bindgen(js_name = toBaseUnit)]
pub fn to_base_unit(quantity: f64, unit: &str) -> String {
    let converted = UnitCatalog::default().to_base_unit(quantity, unit);
    serde_json::to_string(&converted).unwrap_or_else(|_| r#"{"quantity":0,"unit":""}"#.to_string())
}
