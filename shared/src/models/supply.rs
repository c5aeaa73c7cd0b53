//! Purchased raw-material lots ("insumos")

use serde::{Deserialize, Serialize};

use crate::types::SupplyId;

/// A purchased lot of a raw material.
///
/// Derived fields are fixed at creation; a supply is never edited, only
/// removed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Supply {
    pub id: SupplyId,
    pub name: String,
    pub original_quantity: f64,
    pub original_unit: String,
    pub total_price: f64,
    /// `original_quantity` expressed in `converted_unit`
    pub converted_quantity: f64,
    pub converted_unit: String,
    /// Price per base unit; non-finite when `converted_quantity` is zero
    pub unit_cost: f64,
}

impl Supply {
    /// Cost of `required_quantity` base units of this supply
    pub fn cost_of(&self, required_quantity: f64) -> f64 {
        required_quantity * self.unit_cost
    }
}
