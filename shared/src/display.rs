//! Rounded views of calculator records for display
//!
//! The engine keeps full-precision floats. Currency is shown with 2 decimal
//! places and per-unit prices with 4.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use crate::models::{CostBreakdown, IngredientDetail, Supply};
use crate::types::SupplyId;
use crate::units::UnitCatalog;

pub const CURRENCY_DECIMALS: u32 = 2;
pub const UNIT_PRICE_DECIMALS: u32 = 4;

/// Round a float for display with exactly `decimals` places; `None` for
/// NaN or infinite values
pub fn round_for_display(value: f64, decimals: u32) -> Option<Decimal> {
    Decimal::from_f64_retain(value).map(|d| {
        let mut rounded =
            d.round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero);
        // Pad short values so 2.0 renders as "2.00"
        rounded.rescale(decimals);
        rounded
    })
}

pub fn currency(value: f64) -> Option<Decimal> {
    round_for_display(value, CURRENCY_DECIMALS)
}

pub fn unit_price(value: f64) -> Option<Decimal> {
    round_for_display(value, UNIT_PRICE_DECIMALS)
}

/// Supply table row
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SupplyView {
    pub id: SupplyId,
    pub name: String,
    pub original_quantity: f64,
    pub original_unit_name: String,
    pub total_price: Option<Decimal>,
    pub converted_quantity: Option<Decimal>,
    pub converted_unit: String,
    pub unit_cost: Option<Decimal>,
}

impl SupplyView {
    pub fn new(supply: &Supply, catalog: &UnitCatalog) -> Self {
        Self {
            id: supply.id,
            name: supply.name.clone(),
            original_quantity: supply.original_quantity,
            original_unit_name: catalog.display_name(&supply.original_unit).to_string(),
            total_price: currency(supply.total_price),
            converted_quantity: round_for_display(supply.converted_quantity, 2),
            converted_unit: supply.converted_unit.clone(),
            unit_cost: unit_price(supply.unit_cost),
        }
    }
}

/// Ingredient row of the results table
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct IngredientView {
    pub name: String,
    pub quantity: f64,
    pub unit: String,
    pub unit_price: Option<Decimal>,
    pub total: Option<Decimal>,
}

impl From<&IngredientDetail> for IngredientView {
    fn from(detail: &IngredientDetail) -> Self {
        Self {
            name: detail.name.clone(),
            quantity: detail.quantity,
            unit: detail.unit.clone(),
            unit_price: unit_price(detail.unit_price),
            total: currency(detail.total),
        }
    }
}

/// Results panel of one calculation
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct BreakdownView {
    pub product_name: String,
    pub order_quantity: u32,
    pub ingredient_subtotal: Option<Decimal>,
    pub expense_total: Option<Decimal>,
    pub base_subtotal: Option<Decimal>,
    pub waste_amount: Option<Decimal>,
    pub fixed_costs_amount: Option<Decimal>,
    pub labor_amount: Option<Decimal>,
    pub unit_cost: Option<Decimal>,
    pub order_total: Option<Decimal>,
    pub ingredients: Vec<IngredientView>,
    /// `dd/mm/yyyy`
    pub date: String,
}

impl From<&CostBreakdown> for BreakdownView {
    fn from(breakdown: &CostBreakdown) -> Self {
        Self {
            product_name: breakdown.product_name.clone(),
            order_quantity: breakdown.order_quantity,
            ingredient_subtotal: currency(breakdown.ingredient_subtotal),
            expense_total: currency(breakdown.expense_total),
            base_subtotal: currency(breakdown.base_subtotal),
            waste_amount: currency(breakdown.waste_amount),
            fixed_costs_amount: currency(breakdown.fixed_costs_amount),
            labor_amount: currency(breakdown.labor_amount),
            unit_cost: currency(breakdown.unit_cost),
            order_total: currency(breakdown.order_total),
            ingredients: breakdown.ingredients.iter().map(IngredientView::from).collect(),
            date: breakdown.created_at.format("%d/%m/%Y").to_string(),
        }
    }
}
