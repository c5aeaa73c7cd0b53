//! Cost calculation requests and results

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{HistoryId, SupplyId};

/// One ingredient of a product recipe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeLine {
    pub supply_id: SupplyId,
    /// In the supply's converted (base) unit
    pub quantity: f64,
}

/// A free-form cost such as packaging or delivery
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseLine {
    pub concept: String,
    pub cost: f64,
}

/// Overhead percentages, applied in order waste, fixed costs, labor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Percentages {
    pub waste: f64,
    pub fixed_costs: f64,
    pub labor: f64,
}

impl Percentages {
    pub const DEFAULT_WASTE: f64 = 10.0;
    pub const DEFAULT_FIXED_COSTS: f64 = 20.0;
    pub const DEFAULT_LABOR: f64 = 50.0;

    pub fn new(waste: f64, fixed_costs: f64, labor: f64) -> Self {
        Self {
            waste,
            fixed_costs,
            labor,
        }
    }
}

impl Default for Percentages {
    fn default() -> Self {
        Self::new(
            Self::DEFAULT_WASTE,
            Self::DEFAULT_FIXED_COSTS,
            Self::DEFAULT_LABOR,
        )
    }
}

/// Everything needed to cost one product order, supplied in one piece
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationRequest {
    pub product_name: String,
    pub order_quantity: u32,
    #[serde(default)]
    pub ingredients: Vec<RecipeLine>,
    #[serde(default)]
    pub expenses: Vec<ExpenseLine>,
    #[serde(default)]
    pub percentages: Percentages,
}

impl CalculationRequest {
    /// Request with no lines and default percentages
    pub fn new(product_name: impl Into<String>, order_quantity: u32) -> Self {
        Self {
            product_name: product_name.into(),
            order_quantity,
            ingredients: Vec::new(),
            expenses: Vec::new(),
            percentages: Percentages::default(),
        }
    }

    pub fn with_ingredient(mut self, supply_id: SupplyId, quantity: f64) -> Self {
        self.ingredients.push(RecipeLine {
            supply_id,
            quantity,
        });
        self
    }

    pub fn with_expense(mut self, concept: impl Into<String>, cost: f64) -> Self {
        self.expenses.push(ExpenseLine {
            concept: concept.into(),
            cost,
        });
        self
    }

    pub fn with_percentages(mut self, percentages: Percentages) -> Self {
        self.percentages = percentages;
        self
    }
}

/// Costed ingredient line of a breakdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientDetail {
    pub name: String,
    pub quantity: f64,
    pub unit: String,
    pub unit_price: f64,
    pub total: f64,
}

/// Full result of one calculation, with every intermediate amount
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub product_name: String,
    pub order_quantity: u32,
    pub ingredient_subtotal: f64,
    pub expense_total: f64,
    pub base_subtotal: f64,
    pub waste_amount: f64,
    pub fixed_costs_amount: f64,
    pub labor_amount: f64,
    pub unit_cost: f64,
    pub order_total: f64,
    pub ingredients: Vec<IngredientDetail>,
    pub expenses: Vec<ExpenseLine>,
    pub percentages: Percentages,
    pub created_at: DateTime<Utc>,
}

/// A breakdown saved to history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: HistoryId,
    #[serde(flatten)]
    pub breakdown: CostBreakdown,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_percentages() {
        let percentages = Percentages::default();
        assert_eq!(percentages.waste, 10.0);
        assert_eq!(percentages.fixed_costs, 20.0);
        assert_eq!(percentages.labor, 50.0);
    }

    #[test]
    fn test_request_builder_keeps_line_order() {
        let request = CalculationRequest::new("Torta", 3)
            .with_ingredient(SupplyId(2), 500.0)
            .with_ingredient(SupplyId(1), 200.0)
            .with_expense("Caja", 0.3)
            .with_percentages(Percentages::new(5.0, 0.0, 25.0));

        assert_eq!(request.ingredients[0].supply_id, SupplyId(2));
        assert_eq!(request.ingredients[1].supply_id, SupplyId(1));
        assert_eq!(request.expenses.len(), 1);
        assert_eq!(request.percentages.waste, 5.0);
    }

    #[test]
    fn test_request_json_defaults_missing_sections() {
        let request: CalculationRequest =
            serde_json::from_str(r#"{"product_name":"Pan","order_quantity":12}"#).unwrap();
        assert!(request.ingredients.is_empty());
        assert!(request.expenses.is_empty());
        assert_eq!(request.percentages, Percentages::default());
    }
}
