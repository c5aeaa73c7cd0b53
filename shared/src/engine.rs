//! Cost engine: supplies, calculations and history
//!
//! Lookups that miss (unknown unit, unknown supply) contribute zero or are
//! skipped rather than failing. Input validation is the caller's job; see
//! [`crate::validation`].

use crate::models::{
    CalculationRequest, CostBreakdown, HistoryEntry, IngredientDetail, Supply,
};
use crate::types::{Clock, HistoryId, IdSequence, SupplyId, SystemClock};
use crate::units::UnitCatalog;

/// In-memory owner of supplies, the current calculation and history
#[derive(Debug)]
pub struct CostEngine<C: Clock = SystemClock> {
    catalog: UnitCatalog,
    clock: C,
    ids: IdSequence,
    supplies: Vec<Supply>,
    history: Vec<HistoryEntry>,
    current: Option<CostBreakdown>,
}

impl CostEngine<SystemClock> {
    pub fn new() -> Self {
        Self::with_parts(UnitCatalog::default(), SystemClock, IdSequence::new())
    }
}

impl Default for CostEngine<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> CostEngine<C> {
    pub fn with_clock(clock: C) -> Self {
        Self::with_parts(UnitCatalog::default(), clock, IdSequence::new())
    }

    pub fn with_parts(catalog: UnitCatalog, clock: C, ids: IdSequence) -> Self {
        Self {
            catalog,
            clock,
            ids,
            supplies: Vec::new(),
            history: Vec::new(),
            current: None,
        }
    }

    pub fn catalog(&self) -> &UnitCatalog {
        &self.catalog
    }

    // ------------------------------------------------------------------
    // Supplies
    // ------------------------------------------------------------------

    /// Record a purchase. Inputs must already be validated; a zero
    /// converted quantity leaves a non-finite unit cost in place.
    pub fn add_supply(
        &mut self,
        name: &str,
        quantity: f64,
        unit_id: &str,
        total_price: f64,
    ) -> Supply {
        let converted = self.catalog.to_base_unit(quantity, unit_id);
        let unit_cost = total_price / converted.quantity;

        let supply = Supply {
            id: SupplyId(self.ids.next()),
            name: name.trim().to_string(),
            original_quantity: quantity,
            original_unit: unit_id.to_string(),
            total_price,
            converted_quantity: converted.quantity,
            converted_unit: converted.unit,
            unit_cost,
        };

        tracing::debug!(
            id = %supply.id,
            name = %supply.name,
            unit_cost = supply.unit_cost,
            "supply added"
        );

        self.supplies.push(supply.clone());
        supply
    }

    pub fn list_supplies(&self) -> &[Supply] {
        &self.supplies
    }

    pub fn supply_count(&self) -> usize {
        self.supplies.len()
    }

    pub fn get_supply(&self, id: SupplyId) -> Option<&Supply> {
        self.supplies.iter().find(|supply| supply.id == id)
    }

    /// No-op when `id` is unknown
    pub fn remove_supply(&mut self, id: SupplyId) {
        let before = self.supplies.len();
        self.supplies.retain(|supply| supply.id != id);
        if self.supplies.len() < before {
            tracing::debug!(%id, "supply removed");
        }
    }

    /// Cost of a recipe line, or zero when the supply does not exist
    pub fn cost_of_line(&self, supply_id: SupplyId, required_quantity: f64) -> f64 {
        match self.get_supply(supply_id) {
            Some(supply) => supply.cost_of(required_quantity),
            None => {
                tracing::warn!(%supply_id, "line cost for unknown supply");
                0.0
            }
        }
    }

    // ------------------------------------------------------------------
    // Calculation
    // ------------------------------------------------------------------

    /// Cost a product order and keep the result as the current calculation.
    ///
    /// Overhead compounds: waste applies to the base subtotal, fixed costs
    /// to the subtotal after waste, labor to the subtotal after fixed costs.
    pub fn calculate(&mut self, request: &CalculationRequest) -> CostBreakdown {
        let mut ingredient_subtotal = 0.0;
        let mut ingredients = Vec::with_capacity(request.ingredients.len());

        for line in &request.ingredients {
            let Some(supply) = self.get_supply(line.supply_id) else {
                tracing::warn!(supply_id = %line.supply_id, "skipping ingredient with unknown supply");
                continue;
            };
            let total = supply.cost_of(line.quantity);
            ingredient_subtotal += total;
            ingredients.push(IngredientDetail {
                name: supply.name.clone(),
                quantity: line.quantity,
                unit: supply.converted_unit.clone(),
                unit_price: supply.unit_cost,
                total,
            });
        }

        let expense_total = request
            .expenses
            .iter()
            .fold(0.0, |total, expense| total + expense.cost);

        let base_subtotal = ingredient_subtotal + expense_total;

        let percentages = request.percentages;
        let waste_amount = base_subtotal * (percentages.waste / 100.0);
        let after_waste = base_subtotal + waste_amount;

        let fixed_costs_amount = after_waste * (percentages.fixed_costs / 100.0);
        let after_fixed_costs = after_waste + fixed_costs_amount;

        let labor_amount = after_fixed_costs * (percentages.labor / 100.0);
        let unit_cost = after_fixed_costs + labor_amount;

        let order_total = unit_cost * f64::from(request.order_quantity);

        let breakdown = CostBreakdown {
            product_name: request.product_name.clone(),
            order_quantity: request.order_quantity,
            ingredient_subtotal,
            expense_total,
            base_subtotal,
            waste_amount,
            fixed_costs_amount,
            labor_amount,
            unit_cost,
            order_total,
            ingredients,
            expenses: request.expenses.clone(),
            percentages,
            created_at: self.clock.now(),
        };

        tracing::info!(
            product = %breakdown.product_name,
            order_quantity = breakdown.order_quantity,
            unit_cost = breakdown.unit_cost,
            order_total = breakdown.order_total,
            "calculation completed"
        );

        self.current = Some(breakdown.clone());
        breakdown
    }

    /// Most recent calculation, kept until the next one replaces it
    pub fn current_calculation(&self) -> Option<&CostBreakdown> {
        self.current.as_ref()
    }

    // ------------------------------------------------------------------
    // History
    // ------------------------------------------------------------------

    /// Save a copy of the current calculation at the front of history.
    ///
    /// Returns `None` without touching history when nothing has been
    /// calculated yet. The current calculation stays in place.
    pub fn commit_current_to_history(&mut self) -> Option<HistoryId> {
        let breakdown = self.current.clone()?;
        let id = HistoryId(self.ids.next());
        self.history.insert(0, HistoryEntry { id, breakdown });
        tracing::debug!(%id, "calculation saved to history");
        Some(id)
    }

    /// Most recent first
    pub fn list_history(&self) -> &[HistoryEntry] {
        &self.history
    }

    pub fn history_count(&self) -> usize {
        self.history.len()
    }

    pub fn clear_history(&mut self) {
        tracing::debug!(entries = self.history.len(), "history cleared");
        self.history.clear();
    }

    /// No-op when `id` is unknown
    pub fn remove_history_entry(&mut self, id: HistoryId) {
        self.history.retain(|entry| entry.id != id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Percentages;
    use crate::types::FixedClock;
    use chrono::{TimeZone, Utc};

    fn engine() -> CostEngine<FixedClock> {
        CostEngine::with_clock(FixedClock(Utc.with_ymd_and_hms(2024, 3, 10, 9, 30, 0).unwrap()))
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_add_supply_converts_to_base_unit() {
        let mut engine = engine();
        let flour = engine.add_supply("Flour", 1.0, "kg", 2.50);

        assert_eq!(flour.converted_quantity, 1000.0);
        assert_eq!(flour.converted_unit, "g");
        assert!(approx(flour.unit_cost, 0.0025));
        assert_eq!(engine.list_supplies(), &[flour]);
    }

    #[test]
    fn test_add_supply_trims_name() {
        let mut engine = engine();
        let sugar = engine.add_supply("  Azúcar ", 500.0, "g", 1.0);
        assert_eq!(sugar.name, "Azúcar");
    }

    #[test]
    fn test_add_supply_unknown_unit_passes_non_finite_cost() {
        let mut engine = engine();
        let odd = engine.add_supply("Odd", 3.0, "lb", 9.0);
        assert_eq!(odd.converted_quantity, 0.0);
        assert_eq!(odd.converted_unit, "");
        assert!(odd.unit_cost.is_infinite());
        assert_eq!(engine.supply_count(), 1);
    }

    #[test]
    fn test_supply_ids_are_unique_and_increasing() {
        let mut engine = engine();
        let a = engine.add_supply("Flour", 1.0, "kg", 2.5);
        let b = engine.add_supply("Milk", 1.0, "l", 1.2);
        assert!(b.id > a.id);
    }

    #[test]
    fn test_remove_supply_keeps_order() {
        let mut engine = engine();
        let a = engine.add_supply("Flour", 1.0, "kg", 2.5);
        let b = engine.add_supply("Milk", 1.0, "l", 1.2);
        let c = engine.add_supply("Eggs", 30.0, "und", 4.5);

        engine.remove_supply(b.id);

        let ids: Vec<_> = engine.list_supplies().iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![a.id, c.id]);
    }

    #[test]
    fn test_remove_unknown_supply_is_noop() {
        let mut engine = engine();
        engine.add_supply("Flour", 1.0, "kg", 2.5);
        engine.remove_supply(SupplyId(999));
        assert_eq!(engine.supply_count(), 1);
    }

    #[test]
    fn test_cost_of_line() {
        let mut engine = engine();
        let milk = engine.add_supply("Milk", 1.0, "l", 10.0);
        assert!(approx(engine.cost_of_line(milk.id, 200.0), 2.0));
        assert_eq!(engine.cost_of_line(SupplyId(404), 200.0), 0.0);
    }

    #[test]
    fn test_calculate_without_ingredients_still_produces_breakdown() {
        let mut engine = engine();
        let request = CalculationRequest::new("Caja sola", 2)
            .with_expense("Caja", 1.0)
            .with_percentages(Percentages::new(0.0, 0.0, 0.0));

        let breakdown = engine.calculate(&request);

        assert_eq!(breakdown.ingredient_subtotal, 0.0);
        assert!(breakdown.ingredients.is_empty());
        assert_eq!(breakdown.unit_cost, 1.0);
        assert_eq!(breakdown.order_total, 2.0);
    }

    #[test]
    fn test_calculate_sets_current_and_overwrites() {
        let mut engine = engine();
        assert!(engine.current_calculation().is_none());

        engine.calculate(&CalculationRequest::new("Uno", 1));
        engine.calculate(&CalculationRequest::new("Dos", 1));

        assert_eq!(engine.current_calculation().unwrap().product_name, "Dos");
    }

    #[test]
    fn test_commit_without_current_is_noop() {
        let mut engine = engine();
        assert_eq!(engine.commit_current_to_history(), None);
        assert_eq!(engine.history_count(), 0);
    }

    #[test]
    fn test_remove_history_entry() {
        let mut engine = engine();
        engine.calculate(&CalculationRequest::new("Pan", 1));
        let first = engine.commit_current_to_history().unwrap();
        let second = engine.commit_current_to_history().unwrap();

        engine.remove_history_entry(first);
        engine.remove_history_entry(HistoryId(12345));

        assert_eq!(engine.history_count(), 1);
        assert_eq!(engine.list_history()[0].id, second);
    }

    #[test]
    fn test_clear_history_keeps_current() {
        let mut engine = engine();
        engine.calculate(&CalculationRequest::new("Pan", 1));
        engine.commit_current_to_history();
        engine.clear_history();

        assert_eq!(engine.history_count(), 0);
        assert!(engine.current_calculation().is_some());
    }
}
