//! Intake validation for calculator forms
//!
//! The engine trusts its inputs. Callers run these checks first and show
//! the returned message when one fails.

use thiserror::Error;

use crate::models::{CalculationRequest, ExpenseLine, RecipeLine};
use crate::types::SupplyId;
use crate::units::UnitCatalog;

/// Minimum length for names and concepts, after trimming
pub const MIN_NAME_LENGTH: usize = 2;

/// A rejected form input
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} must be at least {min} characters")]
    TooShort { field: Field, min: usize },

    #[error("{field} must be greater than 0")]
    NotPositive { field: Field },

    #[error("a unit of measure must be selected")]
    MissingUnit,

    #[error("unknown unit of measure: {0}")]
    UnknownUnit(String),

    #[error("a supply must be selected")]
    MissingSupply,

    #[error("at least one ingredient is required")]
    NoIngredients,
}

/// Form field a validation error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    SupplyName,
    SupplyQuantity,
    SupplyUnit,
    SupplyPrice,
    Supply,
    RequiredQuantity,
    ExpenseConcept,
    ExpenseCost,
    ProductName,
    OrderQuantity,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::SupplyName => "supply_name",
            Field::SupplyQuantity => "supply_quantity",
            Field::SupplyUnit => "supply_unit",
            Field::SupplyPrice => "supply_price",
            Field::Supply => "supply",
            Field::RequiredQuantity => "required_quantity",
            Field::ExpenseConcept => "expense_concept",
            Field::ExpenseCost => "expense_cost",
            Field::ProductName => "product_name",
            Field::OrderQuantity => "order_quantity",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl ValidationError {
    /// Field the error belongs to, if any
    pub fn field(&self) -> Option<Field> {
        match self {
            ValidationError::TooShort { field, .. } | ValidationError::NotPositive { field } => {
                Some(*field)
            }
            ValidationError::MissingUnit | ValidationError::UnknownUnit(_) => {
                Some(Field::SupplyUnit)
            }
            ValidationError::MissingSupply => Some(Field::Supply),
            ValidationError::NoIngredients => None,
        }
    }

    /// Message shown to the user in the calculator UI
    pub fn message_es(&self) -> String {
        match self {
            ValidationError::TooShort { field, min } => {
                let subject = match field {
                    Field::SupplyName => "El nombre del insumo",
                    Field::ExpenseConcept => "El concepto del gasto",
                    Field::ProductName => "El nombre del producto",
                    _ => "El campo",
                };
                format!("{} debe tener al menos {} caracteres", subject, min)
            }
            ValidationError::NotPositive { field } => match field {
                Field::SupplyPrice => "El precio debe ser mayor a 0".to_string(),
                Field::RequiredQuantity => "La cantidad requerida debe ser mayor a 0".to_string(),
                Field::ExpenseCost => "El costo debe ser mayor a 0".to_string(),
                Field::OrderQuantity => "La cantidad del pedido debe ser mayor a 0".to_string(),
                _ => "La cantidad debe ser mayor a 0".to_string(),
            },
            ValidationError::MissingUnit => "Debes seleccionar una unidad de medida".to_string(),
            ValidationError::UnknownUnit(unit) => format!("Unidad de medida desconocida: {}", unit),
            ValidationError::MissingSupply => "Debes seleccionar un insumo".to_string(),
            ValidationError::NoIngredients => "Debes añadir al menos un ingrediente".to_string(),
        }
    }
}

fn check_name(value: &str, field: Field) -> Result<(), ValidationError> {
    if value.trim().chars().count() < MIN_NAME_LENGTH {
        return Err(ValidationError::TooShort {
            field,
            min: MIN_NAME_LENGTH,
        });
    }
    Ok(())
}

// NaN and infinities are rejected along with zero and negatives
fn check_positive(value: f64, field: Field) -> Result<(), ValidationError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ValidationError::NotPositive { field });
    }
    Ok(())
}

/// Validate the "add supply" form
pub fn validate_supply(
    catalog: &UnitCatalog,
    name: &str,
    quantity: f64,
    unit_id: &str,
    total_price: f64,
) -> Result<(), ValidationError> {
    check_name(name, Field::SupplyName)?;
    check_positive(quantity, Field::SupplyQuantity)?;
    if unit_id.trim().is_empty() {
        return Err(ValidationError::MissingUnit);
    }
    if catalog.lookup(unit_id).is_none() {
        return Err(ValidationError::UnknownUnit(unit_id.to_string()));
    }
    check_positive(total_price, Field::SupplyPrice)
}

/// Validate one recipe line; `None` means no supply was picked
pub fn validate_recipe_line(
    supply_id: Option<SupplyId>,
    quantity: f64,
) -> Result<RecipeLine, ValidationError> {
    let supply_id = supply_id.ok_or(ValidationError::MissingSupply)?;
    check_positive(quantity, Field::RequiredQuantity)?;
    Ok(RecipeLine {
        supply_id,
        quantity,
    })
}

/// Validate one expense, returning it with a trimmed concept
pub fn validate_expense(concept: &str, cost: f64) -> Result<ExpenseLine, ValidationError> {
    check_name(concept, Field::ExpenseConcept)?;
    check_positive(cost, Field::ExpenseCost)?;
    Ok(ExpenseLine {
        concept: concept.trim().to_string(),
        cost,
    })
}

/// Validate a whole request before it is calculated
pub fn validate_calculation(request: &CalculationRequest) -> Result<(), ValidationError> {
    check_name(&request.product_name, Field::ProductName)?;
    if request.order_quantity == 0 {
        return Err(ValidationError::NotPositive {
            field: Field::OrderQuantity,
        });
    }
    if request.ingredients.is_empty() {
        return Err(ValidationError::NoIngredients);
    }
    for line in &request.ingredients {
        check_positive(line.quantity, Field::RequiredQuantity)?;
    }
    for expense in &request.expenses {
        check_name(&expense.concept, Field::ExpenseConcept)?;
        check_positive(expense.cost, Field::ExpenseCost)?;
    }
    Ok(())
}
