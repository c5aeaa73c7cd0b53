//! Measurement units and conversion into base units

use serde::Serialize;

/// Measurement unit family
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum UnitCategory {
    Weight,
    #[serde(rename = "liquid")]
    Volume,
    Count,
    Length,
}

impl std::fmt::Display for UnitCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UnitCategory::Weight => write!(f, "weight"),
            UnitCategory::Volume => write!(f, "liquid"),
            UnitCategory::Count => write!(f, "count"),
            UnitCategory::Length => write!(f, "length"),
        }
    }
}

/// A catalog entry
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct Unit {
    pub id: &'static str,
    pub name: &'static str,
    /// Multiplier from this unit into `base_unit`
    pub factor: f64,
    pub category: UnitCategory,
    pub base_unit: &'static str,
}

/// Supported units, in dropdown order
pub const STANDARD_UNITS: &[Unit] = &[
    Unit { id: "kg", name: "Kilogramo", factor: 1000.0, category: UnitCategory::Weight, base_unit: "g" },
    Unit { id: "g", name: "Gramo", factor: 1.0, category: UnitCategory::Weight, base_unit: "g" },
    Unit { id: "ml", name: "Mililitro", factor: 1.0, category: UnitCategory::Volume, base_unit: "ml" },
    Unit { id: "l", name: "Litro", factor: 1000.0, category: UnitCategory::Volume, base_unit: "ml" },
    Unit { id: "und", name: "Unidad", factor: 1.0, category: UnitCategory::Count, base_unit: "und" },
    Unit { id: "cm", name: "Centímetro", factor: 1.0, category: UnitCategory::Length, base_unit: "cm" },
    Unit { id: "m", name: "Metro", factor: 100.0, category: UnitCategory::Length, base_unit: "cm" },
];

/// A quantity expressed in a base unit
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BaseQuantity {
    pub quantity: f64,
    /// Empty when the source unit was not recognized
    pub unit: String,
}

/// Static lookup table of measurement units
#[derive(Debug, Clone, Copy)]
pub struct UnitCatalog {
    units: &'static [Unit],
}

impl UnitCatalog {
    pub fn new(units: &'static [Unit]) -> Self {
        Self { units }
    }

    pub fn units(&self) -> &'static [Unit] {
        self.units
    }

    /// Exact, case-sensitive match on the unit code
    pub fn lookup(&self, unit_id: &str) -> Option<&'static Unit> {
        self.units.iter().find(|unit| unit.id == unit_id)
    }

    /// Convert into the unit's base unit.
    ///
    /// Unknown codes yield a zero quantity and an empty unit instead of an
    /// error, so a bad dropdown value cannot abort a running calculation.
    pub fn to_base_unit(&self, quantity: f64, unit_id: &str) -> BaseQuantity {
        match self.lookup(unit_id) {
            Some(unit) => BaseQuantity {
                quantity: quantity * unit.factor,
                unit: unit.base_unit.to_string(),
            },
            None => {
                tracing::warn!(unit_id, "unknown unit, converting to zero");
                BaseQuantity {
                    quantity: 0.0,
                    unit: String::new(),
                }
            }
        }
    }

    /// Human-readable unit name, or the raw code when unknown
    pub fn display_name<'a>(&self, unit_id: &'a str) -> &'a str {
        match self.lookup(unit_id) {
            Some(unit) => unit.name,
            None => unit_id,
        }
    }
}

impl Default for UnitCatalog {
    fn default() -> Self {
        Self::new(STANDARD_UNITS)
    }
}
