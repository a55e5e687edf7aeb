//! Chemical reference catalog.
//!
//! # Responsibility
//! - Define the reference-catalog entry shape used by the reserved
//!   chemicals collection.
//! - Provide the built-in starter catalog and name/type lookup.
//!
//! # Invariants
//! - Catalog ids are unique and stable; treatments refer to them by id.
//! - Rates are structured value/unit pairs, never combined display strings.

use serde::{Deserialize, Serialize};

use crate::model::treatment::ChemicalApplication;

/// Structured per-acre application rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationRate {
    pub value: f64,
    /// Bare measure label, e.g. `"lb"` or `"oz"`.
    pub unit: String,
}

/// One entry in the chemical reference catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChemicalRef {
    pub id: u32,
    pub name: String,
    /// Serialized as `type` to match the persisted schema naming.
    #[serde(rename = "type")]
    pub kind: String,
    pub moa_group: String,
    pub default_rate: ApplicationRate,
}

impl ChemicalRef {
    /// Turns a catalog entry into a treatment line item at its default rate.
    pub fn to_application(&self) -> ChemicalApplication {
        ChemicalApplication {
            chemical_id: self.id,
            name: self.name.clone(),
            kind: self.kind.clone(),
            moa_group: self.moa_group.clone(),
            rate: self.default_rate.value,
            unit: self.default_rate.unit.clone(),
        }
    }
}

fn catalog_entry(
    id: u32,
    name: &str,
    kind: &str,
    moa_group: &str,
    rate_value: f64,
    rate_unit: &str,
) -> ChemicalRef {
    ChemicalRef {
        id,
        name: name.to_string(),
        kind: kind.to_string(),
        moa_group: moa_group.to_string(),
        default_rate: ApplicationRate {
            value: rate_value,
            unit: rate_unit.to_string(),
        },
    }
}

/// Built-in starter catalog for common vineyard products.
pub fn builtin_catalog() -> Vec<ChemicalRef> {
    vec![
        catalog_entry(1, "Mancozeb 75DF", "Fungicide", "M3", 2.0, "lb"),
        catalog_entry(2, "Rally 40WSP", "Fungicide", "3", 5.0, "oz"),
        catalog_entry(3, "Captan 50WP", "Fungicide", "M4", 3.0, "lb"),
        catalog_entry(4, "Luna Experience", "Fungicide", "7+11", 6.0, "oz"),
        catalog_entry(5, "Sevin XLR Plus", "Insecticide", "1A", 1.0, "qt"),
    ]
}

/// Case-insensitive substring lookup over name and type.
///
/// Queries shorter than two characters return nothing; the autocomplete
/// caller should not fire on a single keystroke.
pub fn search_catalog<'a>(catalog: &'a [ChemicalRef], query: &str) -> Vec<&'a ChemicalRef> {
    let needle = query.trim().to_lowercase();
    if needle.chars().count() < 2 {
        return Vec::new();
    }
    catalog
        .iter()
        .filter(|chemical| {
            chemical.name.to_lowercase().contains(&needle)
                || chemical.kind.to_lowercase().contains(&needle)
        })
        .collect()
}
