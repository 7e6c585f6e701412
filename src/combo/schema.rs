//! Combo Record Types
//!
//! Typed records used by the handlers. Storage rows with encoded fields live
//! in [`crate::combo::codec`].

use serde::{Deserialize, Deserializer, Serialize};

/// One product line inside a combo
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComboItem {
    pub product_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant_index: Option<usize>,
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant_name: Option<String>,
}

impl ComboItem {
    pub fn new(product_id: i64, quantity: u32) -> Self {
        Self {
            product_id,
            variant_index: None,
            quantity,
            sku: None,
            product_name: None,
            variant_name: None,
        }
    }

    pub fn with_variant(mut self, index: usize) -> Self {
        self.variant_index = Some(index);
        self
    }
}

/// Sub-configuration of a product with its own stock
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variant {
    #[serde(default)]
    pub name: Option<String>,
    /// Absent or `null` stock counts as 0
    #[serde(default, deserialize_with = "null_as_zero")]
    pub stock: i64,
}

fn null_as_zero<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    Ok(Option::<i64>::deserialize(deserializer)?.unwrap_or(0))
}

/// A product as seen by the stock computation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub sku: String,
    pub name: String,
    pub stock: i64,
    /// `None` when the product has no variant list at all
    pub variants: Option<Vec<Variant>>,
}

/// A stored combo product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Combo {
    pub id: i64,
    pub sku: String,
    pub name: String,
    pub price: f64,
    pub cost: f64,
    pub stock: i64,
    pub items: Vec<ComboItem>,
    pub status: String,
    /// Creation order stamp assigned by the store
    pub created_at: u64,
}

/// Fields accepted by create and update
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComboInput {
    pub sku: String,
    pub name: String,
    #[serde(default)]
    pub items: Vec<ComboItem>,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub cost: f64,
}

/// Fields accepted by update; `None` leaves the stored value alone
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComboUpdate {
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub items: Option<Vec<ComboItem>>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub cost: Option<f64>,
}

pub const STATUS_ACTIVE: &str = "active";
