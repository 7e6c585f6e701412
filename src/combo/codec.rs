//! Storage Edge Codec
//!
//! Combo items and product variants are persisted as JSON text. These rows
//! and conversions are the only place that text is touched.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::schema::{Combo, ComboItem, Product, Variant};

/// Combo row as persisted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredCombo {
    pub id: i64,
    pub sku: String,
    pub name: String,
    pub price: f64,
    pub cost: f64,
    pub stock: i64,
    pub items: Option<String>,
    pub status: String,
    pub created_at: u64,
}

/// Product row as persisted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredProduct {
    pub id: i64,
    pub sku: String,
    pub name: String,
    pub stock: i64,
    pub variants: Option<String>,
}

pub fn encode_items(items: &[ComboItem]) -> Result<String> {
    serde_json::to_string(items).context("Failed to encode combo items")
}

/// Missing or empty text decodes to no items
pub fn decode_items(text: Option<&str>) -> Result<Vec<ComboItem>> {
    match text {
        Some(text) if !text.is_empty() => {
            serde_json::from_str(text).context("Failed to decode combo items")
        }
        _ => Ok(Vec::new()),
    }
}

/// Missing or empty text means the product has no variant list
pub fn decode_variants(text: Option<&str>) -> Result<Option<Vec<Variant>>> {
    match text {
        Some(text) if !text.is_empty() => serde_json::from_str(text)
            .map(Some)
            .context("Failed to decode product variants"),
        _ => Ok(None),
    }
}

pub fn encode_variants(variants: Option<&[Variant]>) -> Result<Option<String>> {
    variants
        .map(|v| serde_json::to_string(v).context("Failed to encode product variants"))
        .transpose()
}

impl TryFrom<StoredCombo> for Combo {
    type Error = anyhow::Error;

    fn try_from(row: StoredCombo) -> Result<Self> {
        let items = decode_items(row.items.as_deref())
            .with_context(|| format!("Combo {} has malformed items", row.id))?;
        Ok(Combo {
            id: row.id,
            sku: row.sku,
            name: row.name,
            price: row.price,
            cost: row.cost,
            stock: row.stock,
            items,
            status: row.status,
            created_at: row.created_at,
        })
    }
}

impl TryFrom<StoredProduct> for Product {
    type Error = anyhow::Error;

    fn try_from(row: StoredProduct) -> Result<Self> {
        let variants = decode_variants(row.variants.as_deref())
            .with_context(|| format!("Product {} has malformed variants", row.id))?;
        Ok(Product {
            id: row.id,
            sku: row.sku,
            name: row.name,
            stock: row.stock,
            variants,
        })
    }
}

impl TryFrom<&Product> for StoredProduct {
    type Error = anyhow::Error;

    fn try_from(product: &Product) -> Result<Self> {
        Ok(StoredProduct {
            id: product.id,
            sku: product.sku.clone(),
            name: product.name.clone(),
            stock: product.stock,
            variants: encode_variants(product.variants.as_deref())?,
        })
    }
}
