//! Combo Availability
//!
//! How many complete combos can be assembled from current product stock.

use super::schema::{ComboItem, Product};

/// Number of combos one item allows, or `None` if it does not constrain
fn possible_for_item(item: &ComboItem, products: &[Product]) -> Option<i64> {
    if item.quantity == 0 {
        return None;
    }
    let product = products.iter().find(|p| p.id == item.product_id)?;

    let stock = match &product.variants {
        Some(variants) => variants.get(item.variant_index?)?.stock,
        None => product.stock,
    };

    Some(stock.div_euclid(i64::from(item.quantity)))
}

/// Minimum over all constraining items; 0 when nothing constrains
pub fn available_stock(items: &[ComboItem], products: &[Product]) -> i64 {
    items
        .iter()
        .filter_map(|item| possible_for_item(item, products))
        .min()
        .unwrap_or(0)
}
