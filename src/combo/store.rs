//! Combo Persistence
//!
//! The handlers talk to storage only through [`ComboStore`].

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use tokio::sync::RwLock;

use super::codec::{encode_items, StoredCombo, StoredProduct};
use super::schema::{Combo, ComboInput, ComboUpdate, Product, STATUS_ACTIVE};

/// Data access used by the combo handlers
#[async_trait]
pub trait ComboStore: Send + Sync {
    /// All combos, newest first
    async fn find_combos(&self) -> Result<Vec<Combo>>;

    async fn find_products(&self) -> Result<Vec<Product>>;

    async fn create_combo(&self, input: ComboInput) -> Result<Combo>;

    /// Apply only the fields present in `update`
    async fn update_combo(&self, id: i64, update: ComboUpdate) -> Result<Combo>;

    async fn delete_combo(&self, id: i64) -> Result<()>;
}

#[derive(Debug, Default)]
struct Tables {
    combos: Vec<StoredCombo>,
    products: Vec<StoredProduct>,
    next_combo_id: i64,
    clock: u64,
}

impl Tables {
    fn tick(&mut self) -> u64 {
        self.clock += 1;
        self.clock
    }
}

/// In-memory store keeping rows in their encoded form
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a product row
    pub async fn put_product(&self, product: &Product) -> Result<()> {
        let row = StoredProduct::try_from(product)?;
        let mut tables = self.tables.write().await;
        tables.products.retain(|p| p.id != row.id);
        tables.products.push(row);
        Ok(())
    }

    /// Insert a product row exactly as given
    pub async fn put_raw_product(&self, row: StoredProduct) {
        let mut tables = self.tables.write().await;
        tables.products.retain(|p| p.id != row.id);
        tables.products.push(row);
    }

    /// Insert a combo row exactly as given
    pub async fn put_raw_combo(&self, row: StoredCombo) {
        let mut tables = self.tables.write().await;
        tables.next_combo_id = tables.next_combo_id.max(row.id);
        tables.clock = tables.clock.max(row.created_at);
        tables.combos.retain(|c| c.id != row.id);
        tables.combos.push(row);
    }
}

#[async_trait]
impl ComboStore for MemoryStore {
    async fn find_combos(&self) -> Result<Vec<Combo>> {
        let tables = self.tables.read().await;
        let mut combos = tables
            .combos
            .iter()
            .cloned()
            .map(Combo::try_from)
            .collect::<Result<Vec<_>>>()?;
        combos.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(combos)
    }

    async fn find_products(&self) -> Result<Vec<Product>> {
        let tables = self.tables.read().await;
        tables
            .products
            .iter()
            .cloned()
            .map(Product::try_from)
            .collect()
    }

    async fn create_combo(&self, input: ComboInput) -> Result<Combo> {
        let items = encode_items(&input.items)?;
        let mut tables = self.tables.write().await;
        tables.next_combo_id += 1;
        let id = tables.next_combo_id;
        let created_at = tables.tick();
        let row = StoredCombo {
            id,
            sku: input.sku,
            name: input.name,
            price: input.price,
            cost: input.cost,
            stock: 0,
            items: Some(items),
            status: STATUS_ACTIVE.to_string(),
            created_at,
        };
        tables.combos.push(row.clone());
        Combo::try_from(row)
    }

    async fn update_combo(&self, id: i64, update: ComboUpdate) -> Result<Combo> {
        let items = update.items.as_deref().map(encode_items).transpose()?;
        let mut tables = self.tables.write().await;
        let row = tables
            .combos
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| anyhow!("Combo {} not found", id))?;
        if let Some(sku) = update.sku {
            row.sku = sku;
        }
        if let Some(name) = update.name {
            row.name = name;
        }
        if let Some(items) = items {
            row.items = Some(items);
        }
        if let Some(price) = update.price {
            row.price = price;
        }
        if let Some(cost) = update.cost {
            row.cost = cost;
        }
        Combo::try_from(row.clone())
    }

    async fn delete_combo(&self, id: i64) -> Result<()> {
        let mut tables = self.tables.write().await;
        let before = tables.combos.len();
        tables.combos.retain(|c| c.id != id);
        if tables.combos.len() == before {
            return Err(anyhow!("Combo {} not found", id));
        }
        Ok(())
    }
}
