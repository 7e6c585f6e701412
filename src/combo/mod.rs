//! Combo Products
//!
//! Typed model of the handlers the patcher emits: records, the storage
//! codec, availability, persistence and the handlers themselves.

pub mod codec;
pub mod handlers;
pub mod schema;
pub mod stock;
pub mod store;

pub use handlers::{ComboHandlers, HandlerResponse};
pub use schema::{Combo, ComboInput, ComboItem, ComboUpdate, Product, Variant};
pub use stock::available_stock;
pub use store::{ComboStore, MemoryStore};
