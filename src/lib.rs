//! Combo Handler Patcher
//!
//! Repairs an IPC handler file whose combo product handlers were appended
//! more than once.
//!
//! This library provides:
//! - Split point detection and the canonical handler block
//! - Configuration from command line and TOML
//! - A typed model of the combo handlers and their stock rule

pub mod combo;
pub mod config;
pub mod patcher;

// Re-exports for clean public API
pub use combo::{available_stock, ComboHandlers, ComboStore, MemoryStore};
pub use config::Config;
pub use patcher::{patch_document, run, PatchReport, PatchedDocument, SplitPoint};
