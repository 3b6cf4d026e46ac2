//! `agrovault-inventory` — CRUD and category-filtered listing over
//! inventory items.

pub mod item;
pub mod service;

pub use item::{InventoryItem, ItemDraft, ItemPatch};
pub use service::InventoryService;
