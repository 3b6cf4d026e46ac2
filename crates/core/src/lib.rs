//! `agrovault-core` — shared building blocks for the AgroVault backend.
//!
//! This crate contains the pieces every service crate needs: the error
//! taxonomy, entity identifiers, and wire-format timestamp helpers. It has
//! no storage or HTTP concerns.

pub mod error;
pub mod id;
pub mod time;

pub use error::{ServiceError, ServiceResult};
pub use id::EntityId;
pub use time::now_iso;
