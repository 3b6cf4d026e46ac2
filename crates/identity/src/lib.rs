//! `agrovault-identity` — account lookup/creation and token issuance.
//!
//! Deliberately frictionless (demo posture): login auto-provisions unknown
//! emails, and a mismatched password replaces the stored hash instead of
//! rejecting the attempt. This is not a security mechanism; see `DESIGN.md`.

pub mod password;
pub mod service;
pub mod user;

pub use password::{hash_password, verify_password};
pub use service::IdentityService;
pub use user::{Session, User, UserProfile};
