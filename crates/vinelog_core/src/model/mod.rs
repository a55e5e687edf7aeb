//! Domain model for spray treatment records.
//!
//! # Responsibility
//! - Define the canonical data structures used by core business logic.
//! - Keep the persisted shape stable: serde output is the storage contract.
//!
//! # Invariants
//! - Every persisted `Treatment` is identified by a stable `TreatmentId`.
//! - Deletion is permanent; there are no tombstones.

pub mod chemical;
pub mod settings;
pub mod treatment;
