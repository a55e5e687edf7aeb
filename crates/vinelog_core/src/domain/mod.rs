//! Pure treatment derivations.
//!
//! # Responsibility
//! - Compute solution volume, per-chemical amounts, and retreatment status.
//! - Guard the in-progress chemical selection against duplicates.
//!
//! # Invariants
//! - Nothing in this module touches storage or holds UI state; callers pass
//!   all inputs explicitly, including the current time.

pub mod calc;
pub mod retreatment;
pub mod selection;
