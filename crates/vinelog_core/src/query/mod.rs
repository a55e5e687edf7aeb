//! Query layer over stored treatments.
//!
//! # Responsibility
//! - Expose search, sort, and statistics over treatment collections.
//! - Keep result shaping pure: callers pass the records in.

pub mod treatments;
