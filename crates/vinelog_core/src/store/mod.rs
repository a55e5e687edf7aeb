//! Record store abstractions and the SQLite-backed implementation.
//!
//! # Responsibility
//! - Define the durable CRUD contract for treatments, the chemical
//!   reference collection, and settings.
//! - Isolate the key-value persistence details from service orchestration.
//!
//! # Invariants
//! - Reads never fail: corrupt or missing blobs degrade to empty/default.
//! - Writes replace a whole collection atomically or not at all.

pub mod treatment_store;
