//! Core domain logic for the vinelog spray treatment log.
//! This crate is the single source of truth for business invariants.

pub mod db;
pub mod domain;
pub mod export;
pub mod logging;
pub mod model;
pub mod query;
pub mod service;
pub mod store;

pub use domain::calc::{applied_amount, solution_volume, unit_label, SQ_FT_PER_ACRE};
pub use domain::retreatment::{retreatment_status, RetreatmentStatus};
pub use domain::selection::{ChemicalSelection, SelectionError};
pub use export::{treatments_to_csv, treatments_to_json};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::chemical::{builtin_catalog, search_catalog, ApplicationRate, ChemicalRef};
pub use model::settings::Settings;
pub use model::treatment::{
    parse_datetime, AreaUnit, ChemicalApplication, Treatment, TreatmentDraft, TreatmentId,
    TreatmentPatch, TreatmentValidationError, VolumeUnit, WeatherReading,
};
pub use query::treatments::{search_treatments, sorted_by_date_descending, stats, TreatmentStats};
pub use service::treatment_service::{ServiceError, TreatmentService};
pub use store::treatment_store::{
    SqliteTreatmentStore, StoreError, StoreResult, TreatmentStore,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
