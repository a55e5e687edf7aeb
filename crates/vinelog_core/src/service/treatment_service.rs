//! Treatment use-case service.
//!
//! # Responsibility
//! - Provide validated save/update entry points for presentation callers.
//! - Wire store reads into the query layer and export renderers.
//!
//! # Invariants
//! - Validation runs before any save request reaches the store; the store
//!   itself never re-checks domain preconditions.
//! - Service APIs never hold UI state between calls.

use crate::export;
use crate::model::settings::Settings;
use crate::model::treatment::{
    Treatment, TreatmentDraft, TreatmentPatch, TreatmentValidationError,
};
use crate::query::treatments::{
    search_treatments, sorted_by_date_descending, stats, TreatmentStats,
};
use crate::store::treatment_store::{StoreError, TreatmentStore};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Use-case error for treatment operations.
#[derive(Debug)]
pub enum ServiceError {
    /// Domain precondition failed; nothing reached the store.
    Validation(TreatmentValidationError),
    /// Persistence write failed; the caller must not assume success.
    Store(StoreError),
    /// Export serialization failed.
    Export(serde_json::Error),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "{err}"),
            Self::Export(err) => write!(f, "export failed: {err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Store(err) => Some(err),
            Self::Export(err) => Some(err),
        }
    }
}

impl From<TreatmentValidationError> for ServiceError {
    fn from(value: TreatmentValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<StoreError> for ServiceError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Use-case facade over a record store implementation.
pub struct TreatmentService<S: TreatmentStore> {
    store: S,
}

impl<S: TreatmentStore> TreatmentService<S> {
    /// Creates a service using the provided store implementation.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Validates and persists a new treatment, returning the stored record
    /// with its assigned id and creation stamp.
    pub fn log_treatment(&self, draft: &TreatmentDraft) -> Result<Treatment, ServiceError> {
        draft.validate()?;
        Ok(self.store.save_treatment(draft)?)
    }

    pub fn get_treatment(&self, id: &str) -> Option<Treatment> {
        self.store.get_treatment(id)
    }

    /// All treatments in insertion order.
    pub fn list_treatments(&self) -> Vec<Treatment> {
        self.store.list_treatments()
    }

    /// Applies a partial update. Returns `None` for an unknown id; a patched
    /// record that would violate domain preconditions is rejected before the
    /// store is touched.
    pub fn update_treatment(
        &self,
        id: &str,
        patch: &TreatmentPatch,
    ) -> Result<Option<Treatment>, ServiceError> {
        let Some(current) = self.store.get_treatment(id) else {
            return Ok(None);
        };

        let mut preview = current;
        preview.apply_patch(patch);
        let draft = TreatmentDraft {
            datetime: preview.datetime,
            weather: preview.weather,
            chemicals: preview.chemicals,
            area: preview.area,
            area_unit: preview.area_unit,
            solution_volume: preview.solution_volume,
            solution_volume_unit: preview.solution_volume_unit,
            retreatment_interval: preview.retreatment_interval,
            notes: preview.notes,
        };
        draft.validate()?;

        Ok(self.store.update_treatment(id, patch)?)
    }

    /// Deletes by id; deletion is permanent and idempotent.
    pub fn delete_treatment(&self, id: &str) -> Result<(), ServiceError> {
        Ok(self.store.delete_treatment(id)?)
    }

    /// Free-text search; a blank query yields the full collection.
    pub fn search_treatments(&self, query: &str) -> Vec<Treatment> {
        search_treatments(&self.store.list_treatments(), query)
    }

    /// Newest-first treatment log.
    pub fn treatment_log(&self) -> Vec<Treatment> {
        sorted_by_date_descending(&self.store.list_treatments())
    }

    pub fn stats(&self) -> TreatmentStats {
        stats(&self.store.list_treatments())
    }

    pub fn settings(&self) -> Settings {
        self.store.get_settings()
    }

    pub fn update_settings(&self, settings: &Settings) -> Result<(), ServiceError> {
        Ok(self.store.save_settings(settings)?)
    }

    /// CSV export of the date-sorted history.
    pub fn export_csv(&self) -> String {
        export::treatments_to_csv(&self.treatment_log())
    }

    /// Pretty-printed JSON export of the date-sorted history.
    pub fn export_json(&self) -> Result<String, ServiceError> {
        export::treatments_to_json(&self.treatment_log()).map_err(ServiceError::Export)
    }
}
