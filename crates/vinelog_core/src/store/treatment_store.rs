//! Treatment record store contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide durable CRUD over three independently keyed collections
//!   (treatments, chemical reference, settings) in one key-value medium.
//! - Own record id assignment and audit timestamps.
//!
//! # Invariants
//! - Each collection round-trips as one serialized JSON blob, so every
//!   mutation re-encodes and writes the whole collection in one statement.
//! - Read paths degrade to empty/default on corrupt data; write failures
//!   propagate to the caller.
//! - Assigned ids are unique across the collection for the process lifetime.

use crate::db::DbError;
use crate::model::chemical::ChemicalRef;
use crate::model::settings::Settings;
use crate::model::treatment::{Treatment, TreatmentDraft, TreatmentPatch};
use chrono::Utc;
use log::{info, warn};
use rusqlite::{params, Connection, OptionalExtension};
use std::error::Error;
use std::fmt::{Display, Formatter};

const KEY_TREATMENTS: &str = "vine_treatments";
const KEY_CHEMICALS: &str = "vine_chemicals";
const KEY_SETTINGS: &str = "vine_settings";

pub type StoreResult<T> = Result<T, StoreError>;

/// Write-path error for record persistence.
///
/// Read paths never surface this type; they degrade per the store contract.
#[derive(Debug)]
pub enum StoreError {
    Db(DbError),
    /// A collection could not be re-encoded for persistence. The prior
    /// on-disk state is left untouched.
    Encode(serde_json::Error),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Encode(err) => write!(f, "failed to encode collection: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Encode(err) => Some(err),
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Encode(value)
    }
}

/// Durable CRUD contract for treatment records and companion collections.
///
/// Kept as a trait so services can be exercised against test doubles.
pub trait TreatmentStore {
    /// Returns all treatments in insertion order. Corrupt or missing data
    /// yields an empty list, never an error.
    fn list_treatments(&self) -> Vec<Treatment>;

    /// Assigns id and creation stamp, appends, persists the whole
    /// collection, and returns the stored record.
    fn save_treatment(&self, draft: &TreatmentDraft) -> StoreResult<Treatment>;

    fn get_treatment(&self, id: &str) -> Option<Treatment>;

    /// Merges partial fields onto the existing record and stamps
    /// `updated_at`. Returns `None` without touching storage when the id is
    /// unknown.
    fn update_treatment(&self, id: &str, patch: &TreatmentPatch) -> StoreResult<Option<Treatment>>;

    /// Removes by id. Idempotent: deleting an absent id still succeeds
    /// because the end state is "not present".
    fn delete_treatment(&self, id: &str) -> StoreResult<()>;

    /// Reserved chemical reference collection; empty until populated.
    fn list_chemicals(&self) -> Vec<ChemicalRef>;

    fn save_chemicals(&self, chemicals: &[ChemicalRef]) -> StoreResult<()>;

    /// Returns persisted settings, or the documented defaults when nothing
    /// has been saved yet (or the stored blob is corrupt).
    fn get_settings(&self) -> Settings;

    /// Wholesale overwrite of the settings record.
    fn save_settings(&self, settings: &Settings) -> StoreResult<()>;
}

/// SQLite-backed record store over the `kv_blobs` medium.
pub struct SqliteTreatmentStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTreatmentStore<'conn> {
    /// Wraps a connection opened through `db::open_db`, which guarantees the
    /// `kv_blobs` schema exists.
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn read_blob(&self, key: &str) -> Option<String> {
        let result = self
            .conn
            .query_row(
                "SELECT value FROM kv_blobs WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional();
        match result {
            Ok(value) => value,
            Err(err) => {
                warn!("event=blob_read module=store status=error key={key} error={err}");
                None
            }
        }
    }

    fn write_blob(&self, key: &str, value: &str) -> StoreResult<()> {
        // INSERT OR REPLACE is a single atomic statement, so a failed write
        // leaves the prior blob intact.
        self.conn.execute(
            "INSERT OR REPLACE INTO kv_blobs (key, value, updated_at)
             VALUES (?1, ?2, strftime('%s', 'now') * 1000);",
            params![key, value],
        )?;
        Ok(())
    }

    fn read_collection<T: serde::de::DeserializeOwned>(&self, key: &str) -> Vec<T> {
        let Some(raw) = self.read_blob(key) else {
            return Vec::new();
        };
        match serde_json::from_str(&raw) {
            Ok(records) => records,
            Err(err) => {
                warn!("event=blob_decode module=store status=error key={key} error={err}");
                Vec::new()
            }
        }
    }

    fn write_collection<T: serde::Serialize>(&self, key: &str, records: &[T]) -> StoreResult<()> {
        let encoded = serde_json::to_string(records)?;
        self.write_blob(key, &encoded)
    }

    fn assign_id(existing: &[Treatment]) -> String {
        let mut candidate = Utc::now().timestamp_millis();
        // Two saves can land in the same millisecond; bump until unique
        // within the collection.
        while existing
            .iter()
            .any(|treatment| treatment.id == candidate.to_string())
        {
            candidate += 1;
        }
        candidate.to_string()
    }
}

impl TreatmentStore for SqliteTreatmentStore<'_> {
    fn list_treatments(&self) -> Vec<Treatment> {
        self.read_collection(KEY_TREATMENTS)
    }

    fn save_treatment(&self, draft: &TreatmentDraft) -> StoreResult<Treatment> {
        let mut treatments = self.list_treatments();
        let treatment = Treatment {
            id: Self::assign_id(&treatments),
            datetime: draft.datetime,
            weather: draft.weather.clone(),
            chemicals: draft.chemicals.clone(),
            area: draft.area,
            area_unit: draft.area_unit,
            solution_volume: draft.solution_volume,
            solution_volume_unit: draft.solution_volume_unit,
            retreatment_interval: draft.retreatment_interval,
            notes: draft.notes.clone(),
            created_at: Utc::now(),
            updated_at: None,
        };

        treatments.push(treatment.clone());
        self.write_collection(KEY_TREATMENTS, &treatments)?;
        info!(
            "event=treatment_save module=store status=ok id={} chemicals={}",
            treatment.id,
            treatment.chemicals.len()
        );
        Ok(treatment)
    }

    fn get_treatment(&self, id: &str) -> Option<Treatment> {
        self.list_treatments()
            .into_iter()
            .find(|treatment| treatment.id == id)
    }

    fn update_treatment(&self, id: &str, patch: &TreatmentPatch) -> StoreResult<Option<Treatment>> {
        let mut treatments = self.list_treatments();
        let Some(index) = treatments.iter().position(|treatment| treatment.id == id) else {
            return Ok(None);
        };

        treatments[index].apply_patch(patch);
        treatments[index].updated_at = Some(Utc::now());
        let updated = treatments[index].clone();

        self.write_collection(KEY_TREATMENTS, &treatments)?;
        info!("event=treatment_update module=store status=ok id={id}");
        Ok(Some(updated))
    }

    fn delete_treatment(&self, id: &str) -> StoreResult<()> {
        let mut treatments = self.list_treatments();
        let before = treatments.len();
        treatments.retain(|treatment| treatment.id != id);

        self.write_collection(KEY_TREATMENTS, &treatments)?;
        info!(
            "event=treatment_delete module=store status=ok id={id} removed={}",
            before - treatments.len()
        );
        Ok(())
    }

    fn list_chemicals(&self) -> Vec<ChemicalRef> {
        self.read_collection(KEY_CHEMICALS)
    }

    fn save_chemicals(&self, chemicals: &[ChemicalRef]) -> StoreResult<()> {
        self.write_collection(KEY_CHEMICALS, chemicals)
    }

    fn get_settings(&self) -> Settings {
        let Some(raw) = self.read_blob(KEY_SETTINGS) else {
            return Settings::default();
        };
        match serde_json::from_str(&raw) {
            Ok(settings) => settings,
            Err(err) => {
                warn!(
                    "event=blob_decode module=store status=error key={KEY_SETTINGS} error={err}"
                );
                Settings::default()
            }
        }
    }

    fn save_settings(&self, settings: &Settings) -> StoreResult<()> {
        let encoded = serde_json::to_string(settings)?;
        self.write_blob(KEY_SETTINGS, &encoded)?;
        info!("event=settings_save module=store status=ok");
        Ok(())
    }
}
