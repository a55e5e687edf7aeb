//! Treatment domain model.
//!
//! # Responsibility
//! - Define the canonical record for one spray application event.
//! - Provide draft validation and partial-update merging.
//!
//! # Invariants
//! - `id` is store-assigned, unique, and never reused.
//! - A persisted treatment has at least one chemical application and a
//!   strictly positive area.
//! - `created_at`/`updated_at` are stamped by the store, never by callers.
//! - Serde field names are the persisted/export contract and must not drift.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Stable identifier for a persisted treatment.
///
/// The store assigns epoch-millisecond strings; kept as an alias to make
/// semantic intent explicit in signatures.
pub type TreatmentId = String;

/// Fixed area unit for recorded treatments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AreaUnit {
    #[default]
    #[serde(rename = "sq ft")]
    SquareFeet,
}

/// Fixed unit for the derived spray solution volume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum VolumeUnit {
    #[default]
    #[serde(rename = "gal")]
    Gallons,
}

/// Weather readings captured at application time. All fields optional: the
/// operator may record any subset, or none.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherReading {
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub wind_speed: Option<f64>,
    pub conditions: Option<String>,
}

/// One chemical line item on a treatment.
///
/// Rate is a structured value/unit pair; the unit is the bare measure label
/// (`"lb"`, `"oz"`, ...) applied per acre.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChemicalApplication {
    /// Reference id into the chemical catalog.
    #[serde(rename = "id")]
    pub chemical_id: u32,
    pub name: String,
    /// Serialized as `type` to match the persisted schema naming.
    #[serde(rename = "type")]
    pub kind: String,
    /// Mode-of-action classification code, kept for rotation planning.
    pub moa_group: String,
    /// Applied rate per acre; must be strictly positive.
    pub rate: f64,
    /// Bare measure label for `rate`, e.g. `"lb"`.
    pub unit: String,
}

/// Canonical record for one spray application event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Treatment {
    pub id: TreatmentId,
    /// When the application happened; user-supplied, not necessarily "now".
    pub datetime: DateTime<Utc>,
    pub weather: WeatherReading,
    pub chemicals: Vec<ChemicalApplication>,
    /// Treated area in `area_unit`; strictly positive.
    pub area: f64,
    pub area_unit: AreaUnit,
    /// Snapshot of the derived spray volume taken at save time. Deliberately
    /// not recomputed on read so stored history is stable even if the
    /// derivation formula changes later.
    pub solution_volume: f64,
    pub solution_volume_unit: VolumeUnit,
    /// Days until a follow-up application is recommended.
    pub retreatment_interval: Option<u32>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Caller-supplied fields for a new treatment, before the store assigns
/// identity and audit stamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreatmentDraft {
    pub datetime: DateTime<Utc>,
    pub weather: WeatherReading,
    pub chemicals: Vec<ChemicalApplication>,
    pub area: f64,
    pub area_unit: AreaUnit,
    pub solution_volume: f64,
    pub solution_volume_unit: VolumeUnit,
    pub retreatment_interval: Option<u32>,
    pub notes: Option<String>,
}

/// Partial update for an existing treatment. `None` fields are left
/// unchanged by the merge.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TreatmentPatch {
    pub datetime: Option<DateTime<Utc>>,
    pub weather: Option<WeatherReading>,
    pub chemicals: Option<Vec<ChemicalApplication>>,
    pub area: Option<f64>,
    pub solution_volume: Option<f64>,
    pub retreatment_interval: Option<Option<u32>>,
    pub notes: Option<Option<String>>,
}

/// Validation error for draft and patched treatments.
#[derive(Debug, Clone, PartialEq)]
pub enum TreatmentValidationError {
    /// A treatment must carry at least one chemical application.
    NoChemicals,
    /// Area must be strictly positive; zero is treated as missing input.
    NonPositiveArea(f64),
    /// Every chemical rate must be strictly positive.
    NonPositiveRate { chemical: String, rate: f64 },
    /// Caller-supplied datetime text could not be parsed.
    UnparseableDatetime(String),
}

impl Display for TreatmentValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoChemicals => write!(f, "treatment requires at least one chemical"),
            Self::NonPositiveArea(area) => {
                write!(f, "treatment area must be positive, got {area}")
            }
            Self::NonPositiveRate { chemical, rate } => {
                write!(f, "rate for `{chemical}` must be positive, got {rate}")
            }
            Self::UnparseableDatetime(value) => {
                write!(f, "unparseable treatment datetime `{value}`")
            }
        }
    }
}

impl Error for TreatmentValidationError {}

impl TreatmentDraft {
    /// Checks the persistence preconditions for this draft.
    ///
    /// The store does not re-check these; callers must validate before any
    /// save request reaches persistence.
    pub fn validate(&self) -> Result<(), TreatmentValidationError> {
        if self.chemicals.is_empty() {
            return Err(TreatmentValidationError::NoChemicals);
        }
        if !(self.area > 0.0) {
            return Err(TreatmentValidationError::NonPositiveArea(self.area));
        }
        for chemical in &self.chemicals {
            if !(chemical.rate > 0.0) {
                return Err(TreatmentValidationError::NonPositiveRate {
                    chemical: chemical.name.clone(),
                    rate: chemical.rate,
                });
            }
        }
        Ok(())
    }
}

impl Treatment {
    /// Applies a partial update in place. Audit stamping is the store's job.
    pub fn apply_patch(&mut self, patch: &TreatmentPatch) {
        if let Some(datetime) = patch.datetime {
            self.datetime = datetime;
        }
        if let Some(weather) = &patch.weather {
            self.weather = weather.clone();
        }
        if let Some(chemicals) = &patch.chemicals {
            self.chemicals = chemicals.clone();
        }
        if let Some(area) = patch.area {
            self.area = area;
        }
        if let Some(volume) = patch.solution_volume {
            self.solution_volume = volume;
        }
        if let Some(interval) = patch.retreatment_interval {
            self.retreatment_interval = interval;
        }
        if let Some(notes) = &patch.notes {
            self.notes = notes.clone();
        }
    }

    /// Date portion formatted for search and list display (`MM/DD/YYYY`).
    pub fn display_date(&self) -> String {
        self.datetime.format("%m/%d/%Y").to_string()
    }

    /// Full timestamp formatted for detail display and CSV export.
    pub fn display_datetime(&self) -> String {
        self.datetime.format("%m/%d/%Y %H:%M").to_string()
    }
}

/// Parses user-entered datetime text.
///
/// Accepts RFC 3339 as well as the `YYYY-MM-DDTHH:MM[:SS]` shape produced by
/// datetime-local form inputs (interpreted as UTC).
pub fn parse_datetime(value: &str) -> Result<DateTime<Utc>, TreatmentValidationError> {
    let trimmed = value.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(parsed.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(parsed.and_utc());
        }
    }
    Err(TreatmentValidationError::UnparseableDatetime(
        trimmed.to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_chemical() -> ChemicalApplication {
        ChemicalApplication {
            chemical_id: 1,
            name: "Mancozeb 75DF".to_string(),
            kind: "Fungicide".to_string(),
            moa_group: "M3".to_string(),
            rate: 2.0,
            unit: "lb".to_string(),
        }
    }

    fn sample_draft() -> TreatmentDraft {
        TreatmentDraft {
            datetime: Utc.with_ymd_and_hms(2025, 6, 14, 8, 30, 0).unwrap(),
            weather: WeatherReading::default(),
            chemicals: vec![sample_chemical()],
            area: 2000.0,
            area_unit: AreaUnit::SquareFeet,
            solution_volume: 40.0,
            solution_volume_unit: VolumeUnit::Gallons,
            retreatment_interval: Some(14),
            notes: None,
        }
    }

    #[test]
    fn valid_draft_passes_validation() {
        assert!(sample_draft().validate().is_ok());
    }

    #[test]
    fn draft_without_chemicals_is_rejected() {
        let mut draft = sample_draft();
        draft.chemicals.clear();
        assert_eq!(
            draft.validate(),
            Err(TreatmentValidationError::NoChemicals)
        );
    }

    #[test]
    fn zero_area_is_rejected() {
        let mut draft = sample_draft();
        draft.area = 0.0;
        assert_eq!(
            draft.validate(),
            Err(TreatmentValidationError::NonPositiveArea(0.0))
        );
    }

    #[test]
    fn zero_rate_is_rejected() {
        let mut draft = sample_draft();
        draft.chemicals[0].rate = 0.0;
        assert!(matches!(
            draft.validate(),
            Err(TreatmentValidationError::NonPositiveRate { .. })
        ));
    }

    #[test]
    fn parse_datetime_accepts_form_input_shape() {
        let parsed = parse_datetime("2025-06-14T08:30").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2025, 6, 14, 8, 30, 0).unwrap());
    }

    #[test]
    fn parse_datetime_accepts_rfc3339() {
        let parsed = parse_datetime("2025-06-14T08:30:00Z").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2025, 6, 14, 8, 30, 0).unwrap());
    }

    #[test]
    fn parse_datetime_rejects_garbage() {
        assert!(matches!(
            parse_datetime("next tuesday"),
            Err(TreatmentValidationError::UnparseableDatetime(_))
        ));
    }

    #[test]
    fn serde_field_names_match_persisted_contract() {
        let draft = sample_draft();
        let value = serde_json::to_value(&draft).unwrap();
        assert!(value.get("areaUnit").is_some());
        assert_eq!(value["areaUnit"], "sq ft");
        assert_eq!(value["solutionVolumeUnit"], "gal");
        assert_eq!(value["chemicals"][0]["type"], "Fungicide");
        assert_eq!(value["chemicals"][0]["moaGroup"], "M3");
        assert_eq!(value["chemicals"][0]["id"], 1);
    }

    #[test]
    fn patch_merge_touches_only_set_fields() {
        let draft = sample_draft();
        let mut treatment = Treatment {
            id: "1718353800000".to_string(),
            datetime: draft.datetime,
            weather: draft.weather.clone(),
            chemicals: draft.chemicals.clone(),
            area: draft.area,
            area_unit: draft.area_unit,
            solution_volume: draft.solution_volume,
            solution_volume_unit: draft.solution_volume_unit,
            retreatment_interval: draft.retreatment_interval,
            notes: draft.notes.clone(),
            created_at: draft.datetime,
            updated_at: None,
        };

        let patch = TreatmentPatch {
            notes: Some(Some("wind picked up mid-application".to_string())),
            retreatment_interval: Some(None),
            ..TreatmentPatch::default()
        };
        treatment.apply_patch(&patch);

        assert_eq!(
            treatment.notes.as_deref(),
            Some("wind picked up mid-application")
        );
        assert_eq!(treatment.retreatment_interval, None);
        assert_eq!(treatment.area, 2000.0);
        assert_eq!(treatment.chemicals.len(), 1);
    }
}
