use chrono::{TimeZone, Utc};
use vinelog_core::db::open_db_in_memory;
use vinelog_core::{
    AreaUnit, ChemicalApplication, ServiceError, SqliteTreatmentStore, Treatment, TreatmentDraft,
    TreatmentPatch, TreatmentService, TreatmentStore, VolumeUnit, WeatherReading,
};

fn chemical(chemical_id: u32, name: &str, rate: f64, unit: &str) -> ChemicalApplication {
    ChemicalApplication {
        chemical_id,
        name: name.to_string(),
        kind: "Fungicide".to_string(),
        moa_group: "M3".to_string(),
        rate,
        unit: unit.to_string(),
    }
}

fn draft(notes: Option<&str>) -> TreatmentDraft {
    TreatmentDraft {
        datetime: Utc.with_ymd_and_hms(2025, 6, 14, 8, 30, 0).unwrap(),
        weather: WeatherReading {
            temperature: Some(71.0),
            humidity: Some(60.0),
            wind_speed: Some(4.0),
            conditions: Some("overcast".to_string()),
        },
        chemicals: vec![chemical(1, "Mancozeb 75DF", 2.0, "lb")],
        area: 2000.0,
        area_unit: AreaUnit::SquareFeet,
        solution_volume: 40.0,
        solution_volume_unit: VolumeUnit::Gallons,
        retreatment_interval: Some(14),
        notes: notes.map(str::to_string),
    }
}

fn fields_match(stored: &Treatment, submitted: &TreatmentDraft) -> bool {
    stored.datetime == submitted.datetime
        && stored.weather == submitted.weather
        && stored.chemicals == submitted.chemicals
        && stored.area == submitted.area
        && stored.solution_volume == submitted.solution_volume
        && stored.retreatment_interval == submitted.retreatment_interval
        && stored.notes == submitted.notes
}

#[test]
fn save_then_fetch_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteTreatmentStore::new(&conn);

    let submitted = draft(Some("first spray of the season"));
    let saved = store.save_treatment(&submitted).unwrap();
    assert!(!saved.id.is_empty());
    assert!(saved.updated_at.is_none());

    let fetched = store.get_treatment(&saved.id).unwrap();
    assert_eq!(fetched, saved);
    assert!(fields_match(&fetched, &submitted));
}

#[test]
fn saved_ids_are_unique_within_a_millisecond() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteTreatmentStore::new(&conn);

    let first = store.save_treatment(&draft(None)).unwrap();
    let second = store.save_treatment(&draft(None)).unwrap();
    let third = store.save_treatment(&draft(None)).unwrap();

    assert_ne!(first.id, second.id);
    assert_ne!(second.id, third.id);
    assert_ne!(first.id, third.id);
}

#[test]
fn list_preserves_insertion_order() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteTreatmentStore::new(&conn);

    let mut earlier = draft(Some("earlier"));
    earlier.datetime = Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap();
    let mut later = draft(Some("later"));
    later.datetime = Utc.with_ymd_and_hms(2025, 5, 1, 9, 0, 0).unwrap();

    let first = store.save_treatment(&earlier).unwrap();
    let second = store.save_treatment(&later).unwrap();

    let listed = store.list_treatments();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].id, first.id);
    assert_eq!(listed[1].id, second.id);
}

#[test]
fn get_unknown_id_is_none() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteTreatmentStore::new(&conn);
    assert!(store.get_treatment("1700000000000").is_none());
}

#[test]
fn update_merges_fields_and_stamps_updated_at() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteTreatmentStore::new(&conn);

    let saved = store.save_treatment(&draft(None)).unwrap();
    let patch = TreatmentPatch {
        area: Some(3000.0),
        notes: Some(Some("extended to lower block".to_string())),
        ..TreatmentPatch::default()
    };

    let updated = store.update_treatment(&saved.id, &patch).unwrap().unwrap();
    assert_eq!(updated.area, 3000.0);
    assert_eq!(updated.notes.as_deref(), Some("extended to lower block"));
    assert_eq!(updated.chemicals, saved.chemicals);
    assert!(updated.updated_at.is_some());

    let fetched = store.get_treatment(&saved.id).unwrap();
    assert_eq!(fetched, updated);
}

#[test]
fn update_unknown_id_is_a_defined_no_match() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteTreatmentStore::new(&conn);

    let result = store
        .update_treatment("1700000000000", &TreatmentPatch::default())
        .unwrap();
    assert!(result.is_none());
}

#[test]
fn delete_then_get_yields_absent_and_is_idempotent() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteTreatmentStore::new(&conn);

    let saved = store.save_treatment(&draft(None)).unwrap();
    store.delete_treatment(&saved.id).unwrap();
    assert!(store.get_treatment(&saved.id).is_none());

    // Deleting again, or deleting an id that never existed, still succeeds.
    store.delete_treatment(&saved.id).unwrap();
    store.delete_treatment("1700000000000").unwrap();
}

#[test]
fn corrupt_treatments_blob_degrades_to_empty() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO kv_blobs (key, value) VALUES ('vine_treatments', 'not json at all');",
        [],
    )
    .unwrap();

    let store = SqliteTreatmentStore::new(&conn);
    assert!(store.list_treatments().is_empty());
}

#[test]
fn save_after_corrupt_blob_starts_a_fresh_collection() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO kv_blobs (key, value) VALUES ('vine_treatments', '{broken');",
        [],
    )
    .unwrap();

    let store = SqliteTreatmentStore::new(&conn);
    let saved = store.save_treatment(&draft(None)).unwrap();

    let listed = store.list_treatments();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, saved.id);
}

#[test]
fn service_rejects_draft_without_chemicals_before_store() {
    let conn = open_db_in_memory().unwrap();
    let service = TreatmentService::new(SqliteTreatmentStore::new(&conn));

    let mut invalid = draft(None);
    invalid.chemicals.clear();

    let err = service.log_treatment(&invalid).unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));
    assert!(service.list_treatments().is_empty());
}

#[test]
fn service_rejects_update_that_breaks_preconditions() {
    let conn = open_db_in_memory().unwrap();
    let service = TreatmentService::new(SqliteTreatmentStore::new(&conn));

    let saved = service.log_treatment(&draft(None)).unwrap();
    let patch = TreatmentPatch {
        chemicals: Some(Vec::new()),
        ..TreatmentPatch::default()
    };

    let err = service.update_treatment(&saved.id, &patch).unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));

    // The stored record is untouched.
    let fetched = service.get_treatment(&saved.id).unwrap();
    assert_eq!(fetched.chemicals.len(), 1);
    assert!(fetched.updated_at.is_none());
}
