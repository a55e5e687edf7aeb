//! Treatment search, ordering, and statistics.
//!
//! # Responsibility
//! - Filter treatments by free-text query.
//! - Produce the newest-first log ordering and dashboard statistics.
//!
//! # Invariants
//! - A blank query returns the input collection unchanged.
//! - Sorting is stable: equal datetimes keep their input order.

use crate::model::treatment::Treatment;
use chrono::{DateTime, Utc};

/// Dashboard statistics for a treatment collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreatmentStats {
    pub total_treatments: usize,
    pub last_treatment_date: Option<DateTime<Utc>>,
}

impl TreatmentStats {
    /// Display label for the most recent treatment date.
    pub fn last_treatment_label(&self) -> String {
        self.last_treatment_date
            .map(|date| date.format("%m/%d/%Y").to_string())
            .unwrap_or_else(|| "Never".to_string())
    }
}

/// Case-insensitive substring search over chemical names, the formatted
/// date, and notes. A blank query returns every treatment unchanged.
pub fn search_treatments(treatments: &[Treatment], query: &str) -> Vec<Treatment> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return treatments.to_vec();
    }

    treatments
        .iter()
        .filter(|treatment| {
            let chemical_names = treatment
                .chemicals
                .iter()
                .map(|chemical| chemical.name.to_lowercase())
                .collect::<Vec<_>>()
                .join(" ");
            let date_text = treatment.display_date();
            let notes = treatment
                .notes
                .as_deref()
                .unwrap_or_default()
                .to_lowercase();

            chemical_names.contains(&needle)
                || date_text.contains(&needle)
                || notes.contains(&needle)
        })
        .cloned()
        .collect()
}

/// Newest-first ordering for the treatment log. Stable and idempotent.
pub fn sorted_by_date_descending(treatments: &[Treatment]) -> Vec<Treatment> {
    let mut sorted = treatments.to_vec();
    sorted.sort_by(|a, b| b.datetime.cmp(&a.datetime));
    sorted
}

/// Count and most-recent-date summary for the dashboard.
pub fn stats(treatments: &[Treatment]) -> TreatmentStats {
    TreatmentStats {
        total_treatments: treatments.len(),
        last_treatment_date: treatments
            .iter()
            .map(|treatment| treatment.datetime)
            .max(),
    }
}
