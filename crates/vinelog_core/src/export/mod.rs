//! Treatment history export formats.
//!
//! # Responsibility
//! - Render the treatment collection as CSV and pretty-printed JSON.
//!
//! # Invariants
//! - The CSV column count is fixed: commas inside notes are replaced with
//!   semicolons and text fields are quoted.
//! - JSON output is structurally identical to the persisted form.

use crate::model::treatment::Treatment;

const CSV_HEADER: &str = "Date,Chemicals,Area (sq ft),Temperature (F),Humidity (%),Wind (mph),Notes";

/// Renders treatments as CSV, one row per treatment under a fixed header.
pub fn treatments_to_csv(treatments: &[Treatment]) -> String {
    let mut csv = String::from(CSV_HEADER);
    csv.push('\n');

    for treatment in treatments {
        let date = treatment.display_datetime();
        let chemicals = treatment
            .chemicals
            .iter()
            .map(|chemical| chemical.name.as_str())
            .collect::<Vec<_>>()
            .join("; ");
        let temperature = optional_number(treatment.weather.temperature);
        let humidity = optional_number(treatment.weather.humidity);
        let wind = optional_number(treatment.weather.wind_speed);
        let notes = treatment
            .notes
            .as_deref()
            .unwrap_or_default()
            .replace(',', ";");

        csv.push_str(&format!(
            "\"{date}\",\"{chemicals}\",{area},{temperature},{humidity},{wind},\"{notes}\"\n",
            area = treatment.area,
        ));
    }

    csv
}

/// Renders treatments as pretty-printed JSON in the persisted shape.
pub fn treatments_to_json(treatments: &[Treatment]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(treatments)
}

fn optional_number(value: Option<f64>) -> String {
    value.map(|number| number.to_string()).unwrap_or_default()
}
