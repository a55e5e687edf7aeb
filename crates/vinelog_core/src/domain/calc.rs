//! Dose and volume arithmetic.
//!
//! # Responsibility
//! - Derive finished solution volume and per-chemical applied amounts.
//! - Recover bare unit labels from legacy combined rate strings.
//!
//! # Invariants
//! - All functions are pure; the persisted `solution_volume` on a treatment
//!   is a save-time snapshot and is never recomputed on read.

use once_cell::sync::Lazy;
use regex::Regex;

/// Square feet per acre, used to convert recorded areas to per-acre rates.
pub const SQ_FT_PER_ACRE: f64 = 43_560.0;

static NUMERAL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[0-9.]+").expect("valid numeral regex"));

/// Finished spray solution volume in gallons.
///
/// `gallons_per_1000` is the settings default application rate (gallons per
/// 1000 area-units, default 20).
pub fn solution_volume(area_sq_ft: f64, gallons_per_1000: f64) -> f64 {
    (area_sq_ft / 1000.0) * gallons_per_1000
}

/// Amount of product needed for the treated area, in the rate's own unit.
///
/// Rates are expressed per acre while areas are recorded in square feet.
pub fn applied_amount(rate_per_acre: f64, area_sq_ft: f64) -> f64 {
    rate_per_acre * (area_sq_ft / SQ_FT_PER_ACRE)
}

/// Extracts the bare measure label from a legacy combined rate string.
///
/// Historical catalogs stored rates as display strings like `"2 lb/acre"`;
/// the label is whatever precedes the `/` with numerals stripped. New data
/// carries structured value/unit pairs and never needs this.
pub fn unit_label(raw: &str) -> String {
    let measure = raw.split('/').next().unwrap_or_default();
    NUMERAL_RE.replace_all(measure, "").trim().to_string()
}
