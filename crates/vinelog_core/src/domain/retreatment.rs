//! Retreatment-due derivation.
//!
//! # Responsibility
//! - Classify a treatment as overdue or upcoming relative to its
//!   retreatment interval.
//!
//! # Invariants
//! - Day arithmetic floors, so a treatment becomes overdue only once a full
//!   interval of whole days has elapsed.
//! - Treatments without an interval have no status at all.

use crate::model::treatment::Treatment;
use chrono::{DateTime, Utc};

const SECONDS_PER_DAY: i64 = 86_400;

/// Follow-up recommendation for a treatment with a retreatment interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetreatmentStatus {
    /// The interval has elapsed; follow-up is `days` overdue.
    Overdue { days: i64 },
    /// Follow-up is recommended in `days` days.
    Upcoming { days: i64 },
}

/// Derives the retreatment status of `treatment` as of `now`.
///
/// Returns `None` when no interval was recorded. The caller supplies `now`
/// so the derivation stays pure and testable.
pub fn retreatment_status(treatment: &Treatment, now: DateTime<Utc>) -> Option<RetreatmentStatus> {
    let interval = i64::from(treatment.retreatment_interval?);
    let days_since = (now - treatment.datetime)
        .num_seconds()
        .div_euclid(SECONDS_PER_DAY);

    if days_since >= interval {
        Some(RetreatmentStatus::Overdue {
            days: days_since - interval,
        })
    } else {
        Some(RetreatmentStatus::Upcoming {
            days: interval - days_since,
        })
    }
}
