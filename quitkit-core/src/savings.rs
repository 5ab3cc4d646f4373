//! Money-saved estimate from the pre-quit smoking profile.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::program::elapsed_days;

/// Cigarettes in a standard pack, used to derive the daily cost.
pub const CIGARETTES_PER_PACK: u32 = 20;

/// Pre-quit consumption. Only feeds the savings estimate and the dosage
/// recommendation, never the scheduler. Absent or malformed settings leave
/// the fields None.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SmokingProfile {
    pub cigarettes_per_day: Option<u32>,
    pub price_per_pack: Option<f64>,
}

impl SmokingProfile {
    /// Daily spend before quitting, or None when either input is missing.
    pub fn daily_cost(&self) -> Option<f64> {
        let cigarettes = self.cigarettes_per_day?;
        let price = self.price_per_pack?;
        Some(cigarettes as f64 / CIGARETTES_PER_PACK as f64 * price)
    }
}

/// Total money saved since the quit date. Degrades to 0.0 whenever the start
/// date or the profile is incomplete; never an error.
pub fn savings(
    now: DateTime<Utc>,
    start: Option<DateTime<Utc>>,
    profile: &SmokingProfile,
) -> f64 {
    let (Some(start), Some(daily_cost)) = (start, profile.daily_cost()) else {
        return 0.0;
    };
    daily_cost * elapsed_days(now, start) as f64
}
