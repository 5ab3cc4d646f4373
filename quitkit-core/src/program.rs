//! Program week and dosing taper for the twelve-week gum schedule.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The program caps at twelve weeks; the taper never extends past it.
pub const PROGRAM_WEEKS: u32 = 12;

const DAY_SECS: i64 = 24 * 60 * 60;
const WEEK_SECS: i64 = 7 * DAY_SECS;

/// Whole elapsed days since the program start, rounded up. A few minutes in
/// counts as day 1, matching how the savings estimate accrues.
pub fn elapsed_days(now: DateTime<Utc>, start: DateTime<Utc>) -> i64 {
    let secs = (now - start).num_seconds().abs();
    (secs + DAY_SECS - 1) / DAY_SECS
}

/// Current program week in [1, 12]. Days 1-7 are week 1, days 8-14 week 2,
/// and so on; an absent start date deterministically yields week 1.
pub fn program_week(now: DateTime<Utc>, start: Option<DateTime<Utc>>) -> u32 {
    let Some(start) = start else {
        return 1;
    };
    let secs = (now - start).num_seconds().abs();
    let weeks = (secs + WEEK_SECS - 1) / WEEK_SECS;
    (weeks as u32).clamp(1, PROGRAM_WEEKS)
}

/// Hours between gum reminders: 2h in week 1, widening by half an hour per
/// week up to 7.5h in week 12.
pub fn dosing_interval_hours(week: u32) -> f64 {
    2.0 + 0.5 * week.saturating_sub(1) as f64
}

/// Recommended gum strength, classified from pre-quit consumption.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GumDose {
    /// Fewer than 7 cigarettes/day.
    Half2Mg,
    /// 7 to 20 cigarettes/day inclusive.
    One2Mg,
    /// More than 20 cigarettes/day.
    One4Mg,
}

impl GumDose {
    pub fn for_cigarettes_per_day(cigarettes_per_day: u32) -> Self {
        if cigarettes_per_day < 7 {
            GumDose::Half2Mg
        } else if cigarettes_per_day <= 20 {
            GumDose::One2Mg
        } else {
            GumDose::One4Mg
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            GumDose::Half2Mg => "Half of 2mg gum",
            GumDose::One2Mg => "1x 2mg gum",
            GumDose::One4Mg => "1x 4mg gum",
        }
    }
}
