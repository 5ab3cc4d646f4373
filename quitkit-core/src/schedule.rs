//! Next-reminder computation: a wake-anchored increment grid with day rollover.

use chrono::{Duration, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// The daily wake/sleep window bounding when reminders may fire.
///
/// Both ends are same-day wall-clock times. Nothing enforces wake < sleep and
/// a sleep time past midnight (e.g. 01:00 meaning "next day") is not
/// understood; the comparison is literal within one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayWindow {
    pub wake: NaiveTime,
    pub sleep: NaiveTime,
}

impl Default for DayWindow {
    fn default() -> Self {
        Self {
            wake: NaiveTime::from_hms_opt(6, 0, 0).unwrap(),
            sleep: NaiveTime::from_hms_opt(22, 0, 0).unwrap(),
        }
    }
}

/// Next reminder at or after `now`, on the grid of `interval_hours` steps
/// anchored at today's wake time.
///
/// The candidate walks forward by repeated addition (the interval is
/// fractional, so each step must land on the wake-anchored grid, not on a
/// modulo of midnight). A candidate equal to `now` is advanced past. If the
/// surviving candidate lands at or after today's sleep time the whole day is
/// exhausted and the reminder rolls to tomorrow's wake time.
pub fn next_reminder(
    now: NaiveDateTime,
    window: DayWindow,
    interval_hours: f64,
) -> NaiveDateTime {
    let step = Duration::seconds((interval_hours * 3600.0).round() as i64);
    let tomorrow_wake = (now.date() + Duration::days(1)).and_time(window.wake);

    // A non-positive interval can never advance past `now`.
    if step <= Duration::zero() {
        return tomorrow_wake;
    }

    let mut candidate = now.date().and_time(window.wake);
    while candidate <= now {
        candidate = candidate + step;
    }

    let sleep = now.date().and_time(window.sleep);
    if candidate >= sleep {
        return tomorrow_wake;
    }

    candidate
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn window() -> DayWindow {
        DayWindow::default()
    }

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 1, 12)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn before_wake_fires_at_wake() {
        // 05:00 with a 06:00-22:00 window and 2h interval.
        assert_eq!(next_reminder(at(5, 0), window(), 2.0), at(6, 0));
    }

    #[test]
    fn equality_with_now_advances() {
        // Exactly at wake time, 06:00 is not reused.
        assert_eq!(next_reminder(at(6, 0), window(), 2.0), at(8, 0));
    }

    #[test]
    fn late_evening_rolls_to_tomorrow() {
        // 21:30 walks the grid to 22:00, which hits sleep exactly
        // and rolls to the next day's wake time.
        let next = next_reminder(at(21, 30), window(), 2.0);
        assert_eq!(
            next,
            NaiveDate::from_ymd_opt(2026, 1, 13)
                .unwrap()
                .and_hms_opt(6, 0, 0)
                .unwrap()
        );
    }

    #[test]
    fn fractional_interval_stays_on_wake_grid() {
        // 2.5h from 06:00: 08:30, 11:00, 13:30, ...
        assert_eq!(next_reminder(at(9, 0), window(), 2.5), at(11, 0));
        assert_eq!(next_reminder(at(11, 0), window(), 2.5), at(13, 30));
    }

    #[test]
    fn oversized_interval_skips_the_whole_day() {
        // First increment from wake already lands past sleep; the result is
        // tomorrow's wake, never a clamped time within today.
        let wide = DayWindow {
            wake: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            sleep: NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
        };
        let next = next_reminder(at(8, 0), wide, 6.0);
        assert_eq!(
            next,
            NaiveDate::from_ymd_opt(2026, 1, 13)
                .unwrap()
                .and_hms_opt(8, 0, 0)
                .unwrap()
        );
    }

    #[test]
    fn recomputation_is_idempotent() {
        let a = next_reminder(at(10, 17), window(), 3.5);
        let b = next_reminder(at(10, 17), window(), 3.5);
        assert_eq!(a, b);
    }

    #[test]
    fn midday_walks_full_grid() {
        // 13:05 on the 2h grid from 06:00 -> 14:00.
        assert_eq!(next_reminder(at(13, 5), window(), 2.0), at(14, 0));
    }
}
