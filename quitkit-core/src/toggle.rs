//! Reminder toggle: the only stateful protocol in the core.
//!
//! Two states, two transitions. Turning on persists the flag and then
//! schedules the next reminder; turning off cancels everything pending and
//! clears the next reminder. No hidden state survives a disable/enable
//! cycle beyond what is in the store. Settings edits while enabled do NOT
//! reschedule; the stale schedule stands until the next off/on cycle.

use anyhow::Result;
use chrono::{DateTime, NaiveDateTime, Utc};

use crate::notify::{Dispatcher, PermissionStatus, ReminderPayload};
use crate::program::{dosing_interval_hours, program_week};
use crate::schedule::next_reminder;
use crate::state::load_state;
use crate::store::{KvStore, keys};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReminderState {
    Disabled,
    /// Enabled with the scheduled fire time, or None when the dispatcher
    /// could not schedule (no permission / unsupported target).
    Enabled { next: Option<NaiveDateTime> },
}

impl ReminderState {
    pub fn next(&self) -> Option<NaiveDateTime> {
        match self {
            ReminderState::Enabled { next } => *next,
            ReminderState::Disabled => None,
        }
    }
}

/// Enable reminders and schedule the next one.
///
/// The `alarmsEnabled` write happens-before the schedule call: a crash in
/// between leaves the flag set with nothing scheduled, recoverable by
/// toggling again. `now_utc` drives the program week, `now_local` the day
/// window; both must describe the same instant.
pub fn turn_on(
    store: &mut impl KvStore,
    dispatcher: &mut impl Dispatcher,
    now_utc: DateTime<Utc>,
    now_local: NaiveDateTime,
    payload: &ReminderPayload,
) -> Result<ReminderState> {
    store.set(keys::ALARMS_ENABLED, "true")?;

    if dispatcher.permission() != PermissionStatus::Granted {
        return Ok(ReminderState::Enabled { next: None });
    }

    let state = load_state(store);
    let week = program_week(now_utc, state.start_date);
    let interval = dosing_interval_hours(week);
    let next = next_reminder(now_local, state.window, interval);

    dispatcher.schedule(next, payload)?;
    Ok(ReminderState::Enabled { next: Some(next) })
}

/// Disable reminders: persist the flag and invalidate every pending
/// notification, not just the most recent one.
pub fn turn_off(
    store: &mut impl KvStore,
    dispatcher: &mut impl Dispatcher,
) -> Result<ReminderState> {
    store.set(keys::ALARMS_ENABLED, "false")?;
    dispatcher.cancel_all()?;
    Ok(ReminderState::Disabled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::DayWindow;
    use crate::store::MemoryStore;
    use chrono::TimeZone;

    #[derive(Debug, Default)]
    struct RecordingDispatcher {
        denied: bool,
        scheduled: Vec<NaiveDateTime>,
        cancels: usize,
    }

    impl Dispatcher for RecordingDispatcher {
        fn permission(&self) -> PermissionStatus {
            if self.denied {
                PermissionStatus::Denied
            } else {
                PermissionStatus::Granted
            }
        }

        fn schedule(&mut self, at: NaiveDateTime, _payload: &ReminderPayload) -> Result<()> {
            self.scheduled.push(at);
            Ok(())
        }

        fn cancel_all(&mut self) -> Result<()> {
            self.cancels += 1;
            Ok(())
        }
    }

    fn fixed_now() -> (DateTime<Utc>, NaiveDateTime) {
        let now_utc = Utc.with_ymd_and_hms(2026, 1, 12, 15, 0, 0).unwrap();
        (now_utc, now_utc.naive_utc())
    }

    #[test]
    fn turn_on_persists_flag_and_schedules() {
        let mut store = MemoryStore::new();
        let mut dispatcher = RecordingDispatcher::default();
        let (now_utc, now_local) = fixed_now();

        let state = turn_on(
            &mut store,
            &mut dispatcher,
            now_utc,
            now_local,
            &ReminderPayload::default(),
        )
        .unwrap();

        assert_eq!(store.get(keys::ALARMS_ENABLED), Some("true".to_string()));
        assert_eq!(dispatcher.scheduled.len(), 1);
        assert_eq!(state.next(), Some(dispatcher.scheduled[0]));

        // Fresh store: week 1, 2h grid from 06:00, now 15:00 -> 16:00.
        let expected = next_reminder(now_local, DayWindow::default(), 2.0);
        assert_eq!(state.next(), Some(expected));
    }

    #[test]
    fn turn_off_cancels_everything() {
        let mut store = MemoryStore::new();
        let mut dispatcher = RecordingDispatcher::default();
        let (now_utc, now_local) = fixed_now();

        turn_on(
            &mut store,
            &mut dispatcher,
            now_utc,
            now_local,
            &ReminderPayload::default(),
        )
        .unwrap();
        let state = turn_off(&mut store, &mut dispatcher).unwrap();

        assert_eq!(state, ReminderState::Disabled);
        assert_eq!(state.next(), None);
        assert_eq!(store.get(keys::ALARMS_ENABLED), Some("false".to_string()));
        assert_eq!(dispatcher.cancels, 1);
    }

    #[test]
    fn off_then_on_matches_fresh_computation() {
        let mut store = MemoryStore::new();
        store.set(keys::START_DATE, "2025-11-03T06:00:00Z").unwrap();
        let mut dispatcher = RecordingDispatcher::default();
        let (now_utc, now_local) = fixed_now();

        let payload = ReminderPayload::default();
        let first = turn_on(&mut store, &mut dispatcher, now_utc, now_local, &payload).unwrap();
        turn_off(&mut store, &mut dispatcher).unwrap();
        let second = turn_on(&mut store, &mut dispatcher, now_utc, now_local, &payload).unwrap();

        // Deep into the taper; the exact week comes from the stored start.
        let week = program_week(now_utc, load_state(&store).start_date);
        let expected = next_reminder(
            now_local,
            DayWindow::default(),
            dosing_interval_hours(week),
        );
        assert_eq!(first.next(), Some(expected));
        assert_eq!(second.next(), first.next());
    }

    #[test]
    fn denied_permission_enables_without_scheduling() {
        let mut store = MemoryStore::new();
        let mut dispatcher = RecordingDispatcher {
            denied: true,
            ..Default::default()
        };
        let (now_utc, now_local) = fixed_now();

        let state = turn_on(
            &mut store,
            &mut dispatcher,
            now_utc,
            now_local,
            &ReminderPayload::default(),
        )
        .unwrap();

        // Flag still set: the degraded mode is "enabled, nothing scheduled".
        assert_eq!(store.get(keys::ALARMS_ENABLED), Some("true".to_string()));
        assert_eq!(state, ReminderState::Enabled { next: None });
        assert!(dispatcher.scheduled.is_empty());
    }
}
