//! Read-through program state.
//!
//! The store is the single source of truth; `ProgramState` is a cache of it,
//! recomputed by an explicit `load_state` on every screen/command entry.
//! There is no implicit reactivity: callers reload, they never observe.

use chrono::{DateTime, Utc};

use crate::savings::SmokingProfile;
use crate::schedule::DayWindow;
use crate::store::{KvStore, keys};
use crate::time::{parse_hhmm, parse_start_date};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ProgramState {
    pub start_date: Option<DateTime<Utc>>,
    pub profile: SmokingProfile,
    pub alarms_enabled: bool,
    pub window: DayWindow,
}

/// Build the full program state from the store, applying defaults for every
/// absent key and degrading malformed values instead of erroring.
pub fn load_state(store: &impl KvStore) -> ProgramState {
    let defaults = DayWindow::default();

    let start_date = store
        .get(keys::START_DATE)
        .and_then(|s| parse_start_date(&s));

    let profile = SmokingProfile {
        cigarettes_per_day: store
            .get(keys::CIGARETTES_PER_DAY)
            .and_then(|s| s.trim().parse().ok()),
        price_per_pack: store
            .get(keys::PRICE_PER_PACK)
            .and_then(|s| s.trim().parse().ok()),
    };

    let alarms_enabled = store
        .get(keys::ALARMS_ENABLED)
        .map(|s| s == "true")
        .unwrap_or(false);

    let window = DayWindow {
        wake: store
            .get(keys::WAKE_TIME)
            .and_then(|s| parse_hhmm(&s))
            .unwrap_or(defaults.wake),
        sleep: store
            .get(keys::SLEEP_TIME)
            .and_then(|s| parse_hhmm(&s))
            .unwrap_or(defaults.sleep),
    };

    ProgramState {
        start_date,
        profile,
        alarms_enabled,
        window,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use chrono::NaiveTime;

    #[test]
    fn empty_store_yields_defaults() {
        let state = load_state(&MemoryStore::new());
        assert_eq!(state.start_date, None);
        assert_eq!(state.profile, SmokingProfile::default());
        assert!(!state.alarms_enabled);
        assert_eq!(state.window, DayWindow::default());
    }

    #[test]
    fn populated_store_roundtrips() {
        let mut store = MemoryStore::new();
        store.set(keys::START_DATE, "2026-01-05T06:00:00Z").unwrap();
        store.set(keys::CIGARETTES_PER_DAY, "15").unwrap();
        store.set(keys::PRICE_PER_PACK, "9.50").unwrap();
        store.set(keys::ALARMS_ENABLED, "true").unwrap();
        store.set(keys::WAKE_TIME, "07:00").unwrap();
        store.set(keys::SLEEP_TIME, "23:30").unwrap();

        let state = load_state(&store);
        assert!(state.start_date.is_some());
        assert_eq!(state.profile.cigarettes_per_day, Some(15));
        assert_eq!(state.profile.price_per_pack, Some(9.5));
        assert!(state.alarms_enabled);
        assert_eq!(state.window.wake, NaiveTime::from_hms_opt(7, 0, 0).unwrap());
        assert_eq!(
            state.window.sleep,
            NaiveTime::from_hms_opt(23, 30, 0).unwrap()
        );
    }

    #[test]
    fn malformed_values_degrade_not_error() {
        let mut store = MemoryStore::new();
        store.set(keys::START_DATE, "someday").unwrap();
        store.set(keys::CIGARETTES_PER_DAY, "a lot").unwrap();
        store.set(keys::PRICE_PER_PACK, "$$").unwrap();
        store.set(keys::ALARMS_ENABLED, "yes").unwrap();
        store.set(keys::WAKE_TIME, "sunrise").unwrap();

        let state = load_state(&store);
        assert_eq!(state.start_date, None);
        assert_eq!(state.profile.cigarettes_per_day, None);
        assert_eq!(state.profile.price_per_pack, None);
        // Only the literal "true" enables alarms.
        assert!(!state.alarms_enabled);
        assert_eq!(state.window.wake, DayWindow::default().wake);
    }
}
