//! Notification dispatcher capability.
//!
//! Delivery is platform-dependent and best-effort; the core only decides
//! when to fire. Targets without local notification support inject
//! `NoopDispatcher` instead of branching on platform identity anywhere in
//! the scheduler.

use anyhow::Result;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Content of a scheduled gum reminder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderPayload {
    pub title: String,
    pub body: String,
    pub sound: bool,
}

impl Default for ReminderPayload {
    fn default() -> Self {
        Self {
            title: "Time for Nicotine Gum".to_string(),
            body: "Take your nicotine gum now and hold for 10 seconds".to_string(),
            sound: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionStatus {
    Granted,
    Denied,
    /// No notification channel exists on this target at all.
    Unsupported,
}

/// One-shot local notification scheduling. `schedule` promises a single
/// best-effort fire at or after the given local time; `cancel_all`
/// invalidates every pending reminder, not just the most recent.
pub trait Dispatcher {
    fn permission(&self) -> PermissionStatus;
    fn schedule(&mut self, at: NaiveDateTime, payload: &ReminderPayload) -> Result<()>;
    fn cancel_all(&mut self) -> Result<()>;
}

/// Dispatcher for unsupported targets: everything is a silent no-op and the
/// next reminder displays as "not scheduled".
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopDispatcher;

impl Dispatcher for NoopDispatcher {
    fn permission(&self) -> PermissionStatus {
        PermissionStatus::Unsupported
    }

    fn schedule(&mut self, _at: NaiveDateTime, _payload: &ReminderPayload) -> Result<()> {
        Ok(())
    }

    fn cancel_all(&mut self) -> Result<()> {
        Ok(())
    }
}
