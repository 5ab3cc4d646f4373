//! quitkit-core: domain logic for the twelve-week quit-smoking program.

pub mod notify;
pub mod program;
pub mod savings;
pub mod schedule;
pub mod state;
pub mod store;
pub mod time;
pub mod toggle;

pub use notify::{Dispatcher, NoopDispatcher, PermissionStatus, ReminderPayload};
pub use program::{GumDose, PROGRAM_WEEKS, dosing_interval_hours, elapsed_days, program_week};
pub use savings::{CIGARETTES_PER_PACK, SmokingProfile, savings};
pub use schedule::{DayWindow, next_reminder};
pub use state::{ProgramState, load_state};
pub use store::{KvStore, MemoryStore, keys};
pub use toggle::{ReminderState, turn_off, turn_on};
