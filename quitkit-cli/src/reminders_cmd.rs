use anyhow::Result;
use chrono::Utc;
use clap::Subcommand;

use quitkit_core::{load_state, time, turn_off, turn_on};

use crate::config::load_config;
use crate::notify::QueueDispatcher;
use crate::state::FileStore;

#[derive(Subcommand, Debug)]
pub enum RemindersCommand {
    /// Enable gum reminders and schedule the next one
    On,

    /// Disable gum reminders and cancel everything pending
    Off,

    /// Show the toggle state and the pending queue
    Status,

    /// Fire queued reminders that are due now
    Dispatch {
        /// Dry-run only; do not actually fire
        #[arg(long, default_value_t = false)]
        dry_run: bool,
    },
}

pub fn run(cmd: RemindersCommand) -> Result<()> {
    match cmd {
        RemindersCommand::On => on(),
        RemindersCommand::Off => off(),
        RemindersCommand::Status => status(),
        RemindersCommand::Dispatch { dry_run } => dispatch(dry_run),
    }
}

fn on() -> Result<()> {
    let cfg = load_config()?;
    let mut store = FileStore::open_default()?;
    let mut dispatcher = QueueDispatcher::open_default()?;

    let now_utc = Utc::now();
    let now_local = time::local_now(&cfg.timezone)?;

    let state = turn_on(
        &mut store,
        &mut dispatcher,
        now_utc,
        now_local,
        &cfg.payload(),
    )?;

    match state.next() {
        Some(next) => println!(
            "Reminders on. Next reminder: {}",
            next.format("%Y-%m-%d %H:%M")
        ),
        None => println!("Reminders on, but nothing could be scheduled on this platform."),
    }
    Ok(())
}

fn off() -> Result<()> {
    let mut store = FileStore::open_default()?;
    let mut dispatcher = QueueDispatcher::open_default()?;
    turn_off(&mut store, &mut dispatcher)?;
    println!("Reminders off. Cancelled all pending reminders.");
    Ok(())
}

fn status() -> Result<()> {
    let store = FileStore::open_default()?;
    let dispatcher = QueueDispatcher::open_default()?;

    let state = load_state(&store);
    println!(
        "Reminders: {}",
        if state.alarms_enabled { "on" } else { "off" }
    );

    let pending = dispatcher.pending()?;
    if pending.is_empty() {
        println!("Next reminder: Not scheduled");
    } else {
        for r in &pending {
            println!(
                "- {} | {}",
                r.fire_at.format("%Y-%m-%d %H:%M"),
                r.payload.title
            );
        }
    }
    Ok(())
}

fn dispatch(dry_run: bool) -> Result<()> {
    let cfg = load_config()?;
    let dispatcher = QueueDispatcher::open_default()?;
    dispatcher.dispatch_due(time::local_now(&cfg.timezone)?, dry_run)?;
    Ok(())
}
