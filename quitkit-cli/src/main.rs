use anyhow::Result;
use chrono::{NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;
use clap::{Parser, Subcommand};

use quitkit_core::{
    GumDose, KvStore, PROGRAM_WEEKS, dosing_interval_hours, keys, load_state, program_week,
    savings, time,
};

mod config;
mod notify;
mod reminders_cmd;
mod setup;
mod state;

use crate::notify::QueueDispatcher;
use crate::state::FileStore;

#[derive(Parser, Debug)]
#[command(name = "quitkit", version, about = "Twelve-week quit-smoking tracker and gum-reminder scheduler")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// One-time interactive setup: quit date, smoking profile, day window
    Setup,

    /// Show week, savings, dosage, and the next reminder
    Status,

    /// Read or write individual settings
    Settings {
        #[command(subcommand)]
        command: SettingsCommand,
    },

    /// Gum reminder scheduling
    Reminders {
        #[command(subcommand)]
        command: reminders_cmd::RemindersCommand,
    },

    /// Config file management
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum SettingsCommand {
    /// Print every stored setting
    Show,

    /// Write one or more settings (write-through, no validation)
    Set {
        /// Quit date (YYYY-MM-DD, interpreted as local midnight)
        #[arg(long)]
        start_date: Option<String>,

        #[arg(long)]
        cigarettes_per_day: Option<String>,

        #[arg(long)]
        price_per_pack: Option<String>,

        /// Wake time "HH:MM"
        #[arg(long)]
        wake: Option<String>,

        /// Sleep time "HH:MM"
        #[arg(long)]
        sleep: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a default config.toml if none exists
    Init,

    /// Print the effective config
    Show,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Setup => setup::run_setup()?,
        Command::Status => show_status()?,
        Command::Settings { command } => match command {
            SettingsCommand::Show => show_settings()?,
            SettingsCommand::Set {
                start_date,
                cigarettes_per_day,
                price_per_pack,
                wake,
                sleep,
            } => set_settings(start_date, cigarettes_per_day, price_per_pack, wake, sleep)?,
        },
        Command::Reminders { command } => reminders_cmd::run(command)?,
        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config()?,
            ConfigCommand::Show => {
                let cfg = config::load_config()?;
                print!("{}", toml::to_string_pretty(&cfg)?);
            }
        },
    }

    Ok(())
}

fn show_status() -> Result<()> {
    let cfg = config::load_config()?;
    let store = FileStore::open_default()?;
    let dispatcher = QueueDispatcher::open_default()?;

    let state = load_state(&store);
    let now = Utc::now();
    let week = program_week(now, state.start_date);
    let interval = dosing_interval_hours(week);

    println!("Quit Smoking Journey");
    println!("Week {} of {}\n", week, PROGRAM_WEEKS);

    let mut strip = String::new();
    for w in 1..=PROGRAM_WEEKS {
        strip.push_str(if w <= week { "[x]" } else { "[ ]" });
    }
    println!("Progress: {}", strip);

    println!("Money saved: ${:.2}", savings(now, state.start_date, &state.profile));
    println!("Current interval: {} hours", interval);

    match state.profile.cigarettes_per_day {
        Some(cigarettes) => println!(
            "Recommended dosage: {}",
            GumDose::for_cigarettes_per_day(cigarettes).label()
        ),
        None => println!("Recommended dosage: (set cigarettes per day first)"),
    }

    println!(
        "Reminders: {}",
        if state.alarms_enabled { "on" } else { "off" }
    );
    match dispatcher.pending()?.first() {
        Some(r) => println!("Next reminder: {}", r.fire_at.format("%Y-%m-%d %H:%M")),
        None => println!("Next reminder: Not scheduled"),
    }

    Ok(())
}

fn show_settings() -> Result<()> {
    let store = FileStore::open_default()?;

    let show = |key: &str, fallback: &str| {
        let value = store.get(key).unwrap_or_else(|| fallback.to_string());
        println!("{:18} {}", key, value);
    };

    show(keys::START_DATE, "(not set)");
    show(keys::CIGARETTES_PER_DAY, "(not set)");
    show(keys::PRICE_PER_PACK, "(not set)");
    show(keys::ALARMS_ENABLED, "false");
    show(keys::WAKE_TIME, "06:00 (default)");
    show(keys::SLEEP_TIME, "22:00 (default)");
    Ok(())
}

fn set_settings(
    start_date: Option<String>,
    cigarettes_per_day: Option<String>,
    price_per_pack: Option<String>,
    wake: Option<String>,
    sleep: Option<String>,
) -> Result<()> {
    let cfg = config::load_config()?;
    let mut store = FileStore::open_default()?;

    if let Some(date) = start_date {
        let parsed = NaiveDate::parse_from_str(&date, "%Y-%m-%d")
            .map_err(|e| anyhow::anyhow!("invalid date '{date}': {e}"))?;
        let tz: Tz = cfg
            .timezone
            .parse()
            .map_err(|_| anyhow::anyhow!("invalid timezone: {}", cfg.timezone))?;
        let midnight = parsed.and_hms_opt(0, 0, 0).unwrap();
        let local = tz
            .from_local_datetime(&midnight)
            .single()
            .ok_or_else(|| anyhow::anyhow!("ambiguous local midnight (DST?): {date}"))?;
        store.set(keys::START_DATE, &local.with_timezone(&Utc).to_rfc3339())?;
        println!("Set {} = {}", keys::START_DATE, date);
    }

    // Stored as entered; malformed values degrade at compute time.
    for (key, value) in [
        (keys::CIGARETTES_PER_DAY, cigarettes_per_day),
        (keys::PRICE_PER_PACK, price_per_pack),
    ] {
        if let Some(v) = value {
            store.set(key, &v)?;
            println!("Set {} = {}", key, v);
        }
    }

    for (key, value) in [(keys::WAKE_TIME, wake), (keys::SLEEP_TIME, sleep)] {
        if let Some(v) = value {
            if time::parse_hhmm(&v).is_none() {
                println!(
                    "Note: '{}' does not look like HH:MM; the default window applies until fixed.",
                    v
                );
            }
            store.set(key, &v)?;
            println!("Set {} = {}", key, v);
        }
    }

    let state = load_state(&store);
    if state.alarms_enabled {
        // Settings edits never reschedule an active reminder.
        println!(
            "Reminders are on; the current schedule is unchanged until you run \
             `quitkit reminders off` and `on` again."
        );
    }

    Ok(())
}
