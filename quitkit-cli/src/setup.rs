use anyhow::{Context, Result};
use chrono::{NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;
use std::io::{self, Write};

use quitkit_core::{KvStore, keys};

use crate::config::{config_path, load_config, save_config};
use crate::state::{FileStore, settings_path};

fn prompt(label: &str) -> Result<String> {
    print!("{}: ", label);
    io::stdout().flush().ok();
    let mut s = String::new();
    io::stdin().read_line(&mut s)?;
    Ok(s.trim().to_string())
}

pub fn run_setup() -> Result<()> {
    println!("quitkit setup\n");

    let mut cfg = load_config()?;
    let tz_in = prompt(&format!("Timezone (IANA, blank = {})", cfg.timezone))?;
    if !tz_in.is_empty() {
        let _: Tz = tz_in
            .parse()
            .map_err(|_| anyhow::anyhow!("invalid timezone: {tz_in}"))?;
        cfg.timezone = tz_in;
    }
    save_config(&cfg)?;

    let tz: Tz = cfg
        .timezone
        .parse()
        .map_err(|_| anyhow::anyhow!("invalid timezone: {}", cfg.timezone))?;

    let mut store = FileStore::open_default()?;

    let date_in = prompt("Quit date (YYYY-MM-DD, blank = today)")?;
    let date = if date_in.is_empty() {
        Utc::now().with_timezone(&tz).date_naive()
    } else {
        NaiveDate::parse_from_str(&date_in, "%Y-%m-%d")
            .with_context(|| format!("invalid date '{date_in}'"))?
    };
    let midnight = date.and_hms_opt(0, 0, 0).unwrap();
    let start_local = tz
        .from_local_datetime(&midnight)
        .single()
        .ok_or_else(|| anyhow::anyhow!("ambiguous local midnight (DST?): {date}"))?;
    store.set(keys::START_DATE, &start_local.with_timezone(&Utc).to_rfc3339())?;

    // Stored as entered; malformed numbers degrade to "no estimate" at
    // compute time rather than failing setup.
    let cigarettes = prompt("Cigarettes per day (blank to skip)")?;
    if !cigarettes.is_empty() {
        store.set(keys::CIGARETTES_PER_DAY, &cigarettes)?;
    }

    let price = prompt("Price per pack (blank to skip)")?;
    if !price.is_empty() {
        store.set(keys::PRICE_PER_PACK, &price)?;
    }

    let wake = prompt("Wake-up time (HH:MM, blank = 06:00)")?;
    if !wake.is_empty() {
        store.set(keys::WAKE_TIME, &wake)?;
    }

    let sleep = prompt("Sleep time (HH:MM, blank = 22:00)")?;
    if !sleep.is_empty() {
        store.set(keys::SLEEP_TIME, &sleep)?;
    }

    println!("\nWrote:");
    println!("- {}", settings_path()?.display());
    println!("- {}", config_path()?.display());

    println!("\nNext recommended steps:");
    println!("- quitkit status");
    println!("- quitkit reminders on");

    Ok(())
}
