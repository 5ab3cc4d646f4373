use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use quitkit_core::ReminderPayload;

use crate::state::ensure_quitkit_home;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// IANA timezone for the day window; reminders fire on local wall clock.
    #[serde(default = "default_timezone")]
    pub timezone: String,

    #[serde(default)]
    pub notify: NotifySection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotifySection {
    pub title: String,
    pub body: String,
    pub sound: bool,
}

fn default_timezone() -> String {
    "America/Chicago".to_string()
}

impl Default for NotifySection {
    fn default() -> Self {
        let payload = ReminderPayload::default();
        Self {
            title: payload.title,
            body: payload.body,
            sound: payload.sound,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timezone: default_timezone(),
            notify: NotifySection::default(),
        }
    }
}

impl Config {
    pub fn payload(&self) -> ReminderPayload {
        ReminderPayload {
            title: self.notify.title.clone(),
            body: self.notify.body.clone(),
            sound: self.notify.sound,
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    Ok(ensure_quitkit_home()?.join("config.toml"))
}

pub fn load_config() -> Result<Config> {
    let p = config_path()?;
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    Ok(toml::from_str(&s).context("parse config.toml")?)
}

pub fn save_config(cfg: &Config) -> Result<()> {
    let p = config_path()?;
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(&p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

pub fn init_config() -> Result<()> {
    let p = config_path()?;
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    save_config(&Config::default())?;
    println!("Wrote {}", p.display());
    Ok(())
}
