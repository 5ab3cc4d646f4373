use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs::{self, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;

use quitkit_core::{Dispatcher, PermissionStatus, ReminderPayload};

use crate::state::ensure_quitkit_home;

/// One pending local notification in the queue file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueuedReminder {
    pub fire_at: NaiveDateTime,
    pub payload: ReminderPayload,
    pub dedupe_key: String,
}

/// File-backed dispatcher: `schedule` appends to a jsonl queue and
/// `quitkit reminders dispatch` fires whatever is due. Cancel-all drops the
/// whole queue, invalidating every pending reminder.
#[derive(Debug)]
pub struct QueueDispatcher {
    dir: PathBuf,
}

impl QueueDispatcher {
    pub fn open_default() -> Result<Self> {
        let dir = ensure_quitkit_home()?.join("reminders");
        fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
        Ok(Self { dir })
    }

    fn queue_path(&self) -> PathBuf {
        self.dir.join("pending.jsonl")
    }

    fn sent_keys_path(&self) -> PathBuf {
        self.dir.join("sent_keys.txt")
    }

    fn sent_keys(&self) -> Result<HashSet<String>> {
        let p = self.sent_keys_path();
        if !p.exists() {
            return Ok(HashSet::new());
        }
        let f = fs::File::open(&p).with_context(|| format!("open {}", p.display()))?;
        Ok(BufReader::new(f)
            .lines()
            .filter_map(|l| l.ok())
            .collect())
    }

    /// Queued reminders not yet fired, in file order.
    pub fn pending(&self) -> Result<Vec<QueuedReminder>> {
        let q = self.queue_path();
        if !q.exists() {
            return Ok(vec![]);
        }

        let sent = self.sent_keys()?;
        let f = fs::File::open(&q).with_context(|| format!("open {}", q.display()))?;
        let mut out = Vec::new();
        for line in BufReader::new(f).lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            if let Ok(r) = serde_json::from_str::<QueuedReminder>(&line) {
                if !sent.contains(&r.dedupe_key) {
                    out.push(r);
                }
            }
        }
        Ok(out)
    }

    /// Fire every queued reminder due at or before `now`. Sent dedupe keys
    /// are logged so a re-run never double-fires.
    pub fn dispatch_due(&self, now: NaiveDateTime, dry_run: bool) -> Result<usize> {
        let due: Vec<QueuedReminder> = self
            .pending()?
            .into_iter()
            .filter(|r| r.fire_at <= now)
            .collect();

        if due.is_empty() {
            println!("No due reminders.");
            return Ok(0);
        }

        let sk = self.sent_keys_path();
        let mut sent_log = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&sk)
            .with_context(|| format!("open {}", sk.display()))?;

        let mut sent_now = 0usize;
        for r in due {
            if dry_run {
                println!(
                    "[DRY RUN] would fire at {}: {}",
                    r.fire_at.format("%Y-%m-%d %H:%M"),
                    r.payload.title
                );
                continue;
            }

            deliver(&r.payload)?;
            writeln!(sent_log, "{}", r.dedupe_key)?;
            sent_now += 1;
        }

        println!("Dispatch complete. Fired {} reminders.", sent_now);
        Ok(sent_now)
    }
}

impl Dispatcher for QueueDispatcher {
    fn permission(&self) -> PermissionStatus {
        // The file queue needs no OS-level grant.
        PermissionStatus::Granted
    }

    fn schedule(&mut self, at: NaiveDateTime, payload: &ReminderPayload) -> Result<()> {
        let entry = QueuedReminder {
            fire_at: at,
            payload: payload.clone(),
            dedupe_key: format!("gum:{}", at.format("%Y%m%dT%H%M")),
        };

        let q = self.queue_path();
        let mut f = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&q)
            .with_context(|| format!("open {}", q.display()))?;
        writeln!(f, "{}", serde_json::to_string(&entry)?)?;
        Ok(())
    }

    fn cancel_all(&mut self) -> Result<()> {
        let q = self.queue_path();
        if q.exists() {
            fs::remove_file(&q).with_context(|| format!("remove {}", q.display()))?;
        }
        Ok(())
    }
}

fn deliver(payload: &ReminderPayload) -> Result<()> {
    println!("{}: {}", payload.title, payload.body);
    desktop_notify(payload)
}

#[cfg(target_os = "macos")]
fn desktop_notify(payload: &ReminderPayload) -> Result<()> {
    let sound = if payload.sound {
        r#" sound name "default""#
    } else {
        ""
    };
    let script = format!(
        r#"display notification "{}" with title "{}"{}"#,
        escape_applescript(&payload.body),
        escape_applescript(&payload.title),
        sound
    );

    let output = std::process::Command::new("osascript")
        .arg("-e")
        .arg(&script)
        .output()
        .context("running osascript")?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        println!("Desktop notification failed: {stderr}");
    }

    Ok(())
}

#[cfg(not(target_os = "macos"))]
fn desktop_notify(_payload: &ReminderPayload) -> Result<()> {
    // Terminal output above is the only channel here.
    Ok(())
}

#[cfg(target_os = "macos")]
fn escape_applescript(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
}
