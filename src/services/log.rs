use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

const LOG_FILE: &str = "activity.log";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Info,
    Error,
}

/// One recorded operation. Stored as a single JSON line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub timestamp: DateTime<Utc>,
    pub level: LogLevel,
    pub event: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl LogEntry {
    pub fn is_error(&self) -> bool {
        self.level == LogLevel::Error
    }
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = match self.level {
            LogLevel::Info => "info ",
            LogLevel::Error => "ERROR",
        };
        write!(
            f,
            "[{}] {level} {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S"),
            self.event
        )?;
        if let Some(subject) = &self.subject {
            write!(f, " ({subject})")?;
        }
        if let Some(details) = &self.details {
            write!(f, ": {details}")?;
        }
        Ok(())
    }
}

/// Which entries [`ActivityLogger::read_logs`] returns.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogFilter<'a> {
    pub subject: Option<&'a str>,
    pub errors_only: bool,
}

impl LogFilter<'_> {
    fn matches(&self, entry: &LogEntry) -> bool {
        if self.errors_only && !entry.is_error() {
            return false;
        }
        match self.subject {
            Some(subject) => entry.subject.as_deref() == Some(subject),
            None => true,
        }
    }
}

/// Append-only activity record in the data directory.
#[derive(Debug, Clone)]
pub struct ActivityLogger {
    log_path: PathBuf,
}

impl ActivityLogger {
    pub fn new() -> crate::Result<Self> {
        Self::at(crate::services::store::default_data_dir()?)
    }

    pub fn at(dir: impl AsRef<Path>) -> crate::Result<Self> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;
        Ok(Self {
            log_path: dir.join(LOG_FILE),
        })
    }

    pub fn path(&self) -> &Path {
        &self.log_path
    }

    pub fn log(
        &self,
        level: LogLevel,
        subject: Option<&str>,
        event: &str,
        details: Option<&str>,
    ) -> crate::Result<()> {
        let entry = LogEntry {
            timestamp: Utc::now(),
            level,
            event: event.to_string(),
            subject: subject.map(str::to_string),
            details: details.map(str::to_string),
        };

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)?;
        writeln!(file, "{}", serde_json::to_string(&entry)?)?;
        Ok(())
    }

    /// Entries passing `filter`, most recent first. Lines that do not parse
    /// are skipped.
    pub fn read_logs(&self, filter: LogFilter<'_>) -> crate::Result<Vec<LogEntry>> {
        if !self.log_path.exists() {
            return Ok(vec![]);
        }

        let reader = BufReader::new(fs::File::open(&self.log_path)?);
        let mut entries = Vec::new();
        for line in reader.lines() {
            let Ok(entry) = serde_json::from_str::<LogEntry>(&line?) else {
                continue;
            };
            if filter.matches(&entry) {
                entries.push(entry);
            }
        }

        entries.reverse();
        Ok(entries)
    }

    pub fn info(&self, subject: Option<&str>, event: &str, details: Option<&str>) -> crate::Result<()> {
        self.log(LogLevel::Info, subject, event, details)
    }

    pub fn error(&self, subject: Option<&str>, event: &str, details: Option<&str>) -> crate::Result<()> {
        self.log(LogLevel::Error, subject, event, details)
    }
}
