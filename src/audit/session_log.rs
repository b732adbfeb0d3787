use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::conversation::ConversationEntry;
use crate::error::SessionLogError;

#[derive(Debug, Serialize)]
struct LogRecord<'a> {
    session_id: Uuid,
    logged_at: DateTime<Utc>,
    entry: &'a ConversationEntry,
}

#[derive(Debug, Serialize)]
struct ExportRecord<'a> {
    session_id: Uuid,
    exported_at: DateTime<Utc>,
    entries: &'a [ConversationEntry],
}

const EXPORT_STAMP: &str = "%Y%m%dT%H%M%SZ";

/// Append-only NDJSON trail of completed entries, plus whole-session JSON
/// exports next to it. Write-only: nothing in the crate reads either back.
#[derive(Debug, Clone)]
pub struct SessionLog {
    path: PathBuf,
    session_id: Uuid,
}

impl SessionLog {
    /// Creates parent directories if needed. The file itself is opened per
    /// append.
    pub fn open(path: impl Into<PathBuf>, session_id: Uuid) -> Result<Self, SessionLogError> {
        let path = path.into();
        if let Some(dir) = path.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir)?;
            }
        }
        Ok(Self { path, session_id })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn append(&self, entry: &ConversationEntry) -> Result<(), SessionLogError> {
        let record = LogRecord {
            session_id: self.session_id,
            logged_at: Utc::now(),
            entry,
        };
        let mut line = serde_json::to_string(&record)?;
        line.push('\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(line.as_bytes())?;
        Ok(())
    }

    /// Writes `entries` as pretty JSON to `{label}_{stamp}.json` in the log's
    /// directory and returns the file path. Exports in the same second
    /// overwrite each other.
    pub fn export(
        &self,
        entries: &[ConversationEntry],
        label: &str,
    ) -> Result<PathBuf, SessionLogError> {
        let exported_at = Utc::now();
        let path = self
            .export_dir()
            .join(format!("{label}_{}.json", exported_at.format(EXPORT_STAMP)));

        let mut writer = BufWriter::new(File::create(&path)?);
        let record = ExportRecord {
            session_id: self.session_id,
            exported_at,
            entries,
        };
        serde_json::to_writer_pretty(&mut writer, &record)?;
        writer.flush()?;
        Ok(path)
    }

    fn export_dir(&self) -> &Path {
        match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        }
    }
}
