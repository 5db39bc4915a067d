use chrono::{DateTime, Local};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use time_humanize::{Accuracy, HumanTime, Tense};

use crate::game::SessionSummary;

/// One finished game, as persisted in the history log.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GameRecord {
    pub when: DateTime<Local>,
    pub puzzle: String,
    pub won: bool,
    pub attempts: usize,
    pub elapsed_secs: u32,
}

impl GameRecord {
    pub fn from_summary(puzzle: &str, summary: &SessionSummary) -> Self {
        Self {
            when: Local::now(),
            puzzle: puzzle.to_string(),
            won: summary.won,
            attempts: summary.attempts_used,
            elapsed_secs: summary.elapsed_secs,
        }
    }
}

/// Append-only CSV log of played games, one row per finished session.
#[derive(Debug, Clone)]
pub struct HistoryLog {
    path: PathBuf,
}

impl HistoryLog {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        let path = if let Some(pd) = ProjectDirs::from("", "", "fotograma") {
            pd.data_local_dir().join("history.csv")
        } else {
            PathBuf::from("fotograma_history.csv")
        };
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn append(&self, record: &GameRecord) -> Result<(), Box<dyn Error>> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        // Only the first write emits the header row
        let needs_header = !self.path.exists();

        let file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.path)?;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(needs_header)
            .from_writer(file);
        writer.serialize(record)?;
        writer.flush()?;
        Ok(())
    }

    /// Most recent `limit` games, newest first. An absent log is just an
    /// empty history.
    pub fn recent(&self, limit: usize) -> Vec<GameRecord> {
        let Ok(mut reader) = csv::Reader::from_path(&self.path) else {
            return Vec::new();
        };
        let mut rows: Vec<GameRecord> = reader.deserialize().filter_map(|r| r.ok()).collect();
        rows.reverse();
        rows.truncate(limit);
        rows
    }
}

/// "3 minutes ago"-style age for the history listing.
pub fn humanize_age(when: DateTime<Local>) -> String {
    let secs = Local::now()
        .signed_duration_since(when)
        .num_seconds()
        .max(0) as u64;
    HumanTime::from(std::time::Duration::from_secs(secs)).to_text_en(Accuracy::Rough, Tense::Past)
}
