//! # Feedback Log
//!
//! Appends user-submitted feedback rows to a flat CSV file. The file is
//! append-only: rows are never updated or deleted, and prior rows are
//! preserved exactly as written. Concurrent writers are not coordinated;
//! single-session usage is assumed.

use chrono::Local;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum FeedbackError {
    #[error("Feedback is empty.")]
    Empty,
    #[error("Failed to open feedback file '{path}': {source}")]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to write feedback row: {0}")]
    Csv(#[from] csv::Error),
}

/// An append-only CSV log of `{timestamp, question, answer, feedback}` rows.
pub struct FeedbackLog {
    path: PathBuf,
}

impl FeedbackLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends one feedback row, creating the file with a header row when it
    /// does not exist yet.
    ///
    /// Empty or whitespace-only feedback fails with [`FeedbackError::Empty`]
    /// and leaves the file untouched.
    pub fn record(&self, feedback: &str, question: &str, answer: &str) -> Result<(), FeedbackError> {
        if feedback.trim().is_empty() {
            return Err(FeedbackError::Empty);
        }

        let write_header = !self.path.exists();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|source| FeedbackError::Open {
                path: self.path.clone(),
                source,
            })?;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        if write_header {
            writer.write_record(["timestamp", "question", "answer", "feedback"])?;
        }

        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
        writer.write_record([timestamp.as_str(), question, answer, feedback])?;
        writer.flush().map_err(csv::Error::from)?;

        info!("Saved feedback to {}", self.path.display());
        Ok(())
    }
}
