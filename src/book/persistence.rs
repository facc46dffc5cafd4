//! Job book persistence as a JSON file
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::book::{fixtures, JobBook};
use crate::models::Job;

/// Job book file manager
pub struct JobStore {
    path: PathBuf,
}

impl JobStore {
    /// Store backed by the file at `path`
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Read the raw record list. Duplicate ids are kept so validation can
    /// report them.
    pub fn load_records(&self) -> Result<Vec<Job>> {
        let json = fs::read_to_string(&self.path).with_context(|| {
            format!("Failed to read job book {}", self.path.display())
        })?;

        let jobs: Vec<Job> = serde_json::from_str(&json).with_context(|| {
            format!("Failed to parse job book {}", self.path.display())
        })?;

        debug!(path = %self.path.display(), count = jobs.len(), "job records loaded");
        Ok(jobs)
    }

    /// Load the book, rejecting duplicate ids
    pub fn load(&self) -> Result<JobBook> {
        let jobs = self.load_records()?;
        let book = JobBook::from_jobs(jobs)
            .with_context(|| format!("Invalid job book {}", self.path.display()))?;
        Ok(book)
    }

    /// Load the book, or the sample records when no file exists yet
    pub fn load_or_seed(&self) -> Result<JobBook> {
        if !self.exists() {
            info!(path = %self.path.display(), "no job book found, using sample records");
            return Ok(fixtures::sample_book()?);
        }
        self.load()
    }

    /// Save the book, creating the parent directory if needed
    pub fn save(&self, book: &JobBook) -> Result<PathBuf> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).context("Failed to create job book directory")?;
            }
        }

        let jobs: Vec<&Job> = book.jobs().collect();
        let json = serde_json::to_string_pretty(&jobs).context("Failed to serialize job book")?;

        fs::write(&self.path, json).context("Failed to write job book")?;

        debug!(path = %self.path.display(), count = jobs.len(), "job book saved");
        Ok(self.path.clone())
    }
}
