//! Sample job records used to seed a new book

use crate::book::JobBook;
use crate::errors::Result;
use crate::models::Job;

const SAMPLE_JOBS: &str = include_str!("sample_jobs.json");

/// The seed records: one pending recurring mowing job on the seasonal table
pub fn sample_jobs() -> Result<Vec<Job>> {
    Ok(serde_json::from_str(SAMPLE_JOBS)?)
}

/// Book holding the seed records
pub fn sample_book() -> Result<JobBook> {
    JobBook::from_jobs(sample_jobs()?)
}
