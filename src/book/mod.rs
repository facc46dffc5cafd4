//! Job book: the in-memory job "database"
//!
//! Jobs keyed by id with uniqueness enforced on every insert.

pub mod fixtures;
pub mod persistence;

pub use persistence::JobStore;

use chrono::NaiveDate;
use std::collections::BTreeMap;
use tracing::debug;

use crate::errors::{LawnError, Result};
use crate::models::{Job, JobId, ServiceType, SubscriptionStatus};

/// Jobs ordered by id
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobBook {
    jobs: BTreeMap<JobId, Job>,
}

impl JobBook {
    /// Create an empty book
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a book from records, rejecting duplicate ids
    pub fn from_jobs(jobs: impl IntoIterator<Item = Job>) -> Result<Self> {
        let mut book = Self::new();
        for job in jobs {
            book.insert(job)?;
        }
        Ok(book)
    }

    /// Add a job; its id must not already be in use
    pub fn insert(&mut self, job: Job) -> Result<()> {
        if self.jobs.contains_key(&job.id) {
            return Err(LawnError::DuplicateJob { id: job.id });
        }
        debug!(job = job.id, customer = %job.customer_name, "job added");
        self.jobs.insert(job.id, job);
        Ok(())
    }

    /// Smallest id greater than every id in the book
    pub fn next_id(&self) -> Result<JobId> {
        match self.jobs.keys().next_back() {
            None => Ok(1),
            Some(&last) => last
                .checked_add(1)
                .ok_or(LawnError::IdsExhausted { last }),
        }
    }

    pub fn get(&self, id: JobId) -> Result<&Job> {
        self.jobs.get(&id).ok_or(LawnError::JobNotFound { id })
    }

    pub fn get_mut(&mut self, id: JobId) -> Result<&mut Job> {
        self.jobs.get_mut(&id).ok_or(LawnError::JobNotFound { id })
    }

    pub fn remove(&mut self, id: JobId) -> Result<Job> {
        self.jobs.remove(&id).ok_or(LawnError::JobNotFound { id })
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    /// Iterate jobs in id order
    pub fn jobs(&self) -> impl Iterator<Item = &Job> {
        self.jobs.values()
    }

    pub fn by_status(&self, status: SubscriptionStatus) -> Vec<&Job> {
        self.jobs()
            .filter(|job| job.subscription_status == status)
            .collect()
    }

    pub fn by_service(&self, service: ServiceType) -> Vec<&Job> {
        self.jobs().filter(|job| job.has_service(service)).collect()
    }

    /// Record a completed visit for a job
    pub fn complete(&mut self, id: JobId, on: NaiveDate) -> Result<&Job> {
        let job = self.get_mut(id)?;
        job.complete(on)?;
        Ok(job)
    }

    pub fn activate(&mut self, id: JobId) -> Result<&Job> {
        let job = self.get_mut(id)?;
        job.activate()?;
        Ok(job)
    }

    pub fn deactivate(&mut self, id: JobId) -> Result<&Job> {
        let job = self.get_mut(id)?;
        job.deactivate()?;
        Ok(job)
    }
}
