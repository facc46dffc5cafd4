//! lawnbook - Lawn-care job book
//!
//! Typed job records for a lawn-care service, a seasonal mowing cadence
//! table, and validation of job book files.
//!
//! # Architecture
//!
//! - **models**: job records and their closed value sets
//! - **season**: month-based season rules and cadence lookup
//! - **book**: the job book, JSON persistence and seed records
//! - **doctor**: diagnostics over job records
//! - **cli**: arguments and TOML configuration

pub mod errors;
pub mod models;
pub mod season;
pub mod book;
pub mod doctor;

// Re-export commonly used types
pub use errors::{LawnError, Result};
pub use models::{Cadence, Frequency, Job, JobId, ServiceType, SubscriptionStatus, SubscriptionType};
pub use season::{SeasonCalendar, SeasonRule};
pub use book::{JobBook, JobStore};

pub mod cli;
pub mod telemetry;
pub mod display;
