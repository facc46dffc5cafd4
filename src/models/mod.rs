//! Job record model
//!
//! Strongly-typed job records and the closed value sets they draw from.

pub mod job;
pub mod types;

pub use job::Job;
pub use types::{
    Cadence, Frequency, JobId, ServiceType, StatusEvent, SubscriptionStatus, SubscriptionType,
};
