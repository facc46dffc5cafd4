//! Job record and its lifecycle operations

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::info;

use crate::errors::{LawnError, Result};
use crate::models::types::{
    Frequency, JobId, ServiceType, StatusEvent, SubscriptionStatus, SubscriptionType,
};

/// A scheduled service visit at a customer address
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Job {
    pub id: JobId,

    pub customer_name: String,

    pub address: String,

    /// Services performed on each visit. `jobType` is the older singular name.
    #[serde(rename = "jobTypes", alias = "jobType", deserialize_with = "one_or_many")]
    pub services: Vec<ServiceType>,

    pub subscription_type: SubscriptionType,

    pub subscription_status: SubscriptionStatus,

    pub frequency: Frequency,

    pub scheduled_date: NaiveDate,

    #[serde(default)]
    pub last_completed_date: Option<NaiveDate>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

fn one_or_many<'de, D>(deserializer: D) -> std::result::Result<Vec<ServiceType>, D::Error>
where
    D: Deserializer<'de>,
{
    let values = match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(value) => vec![value],
        OneOrMany::Many(values) => values,
    };

    values
        .iter()
        .map(|value| value.parse::<ServiceType>())
        .collect::<Result<Vec<_>>>()
        .map_err(serde::de::Error::custom)
}

impl Job {
    /// Create a pending job that has never been completed
    pub fn new(
        id: JobId,
        customer_name: impl Into<String>,
        address: impl Into<String>,
        service: ServiceType,
        subscription_type: SubscriptionType,
        frequency: Frequency,
        scheduled_date: NaiveDate,
    ) -> Self {
        Self {
            id,
            customer_name: customer_name.into(),
            address: address.into(),
            services: vec![service],
            subscription_type,
            subscription_status: SubscriptionStatus::Pending,
            frequency,
            scheduled_date,
            last_completed_date: None,
        }
    }

    /// Add a service to the visit (ignored if already present)
    pub fn with_service(mut self, service: ServiceType) -> Self {
        if !self.services.contains(&service) {
            self.services.push(service);
        }
        self
    }

    pub fn is_recurring(&self) -> bool {
        self.subscription_type == SubscriptionType::Recurring
    }

    pub fn is_auto_seasonal(&self) -> bool {
        self.frequency == Frequency::AutoSeasonal
    }

    pub fn is_active(&self) -> bool {
        self.subscription_status == SubscriptionStatus::Active
    }

    pub fn has_service(&self, service: ServiceType) -> bool {
        self.services.contains(&service)
    }

    /// Start servicing a pending job
    pub fn activate(&mut self) -> Result<()> {
        self.apply(StatusEvent::Activate)
    }

    /// Stop servicing a job
    pub fn deactivate(&mut self) -> Result<()> {
        self.apply(StatusEvent::Deactivate)
    }

    /// Record a completed visit on `on`.
    ///
    /// One-time jobs become inactive afterwards; a pending recurring job
    /// becomes active on its first completion.
    pub fn complete(&mut self, on: NaiveDate) -> Result<()> {
        if let Some(last) = self.last_completed_date {
            if on < last {
                return Err(LawnError::InvalidDate(format!(
                    "completion {} for job {} precedes last completion {}",
                    on, self.id, last
                )));
            }
        }

        self.apply(StatusEvent::Complete {
            one_time: !self.is_recurring(),
        })?;
        self.last_completed_date = Some(on);
        Ok(())
    }

    fn apply(&mut self, event: StatusEvent) -> Result<()> {
        let from = self.subscription_status;
        let to = from
            .transition(event)
            .map_err(|reason| LawnError::InvalidTransition {
                id: self.id,
                from: from.to_string(),
                event: event.to_string(),
                reason: reason.to_string(),
            })?;

        if from != to {
            info!(job = self.id, %from, %to, "subscription status changed");
        }
        self.subscription_status = to;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::types::Cadence;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn recurring_job() -> Job {
        Job::new(
            1,
            "Sanja Kosak",
            "4108 Piney Branch Court",
            ServiceType::Mowing,
            SubscriptionType::Recurring,
            Frequency::AutoSeasonal,
            date(2026, 1, 5),
        )
    }

    fn one_time_job() -> Job {
        Job::new(
            2,
            "Ada Lovelace",
            "12 Garden Row",
            ServiceType::Aeration,
            SubscriptionType::OneTime,
            Frequency::Explicit(Cadence::Monthly),
            date(2026, 4, 1),
        )
    }

    #[test]
    fn test_new_job_is_pending() {
        let job = recurring_job();
        assert_eq!(job.subscription_status, SubscriptionStatus::Pending);
        assert!(job.last_completed_date.is_none());
        assert!(job.is_recurring());
        assert!(job.is_auto_seasonal());
    }

    #[test]
    fn test_with_service_dedupes() {
        let job = recurring_job()
            .with_service(ServiceType::Edging)
            .with_service(ServiceType::Mowing);
        assert_eq!(job.services, vec![ServiceType::Mowing, ServiceType::Edging]);
    }

    #[test]
    fn test_complete_recurring_activates() {
        let mut job = recurring_job();
        job.complete(date(2026, 1, 5)).unwrap();
        assert!(job.is_active());
        assert_eq!(job.last_completed_date, Some(date(2026, 1, 5)));

        job.complete(date(2026, 1, 19)).unwrap();
        assert!(job.is_active());
        assert_eq!(job.last_completed_date, Some(date(2026, 1, 19)));
    }

    #[test]
    fn test_complete_one_time_deactivates() {
        let mut job = one_time_job();
        job.complete(date(2026, 4, 1)).unwrap();
        assert_eq!(job.subscription_status, SubscriptionStatus::Inactive);
        assert!(job.complete(date(2026, 5, 1)).is_err());
    }

    #[test]
    fn test_complete_rejects_earlier_date() {
        let mut job = recurring_job();
        job.complete(date(2026, 2, 1)).unwrap();
        let err = job.complete(date(2026, 1, 20)).unwrap_err();
        assert!(matches!(err, LawnError::InvalidDate(_)));
        assert_eq!(job.last_completed_date, Some(date(2026, 2, 1)));
    }

    #[test]
    fn test_activate_and_deactivate() {
        let mut job = recurring_job();
        job.activate().unwrap();
        assert!(job.activate().is_err());
        job.deactivate().unwrap();
        assert!(job.deactivate().is_err());
    }

    #[test]
    fn test_deserialize_source_record() {
        let json = r#"{
            "id": 1,
            "customerName": "Sanja Kosak",
            "jobType": "Mowing",
            "address": "4108 Piney Branch Court",
            "subscriptionType": "Recurring",
            "subscriptionStatus": "Pending",
            "frequency": "Auto-Seasonal",
            "scheduledDate": "2026-01-05",
            "lastCompletedDate": null
        }"#;

        let job: Job = serde_json::from_str(json).unwrap();
        assert_eq!(job, recurring_job());
    }

    #[test]
    fn test_deserialize_service_list() {
        let json = r#"{
            "id": 4,
            "customerName": "Lee",
            "address": "1 Elm St",
            "jobTypes": ["mowing", "edging"],
            "subscriptionType": "Recurring",
            "subscriptionStatus": "Active",
            "frequency": "weekly",
            "scheduledDate": "2026-05-01"
        }"#;

        let job: Job = serde_json::from_str(json).unwrap();
        assert_eq!(job.services, vec![ServiceType::Mowing, ServiceType::Edging]);
        assert_eq!(job.frequency, Frequency::Explicit(Cadence::Weekly));
        assert!(job.last_completed_date.is_none());
    }

    #[test]
    fn test_deserialize_rejects_unknown_fields() {
        let json = r#"{
            "id": 1,
            "custName": "Sanja Kosak",
            "customerName": "Sanja Kosak",
            "jobType": "Mowing",
            "address": "4108 Piney Branch Court",
            "subscriptionType": "Recurring",
            "subscriptionStatus": "Pending",
            "frequency": "Auto-Seasonal",
            "scheduledDate": "2026-01-05"
        }"#;

        let err = serde_json::from_str::<Job>(json).unwrap_err();
        assert!(err.to_string().contains("custName"));
    }

    #[test]
    fn test_deserialize_rejects_unknown_service() {
        let json = r#"{
            "id": 1,
            "customerName": "Sanja Kosak",
            "jobType": "Snow Plowing",
            "address": "4108 Piney Branch Court",
            "subscriptionType": "Recurring",
            "subscriptionStatus": "Pending",
            "frequency": "Auto-Seasonal",
            "scheduledDate": "2026-01-05"
        }"#;

        let err = serde_json::from_str::<Job>(json).unwrap_err();
        assert!(err.to_string().contains("Snow Plowing"));
    }

    #[test]
    fn test_serializes_canonical_names() {
        let value = serde_json::to_value(recurring_job()).unwrap();
        assert_eq!(value["customerName"], "Sanja Kosak");
        assert_eq!(value["jobTypes"][0], "Mowing");
        assert_eq!(value["frequency"], "Auto-Seasonal");
        assert_eq!(value["scheduledDate"], "2026-01-05");
        assert!(value["lastCompletedDate"].is_null());
    }
}
