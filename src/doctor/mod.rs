//! Doctor command for job book diagnostics
//!
//! Checks a list of job records against the invariants a usable book
//! needs: unique ids, complete customer details, services from the closed
//! set, and seasonal frequencies that resolve against the season table.

use chrono::NaiveDate;
use colored::Colorize;
use std::collections::BTreeMap;

use crate::models::{Frequency, Job, JobId, SubscriptionStatus};
use crate::season::{month_of, SeasonCalendar};

/// Health check result
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    Pass,
    Warn(String),
    Fail(String),
}

/// Individual health check
#[derive(Debug, Clone)]
pub struct HealthCheck {
    pub name: String,
    pub status: HealthStatus,
}

impl HealthCheck {
    fn new(name: &str, status: HealthStatus) -> Self {
        Self {
            name: name.to_string(),
            status,
        }
    }

    /// Fail if there are problems, otherwise pass
    fn from_problems(name: &str, problems: Vec<String>, fail: bool) -> Self {
        if problems.is_empty() {
            return Self::new(name, HealthStatus::Pass);
        }
        let message = problems.join("; ");
        let status = if fail {
            HealthStatus::Fail(message)
        } else {
            HealthStatus::Warn(message)
        };
        Self::new(name, status)
    }
}

/// Diagnostics over a set of job records
pub struct JobDoctor<'a> {
    jobs: &'a [Job],
    calendar: &'a SeasonCalendar,
    today: NaiveDate,
}

impl<'a> JobDoctor<'a> {
    /// Create a new doctor instance
    pub fn new(jobs: &'a [Job], calendar: &'a SeasonCalendar, today: NaiveDate) -> Self {
        Self {
            jobs,
            calendar,
            today,
        }
    }

    /// Run all health checks
    pub fn run_diagnostics(&self) -> DoctorReport {
        let checks = vec![
            self.check_identifiers(),
            self.check_customer_details(),
            self.check_services(),
            self.check_season_coverage(),
            self.check_seasonal_frequency(),
            self.check_completion_history(),
        ];

        DoctorReport { checks }
    }

    /// Check 1: every id is unique
    fn check_identifiers(&self) -> HealthCheck {
        let mut counts: BTreeMap<JobId, usize> = BTreeMap::new();
        for job in self.jobs {
            *counts.entry(job.id).or_default() += 1;
        }

        let problems = counts
            .into_iter()
            .filter(|(_, count)| *count > 1)
            .map(|(id, count)| format!("id {} used {} times", id, count))
            .collect();

        HealthCheck::from_problems("Job identifiers", problems, true)
    }

    /// Check 2: customer name and address present
    fn check_customer_details(&self) -> HealthCheck {
        let mut problems = Vec::new();
        for job in self.jobs {
            if job.customer_name.trim().is_empty() {
                problems.push(format!("job {} has no customer name", job.id));
            }
            if job.address.trim().is_empty() {
                problems.push(format!("job {} has no address", job.id));
            }
        }

        HealthCheck::from_problems("Customer details", problems, true)
    }

    /// Check 3: one or more services, none repeated
    fn check_services(&self) -> HealthCheck {
        let mut problems: Vec<String> = self
            .jobs
            .iter()
            .filter(|job| job.services.is_empty())
            .map(|job| format!("job {} has no service", job.id))
            .collect();
        let fail = !problems.is_empty();

        let repeated: Vec<String> = self
            .jobs
            .iter()
            .filter_map(|job| {
                let mut seen = Vec::with_capacity(job.services.len());
                let dup = job.services.iter().find(|s| {
                    let repeated = seen.contains(*s);
                    seen.push(**s);
                    repeated
                })?;
                Some(format!("job {} lists {} more than once", job.id, dup))
            })
            .collect();
        problems.extend(repeated);

        HealthCheck::from_problems("Service types", problems, fail)
    }

    /// Check 4: every month has a season
    fn check_season_coverage(&self) -> HealthCheck {
        let gaps: Vec<&str> = self
            .calendar
            .uncovered_months()
            .iter()
            .map(|m| m.name())
            .collect();

        if gaps.is_empty() {
            HealthCheck::new("Season coverage", HealthStatus::Pass)
        } else {
            HealthCheck::new(
                "Season coverage",
                HealthStatus::Warn(format!("no season covers {}", gaps.join(", "))),
            )
        }
    }

    /// Check 5: auto-seasonal jobs resolve a cadence for their scheduled month
    fn check_seasonal_frequency(&self) -> HealthCheck {
        let problems = self
            .jobs
            .iter()
            .filter(|job| job.frequency == Frequency::AutoSeasonal)
            .filter_map(|job| {
                self.calendar
                    .effective_cadence(job, job.scheduled_date)
                    .err()
                    .map(|_| {
                        format!(
                            "job {} scheduled in {} has no season default",
                            job.id,
                            month_of(job.scheduled_date).name()
                        )
                    })
            })
            .collect();

        HealthCheck::from_problems("Seasonal frequency", problems, true)
    }

    /// Check 6: completion dates are plausible and one-time jobs closed out
    fn check_completion_history(&self) -> HealthCheck {
        let mut problems = Vec::new();
        for job in self.jobs {
            let Some(completed) = job.last_completed_date else {
                continue;
            };

            if completed > self.today {
                problems.push(format!(
                    "job {} completed in the future ({})",
                    job.id, completed
                ));
            }

            if !job.is_recurring() && job.subscription_status != SubscriptionStatus::Inactive {
                problems.push(format!(
                    "one-time job {} was completed but is still {}",
                    job.id, job.subscription_status
                ));
            }
        }

        HealthCheck::from_problems("Completion history", problems, false)
    }
}

/// Outcome of a diagnostics run
#[derive(Debug, Clone)]
pub struct DoctorReport {
    pub checks: Vec<HealthCheck>,
}

impl DoctorReport {
    /// No check failed (warnings allowed)
    pub fn is_healthy(&self) -> bool {
        !self
            .checks
            .iter()
            .any(|c| matches!(c.status, HealthStatus::Fail(_)))
    }

    pub fn passed(&self) -> usize {
        self.count(|s| matches!(s, HealthStatus::Pass))
    }

    pub fn warnings(&self) -> usize {
        self.count(|s| matches!(s, HealthStatus::Warn(_)))
    }

    pub fn failures(&self) -> usize {
        self.count(|s| matches!(s, HealthStatus::Fail(_)))
    }

    fn count(&self, pred: impl Fn(&HealthStatus) -> bool) -> usize {
        self.checks.iter().filter(|c| pred(&c.status)).count()
    }

    pub fn check(&self, name: &str) -> Option<&HealthCheck> {
        self.checks.iter().find(|c| c.name == name)
    }

    /// Display diagnostics results
    pub fn print(&self) {
        println!("\n{}\n", "Job Book Diagnostics".bold());
        println!("{:<20} Status", "Check");
        println!("{}", "=".repeat(50));

        for check in &self.checks {
            let status = match &check.status {
                HealthStatus::Pass => "PASS".green().to_string(),
                HealthStatus::Warn(msg) => format!("{} {}", "WARN:".yellow(), msg),
                HealthStatus::Fail(msg) => format!("{} {}", "FAIL:".red(), msg),
            };
            println!("{:<20} {}", check.name, status);
        }

        println!(
            "\n{} passed, {} warnings, {} failed\n",
            self.passed(),
            self.warnings(),
            self.failures()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Cadence, ServiceType, SubscriptionType};
    use crate::season::SeasonRule;
    use chrono::Month;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn job(id: JobId) -> Job {
        Job::new(
            id,
            "Sanja Kosak",
            "4108 Piney Branch Court",
            ServiceType::Mowing,
            SubscriptionType::Recurring,
            Frequency::AutoSeasonal,
            date(2026, 1, 5),
        )
    }

    fn diagnose(jobs: &[Job], calendar: &SeasonCalendar) -> DoctorReport {
        JobDoctor::new(jobs, calendar, date(2026, 6, 1)).run_diagnostics()
    }

    #[test]
    fn test_healthy_book() {
        let calendar = SeasonCalendar::standard();
        let report = diagnose(&[job(1), job(2)], &calendar);
        assert!(report.is_healthy());
        assert_eq!(report.passed(), report.checks.len());
    }

    #[test]
    fn test_duplicate_ids_fail() {
        let calendar = SeasonCalendar::standard();
        let report = diagnose(&[job(1), job(1), job(2)], &calendar);
        assert!(!report.is_healthy());

        let check = report.check("Job identifiers").unwrap();
        assert_eq!(
            check.status,
            HealthStatus::Fail("id 1 used 2 times".to_string())
        );
    }

    #[test]
    fn test_blank_customer_fails() {
        let calendar = SeasonCalendar::standard();
        let mut blank = job(1);
        blank.address = "  ".to_string();
        let report = diagnose(&[blank], &calendar);
        assert!(matches!(
            report.check("Customer details").unwrap().status,
            HealthStatus::Fail(_)
        ));
    }

    #[test]
    fn test_service_checks() {
        let calendar = SeasonCalendar::standard();

        let mut empty = job(1);
        empty.services.clear();
        let report = diagnose(&[empty], &calendar);
        assert!(matches!(report.check("Service types").unwrap().status, HealthStatus::Fail(_)));

        let mut repeated = job(2);
        repeated.services.push(ServiceType::Mowing);
        let report = diagnose(&[repeated], &calendar);
        assert!(report.is_healthy());
        assert!(matches!(report.check("Service types").unwrap().status, HealthStatus::Warn(_)));
    }

    #[test]
    fn test_missing_service_keeps_repeat_warnings() {
        let calendar = SeasonCalendar::standard();

        let mut empty = job(1);
        empty.services.clear();
        let mut repeated = job(2);
        repeated.services.push(ServiceType::Mowing);

        let report = diagnose(&[empty, repeated], &calendar);
        match &report.check("Service types").unwrap().status {
            HealthStatus::Fail(msg) => {
                assert!(msg.contains("job 1 has no service"));
                assert!(msg.contains("job 2 lists Mowing more than once"));
            }
            other => panic!("expected failure, got {:?}", other),
        }
    }

    #[test]
    fn test_uncovered_scheduled_month_fails() {
        let calendar = SeasonCalendar::new(vec![SeasonRule::new(
            "summer",
            "Summer",
            [Month::June, Month::July],
            Cadence::Weekly,
        )])
        .unwrap();

        let mut explicit = job(2);
        explicit.frequency = Frequency::Explicit(Cadence::Monthly);

        let report = diagnose(&[job(1), explicit], &calendar);
        assert!(!report.is_healthy());
        assert!(matches!(report.check("Season coverage").unwrap().status, HealthStatus::Warn(_)));

        match &report.check("Seasonal frequency").unwrap().status {
            HealthStatus::Fail(msg) => {
                assert!(msg.contains("job 1"));
                assert!(msg.contains("January"));
                assert!(!msg.contains("job 2"));
            }
            other => panic!("expected failure, got {:?}", other),
        }
    }

    #[test]
    fn test_completion_history_warnings() {
        let calendar = SeasonCalendar::standard();

        let mut future = job(1);
        future.last_completed_date = Some(date(2026, 9, 1));

        let mut open_one_time = job(2);
        open_one_time.subscription_type = SubscriptionType::OneTime;
        open_one_time.last_completed_date = Some(date(2026, 2, 1));

        let report = diagnose(&[future, open_one_time], &calendar);
        assert!(report.is_healthy());
        assert_eq!(report.warnings(), 1);

        match &report.check("Completion history").unwrap().status {
            HealthStatus::Warn(msg) => {
                assert!(msg.contains("future"));
                assert!(msg.contains("one-time job 2"));
            }
            other => panic!("expected warning, got {:?}", other),
        }
    }
}
