//! Terminal rendering of jobs and season rules

use colored::{ColoredString, Colorize};

use crate::models::{Cadence, Job, SubscriptionStatus};
use crate::season::SeasonCalendar;

fn status_badge(status: SubscriptionStatus) -> ColoredString {
    match status {
        SubscriptionStatus::Pending => status.as_str().yellow(),
        SubscriptionStatus::Active => status.as_str().green(),
        SubscriptionStatus::Inactive => status.as_str().dimmed(),
    }
}

fn services(job: &Job) -> String {
    job.services
        .iter()
        .map(|s| s.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// One-line summary used by `list`
pub fn job_line(job: &Job) -> String {
    format!(
        "{:>4}  {:<20} {:<28} {:<10} {:<13} {}",
        job.id,
        job.customer_name,
        job.address,
        status_badge(job.subscription_status),
        job.frequency.as_str(),
        services(job)
    )
}

/// Multi-line detail used by `show`
pub fn job_detail(job: &Job, cadence_today: Option<Cadence>) -> String {
    let mut lines = vec![
        format!("{} {}", "Job".bold(), job.id.to_string().bold()),
        format!("  Customer:      {}", job.customer_name),
        format!("  Address:       {}", job.address),
        format!("  Services:      {}", services(job)),
        format!("  Subscription:  {}", job.subscription_type),
        format!("  Status:        {}", status_badge(job.subscription_status)),
    ];

    let frequency = match (job.is_auto_seasonal(), cadence_today) {
        (true, Some(cadence)) => format!("{} (currently {})", job.frequency, cadence),
        _ => job.frequency.to_string(),
    };
    lines.push(format!("  Frequency:     {}", frequency));
    lines.push(format!("  Scheduled:     {}", job.scheduled_date));
    lines.push(format!(
        "  Last done:     {}",
        job.last_completed_date
            .map(|d| d.to_string())
            .unwrap_or_else(|| "never".to_string())
    ));

    lines.join("\n")
}

/// Season table used by `seasons`
pub fn season_table(calendar: &SeasonCalendar) -> String {
    let mut lines = Vec::new();
    for rule in calendar.rules() {
        let months: Vec<&str> = rule.months.iter().map(|m| m.name()).collect();
        lines.push(format!(
            "{:<14} {:<10} {}",
            rule.label.bold(),
            rule.default_cadence.as_str(),
            months.join(", ")
        ));
    }

    let gaps = calendar.uncovered_months();
    if !gaps.is_empty() {
        let names: Vec<&str> = gaps.iter().map(|m| m.name()).collect();
        lines.push(format!("{} {}", "Uncovered:".yellow(), names.join(", ")));
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Frequency, ServiceType, SubscriptionType};
    use chrono::NaiveDate;

    fn job() -> Job {
        Job::new(
            1,
            "Sanja Kosak",
            "4108 Piney Branch Court",
            ServiceType::Mowing,
            SubscriptionType::Recurring,
            Frequency::AutoSeasonal,
            NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
        )
        .with_service(ServiceType::LeafRemoval)
    }

    #[test]
    fn test_job_line() {
        let line = job_line(&job());
        assert!(line.contains("Sanja Kosak"));
        assert!(line.contains("Auto-Seasonal"));
        assert!(line.contains("Mowing, Leaf Removal"));
    }

    #[test]
    fn test_job_detail_shows_current_cadence() {
        let detail = job_detail(&job(), Some(Cadence::Biweekly));
        assert!(detail.contains("Auto-Seasonal (currently Biweekly)"));
        assert!(detail.contains("2026-01-05"));
        assert!(detail.contains("never"));
    }

    #[test]
    fn test_season_table() {
        let table = season_table(&SeasonCalendar::standard());
        assert!(table.contains("Weekly"));
        assert!(table.contains("November, December"));
        assert!(!table.contains("Uncovered"));
    }
}
