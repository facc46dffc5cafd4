//! Seasonal mowing cadence table
//!
//! A season rule names a set of calendar months and the cadence used by
//! jobs whose frequency defers to the season. Lookups only: nothing here
//! computes visit dates.

use chrono::{Datelike, Month, NaiveDate};
use tracing::debug;

use crate::errors::{LawnError, Result};
use crate::models::{Cadence, Frequency, Job};

/// Calendar months in order, January first
pub const MONTHS: [Month; 12] = [
    Month::January,
    Month::February,
    Month::March,
    Month::April,
    Month::May,
    Month::June,
    Month::July,
    Month::August,
    Month::September,
    Month::October,
    Month::November,
    Month::December,
];

/// Parse a month from its English name or three-letter abbreviation
pub fn parse_month(value: &str) -> Result<Month> {
    let key = value.trim().to_ascii_lowercase();
    MONTHS
        .iter()
        .copied()
        .find(|month| {
            let name = month.name().to_ascii_lowercase();
            name == key || (key.len() == 3 && name.starts_with(&key))
        })
        .ok_or_else(|| LawnError::unknown("month", value))
}

/// Month a date falls in
pub fn month_of(date: NaiveDate) -> Month {
    MONTHS[date.month0() as usize]
}

/// A named period with a default cadence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeasonRule {
    /// Identifier referenced by overrides, e.g. `springSummer`
    pub key: String,

    /// Display name, e.g. `Spring/Summer`
    pub label: String,

    /// Months covered, in calendar order
    pub months: Vec<Month>,

    /// Cadence for jobs that defer to the season
    pub default_cadence: Cadence,
}

impl SeasonRule {
    pub fn new(
        key: impl Into<String>,
        label: impl Into<String>,
        months: impl IntoIterator<Item = Month>,
        default_cadence: Cadence,
    ) -> Self {
        let mut months: Vec<Month> = months.into_iter().collect();
        months.sort_by_key(|m| m.number_from_month());
        months.dedup();

        Self {
            key: key.into(),
            label: label.into(),
            months,
            default_cadence,
        }
    }

    pub fn covers(&self, month: Month) -> bool {
        self.months.contains(&month)
    }
}

/// Ordered set of season rules with no overlapping months
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeasonCalendar {
    rules: Vec<SeasonRule>,
}

impl SeasonCalendar {
    /// Build a calendar, rejecting duplicate keys, empty rules and
    /// months claimed by more than one rule. Gaps are allowed.
    pub fn new(rules: Vec<SeasonRule>) -> Result<Self> {
        for (idx, rule) in rules.iter().enumerate() {
            if rule.key.trim().is_empty() {
                return Err(LawnError::SeasonError(format!(
                    "season rule {} has an empty key",
                    idx
                )));
            }

            if rule.months.is_empty() {
                return Err(LawnError::SeasonError(format!(
                    "season '{}' covers no months",
                    rule.key
                )));
            }

            for earlier in &rules[..idx] {
                if earlier.key == rule.key {
                    return Err(LawnError::SeasonError(format!(
                        "duplicate season key '{}'",
                        rule.key
                    )));
                }

                if let Some(month) = rule.months.iter().find(|m| earlier.covers(**m)) {
                    return Err(LawnError::SeasonError(format!(
                        "{} is claimed by both '{}' and '{}'",
                        month.name(),
                        earlier.key,
                        rule.key
                    )));
                }
            }
        }

        Ok(Self { rules })
    }

    /// Built-in mowing table: weekly in the growth season, biweekly otherwise
    pub fn standard() -> Self {
        Self {
            rules: vec![
                SeasonRule::new(
                    "springSummer",
                    "Spring/Summer",
                    MONTHS[2..10].iter().copied(),
                    Cadence::Weekly,
                ),
                SeasonRule::new(
                    "fallWinter",
                    "Fall/Winter",
                    [
                        Month::November,
                        Month::December,
                        Month::January,
                        Month::February,
                    ],
                    Cadence::Biweekly,
                ),
            ],
        }
    }

    pub fn rules(&self) -> &[SeasonRule] {
        &self.rules
    }

    pub fn rule(&self, key: &str) -> Option<&SeasonRule> {
        self.rules.iter().find(|r| r.key == key)
    }

    pub fn season_for(&self, month: Month) -> Option<&SeasonRule> {
        self.rules.iter().find(|r| r.covers(month))
    }

    /// Months no rule covers, in calendar order
    pub fn uncovered_months(&self) -> Vec<Month> {
        MONTHS
            .iter()
            .copied()
            .filter(|m| self.season_for(*m).is_none())
            .collect()
    }

    /// Replace the default cadence of an existing rule
    pub fn with_cadence_override(mut self, key: &str, cadence: Cadence) -> Result<Self> {
        let rule = self
            .rules
            .iter_mut()
            .find(|r| r.key == key)
            .ok_or_else(|| {
                LawnError::SeasonError(format!("override references unknown season '{}'", key))
            })?;

        debug!(season = key, from = %rule.default_cadence, to = %cadence, "season cadence overridden");
        rule.default_cadence = cadence;
        Ok(self)
    }

    /// Cadence that applies to `job` on `on`: its own cadence when explicit,
    /// otherwise the default of the season covering that month.
    pub fn effective_cadence(&self, job: &Job, on: NaiveDate) -> Result<Cadence> {
        match job.frequency {
            Frequency::Explicit(cadence) => Ok(cadence),
            Frequency::AutoSeasonal => {
                let month = month_of(on);
                self.season_for(month)
                    .map(|rule| rule.default_cadence)
                    .ok_or_else(|| {
                        LawnError::SeasonError(format!(
                            "no season covers {} for job {}",
                            month.name(),
                            job.id
                        ))
                    })
            }
        }
    }
}

impl Default for SeasonCalendar {
    fn default() -> Self {
        Self::standard()
    }
}
