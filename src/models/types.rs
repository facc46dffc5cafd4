//! Type definitions for job records
//!
//! Closed value sets used by job records. Every set parses from text
//! case-insensitively, ignoring spaces, hyphens and underscores, and
//! serializes back to its canonical spelling.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::{LawnError, Result};

/// Job identifier, unique within a job book
pub type JobId = u32;

/// Lowercase form with separators (space, `-`, `_`) removed
fn normalize(value: &str) -> String {
    value
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Service performed on a visit
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ServiceType {
    Mowing,
    Edging,
    Trimming,
    Blowing,
    LeafRemoval,
    Aeration,
    Fertilization,
}

impl ServiceType {
    pub const ALL: [ServiceType; 7] = [
        ServiceType::Mowing,
        ServiceType::Edging,
        ServiceType::Trimming,
        ServiceType::Blowing,
        ServiceType::LeafRemoval,
        ServiceType::Aeration,
        ServiceType::Fertilization,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceType::Mowing => "Mowing",
            ServiceType::Edging => "Edging",
            ServiceType::Trimming => "Trimming",
            ServiceType::Blowing => "Blowing",
            ServiceType::LeafRemoval => "Leaf Removal",
            ServiceType::Aeration => "Aeration",
            ServiceType::Fertilization => "Fertilization",
        }
    }
}

impl FromStr for ServiceType {
    type Err = LawnError;

    fn from_str(s: &str) -> Result<Self> {
        let key = normalize(s);
        Self::ALL
            .iter()
            .copied()
            .find(|service| normalize(service.as_str()) == key)
            .ok_or_else(|| LawnError::unknown("service type", s))
    }
}

/// Whether a job repeats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SubscriptionType {
    Recurring,
    OneTime,
}

impl SubscriptionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionType::Recurring => "Recurring",
            SubscriptionType::OneTime => "One-Time",
        }
    }
}

impl FromStr for SubscriptionType {
    type Err = LawnError;

    fn from_str(s: &str) -> Result<Self> {
        match normalize(s).as_str() {
            "recurring" => Ok(SubscriptionType::Recurring),
            "onetime" => Ok(SubscriptionType::OneTime),
            _ => Err(LawnError::unknown("subscription type", s)),
        }
    }
}

/// Subscription lifecycle states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SubscriptionStatus {
    /// Signed up, not yet serviced
    Pending,

    /// Being serviced
    Active,

    /// No longer serviced (terminal)
    Inactive,
}

/// Events that move a subscription between states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusEvent {
    Activate,
    Deactivate,
    Complete { one_time: bool },
}

impl fmt::Display for StatusEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusEvent::Activate => write!(f, "activate"),
            StatusEvent::Deactivate => write!(f, "deactivate"),
            StatusEvent::Complete { .. } => write!(f, "complete"),
        }
    }
}

impl SubscriptionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionStatus::Pending => "Pending",
            SubscriptionStatus::Active => "Active",
            SubscriptionStatus::Inactive => "Inactive",
        }
    }

    /// Next status for an event, or the reason the event is rejected.
    ///
    /// Valid transitions:
    /// 1. Pending  → Active    (Activate)
    /// 2. Pending  → Inactive  (Deactivate)
    /// 3. Active   → Inactive  (Deactivate)
    /// 4. Pending  → Active    (Complete, recurring)
    /// 5. Active   → Active    (Complete, recurring)
    /// 6. Pending  → Inactive  (Complete, one-time)
    /// 7. Active   → Inactive  (Complete, one-time)
    pub fn transition(&self, event: StatusEvent) -> std::result::Result<Self, &'static str> {
        use StatusEvent::*;
        use SubscriptionStatus::*;

        match (self, event) {
            (Pending, Activate) => Ok(Active),
            (Active, Activate) => Err("job is already active"),
            (Pending | Active, Deactivate) => Ok(Inactive),
            (Pending | Active, Complete { one_time: true }) => Ok(Inactive),
            (Pending | Active, Complete { one_time: false }) => Ok(Active),
            (Inactive, _) => Err("job is no longer serviced"),
        }
    }
}

impl FromStr for SubscriptionStatus {
    type Err = LawnError;

    fn from_str(s: &str) -> Result<Self> {
        match normalize(s).as_str() {
            "pending" => Ok(SubscriptionStatus::Pending),
            "active" => Ok(SubscriptionStatus::Active),
            "inactive" => Ok(SubscriptionStatus::Inactive),
            _ => Err(LawnError::unknown("subscription status", s)),
        }
    }
}

/// How often a recurring service is performed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Cadence {
    Weekly,
    Biweekly,
    Monthly,
}

impl Cadence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Cadence::Weekly => "Weekly",
            Cadence::Biweekly => "Biweekly",
            Cadence::Monthly => "Monthly",
        }
    }
}

impl FromStr for Cadence {
    type Err = LawnError;

    fn from_str(s: &str) -> Result<Self> {
        match normalize(s).as_str() {
            "weekly" => Ok(Cadence::Weekly),
            "biweekly" => Ok(Cadence::Biweekly),
            "monthly" => Ok(Cadence::Monthly),
            _ => Err(LawnError::unknown("cadence", s)),
        }
    }
}

/// Job frequency: an explicit cadence or a deferral to the season table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Frequency {
    Explicit(Cadence),
    AutoSeasonal,
}

impl Frequency {
    pub const AUTO_SEASONAL: &'static str = "Auto-Seasonal";

    pub fn as_str(&self) -> &'static str {
        match self {
            Frequency::Explicit(cadence) => cadence.as_str(),
            Frequency::AutoSeasonal => Self::AUTO_SEASONAL,
        }
    }
}

impl FromStr for Frequency {
    type Err = LawnError;

    fn from_str(s: &str) -> Result<Self> {
        if normalize(s) == normalize(Self::AUTO_SEASONAL) {
            return Ok(Frequency::AutoSeasonal);
        }
        s.parse::<Cadence>()
            .map(Frequency::Explicit)
            .map_err(|_| LawnError::unknown("frequency", s))
    }
}

impl From<Cadence> for Frequency {
    fn from(cadence: Cadence) -> Self {
        Frequency::Explicit(cadence)
    }
}

macro_rules! text_enum {
    ($($ty:ty),*) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.as_str())
                }
            }

            impl From<$ty> for String {
                fn from(value: $ty) -> Self {
                    value.as_str().to_string()
                }
            }

            impl TryFrom<String> for $ty {
                type Error = LawnError;

                fn try_from(value: String) -> Result<Self> {
                    value.parse()
                }
            }
        )*
    };
}

text_enum!(ServiceType, SubscriptionType, SubscriptionStatus, Cadence, Frequency);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_type_lenient_parse() {
        assert_eq!("mowing".parse::<ServiceType>().unwrap(), ServiceType::Mowing);
        assert_eq!("Leaf-Removal".parse::<ServiceType>().unwrap(), ServiceType::LeafRemoval);
        assert_eq!("leaf removal".parse::<ServiceType>().unwrap(), ServiceType::LeafRemoval);
        assert!("Snow Plowing".parse::<ServiceType>().is_err());
    }

    #[test]
    fn test_parse_keeps_punctuation() {
        assert!("mowing!!!".parse::<ServiceType>().is_err());
        assert!("M.o.w.i.n.g".parse::<ServiceType>().is_err());
        assert!("weekly.".parse::<Cadence>().is_err());
        assert!("Auto/Seasonal".parse::<Frequency>().is_err());
        assert_eq!(" Edging ".parse::<ServiceType>().unwrap(), ServiceType::Edging);
    }

    #[test]
    fn test_subscription_type_rejects_typo() {
        assert_eq!("One-Time".parse::<SubscriptionType>().unwrap(), SubscriptionType::OneTime);
        assert_eq!("one_time".parse::<SubscriptionType>().unwrap(), SubscriptionType::OneTime);
        assert!("On-Time".parse::<SubscriptionType>().is_err());
    }

    #[test]
    fn test_frequency_parse() {
        assert_eq!("Auto-Seasonal".parse::<Frequency>().unwrap(), Frequency::AutoSeasonal);
        assert_eq!("biweekly".parse::<Frequency>().unwrap(), Frequency::Explicit(Cadence::Biweekly));
        assert_eq!("Bi-Weekly".parse::<Frequency>().unwrap(), Frequency::Explicit(Cadence::Biweekly));

        let err = "fortnightly".parse::<Frequency>().unwrap_err();
        assert!(err.to_string().contains("frequency"));
    }

    #[test]
    fn test_canonical_serialization() {
        let json = serde_json::to_string(&SubscriptionType::OneTime).unwrap();
        assert_eq!(json, "\"One-Time\"");

        let json = serde_json::to_string(&Frequency::AutoSeasonal).unwrap();
        assert_eq!(json, "\"Auto-Seasonal\"");

        let status: SubscriptionStatus = serde_json::from_str("\"ACTIVE\"").unwrap();
        assert_eq!(status, SubscriptionStatus::Active);
    }

    #[test]
    fn test_status_transitions() {
        use StatusEvent::*;
        use SubscriptionStatus::*;

        assert_eq!(Pending.transition(Activate), Ok(Active));
        assert!(Active.transition(Activate).is_err());
        assert_eq!(Active.transition(Deactivate), Ok(Inactive));
        assert_eq!(Pending.transition(Complete { one_time: false }), Ok(Active));
        assert_eq!(Active.transition(Complete { one_time: true }), Ok(Inactive));
    }

    #[test]
    fn test_inactive_is_terminal() {
        use StatusEvent::*;

        let inactive = SubscriptionStatus::Inactive;
        assert!(inactive.transition(Activate).is_err());
        assert!(inactive.transition(Deactivate).is_err());
        assert!(inactive.transition(Complete { one_time: false }).is_err());
    }
}
