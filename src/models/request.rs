use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::FieldError;

pub const MAX_DAYS: u32 = 30;
pub const MAX_PARTY_SIZE: u32 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BudgetTier {
    Economy,
    Moderate,
    Luxury,
    #[serde(rename = "No-Limit")]
    NoLimit,
}

impl BudgetTier {
    pub fn label(&self) -> &'static str {
        match self {
            BudgetTier::Economy => "Economy",
            BudgetTier::Moderate => "Moderate",
            BudgetTier::Luxury => "Luxury",
            BudgetTier::NoLimit => "No-Limit",
        }
    }

    /// Spending guidance relative to the destination's own price level.
    pub fn guidance(&self) -> &'static str {
        match self {
            BudgetTier::Economy => {
                "budget travel: hostels or simple guesthouses, street food and local eateries, public transport, mostly free or low-cost sights"
            }
            BudgetTier::Moderate => {
                "mid-range travel: 3-star hotels, sit-down local restaurants, a mix of public transport and taxis, paid entry to major attractions"
            }
            BudgetTier::Luxury => {
                "luxury travel: 5-star hotels, fine dining, private transfers, guided and premium experiences"
            }
            BudgetTier::NoLimit => {
                "no budget limit: the best available hotels, exclusive experiences, private guides and chauffeured transport"
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActivityLevel {
    Relaxed,
    Moderate,
    Active,
}

impl ActivityLevel {
    pub fn guidance(&self) -> &'static str {
        match self {
            ActivityLevel::Relaxed => "a relaxed pace with plenty of rest and little walking",
            ActivityLevel::Moderate => "a moderate pace mixing sightseeing with downtime",
            ActivityLevel::Active => "an active pace with long walks, hikes and full days",
        }
    }
}

/// Trip preferences submitted by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItineraryRequest {
    pub destination: String,
    pub num_days: u32,
    pub budget: BudgetTier,
    pub age_groups: Vec<String>,
    pub party_size: u32,
    pub activity_level: ActivityLevel,
    #[serde(default)]
    pub dietary_restrictions: Vec<String>,
    #[serde(default)]
    pub accessibility_needs: Vec<String>,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
}

impl ItineraryRequest {
    /// Checks every field and reports all problems at once.
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();

        if self.destination.trim().is_empty() {
            errors.push(FieldError::new("destination", "must not be empty"));
        }
        if self.num_days < 1 || self.num_days > MAX_DAYS {
            errors.push(FieldError::new(
                "numDays",
                format!("must be between 1 and {}", MAX_DAYS),
            ));
        }
        if self.party_size < 1 || self.party_size > MAX_PARTY_SIZE {
            errors.push(FieldError::new(
                "partySize",
                format!("must be between 1 and {}", MAX_PARTY_SIZE),
            ));
        }
        if self.age_groups.is_empty() {
            errors.push(FieldError::new("ageGroups", "select at least one age group"));
        }

        for (field, values) in [
            ("ageGroups", &self.age_groups),
            ("dietaryRestrictions", &self.dietary_restrictions),
            ("accessibilityNeeds", &self.accessibility_needs),
            ("interests", &self.interests),
        ] {
            if values.iter().any(|value| value.trim().is_empty()) {
                errors.push(FieldError::new(field, "entries must not be blank"));
            }
        }

        if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
            if end < start {
                errors.push(FieldError::new("endDate", "must not be before startDate"));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
