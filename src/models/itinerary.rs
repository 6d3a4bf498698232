use serde::{Deserialize, Serialize};

/// A generated trip plan. Cost totals are display labels derived from the
/// activity cost labels by the cost service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItineraryPlan {
    pub overview: Overview,
    pub days: Vec<Day>,
    pub summary: Summary,
    #[serde(default)]
    pub hotels: Vec<Hotel>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Overview {
    pub destination: String,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub total_estimated_cost: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Day {
    pub day: u32,
    pub activities: Vec<Activity>,
    #[serde(default)]
    pub transportation: String,
    #[serde(default)]
    pub daily_cost: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub time: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub cost: String,
    #[serde(default)]
    pub rationale: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    #[serde(default)]
    pub total_estimated_cost: String,
    #[serde(default)]
    pub total_activities: u32,
    #[serde(default)]
    pub highlights: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hotel {
    pub name: String,
    #[serde(default)]
    pub area: String,
    #[serde(default)]
    pub price_per_night: String,
    #[serde(default)]
    pub description: String,
}

impl ItineraryPlan {
    pub fn activity_count(&self) -> usize {
        self.days.iter().map(|day| day.activities.len()).sum()
    }
}

/// Human readable trip length, e.g. "1 day" or "4 days".
pub fn duration_label(num_days: u32) -> String {
    if num_days == 1 {
        "1 day".to_string()
    } else {
        format!("{} days", num_days)
    }
}
