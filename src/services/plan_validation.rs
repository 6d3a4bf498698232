use thiserror::Error;

use crate::models::itinerary::ItineraryPlan;

#[derive(Debug, Error, PartialEq)]
pub enum PlanShapeError {
    #[error("response is not valid JSON for an itinerary at `{path}`: {message}")]
    Malformed { path: String, message: String },
    #[error("expected {expected} days, got {actual}")]
    DayCount { expected: u32, actual: usize },
    #[error("day at position {position} is numbered {numbered}")]
    DayNumbering { position: usize, numbered: u32 },
    #[error("day {0} has no activities")]
    EmptyDay(u32),
    #[error("day {0} has an activity without a name")]
    UnnamedActivity(u32),
}

/// Parse model output into a plan and check the structural invariants the
/// rest of the pipeline relies on.
pub fn parse_plan(raw: &str, expected_days: u32) -> Result<ItineraryPlan, PlanShapeError> {
    let text = strip_code_fence(raw);
    let deserializer = &mut serde_json::Deserializer::from_str(text);
    let plan: ItineraryPlan =
        serde_path_to_error::deserialize(deserializer).map_err(|err| PlanShapeError::Malformed {
            path: err.path().to_string(),
            message: err.inner().to_string(),
        })?;

    validate_plan(&plan, expected_days)?;
    Ok(plan)
}

pub fn validate_plan(plan: &ItineraryPlan, expected_days: u32) -> Result<(), PlanShapeError> {
    if plan.days.len() != expected_days as usize {
        return Err(PlanShapeError::DayCount {
            expected: expected_days,
            actual: plan.days.len(),
        });
    }

    for (index, day) in plan.days.iter().enumerate() {
        let position = index + 1;
        if day.day as usize != position {
            return Err(PlanShapeError::DayNumbering {
                position,
                numbered: day.day,
            });
        }
        if day.activities.is_empty() {
            return Err(PlanShapeError::EmptyDay(day.day));
        }
        if day.activities.iter().any(|activity| activity.name.trim().is_empty()) {
            return Err(PlanShapeError::UnnamedActivity(day.day));
        }
    }

    Ok(())
}

// Models sometimes wrap JSON in ```json fences despite being asked not to.
fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}
