use lazy_static::lazy_static;
use regex::Regex;

use crate::models::itinerary::ItineraryPlan;
use crate::services::currency::CurrencyFormat;

lazy_static! {
    static ref STRIP_CHARS: Regex = Regex::new(r"[\p{Sc},\s]").unwrap();
    static ref NUMBER: Regex = Regex::new(r"[0-9]+(?:\.[0-9]+)?").unwrap();
}

pub struct CostService;

impl CostService {
    /// Estimate the amount behind a free-form cost label such as `₹500-1,000`,
    /// `Free` or `$25 per person`. Ranges resolve to their midpoint and anything
    /// unreadable resolves to zero.
    pub fn extract_cost(label: &str) -> f64 {
        let trimmed = label.trim();
        if trimmed.is_empty()
            || trimmed.eq_ignore_ascii_case("free")
            || trimmed.eq_ignore_ascii_case("variable")
        {
            return 0.0;
        }

        let cleaned = STRIP_CHARS.replace_all(trimmed, "");

        let value = if cleaned.contains('-') {
            let parts: Vec<f64> = cleaned.split('-').take(2).filter_map(first_number).collect();
            if parts.is_empty() {
                0.0
            } else {
                parts.iter().sum::<f64>() / parts.len() as f64
            }
        } else {
            first_number(&cleaned).unwrap_or(0.0)
        };

        if value.is_finite() && value > 0.0 {
            value
        } else {
            0.0
        }
    }

    /// Rebuild every cost total in `plan` from its activity cost labels.
    ///
    /// Daily totals are rounded to whole units before being summed into the
    /// trip total, so the displayed parts always add up to the displayed
    /// whole. Activity labels are left as they are, which makes the operation
    /// idempotent. The input plan is not modified.
    pub fn recalculate_costs(plan: &ItineraryPlan, currency: &CurrencyFormat) -> ItineraryPlan {
        let mut recalculated = plan.clone();
        let mut trip_total = 0.0;

        for day in recalculated.days.iter_mut() {
            let daily_total: f64 = day
                .activities
                .iter()
                .map(|activity| Self::extract_cost(&activity.cost))
                .sum::<f64>()
                .round();

            day.daily_cost = currency.format(daily_total);
            trip_total += daily_total;
        }

        let total_label = currency.format(trip_total);
        recalculated.overview.total_estimated_cost = total_label.clone();
        recalculated.summary.total_estimated_cost = total_label;
        recalculated.summary.total_activities = plan.activity_count() as u32;

        recalculated
    }
}

fn first_number(text: &str) -> Option<f64> {
    NUMBER
        .find(text)
        .and_then(|found| found.as_str().parse::<f64>().ok())
}
