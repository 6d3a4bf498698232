//! Offline itinerary generator.
//!
//! Produces a well-formed plan without any network access. It backs the
//! generation pipeline whenever the AI provider is not configured or its
//! answer cannot be used.

use crate::models::itinerary::{duration_label, Activity, Day, Hotel, ItineraryPlan, Overview, Summary};
use crate::models::request::BudgetTier;
use crate::services::currency::CurrencyFormat;

struct ActivityTemplate {
    name: &'static str,
    description: &'static str,
    rationale: &'static str,
    /// Share of the tier's per-activity band; zero means the activity is free.
    cost_weight: f64,
}

const MORNING: &[ActivityTemplate] = &[
    ActivityTemplate {
        name: "Old town walking tour",
        description: "Explore the historic centre of {dest} on foot with a local guide.",
        rationale: "A gentle introduction to the layout and history of the city.",
        cost_weight: 0.0,
    },
    ActivityTemplate {
        name: "Landmark visit",
        description: "Visit the best-known landmark of {dest} before the crowds arrive.",
        rationale: "Mornings are the quietest time at popular sights.",
        cost_weight: 1.0,
    },
    ActivityTemplate {
        name: "Local market breakfast",
        description: "Sample breakfast dishes at a busy local market in {dest}.",
        rationale: "Markets show everyday life and regional food.",
        cost_weight: 0.5,
    },
    ActivityTemplate {
        name: "Scenic viewpoint",
        description: "Head to a viewpoint overlooking {dest} for morning light.",
        rationale: "Panoramic views help orient the rest of the trip.",
        cost_weight: 0.5,
    },
];

const AFTERNOON: &[ActivityTemplate] = &[
    ActivityTemplate {
        name: "Museum afternoon",
        description: "Spend the afternoon at a major museum in {dest}.",
        rationale: "Indoor culture during the hottest part of the day.",
        cost_weight: 1.0,
    },
    ActivityTemplate {
        name: "Neighbourhood food tour",
        description: "Taste signature dishes across a lively neighbourhood of {dest}.",
        rationale: "Food is one of the easiest ways into local culture.",
        cost_weight: 1.5,
    },
    ActivityTemplate {
        name: "Park and gardens",
        description: "Relax in the gardens and green spaces of {dest}.",
        rationale: "A slower block keeps the day comfortable for every age group.",
        cost_weight: 0.5,
    },
    ActivityTemplate {
        name: "Cultural workshop",
        description: "Join a hands-on craft or cooking workshop in {dest}.",
        rationale: "Hands-on experiences are memorable for groups.",
        cost_weight: 1.5,
    },
];

const EVENING: &[ActivityTemplate] = &[
    ActivityTemplate {
        name: "Dinner at a local restaurant",
        description: "Enjoy a regional dinner at a well-reviewed restaurant in {dest}.",
        rationale: "Ends the day with the local cuisine.",
        cost_weight: 1.5,
    },
    ActivityTemplate {
        name: "Sunset cruise or promenade",
        description: "Watch the sunset over {dest} from the water or the waterfront.",
        rationale: "Evenings are best spent somewhere scenic.",
        cost_weight: 1.0,
    },
    ActivityTemplate {
        name: "Night market",
        description: "Browse stalls and street food at an evening market in {dest}.",
        rationale: "A lively, flexible option after a full day.",
        cost_weight: 0.5,
    },
    ActivityTemplate {
        name: "Live performance",
        description: "Catch a traditional music or dance performance in {dest}.",
        rationale: "Showcases the performing arts of the region.",
        cost_weight: 1.5,
    },
];

const SLOTS: [(&str, &[ActivityTemplate]); 3] = [
    ("Morning (9:00 AM - 12:00 PM)", MORNING),
    ("Afternoon (1:00 PM - 5:00 PM)", AFTERNOON),
    ("Evening (6:00 PM - 9:00 PM)", EVENING),
];

/// Per-activity cost band in US dollars.
fn activity_band(budget: BudgetTier) -> (f64, f64) {
    match budget {
        BudgetTier::Economy => (5.0, 15.0),
        BudgetTier::Moderate => (20.0, 40.0),
        BudgetTier::Luxury => (60.0, 120.0),
        BudgetTier::NoLimit => (150.0, 300.0),
    }
}

/// Nightly hotel band in US dollars.
fn hotel_band(budget: BudgetTier) -> (f64, f64) {
    match budget {
        BudgetTier::Economy => (15.0, 40.0),
        BudgetTier::Moderate => (60.0, 120.0),
        BudgetTier::Luxury => (200.0, 400.0),
        BudgetTier::NoLimit => (500.0, 1200.0),
    }
}

fn transportation(budget: BudgetTier) -> &'static str {
    match budget {
        BudgetTier::Economy => "Public transport and walking",
        BudgetTier::Moderate => "Metro or bus with occasional taxis",
        BudgetTier::Luxury => "Private taxi or ride-hailing between stops",
        BudgetTier::NoLimit => "Private chauffeur for the whole day",
    }
}

fn hotel_name(budget: BudgetTier) -> &'static str {
    match budget {
        BudgetTier::Economy => "Central Guesthouse",
        BudgetTier::Moderate => "City Comfort Hotel",
        BudgetTier::Luxury => "Grand Palace Hotel",
        BudgetTier::NoLimit => "Royal Heritage Suites",
    }
}

/// Rounds a converted amount to a tidy figure of at least 10 units.
fn tidy(amount_usd: f64, currency: &CurrencyFormat) -> f64 {
    let local = amount_usd * currency.per_usd as f64;
    ((local / 10.0).round() * 10.0).max(10.0)
}

fn cost_label(template: &ActivityTemplate, budget: BudgetTier, currency: &CurrencyFormat) -> String {
    if template.cost_weight == 0.0 {
        return "Free".to_string();
    }
    let (low, high) = activity_band(budget);
    currency.format_range(
        tidy(low * template.cost_weight, currency),
        tidy(high * template.cost_weight, currency),
    )
}

pub struct MockGenerator;

impl MockGenerator {
    /// Build a plan of `num_days` days with three activities each, cycling the
    /// template pools by day index. Totals are left for the cost service.
    pub fn generate(
        destination: &str,
        num_days: u32,
        budget: BudgetTier,
        currency: &CurrencyFormat,
    ) -> ItineraryPlan {
        let destination = destination.trim();

        let days: Vec<Day> = (1..=num_days)
            .map(|day| {
                let index = (day - 1) as usize;
                let activities = SLOTS
                    .iter()
                    .map(|(time, pool)| {
                        let template = &pool[index % pool.len()];
                        Activity {
                            time: time.to_string(),
                            name: template.name.to_string(),
                            description: template.description.replace("{dest}", destination),
                            cost: cost_label(template, budget, currency),
                            rationale: template.rationale.to_string(),
                        }
                    })
                    .collect();

                Day {
                    day,
                    activities,
                    transportation: transportation(budget).to_string(),
                    daily_cost: String::new(),
                }
            })
            .collect();

        let mut highlights: Vec<String> = Vec::new();
        for activity in days.iter().flat_map(|day| day.activities.iter()) {
            if highlights.len() == 5 {
                break;
            }
            if activity.cost != "Free" && !highlights.contains(&activity.name) {
                highlights.push(activity.name.clone());
            }
        }

        let (hotel_low, hotel_high) = hotel_band(budget);
        let hotels = vec![Hotel {
            name: hotel_name(budget).to_string(),
            area: format!("Central {}", destination),
            price_per_night: currency.format_range(
                tidy(hotel_low, currency),
                tidy(hotel_high, currency),
            ),
            description: format!("{} accommodation close to the main sights.", budget.label()),
        }];

        ItineraryPlan {
            overview: Overview {
                destination: destination.to_string(),
                duration: duration_label(num_days),
                total_estimated_cost: String::new(),
            },
            days,
            summary: Summary {
                total_estimated_cost: String::new(),
                total_activities: 0,
                highlights,
            },
            hotels,
        }
    }
}
