use crate::models::request::ItineraryRequest;
use crate::services::currency::CurrencyFormat;

/// Literal example of the JSON document the model has to return.
const PLAN_SHAPE: &str = r#"{
  "overview": {
    "destination": "City, Country",
    "duration": "N days",
    "totalEstimatedCost": "<SYMBOL>0"
  },
  "days": [
    {
      "day": 1,
      "activities": [
        {
          "time": "Morning (9:00 AM - 12:00 PM)",
          "name": "Activity name",
          "description": "What the travellers will do",
          "cost": "<SYMBOL>500-1,000",
          "rationale": "Why this fits the travellers' preferences"
        }
      ],
      "transportation": "How to get around on this day",
      "dailyCost": "<SYMBOL>0"
    }
  ],
  "summary": {
    "totalEstimatedCost": "<SYMBOL>0",
    "totalActivities": 0,
    "highlights": ["Highlight of the trip"]
  },
  "hotels": [
    {
      "name": "Hotel name",
      "area": "Neighbourhood",
      "pricePerNight": "<SYMBOL>3,000-5,000",
      "description": "Why it suits this trip"
    }
  ]
}"#;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompts {
    pub system: String,
    pub user: String,
}

pub struct PromptService;

impl PromptService {
    /// Build the system and user instructions for one generation call.
    ///
    /// `research` is optional destination context from the research provider
    /// and `feedback` is the caller's comment on a previous version of the
    /// plan.
    pub fn build_prompts(
        request: &ItineraryRequest,
        currency: &CurrencyFormat,
        research: Option<&str>,
        feedback: Option<&str>,
    ) -> Prompts {
        Prompts {
            system: Self::system_prompt(currency),
            user: Self::user_prompt(request, currency, research, feedback),
        }
    }

    fn system_prompt(currency: &CurrencyFormat) -> String {
        format!(
            "You are an expert travel planner who builds realistic day-by-day itineraries.\n\
             Respond with a single JSON document and nothing else: no markdown, no commentary.\n\
             Express every cost in {code} using the {symbol} symbol, as a single amount or a range such as \"{symbol}500-1,000\", or the word \"Free\".\n\
             Scale every cost to the actual cost of living and tourist prices of the destination; the same budget tier means very different amounts in different places.\n\
             Only recommend places that really exist at the destination.",
            code = currency.code,
            symbol = currency.symbol,
        )
    }

    fn user_prompt(
        request: &ItineraryRequest,
        currency: &CurrencyFormat,
        research: Option<&str>,
        feedback: Option<&str>,
    ) -> String {
        let mut prompt = format!(
            "Create a {days}-day itinerary for {destination}.\n\n\
             Trip details:\n\
             - Travellers: {party} ({ages})\n\
             - Budget tier: {tier} ({guidance})\n\
             - Activity level: {level}\n",
            days = request.num_days,
            destination = request.destination.trim(),
            party = request.party_size,
            ages = request.age_groups.join(", "),
            tier = request.budget.label(),
            guidance = request.budget.guidance(),
            level = request.activity_level.guidance(),
        );

        match (request.start_date, request.end_date) {
            (Some(start), Some(end)) => {
                prompt.push_str(&format!("- Dates: {} to {}\n", start, end));
            }
            (Some(start), None) => prompt.push_str(&format!("- Starting: {}\n", start)),
            _ => {}
        }

        let constraints = Self::constraints(request);
        if !constraints.is_empty() {
            prompt.push_str("\nConstraints:\n");
            for constraint in constraints {
                prompt.push_str(&format!("- {}\n", constraint));
            }
        }

        if let Some(context) = research.map(str::trim).filter(|text| !text.is_empty()) {
            prompt.push_str(&format!(
                "\nCurrent information about {} (use it where relevant):\n{}\n",
                request.destination.trim(),
                context
            ));
        }

        if let Some(feedback) = feedback.map(str::trim).filter(|text| !text.is_empty()) {
            prompt.push_str(&format!(
                "\nThe travellers reviewed a previous version of this itinerary and asked for these changes:\n{}\n",
                feedback
            ));
        }

        prompt.push_str(&format!(
            "\nRequirements:\n\
             - Exactly {days} entries in \"days\", numbered 1 to {days} in order.\n\
             - Three to five activities per day, each with a cost in {code}.\n\
             - Typical {tier} prices for {destination} for {party} traveller(s).\n\
             - Suggest two or three hotels that match the budget tier.\n\n\
             Return JSON with exactly this shape:\n{shape}\n",
            days = request.num_days,
            code = currency.code,
            tier = request.budget.label(),
            destination = request.destination.trim(),
            party = request.party_size,
            shape = PLAN_SHAPE.replace("<SYMBOL>", currency.symbol),
        ));

        prompt
    }

    fn constraints(request: &ItineraryRequest) -> Vec<String> {
        let mut constraints = Vec::new();

        if !request.dietary_restrictions.is_empty() {
            constraints.push(format!(
                "Restaurant and food recommendations must accommodate: {}",
                request.dietary_restrictions.join(", ")
            ));
        }
        if !request.accessibility_needs.is_empty() {
            constraints.push(format!(
                "Every activity, hotel and transfer must be suitable for: {}",
                request.accessibility_needs.join(", ")
            ));
        }
        if !request.interests.is_empty() {
            constraints.push(format!(
                "Prioritise activities related to: {}",
                request.interests.join(", ")
            ));
        }

        constraints
    }

    /// Query sent to the research provider for up-to-date destination facts.
    pub fn research_query(request: &ItineraryRequest) -> String {
        let mut query = format!(
            "Current travel information for {}: opening hours, typical prices for {} travellers, local events",
            request.destination.trim(),
            request.budget.label().to_lowercase()
        );

        if let Some(start) = request.start_date {
            query.push_str(&format!(" around {}", start.format("%B %Y")));
        }
        if !request.interests.is_empty() {
            query.push_str(&format!(", recommendations for {}", request.interests.join(", ")));
        }

        query
    }
}
