use std::fmt;
use std::sync::Arc;

use crate::errors::AiError;
use crate::models::itinerary::ItineraryPlan;
use crate::models::record::PlanSource;
use crate::models::request::ItineraryRequest;
use crate::services::ai_client::{ResearchProvider, TextGenerator};
use crate::services::cost_service::CostService;
use crate::services::currency::CurrencyFormat;
use crate::services::mock_generator::MockGenerator;
use crate::services::plan_validation::{parse_plan, PlanShapeError};
use crate::services::prompt_service::PromptService;

/// Why the AI branch was abandoned for the offline generator.
#[derive(Debug)]
pub enum DegradeReason {
    NotConfigured,
    Upstream(AiError),
    InvalidShape(PlanShapeError),
}

impl fmt::Display for DegradeReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DegradeReason::NotConfigured => write!(f, "no generation API key configured"),
            DegradeReason::Upstream(err) => write!(f, "generation call failed: {}", err),
            DegradeReason::InvalidShape(err) => write!(f, "unusable generation response: {}", err),
        }
    }
}

/// Result of the generate-or-degrade step. Both variants carry a usable plan.
#[derive(Debug)]
pub enum GenerationOutcome {
    Generated(ItineraryPlan),
    Degraded {
        plan: ItineraryPlan,
        reason: DegradeReason,
    },
}

impl GenerationOutcome {
    pub fn source(&self) -> PlanSource {
        match self {
            GenerationOutcome::Generated(_) => PlanSource::Ai,
            GenerationOutcome::Degraded { .. } => PlanSource::Mock,
        }
    }

    pub fn plan(&self) -> &ItineraryPlan {
        match self {
            GenerationOutcome::Generated(plan) => plan,
            GenerationOutcome::Degraded { plan, .. } => plan,
        }
    }

    pub fn into_plan(self) -> ItineraryPlan {
        match self {
            GenerationOutcome::Generated(plan) => plan,
            GenerationOutcome::Degraded { plan, .. } => plan,
        }
    }

    fn map_plan<F>(self, f: F) -> Self
    where
        F: FnOnce(&ItineraryPlan) -> ItineraryPlan,
    {
        match self {
            GenerationOutcome::Generated(plan) => GenerationOutcome::Generated(f(&plan)),
            GenerationOutcome::Degraded { plan, reason } => GenerationOutcome::Degraded {
                plan: f(&plan),
                reason,
            },
        }
    }
}

/// Turns a validated request into a cost-consistent plan. Research and
/// generation failures never escape; they only degrade the result.
#[derive(Clone)]
pub struct ItineraryGenerator {
    generator: Option<Arc<dyn TextGenerator>>,
    research: Option<Arc<dyn ResearchProvider>>,
    currency: CurrencyFormat,
}

impl ItineraryGenerator {
    pub fn new(
        generator: Option<Arc<dyn TextGenerator>>,
        research: Option<Arc<dyn ResearchProvider>>,
        currency: CurrencyFormat,
    ) -> Self {
        Self {
            generator,
            research,
            currency,
        }
    }

    pub fn has_generator(&self) -> bool {
        self.generator.is_some()
    }

    pub fn has_research(&self) -> bool {
        self.research.is_some()
    }

    /// Research, generate (or degrade to the offline generator), then
    /// recalculate every cost total.
    pub async fn generate(&self, request: &ItineraryRequest, feedback: Option<&str>) -> GenerationOutcome {
        let context = self.research(request).await;
        let outcome = self.generate_or_degrade(request, context.as_deref(), feedback).await;

        match &outcome {
            GenerationOutcome::Generated(_) => {
                log::info!("Generated itinerary for {} with AI", request.destination.trim())
            }
            GenerationOutcome::Degraded { reason, .. } => log::warn!(
                "Using offline itinerary for {}: {}",
                request.destination.trim(),
                reason
            ),
        }

        outcome.map_plan(|plan| CostService::recalculate_costs(plan, &self.currency))
    }

    async fn research(&self, request: &ItineraryRequest) -> Option<String> {
        let provider = self.research.as_ref()?;
        let query = PromptService::research_query(request);

        match provider.search(&query).await {
            Ok(text) if !text.trim().is_empty() => {
                log::debug!("Research returned {} bytes of context", text.len());
                Some(text)
            }
            Ok(_) => None,
            Err(err) => {
                log::warn!("Research call failed, continuing without context: {}", err);
                None
            }
        }
    }

    async fn generate_or_degrade(
        &self,
        request: &ItineraryRequest,
        context: Option<&str>,
        feedback: Option<&str>,
    ) -> GenerationOutcome {
        let Some(generator) = self.generator.as_ref() else {
            return self.degrade(request, DegradeReason::NotConfigured);
        };

        let prompts = PromptService::build_prompts(request, &self.currency, context, feedback);

        let raw = match generator.complete(&prompts.system, &prompts.user).await {
            Ok(raw) => raw,
            Err(err) => return self.degrade(request, DegradeReason::Upstream(err)),
        };

        match parse_plan(&raw, request.num_days) {
            Ok(plan) => GenerationOutcome::Generated(plan),
            Err(err) => self.degrade(request, DegradeReason::InvalidShape(err)),
        }
    }

    fn degrade(&self, request: &ItineraryRequest, reason: DegradeReason) -> GenerationOutcome {
        GenerationOutcome::Degraded {
            plan: MockGenerator::generate(
                &request.destination,
                request.num_days,
                request.budget,
                &self.currency,
            ),
            reason,
        }
    }
}
