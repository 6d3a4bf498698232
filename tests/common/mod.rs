use std::sync::Arc;

use actix_web::{web, App};
use async_trait::async_trait;
use jsonwebtoken::{encode, EncodingKey, Header};

use trip_planner_api::db::memory::InMemoryItineraryStore;
use trip_planner_api::errors::AiError;
use trip_planner_api::middleware::auth::Claims;
use trip_planner_api::routes;
use trip_planner_api::services::ai_client::TextGenerator;
use trip_planner_api::services::currency::CurrencyFormat;
use trip_planner_api::services::itinerary_generation_service::ItineraryGenerator;
use trip_planner_api::services::itinerary_service::ItineraryService;

pub const TEST_SECRET: &str = "integration-test-secret";

/// Always fails, as a provider outage would.
pub struct FailingGenerator;

#[async_trait]
impl TextGenerator for FailingGenerator {
    async fn complete(&self, _system_prompt: &str, _user_prompt: &str) -> Result<String, AiError> {
        Err(AiError::Status {
            status: 503,
            body: "service unavailable".to_string(),
        })
    }
}

/// Replies with a fixed body regardless of the prompt.
pub struct FixedGenerator(pub String);

#[async_trait]
impl TextGenerator for FixedGenerator {
    async fn complete(&self, _system_prompt: &str, _user_prompt: &str) -> Result<String, AiError> {
        Ok(self.0.clone())
    }
}

pub struct TestApp {
    pub store: Arc<InMemoryItineraryStore>,
    pub service: ItineraryService,
}

impl TestApp {
    /// No generation key configured: every plan comes from the offline generator.
    pub fn new() -> Self {
        Self::with_generator(None)
    }

    pub fn with_generator(generator: Option<Arc<dyn TextGenerator>>) -> Self {
        let store = Arc::new(InMemoryItineraryStore::new());
        let service = ItineraryService::new(
            ItineraryGenerator::new(generator, None, CurrencyFormat::default()),
            store.clone(),
        );
        Self { store, service }
    }

    pub fn create_app(
        &self,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(web::Data::new(self.service.clone()))
            .configure(|cfg| routes::configure(cfg, TEST_SECRET))
    }
}

pub fn token_for(user_id: &str) -> String {
    token_signed_with(user_id, TEST_SECRET)
}

pub fn token_signed_with(user_id: &str, secret: &str) -> String {
    let now = chrono::Utc::now().timestamp() as usize;
    let claims = Claims {
        sub: format!("{}@example.com", user_id),
        exp: now + 3600,
        iat: now,
        user_id: user_id.to_string(),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .expect("failed to sign test token")
}

pub fn bearer(user_id: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {}", token_for(user_id)))
}

pub fn paris_request(num_days: u32) -> serde_json::Value {
    serde_json::json!({
        "destination": "Paris, France",
        "numDays": num_days,
        "budget": "Moderate",
        "ageGroups": ["Adults"],
        "partySize": 2,
        "activityLevel": "Moderate"
    })
}

/// Whole currency units in a formatted label such as "₹1,23,450".
pub fn label_amount(label: &str) -> u64 {
    label
        .chars()
        .filter(|c| c.is_ascii_digit())
        .collect::<String>()
        .parse()
        .unwrap_or(0)
}
