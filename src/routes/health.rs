use actix_web::{web, HttpResponse, Responder};
use serde::Serialize;
use std::collections::HashMap;
use std::env;

use crate::services::itinerary_service::ItineraryService;

#[derive(Serialize)]
struct HealthStatus {
    status: String,
    services: HashMap<String, ServiceStatus>,
    environment: String,
    version: String,
}

#[derive(Serialize, Clone)]
struct ServiceStatus {
    status: String,
    details: Option<String>,
}

impl ServiceStatus {
    fn ok(details: String) -> Self {
        Self {
            status: "ok".to_string(),
            details: Some(details),
        }
    }

    fn with_status(status: &str, details: String) -> Self {
        Self {
            status: status.to_string(),
            details: Some(details),
        }
    }
}

/*
    GET /health
*/
pub async fn health_check(service: web::Data<ItineraryService>) -> impl Responder {
    let mut health = HealthStatus {
        status: "ok".to_string(),
        services: HashMap::new(),
        environment: env::var("RUST_ENV").unwrap_or("development".to_string()),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    let store = service.store();
    let storage = match store.ping().await {
        Ok(()) => ServiceStatus::ok(format!("{} storage reachable", store.backend())),
        Err(e) => {
            log::error!("Storage health check failed: {}", e);
            ServiceStatus::with_status("error", format!("{} storage unreachable", store.backend()))
        }
    };

    // Without a generation key every plan comes from the offline generator.
    let generation = if service.generator().has_generator() {
        ServiceStatus::ok("AI generation configured".to_string())
    } else {
        ServiceStatus::with_status("degraded", "OPENAI_API_KEY not configured".to_string())
    };

    let research = if service.generator().has_research() {
        ServiceStatus::ok("Destination research configured".to_string())
    } else {
        ServiceStatus::with_status("disabled", "PERPLEXITY_API_KEY not configured".to_string())
    };

    if storage.status != "ok" || generation.status != "ok" {
        health.status = "degraded".to_string();
    }

    health.services.insert("storage".to_string(), storage);
    health.services.insert("generation".to_string(), generation);
    health.services.insert("research".to_string(), research);

    HttpResponse::Ok().json(health)
}
