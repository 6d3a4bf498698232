use actix_web::{error::JsonPayloadError, web, Error, HttpRequest};

use crate::errors::{ApiError, FieldError};
use crate::middleware::auth::AuthMiddleware;

pub mod health;
pub mod itinerary;

/// Register every route. Shared with the integration tests so they exercise
/// the same routing and middleware as the server.
pub fn configure(cfg: &mut web::ServiceConfig, jwt_secret: &str) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error))
        .route("/health", web::get().to(health::health_check))
        .service(
            web::scope("/api")
                // Public routes
                .route("/shared/{token}", web::get().to(itinerary::get_shared))
                // Protected routes
                .service(
                    web::scope("/itineraries")
                        .wrap(AuthMiddleware::new(jwt_secret))
                        .route("", web::post().to(itinerary::create))
                        .route("", web::get().to(itinerary::list))
                        .route("/{id}", web::get().to(itinerary::get_by_id))
                        .route("/{id}", web::delete().to(itinerary::delete))
                        .route("/{id}/feedback", web::put().to(itinerary::regenerate))
                        .route("/{id}/share", web::post().to(itinerary::share)),
                ),
        );
}

fn json_error(err: JsonPayloadError, _req: &HttpRequest) -> Error {
    log::debug!("Rejected request body: {}", err);
    ApiError::Validation(vec![FieldError::new("body", err.to_string())]).into()
}
