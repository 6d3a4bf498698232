use actix_web::{web, HttpResponse};

use crate::errors::ApiError;
use crate::middleware::auth_context::AuthenticatedUser;
use crate::models::record::{
    FeedbackInput, GeneratedItineraryResponse, ItineraryResponse, ItinerarySummaryResponse,
    ShareResponse, SharedItineraryResponse,
};
use crate::models::request::ItineraryRequest;
use crate::services::itinerary_service::ItineraryService;

/*
    POST /api/itineraries
*/
pub async fn create(
    user: AuthenticatedUser,
    service: web::Data<ItineraryService>,
    input: web::Json<ItineraryRequest>,
) -> Result<HttpResponse, ApiError> {
    log::info!(
        "Itinerary requested by {} for {}",
        user.email,
        input.destination.trim()
    );
    let record = service.create(&user.user_id, input.into_inner()).await?;

    Ok(HttpResponse::Created().json(GeneratedItineraryResponse {
        id: record.id_hex(),
        plan: record.plan,
        created_at: record.created_at,
    }))
}

/*
    GET /api/itineraries
*/
pub async fn list(
    user: AuthenticatedUser,
    service: web::Data<ItineraryService>,
) -> Result<HttpResponse, ApiError> {
    let records = service.list(&user.user_id).await?;
    let summaries: Vec<ItinerarySummaryResponse> = records.iter().map(Into::into).collect();
    Ok(HttpResponse::Ok().json(summaries))
}

/*
    GET /api/itineraries/{id}
*/
pub async fn get_by_id(
    user: AuthenticatedUser,
    service: web::Data<ItineraryService>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let record = service.get(&user.user_id, &path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ItineraryResponse::from(record)))
}

/*
    PUT /api/itineraries/{id}/feedback
*/
pub async fn regenerate(
    user: AuthenticatedUser,
    service: web::Data<ItineraryService>,
    path: web::Path<String>,
    input: web::Json<FeedbackInput>,
) -> Result<HttpResponse, ApiError> {
    let record = service
        .regenerate(&user.user_id, &path.into_inner(), &input.feedback)
        .await?;
    Ok(HttpResponse::Ok().json(ItineraryResponse::from(record)))
}

/*
    POST /api/itineraries/{id}/share
*/
pub async fn share(
    user: AuthenticatedUser,
    service: web::Data<ItineraryService>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let token = service.share(&user.user_id, &path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ShareResponse {
        path: format!("/api/shared/{}", token),
        share_token: token,
    }))
}

/*
    DELETE /api/itineraries/{id}
*/
pub async fn delete(
    user: AuthenticatedUser,
    service: web::Data<ItineraryService>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    service.delete(&user.user_id, &path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

/*
    GET /api/shared/{token} (public)
*/
pub async fn get_shared(
    service: web::Data<ItineraryService>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let record = service.find_shared(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(SharedItineraryResponse::from(record)))
}
