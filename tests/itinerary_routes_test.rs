mod common;

use std::sync::Arc;

use actix_web::{http::StatusCode, test};
use serde_json::json;
use serial_test::serial;

use common::{bearer, label_amount, paris_request, token_signed_with, FailingGenerator, FixedGenerator, TestApp};

#[actix_rt::test]
#[serial]
async fn test_create_without_ai_key_returns_offline_plan() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/itineraries")
        .insert_header(bearer("user_a"))
        .set_json(paris_request(3))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert!(body["id"].as_str().is_some());
    assert!(body["createdAt"].as_str().is_some());

    let plan = &body["plan"];
    let days = plan["days"].as_array().unwrap();
    assert_eq!(days.len(), 3);
    assert_eq!(plan["overview"]["destination"], "Paris, France");
    assert_eq!(plan["summary"]["totalActivities"], 9);

    let daily_sum: u64 = days
        .iter()
        .map(|day| label_amount(day["dailyCost"].as_str().unwrap()))
        .sum();
    let total = plan["summary"]["totalEstimatedCost"].as_str().unwrap();
    assert_eq!(label_amount(total), daily_sum);
    assert_eq!(plan["overview"]["totalEstimatedCost"], plan["summary"]["totalEstimatedCost"]);

    assert_eq!(test_app.store.len().await, 1);
}

#[actix_rt::test]
#[serial]
async fn test_create_degrades_when_generator_fails() {
    let test_app = TestApp::with_generator(Some(Arc::new(FailingGenerator)));
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/itineraries")
        .insert_header(bearer("user_a"))
        .set_json(paris_request(2))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["plan"]["days"].as_array().unwrap().len(), 2);
    assert_eq!(body["plan"]["summary"]["totalActivities"], 6);
}

#[actix_rt::test]
#[serial]
async fn test_create_uses_ai_plan_and_recalculates_totals() {
    let ai_plan = json!({
        "overview": {
            "destination": "Paris, France",
            "duration": "2 days",
            "totalEstimatedCost": "₹999999"
        },
        "days": [
            {
                "day": 1,
                "activities": [
                    { "time": "9:00 AM", "name": "Louvre", "cost": "₹1,500" },
                    { "time": "7:00 PM", "name": "Seine cruise", "cost": "₹1,000-2,000" }
                ],
                "dailyCost": "₹1"
            },
            {
                "day": 2,
                "activities": [
                    { "time": "10:00 AM", "name": "Montmartre walk", "cost": "Free" }
                ],
                "dailyCost": "₹1"
            }
        ],
        "summary": { "totalEstimatedCost": "₹1", "totalActivities": 1, "highlights": ["Louvre"] }
    });
    let generator = FixedGenerator(ai_plan.to_string());
    let test_app = TestApp::with_generator(Some(Arc::new(generator)));
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/itineraries")
        .insert_header(bearer("user_a"))
        .set_json(paris_request(2))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body: serde_json::Value = test::read_body_json(resp).await;
    let plan = &body["plan"];
    assert_eq!(plan["days"][0]["activities"][0]["name"], "Louvre");
    assert_eq!(plan["days"][0]["dailyCost"], "₹3,000");
    assert_eq!(plan["days"][1]["dailyCost"], "₹0");
    assert_eq!(plan["summary"]["totalEstimatedCost"], "₹3,000");
    assert_eq!(plan["overview"]["totalEstimatedCost"], "₹3,000");
    assert_eq!(plan["summary"]["totalActivities"], 3);
}

#[actix_rt::test]
#[serial]
async fn test_create_falls_back_when_ai_plan_has_wrong_day_count() {
    let ai_plan = json!({
        "overview": { "destination": "Paris, France" },
        "days": [
            { "day": 1, "activities": [ { "time": "9:00 AM", "name": "Louvre", "cost": "₹1,500" } ] }
        ],
        "summary": {}
    });
    let generator = FixedGenerator(ai_plan.to_string());
    let test_app = TestApp::with_generator(Some(Arc::new(generator)));
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/itineraries")
        .insert_header(bearer("user_a"))
        .set_json(paris_request(3))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["plan"]["days"].as_array().unwrap().len(), 3);
}

#[actix_rt::test]
#[serial]
async fn test_create_rejects_zero_days() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/itineraries")
        .insert_header(bearer("user_a"))
        .set_json(paris_request(0))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "validation_failed");
    assert_eq!(body["fields"][0]["field"], "numDays");
    assert!(test_app.store.is_empty().await);
}

#[actix_rt::test]
#[serial]
async fn test_create_rejects_malformed_body() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/itineraries")
        .insert_header(bearer("user_a"))
        .insert_header(("Content-Type", "application/json"))
        .set_payload("{\"destination\": ")
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["fields"][0]["field"], "body");
    assert!(test_app.store.is_empty().await);
}

#[actix_rt::test]
#[serial]
async fn test_create_without_token_is_unauthenticated() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/itineraries")
        .set_json(paris_request(3))
        .to_request();
    let err = test::try_call_service(&app, req).await.unwrap_err();
    assert_eq!(err.as_response_error().status_code(), StatusCode::UNAUTHORIZED);

    // The body is never looked at without credentials.
    let req = test::TestRequest::post()
        .uri("/api/itineraries")
        .set_json(json!({ "numDays": 0 }))
        .to_request();
    let err = test::try_call_service(&app, req).await.unwrap_err();
    assert_eq!(err.as_response_error().status_code(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::get().uri("/api/itineraries").to_request();
    let err = test::try_call_service(&app, req).await.unwrap_err();
    assert_eq!(err.as_response_error().status_code(), StatusCode::UNAUTHORIZED);

    assert!(test_app.store.is_empty().await);
}

#[actix_rt::test]
#[serial]
async fn test_create_with_bad_token_is_unauthenticated() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    let forged = token_signed_with("user_a", "some-other-secret");
    let req = test::TestRequest::post()
        .uri("/api/itineraries")
        .insert_header(("Authorization", format!("Bearer {}", forged)))
        .set_json(paris_request(3))
        .to_request();
    let err = test::try_call_service(&app, req).await.unwrap_err();
    assert_eq!(err.as_response_error().status_code(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::post()
        .uri("/api/itineraries")
        .insert_header(("Authorization", "Bearer not-a-jwt"))
        .set_json(paris_request(3))
        .to_request();
    let err = test::try_call_service(&app, req).await.unwrap_err();
    assert_eq!(err.as_response_error().status_code(), StatusCode::UNAUTHORIZED);

    assert!(test_app.store.is_empty().await);
}

// Creates an itinerary through the API and evaluates to its id.
macro_rules! create_for {
    ($app:expr, $user_id:expr, $num_days:expr) => {{
        let req = test::TestRequest::post()
            .uri("/api/itineraries")
            .insert_header(bearer($user_id))
            .set_json(paris_request($num_days))
            .to_request();
        let resp = test::call_service(&$app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: serde_json::Value = test::read_body_json(resp).await;
        body["id"].as_str().unwrap().to_string()
    }};
}

#[actix_rt::test]
#[serial]
async fn test_get_list_and_delete_are_scoped_to_owner() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    let id = create_for!(app, "user_a", 2);
    create_for!(app, "user_a", 1);

    let req = test::TestRequest::get()
        .uri(&format!("/api/itineraries/{}", id))
        .insert_header(bearer("user_a"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["id"], id.as_str());
    assert_eq!(body["request"]["numDays"], 2);

    let req = test::TestRequest::get()
        .uri(&format!("/api/itineraries/{}", id))
        .insert_header(bearer("user_b"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::get()
        .uri("/api/itineraries")
        .insert_header(bearer("user_a"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body.as_array().unwrap().len(), 2);

    let req = test::TestRequest::get()
        .uri("/api/itineraries")
        .insert_header(bearer("user_b"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert!(body.as_array().unwrap().is_empty());

    let req = test::TestRequest::delete()
        .uri(&format!("/api/itineraries/{}", id))
        .insert_header(bearer("user_b"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/itineraries/{}", id))
        .insert_header(bearer("user_a"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert_eq!(test_app.store.len().await, 1);
}

#[actix_rt::test]
#[serial]
async fn test_get_unknown_id_is_not_found() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::get()
        .uri("/api/itineraries/invalid_id_format")
        .insert_header(bearer("user_a"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "not_found");
}

#[actix_rt::test]
#[serial]
async fn test_feedback_regenerates_in_place() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;
    let id = create_for!(app, "user_a", 2);

    let req = test::TestRequest::put()
        .uri(&format!("/api/itineraries/{}/feedback", id))
        .insert_header(bearer("user_a"))
        .set_json(json!({ "feedback": "   " }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::put()
        .uri(&format!("/api/itineraries/{}/feedback", id))
        .insert_header(bearer("user_a"))
        .set_json(json!({ "feedback": "Fewer museums, more food" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["id"], id.as_str());
    assert_eq!(body["plan"]["days"].as_array().unwrap().len(), 2);
    assert_eq!(test_app.store.len().await, 1);
}

#[actix_rt::test]
#[serial]
async fn test_share_link_is_public_and_stable() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;
    let id = create_for!(app, "user_a", 1);

    let req = test::TestRequest::post()
        .uri(&format!("/api/itineraries/{}/share", id))
        .insert_header(bearer("user_a"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let first: serde_json::Value = test::read_body_json(resp).await;
    let token = first["shareToken"].as_str().unwrap().to_string();
    assert_eq!(first["path"], format!("/api/shared/{}", token));

    let req = test::TestRequest::post()
        .uri(&format!("/api/itineraries/{}/share", id))
        .insert_header(bearer("user_a"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let second: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(second["shareToken"], token.as_str());

    let req = test::TestRequest::get()
        .uri(&format!("/api/shared/{}", token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let shared: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(shared["destination"], "Paris, France");
    assert!(shared.get("ownerId").is_none());

    let req = test::TestRequest::get()
        .uri("/api/shared/unknown-token")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
