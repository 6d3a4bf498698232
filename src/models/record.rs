use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::models::itinerary::ItineraryPlan;
use crate::models::request::ItineraryRequest;

/// Which branch of the generation pipeline produced a stored plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanSource {
    Ai,
    Mock,
}

/// A persisted itinerary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItineraryRecord {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub owner_id: String,
    pub request: ItineraryRequest,
    pub plan: ItineraryPlan,
    pub source: PlanSource,
    pub feedback: Option<String>,
    pub share_token: Option<String>,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
}

impl ItineraryRecord {
    pub fn new(owner_id: &str, request: ItineraryRequest, plan: ItineraryPlan, source: PlanSource) -> Self {
        let now = Utc::now();
        Self {
            id: None,
            owner_id: owner_id.to_string(),
            request,
            plan,
            source,
            feedback: None,
            share_token: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn id_hex(&self) -> String {
        self.id.map(|id| id.to_hex()).unwrap_or_default()
    }
}

/// Owner view of a stored itinerary.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItineraryResponse {
    pub id: String,
    pub request: ItineraryRequest,
    pub plan: ItineraryPlan,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub share_token: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ItineraryRecord> for ItineraryResponse {
    fn from(record: ItineraryRecord) -> Self {
        Self {
            id: record.id_hex(),
            request: record.request,
            plan: record.plan,
            share_token: record.share_token,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

/// Body returned after a successful generation.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedItineraryResponse {
    pub id: String,
    pub plan: ItineraryPlan,
    pub created_at: DateTime<Utc>,
}

/// Compact entry for the caller's itinerary list.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItinerarySummaryResponse {
    pub id: String,
    pub destination: String,
    pub num_days: u32,
    pub total_estimated_cost: String,
    pub created_at: DateTime<Utc>,
}

impl From<&ItineraryRecord> for ItinerarySummaryResponse {
    fn from(record: &ItineraryRecord) -> Self {
        Self {
            id: record.id_hex(),
            destination: record.request.destination.clone(),
            num_days: record.request.num_days,
            total_estimated_cost: record.plan.summary.total_estimated_cost.clone(),
            created_at: record.created_at,
        }
    }
}

/// Read-only view exposed through a share token. Owner details are omitted.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SharedItineraryResponse {
    pub destination: String,
    pub plan: ItineraryPlan,
    pub created_at: DateTime<Utc>,
}

impl From<ItineraryRecord> for SharedItineraryResponse {
    fn from(record: ItineraryRecord) -> Self {
        Self {
            destination: record.request.destination,
            plan: record.plan,
            created_at: record.created_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct FeedbackInput {
    pub feedback: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareResponse {
    pub share_token: String,
    pub path: String,
}
