use std::sync::Arc;

use uuid::Uuid;

use crate::db::store::ItineraryStore;
use crate::errors::{ApiError, FieldError};
use crate::models::record::ItineraryRecord;
use crate::models::request::ItineraryRequest;
use crate::services::itinerary_generation_service::ItineraryGenerator;

const MAX_FEEDBACK_CHARS: usize = 2000;

/// Request handling for itineraries: generation, persistence and access
/// control. Every lookup is scoped to the owner; other callers see 404.
#[derive(Clone)]
pub struct ItineraryService {
    generator: ItineraryGenerator,
    store: Arc<dyn ItineraryStore>,
}

impl ItineraryService {
    pub fn new(generator: ItineraryGenerator, store: Arc<dyn ItineraryStore>) -> Self {
        Self { generator, store }
    }

    pub fn generator(&self) -> &ItineraryGenerator {
        &self.generator
    }

    pub fn store(&self) -> &Arc<dyn ItineraryStore> {
        &self.store
    }

    /// validate → research → generate or degrade → recalculate → persist.
    pub async fn create(&self, owner_id: &str, request: ItineraryRequest) -> Result<ItineraryRecord, ApiError> {
        request.validate().map_err(ApiError::Validation)?;

        let outcome = self.generator.generate(&request, None).await;
        let source = outcome.source();
        let record = ItineraryRecord::new(owner_id, request, outcome.into_plan(), source);

        let record = self.store.create(record).await?;
        log::info!(
            "Saved itinerary {} for user {} ({:?})",
            record.id_hex(),
            owner_id,
            source
        );
        Ok(record)
    }

    pub async fn get(&self, owner_id: &str, id: &str) -> Result<ItineraryRecord, ApiError> {
        match self.store.find_by_id(id).await? {
            Some(record) if record.owner_id == owner_id => Ok(record),
            _ => Err(ApiError::NotFound),
        }
    }

    pub async fn list(&self, owner_id: &str) -> Result<Vec<ItineraryRecord>, ApiError> {
        Ok(self.store.list_for_owner(owner_id).await?)
    }

    /// Generate a full replacement plan that takes `feedback` into account.
    pub async fn regenerate(&self, owner_id: &str, id: &str, feedback: &str) -> Result<ItineraryRecord, ApiError> {
        let feedback = feedback.trim();
        if feedback.is_empty() {
            return Err(ApiError::Validation(vec![FieldError::new("feedback", "must not be empty")]));
        }
        if feedback.chars().count() > MAX_FEEDBACK_CHARS {
            return Err(ApiError::Validation(vec![FieldError::new(
                "feedback",
                format!("must be at most {} characters", MAX_FEEDBACK_CHARS),
            )]));
        }

        let existing = self.get(owner_id, id).await?;
        let outcome = self.generator.generate(&existing.request, Some(feedback)).await;
        let source = outcome.source();

        self.store
            .replace_plan(id, outcome.plan(), source, feedback)
            .await?
            .ok_or(ApiError::NotFound)
    }

    /// Return the record's share token, creating one on first use.
    pub async fn share(&self, owner_id: &str, id: &str) -> Result<String, ApiError> {
        let existing = self.get(owner_id, id).await?;
        if let Some(token) = existing.share_token {
            return Ok(token);
        }

        // A concurrent share may have stored its token first; hand out whichever is stored.
        let candidate = Uuid::new_v4().simple().to_string();
        let record = self
            .store
            .set_share_token_if_absent(id, &candidate)
            .await?
            .ok_or(ApiError::NotFound)?;

        record.share_token.ok_or_else(|| {
            log::error!("Share token missing after update for itinerary {}", id);
            ApiError::Internal
        })
    }

    pub async fn find_shared(&self, token: &str) -> Result<ItineraryRecord, ApiError> {
        self.store
            .find_by_share_token(token)
            .await?
            .ok_or(ApiError::NotFound)
    }

    pub async fn delete(&self, owner_id: &str, id: &str) -> Result<(), ApiError> {
        self.get(owner_id, id).await?;
        if self.store.delete(id).await? {
            Ok(())
        } else {
            Err(ApiError::NotFound)
        }
    }
}
