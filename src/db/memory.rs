use async_trait::async_trait;
use chrono::Utc;
use mongodb::bson::oid::ObjectId;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::db::store::ItineraryStore;
use crate::errors::StoreError;
use crate::models::itinerary::ItineraryPlan;
use crate::models::record::{ItineraryRecord, PlanSource};

/// Process-local store used when no MongoDB URI is configured. Contents are
/// lost on restart.
#[derive(Default)]
pub struct InMemoryItineraryStore {
    records: RwLock<HashMap<ObjectId, ItineraryRecord>>,
}

impl InMemoryItineraryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    async fn update<F>(&self, id: &str, apply: F) -> Option<ItineraryRecord>
    where
        F: FnOnce(&mut ItineraryRecord),
    {
        let id = ObjectId::parse_str(id).ok()?;
        let mut records = self.records.write().await;
        let record = records.get_mut(&id)?;
        apply(record);
        record.updated_at = Utc::now();
        Some(record.clone())
    }
}

#[async_trait]
impl ItineraryStore for InMemoryItineraryStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn create(&self, mut record: ItineraryRecord) -> Result<ItineraryRecord, StoreError> {
        let id = ObjectId::new();
        record.id = Some(id);
        self.records.write().await.insert(id, record.clone());
        Ok(record)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<ItineraryRecord>, StoreError> {
        let Ok(id) = ObjectId::parse_str(id) else {
            return Ok(None);
        };
        Ok(self.records.read().await.get(&id).cloned())
    }

    async fn find_by_share_token(&self, token: &str) -> Result<Option<ItineraryRecord>, StoreError> {
        Ok(self
            .records
            .read()
            .await
            .values()
            .find(|record| record.share_token.as_deref() == Some(token))
            .cloned())
    }

    async fn list_for_owner(&self, owner_id: &str) -> Result<Vec<ItineraryRecord>, StoreError> {
        let mut records: Vec<ItineraryRecord> = self
            .records
            .read()
            .await
            .values()
            .filter(|record| record.owner_id == owner_id)
            .cloned()
            .collect();
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(records)
    }

    async fn replace_plan(
        &self,
        id: &str,
        plan: &ItineraryPlan,
        source: PlanSource,
        feedback: &str,
    ) -> Result<Option<ItineraryRecord>, StoreError> {
        Ok(self
            .update(id, |record| {
                record.plan = plan.clone();
                record.source = source;
                record.feedback = Some(feedback.to_string());
            })
            .await)
    }

    async fn set_share_token_if_absent(
        &self,
        id: &str,
        token: &str,
    ) -> Result<Option<ItineraryRecord>, StoreError> {
        let Ok(id) = ObjectId::parse_str(id) else {
            return Ok(None);
        };
        let mut records = self.records.write().await;
        let Some(record) = records.get_mut(&id) else {
            return Ok(None);
        };
        if record.share_token.is_none() {
            record.share_token = Some(token.to_string());
            record.updated_at = Utc::now();
        }
        Ok(Some(record.clone()))
    }

    async fn delete(&self, id: &str) -> Result<bool, StoreError> {
        let Ok(id) = ObjectId::parse_str(id) else {
            return Ok(false);
        };
        Ok(self.records.write().await.remove(&id).is_some())
    }
}
