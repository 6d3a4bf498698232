use async_trait::async_trait;

use crate::errors::StoreError;
use crate::models::itinerary::ItineraryPlan;
use crate::models::record::{ItineraryRecord, PlanSource};

/// Persistence for generated itineraries. Identifiers are hex ObjectIds; an
/// identifier that does not parse is treated as not found.
#[async_trait]
pub trait ItineraryStore: Send + Sync {
    /// Short name of the backing storage, reported by the health check.
    fn backend(&self) -> &'static str;

    async fn ping(&self) -> Result<(), StoreError>;

    /// Insert a record and return it with its assigned id.
    async fn create(&self, record: ItineraryRecord) -> Result<ItineraryRecord, StoreError>;

    async fn find_by_id(&self, id: &str) -> Result<Option<ItineraryRecord>, StoreError>;

    async fn find_by_share_token(&self, token: &str) -> Result<Option<ItineraryRecord>, StoreError>;

    /// All records of one owner, newest first.
    async fn list_for_owner(&self, owner_id: &str) -> Result<Vec<ItineraryRecord>, StoreError>;

    /// Swap in a regenerated plan and return the updated record.
    async fn replace_plan(
        &self,
        id: &str,
        plan: &ItineraryPlan,
        source: PlanSource,
        feedback: &str,
    ) -> Result<Option<ItineraryRecord>, StoreError>;

    /// Store `token` only if the record has no share token yet. Returns the
    /// record as stored, so a token written concurrently by another caller
    /// wins over `token`.
    async fn set_share_token_if_absent(
        &self,
        id: &str,
        token: &str,
    ) -> Result<Option<ItineraryRecord>, StoreError>;

    /// Returns whether a record was removed.
    async fn delete(&self, id: &str) -> Result<bool, StoreError>;
}
