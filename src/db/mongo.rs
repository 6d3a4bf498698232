use async_trait::async_trait;
use chrono::Utc;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId, to_bson, DateTime},
    options::{ClientOptions, ReturnDocument, ServerApi, ServerApiVersion},
    Client, Collection,
};
use std::time::Duration;

use crate::db::store::ItineraryStore;
use crate::errors::StoreError;
use crate::models::itinerary::ItineraryPlan;
use crate::models::record::{ItineraryRecord, PlanSource};

const COLLECTION: &str = "Itineraries";

pub async fn create_mongo_client(uri: &str) -> Result<Client, StoreError> {
    log::info!("Connecting to MongoDB");

    let mut client_options = ClientOptions::parse(uri).await?;

    client_options.connect_timeout = Some(Duration::from_secs(10));
    client_options.server_selection_timeout = Some(Duration::from_secs(10));
    client_options.max_pool_size = Some(10);
    client_options.min_pool_size = Some(1);

    let server_api = ServerApi::builder().version(ServerApiVersion::V1).build();
    client_options.server_api = Some(server_api);

    let client = Client::with_options(client_options)?;

    // The API can still start if the first ping fails; requests will surface
    // storage errors individually.
    match client.database("admin").run_command(doc! {"ping": 1}).await {
        Ok(_) => log::info!("Connected to MongoDB and verified with ping"),
        Err(e) => log::warn!("Connected to MongoDB but ping failed: {}", e),
    }

    Ok(client)
}

pub struct MongoItineraryStore {
    client: Client,
    database: String,
    collection: Collection<ItineraryRecord>,
}

impl MongoItineraryStore {
    pub fn new(client: Client, database: &str) -> Self {
        let collection = client.database(database).collection(COLLECTION);
        Self {
            client,
            database: database.to_string(),
            collection,
        }
    }
}

fn parse_id(id: &str) -> Option<ObjectId> {
    ObjectId::parse_str(id).ok()
}

#[async_trait]
impl ItineraryStore for MongoItineraryStore {
    fn backend(&self) -> &'static str {
        "mongodb"
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.client
            .database(&self.database)
            .run_command(doc! {"ping": 1})
            .await?;
        Ok(())
    }

    async fn create(&self, mut record: ItineraryRecord) -> Result<ItineraryRecord, StoreError> {
        let result = self.collection.insert_one(&record).await?;
        let id = result
            .inserted_id
            .as_object_id()
            .ok_or_else(|| StoreError::Other("inserted id is not an ObjectId".to_string()))?;
        record.id = Some(id);
        Ok(record)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<ItineraryRecord>, StoreError> {
        let Some(id) = parse_id(id) else {
            return Ok(None);
        };
        Ok(self.collection.find_one(doc! { "_id": id }).await?)
    }

    async fn find_by_share_token(&self, token: &str) -> Result<Option<ItineraryRecord>, StoreError> {
        Ok(self.collection.find_one(doc! { "share_token": token }).await?)
    }

    async fn list_for_owner(&self, owner_id: &str) -> Result<Vec<ItineraryRecord>, StoreError> {
        let cursor = self
            .collection
            .find(doc! { "owner_id": owner_id })
            .sort(doc! { "created_at": -1 })
            .await?;
        Ok(cursor.try_collect().await?)
    }

    async fn replace_plan(
        &self,
        id: &str,
        plan: &ItineraryPlan,
        source: PlanSource,
        feedback: &str,
    ) -> Result<Option<ItineraryRecord>, StoreError> {
        let Some(id) = parse_id(id) else {
            return Ok(None);
        };
        let update = doc! {
            "$set": {
                "plan": to_bson(plan)?,
                "source": to_bson(&source)?,
                "feedback": feedback,
                "updated_at": DateTime::from_chrono(Utc::now()),
            }
        };

        Ok(self
            .collection
            .find_one_and_update(doc! { "_id": id }, update)
            .return_document(ReturnDocument::After)
            .await?)
    }

    async fn set_share_token_if_absent(
        &self,
        id: &str,
        token: &str,
    ) -> Result<Option<ItineraryRecord>, StoreError> {
        let Some(id) = parse_id(id) else {
            return Ok(None);
        };
        let update = doc! {
            "$set": {
                "share_token": token,
                "updated_at": DateTime::from_chrono(Utc::now()),
            }
        };

        let updated = self
            .collection
            .find_one_and_update(doc! { "_id": id, "share_token": null }, update)
            .return_document(ReturnDocument::After)
            .await?;

        match updated {
            Some(record) => Ok(Some(record)),
            // Already shared, or gone.
            None => Ok(self.collection.find_one(doc! { "_id": id }).await?),
        }
    }

    async fn delete(&self, id: &str) -> Result<bool, StoreError> {
        let Some(id) = parse_id(id) else {
            return Ok(false);
        };
        let result = self.collection.delete_one(doc! { "_id": id }).await?;
        Ok(result.deleted_count == 1)
    }
}
