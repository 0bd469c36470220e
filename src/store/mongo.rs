//! MongoDB-backed store.
//!
//! One `Client` (and its connection pool) lives for the whole process; it
//! is established and pinged once at startup and never torn down from
//! request handling.

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId};
use mongodb::options::ReturnDocument;
use mongodb::{Client, Collection};
use tracing::info;

use crate::config::Config;
use crate::error::Error;
use crate::fruit::{Fruit, FruitInput};
use crate::store::FruitStore;

const COLLECTION: &str = "fruits";

/// The production store: a typed handle onto the `fruits` collection.
pub struct MongoStore {
    fruits: Collection<Fruit>,
}

impl MongoStore {
    /// Connects to the store and verifies it is reachable with a ping.
    ///
    /// The driver connects lazily, so without the ping a dead store would
    /// only surface on the first request; the caller treats any error here
    /// as fatal.
    pub async fn connect(config: &Config) -> Result<Self, mongodb::error::Error> {
        let client = Client::with_uri_str(&config.mongo_uri).await?;
        let db = client.database(&config.mongo_db);
        db.run_command(doc! { "ping": 1 }).await?;
        info!(db = %config.mongo_db, "connected to mongo store");
        Ok(Self { fruits: db.collection(COLLECTION) })
    }

    /// Ids are assigned here rather than read back from the insert result,
    /// which keeps one code path for single and batch creation.
    fn assign_id(input: FruitInput) -> Fruit {
        Fruit {
            id: ObjectId::new(),
            name: input.name,
            color: input.color,
            ready_to_eat: input.ready_to_eat,
        }
    }
}

/// Parses an id string, folding malformed ids into [`Error::NotFound`].
/// A garbage id and a missing record are indistinguishable to callers.
pub(crate) fn parse_id(id: &str) -> Result<ObjectId, Error> {
    ObjectId::parse_str(id).map_err(|_| Error::NotFound(id.to_owned()))
}

#[async_trait]
impl FruitStore for MongoStore {
    async fn create_one(&self, input: FruitInput) -> Result<Fruit, Error> {
        let fruit = Self::assign_id(input);
        self.fruits.insert_one(&fruit).await?;
        Ok(fruit)
    }

    async fn create_many(&self, inputs: Vec<FruitInput>) -> Result<Vec<Fruit>, Error> {
        let fruits: Vec<Fruit> = inputs.into_iter().map(Self::assign_id).collect();
        self.fruits.insert_many(&fruits).await?;
        Ok(fruits)
    }

    async fn find_all(&self) -> Result<Vec<Fruit>, Error> {
        let fruits = self.fruits.find(doc! {}).await?.try_collect().await?;
        Ok(fruits)
    }

    async fn find_by_id(&self, id: &str) -> Result<Fruit, Error> {
        let oid = parse_id(id)?;
        self.fruits
            .find_one(doc! { "_id": oid })
            .await?
            .ok_or_else(|| Error::NotFound(id.to_owned()))
    }

    async fn update_by_id(&self, id: &str, input: FruitInput) -> Result<Fruit, Error> {
        let oid = parse_id(id)?;
        let update = doc! {
            "$set": {
                "name": input.name.as_str(),
                "color": input.color.as_str(),
                "readyToEat": input.ready_to_eat,
            }
        };
        self.fruits
            .find_one_and_update(doc! { "_id": oid }, update)
            .return_document(ReturnDocument::After)
            .await?
            .ok_or_else(|| Error::NotFound(id.to_owned()))
    }

    async fn delete_by_id(&self, id: &str) -> Result<(), Error> {
        let oid = parse_id(id)?;
        let result = self.fruits.delete_one(doc! { "_id": oid }).await?;
        if result.deleted_count == 0 {
            return Err(Error::NotFound(id.to_owned()));
        }
        Ok(())
    }
}
