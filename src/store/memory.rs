//! In-process store backend.
//!
//! Mirrors the semantics of the Mongo backend over a mutex-guarded vector:
//! insertion-ordered listing, ObjectId keys, malformed ids folded into
//! `NotFound`. Used by the test suite and for running without a database.

use std::sync::Mutex;

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use crate::error::Error;
use crate::fruit::{Fruit, FruitInput};
use crate::store::FruitStore;
use crate::store::mongo::parse_id;

/// A `FruitStore` holding records in process memory.
#[derive(Default)]
pub struct MemoryStore {
    fruits: Mutex<Vec<Fruit>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn insert(fruits: &mut Vec<Fruit>, input: FruitInput) -> Fruit {
        let fruit = Fruit {
            // ObjectIds embed a timestamp and a random payload, so ids are
            // never reused even after deletion.
            id: ObjectId::new(),
            name: input.name,
            color: input.color,
            ready_to_eat: input.ready_to_eat,
        };
        fruits.push(fruit.clone());
        fruit
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Fruit>> {
        // A poisoned lock only happens if another test thread panicked
        // mid-operation; the data is still a plain Vec, so keep going.
        self.fruits.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl FruitStore for MemoryStore {
    async fn create_one(&self, input: FruitInput) -> Result<Fruit, Error> {
        Ok(Self::insert(&mut self.lock(), input))
    }

    async fn create_many(&self, inputs: Vec<FruitInput>) -> Result<Vec<Fruit>, Error> {
        let mut fruits = self.lock();
        Ok(inputs
            .into_iter()
            .map(|input| Self::insert(&mut fruits, input))
            .collect())
    }

    async fn find_all(&self) -> Result<Vec<Fruit>, Error> {
        Ok(self.lock().clone())
    }

    async fn find_by_id(&self, id: &str) -> Result<Fruit, Error> {
        let oid = parse_id(id)?;
        self.lock()
            .iter()
            .find(|f| f.id == oid)
            .cloned()
            .ok_or_else(|| Error::NotFound(id.to_owned()))
    }

    async fn update_by_id(&self, id: &str, input: FruitInput) -> Result<Fruit, Error> {
        let oid = parse_id(id)?;
        let mut fruits = self.lock();
        let fruit = fruits
            .iter_mut()
            .find(|f| f.id == oid)
            .ok_or_else(|| Error::NotFound(id.to_owned()))?;
        fruit.name = input.name;
        fruit.color = input.color;
        fruit.ready_to_eat = input.ready_to_eat;
        Ok(fruit.clone())
    }

    async fn delete_by_id(&self, id: &str) -> Result<(), Error> {
        let oid = parse_id(id)?;
        let mut fruits = self.lock();
        let len = fruits.len();
        fruits.retain(|f| f.id != oid);
        if fruits.len() == len {
            return Err(Error::NotFound(id.to_owned()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kiwi() -> FruitInput {
        FruitInput {
            name: "kiwi".into(),
            color: "brown".into(),
            ready_to_eat: false,
        }
    }

    #[tokio::test]
    async fn created_records_are_found_with_their_assigned_id() {
        let store = MemoryStore::new();
        let created = store.create_one(kiwi()).await.unwrap();
        let found = store.find_by_id(&created.id.to_hex()).await.unwrap();
        assert_eq!(found, created);
        assert_eq!(found.name, "kiwi");
        assert_eq!(found.color, "brown");
        assert!(!found.ready_to_eat);
    }

    #[tokio::test]
    async fn deleted_records_are_gone() {
        let store = MemoryStore::new();
        let created = store.create_one(kiwi()).await.unwrap();
        let id = created.id.to_hex();
        store.delete_by_id(&id).await.unwrap();
        assert!(matches!(
            store.find_by_id(&id).await,
            Err(Error::NotFound(_))
        ));
        // Deleting again is also NotFound.
        assert!(matches!(
            store.delete_by_id(&id).await,
            Err(Error::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn update_overwrites_all_three_fields_and_is_idempotent() {
        let store = MemoryStore::new();
        let created = store.create_one(kiwi()).await.unwrap();
        let id = created.id.to_hex();
        let replacement = FruitInput {
            name: "X".into(),
            color: "Y".into(),
            ready_to_eat: true,
        };

        let first = store.update_by_id(&id, replacement.clone()).await.unwrap();
        let second = store.update_by_id(&id, replacement).await.unwrap();
        assert_eq!(first, second);

        let found = store.find_by_id(&id).await.unwrap();
        assert_eq!(found.name, "X");
        assert_eq!(found.color, "Y");
        assert!(found.ready_to_eat);
        assert_eq!(found.id, created.id);
    }

    #[tokio::test]
    async fn find_all_preserves_insertion_order() {
        let store = MemoryStore::new();
        for name in ["a", "b", "c"] {
            store
                .create_one(FruitInput {
                    name: name.into(),
                    color: "green".into(),
                    ready_to_eat: false,
                })
                .await
                .unwrap();
        }
        let names: Vec<_> = store
            .find_all()
            .await
            .unwrap()
            .into_iter()
            .map(|f| f.name)
            .collect();
        assert_eq!(names, ["a", "b", "c"]);
    }

    #[tokio::test]
    async fn malformed_id_is_not_found_on_every_operation() {
        let store = MemoryStore::new();
        assert!(matches!(
            store.find_by_id("seed").await,
            Err(Error::NotFound(_))
        ));
        assert!(matches!(
            store.update_by_id("seed", kiwi()).await,
            Err(Error::NotFound(_))
        ));
        assert!(matches!(
            store.delete_by_id("seed").await,
            Err(Error::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn batch_create_returns_records_with_distinct_ids() {
        let store = MemoryStore::new();
        let created = store
            .create_many(vec![kiwi(), kiwi(), kiwi()])
            .await
            .unwrap();
        assert_eq!(created.len(), 3);
        assert_ne!(created[0].id, created[1].id);
        assert_ne!(created[1].id, created[2].id);
        assert_eq!(store.find_all().await.unwrap().len(), 3);
    }
}
