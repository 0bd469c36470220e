//! The record store: one trait, two backends.
//!
//! The route layer is handed an `Arc<dyn FruitStore>` at startup and never
//! learns which backend is behind it. Production runs [`mongo::MongoStore`];
//! the test suite runs [`memory::MemoryStore`] with the same semantics.

use async_trait::async_trait;

use crate::error::Error;
use crate::fruit::{Fruit, FruitInput};

pub mod memory;
pub mod mongo;

pub use memory::MemoryStore;
pub use mongo::MongoStore;

/// Create/read/update/delete operations over the fruits collection.
///
/// Every method issues exactly one round trip to the backing store — no
/// retries, no caching. Ids are opaque strings; a string that is not a
/// well-formed id fails the same way as a missing record ([`Error::NotFound`]).
#[async_trait]
pub trait FruitStore: Send + Sync {
    /// Inserts one record and returns it with its assigned id.
    async fn create_one(&self, input: FruitInput) -> Result<Fruit, Error>;

    /// Inserts all given records. Failure is reported for the batch as a
    /// whole; there is no partial-success reporting back to the caller.
    async fn create_many(&self, inputs: Vec<FruitInput>) -> Result<Vec<Fruit>, Error>;

    /// Returns every record in store-default order. Both backends happen to
    /// preserve insertion order, but callers must not rely on it.
    async fn find_all(&self) -> Result<Vec<Fruit>, Error>;

    /// Fetches one record by id.
    async fn find_by_id(&self, id: &str) -> Result<Fruit, Error>;

    /// Overwrites the three data fields of the record and returns the
    /// post-update state.
    async fn update_by_id(&self, id: &str, input: FruitInput) -> Result<Fruit, Error>;

    /// Permanently removes the record. No soft-delete, no audit trail.
    async fn delete_by_id(&self, id: &str) -> Result<(), Error>;
}
