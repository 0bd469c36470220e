//! The fruit record schema and form-input coercion.

use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// A persisted fruit record.
///
/// `id` is assigned by the store on creation, is immutable, and is the sole
/// lookup key. The wire/document field names match the original collection
/// (`_id`, `readyToEat`).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Fruit {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
    pub color: String,
    #[serde(rename = "readyToEat")]
    pub ready_to_eat: bool,
}

/// The three data fields of a fruit, as submitted for create and update.
///
/// All three are always present once a form has been through
/// [`FruitInput::from_form`]; there are no partial records.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FruitInput {
    pub name: String,
    pub color: String,
    #[serde(rename = "readyToEat")]
    pub ready_to_eat: bool,
}

/// The raw shape of a submitted fruit form, before coercion.
///
/// `readyToEat` is a checkbox: browsers omit the field entirely when it is
/// unchecked and send the literal `"on"` when checked.
#[derive(Debug, Deserialize)]
struct FruitForm {
    name: String,
    color: String,
    #[serde(rename = "readyToEat")]
    ready_to_eat: Option<String>,
}

impl FruitInput {
    /// Parses a urlencoded form body and normalizes the checkbox field
    /// into a real boolean before anything reaches the store.
    pub fn from_form(body: &[u8]) -> Result<Self, Error> {
        let form: FruitForm = serde_urlencoded::from_bytes(body)
            .map_err(|e| Error::Validation(e.to_string()))?;
        Ok(Self {
            name: form.name,
            color: form.color,
            ready_to_eat: checkbox(form.ready_to_eat.as_deref()),
        })
    }
}

/// The checkbox coercion rule: `Some("on")` → `true`, anything else → `false`.
pub fn checkbox(value: Option<&str>) -> bool {
    value == Some("on")
}
