use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};
use std::collections::BTreeMap;
use uuid::Uuid;

/// A single schemaless record. Field order is preserved.
pub type Record = Map<String, JsonValue>;

/// Field every record carries, assigned by the server on create.
pub const ID_FIELD: &str = "id";

/// The whole persisted state: collection name to its records.
///
/// This is exactly the shape of the data file, a JSON object whose values are
/// arrays of objects. It is loaded in full for every request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document {
    collections: BTreeMap<String, Vec<Record>>,
}

fn has_id(record: &Record, id: &str) -> bool {
    record.get(ID_FIELD).and_then(JsonValue::as_str) == Some(id)
}

impl Document {
    /// Records of `collection`, empty when the collection was never written.
    pub fn list(&self, collection: &str) -> &[Record] {
        self.collections
            .get(collection)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn get(&self, collection: &str, id: &str) -> Option<&Record> {
        self.list(collection).iter().find(|record| has_id(record, id))
    }

    /// Append a new record built from `body` under a fresh UUID v4.
    ///
    /// The generated id is always the first field and replaces any `id` the
    /// body carried. The collection is created if absent.
    pub fn create(&mut self, collection: &str, body: Record) -> Record {
        let id = Uuid::new_v4().to_string();

        let mut record = Record::new();
        record.insert(ID_FIELD.to_string(), JsonValue::String(id));
        record.extend(body.into_iter().filter(|(field, _)| field != ID_FIELD));

        self.collections
            .entry(collection.to_string())
            .or_default()
            .push(record.clone());
        record
    }

    /// Shallow-merge `body` over the record with `id`, keeping `id` itself.
    ///
    /// Returns `None` when the collection or the record does not exist.
    pub fn replace(&mut self, collection: &str, id: &str, body: Record) -> Option<Record> {
        let record = self
            .collections
            .get_mut(collection)?
            .iter_mut()
            .find(|record| has_id(record, id))?;

        record.extend(body);
        record.insert(ID_FIELD.to_string(), JsonValue::String(id.to_string()));
        Some(record.clone())
    }

    /// Remove every record with `id`. Returns whether anything was removed.
    ///
    /// An emptied collection stays in the document as an empty array.
    pub fn delete(&mut self, collection: &str, id: &str) -> bool {
        let Some(records) = self.collections.get_mut(collection) else {
            return false;
        };

        let before = records.len();
        records.retain(|record| !has_id(record, id));
        records.len() != before
    }
}
