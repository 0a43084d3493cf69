// ABOUTME: Mock document-database client: collections, document refs, and equality/sort queries.
// ABOUTME: All state lives in memory; every mutation rewrites the whole collection entry in storage.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use supermall_core::Collection;
use thiserror::Error;
use tokio::sync::RwLock;
use ulid::Ulid;

use crate::latency::Latency;
use crate::local::{LocalStorage, LocalStorageError};
use crate::logger::Logger;

/// Errors surfaced by document-store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage error: {0}")]
    Storage(#[from] LocalStorageError),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("document not found in {collection}: {id}")]
    NotFound { collection: Collection, id: String },

    #[error("document payload must be a JSON object")]
    NotAnObject,
}

/// Sort direction for a single-field ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

/// The mock document store. Loads every collection from storage at open and
/// keeps them as in-memory arrays; each mutating operation serializes the
/// entire affected collection back. No partial writes, no transactions.
///
/// Clones share the same in-memory collections, like handles to one client.
#[derive(Clone)]
pub struct MockDb {
    storage: LocalStorage,
    collections: Arc<RwLock<HashMap<Collection, Vec<Value>>>>,
    latency: Latency,
    logger: Logger,
}

impl MockDb {
    /// Open the store over a storage area, reading all collection entries.
    /// A missing entry starts the collection empty; an unparseable one is an
    /// error rather than silent data loss.
    pub fn open(
        storage: LocalStorage,
        latency: Latency,
        logger: Logger,
    ) -> Result<Self, StoreError> {
        let mut collections = HashMap::new();
        for which in Collection::ALL {
            let docs = match storage.get_item(&which.storage_key()) {
                Some(raw) => serde_json::from_str(&raw)?,
                None => Vec::new(),
            };
            collections.insert(which, docs);
        }

        Ok(Self {
            storage,
            collections: Arc::new(RwLock::new(collections)),
            latency,
            logger,
        })
    }

    /// A handle to one named collection.
    pub fn collection(&self, which: Collection) -> CollectionRef {
        CollectionRef {
            db: self.clone(),
            which,
        }
    }

    fn persist(&self, which: Collection, docs: &[Value]) -> Result<(), StoreError> {
        let serialized = serde_json::to_string(docs)?;
        self.storage.set_item(&which.storage_key(), &serialized)?;
        Ok(())
    }
}

/// A reference to a named collection: add documents, open document refs,
/// or start a query chain.
#[derive(Clone)]
pub struct CollectionRef {
    db: MockDb,
    which: Collection,
}

impl CollectionRef {
    /// Add a document. A fresh id is generated and `createdAt` is stamped at
    /// write time; both overwrite any same-named fields in the payload.
    /// Resolves with the new document id after the write delay.
    pub async fn add(&self, data: Value) -> Result<String, StoreError> {
        let Value::Object(fields) = data else {
            return Err(StoreError::NotAnObject);
        };

        self.db.latency.write_delay().await;

        let id = format!("doc_{}", Ulid::new().to_string().to_lowercase());
        let mut doc = fields;
        doc.insert("id".to_string(), Value::String(id.clone()));
        doc.insert("createdAt".to_string(), serde_json::to_value(Utc::now())?);
        let doc = Value::Object(doc);

        let mut collections = self.db.collections.write().await;
        let docs = collections.entry(self.which).or_default();
        docs.push(doc.clone());
        self.db.persist(self.which, docs)?;
        drop(collections);

        self.db
            .logger
            .info(&format!("document added to {}", self.which), doc);
        Ok(id)
    }

    /// A reference to a single document by id. The document need not exist.
    pub fn doc(&self, id: &str) -> DocumentRef {
        DocumentRef {
            db: self.db.clone(),
            which: self.which,
            id: id.to_string(),
        }
    }

    /// Start an empty query over this collection.
    pub fn query(&self) -> Query {
        Query {
            db: self.db.clone(),
            which: self.which,
            filters: Vec::new(),
            order: None,
        }
    }

    /// Shorthand for `query().where_eq(..)`.
    pub fn where_eq(&self, field: &str, value: impl Into<Value>) -> Query {
        self.query().where_eq(field, value)
    }

    /// Shorthand for `query().order_by(..)`.
    pub fn order_by(&self, field: &str, direction: Direction) -> Query {
        self.query().order_by(field, direction)
    }
}

/// An equality-filter plus single-field-sort query over one collection.
/// Filters accumulate and are evaluated as a logical AND; only the most
/// recent `order_by` applies.
#[derive(Clone)]
pub struct Query {
    db: MockDb,
    which: Collection,
    filters: Vec<(String, Value)>,
    order: Option<(String, Direction)>,
}

impl Query {
    /// Add an exact-match filter on one field. No ranges, no contains.
    pub fn where_eq(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.filters.push((field.to_string(), value.into()));
        self
    }

    /// Sort the results on one field. A second call replaces the first.
    pub fn order_by(mut self, field: &str, direction: Direction) -> Self {
        self.order = Some((field.to_string(), direction));
        self
    }

    /// Evaluate the query after the read delay. The scan is a plain filter
    /// over the in-memory array; there is no index.
    pub async fn get(&self) -> Result<Vec<DocSnapshot>, StoreError> {
        self.db.latency.read_delay().await;

        let collections = self.db.collections.read().await;
        let docs = collections.get(&self.which).cloned().unwrap_or_default();
        drop(collections);

        let mut result: Vec<Value> = docs
            .into_iter()
            .filter(|doc| {
                self.filters
                    .iter()
                    .all(|(field, value)| field_of(doc, field) == value)
            })
            .collect();

        if let Some((field, direction)) = &self.order {
            // Vec::sort_by is stable, so equal keys keep insertion order.
            result.sort_by(|a, b| {
                let ordering = cmp_json(field_of(a, field), field_of(b, field));
                match direction {
                    Direction::Asc => ordering,
                    Direction::Desc => ordering.reverse(),
                }
            });
        }

        self.db.logger.info(
            &format!("query executed on {}", self.which),
            serde_json::json!({
                "results": result.len(),
                "filters": self.filters,
            }),
        );

        Ok(result.into_iter().map(DocSnapshot::from_doc).collect())
    }
}

/// A reference to one document within a collection.
#[derive(Clone)]
pub struct DocumentRef {
    db: MockDb,
    which: Collection,
    id: String,
}

impl DocumentRef {
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Fetch the document. A missing document resolves with an
    /// `exists == false` snapshot rather than an error.
    pub async fn get(&self) -> Result<DocSnapshot, StoreError> {
        self.db.latency.read_delay().await;

        let collections = self.db.collections.read().await;
        let found = collections
            .get(&self.which)
            .and_then(|docs| docs.iter().find(|d| field_of(d, "id") == &self.id).cloned());

        Ok(match found {
            Some(doc) => DocSnapshot::from_doc(doc),
            None => DocSnapshot {
                id: self.id.clone(),
                exists: false,
                data: None,
            },
        })
    }

    /// Upsert: shallow-merge the fields into the existing document, or
    /// insert a new document with this id if none exists.
    pub async fn set(&self, data: Value) -> Result<(), StoreError> {
        let Value::Object(fields) = data else {
            return Err(StoreError::NotAnObject);
        };

        self.db.latency.write_delay().await;

        let mut collections = self.db.collections.write().await;
        let docs = collections.entry(self.which).or_default();
        match docs.iter_mut().find(|d| field_of(d, "id") == &self.id) {
            Some(existing) => merge_fields(existing, &fields),
            None => {
                let mut doc = Map::new();
                doc.insert("id".to_string(), Value::String(self.id.clone()));
                for (key, value) in &fields {
                    doc.insert(key.clone(), value.clone());
                }
                docs.push(Value::Object(doc));
            }
        }
        self.db.persist(self.which, docs)?;
        drop(collections);

        self.db.logger.info(
            &format!("document set in {}", self.which),
            serde_json::json!({ "id": self.id, "data": Value::Object(fields) }),
        );
        Ok(())
    }

    /// Shallow-merge the fields into an existing document. Updating a
    /// document that does not exist is a NotFound error; the system this
    /// mocks silently did nothing in that case, which callers could never
    /// observe.
    pub async fn update(&self, data: Value) -> Result<(), StoreError> {
        let Value::Object(fields) = data else {
            return Err(StoreError::NotAnObject);
        };

        self.db.latency.write_delay().await;

        let mut collections = self.db.collections.write().await;
        let docs = collections.entry(self.which).or_default();
        let Some(existing) = docs.iter_mut().find(|d| field_of(d, "id") == &self.id) else {
            return Err(StoreError::NotFound {
                collection: self.which,
                id: self.id.clone(),
            });
        };
        merge_fields(existing, &fields);
        self.db.persist(self.which, docs)?;
        drop(collections);

        self.db.logger.info(
            &format!("document updated in {}", self.which),
            serde_json::json!({ "id": self.id, "data": Value::Object(fields) }),
        );
        Ok(())
    }
}

/// A read-only view of a fetched document. `exists` is false for documents
/// that were not found; `data()` is None in that case.
#[derive(Debug, Clone)]
pub struct DocSnapshot {
    pub id: String,
    pub exists: bool,
    data: Option<Value>,
}

impl DocSnapshot {
    fn from_doc(doc: Value) -> Self {
        let id = field_of(&doc, "id")
            .as_str()
            .unwrap_or_default()
            .to_string();
        Self {
            id,
            exists: true,
            data: Some(doc),
        }
    }

    pub fn data(&self) -> Option<&Value> {
        self.data.as_ref()
    }

    pub fn into_data(self) -> Option<Value> {
        self.data
    }

    /// Deserialize the document into a typed view.
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<Option<T>, StoreError> {
        match &self.data {
            Some(doc) => Ok(Some(serde_json::from_value(doc.clone())?)),
            None => Ok(None),
        }
    }
}

static NULL: Value = Value::Null;

fn field_of<'a>(doc: &'a Value, field: &str) -> &'a Value {
    doc.get(field).unwrap_or(&NULL)
}

fn merge_fields(existing: &mut Value, fields: &Map<String, Value>) {
    if let Value::Object(doc) = existing {
        for (key, value) in fields {
            doc.insert(key.clone(), value.clone());
        }
    }
}

/// Total order over JSON values for single-field sorts. Values of different
/// kinds order by kind; numbers compare numerically, strings
/// lexicographically. Arrays and objects fall back to their serialized form.
fn cmp_json(a: &Value, b: &Value) -> Ordering {
    fn rank(v: &Value) -> u8 {
        match v {
            Value::Null => 0,
            Value::Bool(_) => 1,
            Value::Number(_) => 2,
            Value::String(_) => 3,
            Value::Array(_) => 4,
            Value::Object(_) => 5,
        }
    }

    match (a, b) {
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::Number(x), Value::Number(y)) => {
            let x = x.as_f64().unwrap_or(f64::NAN);
            let y = y.as_f64().unwrap_or(f64::NAN);
            x.total_cmp(&y)
        }
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::Array(_) | Value::Object(_), Value::Array(_) | Value::Object(_))
            if rank(a) == rank(b) =>
        {
            a.to_string().cmp(&b.to_string())
        }
        _ => rank(a).cmp(&rank(b)),
    }
}
