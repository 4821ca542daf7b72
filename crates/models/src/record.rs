//! The create/list contract shared by every record kind.

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};

use crate::errors::{ModelError, ValidationError};

/// Persisted form of one record.
pub type Document = Map<String, Value>;

/// A submission schema plus the record it materialises into.
///
/// Implementations read only their declared fields from the payload, so
/// caller-supplied `id`/timestamp values and unknown keys are ignored.
pub trait Record: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Validated caller input, without server-assigned fields.
    type Input: Send;

    /// Short name used in logs.
    const KIND: &'static str;
    const COLLECTION: &'static str;

    fn validate(payload: &Value) -> Result<Self::Input, ValidationError>;

    fn materialize(input: Self::Input, id: String, created: DateTime<Utc>) -> Self;

    fn id(&self) -> &str;

    fn to_document(&self) -> Result<Document, ModelError> {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(other) => Err(ModelError::Document(format!("{} serialized to non-object {other}", Self::KIND))),
            Err(e) => Err(ModelError::Document(e.to_string())),
        }
    }

    /// Rehydrates a stored document; string timestamps become `DateTime<Utc>`.
    fn from_document(doc: Document) -> Result<Self, ModelError> {
        serde_json::from_value(Value::Object(doc))
            .map_err(|e| ModelError::Document(format!("{} document: {e}", Self::COLLECTION)))
    }
}
