//! Stored documents
//!
//! Bookings, projects and resources are kept as opaque JSON objects. The
//! only field the API relies on is the string `id`, which is also the
//! partition key of every container.

use super::errors::SummitError;
use super::result::Result;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;
use uuid::Uuid;

/// A JSON document identified by `id`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Document {
    /// Document id, also used as partition key
    pub id: String,

    /// Remaining document fields
    #[serde(flatten)]
    #[schema(value_type = Object)]
    pub fields: Map<String, Value>,
}

impl Document {
    /// Build a document from an arbitrary JSON value
    ///
    /// A missing `id` is filled with a fresh UUID. A present `id` must be a
    /// non-empty string.
    pub fn from_value(value: Value) -> Result<Self> {
        let Value::Object(mut fields) = value else {
            return Err(SummitError::Validation(
                "document must be a JSON object".to_string(),
            ));
        };

        let id = match fields.remove("id") {
            None | Some(Value::Null) => Uuid::new_v4().to_string(),
            Some(Value::String(id)) if !id.trim().is_empty() => id,
            Some(Value::String(_)) => {
                return Err(SummitError::Validation(
                    "document id cannot be empty".to_string(),
                ))
            }
            Some(other) => {
                return Err(SummitError::Validation(format!(
                    "document id must be a string, got {other}"
                )))
            }
        };

        Ok(Self { id, fields })
    }

    /// Convert back into a JSON object including `id`
    pub fn into_value(self) -> Value {
        let mut fields = self.fields;
        fields.insert("id".to_string(), Value::String(self.id));
        Value::Object(fields)
    }
}
