//! Record - One Search Result Row
//!
//! Rows arrive as JSON objects with deployment-specific fields. A `Record`
//! keeps the full field map behind typed accessors and is validated once at
//! the fetch boundary: non-object rows and rows missing a required field are
//! rejected outright so garbled responses never reach the cache.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{MalformedSnafu, Result};
use snafu::ensure;

/// One search result row
///
/// Identity is the positional index assigned by the remote ordering, stable
/// only within a single sort/search generation; records carry no id of their
/// own.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: Map<String, Value>,
}

impl Record {
    /// Validate a raw JSON value into a record.
    ///
    /// Fails closed: a non-object value or a missing required field flags the
    /// whole response as malformed instead of surfacing `null` cells later.
    pub fn from_value(value: Value, required_fields: &[String]) -> Result<Self> {
        let Value::Object(fields) = value else {
            return MalformedSnafu {
                message: format!("result row is not a JSON object: {value}"),
            }
            .fail();
        };

        for field in required_fields {
            ensure!(
                fields.contains_key(field),
                MalformedSnafu {
                    message: format!("result row missing required field '{field}'"),
                }
            );
        }

        Ok(Self { fields })
    }

    /// Raw field lookup
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// String field lookup
    pub fn get_str(&self, field: &str) -> Option<&str> {
        self.fields.get(field).and_then(Value::as_str)
    }

    /// Integer field lookup
    pub fn get_i64(&self, field: &str) -> Option<i64> {
        self.fields.get(field).and_then(Value::as_i64)
    }

    /// All fields, in response order
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }
}
