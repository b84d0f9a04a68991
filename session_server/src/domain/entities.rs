use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

// Document exchanged with the store: a plain JSON object.
pub type SessionDocument = Map<String, Value>;

// Key under which stores keep their own record identifier.
pub const STORE_ID_FIELD: &str = "_id";

// Loosely typed value for fields clients send either as text or as a number.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Number(Number),
    Text(String),
}

// Study session submitted by a client. Every field is optional; keys outside
// this set are ignored when decoding.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    // Client-supplied session identifier, unrelated to the store id.
    pub ssid: Option<String>,
    pub building: Option<String>,
    pub floor: Option<Scalar>,
    pub course: Option<String>,
    pub date: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub focus_level: Option<Scalar>,
    pub group_size: Option<Scalar>,
    pub notes: Option<String>,
}

impl SessionRecord {
    // Decode a record from an already parsed JSON object.
    pub fn from_object(object: SessionDocument) -> Result<Self, serde_json::Error> {
        serde_json::from_value(Value::Object(object))
    }

    // Render the record with every known key present, absent ones as null.
    pub fn to_document(&self) -> SessionDocument {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            _ => SessionDocument::new(),
        }
    }
}
