use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use crate::domain::entities::{SessionDocument, SessionRecord};

const V1_FIELDS: &[&str] = &["ssid", "building", "floor", "date", "startTime", "endTime"];

const V2_FIELDS: &[&str] = &[
    "ssid",
    "building",
    "floor",
    "course",
    "date",
    "startTime",
    "endTime",
    "focusLevel",
    "groupSize",
    "notes",
];

// Field set accepted by one deployment. Exactly one version is served at a time
// so the stored documents never mix shapes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaVersion {
    // Location and time only.
    #[serde(alias = "compact")]
    V1,
    // Adds course, focus level, group size and notes.
    #[default]
    #[serde(alias = "full")]
    V2,
}

impl SchemaVersion {
    // Document keys stored for this version.
    pub fn fields(self) -> &'static [&'static str] {
        match self {
            SchemaVersion::V1 => V1_FIELDS,
            SchemaVersion::V2 => V2_FIELDS,
        }
    }

    pub fn default_port(self) -> u16 {
        match self {
            SchemaVersion::V1 => 3000,
            SchemaVersion::V2 => 5001,
        }
    }

    // Build the document to persist: exactly this version's keys, null when
    // the record leaves a field empty.
    pub fn project(self, record: &SessionRecord) -> SessionDocument {
        let mut all = record.to_document();
        self.fields()
            .iter()
            .map(|key| {
                let value = all.remove(*key).unwrap_or(Value::Null);
                (key.to_string(), value)
            })
            .collect()
    }
}

impl fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaVersion::V1 => write!(f, "v1"),
            SchemaVersion::V2 => write!(f, "v2"),
        }
    }
}

impl FromStr for SchemaVersion {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "v1" | "compact" => Ok(SchemaVersion::V1),
            "v2" | "full" => Ok(SchemaVersion::V2),
            other => Err(format!("unknown schema version `{other}`")),
        }
    }
}
