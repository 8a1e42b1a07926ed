// Copyright (c) 2025 - Cowboy AI, Inc.
//! IPAM Input Records
//!
//! Address and location records as returned by phpIPAM. The API is loose about
//! types: identifiers arrive as strings or numbers, and optional fields as
//! `null`, missing, or `""`. Records normalize those shapes on deserialization
//! so the builder only ever sees `String` identifiers and `Option<String>`
//! fields that are `Some` only when they carry a value.

use serde::{Deserialize, Serialize};

/// A single IP address record from the IPAM
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressRecord {
    /// Address identifier, used to query online state
    #[serde(default, deserialize_with = "wire::id")]
    pub id: String,

    #[serde(default, deserialize_with = "wire::id")]
    pub hostname: String,

    #[serde(default, deserialize_with = "wire::id")]
    pub ip: String,

    /// Criticality class, used as a top-level group name
    #[serde(default, deserialize_with = "wire::id")]
    pub custom_criticality: String,

    #[serde(default, deserialize_with = "wire::optional")]
    pub custom_group: Option<String>,

    /// Location identifier; `None` and `"0"` both mean "no location"
    #[serde(default, deserialize_with = "wire::optional")]
    pub location: Option<String>,

    #[serde(default, deserialize_with = "wire::optional")]
    pub custom_parent: Option<String>,

    #[serde(default, deserialize_with = "wire::optional")]
    pub custom_cname: Option<String>,

    #[serde(default, deserialize_with = "wire::optional")]
    pub custom_service: Option<String>,

    /// IPAM tag id; one value is reserved for maintenance mode
    #[serde(default, deserialize_with = "wire::id")]
    pub tag: String,
}

impl AddressRecord {
    /// Custom group name, if the record carries a non-empty one
    pub fn group_base(&self) -> Option<&str> {
        self.custom_group.as_deref().filter(|g| !g.is_empty())
    }

    /// Location reference, if present and not numerically zero
    ///
    /// Every other value refers to a location record, including values that
    /// are not integers; those fail to resolve when the graph is built.
    pub fn location_ref(&self) -> Option<&str> {
        self.location
            .as_deref()
            .map(str::trim)
            .filter(|l| !l.is_empty() && l.parse::<i64>().ok() != Some(0))
    }

    /// Integer form of [`location_ref`](Self::location_ref)
    pub fn location_id(&self) -> Option<i64> {
        self.location_ref().and_then(|l| l.parse().ok())
    }

    /// Whether this record contributes hosts and composite groups
    pub fn participates(&self) -> bool {
        self.group_base().is_some() && self.location_ref().is_some()
    }

    /// Whether the record is tagged with the maintenance sentinel
    pub fn is_in_maintenance(&self, maintenance_tag: &str) -> bool {
        self.tag == maintenance_tag
    }

    /// Whether building this record requires an online-state probe
    pub fn needs_online_probe(&self, maintenance_tag: &str) -> bool {
        self.participates() && !self.is_in_maintenance(maintenance_tag)
    }
}

/// A location (site / data center) record from the IPAM
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationRecord {
    #[serde(default, deserialize_with = "wire::id")]
    pub id: String,

    #[serde(default, deserialize_with = "wire::id")]
    pub name: String,
}

impl LocationRecord {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    /// Numeric form of the id, used to match address references
    pub fn numeric_id(&self) -> Option<i64> {
        self.id.trim().parse().ok()
    }
}

mod wire {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    fn scalar_to_string(value: Value) -> String {
        match value {
            Value::Null => String::new(),
            Value::String(s) => s,
            other => other.to_string(),
        }
    }

    /// String or number, `null` becomes the empty string
    pub fn id<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(scalar_to_string(Value::deserialize(deserializer)?))
    }

    /// String or number, `null` and `""` become `None`
    pub fn optional<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = scalar_to_string(Value::deserialize(deserializer)?);
        Ok(if s.is_empty() { None } else { Some(s) })
    }
}
