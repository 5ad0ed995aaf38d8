//! Domain DTOs for the books API.
//!
//! # Design
//! These types mirror the mock-server's schema but are defined independently.
//! The remote resource is opaque: `id`, `year` and `rating` may come back as
//! JSON numbers or strings depending on the backend, so they are kept as
//! `FieldValue` and rendered as plain text. Integration tests catch any schema
//! drift between the two crates.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// A scalar as returned by the remote resource.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum FieldValue {
    Number(serde_json::Number),
    Text(String),
    Null,
}

impl Default for FieldValue {
    fn default() -> Self {
        FieldValue::Text(String::new())
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Number(n) => write!(f, "{n}"),
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::Null => Ok(()),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<u64> for FieldValue {
    fn from(value: u64) -> Self {
        FieldValue::Number(value.into())
    }
}

/// A single book record returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Book {
    pub id: FieldValue,
    #[serde(default, deserialize_with = "nullable_string")]
    pub title: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub author: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub genre: String,
    #[serde(default)]
    pub year: FieldValue,
    #[serde(default)]
    pub rating: FieldValue,
}

/// Request payload for creating or replacing a book. Every field is sent
/// verbatim, empty strings included; `id` is never part of the body.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct BookInput {
    pub title: String,
    pub author: String,
    pub genre: String,
    pub year: String,
    pub rating: String,
}

fn nullable_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}
