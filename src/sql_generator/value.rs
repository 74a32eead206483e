//! SQL values and row input.
//!
//! Rows are deserialized from JSON (the CLI's input format) with property
//! names as keys; [`SqlValue`] is untagged so plain JSON scalars map
//! directly.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A scalar SQL value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum SqlValue {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
}

impl SqlValue {
    /// Render the value as an inline SQL literal. Text is single-quoted
    /// with embedded quotes doubled.
    pub fn to_sql_literal(&self) -> String {
        match self {
            SqlValue::Null => "NULL".to_string(),
            SqlValue::Bool(b) => if *b { "TRUE" } else { "FALSE" }.to_string(),
            SqlValue::Integer(i) => i.to_string(),
            // NaN and infinities have no SQL literal form
            SqlValue::Float(f) if !f.is_finite() => "NULL".to_string(),
            SqlValue::Float(f) => f.to_string(),
            SqlValue::Text(s) => format!("'{}'", s.replace('\'', "''")),
        }
    }
}

impl fmt::Display for SqlValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_sql_literal())
    }
}

impl From<&str> for SqlValue {
    fn from(s: &str) -> Self {
        SqlValue::Text(s.to_string())
    }
}

impl From<String> for SqlValue {
    fn from(s: String) -> Self {
        SqlValue::Text(s)
    }
}

impl From<i64> for SqlValue {
    fn from(i: i64) -> Self {
        SqlValue::Integer(i)
    }
}

impl From<i32> for SqlValue {
    fn from(i: i32) -> Self {
        SqlValue::Integer(i64::from(i))
    }
}

impl From<f64> for SqlValue {
    fn from(f: f64) -> Self {
        SqlValue::Float(f)
    }
}

impl From<bool> for SqlValue {
    fn from(b: bool) -> Self {
        SqlValue::Bool(b)
    }
}

/// One input row for bulk INSERT/UPDATE.
///
/// `entity` selects the concrete hierarchy member for single-table
/// inheritance batches mixing subtypes; when absent, the entity the mapping
/// was extracted for is assumed. Values are keyed by property name, BTreeMap
/// for deterministic iteration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Row {
    /// Concrete entity type of this row (STI batches only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity: Option<String>,
    /// Property name → value
    #[serde(default)]
    pub values: BTreeMap<String, SqlValue>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Row typed as a concrete hierarchy member.
    pub fn of_entity(entity: impl Into<String>) -> Self {
        Row {
            entity: Some(entity.into()),
            values: BTreeMap::new(),
        }
    }

    /// Set a property value (builder-style).
    pub fn set(mut self, property: impl Into<String>, value: impl Into<SqlValue>) -> Self {
        self.values.insert(property.into(), value.into());
        self
    }
}
