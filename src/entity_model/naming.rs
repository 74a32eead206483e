//! Identifier validation and naming conventions.
//!
//! Table and column names not given explicitly in a manifest are derived
//! from entity/property names through the configured convention.

use convert_case::{Case, Casing};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::errors::EntityModelError;

lazy_static! {
    /// Anchored identifier pattern shared by builder and manifest loader.
    static ref IDENTIFIER_RE: Regex = Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap();
}

/// Check a table/column/entity identifier against the allowed pattern.
pub fn validate_identifier(name: &str) -> Result<(), EntityModelError> {
    if IDENTIFIER_RE.is_match(name) {
        Ok(())
    } else {
        Err(EntityModelError::InvalidIdentifier {
            name: name.to_string(),
        })
    }
}

/// Naming convention for derived table/column names.
///
/// - `preserve` (default): use the entity/property name as-is
/// - `snake_case`: convert, e.g. `FirstName` → `first_name`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NamingConvention {
    #[default]
    Preserve,
    SnakeCase,
}

impl NamingConvention {
    /// Derive a physical name from a model-level name.
    pub fn apply(&self, name: &str) -> String {
        match self {
            NamingConvention::Preserve => name.to_string(),
            NamingConvention::SnakeCase => name.to_case(Case::Snake),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_identifier() {
        assert!(validate_identifier("user_id").is_ok());
        assert!(validate_identifier("_private").is_ok());
        assert!(validate_identifier("Person2").is_ok());
        assert!(validate_identifier("").is_err());
        assert!(validate_identifier("2fast").is_err());
        assert!(validate_identifier("first name").is_err());
        assert!(validate_identifier("drop;--").is_err());
    }

    #[test]
    fn test_snake_case_convention() {
        let naming = NamingConvention::SnakeCase;
        assert_eq!(naming.apply("FirstName"), "first_name");
        assert_eq!(naming.apply("Id"), "id");
        assert_eq!(naming.apply("already_snake"), "already_snake");
    }

    #[test]
    fn test_preserve_convention() {
        assert_eq!(NamingConvention::Preserve.apply("FirstName"), "FirstName");
    }
}
