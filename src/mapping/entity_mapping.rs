use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One property-to-column mapping inside an [`EntityMapping`].
///
/// The synthetic discriminator mapping has no property name: the column is
/// framework-managed and has no member on any entity in the hierarchy.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PropertyMapping {
    /// Property name; `None` for the synthetic discriminator mapping
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_name: Option<String>,
    /// Physical column name
    pub column_name: String,
    /// Whether the column participates in the primary key
    #[serde(default)]
    pub is_primary_key: bool,
    /// Whether this is the single-table-inheritance discriminator column
    #[serde(default)]
    pub is_discriminator: bool,
}

/// The extracted physical mapping of an entity type: everything bulk SQL
/// generation needs to address the correct table and columns.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct EntityMapping {
    /// The entity the mapping was extracted for
    pub entity_name: String,
    /// Physical table (the hierarchy root's table)
    pub table_name: String,
    /// Physical schema, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
    /// Property mappings in hierarchy declaration order, root first,
    /// deduplicated by property name. The discriminator mapping, when
    /// present, is last.
    pub properties: Vec<PropertyMapping>,
    /// Entity name → discriminator value, for every hierarchy member.
    /// `None` when the entity does not participate in single-table
    /// inheritance. BTreeMap keeps serialized output deterministic.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hierarchy: Option<BTreeMap<String, String>>,
}

impl EntityMapping {
    /// Columns of the primary key, in mapping order.
    pub fn primary_key_columns(&self) -> Vec<&str> {
        self.properties
            .iter()
            .filter(|p| p.is_primary_key)
            .map(|p| p.column_name.as_str())
            .collect()
    }

    /// Non-discriminator mappings carrying real property data, in order.
    pub fn data_properties(&self) -> impl Iterator<Item = &PropertyMapping> {
        self.properties.iter().filter(|p| !p.is_discriminator)
    }

    /// The synthetic discriminator mapping, if the entity participates in
    /// single-table inheritance.
    pub fn discriminator(&self) -> Option<&PropertyMapping> {
        self.properties.iter().find(|p| p.is_discriminator)
    }

    /// Discriminator value for a concrete hierarchy member.
    pub fn discriminator_value_for(&self, entity: &str) -> Option<&str> {
        self.hierarchy
            .as_ref()
            .and_then(|h| h.get(entity))
            .map(String::as_str)
    }

    /// Whether the mapping covers a single-table-inheritance hierarchy.
    pub fn has_hierarchy(&self) -> bool {
        self.hierarchy.is_some()
    }
}
