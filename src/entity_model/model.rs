use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::errors::EntityModelError;

/// A mapped scalar property of an entity type.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Property {
    /// Property name as declared on the entity
    pub name: String,
    /// Physical column the property maps to
    pub column_name: String,
    /// Whether the column participates in the primary key
    #[serde(default)]
    pub is_primary_key: bool,
    /// Shadow properties are tracked columns with no class member; they are
    /// part of the model but excluded from extracted mappings
    #[serde(default)]
    pub is_shadow: bool,
    /// Optional declared SQL type (informational, not validated)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sql_type: Option<String>,
}

impl Property {
    pub fn new(name: impl Into<String>, column_name: impl Into<String>) -> Self {
        Property {
            name: name.into(),
            column_name: column_name.into(),
            is_primary_key: false,
            is_shadow: false,
            sql_type: None,
        }
    }
}

/// A mapped entity type: table/schema placement, declared properties, and
/// its position in a single-table-inheritance hierarchy.
///
/// Table name, schema, and discriminator column are declared on hierarchy
/// roots only; derived types carry `base_type` and inherit placement through
/// [`Model::root_of`].
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct EntityType {
    /// Entity type name (unique within the model)
    pub name: String,
    /// Physical table name (roots only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_name: Option<String>,
    /// Physical schema, e.g. `public` or `dbo` (roots only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
    /// Name of the base entity type, if this type is derived
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_type: Option<String>,
    /// Discriminator column for single-table inheritance (roots only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discriminator_column: Option<String>,
    /// Discriminator value distinguishing this type's rows. Defaults to the
    /// entity name when the hierarchy has a discriminator column.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discriminator_value: Option<String>,
    /// Properties declared directly on this type (not inherited ones)
    pub properties: Vec<Property>,
}

impl EntityType {
    /// Discriminator value for this type, defaulting to the entity name.
    pub fn resolved_discriminator_value(&self) -> &str {
        self.discriminator_value.as_deref().unwrap_or(&self.name)
    }

    /// Look up a declared (non-inherited) property by name.
    pub fn find_property(&self, name: &str) -> Option<&Property> {
        self.properties.iter().find(|p| p.name == name)
    }
}

/// The in-memory entity model: an ordered set of entity types with by-name
/// lookup and hierarchy resolution.
///
/// Declaration order is preserved; hierarchy traversals and extracted
/// mappings follow it so generated SQL has deterministic column order.
#[derive(Debug, Serialize, Clone)]
pub struct Model {
    /// Optional model name (from the manifest)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    entity_types: Vec<EntityType>,
    #[serde(skip)]
    by_name: HashMap<String, usize>,
}

impl Model {
    /// Build a model from entity types, checking name uniqueness and base
    /// references. Called by the builder and the manifest loader; both have
    /// already applied naming conventions.
    pub(crate) fn from_entity_types(
        name: Option<String>,
        entity_types: Vec<EntityType>,
    ) -> Result<Self, EntityModelError> {
        let mut by_name = HashMap::with_capacity(entity_types.len());
        for (idx, entity) in entity_types.iter().enumerate() {
            if by_name.insert(entity.name.clone(), idx).is_some() {
                return Err(EntityModelError::DuplicateEntity {
                    entity: entity.name.clone(),
                });
            }
        }

        let model = Model {
            name,
            entity_types,
            by_name,
        };
        model.validate_hierarchies()?;
        Ok(model)
    }

    /// Look up an entity type by name.
    pub fn find_entity_type(&self, name: &str) -> Option<&EntityType> {
        self.by_name.get(name).map(|&idx| &self.entity_types[idx])
    }

    /// All entity types in declaration order.
    pub fn entity_types(&self) -> &[EntityType] {
        &self.entity_types
    }

    /// Resolve the hierarchy root of an entity by walking the base chain.
    pub fn root_of(&self, entity: &str) -> Result<&EntityType, EntityModelError> {
        let mut current = self.find_entity_type(entity).ok_or_else(|| {
            EntityModelError::entity_not_found_with_context(
                entity,
                "While resolving the hierarchy root",
            )
        })?;
        // Cycle detection: the chain can never be longer than the model
        let mut hops = 0;
        while let Some(base) = &current.base_type {
            current = self.find_entity_type(base).ok_or_else(|| {
                EntityModelError::UnknownBaseType {
                    entity: current.name.clone(),
                    base: base.clone(),
                }
            })?;
            hops += 1;
            if hops > self.entity_types.len() {
                return Err(EntityModelError::BaseTypeCycle {
                    entity: entity.to_string(),
                });
            }
        }
        Ok(current)
    }

    /// The full hierarchy of an entity: its root followed by every
    /// (transitive) descendant, in model declaration order.
    pub fn hierarchy_of(&self, entity: &str) -> Result<Vec<&EntityType>, EntityModelError> {
        let root = self.root_of(entity)?;
        let mut members = vec![root];
        for other in &self.entity_types {
            if other.name != root.name && self.root_of(&other.name)?.name == root.name {
                members.push(other);
            }
        }
        Ok(members)
    }

    /// Resolved physical table of an entity (the root's, for derived types).
    pub fn table_of(&self, entity: &str) -> Result<&str, EntityModelError> {
        let root = self.root_of(entity)?;
        root.table_name
            .as_deref()
            .ok_or_else(|| EntityModelError::MissingTable {
                entity: root.name.clone(),
            })
    }

    /// Resolved schema of an entity (the root's, for derived types).
    pub fn schema_of(&self, entity: &str) -> Result<Option<&str>, EntityModelError> {
        Ok(self.root_of(entity)?.schema.as_deref())
    }

    /// Structural checks that need the whole model: derived types must not
    /// re-declare table/discriminator, roots must have tables, and column
    /// names must be unique within each hierarchy.
    fn validate_hierarchies(&self) -> Result<(), EntityModelError> {
        // Every base chain must terminate in a root. Walking all entities
        // (not just roots) surfaces unknown bases and cycles even in models
        // with no root at all.
        for entity in &self.entity_types {
            self.root_of(&entity.name)?;
        }

        for entity in &self.entity_types {
            if entity.base_type.is_some() {
                if entity.table_name.is_some() {
                    return Err(EntityModelError::TableOnDerivedType {
                        entity: entity.name.clone(),
                    });
                }
                if entity.discriminator_column.is_some() {
                    return Err(EntityModelError::DiscriminatorOnDerivedType {
                        entity: entity.name.clone(),
                    });
                }
            }
        }

        for root in self.entity_types.iter().filter(|e| e.base_type.is_none()) {
            if root.table_name.is_none() {
                return Err(EntityModelError::MissingTable {
                    entity: root.name.clone(),
                });
            }

            let members = self.hierarchy_of(&root.name)?;
            let mut seen = std::collections::HashSet::new();
            if let Some(disc) = &root.discriminator_column {
                seen.insert(disc.as_str());
            }
            for member in &members {
                for property in &member.properties {
                    if !seen.insert(property.column_name.as_str()) {
                        return Err(EntityModelError::DuplicateColumn {
                            column: property.column_name.clone(),
                            root: root.name.clone(),
                        });
                    }
                }
            }
        }
        Ok(())
    }
}
