//! Model manifest loading.
//!
//! Entity models are declared in YAML with the following structure:
//!
//! ```yaml
//! name: school            # Model name
//! defaults:
//!   schema: public        # Default schema for all roots
//!   naming: snake_case    # Derives missing table/column names (or: preserve)
//! entities:
//!   - name: Person        # Hierarchy root
//!     table: people       # Optional; derived from the name when omitted
//!     discriminator_column: kind
//!     properties:
//!       - name: Id
//!         column: id
//!         primary_key: true
//!       - FirstName       # Shorthand: column derived by the convention
//!       - name: RowVersion
//!         shadow: true    # Tracked column with no class member
//!   - name: Student
//!     base: Person        # Derived type: no table of its own
//!     discriminator_value: student
//!     properties:
//!       - Gpa
//! ```
//!
//! Loading happens in three steps: parse ([`ModelConfig::from_yaml_str`]),
//! structural validation ([`ModelConfig::validate`]), and conversion with
//! convention application ([`ModelConfig::to_model`]).

use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

use super::errors::EntityModelError;
use super::model::{EntityType, Model, Property};
use super::naming::{validate_identifier, NamingConvention};

/// Model manifest loaded from YAML
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Optional model name
    #[serde(default)]
    pub name: Option<String>,
    /// Defaults applied to all entity definitions
    #[serde(default)]
    pub defaults: ModelDefaults,
    /// Entity type definitions
    pub entities: Vec<EntityDefinition>,
}

/// Manifest-wide defaults
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModelDefaults {
    /// Default schema for hierarchy roots that do not declare one
    #[serde(default)]
    pub schema: Option<String>,
    /// Naming convention deriving missing table/column names
    #[serde(default)]
    pub naming: NamingConvention,
}

/// One entity type definition in the manifest
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityDefinition {
    /// Entity type name
    pub name: String,
    /// Physical table name (roots only; derived from the entity name by the
    /// naming convention when omitted)
    #[serde(default)]
    pub table: Option<String>,
    /// Physical schema (falls back to `defaults.schema`)
    #[serde(default)]
    pub schema: Option<String>,
    /// Base entity type name (marks this definition as a derived type)
    #[serde(default)]
    pub base: Option<String>,
    /// Discriminator column for single-table inheritance (roots only)
    #[serde(default)]
    pub discriminator_column: Option<String>,
    /// Discriminator value for this type's rows (defaults to the entity name)
    #[serde(default)]
    pub discriminator_value: Option<String>,
    /// Property definitions
    #[serde(default)]
    pub properties: Vec<PropertyDefinition>,
}

/// Property definition supporting shorthand and full forms
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyDefinition {
    /// Shorthand: a bare property name; the column is derived by the
    /// naming convention
    Name(String),
    /// Full form with explicit column mapping and flags
    Full(FullPropertyDefinition),
}

/// Full property definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FullPropertyDefinition {
    /// Property name
    pub name: String,
    /// Column name (derived by the naming convention when omitted)
    #[serde(default)]
    pub column: Option<String>,
    /// Whether the column is part of the primary key
    #[serde(default)]
    pub primary_key: bool,
    /// Whether this is a shadow property
    #[serde(default)]
    pub shadow: bool,
    /// Optional declared SQL type
    #[serde(default)]
    pub sql_type: Option<String>,
}

impl PropertyDefinition {
    fn name(&self) -> &str {
        match self {
            PropertyDefinition::Name(name) => name,
            PropertyDefinition::Full(full) => &full.name,
        }
    }
}

impl ModelConfig {
    /// Load a model manifest from a YAML file
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self, EntityModelError> {
        let contents =
            fs::read_to_string(path).map_err(|e| EntityModelError::ManifestReadError {
                error: e.to_string(),
            })?;
        Self::from_yaml_str(&contents)
    }

    /// Parse a model manifest from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self, EntityModelError> {
        serde_yaml::from_str(yaml).map_err(|e| EntityModelError::ManifestParseError {
            error: e.to_string(),
        })
    }

    /// Basic validation of the manifest before conversion
    pub fn validate(&self) -> Result<(), EntityModelError> {
        if self.entities.is_empty() {
            return Err(EntityModelError::InvalidModel {
                message: "Manifest must contain at least one entity definition".to_string(),
            });
        }

        let mut seen_names = HashSet::new();
        for entity in &self.entities {
            if !seen_names.insert(&entity.name) {
                return Err(EntityModelError::DuplicateEntity {
                    entity: entity.name.clone(),
                });
            }

            let mut seen_properties = HashSet::new();
            for property in &entity.properties {
                if !seen_properties.insert(property.name()) {
                    return Err(EntityModelError::invalid_model_with_context(
                        format!("Duplicate property `{}`", property.name()),
                        format!("In entity definition `{}`", entity.name),
                    ));
                }
            }
        }

        // Base references must resolve within the manifest; full hierarchy
        // checks (cycles, table placement) run during model construction.
        let names: HashSet<_> = self.entities.iter().map(|e| e.name.as_str()).collect();
        for entity in &self.entities {
            if let Some(base) = &entity.base {
                if !names.contains(base.as_str()) {
                    return Err(EntityModelError::UnknownBaseType {
                        entity: entity.name.clone(),
                        base: base.clone(),
                    });
                }
            }
        }

        Ok(())
    }

    /// Convert the manifest into a validated [`Model`], applying the naming
    /// convention to derive missing table and column names.
    pub fn to_model(&self) -> Result<Model, EntityModelError> {
        self.validate()?;
        let naming = self.defaults.naming;

        let mut entity_types = Vec::with_capacity(self.entities.len());
        for definition in &self.entities {
            validate_identifier(&definition.name)?;

            // Roots get a derived table name when none is declared; derived
            // types keep None so model validation can reject explicit ones.
            let table_name = match (&definition.table, &definition.base) {
                (Some(table), _) => Some(table.clone()),
                (None, None) => Some(naming.apply(&definition.name)),
                (None, Some(_)) => None,
            };

            let schema = definition
                .schema
                .clone()
                .or_else(|| self.defaults.schema.clone());

            let mut properties = Vec::with_capacity(definition.properties.len());
            for property in &definition.properties {
                properties.push(convert_property(property, naming)?);
            }

            let entity = EntityType {
                name: definition.name.clone(),
                table_name,
                schema,
                base_type: definition.base.clone(),
                discriminator_column: definition.discriminator_column.clone(),
                discriminator_value: definition.discriminator_value.clone(),
                properties,
            };
            if let Some(table) = &entity.table_name {
                validate_identifier(table)?;
            }
            if let Some(schema) = &entity.schema {
                validate_identifier(schema)?;
            }
            if let Some(disc) = &entity.discriminator_column {
                validate_identifier(disc)?;
            }
            entity_types.push(entity);
        }

        debug!(
            "Loaded model manifest `{}` with {} entity definitions",
            self.name.as_deref().unwrap_or("<unnamed>"),
            entity_types.len()
        );

        Model::from_entity_types(self.name.clone(), entity_types)
    }
}

fn convert_property(
    definition: &PropertyDefinition,
    naming: NamingConvention,
) -> Result<Property, EntityModelError> {
    let property = match definition {
        PropertyDefinition::Name(name) => Property::new(name.clone(), naming.apply(name)),
        PropertyDefinition::Full(full) => {
            let column = full
                .column
                .clone()
                .unwrap_or_else(|| naming.apply(&full.name));
            let mut property = Property::new(full.name.clone(), column);
            property.is_primary_key = full.primary_key;
            property.is_shadow = full.shadow;
            property.sql_type = full.sql_type.clone();
            property
        }
    };
    validate_identifier(&property.column_name)?;
    Ok(property)
}
