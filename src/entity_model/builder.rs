//! Programmatic model construction.
//!
//! The builder is the in-process alternative to the YAML manifest: tests and
//! embedding applications declare entity types fluently and get the same
//! validated [`Model`] the manifest loader produces.
//!
//! ```
//! use bulkbridge::entity_model::ModelBuilder;
//!
//! let model = ModelBuilder::new()
//!     .entity("Person", |e| {
//!         e.table("people")
//!             .schema("public")
//!             .discriminator("kind")
//!             .property("Id", |p| p.column("id").primary_key())
//!             .property("Name", |p| p.column("name"))
//!     })
//!     .entity("Student", |e| e.base("Person").property("Gpa", |p| p.column("gpa")))
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(model.table_of("Student").unwrap(), "people");
//! ```

use super::errors::EntityModelError;
use super::model::{EntityType, Model, Property};
use super::naming::validate_identifier;

/// Fluent builder for a [`Model`].
#[derive(Debug, Default)]
pub struct ModelBuilder {
    name: Option<String>,
    entity_types: Vec<EntityType>,
}

impl ModelBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the model name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Declare an entity type. The closure configures table placement,
    /// hierarchy position, and properties.
    pub fn entity<F>(mut self, name: impl Into<String>, configure: F) -> Self
    where
        F: FnOnce(EntityTypeBuilder) -> EntityTypeBuilder,
    {
        let builder = configure(EntityTypeBuilder::new(name));
        self.entity_types.push(builder.finish());
        self
    }

    /// Validate and produce the model.
    pub fn build(self) -> Result<Model, EntityModelError> {
        for entity in &self.entity_types {
            validate_identifier(&entity.name)?;
            if let Some(table) = &entity.table_name {
                validate_identifier(table)?;
            }
            if let Some(schema) = &entity.schema {
                validate_identifier(schema)?;
            }
            if let Some(disc) = &entity.discriminator_column {
                validate_identifier(disc)?;
            }
            for property in &entity.properties {
                validate_identifier(&property.column_name)?;
            }
        }
        Model::from_entity_types(self.name, self.entity_types)
    }
}

/// Builder for one entity type inside [`ModelBuilder::entity`].
#[derive(Debug)]
pub struct EntityTypeBuilder {
    entity: EntityType,
}

impl EntityTypeBuilder {
    fn new(name: impl Into<String>) -> Self {
        EntityTypeBuilder {
            entity: EntityType {
                name: name.into(),
                table_name: None,
                schema: None,
                base_type: None,
                discriminator_column: None,
                discriminator_value: None,
                properties: Vec::new(),
            },
        }
    }

    /// Physical table name (hierarchy roots only).
    pub fn table(mut self, table: impl Into<String>) -> Self {
        self.entity.table_name = Some(table.into());
        self
    }

    /// Physical schema name.
    pub fn schema(mut self, schema: impl Into<String>) -> Self {
        self.entity.schema = Some(schema.into());
        self
    }

    /// Mark this type as derived from `base`.
    pub fn base(mut self, base: impl Into<String>) -> Self {
        self.entity.base_type = Some(base.into());
        self
    }

    /// Declare the single-table-inheritance discriminator column
    /// (hierarchy roots only).
    pub fn discriminator(mut self, column: impl Into<String>) -> Self {
        self.entity.discriminator_column = Some(column.into());
        self
    }

    /// Override the discriminator value for this type's rows. Defaults to
    /// the entity name.
    pub fn discriminator_value(mut self, value: impl Into<String>) -> Self {
        self.entity.discriminator_value = Some(value.into());
        self
    }

    /// Declare a property. The closure configures the column mapping; the
    /// column name defaults to the property name when not set.
    pub fn property<F>(mut self, name: impl Into<String>, configure: F) -> Self
    where
        F: FnOnce(PropertyBuilder) -> PropertyBuilder,
    {
        let builder = configure(PropertyBuilder::new(name));
        self.entity.properties.push(builder.finish());
        self
    }

    fn finish(self) -> EntityType {
        self.entity
    }
}

/// Builder for one property inside [`EntityTypeBuilder::property`].
#[derive(Debug)]
pub struct PropertyBuilder {
    property: Property,
}

impl PropertyBuilder {
    fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        PropertyBuilder {
            property: Property::new(name.clone(), name),
        }
    }

    /// Physical column name.
    pub fn column(mut self, column: impl Into<String>) -> Self {
        self.property.column_name = column.into();
        self
    }

    /// Mark the column as part of the primary key.
    pub fn primary_key(mut self) -> Self {
        self.property.is_primary_key = true;
        self
    }

    /// Mark the property as a shadow property (tracked column with no class
    /// member; excluded from extracted mappings).
    pub fn shadow(mut self) -> Self {
        self.property.is_shadow = true;
        self
    }

    /// Declared SQL type (informational).
    pub fn sql_type(mut self, sql_type: impl Into<String>) -> Self {
        self.property.sql_type = Some(sql_type.into());
        self
    }

    fn finish(self) -> Property {
        self.property
    }
}
