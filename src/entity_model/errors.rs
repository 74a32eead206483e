//! # Entity Model Error Types
//!
//! Error handling for entity model construction, manifest parsing, and
//! structural validation.
//!
//! ## Error Categories
//!
//! - **Lookup Errors**: Unmapped entity types, unknown base types
//! - **Structural Errors**: Duplicate entities/columns, invalid hierarchies
//! - **Manifest Errors**: File I/O and parsing issues during model loading
//!
//! When returning lookup errors from deeper layers, prefer the context
//! helpers so the message says what was being resolved:
//!
//! ```ignore
//! EntityModelError::entity_not_found_with_context(
//!     "Student",
//!     "While resolving base type of `GraduateStudent`"
//! )
//! ```

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum EntityModelError {
    #[error("No entity type found for `{entity}` (is it declared in the model?)")]
    EntityNotFound { entity: String },
    #[error("Duplicate entity type `{entity}` in model")]
    DuplicateEntity { entity: String },
    #[error("Entity `{entity}` references unknown base type `{base}`")]
    UnknownBaseType { entity: String, base: String },
    #[error("Base type cycle detected through entity `{entity}`")]
    BaseTypeCycle { entity: String },
    #[error("Entity `{entity}` has no table name and is not part of a hierarchy with one")]
    MissingTable { entity: String },
    #[error("Derived entity `{entity}` must not declare its own table (single-table inheritance maps the hierarchy to the root's table)")]
    TableOnDerivedType { entity: String },
    #[error("Derived entity `{entity}` must not declare a discriminator column (only hierarchy roots may)")]
    DiscriminatorOnDerivedType { entity: String },
    #[error("Duplicate column `{column}` in hierarchy rooted at `{root}`")]
    DuplicateColumn { column: String, root: String },
    #[error("Invalid identifier `{name}` (identifiers must match [A-Za-z_][A-Za-z0-9_]*)")]
    InvalidIdentifier { name: String },
    #[error("Failed to read model manifest: {error}")]
    ManifestReadError { error: String },
    #[error("Failed to parse model manifest: {error}")]
    ManifestParseError { error: String },
    #[error("Invalid model: {message}")]
    InvalidModel { message: String },
}

/// Helper methods for creating errors with context information
impl EntityModelError {
    /// Create an EntityNotFound error with context information
    pub fn entity_not_found_with_context(
        entity: impl Into<String>,
        context: impl Into<String>,
    ) -> Self {
        let entity = entity.into();
        let ctx = context.into();
        EntityModelError::EntityNotFound {
            entity: format!("{}\n  Context: {}", entity, ctx),
        }
    }

    /// Create an InvalidModel error with context information
    pub fn invalid_model_with_context(
        message: impl Into<String>,
        context: impl Into<String>,
    ) -> Self {
        let msg = message.into();
        let ctx = context.into();
        EntityModelError::InvalidModel {
            message: format!("{}\n  Context: {}", msg, ctx),
        }
    }
}
