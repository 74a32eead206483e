use thiserror::Error;

use crate::entity_model::EntityModelError;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum MappingError {
    #[error("No entity type found for `{entity}` (is it declared in the model?)")]
    EntityNotFound { entity: String },
    #[error("Hierarchy rooted at `{root}` has multiple members but no discriminator column (declare one on the root)")]
    MissingDiscriminator { root: String },
    #[error("Entity `{entity}` maps no non-shadow properties (nothing to extract)")]
    NoMappedProperties { entity: String },
    #[error("Model error: {0}")]
    Model(#[from] EntityModelError),
}

/// Helper for creating lookup errors with context
impl MappingError {
    /// Create an EntityNotFound error with context information
    pub fn entity_not_found_with_context(
        entity: impl Into<String>,
        context: impl Into<String>,
    ) -> Self {
        let entity = entity.into();
        let ctx = context.into();
        MappingError::EntityNotFound {
            entity: format!("{}\n  Context: {}", entity, ctx),
        }
    }
}
