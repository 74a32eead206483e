use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum SqlGeneratorError {
    #[error("No rows supplied (bulk statements are never generated empty)")]
    EmptyRows,
    #[error("Batch size must be at least 1")]
    InvalidBatchSize,
    #[error("Mapping for `{entity}` has no primary key (required for UPDATE/DELETE generation)")]
    MissingPrimaryKey { entity: String },
    #[error("Row {row} references unknown property `{property}` (not in the extracted mapping)")]
    UnknownProperty { row: usize, property: String },
    #[error("Row {row} sets the discriminator `{property}` directly (discriminator values come from the hierarchy mapping)")]
    DiscriminatorInRow { row: usize, property: String },
    #[error("Row {row} names `{entity}` which is not a member of the mapped hierarchy")]
    UnknownHierarchyMember { row: usize, entity: String },
    #[error("Row {row} is missing a value for primary-key column `{column}`")]
    MissingKeyValue { row: usize, column: String },
    #[error("Row {row} has no assignable columns (nothing to SET)")]
    NothingToSet { row: usize },
    #[error("Key {key} has arity {actual}, expected {expected} (one value per primary-key column)")]
    KeyArityMismatch {
        key: usize,
        expected: usize,
        actual: usize,
    },
}

/// Helper for creating property errors with context
impl SqlGeneratorError {
    /// Create an UnknownProperty error with context information
    pub fn unknown_property_with_context(
        row: usize,
        property: impl Into<String>,
        context: impl Into<String>,
    ) -> Self {
        let prop = property.into();
        let ctx = context.into();
        SqlGeneratorError::UnknownProperty {
            row,
            property: format!("{} ({})", prop, ctx),
        }
    }
}
