//! Shared plumbing for the statement builders: generated-statement type,
//! generator options, and row validation against the mapping.

use std::collections::HashMap;

use crate::mapping::{EntityMapping, PropertyMapping};

use super::dialect::SqlDialect;
use super::errors::SqlGeneratorError;
use super::value::{Row, SqlValue};

/// A generated statement: SQL text plus ordered parameters.
///
/// With `inline_values` the parameters are rendered into the text and
/// `params` is empty.
#[derive(Debug, Clone, PartialEq)]
pub struct SqlStatement {
    pub sql: String,
    pub params: Vec<SqlValue>,
}

impl SqlStatement {
    pub fn new(sql: String, params: Vec<SqlValue>) -> Self {
        SqlStatement { sql, params }
    }
}

/// Options shared by all statement builders.
#[derive(Debug, Clone)]
pub struct GeneratorOptions {
    /// Target dialect
    pub dialect: SqlDialect,
    /// Maximum rows (or keys) per generated statement
    pub batch_size: usize,
    /// Render values as inline literals instead of placeholders
    pub inline_values: bool,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        GeneratorOptions {
            dialect: SqlDialect::default(),
            batch_size: 1000,
            inline_values: false,
        }
    }
}

impl GeneratorOptions {
    pub fn validate(&self) -> Result<(), SqlGeneratorError> {
        if self.batch_size == 0 {
            return Err(SqlGeneratorError::InvalidBatchSize);
        }
        Ok(())
    }
}

/// Emits either a numbered placeholder (collecting the value as a
/// parameter) or an inline literal, per the options.
pub(super) struct ValueSink {
    dialect: SqlDialect,
    inline: bool,
    params: Vec<SqlValue>,
}

impl ValueSink {
    pub(super) fn new(opts: &GeneratorOptions) -> Self {
        ValueSink {
            dialect: opts.dialect,
            inline: opts.inline_values,
            params: Vec::new(),
        }
    }

    /// Render one value, returning the SQL fragment standing in for it.
    pub(super) fn push(&mut self, value: SqlValue) -> String {
        if self.inline {
            value.to_sql_literal()
        } else {
            self.params.push(value);
            self.dialect.placeholder(self.params.len())
        }
    }

    pub(super) fn into_params(self) -> Vec<SqlValue> {
        self.params
    }
}

/// Property-name index over the mapping's data properties.
pub(super) fn property_index(mapping: &EntityMapping) -> HashMap<&str, &PropertyMapping> {
    mapping
        .data_properties()
        .filter_map(|p| p.property_name.as_deref().map(|name| (name, p)))
        .collect()
}

/// Check that every property a row names exists in the mapping and is not
/// the discriminator column.
pub(super) fn check_row_properties(
    mapping: &EntityMapping,
    index: &HashMap<&str, &PropertyMapping>,
    row: &Row,
    row_number: usize,
) -> Result<(), SqlGeneratorError> {
    for property in row.values.keys() {
        if index.contains_key(property.as_str()) {
            continue;
        }
        if mapping
            .discriminator()
            .is_some_and(|d| d.column_name == *property)
        {
            return Err(SqlGeneratorError::DiscriminatorInRow {
                row: row_number,
                property: property.clone(),
            });
        }
        return Err(SqlGeneratorError::unknown_property_with_context(
            row_number,
            property,
            format!("mapping extracted for `{}`", mapping.entity_name),
        ));
    }
    Ok(())
}

/// Resolve the discriminator literal for a row, if the mapping has one.
/// Rows default to the entity the mapping was extracted for.
pub(super) fn discriminator_value(
    mapping: &EntityMapping,
    row: &Row,
    row_number: usize,
) -> Result<Option<SqlValue>, SqlGeneratorError> {
    if mapping.discriminator().is_none() {
        return Ok(None);
    }
    let entity = row.entity.as_deref().unwrap_or(&mapping.entity_name);
    match mapping.discriminator_value_for(entity) {
        Some(value) => Ok(Some(SqlValue::Text(value.to_string()))),
        None => Err(SqlGeneratorError::UnknownHierarchyMember {
            row: row_number,
            entity: entity.to_string(),
        }),
    }
}
