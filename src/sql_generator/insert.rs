//! Bulk INSERT generation.
//!
//! Rows are grouped into multi-row `INSERT ... VALUES` statements, one per
//! batch. The column list follows mapping order; when the mapping covers a
//! single-table-inheritance hierarchy the discriminator column is included
//! and its value resolved from the hierarchy table via each row's concrete
//! entity type.

use log::debug;

use crate::mapping::EntityMapping;

use super::common::{
    check_row_properties, discriminator_value, property_index, GeneratorOptions, SqlStatement,
    ValueSink,
};
use super::errors::SqlGeneratorError;
use super::value::{Row, SqlValue};

/// Generate batched bulk-insert statements for `rows` against `mapping`.
///
/// Properties absent from a row insert NULL. Unknown property names and
/// direct discriminator assignments are errors.
pub fn bulk_insert(
    mapping: &EntityMapping,
    rows: &[Row],
    opts: &GeneratorOptions,
) -> Result<Vec<SqlStatement>, SqlGeneratorError> {
    opts.validate()?;
    if rows.is_empty() {
        return Err(SqlGeneratorError::EmptyRows);
    }

    let index = property_index(mapping);
    let table = opts
        .dialect
        .qualified_table(mapping.schema.as_deref(), &mapping.table_name);
    let column_list = mapping
        .properties
        .iter()
        .map(|p| opts.dialect.quote_identifier(&p.column_name))
        .collect::<Vec<_>>()
        .join(", ");

    let mut statements = Vec::new();
    for (batch_number, batch) in rows.chunks(opts.batch_size).enumerate() {
        let mut sink = ValueSink::new(opts);
        let mut tuples = Vec::with_capacity(batch.len());

        for (offset, row) in batch.iter().enumerate() {
            let row_number = batch_number * opts.batch_size + offset;
            check_row_properties(mapping, &index, row, row_number)?;
            let discriminator = discriminator_value(mapping, row, row_number)?;

            let mut fragments = Vec::with_capacity(mapping.properties.len());
            for property in &mapping.properties {
                let value = if property.is_discriminator {
                    // Checked above: present whenever the mapping has a
                    // discriminator column
                    discriminator.clone().unwrap_or(SqlValue::Null)
                } else {
                    let name = property.property_name.as_deref().unwrap_or_default();
                    row.values.get(name).cloned().unwrap_or(SqlValue::Null)
                };
                fragments.push(sink.push(value));
            }
            tuples.push(format!("({})", fragments.join(", ")));
        }

        let sql = format!(
            "INSERT INTO {} ({}) VALUES {}",
            table,
            column_list,
            tuples.join(", ")
        );
        statements.push(SqlStatement::new(sql, sink.into_params()));
    }

    debug!(
        "Generated {} insert statement(s) for {} row(s) into {}",
        statements.len(),
        rows.len(),
        table
    );
    Ok(statements)
}
