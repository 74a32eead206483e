//! Bulk UPDATE generation.
//!
//! One UPDATE per row: SET over the row's non-key properties, WHERE over the
//! full primary key. The discriminator column is never assignable; a row's
//! type is fixed at insert time.

use log::debug;

use crate::mapping::EntityMapping;

use super::common::{check_row_properties, property_index, GeneratorOptions, SqlStatement, ValueSink};
use super::errors::SqlGeneratorError;
use super::value::Row;

/// Generate one update statement per row against `mapping`.
///
/// Every row must carry a value for each primary-key column and at least
/// one non-key property to assign.
pub fn bulk_update(
    mapping: &EntityMapping,
    rows: &[Row],
    opts: &GeneratorOptions,
) -> Result<Vec<SqlStatement>, SqlGeneratorError> {
    opts.validate()?;
    if rows.is_empty() {
        return Err(SqlGeneratorError::EmptyRows);
    }

    let keys: Vec<_> = mapping
        .data_properties()
        .filter(|p| p.is_primary_key)
        .collect();
    if keys.is_empty() {
        return Err(SqlGeneratorError::MissingPrimaryKey {
            entity: mapping.entity_name.clone(),
        });
    }

    let index = property_index(mapping);
    let table = opts
        .dialect
        .qualified_table(mapping.schema.as_deref(), &mapping.table_name);

    let mut statements = Vec::with_capacity(rows.len());
    for (row_number, row) in rows.iter().enumerate() {
        check_row_properties(mapping, &index, row, row_number)?;
        let mut sink = ValueSink::new(opts);

        // SET: mapping order, restricted to non-key properties the row sets
        let mut assignments = Vec::new();
        for property in mapping.data_properties().filter(|p| !p.is_primary_key) {
            let name = property.property_name.as_deref().unwrap_or_default();
            if let Some(value) = row.values.get(name) {
                assignments.push(format!(
                    "{} = {}",
                    opts.dialect.quote_identifier(&property.column_name),
                    sink.push(value.clone())
                ));
            }
        }
        if assignments.is_empty() {
            return Err(SqlGeneratorError::NothingToSet { row: row_number });
        }

        let mut predicates = Vec::with_capacity(keys.len());
        for key in &keys {
            let name = key.property_name.as_deref().unwrap_or_default();
            let value =
                row.values
                    .get(name)
                    .ok_or_else(|| SqlGeneratorError::MissingKeyValue {
                        row: row_number,
                        column: key.column_name.clone(),
                    })?;
            predicates.push(format!(
                "{} = {}",
                opts.dialect.quote_identifier(&key.column_name),
                sink.push(value.clone())
            ));
        }

        let sql = format!(
            "UPDATE {} SET {} WHERE {}",
            table,
            assignments.join(", "),
            predicates.join(" AND ")
        );
        statements.push(SqlStatement::new(sql, sink.into_params()));
    }

    debug!(
        "Generated {} update statement(s) against {}",
        statements.len(),
        table
    );
    Ok(statements)
}
