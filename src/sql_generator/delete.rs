//! Bulk DELETE generation.
//!
//! Keys are batched into `IN` predicates: a plain value list for
//! single-column primary keys, row-value tuples for composite ones.

use log::debug;

use crate::mapping::EntityMapping;

use super::common::{GeneratorOptions, SqlStatement, ValueSink};
use super::errors::SqlGeneratorError;
use super::value::SqlValue;

/// Generate batched delete statements for the given primary-key values.
///
/// Each entry in `keys` is one row's key: a single value for single-column
/// keys, one value per key column (in mapping order) for composite keys.
pub fn bulk_delete(
    mapping: &EntityMapping,
    keys: &[Vec<SqlValue>],
    opts: &GeneratorOptions,
) -> Result<Vec<SqlStatement>, SqlGeneratorError> {
    opts.validate()?;
    if keys.is_empty() {
        return Err(SqlGeneratorError::EmptyRows);
    }

    let key_columns = mapping.primary_key_columns();
    if key_columns.is_empty() {
        return Err(SqlGeneratorError::MissingPrimaryKey {
            entity: mapping.entity_name.clone(),
        });
    }
    for (key_number, key) in keys.iter().enumerate() {
        if key.len() != key_columns.len() {
            return Err(SqlGeneratorError::KeyArityMismatch {
                key: key_number,
                expected: key_columns.len(),
                actual: key.len(),
            });
        }
    }

    let table = opts
        .dialect
        .qualified_table(mapping.schema.as_deref(), &mapping.table_name);
    let target = if key_columns.len() == 1 {
        opts.dialect.quote_identifier(key_columns[0])
    } else {
        format!(
            "({})",
            key_columns
                .iter()
                .map(|c| opts.dialect.quote_identifier(c))
                .collect::<Vec<_>>()
                .join(", ")
        )
    };

    let mut statements = Vec::new();
    for batch in keys.chunks(opts.batch_size) {
        let mut sink = ValueSink::new(opts);
        let mut entries = Vec::with_capacity(batch.len());
        for key in batch {
            if key_columns.len() == 1 {
                entries.push(sink.push(key[0].clone()));
            } else {
                let tuple = key
                    .iter()
                    .map(|v| sink.push(v.clone()))
                    .collect::<Vec<_>>()
                    .join(", ");
                entries.push(format!("({})", tuple));
            }
        }

        let sql = format!(
            "DELETE FROM {} WHERE {} IN ({})",
            table,
            target,
            entries.join(", ")
        );
        statements.push(SqlStatement::new(sql, sink.into_params()));
    }

    debug!(
        "Generated {} delete statement(s) for {} key(s) against {}",
        statements.len(),
        keys.len(),
        table
    );
    Ok(statements)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity_model::ModelBuilder;
    use crate::mapping::entity_mapping;
    use crate::sql_generator::SqlDialect;

    fn inline_opts() -> GeneratorOptions {
        GeneratorOptions {
            dialect: SqlDialect::Postgres,
            inline_values: true,
            ..GeneratorOptions::default()
        }
    }

    fn single_key_mapping() -> EntityMapping {
        let model = ModelBuilder::new()
            .entity("Tag", |e| {
                e.table("tags")
                    .property("Id", |p| p.column("id").primary_key())
                    .property("Label", |p| p.column("label"))
            })
            .build()
            .unwrap();
        entity_mapping(&model, "Tag").unwrap()
    }

    #[test]
    fn test_single_key_delete_uses_value_list() {
        let mapping = single_key_mapping();
        let keys = vec![
            vec![SqlValue::Integer(1)],
            vec![SqlValue::Integer(2)],
            vec![SqlValue::Integer(3)],
        ];
        let statements = bulk_delete(&mapping, &keys, &inline_opts()).unwrap();
        assert_eq!(statements.len(), 1);
        assert_eq!(
            statements[0].sql,
            "DELETE FROM \"tags\" WHERE \"id\" IN (1, 2, 3)"
        );
    }

    #[test]
    fn test_composite_key_delete_uses_row_value_tuples() {
        let model = ModelBuilder::new()
            .entity("OrderLine", |e| {
                e.table("order_lines")
                    .property("OrderId", |p| p.column("order_id").primary_key())
                    .property("LineNo", |p| p.column("line_no").primary_key())
                    .property("Quantity", |p| p.column("quantity"))
            })
            .build()
            .unwrap();
        let mapping = entity_mapping(&model, "OrderLine").unwrap();

        let keys = vec![
            vec![SqlValue::Integer(7), SqlValue::Integer(1)],
            vec![SqlValue::Integer(7), SqlValue::Integer(2)],
        ];
        let statements = bulk_delete(&mapping, &keys, &inline_opts()).unwrap();
        assert_eq!(
            statements[0].sql,
            "DELETE FROM \"order_lines\" WHERE (\"order_id\", \"line_no\") IN ((7, 1), (7, 2))"
        );
    }

    #[test]
    fn test_delete_batching_and_placeholders() {
        let mapping = single_key_mapping();
        let keys: Vec<_> = (1..=3).map(|i| vec![SqlValue::Integer(i)]).collect();
        let opts = GeneratorOptions {
            batch_size: 2,
            ..GeneratorOptions::default()
        };

        let statements = bulk_delete(&mapping, &keys, &opts).unwrap();
        assert_eq!(statements.len(), 2);
        assert_eq!(
            statements[0].sql,
            "DELETE FROM \"tags\" WHERE \"id\" IN ($1, $2)"
        );
        assert_eq!(
            statements[1].sql,
            "DELETE FROM \"tags\" WHERE \"id\" IN ($1)"
        );
        assert_eq!(statements[1].params, vec![SqlValue::Integer(3)]);
    }

    #[test]
    fn test_key_arity_mismatch_is_an_error() {
        let mapping = single_key_mapping();
        let keys = vec![vec![SqlValue::Integer(1), SqlValue::Integer(2)]];
        let err = bulk_delete(&mapping, &keys, &inline_opts()).unwrap_err();
        assert!(matches!(
            err,
            SqlGeneratorError::KeyArityMismatch {
                key: 0,
                expected: 1,
                actual: 2,
            }
        ));
    }
}
