//! Bulk SQL generation over extracted entity mappings.
//!
//! Consumes an [`EntityMapping`](crate::mapping::EntityMapping) plus row
//! data and produces batched DML as [`SqlStatement`]s, either with dialect
//! placeholders and an ordered parameter list or with inline literals.

mod common;
mod delete;
mod dialect;
mod errors;
mod insert;
mod update;
mod value;

pub use common::{GeneratorOptions, SqlStatement};
pub use delete::bulk_delete;
pub use dialect::SqlDialect;
pub use errors::SqlGeneratorError;
pub use insert::bulk_insert;
pub use update::bulk_update;
pub use value::{Row, SqlValue};
