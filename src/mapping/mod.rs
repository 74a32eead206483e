//! Entity mapping extraction.
//!
//! Translates the type-oriented entity model into the physical
//! [`EntityMapping`] consumed by bulk SQL generation: resolved table and
//! schema, deduplicated property-to-column mappings across the hierarchy,
//! and the single-table-inheritance discriminator table.

pub mod entity_mapping;
pub mod errors;
pub mod extract;

pub use entity_mapping::{EntityMapping, PropertyMapping};
pub use errors::MappingError;
pub use extract::entity_mapping;
