//! In-memory entity metadata model.
//!
//! This module is the metadata surface the rest of the crate reads: entity
//! types with table/schema placement, property-to-column mappings,
//! primary-key membership, shadow properties, and single-table-inheritance
//! hierarchies with discriminator columns.
//!
//! Models come from two places:
//! - [`ModelBuilder`] for programmatic construction
//! - [`ModelConfig`] for YAML manifests (see `config` for the format)

pub mod builder;
pub mod config;
pub mod errors;
pub mod model;
pub mod naming;

pub use builder::{EntityTypeBuilder, ModelBuilder, PropertyBuilder};
pub use config::{EntityDefinition, ModelConfig, ModelDefaults, PropertyDefinition};
pub use errors::EntityModelError;
pub use model::{EntityType, Model, Property};
pub use naming::NamingConvention;
