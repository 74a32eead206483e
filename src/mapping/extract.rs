//! Mapping extraction: from the entity model to an [`EntityMapping`].
//!
//! This is the translation step between the model's type-oriented view and
//! the physical view the SQL generator works against. Extraction always
//! operates on the full hierarchy of the requested entity: single-table
//! inheritance maps every member to the root's table, so the property set
//! and the discriminator table must cover all of them regardless of which
//! member was asked for.

use log::debug;
use std::collections::{BTreeMap, HashSet};

use crate::entity_model::Model;

use super::entity_mapping::{EntityMapping, PropertyMapping};
use super::errors::MappingError;

/// Extract the physical mapping of `entity` from `model`.
///
/// - Table and schema come from the hierarchy root.
/// - Property mappings are collected across the hierarchy in declaration
///   order, root first, skipping shadow properties and deduplicating by
///   property name (the base declaration wins).
/// - When the hierarchy has more than one member, the mapping carries an
///   entity-name → discriminator-value table and exactly one synthetic
///   discriminator property mapping, appended last.
pub fn entity_mapping(model: &Model, entity: &str) -> Result<EntityMapping, MappingError> {
    let entity_type = model.find_entity_type(entity).ok_or_else(|| {
        MappingError::entity_not_found_with_context(entity, "While extracting the entity mapping")
    })?;
    let root = model.root_of(&entity_type.name)?;
    let hierarchy = model.hierarchy_of(&root.name)?;

    let mut seen = HashSet::new();
    let mut properties = Vec::new();
    for member in &hierarchy {
        for property in &member.properties {
            if property.is_shadow || !seen.insert(property.name.as_str()) {
                continue;
            }
            properties.push(PropertyMapping {
                property_name: Some(property.name.clone()),
                column_name: property.column_name.clone(),
                is_primary_key: property.is_primary_key,
                is_discriminator: false,
            });
        }
    }

    if properties.is_empty() {
        return Err(MappingError::NoMappedProperties {
            entity: entity.to_string(),
        });
    }

    let hierarchy_table = if hierarchy.len() > 1 {
        let discriminator_column =
            root.discriminator_column
                .as_ref()
                .ok_or_else(|| MappingError::MissingDiscriminator {
                    root: root.name.clone(),
                })?;

        let mut values = BTreeMap::new();
        for member in &hierarchy {
            values.insert(
                member.name.clone(),
                member.resolved_discriminator_value().to_string(),
            );
        }

        properties.push(PropertyMapping {
            property_name: None,
            column_name: discriminator_column.clone(),
            is_primary_key: false,
            is_discriminator: true,
        });
        Some(values)
    } else {
        None
    };

    debug!(
        "Extracted mapping for `{}`: table `{}`, {} properties, hierarchy of {}",
        entity,
        model.table_of(&root.name)?,
        properties.len(),
        hierarchy.len()
    );

    Ok(EntityMapping {
        entity_name: entity.to_string(),
        table_name: model.table_of(&root.name)?.to_string(),
        schema: root.schema.clone(),
        properties,
        hierarchy: hierarchy_table,
    })
}
