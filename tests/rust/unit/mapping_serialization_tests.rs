//! The extracted mapping is the CLI's JSON output and the contract with
//! downstream SQL tooling; these tests pin its serialized shape.

use bulkbridge::entity_model::ModelBuilder;
use bulkbridge::mapping::{entity_mapping, EntityMapping};
use serde_json::json;

fn vehicle_mapping() -> EntityMapping {
    let model = ModelBuilder::new()
        .entity("Vehicle", |e| {
            e.table("vehicles")
                .schema("fleet")
                .discriminator("vehicle_type")
                .property("Id", |p| p.column("id").primary_key())
                .property("Vin", |p| p.column("vin"))
        })
        .entity("Truck", |e| {
            e.base("Vehicle")
                .discriminator_value("truck")
                .property("PayloadKg", |p| p.column("payload_kg"))
        })
        .build()
        .unwrap();
    entity_mapping(&model, "Truck").unwrap()
}

#[test]
fn test_mapping_serializes_with_stable_field_names() {
    let mapping = vehicle_mapping();
    let value = serde_json::to_value(&mapping).unwrap();

    assert_eq!(value["entity_name"], json!("Truck"));
    assert_eq!(value["table_name"], json!("vehicles"));
    assert_eq!(value["schema"], json!("fleet"));

    let properties = value["properties"].as_array().unwrap();
    assert_eq!(properties.len(), 4);
    assert_eq!(properties[0]["property_name"], json!("Id"));
    assert_eq!(properties[0]["is_primary_key"], json!(true));

    // Synthetic discriminator mapping: last, no property name
    let discriminator = &properties[3];
    assert_eq!(discriminator["column_name"], json!("vehicle_type"));
    assert_eq!(discriminator["is_discriminator"], json!(true));
    assert!(discriminator.get("property_name").is_none());
}

#[test]
fn test_hierarchy_table_is_sorted_by_entity_name() {
    let mapping = vehicle_mapping();
    let value = serde_json::to_value(&mapping).unwrap();

    let hierarchy = value["hierarchy"].as_object().unwrap();
    let keys: Vec<_> = hierarchy.keys().collect();
    assert_eq!(keys, vec!["Truck", "Vehicle"]);
    assert_eq!(hierarchy["Truck"], json!("truck"));
    assert_eq!(hierarchy["Vehicle"], json!("Vehicle"));
}

#[test]
fn test_mapping_round_trips_through_json() {
    let mapping = vehicle_mapping();
    let json = serde_json::to_string(&mapping).unwrap();
    let back: EntityMapping = serde_json::from_str(&json).unwrap();
    assert_eq!(back, mapping);
}

#[test]
fn test_standalone_mapping_omits_hierarchy_field() {
    let model = ModelBuilder::new()
        .entity("Tag", |e| {
            e.table("tags").property("Id", |p| p.column("id").primary_key())
        })
        .build()
        .unwrap();
    let mapping = entity_mapping(&model, "Tag").unwrap();
    let value = serde_json::to_value(&mapping).unwrap();
    assert!(value.get("hierarchy").is_none());
    assert!(value.get("schema").is_none());
}
