//! Manifest-to-mapping behavior across module boundaries: naming
//! conventions, defaults, and hierarchy rules as seen through the
//! extracted mapping.

use bulkbridge::entity_model::{EntityModelError, ModelConfig};
use bulkbridge::mapping::entity_mapping;

const BLOG_YAML: &str = r#"
name: blog
defaults:
  schema: content
  naming: snake_case
entities:
  - name: Post
    discriminator_column: post_type
    properties:
      - name: Id
        primary_key: true
      - Title
      - AuthorName
  - name: VideoPost
    base: Post
    properties:
      - VideoUrl
      - DurationSeconds
"#;

#[test]
fn test_convention_derived_names_flow_into_the_mapping() {
    let model = ModelConfig::from_yaml_str(BLOG_YAML)
        .unwrap()
        .to_model()
        .unwrap();
    let mapping = entity_mapping(&model, "VideoPost").unwrap();

    // Root table derived from the entity name
    assert_eq!(mapping.table_name, "post");
    assert_eq!(mapping.schema.as_deref(), Some("content"));

    let columns: Vec<_> = mapping
        .properties
        .iter()
        .map(|p| p.column_name.as_str())
        .collect();
    assert_eq!(
        columns,
        vec![
            "id",
            "title",
            "author_name",
            "video_url",
            "duration_seconds",
            "post_type",
        ]
    );
}

#[test]
fn test_default_discriminator_values_are_entity_names() {
    let model = ModelConfig::from_yaml_str(BLOG_YAML)
        .unwrap()
        .to_model()
        .unwrap();
    let mapping = entity_mapping(&model, "Post").unwrap();

    assert_eq!(mapping.discriminator_value_for("Post"), Some("Post"));
    assert_eq!(mapping.discriminator_value_for("VideoPost"), Some("VideoPost"));
    assert_eq!(mapping.discriminator_value_for("AudioPost"), None);
}

#[test]
fn test_schema_default_can_be_overridden_per_entity() {
    let yaml = r#"
defaults:
  schema: public
entities:
  - name: Archive
    schema: history
    properties:
      - name: Id
        primary_key: true
"#;
    let model = ModelConfig::from_yaml_str(yaml).unwrap().to_model().unwrap();
    let mapping = entity_mapping(&model, "Archive").unwrap();
    assert_eq!(mapping.schema.as_deref(), Some("history"));
}

#[test]
fn test_preserve_naming_keeps_manifest_casing() {
    let yaml = r#"
entities:
  - name: Person
    table: People
    properties:
      - name: Id
        primary_key: true
      - FirstName
"#;
    let model = ModelConfig::from_yaml_str(yaml).unwrap().to_model().unwrap();
    let mapping = entity_mapping(&model, "Person").unwrap();
    assert_eq!(mapping.table_name, "People");
    assert_eq!(mapping.properties[1].column_name, "FirstName");
}

#[test]
fn test_bad_identifier_in_manifest_is_rejected() {
    let yaml = r#"
entities:
  - name: Person
    table: "people; drop table users"
    properties:
      - name: Id
        primary_key: true
"#;
    let err = ModelConfig::from_yaml_str(yaml)
        .unwrap()
        .to_model()
        .unwrap_err();
    assert!(matches!(err, EntityModelError::InvalidIdentifier { .. }));
}
