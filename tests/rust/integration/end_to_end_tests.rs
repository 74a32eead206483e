//! Full pipeline: YAML manifest on disk → model → mapping → bulk SQL.

use anyhow::Result;
use bulkbridge::entity_model::ModelConfig;
use bulkbridge::mapping::entity_mapping;
use bulkbridge::sql_generator::{
    bulk_delete, bulk_insert, bulk_update, GeneratorOptions, Row, SqlDialect, SqlValue,
};
use std::io::Write;
use tempfile::NamedTempFile;
use test_case::test_case;

const SHOP_YAML: &str = r#"
name: shop
defaults:
  schema: sales
  naming: snake_case
entities:
  - name: Product
    discriminator_column: product_kind
    properties:
      - name: Id
        primary_key: true
      - Name
      - name: InternalNote
        shadow: true
  - name: DigitalProduct
    base: Product
    discriminator_value: digital
    properties:
      - DownloadUrl
  - name: PhysicalProduct
    base: Product
    discriminator_value: physical
    properties:
      - WeightGrams
"#;

fn write_manifest(contents: &str) -> Result<NamedTempFile> {
    let mut file = NamedTempFile::new()?;
    file.write_all(contents.as_bytes())?;
    Ok(file)
}

fn options(dialect: SqlDialect) -> GeneratorOptions {
    GeneratorOptions {
        dialect,
        batch_size: 1000,
        inline_values: true,
    }
}

#[test]
fn test_manifest_file_to_mapping() -> Result<()> {
    let manifest = write_manifest(SHOP_YAML)?;
    let model = ModelConfig::from_yaml_file(manifest.path())?.to_model()?;
    let mapping = entity_mapping(&model, "DigitalProduct")?;

    assert_eq!(mapping.table_name, "product");
    assert_eq!(mapping.schema.as_deref(), Some("sales"));

    // Shadow property excluded, discriminator last
    let columns: Vec<_> = mapping
        .properties
        .iter()
        .map(|p| p.column_name.as_str())
        .collect();
    assert_eq!(
        columns,
        vec!["id", "name", "download_url", "weight_grams", "product_kind"]
    );

    let hierarchy = mapping.hierarchy.as_ref().unwrap();
    assert_eq!(hierarchy.len(), 3);
    assert_eq!(hierarchy["DigitalProduct"], "digital");
    assert_eq!(hierarchy["PhysicalProduct"], "physical");
    assert_eq!(hierarchy["Product"], "Product");
    Ok(())
}

#[test_case(
    SqlDialect::Postgres,
    "INSERT INTO \"sales\".\"product\" (\"id\", \"name\", \"download_url\", \"weight_grams\", \"product_kind\") \
     VALUES (1, 'Manual', 'https://x/m.pdf', NULL, 'digital'), (2, 'Crate', NULL, 1200, 'physical')"
    ; "postgres insert")]
#[test_case(
    SqlDialect::MySql,
    "INSERT INTO `sales`.`product` (`id`, `name`, `download_url`, `weight_grams`, `product_kind`) \
     VALUES (1, 'Manual', 'https://x/m.pdf', NULL, 'digital'), (2, 'Crate', NULL, 1200, 'physical')"
    ; "mysql insert")]
fn test_mixed_subtype_insert(dialect: SqlDialect, expected: &str) {
    let model = ModelConfig::from_yaml_str(SHOP_YAML)
        .unwrap()
        .to_model()
        .unwrap();
    let mapping = entity_mapping(&model, "Product").unwrap();

    let rows = vec![
        Row::of_entity("DigitalProduct")
            .set("Id", 1)
            .set("Name", "Manual")
            .set("DownloadUrl", "https://x/m.pdf"),
        Row::of_entity("PhysicalProduct")
            .set("Id", 2)
            .set("Name", "Crate")
            .set("WeightGrams", 1200),
    ];

    let statements = bulk_insert(&mapping, &rows, &options(dialect)).unwrap();
    assert_eq!(statements.len(), 1);
    assert_eq!(statements[0].sql, expected);
}

#[test]
fn test_update_and_delete_against_manifest_model() -> Result<()> {
    let manifest = write_manifest(SHOP_YAML)?;
    let model = ModelConfig::from_yaml_file(manifest.path())?.to_model()?;
    let mapping = entity_mapping(&model, "Product")?;
    let opts = options(SqlDialect::Postgres);

    let rows = vec![Row::new().set("Id", 2).set("Name", "Crate XL")];
    let updates = bulk_update(&mapping, &rows, &opts)?;
    assert_eq!(
        updates[0].sql,
        "UPDATE \"sales\".\"product\" SET \"name\" = 'Crate XL' WHERE \"id\" = 2"
    );

    let keys = vec![vec![SqlValue::Integer(1)], vec![SqlValue::Integer(2)]];
    let deletes = bulk_delete(&mapping, &keys, &opts)?;
    assert_eq!(
        deletes[0].sql,
        "DELETE FROM \"sales\".\"product\" WHERE \"id\" IN (1, 2)"
    );
    Ok(())
}

#[test]
fn test_placeholder_mode_collects_params_in_order() -> Result<()> {
    let model = ModelConfig::from_yaml_str(SHOP_YAML)?.to_model()?;
    let mapping = entity_mapping(&model, "DigitalProduct")?;
    let opts = GeneratorOptions {
        dialect: SqlDialect::MySql,
        batch_size: 1000,
        inline_values: false,
    };

    let rows = vec![Row::new()
        .set("Id", 9)
        .set("Name", "Ebook")
        .set("DownloadUrl", "https://x/e.epub")];
    let statements = bulk_insert(&mapping, &rows, &opts)?;

    assert_eq!(
        statements[0].sql,
        "INSERT INTO `sales`.`product` (`id`, `name`, `download_url`, `weight_grams`, `product_kind`) \
         VALUES (?, ?, ?, ?, ?)"
    );
    assert_eq!(
        statements[0].params,
        vec![
            SqlValue::Integer(9),
            SqlValue::Text("Ebook".into()),
            SqlValue::Text("https://x/e.epub".into()),
            SqlValue::Null,
            SqlValue::Text("digital".into()),
        ]
    );
    Ok(())
}

#[test]
fn test_rows_json_matches_cli_input_format() -> Result<()> {
    let model = ModelConfig::from_yaml_str(SHOP_YAML)?.to_model()?;
    let mapping = entity_mapping(&model, "Product")?;

    let rows_json = r#"[
        {"entity": "DigitalProduct", "values": {"Id": 1, "Name": "Manual", "DownloadUrl": "https://x/m.pdf"}},
        {"values": {"Id": 3, "Name": "Misc"}}
    ]"#;
    let rows: Vec<Row> = serde_json::from_str(rows_json)?;
    let statements = bulk_insert(&mapping, &rows, &options(SqlDialect::Postgres))?;

    // Row without an entity defaults to the mapped entity's discriminator
    assert!(statements[0].sql.contains("(3, 'Misc', NULL, NULL, 'Product')"));
    Ok(())
}
