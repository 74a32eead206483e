//! BulkBridge - bulk SQL bridge for mapped entity models
//!
//! This crate translates an in-memory entity model into bulk DML through:
//! - Entity model declarations (builder API or YAML manifests)
//! - Mapping extraction (table, columns, keys, inheritance discriminators)
//! - Batched INSERT/UPDATE/DELETE generation for Postgres and MySQL

pub mod config;
pub mod entity_model;
pub mod mapping;
pub mod sql_generator;
