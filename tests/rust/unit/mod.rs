//! Unit tests - Focused tests of the public API, no filesystem involved.

mod manifest_tests;
mod mapping_serialization_tests;
