//! Integration tests - Manifest files on disk through to generated SQL.

mod end_to_end_tests;
