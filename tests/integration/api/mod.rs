//! API integration tests
//!
//! Integration tests for all API endpoints

mod catalog_test;
mod upload_test;
