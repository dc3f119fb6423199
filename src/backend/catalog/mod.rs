//! Catalog Module
//!
//! Read access to businesses and products, and product creation for the
//! caller's own business. Image changes go through `upload`.

pub mod handlers;

pub use handlers::{create_product, get_my_business, get_product, validate_product};
