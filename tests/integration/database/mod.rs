//! Database integration tests
//!
//! These need a PostgreSQL instance at `DATABASE_URL`:
//! `cargo test -- --ignored`
