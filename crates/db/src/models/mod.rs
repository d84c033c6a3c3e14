//! Database row structs.
//!
//! Rows are mapped with `FromRow` and converted into `catalog_core` entities
//! before leaving this crate.

pub mod product;
