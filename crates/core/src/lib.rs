//! Domain layer of the product catalog.
//!
//! Holds the product type registry, input validation, the entity factory and
//! the entity types themselves. Nothing in this crate performs I/O.

pub mod error;
pub mod factory;
pub mod product;
pub mod product_type;
pub mod types;
pub mod validation;
