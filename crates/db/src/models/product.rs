//! Joined product row.

use catalog_core::product::{AttributeColumns, Product};
use catalog_core::product_type;
use catalog_core::types::DbId;
use rust_decimal::Decimal;
use sqlx::FromRow;

use crate::error::RepoError;

/// A `products` row left-joined with every attribute table.
///
/// Only the child columns of the row's own type are non-NULL.
#[derive(Debug, Clone, FromRow)]
pub struct ProductRow {
    pub id: DbId,
    pub sku: String,
    pub name: String,
    pub price: Decimal,
    pub product_type: String,
    pub size: Option<i32>,
    pub weight: Option<Decimal>,
    pub height: Option<i32>,
    pub width: Option<i32>,
    pub length: Option<i32>,
}

impl ProductRow {
    /// Hydrate the row into a typed [`Product`] via the type registry.
    ///
    /// An unknown discriminator or a missing child row is an integrity
    /// violation and is returned as an error rather than skipped.
    pub fn into_product(self) -> Result<Product, RepoError> {
        let binding = product_type::lookup(&self.product_type).map_err(|_| RepoError::UnknownType {
            id: self.id,
            tag: self.product_type.clone(),
        })?;

        let columns = AttributeColumns {
            size: self.size,
            weight: self.weight,
            height: self.height,
            width: self.width,
            length: self.length,
        };
        let attributes = (binding.hydrate)(&columns).ok_or_else(|| RepoError::MissingAttributes {
            id: self.id,
            product_type: self.product_type.clone(),
        })?;

        Ok(Product {
            id: self.id,
            sku: self.sku,
            name: self.name,
            price: self.price,
            attributes,
        })
    }
}
