use catalog_core::types::DbId;

/// Errors raised by the repository layer.
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    /// The SKU is already taken, detected either by the pre-check or by the
    /// `uq_products_sku` constraint.
    #[error("SKU '{0}' already exists")]
    DuplicateSku(String),

    /// A stored discriminator that the type registry does not know.
    #[error("Product {id} has unknown type '{tag}'")]
    UnknownType { id: DbId, tag: String },

    /// The child row for the product's type is absent.
    #[error("Product {id} of type '{product_type}' has no attribute row")]
    MissingAttributes { id: DbId, product_type: String },

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}
