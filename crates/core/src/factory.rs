//! Builds product entities from validated input.
//!
//! [`build`] dispatches through the type registry; the per-type constructors
//! below are only reachable via their [`TypeBinding`](crate::product_type::TypeBinding).

use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::CoreError;
use crate::product::{NewProduct, ProductAttributes};
use crate::validation::ValidatedFields;

/// Fractional digits kept by the `NUMERIC(10, 2)` columns.
pub const DECIMAL_SCALE: u32 = 2;

/// Round the way PostgreSQL does when storing into a `NUMERIC(_, 2)` column.
pub(crate) fn to_column_scale(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// Construct a [`NewProduct`] from validated fields.
///
/// Input is trusted to have passed validation. A negative price or attribute
/// here means the caller skipped validation and is reported as
/// [`CoreError::Internal`].
pub fn build(fields: &ValidatedFields) -> Result<NewProduct, CoreError> {
    let binding = fields.product_type.binding();
    let attributes = (binding.build)(fields)?;

    if fields.price < Decimal::ZERO {
        return Err(CoreError::Internal(format!(
            "negative price reached the {} factory",
            binding.product_type
        )));
    }
    if let Some(name) = attributes.first_negative() {
        return Err(CoreError::Internal(format!(
            "negative {name} reached the {} factory",
            binding.product_type
        )));
    }

    Ok(NewProduct {
        sku: fields.sku.clone(),
        name: fields.name.clone(),
        price: to_column_scale(fields.price),
        attributes,
    })
}

pub(crate) fn build_dvd(fields: &ValidatedFields) -> Result<ProductAttributes, CoreError> {
    Ok(ProductAttributes::Dvd {
        size: fields.integer("size")?,
    })
}

pub(crate) fn build_book(fields: &ValidatedFields) -> Result<ProductAttributes, CoreError> {
    Ok(ProductAttributes::Book {
        weight: to_column_scale(fields.decimal("weight")?),
    })
}

pub(crate) fn build_furniture(fields: &ValidatedFields) -> Result<ProductAttributes, CoreError> {
    Ok(ProductAttributes::Furniture {
        height: fields.integer("height")?,
        width: fields.integer("width")?,
        length: fields.integer("length")?,
    })
}
