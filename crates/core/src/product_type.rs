//! Product type registry.
//!
//! Every per-type behavior (input fields, child table, entity construction and
//! row hydration) is bound here, keyed by [`ProductType`]. The rest of the
//! codebase dispatches through a [`TypeBinding`] instead of branching on the
//! type tag, so adding a product type means adding one variant and one
//! registry entry.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::factory;
use crate::product::{AttributeColumns, ProductAttributes};
use crate::validation::{ValidatedFields, INVALID_TYPE};

/// The closed set of product subtypes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductType {
    Dvd,
    Book,
    Furniture,
}

impl ProductType {
    /// Discriminator value stored in `products.type`.
    pub fn as_str(self) -> &'static str {
        match self {
            ProductType::Dvd => "dvd",
            ProductType::Book => "book",
            ProductType::Furniture => "furniture",
        }
    }

    /// The registry entry for this type.
    pub fn binding(self) -> &'static TypeBinding {
        match self {
            ProductType::Dvd => &DVD,
            ProductType::Book => &BOOK,
            ProductType::Furniture => &FURNITURE,
        }
    }
}

impl fmt::Display for ProductType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProductType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        lookup(s).map(|binding| binding.product_type)
    }
}

/// Shape of a type-specific input value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeKind {
    /// Whole number stored as `INTEGER`.
    Integer,
    /// Decimal number stored as `NUMERIC(10,2)`.
    Decimal,
}

/// One type-specific input field.
#[derive(Debug, Clone, Copy)]
pub struct AttributeField {
    /// JSON key and column name.
    pub name: &'static str,
    /// Human-readable name used in error messages.
    pub label: &'static str,
    pub kind: AttributeKind,
}

/// Behavior bundle for one product type.
pub struct TypeBinding {
    pub product_type: ProductType,
    /// Child table holding this type's attributes, keyed by `products.id`.
    pub table: &'static str,
    /// Type-specific input fields, in validation order.
    pub fields: &'static [AttributeField],
    /// Builds typed attributes from validated input.
    pub build: fn(&ValidatedFields) -> Result<ProductAttributes, CoreError>,
    /// Picks this type's attributes out of a joined row. `None` when the
    /// child row is absent.
    pub hydrate: fn(&AttributeColumns) -> Option<ProductAttributes>,
}

impl fmt::Debug for TypeBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeBinding")
            .field("product_type", &self.product_type)
            .field("table", &self.table)
            .field("fields", &self.fields)
            .finish_non_exhaustive()
    }
}

static DVD: TypeBinding = TypeBinding {
    product_type: ProductType::Dvd,
    table: "dvd_products",
    fields: &[AttributeField {
        name: "size",
        label: "Size",
        kind: AttributeKind::Integer,
    }],
    build: factory::build_dvd,
    hydrate: AttributeColumns::dvd,
};

static BOOK: TypeBinding = TypeBinding {
    product_type: ProductType::Book,
    table: "book_products",
    fields: &[AttributeField {
        name: "weight",
        label: "Weight",
        kind: AttributeKind::Decimal,
    }],
    build: factory::build_book,
    hydrate: AttributeColumns::book,
};

static FURNITURE: TypeBinding = TypeBinding {
    product_type: ProductType::Furniture,
    table: "furniture_products",
    fields: &[
        AttributeField {
            name: "height",
            label: "Height",
            kind: AttributeKind::Integer,
        },
        AttributeField {
            name: "width",
            label: "Width",
            kind: AttributeKind::Integer,
        },
        AttributeField {
            name: "length",
            label: "Length",
            kind: AttributeKind::Integer,
        },
    ],
    build: factory::build_furniture,
    hydrate: AttributeColumns::furniture,
};

/// All registered bindings.
pub static REGISTRY: [&TypeBinding; 3] = [&DVD, &BOOK, &FURNITURE];

/// Resolve a type tag to its binding.
///
/// Matching ignores ASCII case and surrounding whitespace. An unknown tag is
/// reported as a validation error on the `type` field.
pub fn lookup(tag: &str) -> Result<&'static TypeBinding, CoreError> {
    let tag = tag.trim();
    REGISTRY
        .iter()
        .copied()
        .find(|binding| binding.product_type.as_str().eq_ignore_ascii_case(tag))
        .ok_or_else(|| CoreError::field("type", INVALID_TYPE))
}
