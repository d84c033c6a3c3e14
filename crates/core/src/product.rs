//! Product entities.

use rust_decimal::Decimal;
use serde::{Serialize, Serializer};

use crate::product_type::{ProductType, TypeBinding};
use crate::types::DbId;

/// Type-specific attributes. Exactly one variant per [`ProductType`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ProductAttributes {
    /// Disc size in megabytes.
    Dvd { size: i32 },
    /// Weight in kilograms.
    Book { weight: Decimal },
    Furniture { height: i32, width: i32, length: i32 },
}

/// A single attribute value as written to a child table column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeValue {
    Integer(i32),
    Decimal(Decimal),
}

impl AttributeValue {
    fn is_negative(self) -> bool {
        match self {
            AttributeValue::Integer(n) => n < 0,
            AttributeValue::Decimal(d) => d.is_sign_negative() && !d.is_zero(),
        }
    }
}

impl ProductAttributes {
    pub fn product_type(&self) -> ProductType {
        match self {
            ProductAttributes::Dvd { .. } => ProductType::Dvd,
            ProductAttributes::Book { .. } => ProductType::Book,
            ProductAttributes::Furniture { .. } => ProductType::Furniture,
        }
    }

    pub fn binding(&self) -> &'static TypeBinding {
        self.product_type().binding()
    }

    /// Column/value pairs for the child table row, in registry field order.
    pub fn values(&self) -> Vec<(&'static str, AttributeValue)> {
        match *self {
            ProductAttributes::Dvd { size } => vec![("size", AttributeValue::Integer(size))],
            ProductAttributes::Book { weight } => vec![("weight", AttributeValue::Decimal(weight))],
            ProductAttributes::Furniture {
                height,
                width,
                length,
            } => vec![
                ("height", AttributeValue::Integer(height)),
                ("width", AttributeValue::Integer(width)),
                ("length", AttributeValue::Integer(length)),
            ],
        }
    }

    /// Name of the first negative attribute, if any.
    pub fn first_negative(&self) -> Option<&'static str> {
        self.values()
            .into_iter()
            .find(|(_, value)| value.is_negative())
            .map(|(name, _)| name)
    }

    /// Human-readable summary shown in listings.
    pub fn specific_attribute(&self) -> String {
        match self {
            ProductAttributes::Dvd { size } => format!("Size: {size} MB"),
            ProductAttributes::Book { weight } => format!("Weight: {} KG", weight.normalize()),
            ProductAttributes::Furniture {
                height,
                width,
                length,
            } => format!("Dimension: {height}x{width}x{length}"),
        }
    }
}

/// A product that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    pub sku: String,
    pub name: String,
    pub price: Decimal,
    pub attributes: ProductAttributes,
}

impl NewProduct {
    pub fn product_type(&self) -> ProductType {
        self.attributes.product_type()
    }
}

/// A persisted product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub id: DbId,
    pub sku: String,
    pub name: String,
    pub price: Decimal,
    pub attributes: ProductAttributes,
}

impl Product {
    pub fn from_new(id: DbId, product: NewProduct) -> Self {
        Self {
            id,
            sku: product.sku,
            name: product.name,
            price: product.price,
            attributes: product.attributes,
        }
    }

    pub fn product_type(&self) -> ProductType {
        self.attributes.product_type()
    }

    pub fn specific_attribute(&self) -> String {
        self.attributes.specific_attribute()
    }
}

/// JSON shape of a product: common fields, the `type` tag, the raw
/// type-specific fields and the rendered `specific_attribute`.
#[derive(Serialize)]
struct ProductView<'a> {
    id: DbId,
    sku: &'a str,
    name: &'a str,
    price: Decimal,
    #[serde(flatten)]
    attributes: &'a ProductAttributes,
    specific_attribute: String,
}

impl Serialize for Product {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        ProductView {
            id: self.id,
            sku: &self.sku,
            name: &self.name,
            price: self.price,
            attributes: &self.attributes,
            specific_attribute: self.specific_attribute(),
        }
        .serialize(serializer)
    }
}

/// Child-table columns of a row joined across every attribute table.
///
/// Only the columns of the row's own type are populated; the others are NULL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeColumns {
    pub size: Option<i32>,
    pub weight: Option<Decimal>,
    pub height: Option<i32>,
    pub width: Option<i32>,
    pub length: Option<i32>,
}

impl AttributeColumns {
    pub(crate) fn dvd(&self) -> Option<ProductAttributes> {
        Some(ProductAttributes::Dvd { size: self.size? })
    }

    pub(crate) fn book(&self) -> Option<ProductAttributes> {
        Some(ProductAttributes::Book {
            weight: self.weight?,
        })
    }

    pub(crate) fn furniture(&self) -> Option<ProductAttributes> {
        Some(ProductAttributes::Furniture {
            height: self.height?,
            width: self.width?,
            length: self.length?,
        })
    }
}
