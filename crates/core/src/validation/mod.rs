//! Input validation for product creation.
//!
//! Common fields are checked first, then the type-specific fields declared by
//! the product's [`TypeBinding`](crate::product_type::TypeBinding). Every
//! violation is collected (one message per field) rather than failing on the
//! first one. Pure logic, no database access.

mod errors;
mod fields;

use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde_json::{Map, Value};

pub use errors::ValidationErrors;
pub use fields::{MAX_DECIMAL, MAX_TEXT_LEN};

use crate::error::CoreError;
use crate::product::AttributeValue;
use crate::product_type::{self, AttributeKind, ProductType};

pub const REQUIRED: &str = "Please, submit required data";
pub const WRONG_TYPE: &str = "Please, provide the data of indicated type";
pub const INVALID_TYPE: &str = "Invalid product type specified";

/// Input that passed validation, ready for the factory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedFields {
    pub product_type: ProductType,
    pub sku: String,
    pub name: String,
    pub price: Decimal,
    /// Type-specific values keyed by field name, in registry order.
    pub attributes: IndexMap<&'static str, AttributeValue>,
}

impl ValidatedFields {
    /// A validated integer attribute. Absence means the caller skipped
    /// validation, which is reported as an internal error.
    pub fn integer(&self, name: &str) -> Result<i32, CoreError> {
        match self.attributes.get(name) {
            Some(AttributeValue::Integer(n)) => Ok(*n),
            _ => Err(self.missing(name)),
        }
    }

    /// A validated decimal attribute.
    pub fn decimal(&self, name: &str) -> Result<Decimal, CoreError> {
        match self.attributes.get(name) {
            Some(AttributeValue::Decimal(d)) => Ok(*d),
            _ => Err(self.missing(name)),
        }
    }

    fn missing(&self, name: &str) -> CoreError {
        CoreError::Internal(format!(
            "validated {} input has no attribute '{name}'",
            self.product_type
        ))
    }
}

/// Validate a raw create payload, reading the type tag from its `type` field.
pub fn validate_product(raw: &Map<String, Value>) -> Result<ValidatedFields, CoreError> {
    let tag = match raw.get("type") {
        None | Some(Value::Null) => return Err(CoreError::field("type", REQUIRED)),
        Some(Value::String(s)) if s.trim().is_empty() => {
            return Err(CoreError::field("type", REQUIRED))
        }
        Some(Value::String(s)) => s.as_str(),
        Some(_) => return Err(CoreError::field("type", INVALID_TYPE)),
    };
    validate(raw, tag)
}

/// Validate a raw payload against the rules for `type_tag`.
///
/// An empty or unknown tag fails immediately with a single `type` error.
pub fn validate(raw: &Map<String, Value>, type_tag: &str) -> Result<ValidatedFields, CoreError> {
    if type_tag.trim().is_empty() {
        return Err(CoreError::field("type", REQUIRED));
    }
    let binding = product_type::lookup(type_tag)?;
    let mut errors = ValidationErrors::default();

    let sku = fields::text(raw.get("sku")).map_err(|v| errors.add("sku", v.message("Sku")));
    let name = fields::text(raw.get("name")).map_err(|v| errors.add("name", v.message("Name")));
    let price =
        fields::decimal(raw.get("price")).map_err(|v| errors.add("price", v.message("Price")));

    let mut attributes = IndexMap::with_capacity(binding.fields.len());
    for field in binding.fields {
        let value = raw.get(field.name);
        let checked = match field.kind {
            AttributeKind::Integer => fields::integer(value).map(AttributeValue::Integer),
            AttributeKind::Decimal => fields::decimal(value).map(AttributeValue::Decimal),
        };
        match checked {
            Ok(v) => {
                attributes.insert(field.name, v);
            }
            Err(v) => errors.add(field.name, v.message(field.label)),
        }
    }

    match (sku, name, price) {
        (Ok(sku), Ok(name), Ok(price)) if errors.is_empty() => Ok(ValidatedFields {
            product_type: binding.product_type,
            sku,
            name,
            price,
            attributes,
        }),
        _ => Err(CoreError::Validation(errors)),
    }
}
