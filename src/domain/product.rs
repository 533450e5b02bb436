//! Product domain model.
//!
//! A [`Product`] is the record persisted by the remote inventory service. Its
//! `id` is supplied by the client on create and is the record's identity from
//! then on. [`ProductField`] names each field so the form, the sort engine and
//! validation errors can all refer to fields without stringly-typed keys.

use super::error::InventoryError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identity of a product. Unique within a collection.
pub type ProductId = i64;

/// A product record as stored by the remote service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    pub quantity: u32,
    #[serde(default)]
    pub category: String,
}

impl Product {
    /// Creates a product from its parts.
    ///
    /// # Examples
    ///
    /// ```
    /// use stocktake::domain::Product;
    ///
    /// let widget = Product::new(1, "Widget", "", 9.99, 5, "tools");
    /// assert_eq!(widget.id, 1);
    /// assert_eq!(widget.category, "tools");
    /// ```
    pub fn new(
        id: ProductId,
        name: impl Into<String>,
        description: impl Into<String>,
        price: f64,
        quantity: u32,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            description: description.into(),
            price,
            quantity,
            category: category.into(),
        }
    }
}

/// The fields of a [`Product`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProductField {
    Id,
    Name,
    Description,
    Price,
    Quantity,
    Category,
}

impl ProductField {
    /// Every field, in column order.
    pub const ALL: [Self; 6] = [
        Self::Id,
        Self::Name,
        Self::Description,
        Self::Price,
        Self::Quantity,
        Self::Category,
    ];

    /// Lowercase wire name of the field.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Name => "name",
            Self::Description => "description",
            Self::Price => "price",
            Self::Quantity => "quantity",
            Self::Category => "category",
        }
    }

    /// Column heading used by the view model.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Id => "ID",
            Self::Name => "Name",
            Self::Description => "Description",
            Self::Price => "Price",
            Self::Quantity => "Quantity",
            Self::Category => "Category",
        }
    }
}

impl fmt::Display for ProductField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProductField {
    type Err = InventoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|field| field.as_str() == wanted)
            .ok_or_else(|| InventoryError::Config(format!("unknown product field: {s}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_parses_case_insensitively() {
        assert_eq!("Price".parse::<ProductField>().ok(), Some(ProductField::Price));
        assert_eq!(" quantity ".parse::<ProductField>().ok(), Some(ProductField::Quantity));
        assert!("colour".parse::<ProductField>().is_err());
    }

    #[test]
    fn product_deserializes_without_optional_text() {
        let json = r#"{"id":5,"name":"Pen","price":1.99,"quantity":100}"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product, Product::new(5, "Pen", "", 1.99, 100, ""));
    }
}
