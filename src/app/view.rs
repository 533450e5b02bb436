//! Filter and sort derivation of the displayed product sequence.
//!
//! [`derive`] is a pure function of the product snapshot and the transient
//! criteria (query, sort field, sort direction). It is recomputed whenever any of
//! them change and never stores its output.
//!
//! # Filtering
//!
//! The query is trimmed and lowercased. An empty result means no filtering.
//! Otherwise a product is kept if its id (as decimal text), lowercased name or
//! lowercased description contains the query.
//!
//! # Sorting
//!
//! Each field has a fixed comparison kind in [`sort_kind`]: numeric fields compare
//! by value, text fields compare lowercased text. The sort is stable, so products
//! with equal keys keep their collection order in both directions.

use crate::domain::{Product, ProductField};
use std::cmp::Ordering;
use std::fmt;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        })
    }
}

/// How values of a field are compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKind {
    Numeric,
    Text,
}

/// Comparison kind of each field.
///
/// `category` is free text and sorts as text.
#[must_use]
pub const fn sort_kind(field: ProductField) -> SortKind {
    match field {
        ProductField::Id | ProductField::Price | ProductField::Quantity => SortKind::Numeric,
        ProductField::Name | ProductField::Description | ProductField::Category => SortKind::Text,
    }
}

#[derive(Debug, PartialEq)]
enum SortKey {
    Integer(i64),
    Number(f64),
    Text(String),
}

impl SortKey {
    fn of(product: &Product, field: ProductField) -> Self {
        match sort_kind(field) {
            SortKind::Numeric => match field {
                ProductField::Id => Self::Integer(product.id),
                ProductField::Quantity => Self::Integer(i64::from(product.quantity)),
                _ => Self::Number(product.price),
            },
            SortKind::Text => Self::Text(
                match field {
                    ProductField::Name => &product.name,
                    ProductField::Description => &product.description,
                    _ => &product.category,
                }
                .to_lowercase(),
            ),
        }
    }

    fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Integer(a), Self::Integer(b)) => a.cmp(b),
            (Self::Number(a), Self::Number(b)) => a.total_cmp(b),
            (Self::Text(a), Self::Text(b)) => a.cmp(b),
            // Both keys come from the same field, so variants always agree.
            _ => Ordering::Equal,
        }
    }
}

/// Active sort criteria with the column-toggle policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState {
    pub field: ProductField,
    pub direction: SortDirection,
}

impl Default for SortState {
    fn default() -> Self {
        Self {
            field: ProductField::Id,
            direction: SortDirection::Asc,
        }
    }
}

impl SortState {
    /// Selects `field`: a new field sorts ascending, the active field flips.
    ///
    /// # Examples
    ///
    /// ```
    /// use stocktake::app::view::{SortDirection, SortState};
    /// use stocktake::domain::ProductField;
    ///
    /// let mut sort = SortState::default();
    /// sort.select(ProductField::Price);
    /// assert_eq!(sort.direction, SortDirection::Asc);
    /// sort.select(ProductField::Price);
    /// assert_eq!(sort.direction, SortDirection::Desc);
    /// ```
    pub fn select(&mut self, field: ProductField) {
        if self.field == field {
            self.direction = self.direction.flipped();
        } else {
            self.field = field;
            self.direction = SortDirection::Asc;
        }
        tracing::debug!(field = %self.field, direction = %self.direction, "sort selected");
    }
}

/// Whether `product` matches an already trimmed and lowercased, non-empty `needle`.
fn matches_query(product: &Product, needle: &str) -> bool {
    product.id.to_string().contains(needle)
        || product.name.to_lowercase().contains(needle)
        || product.description.to_lowercase().contains(needle)
}

/// Orders two products by `field` in `direction`.
#[must_use]
pub fn compare(a: &Product, b: &Product, field: ProductField, direction: SortDirection) -> Ordering {
    let ordering = SortKey::of(a, field).compare(&SortKey::of(b, field));
    match direction {
        SortDirection::Asc => ordering,
        SortDirection::Desc => ordering.reverse(),
    }
}

/// Derives the displayed sequence from a product snapshot and view criteria.
///
/// # Examples
///
/// ```
/// use stocktake::app::view::{derive, SortDirection};
/// use stocktake::domain::{Product, ProductField};
///
/// let products = vec![Product::new(1, "Widget", "", 9.99, 5, "tools")];
/// assert_eq!(derive(&products, "wid", ProductField::Price, SortDirection::Asc), products);
/// assert!(derive(&products, "zzz", ProductField::Price, SortDirection::Asc).is_empty());
/// ```
#[must_use]
pub fn derive(
    products: &[Product],
    query: &str,
    field: ProductField,
    direction: SortDirection,
) -> Vec<Product> {
    let _span = tracing::debug_span!("derive_view",
        total_products = products.len(),
        query_len = query.len(),
        %field,
        %direction
    )
    .entered();

    let needle = query.trim().to_lowercase();
    let mut visible: Vec<Product> = if needle.is_empty() {
        products.to_vec()
    } else {
        products
            .iter()
            .filter(|p| matches_query(p, &needle))
            .cloned()
            .collect()
    };

    visible.sort_by(|a, b| compare(a, b, field, direction));

    tracing::debug!(visible_count = visible.len(), "view derived");
    visible
}
