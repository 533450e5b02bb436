//! Remote authority abstraction.
//!
//! This module defines the [`ProductRemote`] trait that abstracts over the service
//! owning the product records. The store only ever talks to this trait, so the
//! HTTP client and the in-memory authority are interchangeable.
//!
//! The trait is minimal and maps one method to each remote endpoint:
//!
//! | Method   | Endpoint               |
//! |----------|------------------------|
//! | `list`   | `GET /products`        |
//! | `create` | `POST /products`       |
//! | `update` | `PUT /products/{id}`   |
//! | `delete` | `DELETE /products/{id}`|

use crate::domain::{Product, ProductId, Result};
use futures_util::future::BoxFuture;

/// Abstraction over the remote product service.
///
/// Methods return boxed futures so the trait stays object safe and a
/// `Box<dyn ProductRemote>` can be injected where generics are inconvenient.
///
/// # Implementations
///
/// - [`HttpRemote`](crate::remote::HttpRemote): JSON over HTTP (default)
/// - [`MemoryRemote`](crate::remote::MemoryRemote): in-process authority
pub trait ProductRemote: Send + Sync {
    /// Fetches every product.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryError::Network`](crate::domain::InventoryError::Network)
    /// if the request fails or the body cannot be decoded.
    fn list(&self) -> BoxFuture<'_, Result<Vec<Product>>>;

    /// Creates a product and returns the record as stored by the service.
    ///
    /// # Errors
    ///
    /// Returns a network error if the service rejects or never answers the request.
    fn create<'a>(&'a self, product: &'a Product) -> BoxFuture<'a, Result<Product>>;

    /// Replaces the product stored under `id` and returns the stored record.
    ///
    /// # Errors
    ///
    /// Returns a network error if the service rejects or never answers the request.
    fn update<'a>(&'a self, id: ProductId, product: &'a Product) -> BoxFuture<'a, Result<Product>>;

    /// Deletes the product stored under `id`.
    ///
    /// # Errors
    ///
    /// Returns a network error if the service rejects or never answers the request.
    fn delete(&self, id: ProductId) -> BoxFuture<'_, Result<()>>;
}

impl<T: ProductRemote + ?Sized> ProductRemote for Box<T> {
    fn list(&self) -> BoxFuture<'_, Result<Vec<Product>>> {
        (**self).list()
    }

    fn create<'a>(&'a self, product: &'a Product) -> BoxFuture<'a, Result<Product>> {
        (**self).create(product)
    }

    fn update<'a>(&'a self, id: ProductId, product: &'a Product) -> BoxFuture<'a, Result<Product>> {
        (**self).update(id, product)
    }

    fn delete(&self, id: ProductId) -> BoxFuture<'_, Result<()>> {
        (**self).delete(id)
    }
}
