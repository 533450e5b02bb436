//! In-process remote authority.
//!
//! [`MemoryRemote`] behaves like the inventory service without a network: it keeps
//! records keyed by id, rejects duplicate creates and updates of unknown ids, and
//! answers deletes of unknown ids successfully (the service does the same).
//!
//! Failures can be injected with [`MemoryRemote::fail_next`], and every call is
//! recorded so callers can assert on what actually reached the authority.
//! Clones share state.

use crate::domain::{InventoryError, Product, ProductId, Result};
use crate::remote::backend::ProductRemote;
use futures_util::future::{self, BoxFuture};
use futures_util::FutureExt;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// A call that reached the authority.
#[derive(Debug, Clone, PartialEq)]
pub enum RemoteCall {
    List,
    Create(Product),
    Update(ProductId, Product),
    Delete(ProductId),
}

#[derive(Debug, Default)]
struct MemoryData {
    products: Vec<Product>,
    calls: Vec<RemoteCall>,
    failures: VecDeque<InventoryError>,
}

/// In-memory implementation of [`ProductRemote`].
#[derive(Debug, Clone, Default)]
pub struct MemoryRemote {
    data: Arc<Mutex<MemoryData>>,
}

impl MemoryRemote {
    /// Creates an empty authority.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an authority seeded with `products`.
    #[must_use]
    pub fn with_products(products: Vec<Product>) -> Self {
        let remote = Self::default();
        remote.lock().products = products;
        remote
    }

    /// Makes the next call fail with a network error carrying `detail`.
    ///
    /// Queued failures are consumed in order, one per call.
    pub fn fail_next(&self, detail: Option<&str>) {
        self.lock().failures.push_back(InventoryError::network(
            Some(500),
            detail.map(String::from),
            "injected failure",
        ));
    }

    /// Snapshot of the records held by the authority.
    #[must_use]
    pub fn products(&self) -> Vec<Product> {
        self.lock().products.clone()
    }

    /// Every call received so far, oldest first.
    #[must_use]
    pub fn calls(&self) -> Vec<RemoteCall> {
        self.lock().calls.clone()
    }

    fn lock(&self) -> MutexGuard<'_, MemoryData> {
        self.data.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn handle(&self, call: RemoteCall) -> Result<Option<Product>> {
        let mut data = self.lock();
        data.calls.push(call.clone());

        if let Some(err) = data.failures.pop_front() {
            tracing::debug!(?call, "injected remote failure");
            return Err(err);
        }

        match call {
            RemoteCall::List => Ok(None),
            RemoteCall::Create(product) => {
                if data.products.iter().any(|p| p.id == product.id) {
                    return Err(InventoryError::network(
                        Some(400),
                        Some(format!("Product with id {} already exists", product.id)),
                        "duplicate id",
                    ));
                }
                data.products.push(product.clone());
                Ok(Some(product))
            }
            RemoteCall::Update(id, product) => {
                let Some(slot) = data.products.iter_mut().find(|p| p.id == id) else {
                    return Err(InventoryError::network(
                        Some(404),
                        Some("Product not found".to_string()),
                        format!("no product {id}"),
                    ));
                };
                *slot = Product { id, ..product };
                Ok(Some(slot.clone()))
            }
            RemoteCall::Delete(id) => {
                data.products.retain(|p| p.id != id);
                Ok(None)
            }
        }
    }

    fn stored(result: Result<Option<Product>>) -> Result<Product> {
        result?.ok_or_else(|| InventoryError::network(None, None, "authority returned no record"))
    }
}

impl ProductRemote for MemoryRemote {
    fn list(&self) -> BoxFuture<'_, Result<Vec<Product>>> {
        let result = self.handle(RemoteCall::List).map(|_| self.products());
        future::ready(result).boxed()
    }

    fn create<'a>(&'a self, product: &'a Product) -> BoxFuture<'a, Result<Product>> {
        let result = Self::stored(self.handle(RemoteCall::Create(product.clone())));
        future::ready(result).boxed()
    }

    fn update<'a>(&'a self, id: ProductId, product: &'a Product) -> BoxFuture<'a, Result<Product>> {
        let result = Self::stored(self.handle(RemoteCall::Update(id, product.clone())));
        future::ready(result).boxed()
    }

    fn delete(&self, id: ProductId) -> BoxFuture<'_, Result<()>> {
        let result = self.handle(RemoteCall::Delete(id)).map(|_| ());
        future::ready(result).boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn widget() -> Product {
        Product::new(1, "Widget", "", 9.99, 5, "tools")
    }

    #[tokio::test]
    async fn create_rejects_duplicate_ids() {
        let remote = MemoryRemote::with_products(vec![widget()]);
        let err = remote.create(&widget()).await.unwrap_err();
        assert_eq!(err.user_message("x"), "Product with id 1 already exists");
    }

    #[tokio::test]
    async fn update_keeps_path_id() {
        let remote = MemoryRemote::with_products(vec![widget()]);
        let mut edited = widget();
        edited.id = 99;
        edited.quantity = 7;

        let stored = remote.update(1, &edited).await.unwrap();
        assert_eq!(stored.id, 1);
        assert_eq!(stored.quantity, 7);
    }

    #[tokio::test]
    async fn injected_failure_is_consumed_once() {
        let remote = MemoryRemote::with_products(vec![widget()]);
        remote.fail_next(Some("maintenance"));

        assert!(remote.list().await.is_err());
        assert_eq!(remote.list().await.unwrap(), vec![widget()]);
        assert_eq!(remote.calls(), vec![RemoteCall::List, RemoteCall::List]);
    }
}
