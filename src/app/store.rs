//! Local product cache synchronized with the remote authority.
//!
//! [`ProductStore`] exclusively owns the known copy of the product collection.
//! Every mutation happens only after the remote call resolves: the record the
//! service returns is merged straight into the collection (no re-fetch), and a
//! failed call leaves the collection exactly as it was.
//!
//! # Outcomes
//!
//! | Operation | Success                                   | Failure                              |
//! |-----------|-------------------------------------------|--------------------------------------|
//! | `load`    | replace collection, clear inline message  | inline error, collection untouched   |
//! | `create`  | insert at front, success toast            | error toast (server detail if any)   |
//! | `update`  | replace matching entry, success toast     | error toast (server detail if any)   |
//! | `delete`  | remove matching entry, success toast      | inline error (server detail if any)  |
//!
//! Errors are logged and turned into messages here, then returned so the
//! caller can decide whether to proceed (e.g. reset the form).
//!
//! # Busy flag
//!
//! Each operation holds a [`BusyFlag`] guard for its duration. The guard is
//! released on drop, so cancelling an operation by dropping its future also
//! clears the flag. Overlapping operations are not queued; preventing them is
//! the caller's job.

use crate::domain::{InventoryError, Product, ProductId, Result};
use crate::notify::{Channel, Notifier};
use crate::remote::ProductRemote;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

const FETCH_FAILED: &str = "Failed to fetch products";
const OPERATION_FAILED: &str = "Operation failed";
const DELETE_FAILED: &str = "Delete failed";
const CREATED: &str = "Product created successfully";
const UPDATED: &str = "Product updated successfully";
const DELETED: &str = "Product deleted successfully";

/// User answer to a destructive-action prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Affirmed,
    Declined,
}

impl From<bool> for Confirmation {
    fn from(affirmed: bool) -> Self {
        if affirmed {
            Self::Affirmed
        } else {
            Self::Declined
        }
    }
}

/// Observable count of in-flight remote operations. Clones share the count.
#[derive(Debug, Clone, Default)]
pub struct BusyFlag(Arc<AtomicUsize>);

impl BusyFlag {
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.0.load(Ordering::SeqCst) > 0
    }

    fn hold(&self) -> BusyGuard {
        self.0.fetch_add(1, Ordering::SeqCst);
        BusyGuard(Arc::clone(&self.0))
    }
}

struct BusyGuard(Arc<AtomicUsize>);

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Optimistic cache of the product collection.
#[derive(Debug)]
pub struct ProductStore<R> {
    remote: R,
    products: Vec<Product>,
    notifier: Notifier,
    busy: BusyFlag,
}

impl<R: ProductRemote> ProductStore<R> {
    /// Creates an empty store over `remote`, reporting outcomes to `notifier`.
    pub fn new(remote: R, notifier: Notifier) -> Self {
        Self {
            remote,
            products: Vec::new(),
            notifier,
            busy: BusyFlag::default(),
        }
    }

    /// The collection as currently known. Order is insertion order, not display order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.busy.is_busy()
    }

    /// Shared handle to the busy flag, observable while an operation is pending.
    #[must_use]
    pub fn busy_flag(&self) -> BusyFlag {
        self.busy.clone()
    }

    #[must_use]
    pub const fn remote(&self) -> &R {
        &self.remote
    }

    #[must_use]
    pub const fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    /// Replaces the collection with the authority's.
    ///
    /// Returns the number of products loaded.
    ///
    /// # Errors
    ///
    /// Returns the network error after raising an inline error message. The
    /// collection is left untouched.
    #[tracing::instrument(level = "debug", name = "store_load", skip(self), fields(known = self.products.len()))]
    pub async fn load(&mut self) -> Result<usize> {
        let _busy = self.busy.hold();

        match self.remote.list().await {
            Ok(products) => {
                self.products = products;
                dedup_by_id(&mut self.products);
                let count = self.products.len();
                self.notifier.clear(Channel::Inline);
                tracing::debug!(count, "products loaded");
                Ok(count)
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to fetch products");
                self.notifier.error(Channel::Inline, FETCH_FAILED);
                Err(e)
            }
        }
    }

    /// Creates `product` remotely and puts the stored record at the front.
    ///
    /// # Errors
    ///
    /// Returns the network error after raising an error toast. The collection
    /// is left untouched.
    #[tracing::instrument(level = "debug", name = "store_create", skip(self, product), fields(id = product.id))]
    pub async fn create(&mut self, product: &Product) -> Result<Product> {
        let _busy = self.busy.hold();

        match self.remote.create(product).await {
            Ok(created) => {
                merge_created(&mut self.products, created.clone());
                self.notifier.success(Channel::Toast, CREATED);
                tracing::debug!(id = created.id, total = self.products.len(), "product created");
                Ok(created)
            }
            Err(e) => Err(self.report(e, Channel::Toast, OPERATION_FAILED, "create")),
        }
    }

    /// Updates the product stored under `id` and swaps in the stored record.
    ///
    /// # Errors
    ///
    /// Returns the network error after raising an error toast. The collection
    /// is left untouched.
    #[tracing::instrument(level = "debug", name = "store_update", skip(self, product))]
    pub async fn update(&mut self, id: ProductId, product: &Product) -> Result<Product> {
        let _busy = self.busy.hold();

        match self.remote.update(id, product).await {
            Ok(updated) => {
                if !merge_updated(&mut self.products, id, updated.clone()) {
                    tracing::warn!(id, "updated product is no longer in the collection");
                }
                self.notifier.success(Channel::Toast, UPDATED);
                tracing::debug!(id, "product updated");
                Ok(updated)
            }
            Err(e) => Err(self.report(e, Channel::Toast, OPERATION_FAILED, "update")),
        }
    }

    /// Deletes the product stored under `id`.
    ///
    /// No remote call is made unless `confirmation` is affirmative.
    ///
    /// # Errors
    ///
    /// - [`InventoryError::ConfirmationDeclined`] without any message if declined
    /// - the network error, after raising an inline error, if the call fails
    #[tracing::instrument(level = "debug", name = "store_delete", skip(self))]
    pub async fn delete(&mut self, id: ProductId, confirmation: Confirmation) -> Result<()> {
        if confirmation == Confirmation::Declined {
            tracing::debug!(id, "delete declined");
            return Err(InventoryError::ConfirmationDeclined);
        }

        let _busy = self.busy.hold();
        self.notifier.clear(Channel::Inline);

        match self.remote.delete(id).await {
            Ok(()) => {
                self.products.retain(|p| p.id != id);
                self.notifier.success(Channel::Toast, DELETED);
                tracing::debug!(id, total = self.products.len(), "product deleted");
                Ok(())
            }
            Err(e) => Err(self.report(e, Channel::Inline, DELETE_FAILED, "delete")),
        }
    }

    fn report(&self, err: InventoryError, channel: Channel, fallback: &str, operation: &str) -> InventoryError {
        tracing::error!(operation, error = %err, "remote operation failed");
        self.notifier.error(channel, err.user_message(fallback));
        err
    }
}

/// Puts `created` at the front, dropping any stale entry with the same id.
fn merge_created(products: &mut Vec<Product>, created: Product) {
    products.retain(|p| p.id != created.id);
    products.insert(0, created);
}

/// Replaces the entry stored under `id` with `updated`, in place.
///
/// Returns `false` if no entry has `id`. If the service changed the id, any
/// other entry already holding the new id is dropped.
fn merge_updated(products: &mut Vec<Product>, id: ProductId, updated: Product) -> bool {
    let Some(index) = products.iter().position(|p| p.id == id) else {
        return false;
    };

    let new_id = updated.id;
    products[index] = updated;

    if new_id != id {
        let mut position = 0;
        products.retain(|p| {
            let keep = position == index || p.id != new_id;
            position += 1;
            keep
        });
    }
    true
}

/// Keeps the first occurrence of each id.
fn dedup_by_id(products: &mut Vec<Product>) {
    let mut seen = std::collections::HashSet::new();
    let before = products.len();
    products.retain(|p| seen.insert(p.id));
    if products.len() != before {
        tracing::warn!(dropped = before - products.len(), "duplicate ids in fetched products");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote::{MemoryRemote, RemoteCall};

    fn widget() -> Product {
        Product::new(1, "Widget", "", 9.99, 5, "tools")
    }

    fn gadget() -> Product {
        Product::new(2, "Gadget", "Shiny", 19.5, 3, "toys")
    }

    async fn loaded(products: Vec<Product>) -> (ProductStore<MemoryRemote>, MemoryRemote) {
        let remote = MemoryRemote::with_products(products);
        let mut store = ProductStore::new(remote.clone(), Notifier::default());
        store.load().await.unwrap();
        (store, remote)
    }

    #[tokio::test]
    async fn load_replaces_collection() {
        let (store, _) = loaded(vec![widget(), gadget()]).await;
        assert_eq!(store.products(), &[widget(), gadget()]);
        assert!(!store.is_busy());
    }

    #[tokio::test]
    async fn failed_load_keeps_previous_state() {
        let (mut store, remote) = loaded(vec![widget()]).await;
        remote.fail_next(None);

        assert!(store.load().await.is_err());
        assert_eq!(store.products(), &[widget()]);
        let message = store.notifier().current(Channel::Inline).unwrap();
        assert_eq!(message.text, FETCH_FAILED);
    }

    #[tokio::test]
    async fn create_puts_server_record_first() {
        let (mut store, _) = loaded(vec![widget()]).await;
        let created = store.create(&gadget()).await.unwrap();

        assert_eq!(created, gadget());
        assert_eq!(store.products(), &[gadget(), widget()]);
        assert_eq!(store.notifier().current(Channel::Toast).unwrap().text, CREATED);
    }

    #[tokio::test]
    async fn failed_create_surfaces_server_detail() {
        let (mut store, _) = loaded(vec![widget()]).await;
        let err = store.create(&widget()).await.unwrap_err();

        assert!(matches!(err, InventoryError::Network { .. }));
        assert_eq!(store.products(), &[widget()]);
        assert_eq!(
            store.notifier().current(Channel::Toast).unwrap().text,
            "Product with id 1 already exists"
        );
    }

    #[tokio::test]
    async fn failed_update_without_detail_uses_generic_text() {
        let (mut store, remote) = loaded(vec![widget(), gadget()]).await;
        remote.fail_next(None);

        let mut edited = gadget();
        edited.price = 1.0;
        assert!(store.update(2, &edited).await.is_err());
        assert_eq!(store.products(), &[widget(), gadget()]);
        assert_eq!(store.notifier().current(Channel::Toast).unwrap().text, OPERATION_FAILED);
    }

    #[tokio::test]
    async fn update_replaces_in_place_with_server_record() {
        let (mut store, _) = loaded(vec![widget(), gadget(), Product::new(3, "Bolt", "", 0.1, 900, "tools")]).await;
        let mut edited = gadget();
        edited.quantity = 42;

        let updated = store.update(2, &edited).await.unwrap();
        assert_eq!(updated.quantity, 42);
        assert_eq!(
            store.products().iter().map(|p| (p.id, p.quantity)).collect::<Vec<_>>(),
            vec![(1, 5), (2, 42), (3, 900)]
        );
    }

    #[tokio::test]
    async fn declined_delete_never_reaches_remote() {
        let (mut store, remote) = loaded(vec![widget()]).await;
        let err = store.delete(1, Confirmation::Declined).await.unwrap_err();

        assert!(err.is_declined());
        assert_eq!(store.products(), &[widget()]);
        assert_eq!(remote.calls(), vec![RemoteCall::List]);
        assert!(store.notifier().current(Channel::Inline).is_none());
        assert!(store.notifier().current(Channel::Toast).is_none());
    }

    #[tokio::test]
    async fn confirmed_delete_removes_only_that_entry() {
        let (mut store, _) = loaded(vec![widget(), gadget()]).await;
        store.delete(1, Confirmation::Affirmed).await.unwrap();

        assert_eq!(store.products(), &[gadget()]);
        assert_eq!(store.notifier().current(Channel::Toast).unwrap().text, DELETED);
    }

    #[tokio::test]
    async fn failed_delete_reports_inline() {
        let (mut store, remote) = loaded(vec![widget()]).await;
        remote.fail_next(None);

        assert!(store.delete(1, true.into()).await.is_err());
        assert_eq!(store.products(), &[widget()]);
        assert_eq!(store.notifier().current(Channel::Inline).unwrap().text, DELETE_FAILED);
    }

    #[test]
    fn merge_created_keeps_ids_unique() {
        let mut products = vec![widget(), gadget()];
        let mut replacement = gadget();
        replacement.name = "Gadget v2".into();

        merge_created(&mut products, replacement.clone());
        assert_eq!(products, vec![replacement, widget()]);
    }

    #[test]
    fn merge_updated_handles_changed_id() {
        let mut products = vec![widget(), gadget()];
        let mut renumbered = widget();
        renumbered.id = 2;

        assert!(merge_updated(&mut products, 1, renumbered.clone()));
        assert_eq!(products, vec![renumbered]);
    }

    #[test]
    fn merge_updated_ignores_unknown_id() {
        let mut products = vec![widget()];
        assert!(!merge_updated(&mut products, 9, gadget()));
        assert_eq!(products, vec![widget()]);
    }

    #[test]
    fn busy_flag_released_on_drop() {
        let flag = BusyFlag::default();
        let guard = flag.hold();
        assert!(flag.is_busy());
        drop(guard);
        assert!(!flag.is_busy());
    }
}
