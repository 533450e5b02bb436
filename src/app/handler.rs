//! Event handling and state transition logic.
//!
//! This module translates user and host events into store, form and view
//! criteria changes. It is the only place that decides *which* component an
//! interaction reaches.
//!
//! # Architecture
//!
//! 1. The host turns input into an [`Event`]
//! 2. [`handle_event`] mutates [`App`] (awaiting the remote where needed)
//! 3. The host re-renders if asked and carries out the returned [`Action`]s
//!
//! Remote failures never surface here: the store has already turned them into
//! messages, so every event resolves to `Ok`.
//!
//! # Example
//!
//! ```rust
//! use stocktake::app::{handle_event, App, Event};
//! use stocktake::domain::ProductField;
//! use stocktake::notify::Notifier;
//! use stocktake::remote::MemoryRemote;
//!
//! # tokio_test_block(async {
//! let mut app = App::new(MemoryRemote::new(), Notifier::default());
//! let (render, actions) = handle_event(&mut app, Event::SortBy(ProductField::Price)).await?;
//! assert!(render);
//! assert!(actions.is_empty());
//! # Ok::<(), stocktake::InventoryError>(())
//! # });
//! # fn tokio_test_block<F: std::future::Future>(f: F) -> F::Output {
//! #     tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap().block_on(f)
//! # }
//! ```

use super::actions::Action;
use super::state::App;
use super::store::Confirmation;
use crate::domain::{ProductField, ProductId, Result};
use crate::remote::ProductRemote;

/// Events triggered by user input or by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Reloads the whole collection from the remote service.
    Refresh,
    /// Replaces the search text.
    QueryChanged(String),
    /// Sorts by a column (same column flips direction).
    SortBy(ProductField),
    /// Loads a product into the form for editing.
    Edit(ProductId),
    /// Updates one raw form field.
    FieldChanged {
        field: ProductField,
        value: String,
    },
    /// Abandons the current edit.
    CancelEdit,
    /// Submits the form (create or update depending on mode).
    Submit,
    /// Starts deleting a product; answered by a confirmation prompt.
    RequestDelete(ProductId),
    /// The user confirmed the delete prompt.
    DeleteConfirmed(ProductId),
    /// The user declined the delete prompt.
    DeleteDeclined(ProductId),
    /// The view is going away; pending message timers are cancelled.
    Teardown,
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// The returned flag says whether the view needs re-rendering. The exclusive
/// borrow of `app` keeps remote operations from overlapping; while one is
/// pending a host re-renders through
/// [`InventoryViewModel::refresh_live`](crate::ui::InventoryViewModel::refresh_live).
///
/// # Errors
///
/// Reserved for failures outside the store boundary; remote and validation
/// failures are reported as messages instead.
#[tracing::instrument(level = "debug", skip(app))]
pub async fn handle_event<R: ProductRemote>(app: &mut App<R>, event: Event) -> Result<(bool, Vec<Action>)> {
    match event {
        Event::Refresh => {
            if let Err(e) = app.store.load().await {
                tracing::debug!(error = %e, "refresh failed");
            }
            Ok((true, vec![]))
        }
        Event::QueryChanged(query) => {
            if app.query == query {
                return Ok((false, vec![]));
            }
            tracing::trace!(query = %query, "search query updated");
            app.query = query;
            Ok((true, vec![]))
        }
        Event::SortBy(field) => {
            app.sort.select(field);
            Ok((true, vec![]))
        }
        Event::Edit(id) => {
            let Some(product) = app.store.get(id).cloned() else {
                tracing::debug!(id, "edit requested for unknown product");
                return Ok((false, vec![]));
            };
            app.form.begin_edit(&product);
            Ok((true, vec![]))
        }
        Event::FieldChanged { field, value } => Ok((app.form.set_field(field, value), vec![])),
        Event::CancelEdit => {
            app.form.cancel();
            Ok((true, vec![]))
        }
        Event::Submit => {
            match app.form.submit(&mut app.store).await {
                Ok(product) => tracing::debug!(id = product.id, "form submitted"),
                Err(e) => tracing::debug!(error = %e, "form submission failed"),
            }
            Ok((true, vec![]))
        }
        Event::RequestDelete(id) => {
            let Some(product) = app.store.get(id) else {
                tracing::debug!(id, "delete requested for unknown product");
                return Ok((false, vec![]));
            };
            Ok((false, vec![Action::ConfirmDelete {
                id,
                name: product.name.clone(),
            }]))
        }
        Event::DeleteConfirmed(id) => {
            if app.store.delete(id, Confirmation::Affirmed).await.is_ok()
                && app.form.mode().bound_id() == Some(id)
            {
                tracing::debug!(id, "edited product deleted, resetting form");
                app.form.reset();
            }
            Ok((true, vec![]))
        }
        Event::DeleteDeclined(id) => {
            let declined = app.store.delete(id, Confirmation::Declined).await;
            debug_assert!(declined.as_ref().is_err_and(|e| e.is_declined()));
            Ok((false, vec![]))
        }
        Event::Teardown => {
            app.notifier.clear_all();
            Ok((false, vec![]))
        }
    }
}
