//! Application state container and view model computation.
//!
//! [`App`] wires the store, the form and the notifier together with the
//! transient view criteria (search query and sort). It is the single state
//! object a host drives through [`handle_event`](super::handle_event) and reads
//! through [`App::compute_viewmodel`].
//!
//! # State Components
//!
//! - **Store**: the product collection as known, plus the busy flag
//! - **Form**: raw add/edit input and form mode
//! - **Notifier**: inline and toast messages
//! - **Query / Sort**: transient criteria; the displayed sequence is always
//!   derived from them, never stored
//!
//! # Example
//!
//! ```rust
//! use stocktake::app::App;
//! use stocktake::notify::Notifier;
//! use stocktake::remote::MemoryRemote;
//!
//! let app = App::new(MemoryRemote::new(), Notifier::default());
//! let viewmodel = app.compute_viewmodel();
//! assert_eq!(viewmodel.header.total, 0);
//! assert!(viewmodel.empty_state.is_some());
//! ```

use super::form::FormController;
use super::store::ProductStore;
use super::view::{derive, SortState};
use crate::domain::{Product, ProductField};
use crate::notify::{Channel, Notifier};
use crate::remote::ProductRemote;
use crate::ui::viewmodel::{
    format_price, ColumnHeader, EmptyState, FormView, HeaderInfo, InventoryViewModel, ProductRow,
};

/// Title shown in the header bar.
const APP_TITLE: &str = "Inventory Management System";

/// Text shown when the derived view is empty.
const EMPTY_TEXT: &str = "No products found.";

/// Central application state.
#[derive(Debug)]
pub struct App<R> {
    /// Product collection and remote operations.
    pub store: ProductStore<R>,

    /// Add/edit form.
    pub form: FormController,

    /// Notification service shared with `store` and `form`.
    pub notifier: Notifier,

    /// Search text as typed. Trimmed and lowercased only during derivation.
    pub query: String,

    /// Active sort field and direction.
    pub sort: SortState,
}

impl<R: ProductRemote> App<R> {
    /// Creates an app with an empty collection, an empty form and default sort
    /// (id ascending). The notifier is shared with the store and the form.
    pub fn new(remote: R, notifier: Notifier) -> Self {
        Self {
            store: ProductStore::new(remote, notifier.clone()),
            form: FormController::new(notifier.clone()),
            notifier,
            query: String::new(),
            sort: SortState::default(),
        }
    }

    /// Products as they should be displayed.
    #[must_use]
    pub fn visible_products(&self) -> Vec<Product> {
        derive(
            self.store.products(),
            &self.query,
            self.sort.field,
            self.sort.direction,
        )
    }

    /// Computes a renderable view model from the current state.
    #[must_use]
    pub fn compute_viewmodel(&self) -> InventoryViewModel {
        let rows: Vec<ProductRow> = self
            .visible_products()
            .iter()
            .map(|p| ProductRow {
                id: p.id,
                name: p.name.clone(),
                description: p.description.clone(),
                price: format_price(p.price),
                quantity: p.quantity,
                category: p.category.clone(),
            })
            .collect();

        let empty_state = rows.is_empty().then(|| EmptyState {
            message: EMPTY_TEXT.to_string(),
        });

        InventoryViewModel {
            header: HeaderInfo {
                title: APP_TITLE.to_string(),
                total: self.store.products().len(),
            },
            query: self.query.clone(),
            columns: self.compute_columns(),
            rows,
            empty_state,
            form: self.compute_form(),
            inline_message: self.notifier.current(Channel::Inline),
            toast: self.notifier.current(Channel::Toast),
            busy: self.store.is_busy(),
        }
    }

    fn compute_columns(&self) -> Vec<ColumnHeader> {
        ProductField::ALL
            .into_iter()
            .map(|field| {
                let sortable = field != ProductField::Description;
                ColumnHeader {
                    field,
                    label: field.label(),
                    sortable,
                    sort: (sortable && self.sort.field == field).then_some(self.sort.direction),
                }
            })
            .collect()
    }

    fn compute_form(&self) -> FormView {
        FormView::new(
            self.form.mode().is_edit(),
            self.store.is_busy(),
            self.form.state().clone(),
        )
    }
}
