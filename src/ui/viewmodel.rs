//! View model types representing renderable UI state.
//!
//! View models are computed from application state via
//! [`App::compute_viewmodel`](crate::app::App::compute_viewmodel) and consumed by
//! whatever renders the page. They contain no business logic, only
//! display-ready data.
//!
//! # Example
//!
//! ```rust
//! use stocktake::ui::viewmodel::{format_price, ProductRow};
//!
//! let row = ProductRow {
//!     id: 1,
//!     name: "Widget".to_string(),
//!     description: String::new(),
//!     price: format_price(9.5),
//!     quantity: 5,
//!     category: "tools".to_string(),
//! };
//! assert_eq!(row.price, "9.50");
//! ```

use crate::app::form::FormState;
use crate::app::store::BusyFlag;
use crate::app::view::SortDirection;
use crate::domain::{ProductField, ProductId};
use crate::notify::{Channel, Notifier, TransientMessage};

/// Complete view model for one render.
#[derive(Debug, Clone)]
pub struct InventoryViewModel {
    /// Title bar and product count.
    pub header: HeaderInfo,

    /// Search text as typed.
    pub query: String,

    /// Table columns with sort indicators.
    pub columns: Vec<ColumnHeader>,

    /// Filtered and sorted rows.
    pub rows: Vec<ProductRow>,

    /// Present when `rows` is empty.
    pub empty_state: Option<EmptyState>,

    /// Add/edit form.
    pub form: FormView,

    /// Message attached to the form, if any.
    pub inline_message: Option<TransientMessage>,

    /// Popup notification, if any.
    pub toast: Option<TransientMessage>,

    /// A remote operation is in flight; controls that start another should be disabled.
    pub busy: bool,
}

impl InventoryViewModel {
    /// Refreshes the parts of the view that change while a remote call is
    /// pending: busy state, submit control and messages.
    ///
    /// [`handle_event`](crate::app::handle_event) keeps the app mutably borrowed
    /// until the call resolves, so a host takes a [`BusyFlag`] and a
    /// [`Notifier`] handle beforehand and re-renders the last view model
    /// through them.
    pub fn refresh_live(&mut self, busy: &BusyFlag, notifier: &Notifier) {
        self.busy = busy.is_busy();
        self.form.set_busy(self.busy);
        self.inline_message = notifier.current(Channel::Inline);
        self.toast = notifier.current(Channel::Toast);
    }
}

/// Header bar content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    pub title: String,
    /// Size of the whole collection, not of the filtered view.
    pub total: usize,
}

/// A table column heading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnHeader {
    pub field: ProductField,
    pub label: &'static str,
    pub sortable: bool,
    /// Direction indicator when this column is the active sort.
    pub sort: Option<SortDirection>,
}

/// Display row for a single product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductRow {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    /// Price with two decimals.
    pub price: String,
    pub quantity: u32,
    pub category: String,
}

/// Placeholder shown instead of an empty table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    pub message: String,
}

/// Form panel content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormView {
    pub title: String,
    pub submit_label: String,
    pub submit_enabled: bool,
    pub id_locked: bool,
    pub show_cancel: bool,
    pub fields: FormState,
}

impl FormView {
    /// Form panel for create or edit mode.
    #[must_use]
    pub fn new(editing: bool, busy: bool, fields: FormState) -> Self {
        let mut view = Self {
            title: if editing { "Edit Product" } else { "Add Product" }.to_string(),
            submit_label: String::new(),
            submit_enabled: true,
            id_locked: editing,
            show_cancel: editing,
            fields,
        };
        view.set_busy(busy);
        view
    }

    /// Disables submission and marks the label while an operation is pending.
    pub fn set_busy(&mut self, busy: bool) {
        let verb = if self.id_locked { "Update" } else { "Add" };
        self.submit_label = if busy {
            format!("{verb} Please wait")
        } else {
            verb.to_string()
        };
        self.submit_enabled = !busy;
    }
}

/// Formats a price with two decimals.
#[must_use]
pub fn format_price(price: f64) -> String {
    format!("{price:.2}")
}
