//! Actions representing side effects the host must carry out.
//!
//! The event handler returns a `Vec<Action>` next to its re-render flag. Actions
//! cover the things the library cannot do itself, such as asking the user a
//! question.
//!
//! # Example
//!
//! ```rust
//! use stocktake::app::Action;
//!
//! let action = Action::ConfirmDelete { id: 7, name: "Widget".into() };
//! assert!(matches!(action, Action::ConfirmDelete { id: 7, .. }));
//! ```

use crate::domain::ProductId;

/// Commands executed by the host after an event is handled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Ask the user to confirm deleting a product.
    ///
    /// The host answers with `Event::DeleteConfirmed` or `Event::DeleteDeclined`.
    /// Nothing is sent to the remote service until it does.
    ConfirmDelete {
        /// Product to delete.
        id: ProductId,
        /// Display name for the prompt.
        name: String,
    },
}
