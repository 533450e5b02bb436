//! Form mode state type.
//!
//! The product form is either adding a new record or editing an existing one.
//! Edit mode is bound to the id of the record being edited, and that id can no
//! longer be typed over.
//!
//! # Example
//!
//! ```rust
//! use stocktake::app::modes::FormMode;
//!
//! let mode = FormMode::Edit { id: 7 };
//! assert_eq!(mode.bound_id(), Some(7));
//! assert!(FormMode::Create.bound_id().is_none());
//! ```

use crate::domain::ProductId;

/// Current mode of the product form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormMode {
    /// Adding a new product. The id is entered by the user.
    #[default]
    Create,

    /// Editing an existing product. The id field is locked.
    Edit {
        /// Id of the product being edited.
        id: ProductId,
    },
}

impl FormMode {
    /// Id the form is bound to, if editing.
    #[must_use]
    pub const fn bound_id(self) -> Option<ProductId> {
        match self {
            Self::Create => None,
            Self::Edit { id } => Some(id),
        }
    }

    #[must_use]
    pub const fn is_edit(self) -> bool {
        matches!(self, Self::Edit { .. })
    }
}
