//! Presentation layer.
//!
//! Rendering itself is left to the host. This module only defines the view
//! model the host consumes.
//!
//! - [`viewmodel`]: display-ready state computed from [`App`](crate::app::App)

pub mod viewmodel;

pub use viewmodel::{InventoryViewModel, ProductRow};
