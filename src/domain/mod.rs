//! Domain layer for the inventory client.
//!
//! Core types independent of transport, timers or presentation.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`product`]: Product record and field names
//!
//! # Examples
//!
//! ```
//! use stocktake::domain::{Product, Result};
//!
//! fn sample() -> Result<Product> {
//!     Ok(Product::new(1, "Widget", "A small widget", 9.99, 5, "tools"))
//! }
//! # assert!(sample().is_ok());
//! ```

pub mod error;
pub mod product;

pub use error::{InventoryError, Result};
pub use product::{Product, ProductField, ProductId};
