//! Remote authority layer.
//!
//! The inventory service owns persistence and validation. This module provides
//! the abstraction the store talks to and two implementations of it.
//!
//! # Modules
//!
//! - `backend`: [`ProductRemote`] trait
//! - `http`: JSON-over-HTTP client built on `reqwest`
//! - `memory`: in-process authority with failure injection

pub mod backend;
pub mod http;
pub mod memory;

pub use backend::ProductRemote;
pub use http::HttpRemote;
pub use memory::{MemoryRemote, RemoteCall};
