//! Stocktake: a client for a remote product inventory service.
//!
//! Stocktake keeps a local, optimistically updated copy of the product
//! collection and provides:
//! - Listing, creating, updating and deleting products against the service
//! - Case-insensitive search across id, name and description
//! - Column sorting with per-column direction toggling
//! - An add/edit form with input coercion and id locking while editing
//! - Inline and toast notifications that expire on their own

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! The crate follows a layered architecture pattern:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  CLI Host (main.rs)                                 │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Event handling                                   │  ← Business logic
//! │  - Product store and form                           │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Remote Layer  │   │ Notify Layer  │
//! │ (ui/)         │   │ (remote/)     │   │ (notify/)     │
//! │ - View model  │   │ - HTTP client │   │ - Inline slot │
//! │               │   │ - In-memory   │   │ - Toast slot  │
//! │               │   │ - Remote API  │   │ - Expiry      │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                    │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain Layer (domain/)                             │
//! │  - Error types (domain/error)                       │
//! │  - Product model (domain/product)                   │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │
//! │  - tracing subscriber                               │
//! │  - Rotating JSON log file                           │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: Application state machine with event/action model
//! - [`domain`]: Core domain types (Product, errors)
//! - [`notify`]: Self-expiring inline and toast messages
//! - [`remote`]: Inventory service abstraction and implementations
//! - [`ui`]: View model consumed by the host
//! - [`observability`]: tracing subscriber setup
//!
//! # Configuration
//!
//! Settings come from a TOML file, a string map, or defaults:
//!
//! ```toml
//! base_url = "http://localhost:8000"
//! message_ttl_ms = 5000
//! request_timeout_secs = 10
//! trace_level = "debug"
//! log_file = "/tmp/stocktake.log"
//! ```
//!
//! # Data Flow
//!
//! 1. **Startup**: build the [`App`] with [`initialize`] and send
//!    [`Event::Refresh`] to load the collection.
//! 2. **Interaction**: every user action becomes an [`Event`] passed to
//!    [`handle_event`]. Remote operations go through the store, which
//!    reconciles the local copy only after the service confirms.
//! 3. **Feedback**: outcomes are raised on the [`Notifier`](notify::Notifier)
//!    and expire after the configured TTL.
//! 4. **Rendering**: the host reads [`App::compute_viewmodel`], which derives
//!    the filtered and sorted rows on every call.
//!
//! # Example
//!
//! ```rust
//! use stocktake::{handle_event, App, Event};
//! use stocktake::domain::{Product, ProductField};
//! use stocktake::notify::Notifier;
//! use stocktake::remote::MemoryRemote;
//!
//! # tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap().block_on(async {
//! let remote = MemoryRemote::with_products(vec![
//!     Product::new(1, "Widget", "A small widget", 9.99, 5, "tools"),
//!     Product::new(2, "Gadget", "", 19.5, 2, "tools"),
//! ]);
//! let mut app = App::new(remote, Notifier::default());
//!
//! for event in [Event::Refresh, Event::SortBy(ProductField::Price), Event::SortBy(ProductField::Price)] {
//!     handle_event(&mut app, event).await?;
//! }
//!
//! let view = app.compute_viewmodel();
//! assert_eq!(view.rows[0].name, "Gadget");
//! # Ok::<(), stocktake::InventoryError>(())
//! # }).unwrap();
//! ```
//!
//! # Key Design Decisions
//!
//! ## Pessimistic Reconciliation
//!
//! The local collection changes only after the service acknowledges a
//! mutation. A failed call leaves it untouched and raises a message.
//!
//! ## Derived Views
//!
//! The displayed sequence is never stored. Search text and sort criteria are
//! kept raw and applied on demand, so the view cannot drift from the data.
//!
//! ## Scoped Busy State
//!
//! The busy flag is held by a guard for the lifetime of each remote call, so
//! it is released on success, failure and cancellation alike.

pub mod app;
pub mod domain;
pub mod notify;
pub mod observability;
pub mod remote;
pub mod ui;

pub use app::{handle_event, Action, App, Event, FormMode, SortDirection};
pub use domain::{InventoryError, Product, ProductField, ProductId, Result};
pub use ui::InventoryViewModel;

use notify::Notifier;
use remote::HttpRemote;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default inventory service address.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Default message lifetime in milliseconds.
pub const DEFAULT_MESSAGE_TTL_MS: u64 = 5000;

/// Client configuration.
///
/// # Example
///
/// ```toml
/// base_url = "https://inventory.internal"
/// message_ttl_ms = 3000
/// trace_level = "debug"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base address of the inventory service, without the `/products` path.
    ///
    /// Default: `"http://localhost:8000"`
    pub base_url: String,

    /// How long inline and toast messages stay visible. Default: `5000`
    pub message_ttl_ms: u64,

    /// Per-request timeout. No timeout when unset.
    pub request_timeout_secs: Option<u64>,

    /// Tracing level.
    ///
    /// Options: `trace`, `debug`, `info`, `warn`, `error`. Default: `"info"`
    pub trace_level: Option<String>,

    /// Write JSON logs to this file instead of stderr.
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            message_ttl_ms: DEFAULT_MESSAGE_TTL_MS,
            request_timeout_secs: None,
            trace_level: None,
            log_file: None,
        }
    }
}

impl Config {
    /// Parses configuration from a string map.
    ///
    /// # Parsing Rules
    ///
    /// - `base_url`: trimmed, trailing `/` removed; empty falls back to default
    /// - `message_ttl_ms`: String → `u64` (falls back to 5000 on parse error)
    /// - `request_timeout_secs`: String → `Option<u64>` (dropped on parse error)
    /// - `trace_level`: String → `Option<String>`
    /// - `log_file`: String → `Option<PathBuf>`
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use stocktake::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("base_url".to_string(), "http://inventory:9000/".to_string());
    /// map.insert("message_ttl_ms".to_string(), "1500".to_string());
    ///
    /// let config = Config::from_map(&map);
    /// assert_eq!(config.base_url, "http://inventory:9000");
    /// assert_eq!(config.message_ttl_ms, 1500);
    /// ```
    #[must_use]
    pub fn from_map(config: &BTreeMap<String, String>) -> Self {
        let base_url = normalize_base_url(config.get("base_url").map_or("", String::as_str));

        let message_ttl_ms = config
            .get("message_ttl_ms")
            .and_then(|s| s.trim().parse::<u64>().ok())
            .unwrap_or(DEFAULT_MESSAGE_TTL_MS);

        Self {
            base_url,
            message_ttl_ms,
            request_timeout_secs: config
                .get("request_timeout_secs")
                .and_then(|s| s.trim().parse::<u64>().ok()),
            trace_level: config.get("trace_level").cloned(),
            log_file: config.get("log_file").map(PathBuf::from),
        }
    }

    /// Reads configuration from a TOML file. Missing keys take their defaults,
    /// and an empty `base_url` falls back to the default like in [`Config::from_map`].
    ///
    /// # Errors
    ///
    /// Returns [`InventoryError::Io`] if the file cannot be read and
    /// [`InventoryError::Config`] if it is not valid TOML for this shape.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&raw)
            .map_err(|e| InventoryError::Config(format!("{}: {e}", path.display())))?;
        config.base_url = normalize_base_url(&config.base_url);
        Ok(config)
    }

    #[must_use]
    pub fn message_ttl(&self) -> Duration {
        Duration::from_millis(self.message_ttl_ms)
    }

    #[must_use]
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

/// Trims whitespace and trailing slashes; blank falls back to [`DEFAULT_BASE_URL`].
fn normalize_base_url(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        DEFAULT_BASE_URL.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Builds an [`App`] talking to the configured inventory service.
///
/// The collection starts empty; send [`Event::Refresh`] to load it. Tracing is
/// not installed here, see [`observability::init_tracing`].
///
/// # Errors
///
/// Returns [`InventoryError::Config`] if `base_url` is not a valid URL or the
/// HTTP client cannot be built.
///
/// # Example
///
/// ```rust
/// use stocktake::{initialize, Config};
///
/// let app = initialize(&Config::default())?;
/// assert!(app.store.products().is_empty());
/// # Ok::<(), stocktake::InventoryError>(())
/// ```
pub fn initialize(config: &Config) -> Result<App<HttpRemote>> {
    tracing::debug!(base_url = %config.base_url, ttl_ms = config.message_ttl_ms, "initializing inventory client");

    let remote = HttpRemote::new(&config.base_url, config.request_timeout())?;
    let notifier = Notifier::new(config.message_ttl());
    Ok(App::new(remote, notifier))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn map_falls_back_to_defaults() {
        let mut map = BTreeMap::new();
        map.insert("message_ttl_ms".to_string(), "soon".to_string());
        map.insert("request_timeout_secs".to_string(), "-1".to_string());
        map.insert("base_url".to_string(), "  ".to_string());

        let config = Config::from_map(&map);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.message_ttl_ms, DEFAULT_MESSAGE_TTL_MS);
        assert_eq!(config.request_timeout_secs, None);
    }

    #[test]
    fn toml_file_fills_missing_keys() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "base_url = \"http://inventory:9000/\"").unwrap();
        writeln!(file, "request_timeout_secs = 3").unwrap();

        let config = Config::from_toml_file(file.path()).unwrap();
        assert_eq!(config.base_url, "http://inventory:9000");
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(3)));
        assert_eq!(config.message_ttl_ms, DEFAULT_MESSAGE_TTL_MS);
        assert_eq!(config.log_file, None);
    }

    #[test]
    fn blank_toml_base_url_uses_default() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "base_url = \"  \"").unwrap();

        let config = Config::from_toml_file(file.path()).unwrap();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert!(initialize(&config).is_ok());
    }

    #[test]
    fn malformed_toml_is_a_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "message_ttl_ms = \"five\"").unwrap();

        let err = Config::from_toml_file(file.path()).unwrap_err();
        assert!(matches!(err, InventoryError::Config(_)));
    }

    #[test]
    fn missing_toml_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::from_toml_file(dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, InventoryError::Io(_)));
    }

    #[test]
    fn initialize_rejects_bad_base_url() {
        let config = Config {
            base_url: "not a url".to_string(),
            ..Default::default()
        };
        assert!(matches!(initialize(&config), Err(InventoryError::Config(_))));
    }

    #[test]
    fn initialize_uses_configured_ttl() {
        let config = Config {
            message_ttl_ms: 1200,
            ..Default::default()
        };
        let app = initialize(&config).unwrap();
        assert_eq!(app.notifier.ttl(), Duration::from_millis(1200));
    }
}
