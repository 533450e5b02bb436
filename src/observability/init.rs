//! Tracing initialization and subscriber setup.

use super::file_writer::{LogWriter, RotatingFile};
use crate::Config;
use std::sync::Arc;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initializes the global tracing subscriber.
///
/// # Level Resolution
///
/// 1. `RUST_LOG` if set and valid
/// 2. `config.trace_level` if set
/// 3. `"info"`
///
/// # Output
///
/// With `config.log_file` set, events are written as JSON lines to that file
/// through a [`RotatingFile`] (10 MB, 3 backups). Otherwise, or if the log
/// directory cannot be created, human-readable output goes to stderr.
///
/// Idempotent: only the first call installs a subscriber.
///
/// # Example
///
/// ```rust
/// use stocktake::observability::init_tracing;
/// use stocktake::Config;
///
/// let config = Config {
///     trace_level: Some("debug".to_string()),
///     ..Default::default()
/// };
///
/// init_tracing(&config);
/// tracing::debug!("tracing is now active");
/// ```
pub fn init_tracing(config: &Config) {
    let level = config
        .trace_level
        .clone()
        .unwrap_or_else(|| "info".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let file_layer = config.log_file.as_ref().and_then(|path| {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            if std::fs::create_dir_all(parent).is_err() {
                return None;
            }
        }
        let file = Arc::new(RotatingFile::new(path.clone()));
        Some(
            fmt::layer()
                .json()
                .with_ansi(false)
                .with_writer(move || LogWriter(Arc::clone(&file))),
        )
    });

    let stderr_layer = file_layer
        .is_none()
        .then(|| fmt::layer().with_target(false).with_writer(std::io::stderr));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(stderr_layer)
        .try_init();
}
