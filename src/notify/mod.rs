//! Transient, self-expiring user notifications.
//!
//! - `message`: message kinds, channels and the message record
//! - `notifier`: the [`Notifier`] service owning display slots and expiry timers

pub mod message;
pub mod notifier;

pub use message::{Channel, MessageKind, TransientMessage};
pub use notifier::{Notifier, DEFAULT_MESSAGE_TTL};
