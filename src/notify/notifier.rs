//! Self-expiring notification service.
//!
//! [`Notifier`] holds at most one message per [`Channel`]. Each `show` replaces the
//! channel's message and restarts its expiry timer; the previous timer is aborted
//! so it can never clear the newer message. Timers hold only a weak reference to
//! the notifier, and dropping the last handle aborts every pending timer, so no
//! expiry fires against a torn-down view.
//!
//! Expiry timers run on the ambient tokio runtime. Showing a message outside a
//! runtime still displays it, but it will not expire on its own.
//!
//! # Example
//!
//! ```no_run
//! use stocktake::notify::{Channel, MessageKind, Notifier};
//!
//! # async fn demo() {
//! let notifier = Notifier::default();
//! notifier.show(Channel::Toast, MessageKind::Success, "Product created successfully");
//! assert!(notifier.current(Channel::Toast).is_some());
//! # }
//! ```

use super::message::{Channel, MessageKind, TransientMessage};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Lifetime of a message unless superseded.
pub const DEFAULT_MESSAGE_TTL: Duration = Duration::from_millis(5000);

#[derive(Debug, Default)]
struct Slot {
    message: Option<TransientMessage>,
    /// Bumped on every show/clear; an expiry only applies to its own generation.
    generation: u64,
    expiry: Option<JoinHandle<()>>,
}

impl Slot {
    fn cancel_expiry(&mut self) {
        if let Some(handle) = self.expiry.take() {
            handle.abort();
        }
    }
}

struct Inner {
    slots: Mutex<HashMap<Channel, Slot>>,
    changes: watch::Sender<u64>,
}

impl Inner {
    fn lock(&self) -> MutexGuard<'_, HashMap<Channel, Slot>> {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn bump(&self) {
        self.changes.send_modify(|version| *version = version.wrapping_add(1));
    }

    fn expire(&self, channel: Channel, generation: u64) {
        let mut slots = self.lock();
        let Some(slot) = slots.get_mut(&channel) else {
            return;
        };
        if slot.generation != generation {
            return;
        }
        slot.expiry = None;
        let expired = slot.message.take();
        drop(slots);

        if let Some(message) = expired {
            tracing::debug!(?channel, kind = %message.kind, "message expired");
            self.bump();
        }
    }
}

impl Drop for Inner {
    fn drop(&mut self) {
        let slots = self.slots.get_mut().unwrap_or_else(PoisonError::into_inner);
        for slot in slots.values_mut() {
            slot.cancel_expiry();
        }
    }
}

/// Shared handle to the notification service. Clones share state.
#[derive(Clone)]
pub struct Notifier {
    inner: Arc<Inner>,
    ttl: Duration,
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new(DEFAULT_MESSAGE_TTL)
    }
}

impl fmt::Debug for Notifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Notifier")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl Notifier {
    /// Creates a notifier whose messages live for `ttl`.
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        let (changes, _) = watch::channel(0);
        Self {
            inner: Arc::new(Inner {
                slots: Mutex::new(HashMap::new()),
                changes,
            }),
            ttl,
        }
    }

    /// Message lifetime.
    #[must_use]
    pub const fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Shows `text` on `channel`, replacing whatever was there and restarting
    /// the expiry timer.
    pub fn show(&self, channel: Channel, kind: MessageKind, text: impl Into<String>) {
        let message = TransientMessage::new(kind, text);
        tracing::debug!(?channel, %kind, text = %message.text, "showing message");

        let mut slots = self.inner.lock();
        let slot = slots.entry(channel).or_default();
        slot.generation = slot.generation.wrapping_add(1);
        slot.cancel_expiry();
        slot.message = Some(message);
        slot.expiry = self.schedule_expiry(channel, slot.generation);
        drop(slots);

        self.inner.bump();
    }

    pub fn success(&self, channel: Channel, text: impl Into<String>) {
        self.show(channel, MessageKind::Success, text);
    }

    pub fn error(&self, channel: Channel, text: impl Into<String>) {
        self.show(channel, MessageKind::Error, text);
    }

    /// Removes the message on `channel` immediately and cancels its timer.
    pub fn clear(&self, channel: Channel) {
        let mut slots = self.inner.lock();
        let Some(slot) = slots.get_mut(&channel) else {
            return;
        };
        slot.generation = slot.generation.wrapping_add(1);
        slot.cancel_expiry();
        let removed = slot.message.take().is_some();
        drop(slots);

        if removed {
            tracing::debug!(?channel, "message cleared");
            self.inner.bump();
        }
    }

    /// Clears every channel. Used when the owning view is torn down.
    pub fn clear_all(&self) {
        for channel in [Channel::Inline, Channel::Toast] {
            self.clear(channel);
        }
    }

    /// Message currently displayed on `channel`.
    #[must_use]
    pub fn current(&self, channel: Channel) -> Option<TransientMessage> {
        self.inner
            .lock()
            .get(&channel)
            .and_then(|slot| slot.message.clone())
    }

    /// Receiver that observes a new version whenever any channel changes,
    /// including expiry.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.inner.changes.subscribe()
    }

    fn schedule_expiry(&self, channel: Channel, generation: u64) -> Option<JoinHandle<()>> {
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            tracing::warn!(?channel, "no async runtime, message will not expire");
            return None;
        };

        let weak: Weak<Inner> = Arc::downgrade(&self.inner);
        let ttl = self.ttl;
        Some(runtime.spawn(async move {
            tokio::time::sleep(ttl).await;
            if let Some(inner) = weak.upgrade() {
                inner.expire(channel, generation);
            }
        }))
    }
}
