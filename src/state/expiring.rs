//! Self-expiring value slot used for every timed animation flag.

use std::time::Duration;

use tokio::time::Instant;
use uuid::Uuid;

/// Identifier of one activation of an [`ExpiringSlot`], carried in logs.
pub type ExpiryToken = Uuid;

/// A single activation held by a slot.
#[derive(Debug, Clone)]
pub struct Activation<T> {
    /// Token owned by this activation.
    pub token: ExpiryToken,
    /// Value shown while active.
    pub value: T,
    /// When the activation stops being visible.
    pub expires_at: Instant,
}

/// Holds at most one value that clears itself after a fixed window.
///
/// Re-activating replaces the value, token and deadline in one write. Expiry only ever looks at
/// the deadline of the activation currently held, so a superseded activation can never clear
/// its successor.
#[derive(Debug, Clone)]
pub struct ExpiringSlot<T> {
    current: Option<Activation<T>>,
}

impl<T> Default for ExpiringSlot<T> {
    fn default() -> Self {
        Self { current: None }
    }
}

impl<T> ExpiringSlot<T> {
    /// Empty slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `value` until `now + duration`, superseding any running activation.
    ///
    /// Returns the token of the new activation together with the value it replaced, if any.
    pub fn activate(
        &mut self,
        value: T,
        now: Instant,
        duration: Duration,
    ) -> (ExpiryToken, Option<T>) {
        let token = Uuid::new_v4();
        let previous = self.current.replace(Activation {
            token,
            value,
            expires_at: now + duration,
        });
        (token, previous.map(|activation| activation.value))
    }

    /// Clear the slot if its deadline is at or before `now`, returning the cleared activation.
    pub fn expire_due(&mut self, now: Instant) -> Option<Activation<T>> {
        match &self.current {
            Some(activation) if activation.expires_at <= now => self.current.take(),
            _ => None,
        }
    }

    /// Value currently held.
    pub fn value(&self) -> Option<&T> {
        self.current.as_ref().map(|activation| &activation.value)
    }

    /// Whether a value is held.
    pub fn is_active(&self) -> bool {
        self.current.is_some()
    }

    /// Deadline of the current activation.
    pub fn deadline(&self) -> Option<Instant> {
        self.current.as_ref().map(|activation| activation.expires_at)
    }

    /// Drop the current activation without waiting for its deadline.
    pub fn clear(&mut self) {
        self.current = None;
    }
}
