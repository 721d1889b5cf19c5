//! Reference-counted page scroll lock.
//!
//! The page body's inline `overflow` is captured when the first lock is taken
//! and restored when the last outstanding lock is released, in whatever order
//! the holders close.

use flyout_core::HostEnvironment;
use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;

const LOCKED_OVERFLOW: &str = "hidden";

/// Proof of one outstanding lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScrollLockToken(u64);

#[derive(Debug, Default)]
struct LockRecord {
    next_token: u64,
    outstanding: BTreeSet<ScrollLockToken>,
    /// Overflow captured by the first acquire; `None` while unlocked.
    saved: Option<Option<String>>,
}

/// Handle to a scroll lock slot.
///
/// Clones share the same slot. [`ScrollLock::shared`] is the per-thread slot
/// used by dialogs unless they are given their own.
#[derive(Debug, Clone, Default)]
pub struct ScrollLock {
    record: Rc<RefCell<LockRecord>>,
}

thread_local! {
    static SHARED: ScrollLock = ScrollLock::new();
}

impl ScrollLock {
    /// Create an independent slot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide slot of the current thread.
    #[must_use]
    pub fn shared() -> Self {
        SHARED.with(Clone::clone)
    }

    /// Lock page scrolling and return a token for the release.
    pub fn acquire<H: HostEnvironment + ?Sized>(&self, host: &mut H) -> ScrollLockToken {
        let mut record = self.record.borrow_mut();
        record.next_token += 1;
        let token = ScrollLockToken(record.next_token);

        if record.outstanding.is_empty() {
            let previous = host.body_overflow();
            if previous.as_deref() != Some(LOCKED_OVERFLOW) {
                host.set_body_overflow(Some(LOCKED_OVERFLOW));
            }
            tracing::debug!(previous = ?previous, "scroll lock engaged");
            record.saved = Some(previous);
        }
        record.outstanding.insert(token);
        token
    }

    /// Release a lock. Returns `false` if the token was already released.
    pub fn release<H: HostEnvironment + ?Sized>(&self, token: ScrollLockToken, host: &mut H) -> bool {
        let mut record = self.record.borrow_mut();
        if !record.outstanding.remove(&token) {
            return false;
        }
        if record.outstanding.is_empty() {
            if let Some(previous) = record.saved.take() {
                host.set_body_overflow(previous.as_deref());
                tracing::debug!(restored = ?previous, "scroll lock released");
            }
        }
        true
    }

    /// Number of outstanding locks.
    #[must_use]
    pub fn outstanding(&self) -> usize {
        self.record.borrow().outstanding.len()
    }

    /// Whether page scrolling is currently locked.
    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.outstanding() > 0
    }
}
