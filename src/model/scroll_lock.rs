//! Scroll lock for the card grid
//!
//! The grid stays frozen while a detail overlay is open. The lock is held by
//! a guard value, so every way of leaving the overlay (explicit close,
//! backdrop click, opening another entry, or dropping the whole app state)
//! releases it.

use std::cell::Cell;
use std::rc::Rc;

/// Shared handle to a scroll surface's lock state
#[derive(Debug, Clone, Default)]
pub struct ScrollLock {
    holders: Rc<Cell<usize>>,
}

impl ScrollLock {
    pub fn new() -> Self {
        Self::default()
    }

    /// True while at least one guard is alive
    pub fn is_locked(&self) -> bool {
        self.holders.get() > 0
    }

    /// Lock the surface until the returned guard is dropped
    pub fn acquire(&self) -> ScrollLockGuard {
        self.holders.set(self.holders.get() + 1);
        tracing::debug!(holders = self.holders.get(), "scroll lock acquired");
        ScrollLockGuard {
            holders: Rc::clone(&self.holders),
        }
    }
}

/// Releases its hold on the lock when dropped
#[derive(Debug)]
pub struct ScrollLockGuard {
    holders: Rc<Cell<usize>>,
}

impl Drop for ScrollLockGuard {
    fn drop(&mut self) {
        self.holders.set(self.holders.get().saturating_sub(1));
        tracing::debug!(holders = self.holders.get(), "scroll lock released");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guard_locks_until_dropped() {
        let lock = ScrollLock::new();
        assert!(!lock.is_locked());

        let guard = lock.acquire();
        assert!(lock.is_locked());

        drop(guard);
        assert!(!lock.is_locked());
    }

    #[test]
    fn test_clones_share_state() {
        let lock = ScrollLock::new();
        let other = lock.clone();
        let _guard = other.acquire();
        assert!(lock.is_locked());
    }

    #[test]
    fn test_overlapping_guards() {
        let lock = ScrollLock::new();
        let first = lock.acquire();
        let second = lock.acquire();
        drop(first);
        assert!(lock.is_locked());
        drop(second);
        assert!(!lock.is_locked());
    }
}
