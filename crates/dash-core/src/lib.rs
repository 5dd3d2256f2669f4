//! Core shared types for Dash.
//!
//! This crate is intentionally small and dependency-free.

use std::cell::RefCell;

/// An opaque modification stamp for a file.
///
/// Host backends derive stamps from mtime (milliseconds since the epoch) or a
/// monotonic counter; only stamps produced by the same backend are comparable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModStamp(u64);

impl ModStamp {
    #[inline]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// A single-slot memoization cell keyed on a [`ModStamp`].
///
/// [`StampCell::get_or_update`] recomputes the held value only when the
/// observed stamp differs from the stamp recorded at the last computation.
///
/// Not thread safe: the cell targets single-threaded host callbacks and
/// carries no lock, so the containing type is `!Sync`.
#[derive(Debug, Clone)]
pub struct StampCell<T> {
    slot: RefCell<Option<(ModStamp, T)>>,
}

impl<T: Clone> StampCell<T> {
    pub fn new() -> Self {
        Self {
            slot: RefCell::new(None),
        }
    }

    /// Returns the cached value when `stamp` equals the last-seen stamp,
    /// otherwise recomputes via `compute` and stores `(stamp, value)`.
    pub fn get_or_update(&self, stamp: ModStamp, compute: impl FnOnce() -> T) -> T {
        let mut slot = self.slot.borrow_mut();
        if let Some((seen, value)) = slot.as_ref() {
            if *seen == stamp {
                return value.clone();
            }
        }
        let value = compute();
        *slot = Some((stamp, value.clone()));
        value
    }

    /// The stamp the held value was computed for, if any.
    pub fn last_stamp(&self) -> Option<ModStamp> {
        self.slot.borrow().as_ref().map(|(stamp, _)| *stamp)
    }

    /// Drops the cached value; the next lookup recomputes.
    pub fn clear(&self) {
        self.slot.borrow_mut().take();
    }
}

impl<T: Clone> Default for StampCell<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::cell::Cell;

    use pretty_assertions::assert_eq;

    #[test]
    fn stamp_cell_computes_once_per_stamp() {
        let calls = Cell::new(0u32);
        let cell = StampCell::new();

        let first = cell.get_or_update(ModStamp::new(1), || {
            calls.set(calls.get() + 1);
            "a"
        });
        let second = cell.get_or_update(ModStamp::new(1), || {
            calls.set(calls.get() + 1);
            "b"
        });

        assert_eq!(first, "a");
        assert_eq!(second, "a");
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn stamp_cell_recomputes_when_stamp_changes() {
        let cell = StampCell::new();

        assert_eq!(cell.get_or_update(ModStamp::new(1), || 10), 10);
        assert_eq!(cell.get_or_update(ModStamp::new(2), || 20), 20);
        assert_eq!(cell.last_stamp(), Some(ModStamp::new(2)));

        // Going back to a previously seen stamp still recomputes: the cell
        // holds a single slot, not a history.
        assert_eq!(cell.get_or_update(ModStamp::new(1), || 30), 30);
    }

    #[test]
    fn stamp_cell_clear_forces_recompute() {
        let cell = StampCell::new();
        assert_eq!(cell.get_or_update(ModStamp::new(7), || 1), 1);
        cell.clear();
        assert_eq!(cell.last_stamp(), None);
        assert_eq!(cell.get_or_update(ModStamp::new(7), || 2), 2);
    }
}
