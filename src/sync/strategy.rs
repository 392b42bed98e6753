//! Coarse-grained locking disciplines over one `OrderedSet`
//!
//! Both strategies expose the same `member`/`insert`/`delete` surface, so
//! workers stay agnostic to which lock is active. Each operation holds
//! its lock for the full walk: no partially spliced node is ever visible
//! to another thread.
//!
//! Fairness: `parking_lot` locks are task-fair. Once a writer parks on
//! the `RwLock`, later-arriving readers queue behind it instead of
//! barging, which bounds reader-induced writer starvation under heavy
//! read mixes.

use clap::ValueEnum;
use parking_lot::{Mutex, RwLock};
use std::fmt;

use crate::set::OrderedSet;

/// Which lock guards the shared set for a benchmark run.
///
/// Chosen once at startup and fixed for the whole thread-count sweep.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LockStrategy {
    /// One mutual-exclusion lock for reads and writes alike
    #[default]
    Mutex,
    /// Shared lock for membership tests, exclusive lock for mutations
    Rwlock,
}

impl LockStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            LockStrategy::Mutex => "mutex",
            LockStrategy::Rwlock => "rwlock",
        }
    }
}

impl fmt::Display for LockStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An `OrderedSet` wrapped behind one of the two locking disciplines.
///
/// Created fresh per trial and shared by reference with every worker of
/// that trial.
pub enum GuardedSet {
    Exclusive(Mutex<OrderedSet>),
    ReadWrite(RwLock<OrderedSet>),
}

impl GuardedSet {
    /// Wrap `set` behind the chosen lock
    pub fn new(strategy: LockStrategy, set: OrderedSet) -> Self {
        match strategy {
            LockStrategy::Mutex => GuardedSet::Exclusive(Mutex::new(set)),
            LockStrategy::Rwlock => GuardedSet::ReadWrite(RwLock::new(set)),
        }
    }

    /// Which strategy this set was built with
    pub fn strategy(&self) -> LockStrategy {
        match self {
            GuardedSet::Exclusive(_) => LockStrategy::Mutex,
            GuardedSet::ReadWrite(_) => LockStrategy::Rwlock,
        }
    }

    /// Membership test. Takes the shared lock under `Rwlock`, so
    /// concurrent readers proceed in parallel.
    pub fn member(&self, key: i32) -> bool {
        match self {
            GuardedSet::Exclusive(set) => set.lock().member(key),
            GuardedSet::ReadWrite(set) => set.read().member(key),
        }
    }

    /// Insert under the exclusive lock. Returns false on duplicate.
    pub fn insert(&self, key: i32) -> bool {
        match self {
            GuardedSet::Exclusive(set) => set.lock().insert(key),
            GuardedSet::ReadWrite(set) => set.write().insert(key),
        }
    }

    /// Delete under the exclusive lock. Returns false when absent.
    pub fn delete(&self, key: i32) -> bool {
        match self {
            GuardedSet::Exclusive(set) => set.lock().delete(key),
            GuardedSet::ReadWrite(set) => set.write().delete(key),
        }
    }

    /// Number of keys at a quiescent point
    pub fn len(&self) -> usize {
        match self {
            GuardedSet::Exclusive(set) => set.lock().len(),
            GuardedSet::ReadWrite(set) => set.read().len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot the keys in ascending order (single traversal under the
    /// read-side lock). Used by post-run invariant scans.
    pub fn to_vec(&self) -> Vec<i32> {
        match self {
            GuardedSet::Exclusive(set) => set.lock().to_vec(),
            GuardedSet::ReadWrite(set) => set.read().to_vec(),
        }
    }
}
