//! Whole-structure synchronization strategies for the shared set

pub mod strategy;

pub use strategy::{GuardedSet, LockStrategy};
