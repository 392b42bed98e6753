//! Sorted linked set of unique integer keys

pub mod ordered_set;

pub use ordered_set::OrderedSet;
