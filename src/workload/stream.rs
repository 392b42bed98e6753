//! Per-worker operation stream
//!
//! Each worker consumes its own lazy, finite stream of randomized
//! requests. The stream owns a private `fastrand::Rng`, so workers never
//! contend on shared generator state and seeded runs are reproducible
//! regardless of scheduling.

use crate::workload::{OpKind, OpMix};

/// One randomized request: an operation kind and the key to apply it to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Op {
    pub kind: OpKind,
    pub value: i32,
}

/// Lazy stream of exactly `remaining` randomized operations.
///
/// Kinds are classified from a uniform roll against the mix thresholds;
/// values are drawn uniformly from `[0, domain)`.
pub struct OpStream {
    rng: fastrand::Rng,
    mix: OpMix,
    domain: i32,
    remaining: u64,
}

impl OpStream {
    /// Create a stream yielding `operations` entries with values drawn
    /// from `[0, domain)`.
    pub fn new(seed: u64, mix: OpMix, domain: i32, operations: u64) -> Self {
        Self {
            rng: fastrand::Rng::with_seed(seed),
            mix,
            domain,
            remaining: operations,
        }
    }

    /// Operations not yet yielded
    pub fn remaining(&self) -> u64 {
        self.remaining
    }
}

impl Iterator for OpStream {
    type Item = Op;

    fn next(&mut self) -> Option<Op> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;

        let kind = self.mix.classify(self.rng.f64());
        let value = self.rng.i32(0..self.domain);
        Some(Op { kind, value })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.remaining as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for OpStream {}
