//! Workload definitions: operation mix and per-worker request streams

pub mod op_mix;
pub mod stream;

pub use op_mix::{OpKind, OpMix};
pub use stream::{Op, OpStream};
