//! Probabilistic operation mix
//!
//! The mix is a triple of probabilities governing how often each
//! operation kind is issued. A uniform roll in [0, 1) is classified by
//! cumulative thresholds, mirroring how weighted traffic mixes are
//! usually expressed (e.g. "member:0.9,insert:0.05,delete:0.05").

use serde::Serialize;
use std::fmt;

use crate::utils::{BenchmarkError, Result};

/// Tolerance allowed on the probability sum, to absorb the usual
/// floating-point slack in user-supplied triples.
const SUM_TOLERANCE: f64 = 0.01;

/// The three operation kinds issued against the shared set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpKind {
    Member,
    Insert,
    Delete,
}

impl OpKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OpKind::Member => "member",
            OpKind::Insert => "insert",
            OpKind::Delete => "delete",
        }
    }

    /// True for operations that take the exclusive lock under the
    /// reader/writer strategy
    pub fn is_write(&self) -> bool {
        matches!(self, OpKind::Insert | OpKind::Delete)
    }
}

impl fmt::Display for OpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Workload mix: probabilities for member, insert and delete.
///
/// Valid when every probability lies in [0.0, 1.0] and the sum lies in
/// [0.99, 1.01].
#[derive(Debug, Clone, Copy, Serialize)]
pub struct OpMix {
    pub member: f64,
    pub insert: f64,
    pub delete: f64,
}

impl OpMix {
    /// Build a validated mix
    pub fn new(member: f64, insert: f64, delete: f64) -> Result<Self> {
        let mix = Self {
            member,
            insert,
            delete,
        };
        mix.validate()?;
        Ok(mix)
    }

    /// Reject out-of-range probabilities and non-unit sums
    pub fn validate(&self) -> Result<()> {
        for (name, p) in [
            ("mMember", self.member),
            ("mInsert", self.insert),
            ("mDelete", self.delete),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(BenchmarkError::Config(format!(
                    "{} must be between 0.0 and 1.0 (got {})",
                    name, p
                )));
            }
        }

        let sum = self.member + self.insert + self.delete;
        if !((1.0 - SUM_TOLERANCE)..=(1.0 + SUM_TOLERANCE)).contains(&sum) {
            return Err(BenchmarkError::Config(format!(
                "probabilities must sum to 1.0 (current sum: {:.3})",
                sum
            )));
        }

        Ok(())
    }

    /// Classify a uniform roll in [0, 1) by cumulative thresholds:
    /// `< member` selects Member, `< member + insert` selects Insert,
    /// anything beyond selects Delete.
    pub fn classify(&self, roll: f64) -> OpKind {
        if roll < self.member {
            OpKind::Member
        } else if roll < self.member + self.insert {
            OpKind::Insert
        } else {
            OpKind::Delete
        }
    }
}

impl fmt::Display for OpMix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "member={:.3} insert={:.3} delete={:.3}",
            self.member, self.insert, self.delete
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_mixes() {
        assert!(OpMix::new(0.99, 0.005, 0.005).is_ok());
        assert!(OpMix::new(0.5, 0.5, 0.0).is_ok());
        assert!(OpMix::new(0.0, 0.0, 1.0).is_ok());
        // Sum tolerance absorbs small float slack
        assert!(OpMix::new(0.33, 0.33, 0.335).is_ok());
    }

    #[test]
    fn test_out_of_range_rejected() {
        assert!(OpMix::new(1.5, 0.0, 0.0).is_err());
        assert!(OpMix::new(-0.1, 0.6, 0.5).is_err());
    }

    #[test]
    fn test_bad_sum_rejected() {
        assert!(OpMix::new(0.5, 0.5, 0.5).is_err());
        assert!(OpMix::new(0.2, 0.2, 0.2).is_err());
        assert!(OpMix::new(0.0, 0.0, 0.0).is_err());
    }

    #[test]
    fn test_classify_thresholds() {
        let mix = OpMix::new(0.8, 0.1, 0.1).unwrap();

        assert_eq!(mix.classify(0.0), OpKind::Member);
        assert_eq!(mix.classify(0.5), OpKind::Member);
        assert_eq!(mix.classify(0.79), OpKind::Member);

        assert_eq!(mix.classify(0.8), OpKind::Insert);
        assert_eq!(mix.classify(0.89), OpKind::Insert);

        assert_eq!(mix.classify(0.9), OpKind::Delete);
        assert_eq!(mix.classify(0.999), OpKind::Delete);
    }

    #[test]
    fn test_classify_degenerate_mixes() {
        let read_only = OpMix::new(1.0, 0.0, 0.0).unwrap();
        assert_eq!(read_only.classify(0.999), OpKind::Member);

        let write_only = OpMix::new(0.0, 0.0, 1.0).unwrap();
        assert_eq!(write_only.classify(0.0), OpKind::Delete);
    }

    #[test]
    fn test_op_kind_write_split() {
        assert!(!OpKind::Member.is_write());
        assert!(OpKind::Insert.is_write());
        assert!(OpKind::Delete.is_write());
    }
}
