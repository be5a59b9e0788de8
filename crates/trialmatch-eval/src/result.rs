//! The evaluation result lattice

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Outcome of evaluating one criterion against one patient
///
/// The four lattice members order best to worst as
/// `Pass > Warn > Undetermined > Fail`. `NotEvaluated` and `NotImplemented`
/// are terminal placeholders for rules not yet wired to a predicate:
/// combinators never produce them, and for worst-child selection they rank
/// below `Fail` so an unwired predicate can never improve a composite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EvaluationResult {
    Pass,
    Warn,
    Undetermined,
    Fail,
    NotEvaluated,
    NotImplemented,
}

impl EvaluationResult {
    fn rank(self) -> u8 {
        match self {
            Self::Pass => 5,
            Self::Warn => 4,
            Self::Undetermined => 3,
            Self::Fail => 2,
            Self::NotEvaluated => 1,
            Self::NotImplemented => 0,
        }
    }

    /// Whether this result sits lower in the lattice than `other`
    pub fn is_worse_than(self, other: Self) -> bool {
        self.rank() < other.rank()
    }

    /// Whether this result sits higher in the lattice than `other`
    pub fn is_better_than(self, other: Self) -> bool {
        self.rank() > other.rank()
    }
}

impl PartialOrd for EvaluationResult {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for EvaluationResult {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank().cmp(&other.rank())
    }
}

impl fmt::Display for EvaluationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pass => write!(f, "PASS"),
            Self::Warn => write!(f, "WARN"),
            Self::Undetermined => write!(f, "UNDETERMINED"),
            Self::Fail => write!(f, "FAIL"),
            Self::NotEvaluated => write!(f, "NOT_EVALUATED"),
            Self::NotImplemented => write!(f, "NOT_IMPLEMENTED"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lattice_ordering() {
        assert!(EvaluationResult::Pass.is_better_than(EvaluationResult::Warn));
        assert!(EvaluationResult::Warn.is_better_than(EvaluationResult::Undetermined));
        assert!(EvaluationResult::Undetermined.is_better_than(EvaluationResult::Fail));
        assert!(EvaluationResult::Fail.is_worse_than(EvaluationResult::Pass));
    }

    #[test]
    fn test_placeholders_rank_below_fail() {
        assert!(EvaluationResult::NotEvaluated.is_worse_than(EvaluationResult::Fail));
        assert!(EvaluationResult::NotImplemented.is_worse_than(EvaluationResult::NotEvaluated));
    }

    #[test]
    fn test_min_max_follow_lattice() {
        let results = [
            EvaluationResult::Warn,
            EvaluationResult::Pass,
            EvaluationResult::Fail,
        ];
        assert_eq!(results.iter().min(), Some(&EvaluationResult::Fail));
        assert_eq!(results.iter().max(), Some(&EvaluationResult::Pass));
    }
}
