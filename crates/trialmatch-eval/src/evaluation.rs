//! The evaluation value combined by the lattice

use crate::EvaluationResult;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Result of evaluating one criterion against one patient at one point in
/// time
///
/// Message sets are partitioned by category (pass/warn/undetermined/fail)
/// and specificity: specific messages carry patient detail for review,
/// general messages are the short labels that cohort summaries surface.
/// `recoverable` is meaningful on `Fail` and `Undetermined` only: a
/// recoverable fail is caused by missing information and could resolve to a
/// pass once more data arrives, an unrecoverable fail is a definitive
/// disqualification.
///
/// Evaluations are created fresh per (patient, node) and combined, never
/// mutated in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluation {
    pub result: EvaluationResult,
    pub recoverable: bool,
    /// Gene/alteration identifiers justifying a molecular pass
    pub inclusion_molecular_events: BTreeSet<String>,
    pub pass_specific_messages: BTreeSet<String>,
    pub pass_general_messages: BTreeSet<String>,
    pub warn_specific_messages: BTreeSet<String>,
    pub warn_general_messages: BTreeSet<String>,
    pub undetermined_specific_messages: BTreeSet<String>,
    pub undetermined_general_messages: BTreeSet<String>,
    pub fail_specific_messages: BTreeSet<String>,
    pub fail_general_messages: BTreeSet<String>,
}

fn single(message: impl Into<String>) -> BTreeSet<String> {
    BTreeSet::from([message.into()])
}

impl Evaluation {
    pub(crate) fn empty(result: EvaluationResult, recoverable: bool) -> Self {
        Self {
            result,
            recoverable,
            inclusion_molecular_events: BTreeSet::new(),
            pass_specific_messages: BTreeSet::new(),
            pass_general_messages: BTreeSet::new(),
            warn_specific_messages: BTreeSet::new(),
            warn_general_messages: BTreeSet::new(),
            undetermined_specific_messages: BTreeSet::new(),
            undetermined_general_messages: BTreeSet::new(),
            fail_specific_messages: BTreeSet::new(),
            fail_general_messages: BTreeSet::new(),
        }
    }

    /// Create a passing evaluation
    pub fn pass(specific: impl Into<String>, general: impl Into<String>) -> Self {
        Self {
            pass_specific_messages: single(specific),
            pass_general_messages: single(general),
            ..Self::empty(EvaluationResult::Pass, false)
        }
    }

    /// Create a warning evaluation
    pub fn warn(specific: impl Into<String>, general: impl Into<String>) -> Self {
        Self {
            warn_specific_messages: single(specific),
            warn_general_messages: single(general),
            ..Self::empty(EvaluationResult::Warn, false)
        }
    }

    /// Create an undetermined evaluation for a question that cannot be
    /// answered from the data that will ever be available
    pub fn undetermined(specific: impl Into<String>, general: impl Into<String>) -> Self {
        Self {
            undetermined_specific_messages: single(specific),
            undetermined_general_messages: single(general),
            ..Self::empty(EvaluationResult::Undetermined, false)
        }
    }

    /// Create an undetermined evaluation that further curation may resolve
    pub fn recoverable_undetermined(
        specific: impl Into<String>,
        general: impl Into<String>,
    ) -> Self {
        Self {
            undetermined_specific_messages: single(specific),
            undetermined_general_messages: single(general),
            ..Self::empty(EvaluationResult::Undetermined, true)
        }
    }

    /// Create a definitive disqualification
    pub fn fail(specific: impl Into<String>, general: impl Into<String>) -> Self {
        Self {
            fail_specific_messages: single(specific),
            fail_general_messages: single(general),
            ..Self::empty(EvaluationResult::Fail, false)
        }
    }

    /// Create a fail caused by missing information; more data could turn
    /// this into a pass
    pub fn recoverable_fail(specific: impl Into<String>, general: impl Into<String>) -> Self {
        Self {
            fail_specific_messages: single(specific),
            fail_general_messages: single(general),
            ..Self::empty(EvaluationResult::Fail, true)
        }
    }

    /// Placeholder for a rule that has deliberately not been evaluated
    pub fn not_evaluated() -> Self {
        Self::empty(EvaluationResult::NotEvaluated, false)
    }

    /// Placeholder for a rule without a wired predicate
    pub fn not_implemented() -> Self {
        Self::empty(EvaluationResult::NotImplemented, false)
    }

    /// Attach inclusion molecular events to a (typically passing) evaluation
    pub fn with_inclusion_molecular_events(
        mut self,
        events: impl IntoIterator<Item = String>,
    ) -> Self {
        self.inclusion_molecular_events.extend(events);
        self
    }

    /// Whether this evaluation is an unrecoverable fail
    pub fn is_unrecoverable_fail(&self) -> bool {
        self.result == EvaluationResult::Fail && !self.recoverable
    }

    /// Union all message sets and molecular events of `other` into this
    /// evaluation; used by combinators that pool child detail
    pub(crate) fn absorb_messages_and_events(&mut self, other: &Evaluation) {
        self.inclusion_molecular_events
            .extend(other.inclusion_molecular_events.iter().cloned());
        self.pass_specific_messages
            .extend(other.pass_specific_messages.iter().cloned());
        self.pass_general_messages
            .extend(other.pass_general_messages.iter().cloned());
        self.warn_specific_messages
            .extend(other.warn_specific_messages.iter().cloned());
        self.warn_general_messages
            .extend(other.warn_general_messages.iter().cloned());
        self.undetermined_specific_messages
            .extend(other.undetermined_specific_messages.iter().cloned());
        self.undetermined_general_messages
            .extend(other.undetermined_general_messages.iter().cloned());
        self.fail_specific_messages
            .extend(other.fail_specific_messages.iter().cloned());
        self.fail_general_messages
            .extend(other.fail_general_messages.iter().cloned());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_set_result_and_recoverability() {
        assert_eq!(
            Evaluation::pass("p", "g").result,
            EvaluationResult::Pass
        );
        assert!(!Evaluation::fail("f", "g").recoverable);
        assert!(Evaluation::recoverable_fail("f", "g").recoverable);
        assert!(Evaluation::recoverable_undetermined("u", "g").recoverable);
        assert!(Evaluation::fail("f", "g").is_unrecoverable_fail());
        assert!(!Evaluation::recoverable_fail("f", "g").is_unrecoverable_fail());
    }

    #[test]
    fn test_messages_land_in_their_category() {
        let evaluation = Evaluation::warn("specific warning", "general warning");
        assert!(evaluation.warn_specific_messages.contains("specific warning"));
        assert!(evaluation.warn_general_messages.contains("general warning"));
        assert!(evaluation.pass_general_messages.is_empty());
        assert!(evaluation.fail_general_messages.is_empty());
    }

    #[test]
    fn test_absorb_unions_all_sets() {
        let mut target = Evaluation::pass("pass 1", "general 1");
        let other = Evaluation::fail("fail 2", "general 2")
            .with_inclusion_molecular_events(["BRAF V600E".to_string()]);

        target.absorb_messages_and_events(&other);

        assert!(target.pass_specific_messages.contains("pass 1"));
        assert!(target.fail_specific_messages.contains("fail 2"));
        assert!(target.inclusion_molecular_events.contains("BRAF V600E"));
    }
}
