//! The WARN_IF combinator

use crate::{Evaluation, EvaluationFunction, EvaluationResult};
use std::collections::BTreeSet;
use trialmatch_model::PatientRecord;

/// Downgrades a passing child to a warning; any other child result passes
/// through unchanged.
///
/// Trials use this for criteria that should not exclude a patient outright
/// but must be flagged for manual review when they hold. The child's pass
/// messages become warning messages.
pub struct WarnIf {
    function: Box<dyn EvaluationFunction>,
}

impl WarnIf {
    pub fn new(function: Box<dyn EvaluationFunction>) -> Self {
        Self { function }
    }
}

impl EvaluationFunction for WarnIf {
    fn evaluate(&self, record: &PatientRecord) -> Evaluation {
        let child = self.function.evaluate(record);

        if child.result != EvaluationResult::Pass {
            return child;
        }

        let mut warn_specific = child.warn_specific_messages;
        warn_specific.extend(child.pass_specific_messages);
        let mut warn_general = child.warn_general_messages;
        warn_general.extend(child.pass_general_messages);

        Evaluation {
            warn_specific_messages: warn_specific,
            warn_general_messages: warn_general,
            pass_specific_messages: BTreeSet::new(),
            pass_general_messages: BTreeSet::new(),
            inclusion_molecular_events: child.inclusion_molecular_events,
            undetermined_specific_messages: child.undetermined_specific_messages,
            undetermined_general_messages: child.undetermined_general_messages,
            fail_specific_messages: child.fail_specific_messages,
            fail_general_messages: child.fail_general_messages,
            ..Evaluation::empty(EvaluationResult::Warn, child.recoverable)
        }
    }
}
