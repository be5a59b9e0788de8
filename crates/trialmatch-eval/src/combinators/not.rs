//! The NOT combinator

use crate::{Evaluation, EvaluationFunction, EvaluationResult};
use std::collections::BTreeSet;
use trialmatch_model::PatientRecord;

/// Negates its single child: PASS and FAIL swap, WARN and UNDETERMINED pass
/// through unchanged.
///
/// Message text is carried unchanged; only the category flips together with
/// the result, so a pass message of the child reads as the fail explanation
/// of the negation. Recoverability is inherited unchanged. Molecular events
/// justified the child's pass and are dropped when that pass turns into a
/// fail.
pub struct Not {
    function: Box<dyn EvaluationFunction>,
}

impl Not {
    pub fn new(function: Box<dyn EvaluationFunction>) -> Self {
        Self { function }
    }
}

impl EvaluationFunction for Not {
    fn evaluate(&self, record: &PatientRecord) -> Evaluation {
        let child = self.function.evaluate(record);

        match child.result {
            EvaluationResult::Pass => {
                let shell = child_shell(&child);
                Evaluation {
                    result: EvaluationResult::Fail,
                    inclusion_molecular_events: BTreeSet::new(),
                    pass_specific_messages: child.fail_specific_messages,
                    pass_general_messages: child.fail_general_messages,
                    fail_specific_messages: child.pass_specific_messages,
                    fail_general_messages: child.pass_general_messages,
                    ..shell
                }
            }
            EvaluationResult::Fail => {
                let shell = child_shell(&child);
                Evaluation {
                    result: EvaluationResult::Pass,
                    inclusion_molecular_events: child.inclusion_molecular_events,
                    pass_specific_messages: child.fail_specific_messages,
                    pass_general_messages: child.fail_general_messages,
                    fail_specific_messages: child.pass_specific_messages,
                    fail_general_messages: child.pass_general_messages,
                    ..shell
                }
            }
            _ => child,
        }
    }
}

/// Everything of the child that negation leaves untouched
fn child_shell(child: &Evaluation) -> Evaluation {
    Evaluation {
        warn_specific_messages: child.warn_specific_messages.clone(),
        warn_general_messages: child.warn_general_messages.clone(),
        undetermined_specific_messages: child.undetermined_specific_messages.clone(),
        undetermined_general_messages: child.undetermined_general_messages.clone(),
        ..Evaluation::empty(child.result, child.recoverable)
    }
}
