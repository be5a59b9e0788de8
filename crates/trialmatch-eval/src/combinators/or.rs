//! The OR combinator

use crate::{Evaluation, EvaluationFunction, EvaluationResult};
use trialmatch_model::PatientRecord;

/// Combines child criteria disjunctively: the result is the best child
/// result in the lattice.
///
/// Messages and molecular events are pooled only from the children that
/// achieved the winning result; surfacing fail detail from rejected branches
/// would mislead review when the criterion as a whole is satisfied. When all
/// children fail, the combined evaluation is recoverable only if all of them
/// are recoverable.
pub struct Or {
    functions: Vec<Box<dyn EvaluationFunction>>,
}

impl Or {
    /// The resolver guarantees at least one child.
    pub fn new(functions: Vec<Box<dyn EvaluationFunction>>) -> Self {
        Self { functions }
    }
}

impl EvaluationFunction for Or {
    fn evaluate(&self, record: &PatientRecord) -> Evaluation {
        let evaluations: Vec<Evaluation> =
            self.functions.iter().map(|f| f.evaluate(record)).collect();

        let Some(best) = evaluations.iter().map(|e| e.result).max() else {
            return Evaluation::not_evaluated();
        };

        let winners: Vec<&Evaluation> =
            evaluations.iter().filter(|e| e.result == best).collect();

        let recoverable = match best {
            EvaluationResult::Fail | EvaluationResult::Undetermined => {
                winners.iter().all(|e| e.recoverable)
            }
            _ => false,
        };

        let mut combined = Evaluation::empty(best, recoverable);
        for evaluation in winners {
            combined.absorb_messages_and_events(evaluation);
        }
        combined
    }
}
