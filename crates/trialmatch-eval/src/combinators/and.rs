//! The AND combinator

use crate::{Evaluation, EvaluationFunction, EvaluationResult};
use trialmatch_model::PatientRecord;

/// Combines child criteria conjunctively: the result is the worst child
/// result in the lattice.
///
/// The combined evaluation is recoverable only if every failing child is
/// individually recoverable; one unrecoverable fail makes the whole AND an
/// unrecoverable fail. Messages and molecular events are the union over all
/// children, so review detail from every branch is retained.
pub struct And {
    functions: Vec<Box<dyn EvaluationFunction>>,
}

impl And {
    /// The resolver guarantees at least one child.
    pub fn new(functions: Vec<Box<dyn EvaluationFunction>>) -> Self {
        Self { functions }
    }
}

impl EvaluationFunction for And {
    fn evaluate(&self, record: &PatientRecord) -> Evaluation {
        let evaluations: Vec<Evaluation> =
            self.functions.iter().map(|f| f.evaluate(record)).collect();

        let Some(worst) = evaluations.iter().map(|e| e.result).min() else {
            return Evaluation::not_evaluated();
        };

        let recoverable = match worst {
            EvaluationResult::Fail | EvaluationResult::Undetermined => evaluations
                .iter()
                .filter(|e| e.result == worst)
                .all(|e| e.recoverable),
            _ => false,
        };

        let mut combined = Evaluation::empty(worst, recoverable);
        for evaluation in &evaluations {
            combined.absorb_messages_and_events(evaluation);
        }
        combined
    }
}
