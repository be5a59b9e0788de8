//! Evaluation engine for eligibility criteria
//!
//! This crate provides the multi-valued evaluation lattice, the composite
//! combinators (`AND`/`OR`/`NOT`/`WARN_IF`), and the resolver that wires
//! parsed criterion trees to evaluation functions once at startup.
//!
//! Evaluation is pure and synchronous: an [`EvaluationFunction`] reads an
//! immutable [`PatientRecord`](trialmatch_model::PatientRecord) snapshot and
//! produces a fresh [`Evaluation`]. Insufficient patient data is represented
//! as data (`UNDETERMINED`, recoverable `FAIL`) and flows through the
//! lattice; the engine never fails per patient. Configuration problems
//! (unmapped rules, bad arity, malformed parameters) are fatal at wiring
//! time instead.

mod combinators;
mod evaluation;
mod function;
mod functions;
mod resolver;
mod result;

pub use combinators::{And, Not, Or, WarnIf};
pub use evaluation::Evaluation;
pub use function::EvaluationFunction;
pub use resolver::{FunctionCreator, FunctionResolver};
pub use result::EvaluationResult;
