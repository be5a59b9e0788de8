//! Clinical-trial eligibility rule engine
//!
//! This crate matches cancer patients against trial eligibility criteria
//! expressed in a small function-call-like grammar:
//! - Parsing criterion text into immutable function trees
//! - Wiring trees to predicate implementations once at startup
//! - Evaluating patients over a four-value lattice with
//!   recoverable/unrecoverable failure semantics
//! - Aggregating evaluations into cohort- and trial-level projections
//!
//! # Example
//!
//! ```
//! use trialmatch::eval::FunctionResolver;
//! use trialmatch::parse;
//!
//! let function = parse("AND(IS_AT_LEAST_X_YEARS_OLD[18], HAS_METASTATIC_CANCER)")?;
//! let resolver = FunctionResolver::with_reference_functions();
//! let wired = resolver.resolve(&function)?;
//! # let _ = wired;
//! # Ok::<(), trialmatch::TrialError>(())
//! ```

// Re-export all public APIs from internal crates
pub use trialmatch_ast as ast;
pub use trialmatch_diagnostics as diagnostics;
pub use trialmatch_eval as eval;
pub use trialmatch_model as model;
pub use trialmatch_parser as parser;
pub use trialmatch_report as report;

// Convenience re-exports
pub use trialmatch_ast::{EligibilityFunction, EligibilityRule};
pub use trialmatch_diagnostics::{Result, TrialError};
pub use trialmatch_eval::{Evaluation, EvaluationResult};
pub use trialmatch_model::{PatientRecord, Trial};
pub use trialmatch_parser::parse;
pub use trialmatch_report::{EvaluatedCohort, EvaluatedTrial, PatientMatches};

mod loader;
mod matcher;

pub use loader::{load_patient, load_trials, trial_from_config};
pub use matcher::TrialMatcher;

// CLI module (only available with cli feature)
#[cfg(feature = "cli")]
pub mod cli;
