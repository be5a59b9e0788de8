//! Report projections of criterion evaluations
//!
//! The matcher produces per-trial evaluation maps; this crate rolls them up
//! into the read-only projections that downstream reporting consumes:
//! [`EvaluatedCohort`] and [`EvaluatedTrial`]. Projections are built once
//! per patient-match run, never persisted and never mutated after
//! construction. Aggregation itself never fails: a trial or cohort with
//! zero criteria is vacuously potentially eligible.

mod evaluated;
mod matches;
mod sort;

pub use evaluated::*;
pub use matches::*;
pub use sort::{compare_cohorts, sort_cohorts};
