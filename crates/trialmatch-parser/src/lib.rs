//! Criterion parser for the eligibility engine
//!
//! Trial configuration expresses eligibility criteria in a small, fixed
//! function-call-like grammar: `AND(X, Y)`, `NOT(X)`, `RULE[param]`, `RULE`.
//! This crate turns that text into immutable
//! [`EligibilityFunction`](trialmatch_ast::EligibilityFunction) trees.
//! Parsing happens once at configuration load and fails fatally on malformed
//! input; a silently dropped criterion would cause missed-eligibility errors
//! downstream.
//!
//! The grammar is a wire format shared with existing configuration text and
//! must be reproduced exactly, including its binary top-level split: an
//! `AND`/`OR` node takes at most two children per syntactic level, so N-ary
//! combination is written nested, e.g. `AND(a, AND(b, c))`.

mod criterion;

pub use criterion::parse;
