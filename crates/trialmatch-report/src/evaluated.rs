//! Cohort and trial projections
//!
//! A cohort's full criteria set is the union of the trial-wide evaluations
//! and its own specific evaluations. A trial without cohorts is treated as
//! one implicit cohort over the trial-wide evaluations only; the implicit
//! cohort carries no enrollment restrictions of its own.

use crate::{CohortMatch, TrialMatch};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use trialmatch_eval::{Evaluation, EvaluationResult};

/// Read-only cohort-level projection for reporting
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluatedCohort {
    pub trial_id: String,
    pub acronym: String,
    pub cohort_description: String,
    /// True iff no evaluation in the cohort's full criteria set is an
    /// unrecoverable fail
    pub is_potentially_eligible: bool,
    pub is_open: bool,
    pub has_slots_available: bool,
    /// Union of inclusion molecular events over trial-wide and
    /// cohort-specific evaluations
    pub molecular_events: BTreeSet<String>,
    /// General messages of recoverable fails, warns and unrecoverable
    /// undetermined results
    pub warnings: BTreeSet<String>,
    /// General messages of unrecoverable fails only
    pub fails: BTreeSet<String>,
}

impl EvaluatedCohort {
    pub fn has_molecular_events(&self) -> bool {
        !self.molecular_events.is_empty()
    }
}

/// Read-only trial-level projection for reporting
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluatedTrial {
    pub trial_id: String,
    pub acronym: String,
    pub is_open: bool,
    /// True iff at least one cohort is potentially eligible
    pub is_potentially_eligible: bool,
    pub cohorts: Vec<EvaluatedCohort>,
}

/// Project one trial match into its evaluated cohorts
pub fn evaluate_cohorts(trial_match: &TrialMatch) -> Vec<EvaluatedCohort> {
    if trial_match.cohort_matches.is_empty() {
        return vec![evaluate_single_cohort(
            trial_match,
            None,
            trial_match.evaluations.values(),
        )];
    }

    trial_match
        .cohort_matches
        .iter()
        .map(|cohort_match| {
            let evaluations = trial_match
                .evaluations
                .values()
                .chain(cohort_match.evaluations.values());
            evaluate_single_cohort(trial_match, Some(cohort_match), evaluations)
        })
        .collect()
}

/// Project one trial match into its trial-level projection
pub fn evaluate_trial(trial_match: &TrialMatch) -> EvaluatedTrial {
    let cohorts = evaluate_cohorts(trial_match);
    EvaluatedTrial {
        trial_id: trial_match.identification.trial_id.clone(),
        acronym: trial_match.identification.acronym.clone(),
        is_open: trial_match.identification.open,
        is_potentially_eligible: cohorts.iter().any(|c| c.is_potentially_eligible),
        cohorts,
    }
}

fn evaluate_single_cohort<'a>(
    trial_match: &TrialMatch,
    cohort_match: Option<&CohortMatch>,
    evaluations: impl Iterator<Item = &'a Evaluation>,
) -> EvaluatedCohort {
    let trial = &trial_match.identification;
    let evaluations: Vec<&Evaluation> = evaluations.collect();

    let is_potentially_eligible = !evaluations.iter().any(|e| e.is_unrecoverable_fail());

    let mut molecular_events = BTreeSet::new();
    let mut warnings = BTreeSet::new();
    let mut fails = BTreeSet::new();
    for evaluation in &evaluations {
        molecular_events.extend(evaluation.inclusion_molecular_events.iter().cloned());
        match evaluation.result {
            EvaluationResult::Fail if evaluation.recoverable => {
                warnings.extend(evaluation.fail_general_messages.iter().cloned());
            }
            EvaluationResult::Fail => {
                fails.extend(evaluation.fail_general_messages.iter().cloned());
            }
            EvaluationResult::Warn => {
                warnings.extend(evaluation.warn_general_messages.iter().cloned());
            }
            EvaluationResult::Undetermined if !evaluation.recoverable => {
                warnings.extend(evaluation.undetermined_general_messages.iter().cloned());
            }
            _ => {}
        }
    }

    let (description, is_open, has_slots_available) = match cohort_match {
        Some(cohort_match) => {
            let metadata = &cohort_match.metadata;
            (
                metadata.description.clone(),
                trial.open && metadata.open && !metadata.blacklist,
                metadata.slots_available,
            )
        }
        // The implicit cohort of a cohort-less trial adds no restrictions
        None => (String::new(), trial.open, true),
    };

    EvaluatedCohort {
        trial_id: trial.trial_id.clone(),
        acronym: trial.acronym.clone(),
        cohort_description: description,
        is_potentially_eligible,
        is_open,
        has_slots_available,
        molecular_events,
        warnings,
        fails,
    }
}
