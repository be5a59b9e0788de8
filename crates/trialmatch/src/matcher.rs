//! Per-patient matching over wired trials
//!
//! The matcher resolves every criterion of every trial exactly once at
//! construction; an unmapped rule or bad arity fails there, before any
//! patient is seen. Matching itself is pure and synchronous over immutable
//! snapshots, so callers may fan out patients across threads over one
//! shared matcher.

use std::collections::BTreeSet;
use trialmatch_diagnostics::Result;
use trialmatch_eval::{EvaluationFunction, FunctionResolver};
use trialmatch_model::{CriterionReference, PatientRecord, Trial};
use trialmatch_report::{CohortMatch, EvaluationMap, PatientMatches, TrialMatch};

struct WiredCriterion {
    reference: CriterionReference,
    function: Box<dyn EvaluationFunction>,
    applies_to_cohorts: BTreeSet<String>,
}

struct WiredTrial {
    trial: Trial,
    criteria: Vec<WiredCriterion>,
}

/// Matches patients against a fixed set of trials
pub struct TrialMatcher {
    trials: Vec<WiredTrial>,
}

impl std::fmt::Debug for TrialMatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrialMatcher")
            .field("trials", &self.trials.len())
            .finish()
    }
}

impl TrialMatcher {
    /// Wire all trial criteria through the resolver; fails fatally on any
    /// rule that cannot be wired
    pub fn new(resolver: &FunctionResolver, trials: Vec<Trial>) -> Result<Self> {
        let trials = trials
            .into_iter()
            .map(|trial| {
                let criteria = trial
                    .eligibility
                    .iter()
                    .map(|eligibility| {
                        Ok(WiredCriterion {
                            reference: eligibility.reference.clone(),
                            function: resolver.resolve(&eligibility.function)?,
                            applies_to_cohorts: eligibility.applies_to_cohorts.clone(),
                        })
                    })
                    .collect::<Result<Vec<_>>>()?;
                log::debug!(
                    "wired {} criteria for trial {}",
                    criteria.len(),
                    trial.identification.trial_id
                );
                Ok(WiredTrial { trial, criteria })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { trials })
    }

    /// Number of wired trials
    pub fn trial_count(&self) -> usize {
        self.trials.len()
    }

    /// Evaluate one patient against all trials
    pub fn match_patient(&self, record: &PatientRecord) -> PatientMatches {
        PatientMatches {
            patient_id: record.patient_id.clone(),
            trial_matches: self
                .trials
                .iter()
                .map(|wired| match_trial(wired, record))
                .collect(),
        }
    }
}

/// Evaluate every criterion of one trial once, then distribute evaluations
/// over the trial-wide map and the cohort-specific maps
fn match_trial(wired: &WiredTrial, record: &PatientRecord) -> TrialMatch {
    let mut trial_evaluations = EvaluationMap::new();
    let mut cohort_matches: Vec<CohortMatch> = wired
        .trial
        .cohorts
        .iter()
        .map(|metadata| CohortMatch {
            metadata: metadata.clone(),
            evaluations: EvaluationMap::new(),
        })
        .collect();

    for criterion in &wired.criteria {
        let evaluation = criterion.function.evaluate(record);

        if criterion.applies_to_cohorts.is_empty() {
            trial_evaluations.insert(criterion.reference.clone(), evaluation);
        } else {
            for cohort_match in &mut cohort_matches {
                if criterion
                    .applies_to_cohorts
                    .contains(&cohort_match.metadata.cohort_id)
                {
                    cohort_match
                        .evaluations
                        .insert(criterion.reference.clone(), evaluation.clone());
                }
            }
        }
    }

    TrialMatch {
        identification: wired.trial.identification.clone(),
        evaluations: trial_evaluations,
        cohort_matches,
    }
}
