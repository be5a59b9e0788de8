//! Per-patient match output
//!
//! Evaluation maps preserve criterion configuration order, so reports read
//! in the same order as the trial protocol.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use trialmatch_eval::Evaluation;
use trialmatch_model::{CohortMetadata, CriterionReference, TrialIdentification};

/// Criterion evaluations keyed by their protocol reference, in
/// configuration order
pub type EvaluationMap = IndexMap<CriterionReference, Evaluation>;

/// Evaluations of one cohort's specific criteria
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CohortMatch {
    pub metadata: CohortMetadata,
    #[serde(with = "indexmap::map::serde_seq")]
    pub evaluations: EvaluationMap,
}

/// All evaluations of one trial for one patient: the trial-wide map plus
/// one map per cohort
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialMatch {
    pub identification: TrialIdentification,
    #[serde(with = "indexmap::map::serde_seq")]
    pub evaluations: EvaluationMap,
    pub cohort_matches: Vec<CohortMatch>,
}

/// The complete match result for one patient across all loaded trials
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientMatches {
    pub patient_id: String,
    pub trial_matches: Vec<TrialMatch>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use trialmatch_eval::Evaluation;

    #[test]
    fn test_trial_match_serializes_evaluations_as_pairs() {
        let mut evaluations = EvaluationMap::new();
        evaluations.insert(
            CriterionReference::new("I-01", "Adult patients"),
            Evaluation::pass("Patient is an adult", "Adequate age"),
        );
        let trial_match = TrialMatch {
            identification: TrialIdentification {
                trial_id: "NCT00000001".to_string(),
                acronym: "TEST".to_string(),
                open: true,
            },
            evaluations,
            cohort_matches: Vec::new(),
        };

        let json = serde_json::to_value(&trial_match).unwrap();
        let pairs = json["evaluations"].as_array().unwrap();
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0][0]["id"], "I-01");

        let round_trip: TrialMatch = serde_json::from_value(json).unwrap();
        assert_eq!(round_trip, trial_match);
    }
}
