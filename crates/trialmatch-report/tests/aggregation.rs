//! Tests for cohort and trial aggregation

use pretty_assertions::assert_eq;
use trialmatch_eval::Evaluation;
use trialmatch_model::{CohortMetadata, CriterionReference, TrialIdentification};
use trialmatch_report::{
    evaluate_cohorts, evaluate_trial, CohortMatch, EvaluationMap, TrialMatch,
};

fn identification(open: bool) -> TrialIdentification {
    TrialIdentification {
        trial_id: "NCT00000001".to_string(),
        acronym: "TEST".to_string(),
        open,
    }
}

fn metadata(cohort_id: &str) -> CohortMetadata {
    CohortMetadata {
        cohort_id: cohort_id.to_string(),
        description: format!("cohort {}", cohort_id),
        open: true,
        blacklist: false,
        slots_available: true,
    }
}

fn evaluations(entries: Vec<(&str, Evaluation)>) -> EvaluationMap {
    entries
        .into_iter()
        .map(|(id, evaluation)| (CriterionReference::new(id, format!("criterion {}", id)), evaluation))
        .collect()
}

fn trial_match(
    open: bool,
    trial_evaluations: EvaluationMap,
    cohort_matches: Vec<CohortMatch>,
) -> TrialMatch {
    TrialMatch {
        identification: identification(open),
        evaluations: trial_evaluations,
        cohort_matches,
    }
}

#[test]
fn test_recoverable_fail_keeps_cohort_potentially_eligible() {
    let trial = trial_match(
        true,
        evaluations(vec![(
            "I-01",
            Evaluation::recoverable_fail("missing labs", "Missing lab values"),
        )]),
        Vec::new(),
    );

    let cohorts = evaluate_cohorts(&trial);
    assert_eq!(cohorts.len(), 1);
    assert!(cohorts[0].is_potentially_eligible);
}

#[test]
fn test_unrecoverable_fail_flips_potential_eligibility() {
    let trial = trial_match(
        true,
        evaluations(vec![
            (
                "I-01",
                Evaluation::recoverable_fail("missing labs", "Missing lab values"),
            ),
            (
                "I-02",
                Evaluation::fail("wrong tumor type", "Tumor type mismatch"),
            ),
        ]),
        Vec::new(),
    );

    let cohorts = evaluate_cohorts(&trial);
    assert!(!cohorts[0].is_potentially_eligible);
}

#[test]
fn test_unrecoverable_fail_in_cohort_criteria_counts() {
    // Trial-level evaluations pass; the cohort's own criterion disqualifies.
    let trial = trial_match(
        true,
        evaluations(vec![("I-01", Evaluation::pass("fine", "Fine"))]),
        vec![
            CohortMatch {
                metadata: metadata("A"),
                evaluations: evaluations(vec![(
                    "C-01",
                    Evaluation::fail("no BRAF mutation", "No BRAF mutation"),
                )]),
            },
            CohortMatch {
                metadata: metadata("B"),
                evaluations: EvaluationMap::new(),
            },
        ],
    );

    let cohorts = evaluate_cohorts(&trial);
    assert_eq!(cohorts.len(), 2);
    assert!(!cohorts[0].is_potentially_eligible);
    assert!(cohorts[1].is_potentially_eligible);
}

#[test]
fn test_warning_and_fail_messages_stay_disjoint() {
    let trial = trial_match(
        true,
        evaluations(vec![
            ("I-01", Evaluation::warn("borderline value", "Borderline value")),
            ("I-02", Evaluation::fail("hard stop", "Hard stop")),
            (
                "I-03",
                Evaluation::recoverable_fail("missing data", "Missing data"),
            ),
            (
                "I-04",
                Evaluation::undetermined("cannot assess", "Cannot assess"),
            ),
        ]),
        Vec::new(),
    );

    let cohort = &evaluate_cohorts(&trial)[0];

    assert!(cohort.warnings.contains("Borderline value"));
    assert!(cohort.warnings.contains("Missing data"));
    assert!(cohort.warnings.contains("Cannot assess"));
    assert!(!cohort.warnings.contains("Hard stop"));

    assert!(cohort.fails.contains("Hard stop"));
    assert!(!cohort.fails.contains("Borderline value"));
    assert!(!cohort.fails.contains("Missing data"));
}

#[test]
fn test_recoverable_undetermined_does_not_warn() {
    let trial = trial_match(
        true,
        evaluations(vec![(
            "I-01",
            Evaluation::recoverable_undetermined("pending curation", "Pending curation"),
        )]),
        Vec::new(),
    );

    let cohort = &evaluate_cohorts(&trial)[0];
    assert!(cohort.warnings.is_empty());
    assert!(cohort.fails.is_empty());
}

#[test]
fn test_molecular_events_union_trial_and_cohort_level() {
    let trial = trial_match(
        true,
        evaluations(vec![(
            "I-01",
            Evaluation::pass("MSI", "MSI signature")
                .with_inclusion_molecular_events(["MSI".to_string()]),
        )]),
        vec![CohortMatch {
            metadata: metadata("A"),
            evaluations: evaluations(vec![(
                "C-01",
                Evaluation::pass("BRAF", "BRAF mutation")
                    .with_inclusion_molecular_events(["BRAF V600E".to_string()]),
            )]),
        }],
    );

    let cohort = &evaluate_cohorts(&trial)[0];
    assert!(cohort.molecular_events.contains("MSI"));
    assert!(cohort.molecular_events.contains("BRAF V600E"));
}

#[test]
fn test_openness_requires_trial_and_cohort_open_and_no_blacklist() {
    let mut closed_cohort = metadata("A");
    closed_cohort.open = false;
    let mut blacklisted = metadata("B");
    blacklisted.blacklist = true;
    let mut no_slots = metadata("C");
    no_slots.slots_available = false;

    let trial = trial_match(
        true,
        EvaluationMap::new(),
        vec![
            CohortMatch {
                metadata: closed_cohort,
                evaluations: EvaluationMap::new(),
            },
            CohortMatch {
                metadata: blacklisted,
                evaluations: EvaluationMap::new(),
            },
            CohortMatch {
                metadata: no_slots,
                evaluations: EvaluationMap::new(),
            },
        ],
    );

    let cohorts = evaluate_cohorts(&trial);
    assert!(!cohorts[0].is_open);
    assert!(!cohorts[1].is_open);
    assert!(cohorts[2].is_open);
    assert!(!cohorts[2].has_slots_available);
}

#[test]
fn test_closed_trial_closes_all_cohorts() {
    let trial = trial_match(
        false,
        EvaluationMap::new(),
        vec![CohortMatch {
            metadata: metadata("A"),
            evaluations: EvaluationMap::new(),
        }],
    );

    assert!(!evaluate_cohorts(&trial)[0].is_open);
}

#[test]
fn test_trial_without_cohorts_gets_implicit_cohort() {
    let trial = trial_match(true, EvaluationMap::new(), Vec::new());

    let cohorts = evaluate_cohorts(&trial);
    assert_eq!(cohorts.len(), 1);
    assert!(cohorts[0].is_potentially_eligible);
    assert!(cohorts[0].is_open);
    assert!(cohorts[0].has_slots_available);
}

#[test]
fn test_zero_criteria_is_vacuously_eligible() {
    let trial = trial_match(
        true,
        EvaluationMap::new(),
        vec![CohortMatch {
            metadata: metadata("A"),
            evaluations: EvaluationMap::new(),
        }],
    );

    assert!(evaluate_cohorts(&trial)[0].is_potentially_eligible);
}

#[test]
fn test_evaluated_trial_rolls_up_cohort_eligibility() {
    let eligible = trial_match(true, EvaluationMap::new(), Vec::new());
    assert!(evaluate_trial(&eligible).is_potentially_eligible);

    let ineligible = trial_match(
        true,
        evaluations(vec![("I-01", Evaluation::fail("stop", "Stop"))]),
        Vec::new(),
    );
    let evaluated = evaluate_trial(&ineligible);
    assert!(!evaluated.is_potentially_eligible);
    assert_eq!(evaluated.trial_id, "NCT00000001");
}
