//! Presentation order for evaluated cohorts
//!
//! Reports list molecular-event-backed cohorts first, then order by trial
//! id; among event-backed cohorts, combination-treatment cohorts sort after
//! simple ones. Remaining ties break on description and finally on the
//! molecular event sets themselves, larger sets first.

use crate::EvaluatedCohort;
use std::cmp::Ordering;

/// Cohort descriptions containing this marker denote combination treatments
const COMBINATION_MARKER: &str = "+";

/// Compare two evaluated cohorts for presentation
pub fn compare_cohorts(a: &EvaluatedCohort, b: &EvaluatedCohort) -> Ordering {
    // Event-backed cohorts first
    b.has_molecular_events()
        .cmp(&a.has_molecular_events())
        .then_with(|| a.trial_id.cmp(&b.trial_id))
        .then_with(|| {
            if a.has_molecular_events() && b.has_molecular_events() {
                is_combination(a).cmp(&is_combination(b))
            } else {
                Ordering::Equal
            }
        })
        .then_with(|| a.cohort_description.cmp(&b.cohort_description))
        .then_with(|| compare_event_sets(a, b))
}

/// Sort evaluated cohorts in place for presentation
pub fn sort_cohorts(cohorts: &mut [EvaluatedCohort]) {
    cohorts.sort_by(compare_cohorts);
}

fn is_combination(cohort: &EvaluatedCohort) -> bool {
    cohort.cohort_description.contains(COMBINATION_MARKER)
}

/// Larger (more specific) event sets first, then element-by-element
/// lexicographic
fn compare_event_sets(a: &EvaluatedCohort, b: &EvaluatedCohort) -> Ordering {
    b.molecular_events
        .len()
        .cmp(&a.molecular_events.len())
        .then_with(|| a.molecular_events.iter().cmp(b.molecular_events.iter()))
}
