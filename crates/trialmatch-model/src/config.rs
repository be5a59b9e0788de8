//! Trial and cohort configuration entities

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use trialmatch_ast::EligibilityFunction;

/// Identifying metadata of a trial
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialIdentification {
    /// Registry identifier (e.g. an NCT number)
    pub trial_id: String,
    /// Short study acronym
    pub acronym: String,
    /// Whether the trial is currently open for inclusion
    pub open: bool,
}

/// Enrollment metadata of one cohort within a trial
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CohortMetadata {
    /// Cohort identifier, unique within the trial
    pub cohort_id: String,
    /// Human-readable cohort description
    pub description: String,
    /// Whether the cohort is open for inclusion
    pub open: bool,
    /// Whether the cohort has been blacklisted for matching
    pub blacklist: bool,
    /// Whether the cohort currently has slots available
    pub slots_available: bool,
}

/// Display identity of a single criterion, as shown in reports
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CriterionReference {
    /// Criterion identifier from the trial protocol (e.g. "I-01")
    pub id: String,
    /// The protocol's criterion text
    pub text: String,
}

impl CriterionReference {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }
}

impl fmt::Display for CriterionReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id)
    }
}

/// A parsed criterion bound to the cohorts it applies to
///
/// An empty cohort set means the criterion applies to the whole trial.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Eligibility {
    /// Protocol reference of the criterion
    pub reference: CriterionReference,
    /// The parsed criterion tree
    pub function: EligibilityFunction,
    /// Cohort ids this criterion is specific to; empty = trial-wide
    pub applies_to_cohorts: BTreeSet<String>,
}

impl Eligibility {
    /// Whether this criterion applies to the whole trial
    pub fn is_trial_wide(&self) -> bool {
        self.applies_to_cohorts.is_empty()
    }

    /// Whether this criterion applies to the given cohort specifically
    pub fn applies_to(&self, cohort_id: &str) -> bool {
        self.applies_to_cohorts.contains(cohort_id)
    }
}

/// A trial with parsed eligibility, ready for matching
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trial {
    pub identification: TrialIdentification,
    /// All criteria of the trial, trial-wide and cohort-specific
    pub eligibility: Vec<Eligibility>,
    pub cohorts: Vec<CohortMetadata>,
}

impl Trial {
    /// Criteria that apply to the whole trial
    pub fn general_eligibility(&self) -> impl Iterator<Item = &Eligibility> {
        self.eligibility.iter().filter(|e| e.is_trial_wide())
    }

    /// Criteria specific to the given cohort (excluding trial-wide ones)
    pub fn cohort_specific_eligibility<'a>(
        &'a self,
        cohort_id: &'a str,
    ) -> impl Iterator<Item = &'a Eligibility> {
        self.eligibility.iter().filter(move |e| e.applies_to(cohort_id))
    }
}

/// Raw serde form of one criterion, holding unparsed rule text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CriterionConfig {
    /// Protocol reference id
    pub reference_id: String,
    /// Protocol criterion text
    pub reference_text: String,
    /// The criterion in the rule grammar, e.g. `AND(IS_MALE, HAS_ADVANCED_CANCER)`
    pub inclusion_rule: String,
    /// Cohort ids this criterion is specific to; empty or absent = trial-wide
    #[serde(default)]
    pub applies_to_cohorts: BTreeSet<String>,
}

/// Raw serde form of a trial configuration document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialConfig {
    pub trial_id: String,
    pub acronym: String,
    pub open: bool,
    #[serde(default)]
    pub cohorts: Vec<CohortMetadata>,
    #[serde(default)]
    pub criteria: Vec<CriterionConfig>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use trialmatch_ast::EligibilityRule;

    fn eligibility(id: &str, cohorts: &[&str]) -> Eligibility {
        Eligibility {
            reference: CriterionReference::new(id, "some criterion"),
            function: EligibilityFunction::leaf(EligibilityRule::IsMale, []),
            applies_to_cohorts: cohorts.iter().map(|c| c.to_string()).collect(),
        }
    }

    #[test]
    fn test_trial_wide_vs_cohort_specific() {
        let trial = Trial {
            identification: TrialIdentification {
                trial_id: "NCT00000001".to_string(),
                acronym: "TEST".to_string(),
                open: true,
            },
            eligibility: vec![
                eligibility("I-01", &[]),
                eligibility("I-02", &["A"]),
                eligibility("I-03", &["A", "B"]),
            ],
            cohorts: Vec::new(),
        };

        assert_eq!(trial.general_eligibility().count(), 1);
        assert_eq!(trial.cohort_specific_eligibility("A").count(), 2);
        assert_eq!(trial.cohort_specific_eligibility("B").count(), 1);
        assert_eq!(trial.cohort_specific_eligibility("C").count(), 0);
    }

    #[test]
    fn test_criterion_config_defaults_to_trial_wide() {
        let json = r#"{
            "reference_id": "I-01",
            "reference_text": "Adult patients",
            "inclusion_rule": "IS_AT_LEAST_X_YEARS_OLD[18]"
        }"#;
        let config: CriterionConfig = serde_json::from_str(json).unwrap();
        assert!(config.applies_to_cohorts.is_empty());
    }
}
