//! The eligibility rule catalog
//!
//! Every criterion in trial configuration text names a member of this fixed,
//! versioned enumeration. The four composite rules combine nested criteria;
//! all other members identify a leaf predicate evaluated against the patient
//! record. Adding a predicate means adding a variant here plus a creator in
//! the function resolver.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// A member of the eligibility rule catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EligibilityRule {
    // === Composite rules ===
    /// All nested criteria must hold
    And,
    /// At least one nested criterion must hold
    Or,
    /// The nested criterion must not hold
    Not,
    /// A passing nested criterion becomes a warning
    WarnIf,

    // === Demographics ===
    IsAtLeastXYearsOld,
    IsMale,
    IsFemale,

    // === General condition ===
    HasWhoStatusOfAtMostX,
    HasLifeExpectancyOfAtLeastXMonths,
    IsAbleToGiveAdequateInformedConsent,

    // === Tumor ===
    HasSolidPrimaryTumor,
    HasAdvancedCancer,
    HasMetastaticCancer,
    HasMeasurableDisease,
    HasBrainMetastases,
    HasTumorStageX,

    // === Laboratory ===
    HasSufficientLabValue,
    HasLimitedLabValue,

    // === Medication ===
    CurrentlyGetsMedication,
    CurrentlyGetsMedicationOfCategoryX,

    // === Prior treatment ===
    HasHadAnyCancerTreatment,
    HasHadTreatmentWithCategoryX,
    HasHadLimitedSystemicTreatments,

    // === Molecular ===
    ActivatingMutationInGeneX,
    InactivationOfGeneX,
    MsiSignature,
    HasMolecularEventInGeneX,

    // === Infection ===
    HasActiveInfection,
    HasKnownHivInfection,
    HasKnownHepatitisBInfection,

    // === Toxicity / intolerance ===
    HasAllergyRelatedToStudyMedication,
    HasHistoryOfCardiacDisease,
    HasHistoryOfSecondMalignancy,
}

impl EligibilityRule {
    /// All catalog members, composites first
    pub const ALL: &'static [EligibilityRule] = &[
        Self::And,
        Self::Or,
        Self::Not,
        Self::WarnIf,
        Self::IsAtLeastXYearsOld,
        Self::IsMale,
        Self::IsFemale,
        Self::HasWhoStatusOfAtMostX,
        Self::HasLifeExpectancyOfAtLeastXMonths,
        Self::IsAbleToGiveAdequateInformedConsent,
        Self::HasSolidPrimaryTumor,
        Self::HasAdvancedCancer,
        Self::HasMetastaticCancer,
        Self::HasMeasurableDisease,
        Self::HasBrainMetastases,
        Self::HasTumorStageX,
        Self::HasSufficientLabValue,
        Self::HasLimitedLabValue,
        Self::CurrentlyGetsMedication,
        Self::CurrentlyGetsMedicationOfCategoryX,
        Self::HasHadAnyCancerTreatment,
        Self::HasHadTreatmentWithCategoryX,
        Self::HasHadLimitedSystemicTreatments,
        Self::ActivatingMutationInGeneX,
        Self::InactivationOfGeneX,
        Self::MsiSignature,
        Self::HasMolecularEventInGeneX,
        Self::HasActiveInfection,
        Self::HasKnownHivInfection,
        Self::HasKnownHepatitisBInfection,
        Self::HasAllergyRelatedToStudyMedication,
        Self::HasHistoryOfCardiacDisease,
        Self::HasHistoryOfSecondMalignancy,
    ];

    /// The stable wire name used in criterion text
    pub const fn name(&self) -> &'static str {
        match self {
            Self::And => "AND",
            Self::Or => "OR",
            Self::Not => "NOT",
            Self::WarnIf => "WARN_IF",
            Self::IsAtLeastXYearsOld => "IS_AT_LEAST_X_YEARS_OLD",
            Self::IsMale => "IS_MALE",
            Self::IsFemale => "IS_FEMALE",
            Self::HasWhoStatusOfAtMostX => "HAS_WHO_STATUS_OF_AT_MOST_X",
            Self::HasLifeExpectancyOfAtLeastXMonths => "HAS_LIFE_EXPECTANCY_OF_AT_LEAST_X_MONTHS",
            Self::IsAbleToGiveAdequateInformedConsent => {
                "IS_ABLE_TO_GIVE_ADEQUATE_INFORMED_CONSENT"
            }
            Self::HasSolidPrimaryTumor => "HAS_SOLID_PRIMARY_TUMOR",
            Self::HasAdvancedCancer => "HAS_ADVANCED_CANCER",
            Self::HasMetastaticCancer => "HAS_METASTATIC_CANCER",
            Self::HasMeasurableDisease => "HAS_MEASURABLE_DISEASE",
            Self::HasBrainMetastases => "HAS_BRAIN_METASTASES",
            Self::HasTumorStageX => "HAS_TUMOR_STAGE_X",
            Self::HasSufficientLabValue => "HAS_SUFFICIENT_LAB_VALUE",
            Self::HasLimitedLabValue => "HAS_LIMITED_LAB_VALUE",
            Self::CurrentlyGetsMedication => "CURRENTLY_GETS_MEDICATION",
            Self::CurrentlyGetsMedicationOfCategoryX => "CURRENTLY_GETS_MEDICATION_OF_CATEGORY_X",
            Self::HasHadAnyCancerTreatment => "HAS_HAD_ANY_CANCER_TREATMENT",
            Self::HasHadTreatmentWithCategoryX => "HAS_HAD_TREATMENT_WITH_CATEGORY_X",
            Self::HasHadLimitedSystemicTreatments => "HAS_HAD_LIMITED_SYSTEMIC_TREATMENTS",
            Self::ActivatingMutationInGeneX => "ACTIVATING_MUTATION_IN_GENE_X",
            Self::InactivationOfGeneX => "INACTIVATION_OF_GENE_X",
            Self::MsiSignature => "MSI_SIGNATURE",
            Self::HasMolecularEventInGeneX => "HAS_MOLECULAR_EVENT_IN_GENE_X",
            Self::HasActiveInfection => "HAS_ACTIVE_INFECTION",
            Self::HasKnownHivInfection => "HAS_KNOWN_HIV_INFECTION",
            Self::HasKnownHepatitisBInfection => "HAS_KNOWN_HEPATITIS_B_INFECTION",
            Self::HasAllergyRelatedToStudyMedication => "HAS_ALLERGY_RELATED_TO_STUDY_MEDICATION",
            Self::HasHistoryOfCardiacDisease => "HAS_HISTORY_OF_CARDIAC_DISEASE",
            Self::HasHistoryOfSecondMalignancy => "HAS_HISTORY_OF_SECOND_MALIGNANCY",
        }
    }

    /// Look up a rule by its wire name
    pub fn from_name(name: &str) -> Option<Self> {
        NAME_TO_RULE.get(name).copied()
    }

    /// Whether this rule combines nested criteria rather than evaluating
    /// the patient record directly
    pub const fn is_composite(&self) -> bool {
        matches!(self, Self::And | Self::Or | Self::Not | Self::WarnIf)
    }
}

static NAME_TO_RULE: Lazy<HashMap<&'static str, EligibilityRule>> = Lazy::new(|| {
    EligibilityRule::ALL
        .iter()
        .map(|rule| (rule.name(), *rule))
        .collect()
});

impl fmt::Display for EligibilityRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EligibilityRule {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| format!("unknown eligibility rule '{}'", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_round_trip() {
        for rule in EligibilityRule::ALL {
            assert_eq!(EligibilityRule::from_name(rule.name()), Some(*rule));
        }
    }

    #[test]
    fn test_composite_members() {
        let composites: Vec<_> = EligibilityRule::ALL
            .iter()
            .filter(|r| r.is_composite())
            .collect();
        assert_eq!(
            composites,
            vec![
                &EligibilityRule::And,
                &EligibilityRule::Or,
                &EligibilityRule::Not,
                &EligibilityRule::WarnIf,
            ]
        );
    }

    #[test]
    fn test_unknown_name() {
        assert_eq!(EligibilityRule::from_name("HAS_UNICORN"), None);
        assert!("HAS_UNICORN".parse::<EligibilityRule>().is_err());
    }

    #[test]
    fn test_display_matches_wire_name() {
        assert_eq!(EligibilityRule::WarnIf.to_string(), "WARN_IF");
        assert_eq!(
            EligibilityRule::HasSufficientLabValue.to_string(),
            "HAS_SUFFICIENT_LAB_VALUE"
        );
    }
}
