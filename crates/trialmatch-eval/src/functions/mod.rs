//! Reference leaf predicates
//!
//! The production rule catalog is backed by hundreds of predicates owned by
//! clinical teams; this module ships a representative set so the engine is
//! exercisable end to end, grouped per clinical concern. Predicates read the
//! patient record through its total accessors and express insufficiency as
//! recoverable fails or undetermined results, never as errors.
//!
//! Rules whose predicate needs data the curated record does not yet carry
//! are registered as `NOT_IMPLEMENTED` placeholders so full catalogs remain
//! loadable.

mod demographics;
mod laboratory;
mod medication;
mod molecular;
mod treatment;
mod tumor;

use crate::FunctionResolver;
use std::str::FromStr;
use trialmatch_ast::{EligibilityRule, FunctionParameter};
use trialmatch_diagnostics::{Result, TrialError, TRM0202};

/// Register the reference predicates plus placeholders for the remainder of
/// the catalog
pub(crate) fn register_reference_functions(resolver: &mut FunctionResolver) {
    use EligibilityRule as Rule;

    // Demographics
    resolver.register(Rule::IsAtLeastXYearsOld, |params| {
        let min_age = parse_literal::<i32>(Rule::IsAtLeastXYearsOld, params)?;
        Ok(Box::new(demographics::IsAtLeastXYearsOld::new(min_age)))
    });
    resolver.register(Rule::IsMale, |_params| {
        Ok(Box::new(demographics::HasGender::male()))
    });
    resolver.register(Rule::IsFemale, |_params| {
        Ok(Box::new(demographics::HasGender::female()))
    });
    resolver.register(Rule::HasWhoStatusOfAtMostX, |params| {
        let max_status = parse_literal::<u32>(Rule::HasWhoStatusOfAtMostX, params)?;
        Ok(Box::new(demographics::HasWhoStatusOfAtMost::new(max_status)))
    });

    // Tumor
    resolver.register(Rule::HasAdvancedCancer, |_params| {
        Ok(Box::new(tumor::HasAdvancedCancer))
    });
    resolver.register(Rule::HasMetastaticCancer, |_params| {
        Ok(Box::new(tumor::HasMetastaticCancer))
    });
    resolver.register(Rule::HasMeasurableDisease, |_params| {
        Ok(Box::new(tumor::HasMeasurableDisease))
    });
    resolver.register(Rule::HasBrainMetastases, |_params| {
        Ok(Box::new(tumor::HasBrainMetastases))
    });
    resolver.register(Rule::HasTumorStageX, |params| {
        let stage = tumor::parse_stage(one_literal(Rule::HasTumorStageX, params)?)?;
        Ok(Box::new(tumor::HasTumorStage::new(stage)))
    });

    // Laboratory
    resolver.register(Rule::HasSufficientLabValue, |params| {
        let min = parse_literal(Rule::HasSufficientLabValue, params)?;
        Ok(Box::new(laboratory::HasSufficientLabValue::new(min)))
    });
    resolver.register(Rule::HasLimitedLabValue, |params| {
        let max = parse_literal(Rule::HasLimitedLabValue, params)?;
        Ok(Box::new(laboratory::HasLimitedLabValue::new(max)))
    });

    // Medication
    resolver.register(Rule::CurrentlyGetsMedication, |_params| {
        Ok(Box::new(medication::CurrentlyGetsMedication))
    });
    resolver.register(Rule::CurrentlyGetsMedicationOfCategoryX, |params| {
        let category = one_literal(Rule::CurrentlyGetsMedicationOfCategoryX, params)?;
        Ok(Box::new(medication::CurrentlyGetsMedicationOfCategory::new(
            category,
        )))
    });

    // Prior treatment
    resolver.register(Rule::HasHadAnyCancerTreatment, |_params| {
        Ok(Box::new(treatment::HasHadAnyCancerTreatment))
    });
    resolver.register(Rule::HasHadTreatmentWithCategoryX, |params| {
        let category = one_literal(Rule::HasHadTreatmentWithCategoryX, params)?;
        Ok(Box::new(treatment::HasHadTreatmentWithCategory::new(category)))
    });
    resolver.register(Rule::HasHadLimitedSystemicTreatments, |params| {
        let max_lines = parse_literal::<usize>(Rule::HasHadLimitedSystemicTreatments, params)?;
        Ok(Box::new(treatment::HasHadLimitedSystemicTreatments::new(
            max_lines,
        )))
    });

    // Molecular
    resolver.register(Rule::ActivatingMutationInGeneX, |params| {
        let gene = one_literal(Rule::ActivatingMutationInGeneX, params)?;
        Ok(Box::new(molecular::ActivatingMutationInGene::new(gene)))
    });
    resolver.register(Rule::InactivationOfGeneX, |params| {
        let gene = one_literal(Rule::InactivationOfGeneX, params)?;
        Ok(Box::new(molecular::InactivationOfGene::new(gene)))
    });
    resolver.register(Rule::MsiSignature, |_params| {
        Ok(Box::new(molecular::MsiSignature))
    });
    resolver.register(Rule::HasMolecularEventInGeneX, |params| {
        let gene = one_literal(Rule::HasMolecularEventInGeneX, params)?;
        Ok(Box::new(molecular::HasMolecularEventInGene::new(gene)))
    });

    // Predicates pending curation support
    resolver.register_not_implemented(Rule::HasLifeExpectancyOfAtLeastXMonths);
    resolver.register_not_implemented(Rule::IsAbleToGiveAdequateInformedConsent);
    resolver.register_not_implemented(Rule::HasSolidPrimaryTumor);
    resolver.register_not_implemented(Rule::HasActiveInfection);
    resolver.register_not_implemented(Rule::HasKnownHivInfection);
    resolver.register_not_implemented(Rule::HasKnownHepatitisBInfection);
    resolver.register_not_implemented(Rule::HasAllergyRelatedToStudyMedication);
    resolver.register_not_implemented(Rule::HasHistoryOfCardiacDisease);
    resolver.register_not_implemented(Rule::HasHistoryOfSecondMalignancy);
}

/// Extract the single literal parameter of a leaf rule
pub(crate) fn one_literal(
    rule: EligibilityRule,
    params: &[FunctionParameter],
) -> Result<&str> {
    match params {
        [FunctionParameter::Literal(text)] => Ok(text),
        _ => Err(TrialError::resolution(
            TRM0202,
            format!("expected exactly one literal parameter, got {}", params.len()),
            rule.name(),
        )),
    }
}

/// Extract and parse the single literal parameter of a leaf rule
pub(crate) fn parse_literal<T: FromStr>(
    rule: EligibilityRule,
    params: &[FunctionParameter],
) -> Result<T> {
    let text = one_literal(rule, params)?;
    text.parse().map_err(|_| {
        TrialError::resolution(
            TRM0202,
            format!("cannot parse parameter '{}'", text),
            rule.name(),
        )
    })
}
