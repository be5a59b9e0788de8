//! Molecular predicates
//!
//! Passing molecular predicates attach the driver events that justify the
//! pass as inclusion molecular events; the aggregator propagates them to
//! cohort level for cross-referencing against detected drivers.

use crate::{Evaluation, EvaluationFunction};
use trialmatch_model::{DriverType, PatientRecord};

fn events_of<'a>(
    record: &'a PatientRecord,
    gene: &'a str,
    driver_type: Option<DriverType>,
) -> impl Iterator<Item = String> + 'a {
    record
        .drivers_in_gene(gene)
        .filter(move |driver| driver_type.is_none_or(|t| driver.driver_type == t))
        .map(|driver| driver.event.clone())
}

fn unreliable_assay() -> Evaluation {
    Evaluation::recoverable_undetermined(
        "Molecular results did not pass quality control",
        "Molecular results unreliable",
    )
}

/// Checks for an activating mutation in a gene
pub struct ActivatingMutationInGene {
    gene: String,
}

impl ActivatingMutationInGene {
    pub fn new(gene: impl Into<String>) -> Self {
        Self { gene: gene.into() }
    }
}

impl EvaluationFunction for ActivatingMutationInGene {
    fn evaluate(&self, record: &PatientRecord) -> Evaluation {
        if !record.molecular.has_reliable_quality {
            return unreliable_assay();
        }
        let events: Vec<String> =
            events_of(record, &self.gene, Some(DriverType::ActivatingMutation)).collect();
        if events.is_empty() {
            Evaluation::fail(
                format!("No activating mutation detected in {}", self.gene),
                format!("No {} activating mutation", self.gene),
            )
        } else {
            Evaluation::pass(
                format!(
                    "Activating mutation in {}: {}",
                    self.gene,
                    events.join(", ")
                ),
                format!("{} activating mutation", self.gene),
            )
            .with_inclusion_molecular_events(events)
        }
    }
}

/// Checks for an inactivating event in a gene
pub struct InactivationOfGene {
    gene: String,
}

impl InactivationOfGene {
    pub fn new(gene: impl Into<String>) -> Self {
        Self { gene: gene.into() }
    }
}

impl EvaluationFunction for InactivationOfGene {
    fn evaluate(&self, record: &PatientRecord) -> Evaluation {
        if !record.molecular.has_reliable_quality {
            return unreliable_assay();
        }
        let events: Vec<String> =
            events_of(record, &self.gene, Some(DriverType::Inactivation)).collect();
        if events.is_empty() {
            Evaluation::fail(
                format!("No inactivation detected of {}", self.gene),
                format!("No {} inactivation", self.gene),
            )
        } else {
            Evaluation::pass(
                format!("Inactivation of {}: {}", self.gene, events.join(", ")),
                format!("{} inactivation", self.gene),
            )
            .with_inclusion_molecular_events(events)
        }
    }
}

/// Checks for microsatellite instability
pub struct MsiSignature;

impl EvaluationFunction for MsiSignature {
    fn evaluate(&self, record: &PatientRecord) -> Evaluation {
        match record.molecular.is_microsatellite_unstable {
            Some(true) => Evaluation::pass(
                "Tumor is microsatellite unstable",
                "MSI signature",
            )
            .with_inclusion_molecular_events(["MSI".to_string()]),
            Some(false) => Evaluation::fail(
                "Tumor is microsatellite stable",
                "No MSI signature",
            ),
            None => Evaluation::recoverable_fail(
                "Microsatellite status has not been tested",
                "Missing MSI status",
            ),
        }
    }
}

/// Checks for any detected driver event in a gene
pub struct HasMolecularEventInGene {
    gene: String,
}

impl HasMolecularEventInGene {
    pub fn new(gene: impl Into<String>) -> Self {
        Self { gene: gene.into() }
    }
}

impl EvaluationFunction for HasMolecularEventInGene {
    fn evaluate(&self, record: &PatientRecord) -> Evaluation {
        if !record.molecular.has_reliable_quality {
            return unreliable_assay();
        }
        let events: Vec<String> = events_of(record, &self.gene, None).collect();
        if events.is_empty() {
            Evaluation::fail(
                format!("No molecular event detected in {}", self.gene),
                format!("No {} event", self.gene),
            )
        } else {
            Evaluation::pass(
                format!("Molecular event in {}: {}", self.gene, events.join(", ")),
                format!("{} event", self.gene),
            )
            .with_inclusion_molecular_events(events)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combinators::testing::record;
    use crate::EvaluationResult;
    use pretty_assertions::assert_eq;
    use trialmatch_model::Driver;

    fn patient_with_driver(gene: &str, event: &str, driver_type: DriverType) -> PatientRecord {
        let mut patient = record();
        patient.molecular.has_reliable_quality = true;
        patient.molecular.drivers.push(Driver {
            gene: gene.to_string(),
            event: event.to_string(),
            driver_type,
        });
        patient
    }

    #[test]
    fn test_activating_mutation_passes_with_event() {
        let patient = patient_with_driver("BRAF", "BRAF V600E", DriverType::ActivatingMutation);
        let evaluation = ActivatingMutationInGene::new("BRAF").evaluate(&patient);
        assert_eq!(evaluation.result, EvaluationResult::Pass);
        assert!(evaluation.inclusion_molecular_events.contains("BRAF V600E"));
    }

    #[test]
    fn test_wrong_driver_type_fails() {
        let patient = patient_with_driver("BRAF", "BRAF del", DriverType::Inactivation);
        let evaluation = ActivatingMutationInGene::new("BRAF").evaluate(&patient);
        assert_eq!(evaluation.result, EvaluationResult::Fail);
        assert!(evaluation.inclusion_molecular_events.is_empty());
    }

    #[test]
    fn test_unreliable_assay_is_undetermined() {
        let mut patient = patient_with_driver("BRAF", "BRAF V600E", DriverType::ActivatingMutation);
        patient.molecular.has_reliable_quality = false;
        let evaluation = ActivatingMutationInGene::new("BRAF").evaluate(&patient);
        assert_eq!(evaluation.result, EvaluationResult::Undetermined);
        assert!(evaluation.recoverable);
    }

    #[test]
    fn test_msi_states() {
        let mut patient = record();
        patient.molecular.is_microsatellite_unstable = Some(true);
        let evaluation = MsiSignature.evaluate(&patient);
        assert_eq!(evaluation.result, EvaluationResult::Pass);
        assert!(evaluation.inclusion_molecular_events.contains("MSI"));

        patient.molecular.is_microsatellite_unstable = Some(false);
        assert_eq!(MsiSignature.evaluate(&patient).result, EvaluationResult::Fail);

        patient.molecular.is_microsatellite_unstable = None;
        let evaluation = MsiSignature.evaluate(&patient);
        assert_eq!(evaluation.result, EvaluationResult::Fail);
        assert!(evaluation.recoverable);
    }

    #[test]
    fn test_any_event_in_gene() {
        let patient = patient_with_driver("KRAS", "KRAS amp", DriverType::Amplification);
        let evaluation = HasMolecularEventInGene::new("KRAS").evaluate(&patient);
        assert_eq!(evaluation.result, EvaluationResult::Pass);
        assert!(evaluation.inclusion_molecular_events.contains("KRAS amp"));
    }
}
