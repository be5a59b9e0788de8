//! Medication predicates

use crate::{Evaluation, EvaluationFunction};
use trialmatch_model::PatientRecord;

/// Checks whether the patient currently receives any medication
pub struct CurrentlyGetsMedication;

impl EvaluationFunction for CurrentlyGetsMedication {
    fn evaluate(&self, record: &PatientRecord) -> Evaluation {
        let active: Vec<&str> = record
            .active_medications()
            .map(|m| m.name.as_str())
            .collect();
        if active.is_empty() {
            Evaluation::fail(
                "Patient currently gets no medication",
                "No active medication",
            )
        } else {
            Evaluation::pass(
                format!("Patient currently gets medication: {}", active.join(", ")),
                "Active medication",
            )
        }
    }
}

/// Checks whether the patient currently receives medication of a category
pub struct CurrentlyGetsMedicationOfCategory {
    category: String,
}

impl CurrentlyGetsMedicationOfCategory {
    pub fn new(category: impl Into<String>) -> Self {
        Self {
            category: category.into(),
        }
    }
}

impl EvaluationFunction for CurrentlyGetsMedicationOfCategory {
    fn evaluate(&self, record: &PatientRecord) -> Evaluation {
        let matching: Vec<&str> = record
            .active_medications()
            .filter(|m| m.categories.contains(&self.category))
            .map(|m| m.name.as_str())
            .collect();
        if matching.is_empty() {
            Evaluation::fail(
                format!(
                    "Patient currently gets no medication of category {}",
                    self.category
                ),
                format!("No {} medication", self.category),
            )
        } else {
            Evaluation::pass(
                format!(
                    "Patient currently gets {} medication: {}",
                    self.category,
                    matching.join(", ")
                ),
                format!("Active {} medication", self.category),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combinators::testing::record;
    use crate::EvaluationResult;
    use pretty_assertions::assert_eq;
    use trialmatch_model::{Medication, MedicationStatus};

    fn medication(name: &str, status: MedicationStatus, categories: &[&str]) -> Medication {
        Medication {
            name: name.to_string(),
            status,
            categories: categories.iter().map(|c| c.to_string()).collect(),
        }
    }

    #[test]
    fn test_no_active_medication_fails() {
        let mut patient = record();
        patient
            .medications
            .push(medication("simvastatin", MedicationStatus::Stopped, &[]));
        assert_eq!(
            CurrentlyGetsMedication.evaluate(&patient).result,
            EvaluationResult::Fail
        );
    }

    #[test]
    fn test_active_medication_passes() {
        let mut patient = record();
        patient
            .medications
            .push(medication("metformin", MedicationStatus::Active, &[]));
        let evaluation = CurrentlyGetsMedication.evaluate(&patient);
        assert_eq!(evaluation.result, EvaluationResult::Pass);
        assert!(evaluation
            .pass_specific_messages
            .iter()
            .any(|m| m.contains("metformin")));
    }

    #[test]
    fn test_category_filter() {
        let mut patient = record();
        patient.medications.push(medication(
            "dexamethasone",
            MedicationStatus::Active,
            &["CORTICOSTEROID"],
        ));

        let steroid = CurrentlyGetsMedicationOfCategory::new("CORTICOSTEROID");
        assert_eq!(steroid.evaluate(&patient).result, EvaluationResult::Pass);

        let anticoagulant = CurrentlyGetsMedicationOfCategory::new("ANTICOAGULANT");
        assert_eq!(
            anticoagulant.evaluate(&patient).result,
            EvaluationResult::Fail
        );
    }
}
