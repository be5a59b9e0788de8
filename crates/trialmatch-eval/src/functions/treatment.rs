//! Prior treatment predicates

use crate::{Evaluation, EvaluationFunction};
use trialmatch_model::PatientRecord;

/// Checks whether the patient has received any prior anti-cancer treatment
pub struct HasHadAnyCancerTreatment;

impl EvaluationFunction for HasHadAnyCancerTreatment {
    fn evaluate(&self, record: &PatientRecord) -> Evaluation {
        if record.treatment_history.is_empty() {
            Evaluation::fail(
                "Patient has not had any prior cancer treatment",
                "No prior cancer treatment",
            )
        } else {
            Evaluation::pass(
                "Patient has had prior cancer treatment",
                "Has had prior cancer treatment",
            )
        }
    }
}

/// Checks whether any prior treatment line carries a category
pub struct HasHadTreatmentWithCategory {
    category: String,
}

impl HasHadTreatmentWithCategory {
    pub fn new(category: impl Into<String>) -> Self {
        Self {
            category: category.into(),
        }
    }
}

impl EvaluationFunction for HasHadTreatmentWithCategory {
    fn evaluate(&self, record: &PatientRecord) -> Evaluation {
        if record.has_had_treatment_with_category(&self.category) {
            Evaluation::pass(
                format!("Patient has had {} treatment", self.category),
                format!("Has had {}", self.category),
            )
        } else {
            Evaluation::fail(
                format!("Patient has not had {} treatment", self.category),
                format!("No prior {}", self.category),
            )
        }
    }
}

/// Checks that the number of prior systemic treatment lines stays within a
/// maximum
pub struct HasHadLimitedSystemicTreatments {
    max_lines: usize,
}

impl HasHadLimitedSystemicTreatments {
    pub fn new(max_lines: usize) -> Self {
        Self { max_lines }
    }
}

impl EvaluationFunction for HasHadLimitedSystemicTreatments {
    fn evaluate(&self, record: &PatientRecord) -> Evaluation {
        let lines = record.systemic_treatment_count();
        if lines <= self.max_lines {
            Evaluation::pass(
                format!(
                    "Patient has had {} systemic treatment lines, at most {} allowed",
                    lines, self.max_lines
                ),
                "Limited prior systemic treatments",
            )
        } else {
            Evaluation::fail(
                format!(
                    "Patient has had {} systemic treatment lines, exceeding maximum {}",
                    lines, self.max_lines
                ),
                "Too many prior systemic treatments",
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
    use trialmatch_model::TreatmentHistoryEntry;

    fn entry(name: &str, categories: &[&str], is_systemic: bool) -> TreatmentHistoryEntry {
        TreatmentHistoryEntry {
            name: name.to_string(),
            categories: categories.iter().map(|c| c.to_string()).collect(),
            stop_year: Some(2023),
            is_systemic,
        }
    }

    #[test]
    fn test_no_history_fails() {
        assert_eq!(
            HasHadAnyCancerTreatment.evaluate(&record()).result,
            EvaluationResult::Fail
        );
    }

    #[test]
    fn test_category_lookup() {
        let mut patient = record();
        patient
            .treatment_history
            .push(entry("FOLFOX", &["CHEMOTHERAPY"], true));

        assert_eq!(
            HasHadAnyCancerTreatment.evaluate(&patient).result,
            EvaluationResult::Pass
        );
        assert_eq!(
            HasHadTreatmentWithCategory::new("CHEMOTHERAPY")
                .evaluate(&patient)
                .result,
            EvaluationResult::Pass
        );
        assert_eq!(
            HasHadTreatmentWithCategory::new("IMMUNOTHERAPY")
                .evaluate(&patient)
                .result,
            EvaluationResult::Fail
        );
    }

    #[test]
    fn test_systemic_line_limit() {
        let mut patient = record();
        patient
            .treatment_history
            .push(entry("FOLFOX", &["CHEMOTHERAPY"], true));
        patient
            .treatment_history
            .push(entry("pembrolizumab", &["IMMUNOTHERAPY"], true));

        assert_eq!(
            HasHadLimitedSystemicTreatments::new(2)
                .evaluate(&patient)
                .result,
            EvaluationResult::Pass
        );
        assert_eq!(
            HasHadLimitedSystemicTreatments::new(1)
                .evaluate(&patient)
                .result,
            EvaluationResult::Fail
        );
    }
}
