//! Laboratory value predicates
//!
//! Lab failures are recoverable: values change between blood draws, so a
//! value outside range today may be inside range at screening.

use crate::{Evaluation, EvaluationFunction};
use rust_decimal::Decimal;
use trialmatch_model::PatientRecord;

/// Checks that the most recent screening lab value is at least a minimum
pub struct HasSufficientLabValue {
    min: Decimal,
}

impl HasSufficientLabValue {
    pub fn new(min: Decimal) -> Self {
        Self { min }
    }
}

impl EvaluationFunction for HasSufficientLabValue {
    fn evaluate(&self, record: &PatientRecord) -> Evaluation {
        match record.most_recent_lab_overall() {
            Some(lab) if lab.value >= self.min => Evaluation::pass(
                format!(
                    "Lab value {} {} meets minimum {}",
                    lab.value, lab.unit, self.min
                ),
                "Sufficient lab value",
            ),
            Some(lab) => Evaluation::recoverable_fail(
                format!(
                    "Lab value {} {} is below minimum {}",
                    lab.value, lab.unit, self.min
                ),
                "Insufficient lab value",
            ),
            None => Evaluation::recoverable_fail(
                "No lab measurements available",
                "Missing lab values",
            ),
        }
    }
}

/// Checks that the most recent screening lab value is at most a maximum
pub struct HasLimitedLabValue {
    max: Decimal,
}

impl HasLimitedLabValue {
    pub fn new(max: Decimal) -> Self {
        Self { max }
    }
}

impl EvaluationFunction for HasLimitedLabValue {
    fn evaluate(&self, record: &PatientRecord) -> Evaluation {
        match record.most_recent_lab_overall() {
            Some(lab) if lab.value <= self.max => Evaluation::pass(
                format!(
                    "Lab value {} {} is within maximum {}",
                    lab.value, lab.unit, self.max
                ),
                "Lab value within limit",
            ),
            Some(lab) => Evaluation::recoverable_fail(
                format!(
                    "Lab value {} {} exceeds maximum {}",
                    lab.value, lab.unit, self.max
                ),
                "Lab value exceeds limit",
            ),
            None => Evaluation::recoverable_fail(
                "No lab measurements available",
                "Missing lab values",
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combinators::testing::record;
    use crate::EvaluationResult;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use trialmatch_model::LabMeasurement;

    fn patient_with_lab(value: i64) -> trialmatch_model::PatientRecord {
        let mut patient = record();
        patient.labs.push(LabMeasurement {
            code: "ANC".to_string(),
            value: Decimal::new(value, 0),
            unit: "10^9/L".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 5, 15).unwrap(),
        });
        patient
    }

    #[test]
    fn test_sufficient_value_passes() {
        let function = HasSufficientLabValue::new(Decimal::new(200, 0));
        assert_eq!(
            function.evaluate(&patient_with_lab(300)).result,
            EvaluationResult::Pass
        );
    }

    #[test]
    fn test_insufficient_value_fails_recoverably() {
        let function = HasSufficientLabValue::new(Decimal::new(200, 0));
        let evaluation = function.evaluate(&patient_with_lab(100));
        assert_eq!(evaluation.result, EvaluationResult::Fail);
        assert!(evaluation.recoverable);
    }

    #[test]
    fn test_missing_labs_fail_recoverably() {
        let function = HasSufficientLabValue::new(Decimal::new(200, 0));
        let evaluation = function.evaluate(&record());
        assert_eq!(evaluation.result, EvaluationResult::Fail);
        assert!(evaluation.recoverable);
        assert!(evaluation.fail_general_messages.contains("Missing lab values"));
    }

    #[test]
    fn test_limited_value() {
        let function = HasLimitedLabValue::new(Decimal::new(200, 0));
        assert_eq!(
            function.evaluate(&patient_with_lab(100)).result,
            EvaluationResult::Pass
        );
        assert_eq!(
            function.evaluate(&patient_with_lab(300)).result,
            EvaluationResult::Fail
        );
    }
}
