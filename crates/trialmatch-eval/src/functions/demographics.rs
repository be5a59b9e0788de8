//! Demographic and general-condition predicates

use crate::{Evaluation, EvaluationFunction};
use trialmatch_model::{Gender, PatientRecord};

/// Checks patient age at registration against a minimum.
///
/// Birth dates are curated to year precision, so a patient in the exact
/// boundary year cannot be decided either way.
pub struct IsAtLeastXYearsOld {
    min_age: i32,
}

impl IsAtLeastXYearsOld {
    pub fn new(min_age: i32) -> Self {
        Self { min_age }
    }
}

impl EvaluationFunction for IsAtLeastXYearsOld {
    fn evaluate(&self, record: &PatientRecord) -> Evaluation {
        let age = record.age_at_registration();
        if age > self.min_age {
            Evaluation::pass(
                format!("Patient is at least {} years old", self.min_age),
                "Adequate age",
            )
        } else if age == self.min_age {
            Evaluation::undetermined(
                format!(
                    "Patient birth year cannot decide whether age is above {}",
                    self.min_age
                ),
                "Age unclear from birth year",
            )
        } else {
            Evaluation::fail(
                format!("Patient is younger than {} years", self.min_age),
                "Inadequate age",
            )
        }
    }
}

/// Checks the registered gender
pub struct HasGender {
    gender: Gender,
}

impl HasGender {
    pub fn male() -> Self {
        Self {
            gender: Gender::Male,
        }
    }

    pub fn female() -> Self {
        Self {
            gender: Gender::Female,
        }
    }

    fn label(&self) -> &'static str {
        match self.gender {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }
}

impl EvaluationFunction for HasGender {
    fn evaluate(&self, record: &PatientRecord) -> Evaluation {
        match record.demographics.gender {
            Some(gender) if gender == self.gender => Evaluation::pass(
                format!("Patient is {}", self.label()),
                "Adequate gender",
            ),
            Some(_) => Evaluation::fail(
                format!("Patient is not {}", self.label()),
                "Inadequate gender",
            ),
            None => Evaluation::recoverable_fail(
                "Gender has not been curated yet",
                "Missing gender",
            ),
        }
    }
}

/// Checks the latest WHO performance status against a maximum
pub struct HasWhoStatusOfAtMost {
    max_status: u32,
}

impl HasWhoStatusOfAtMost {
    pub fn new(max_status: u32) -> Self {
        Self { max_status }
    }
}

impl EvaluationFunction for HasWhoStatusOfAtMost {
    fn evaluate(&self, record: &PatientRecord) -> Evaluation {
        match record.who_status {
            Some(status) if status <= self.max_status => Evaluation::pass(
                format!("WHO status {} is at most {}", status, self.max_status),
                "Adequate WHO status",
            ),
            Some(status) => Evaluation::fail(
                format!("WHO status {} exceeds maximum {}", status, self.max_status),
                "Inadequate WHO status",
            ),
            None => Evaluation::recoverable_undetermined(
                "WHO status has not been assessed",
                "Missing WHO status",
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combinators::testing::record;
    use crate::EvaluationResult;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_age_above_minimum_passes() {
        // record() is born 1970, registered 2024
        let function = IsAtLeastXYearsOld::new(18);
        assert_eq!(function.evaluate(&record()).result, EvaluationResult::Pass);
    }

    #[test]
    fn test_age_in_boundary_year_is_undetermined() {
        let function = IsAtLeastXYearsOld::new(54);
        assert_eq!(
            function.evaluate(&record()).result,
            EvaluationResult::Undetermined
        );
    }

    #[test]
    fn test_age_below_minimum_fails() {
        let function = IsAtLeastXYearsOld::new(60);
        let evaluation = function.evaluate(&record());
        assert_eq!(evaluation.result, EvaluationResult::Fail);
        assert!(!evaluation.recoverable);
    }

    #[test]
    fn test_gender_match() {
        assert_eq!(
            HasGender::male().evaluate(&record()).result,
            EvaluationResult::Pass
        );
        assert_eq!(
            HasGender::female().evaluate(&record()).result,
            EvaluationResult::Fail
        );
    }

    #[test]
    fn test_missing_gender_is_recoverable() {
        let mut patient = record();
        patient.demographics.gender = None;
        let evaluation = HasGender::male().evaluate(&patient);
        assert_eq!(evaluation.result, EvaluationResult::Fail);
        assert!(evaluation.recoverable);
    }

    #[test]
    fn test_who_status() {
        let mut patient = record();
        patient.who_status = Some(1);
        assert_eq!(
            HasWhoStatusOfAtMost::new(2).evaluate(&patient).result,
            EvaluationResult::Pass
        );
        assert_eq!(
            HasWhoStatusOfAtMost::new(0).evaluate(&patient).result,
            EvaluationResult::Fail
        );

        patient.who_status = None;
        let evaluation = HasWhoStatusOfAtMost::new(2).evaluate(&patient);
        assert_eq!(evaluation.result, EvaluationResult::Undetermined);
        assert!(evaluation.recoverable);
    }
}
