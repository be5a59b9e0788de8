//! Tumor predicates

use crate::{Evaluation, EvaluationFunction};
use trialmatch_ast::EligibilityRule;
use trialmatch_diagnostics::{Result, TrialError, TRM0202};
use trialmatch_model::{PatientRecord, TumorStage};

/// Parse a tumor stage literal (`I` through `IV`)
pub(crate) fn parse_stage(text: &str) -> Result<TumorStage> {
    match text {
        "I" => Ok(TumorStage::I),
        "II" => Ok(TumorStage::II),
        "III" => Ok(TumorStage::III),
        "IV" => Ok(TumorStage::IV),
        _ => Err(TrialError::resolution(
            TRM0202,
            format!("cannot parse tumor stage '{}'", text),
            EligibilityRule::HasTumorStageX.name(),
        )),
    }
}

fn stage_unknown() -> Evaluation {
    Evaluation::recoverable_undetermined(
        "Tumor stage has not been curated",
        "Missing tumor stage",
    )
}

/// Checks for advanced disease (stage III or IV)
pub struct HasAdvancedCancer;

impl EvaluationFunction for HasAdvancedCancer {
    fn evaluate(&self, record: &PatientRecord) -> Evaluation {
        match record.tumor.stage {
            Some(stage) if stage >= TumorStage::III => Evaluation::pass(
                format!("Tumor stage {:?} is advanced", stage),
                "Advanced cancer",
            ),
            Some(stage) => Evaluation::fail(
                format!("Tumor stage {:?} is not advanced", stage),
                "No advanced cancer",
            ),
            None => stage_unknown(),
        }
    }
}

/// Checks for metastatic disease (stage IV)
pub struct HasMetastaticCancer;

impl EvaluationFunction for HasMetastaticCancer {
    fn evaluate(&self, record: &PatientRecord) -> Evaluation {
        match record.tumor.stage {
            Some(stage) if stage.is_metastatic() => {
                Evaluation::pass("Tumor is metastatic", "Metastatic cancer")
            }
            Some(stage) => Evaluation::fail(
                format!("Tumor stage {:?} is not metastatic", stage),
                "No metastatic cancer",
            ),
            None => stage_unknown(),
        }
    }
}

/// Checks for measurable disease per the curated radiology assessment
pub struct HasMeasurableDisease;

impl EvaluationFunction for HasMeasurableDisease {
    fn evaluate(&self, record: &PatientRecord) -> Evaluation {
        match record.tumor.has_measurable_disease {
            Some(true) => Evaluation::pass("Patient has measurable disease", "Measurable disease"),
            Some(false) => Evaluation::fail(
                "Patient has no measurable disease",
                "No measurable disease",
            ),
            None => Evaluation::recoverable_undetermined(
                "Measurable disease status has not been curated",
                "Missing measurable disease status",
            ),
        }
    }
}

/// Checks for brain lesions
pub struct HasBrainMetastases;

impl EvaluationFunction for HasBrainMetastases {
    fn evaluate(&self, record: &PatientRecord) -> Evaluation {
        match record.tumor.has_brain_lesions {
            Some(true) => Evaluation::pass("Patient has brain metastases", "Brain metastases"),
            Some(false) => Evaluation::fail(
                "Patient has no brain metastases",
                "No brain metastases",
            ),
            None => Evaluation::recoverable_undetermined(
                "Brain lesion status has not been curated",
                "Missing brain lesion status",
            ),
        }
    }
}

/// Checks for an exact tumor stage
pub struct HasTumorStage {
    stage: TumorStage,
}

impl HasTumorStage {
    pub fn new(stage: TumorStage) -> Self {
        Self { stage }
    }
}

impl EvaluationFunction for HasTumorStage {
    fn evaluate(&self, record: &PatientRecord) -> Evaluation {
        match record.tumor.stage {
            Some(stage) if stage == self.stage => Evaluation::pass(
                format!("Tumor stage is {:?}", stage),
                "Matching tumor stage",
            ),
            Some(stage) => Evaluation::fail(
                format!("Tumor stage {:?} is not {:?}", stage, self.stage),
                "Tumor stage mismatch",
            ),
            None => stage_unknown(),
        }
    }
}
