//! Trial configuration loading
//!
//! Configuration is parsed once at startup, single-threaded and fail-fast:
//! the first malformed criterion aborts the whole load. A corrupt trial
//! definition must never silently disappear from matching.

use std::fs;
use std::path::Path;
use trialmatch_diagnostics::{Result, TrialError, TRM0101, TRM0102};
use trialmatch_model::{Eligibility, CriterionReference, PatientRecord, Trial, TrialConfig, TrialIdentification};
use trialmatch_parser::parse;

/// Build a runtime trial from its raw configuration, parsing every
/// criterion
pub fn trial_from_config(config: TrialConfig) -> Result<Trial> {
    let mut cohort_ids: Vec<&str> = config.cohorts.iter().map(|c| c.cohort_id.as_str()).collect();
    cohort_ids.sort_unstable();
    if let Some(duplicate) = cohort_ids.windows(2).find(|pair| pair[0] == pair[1]) {
        return Err(TrialError::configuration_in(
            TRM0101,
            format!("duplicate cohort id '{}'", duplicate[0]),
            config.trial_id.clone(),
        ));
    }

    let mut eligibility = Vec::with_capacity(config.criteria.len());
    for criterion in &config.criteria {
        for cohort_id in &criterion.applies_to_cohorts {
            if !config.cohorts.iter().any(|c| &c.cohort_id == cohort_id) {
                return Err(TrialError::configuration_in(
                    TRM0102,
                    format!(
                        "criterion '{}' references unknown cohort '{}'",
                        criterion.reference_id, cohort_id
                    ),
                    config.trial_id.clone(),
                ));
            }
        }

        let function = parse(&criterion.inclusion_rule)?;
        log::debug!(
            "parsed criterion {} of trial {}: {}",
            criterion.reference_id,
            config.trial_id,
            function
        );
        eligibility.push(Eligibility {
            reference: CriterionReference::new(&criterion.reference_id, &criterion.reference_text),
            function,
            applies_to_cohorts: criterion.applies_to_cohorts.clone(),
        });
    }

    log::info!(
        "loaded trial {} ({}) with {} criteria across {} cohorts",
        config.trial_id,
        config.acronym,
        eligibility.len(),
        config.cohorts.len()
    );

    Ok(Trial {
        identification: TrialIdentification {
            trial_id: config.trial_id,
            acronym: config.acronym,
            open: config.open,
        },
        eligibility,
        cohorts: config.cohorts,
    })
}

/// Load and parse all trials from a JSON configuration file
pub fn load_trials(path: impl AsRef<Path>) -> Result<Vec<Trial>> {
    let content = fs::read_to_string(path)?;
    let configs: Vec<TrialConfig> = serde_json::from_str(&content)?;
    configs.into_iter().map(trial_from_config).collect()
}

/// Load one patient record from a JSON file
pub fn load_patient(path: impl AsRef<Path>) -> Result<PatientRecord> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}
