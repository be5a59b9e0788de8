//! The match command: evaluate one patient against a trial configuration

use crate::cli::output;
use crate::{load_patient, load_trials, TrialMatcher};
use anyhow::Context;
use serde::Serialize;
use std::fs;
use std::path::PathBuf;
use trialmatch_eval::FunctionResolver;
use trialmatch_report::{evaluate_trial, sort_cohorts, EvaluatedCohort, EvaluatedTrial, PatientMatches};

/// Configuration for the match command
pub struct MatchConfig {
    /// Trial configuration JSON file
    pub trials: PathBuf,
    /// Patient record JSON file
    pub patient: PathBuf,
    /// Output format (json, summary)
    pub output_format: Option<String>,
    /// Output file (default: stdout)
    pub output_file: Option<PathBuf>,
}

/// Full match output in JSON form
#[derive(Serialize)]
struct MatchOutput {
    matches: PatientMatches,
    evaluated_trials: Vec<EvaluatedTrial>,
    ranked_cohorts: Vec<EvaluatedCohort>,
}

pub fn execute(config: MatchConfig) -> anyhow::Result<()> {
    let trials = load_trials(&config.trials)
        .with_context(|| format!("loading trials from {}", config.trials.display()))?;

    let resolver = FunctionResolver::with_reference_functions();
    let matcher = TrialMatcher::new(&resolver, trials).context("wiring trial criteria")?;

    let patient = load_patient(&config.patient)
        .with_context(|| format!("loading patient from {}", config.patient.display()))?;

    log::info!(
        "matching patient {} against {} trials",
        patient.patient_id,
        matcher.trial_count()
    );
    let matches = matcher.match_patient(&patient);

    let evaluated_trials: Vec<EvaluatedTrial> =
        matches.trial_matches.iter().map(evaluate_trial).collect();
    let mut ranked_cohorts: Vec<EvaluatedCohort> = evaluated_trials
        .iter()
        .flat_map(|trial| trial.cohorts.iter().cloned())
        .collect();
    sort_cohorts(&mut ranked_cohorts);

    match config.output_format.as_deref() {
        Some("json") => {
            let json = serde_json::to_string_pretty(&MatchOutput {
                matches,
                evaluated_trials,
                ranked_cohorts,
            })?;
            match &config.output_file {
                Some(path) => fs::write(path, json)?,
                None => println!("{}", json),
            }
        }
        _ => {
            println!("Patient {}", matches.patient_id);
            for trial in &evaluated_trials {
                output::print_trial_summary(trial);
            }
        }
    }

    Ok(())
}
