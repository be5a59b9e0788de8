//! The validate command: parse-check trial configurations

use anyhow::bail;
use colored::Colorize;
use std::path::{Path, PathBuf};
use trialmatch_eval::FunctionResolver;
use trialmatch_model::Trial;

/// Configuration for the validate command
pub struct ValidateConfig {
    /// Trial configuration files to validate
    pub files: Vec<PathBuf>,
    /// Also check that every rule resolves against the reference registry
    pub check_resolution: bool,
}

pub fn validate(config: ValidateConfig) -> anyhow::Result<()> {
    let resolver = FunctionResolver::with_reference_functions();
    let mut failures = 0usize;

    for file in &config.files {
        match crate::load_trials(file) {
            Ok(trials) => {
                if config.check_resolution {
                    failures += report_resolution_problems(&resolver, &trials, file);
                } else {
                    println!("{} {}", "ok:".green(), file.display());
                }
            }
            Err(error) => {
                failures += 1;
                let diagnostic = error.to_diagnostic();
                eprintln!("{} {}: {}", "error:".red(), file.display(), diagnostic);
            }
        }
    }

    if failures > 0 {
        bail!("{} configuration problem(s) found", failures);
    }
    Ok(())
}

fn report_resolution_problems(
    resolver: &FunctionResolver,
    trials: &[Trial],
    file: &Path,
) -> usize {
    let mut failures = 0usize;
    for trial in trials {
        for eligibility in &trial.eligibility {
            if let Err(error) = resolver.resolve(&eligibility.function) {
                failures += 1;
                eprintln!(
                    "{} {}: criterion {} of trial {}: {}",
                    "error:".red(),
                    file.display(),
                    eligibility.reference.id,
                    trial.identification.trial_id,
                    error
                );
            }
        }
    }
    if failures == 0 {
        println!("{} {}", "ok:".green(), file.display());
    }
    failures
}
