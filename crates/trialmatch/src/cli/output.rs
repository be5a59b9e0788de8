//! Output formatting for the CLI

use colored::{control, ColoredString, Colorize};
use trialmatch_eval::EvaluationResult;
use trialmatch_report::{EvaluatedCohort, EvaluatedTrial};

/// Configure colored output from the --color flag (auto, always, never)
pub fn setup_colors(mode: &str) {
    match mode {
        "always" => control::set_override(true),
        "never" => control::set_override(false),
        _ => {}
    }
}

/// Render an evaluation result with its conventional color
pub fn format_result(result: EvaluationResult) -> ColoredString {
    match result {
        EvaluationResult::Pass => result.to_string().green(),
        EvaluationResult::Warn => result.to_string().yellow(),
        EvaluationResult::Undetermined => result.to_string().cyan(),
        EvaluationResult::Fail => result.to_string().red(),
        EvaluationResult::NotEvaluated | EvaluationResult::NotImplemented => {
            result.to_string().dimmed()
        }
    }
}

/// Render a top-level error for stderr
pub fn format_error(error: &anyhow::Error) -> String {
    format!("{} {:#}", "error:".red().bold(), error)
}

/// Print the cohort summary of one evaluated trial
pub fn print_trial_summary(trial: &EvaluatedTrial) {
    println!(
        "{} {} ({})",
        trial.trial_id.bold(),
        trial.acronym,
        if trial.is_open { "open".green() } else { "closed".red() }
    );
    for cohort in &trial.cohorts {
        print_cohort_summary(cohort);
    }
}

fn print_cohort_summary(cohort: &EvaluatedCohort) {
    let eligibility = if cohort.is_potentially_eligible {
        "potentially eligible".green()
    } else {
        "not eligible".red()
    };
    let description = if cohort.cohort_description.is_empty() {
        "(whole trial)"
    } else {
        &cohort.cohort_description
    };

    println!("  {:<40} {}", description, eligibility);
    if !cohort.molecular_events.is_empty() {
        let events: Vec<&str> = cohort.molecular_events.iter().map(String::as_str).collect();
        println!("    events:   {}", events.join(", ").bold());
    }
    for warning in &cohort.warnings {
        println!("    {} {}", "warning:".yellow(), warning);
    }
    for fail in &cohort.fails {
        println!("    {} {}", "fail:".red(), fail);
    }
}
