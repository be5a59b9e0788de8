//! Eligibility matching command-line interface

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use trialmatch::cli::{execute, explain, output, validate};

/// Clinical-trial eligibility matching tool
#[derive(Parser)]
#[command(name = "trialmatch")]
#[command(author, version, about = "Clinical-trial eligibility matching tools", long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format (json, summary)
    #[arg(short = 'f', long, global = true)]
    format: Option<String>,

    /// Output file (default: stdout)
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    /// Color output (auto, always, never)
    #[arg(long, default_value = "auto", global = true)]
    color: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Match a patient record against a trial configuration
    Match {
        /// Trial configuration JSON file
        trials: PathBuf,

        /// Patient record JSON file
        patient: PathBuf,
    },

    /// Validate trial configuration files
    Validate {
        /// Trial configuration files to validate
        files: Vec<PathBuf>,

        /// Also check rule-to-function resolution
        #[arg(short = 'r', long)]
        resolution: bool,
    },

    /// Parse one criterion and print its tree
    Explain {
        /// Criterion text, e.g. 'AND(IS_MALE, HAS_METASTATIC_CANCER)'
        criterion: String,
    },
}

fn main() {
    human_panic::setup_panic!();

    let cli = Cli::parse();

    output::setup_colors(&cli.color);

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let result = match cli.command {
        Commands::Match { trials, patient } => {
            let config = execute::MatchConfig {
                trials,
                patient,
                output_format: cli.format.clone(),
                output_file: cli.output.clone(),
            };
            execute::execute(config)
        }

        Commands::Validate { files, resolution } => {
            let config = validate::ValidateConfig {
                files,
                check_resolution: resolution,
            };
            validate::validate(config)
        }

        Commands::Explain { criterion } => {
            let config = explain::ExplainConfig { criterion };
            explain::explain(config)
        }
    };

    if let Err(e) = result {
        eprintln!("{}", output::format_error(&e));
        std::process::exit(1);
    }
}
