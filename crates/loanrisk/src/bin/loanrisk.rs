//! Command-line front end for loan-default risk analysis.
//!
//! # Usage
//!
//! ```bash
//! # Describe a dataset column
//! loanrisk describe --dictionary datasets/lending_club_info.csv dti
//!
//! # Full report, as text or JSON
//! loanrisk report --data datasets/lending_club_cleaned.csv
//! loanrisk report --data datasets/lending_club_cleaned.csv --json
//!
//! # Cliff's delta for one column
//! loanrisk effect --data datasets/lending_club_cleaned.csv --column annual_inc
//! ```

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use loanrisk::output::{self, format_description, format_effect, format_report};
use loanrisk::{
    analyze, compare, Column, DisplayOptions, FeatureDictionary, LoanDataset, Method,
    ReportConfig,
};

/// Loan-default risk factor analysis
#[derive(Parser, Debug)]
#[command(name = "loanrisk")]
#[command(about = "Compare charged-off and fully paid loans on DTI and income")]
#[command(version)]
struct Args {
    /// Increase log verbosity (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the dictionary description of a column
    Describe {
        /// Data dictionary CSV (LoanStatNew, Description)
        #[arg(long, env = "LOANRISK_DICTIONARY", default_value = "datasets/lending_club_info.csv")]
        dictionary: PathBuf,

        /// Truncate descriptions longer than this many characters
        #[arg(long, default_value_t = 300)]
        max_colwidth: usize,

        /// Column name to look up
        column: String,
    },

    /// Build the full risk report
    Report {
        /// Loan dataset CSV
        #[arg(long, env = "LOANRISK_DATA", default_value = "datasets/lending_club_cleaned.csv")]
        data: PathBuf,

        /// Exclude loans with DTI at or above this from the DTI comparison
        #[arg(long, default_value_t = 70.0)]
        max_dti: f64,

        /// Annual-income histogram bins
        #[arg(long, default_value_t = 50)]
        bins: usize,

        /// Significance level
        #[arg(long, default_value_t = 0.05)]
        alpha: f64,

        /// Emit pretty-printed JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Cliff's delta and Mann-Whitney U for one column
    Effect {
        /// Loan dataset CSV
        #[arg(long, env = "LOANRISK_DATA", default_value = "datasets/lending_club_cleaned.csv")]
        data: PathBuf,

        /// Column to compare (dti or annual_inc)
        #[arg(long, default_value = "dti")]
        column: Column,

        /// Pair-counting strategy
        #[arg(long, value_enum, default_value_t = MethodArg::Auto)]
        method: MethodArg,

        /// Only keep loans with DTI below this
        #[arg(long)]
        max_dti: Option<f64>,

        /// Significance level
        #[arg(long, default_value_t = 0.05)]
        alpha: f64,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum MethodArg {
    Auto,
    Pairwise,
    Sorted,
}

impl From<MethodArg> for Method {
    fn from(arg: MethodArg) -> Self {
        match arg {
            MethodArg::Auto => Method::Auto,
            MethodArg::Pairwise => Method::Pairwise,
            MethodArg::Sorted => Method::Sorted,
        }
    }
}

type CliResult = Result<ExitCode, Box<dyn std::error::Error>>;

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    match run(args.command) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(command: Command) -> CliResult {
    match command {
        Command::Describe {
            dictionary,
            max_colwidth,
            column,
        } => describe(&dictionary, max_colwidth, &column),
        Command::Report {
            data,
            max_dti,
            bins,
            alpha,
            json,
        } => report(&data, max_dti, bins, alpha, json),
        Command::Effect {
            data,
            column,
            method,
            max_dti,
            alpha,
        } => effect(&data, column, method.into(), max_dti, alpha),
    }
}

fn describe(path: &Path, max_colwidth: usize, column: &str) -> CliResult {
    let dictionary = FeatureDictionary::load(path)?;
    let options = DisplayOptions::default().with_max_colwidth(max_colwidth);
    let description = dictionary.render(column, &options);

    println!("{}", format_description(column, description.as_deref()));
    Ok(if description.is_some() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn report(path: &Path, max_dti: f64, bins: usize, alpha: f64, json: bool) -> CliResult {
    let config = ReportConfig {
        max_dti,
        histogram_bins: bins,
        alpha,
        ..ReportConfig::default()
    };
    config.validate()?;

    let dataset = LoanDataset::load(path)?;
    let report = analyze(&dataset, &config)?;

    if json {
        println!("{}", output::to_json_pretty(&report)?);
    } else {
        println!("{}", format_report(&report, output::is_verbose()));
    }
    Ok(ExitCode::SUCCESS)
}

fn effect(path: &Path, column: Column, method: Method, max_dti: Option<f64>, alpha: f64) -> CliResult {
    let defaults = ReportConfig::default();
    let config = ReportConfig {
        max_dti: max_dti.unwrap_or(defaults.max_dti),
        alpha,
        effect_method: method,
        ..defaults
    };
    config.validate()?;

    let dataset = LoanDataset::load(path)?;
    let comparison = compare(&dataset, column, &config, max_dti.is_some())?;
    println!("{}", column);
    print!("{}", format_effect(&comparison));
    Ok(ExitCode::SUCCESS)
}
