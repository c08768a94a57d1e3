use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use tracing::debug;

use di_cli::utils::parse_money;
use di_cli::{app, logging, profiles, report};
use di_core::State;
use di_core::calculations::DisposableIncomeCalculator;

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Disposable income estimator.
///
/// Combines 2025 federal, FICA and state taxes with BLS household expenditure
/// data to estimate what is left of a salary after taxes and essential living
/// costs.
#[derive(Debug, Parser)]
#[command(name = "disposable-income", version)]
struct Cli {
    /// BLS expenditure table (CSV). Required by `estimate` and `profiles`.
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    /// Calibration file (TOML) overriding the built-in 2025 parameters.
    #[arg(long, global = true)]
    calibration: Option<PathBuf>,

    /// Log at debug level unless RUST_LOG is set.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Estimate disposable income for one person.
    Estimate {
        /// Gross annual salary, e.g. 65000 or 65,000.
        #[arg(long, value_parser = parse_money)]
        salary: Decimal,

        /// Age in years.
        #[arg(long)]
        age: i32,

        /// Full state name, e.g. "New York".
        #[arg(long)]
        state: State,

        /// Use age-group baselines only, without the regional blend.
        #[arg(long)]
        no_blend: bool,

        /// Print the full result as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Run the eight demonstration profiles and print a summary table.
    Profiles {
        /// Print the results as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Print effective tax rates for every supported state.
    Taxes {
        /// Gross income to evaluate.
        #[arg(long, value_parser = parse_money, default_value = "65000")]
        income: Decimal,
    },
}

// ─── commands ────────────────────────────────────────────────────────────────

fn require_data(data: Option<&Path>) -> anyhow::Result<&Path> {
    data.context("--data <CSV> is required for this command")
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let calibration = app::load_calibration(cli.calibration.as_deref())?;

    match cli.command {
        Command::Estimate {
            salary,
            age,
            state,
            no_blend,
            json,
        } => {
            let table = app::load_expenditure_table(require_data(cli.data.as_deref())?)?;
            let calculator = DisposableIncomeCalculator::new(&calibration, &table);

            debug!(%salary, age, %state, blend = !no_blend, "estimating");
            let result = calculator
                .calculate(salary, age, state, !no_blend)
                .with_context(|| format!("estimating {state}, age {age}"))?;

            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                println!("{}", report::format_result(&result, None));
            }
        }
        Command::Profiles { json } => {
            let table = app::load_expenditure_table(require_data(cli.data.as_deref())?)?;
            let calculator = DisposableIncomeCalculator::new(&calibration, &table);
            let results = profiles::run_all(&calculator)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&results)?);
            } else {
                for (profile, result) in profiles::DEMO_PROFILES.iter().zip(&results) {
                    let title = profile.title();
                    println!("{}", report::format_result(&result.result, Some(title.as_str())));
                }
                println!();
                println!("{}", report::summary_table(&results));
            }
        }
        Command::Taxes { income } => {
            if income < Decimal::ZERO {
                anyhow::bail!("--income must not be negative, got {income}");
            }
            let rates = app::tax_rates(&calibration, income)?;
            println!("{}", report::tax_rate_table(income, &rates));
        }
    }

    Ok(())
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init_tracing(cli.verbose);

    run(cli)
}
