//! Finance Engine CLI
//!
//! One subcommand per calculator plus `batch` for JSON request files.
//! Results are printed as JSON; `--csv` writes the calculator's yearly or
//! monthly series alongside.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use log::info;
use serde::Serialize;

use finance_engine::amortization::LoanTerms;
use finance_engine::export;
use finance_engine::growth::{ContributionPlan, GoalPlan};
use finance_engine::loader::load_requests;
use finance_engine::rent_vs_buy::RentVsBuyInputs;
use finance_engine::retirement::RetirementInputs;
use finance_engine::tax::{Regime, TaxInputs};
use finance_engine::{CalculationRequest, CalculationResponse, CalculatorRunner, RunnerConfig};

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum CliRegime {
    Old,
    New,
}

impl From<CliRegime> for Regime {
    fn from(value: CliRegime) -> Self {
        match value {
            CliRegime::Old => Regime::Old,
            CliRegime::New => Regime::New,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "finance-engine",
    version,
    about = "Loan, SIP, goal, retirement, tax and rent-vs-buy projections"
)]
struct Cli {
    #[arg(long, global = true, help = "Print JSON on a single line")]
    compact: bool,

    #[arg(long, global = true, help = "Keep full precision instead of rounding to 2 decimals")]
    raw: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Loan EMI with the full amortization schedule
    Emi {
        #[arg(long)]
        principal: f64,
        #[arg(long, help = "Annual interest rate in percent, e.g. 8.5")]
        rate: f64,
        #[arg(long)]
        years: u32,
        #[arg(long, help = "Write yearly totals to the CSV instead of monthly rows")]
        yearly: bool,
        #[arg(long)]
        csv: Option<PathBuf>,
    },

    /// Maturity value of a monthly investment
    Sip {
        #[arg(long, help = "Monthly contribution")]
        amount: f64,
        #[arg(long, help = "Expected annual return in percent")]
        rate: f64,
        #[arg(long)]
        years: u32,
        #[arg(long, default_value_t = 0.0, help = "Annual increase of the contribution in percent")]
        step_up: f64,
        #[arg(long)]
        csv: Option<PathBuf>,
    },

    /// Monthly investment needed to reach a target amount
    Goal {
        #[arg(long)]
        target: f64,
        #[arg(long)]
        years: u32,
        #[arg(long, help = "Expected annual return in percent")]
        rate: f64,
        #[arg(long, default_value_t = 0.0)]
        savings: f64,
        #[arg(long)]
        csv: Option<PathBuf>,
    },

    /// Retirement corpus and the monthly investment to reach it
    Retirement {
        #[arg(long)]
        current_age: u32,
        #[arg(long)]
        retirement_age: u32,
        #[arg(long, help = "Current annual salary")]
        salary: f64,
        #[arg(long, default_value_t = 0.0)]
        savings: f64,
        #[arg(long, help = "Annual inflation in percent")]
        inflation: f64,
        #[arg(long, help = "Expected annual return in percent")]
        expected_return: f64,
        #[arg(long, help = "Share of salary needed in retirement, e.g. 0.7")]
        expense_ratio: f64,
        #[arg(long)]
        csv: Option<PathBuf>,
    },

    /// Income tax under one regime, or both with --compare
    Tax {
        #[arg(long)]
        income: f64,
        #[arg(long, value_enum, default_value_t = CliRegime::New)]
        regime: CliRegime,
        #[arg(long = "section-80c", default_value_t = 0.0)]
        section_80c: f64,
        #[arg(long = "section-80d", default_value_t = 0.0)]
        section_80d: f64,
        #[arg(long, default_value_t = 0.0)]
        nps: f64,
        #[arg(long, help = "Evaluate both regimes and recommend one")]
        compare: bool,
    },

    /// Cumulative cost of renting against buying with a loan
    RentVsBuy {
        #[arg(long)]
        home_price: f64,
        #[arg(long)]
        down_payment: f64,
        #[arg(long, help = "Annual loan rate in percent")]
        loan_rate: f64,
        #[arg(long)]
        loan_years: u32,
        #[arg(long, help = "Current monthly rent")]
        rent: f64,
        #[arg(long, default_value_t = 0.0, help = "Annual rent increase in percent")]
        rent_increase: f64,
        #[arg(long, help = "Comparison horizon in years")]
        years: u32,
        #[arg(long)]
        csv: Option<PathBuf>,
    },

    /// Evaluate a JSON file holding one request or an array of requests
    Batch {
        #[arg(long)]
        input: PathBuf,
        #[arg(long, help = "Write results here instead of stdout")]
        output: Option<PathBuf>,
        #[arg(long, help = "Evaluate requests one at a time")]
        sequential: bool,
    },
}

struct CsvTarget {
    path: PathBuf,
    yearly: bool,
}

impl Command {
    /// Request for a single-calculator subcommand, with its CSV target
    fn into_request(self) -> Option<(CalculationRequest, Option<CsvTarget>)> {
        let target = |csv: Option<PathBuf>, yearly: bool| csv.map(|path| CsvTarget { path, yearly });
        let request = match self {
            Command::Emi { principal, rate, years, yearly, csv } => (
                CalculationRequest::Emi(LoanTerms::new(principal, rate, years)),
                target(csv, yearly),
            ),
            Command::Sip { amount, rate, years, step_up, csv } => (
                CalculationRequest::Sip(ContributionPlan::new(amount, rate, years).with_step_up(step_up)),
                target(csv, false),
            ),
            Command::Goal { target: amount, years, rate, savings, csv } => (
                CalculationRequest::Goal(GoalPlan::new(amount, years, rate).with_starting_savings(savings)),
                target(csv, false),
            ),
            Command::Retirement {
                current_age,
                retirement_age,
                salary,
                savings,
                inflation,
                expected_return,
                expense_ratio,
                csv,
            } => (
                CalculationRequest::Retirement(RetirementInputs {
                    current_age,
                    retirement_age,
                    annual_salary: salary,
                    current_savings: savings,
                    inflation_percent: inflation,
                    expected_return_percent: expected_return,
                    expense_ratio,
                }),
                target(csv, false),
            ),
            Command::Tax { income, regime, section_80c, section_80d, nps, compare } => {
                let inputs = TaxInputs::new(income, regime.into())
                    .with_deductions(section_80c, section_80d, nps);
                let request = if compare {
                    CalculationRequest::TaxComparison(inputs)
                } else {
                    CalculationRequest::Tax(inputs)
                };
                (request, None)
            }
            Command::RentVsBuy {
                home_price,
                down_payment,
                loan_rate,
                loan_years,
                rent,
                rent_increase,
                years,
                csv,
            } => (
                CalculationRequest::RentVsBuy(RentVsBuyInputs {
                    home_price,
                    down_payment,
                    loan_rate_percent: loan_rate,
                    loan_tenure_years: loan_years,
                    monthly_rent: rent,
                    annual_rent_increase_percent: rent_increase,
                    horizon_years: years,
                }),
                target(csv, false),
            ),
            Command::Batch { .. } => return None,
        };
        Some(request)
    }
}

fn to_json<T: Serialize>(value: &T, compact: bool) -> Result<String> {
    let json = if compact {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    };
    Ok(json)
}

fn write_csv(target: &CsvTarget, response: &CalculationResponse) -> Result<()> {
    let file = File::create(&target.path)
        .with_context(|| format!("failed to create {}", target.path.display()))?;
    let writer = BufWriter::new(file);

    let written = match response {
        CalculationResponse::Emi(schedule) if target.yearly => {
            export::write_yearly_amortization_csv(writer, &schedule.yearly())?;
            true
        }
        other => export::write_response_csv(writer, other)?,
    };
    if written {
        info!("series written to {}", target.path.display());
    }
    Ok(())
}

fn run_batch(
    runner: &CalculatorRunner,
    input: &Path,
    output: Option<&Path>,
    compact: bool,
) -> Result<()> {
    let requests = load_requests(input)
        .with_context(|| format!("failed to load requests from {}", input.display()))?;
    let entries = runner.run_batch_entries(&requests);
    let rejected = entries.iter().filter(|e| !e.is_ok()).count();

    let json = to_json(&entries, compact)?;
    match output {
        Some(path) => {
            let mut file = File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            writeln!(file, "{}", json)?;
            eprintln!("{} results written to {}", entries.len(), path.display());
        }
        None => {
            let stdout = io::stdout();
            writeln!(stdout.lock(), "{}", json)?;
        }
    }

    if rejected > 0 {
        eprintln!("{} of {} requests rejected", rejected, entries.len());
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let mut config = RunnerConfig {
        round_outputs: !cli.raw,
        ..RunnerConfig::default()
    };

    if let Command::Batch { input, output, sequential } = &cli.command {
        config.parallel = !sequential;
        let runner = CalculatorRunner::with_config(config);
        return run_batch(&runner, input, output.as_deref(), cli.compact);
    }

    let runner = CalculatorRunner::with_config(config);
    let Some((request, csv_target)) = cli.command.into_request() else {
        bail!("unsupported command");
    };

    let response = runner.run(&request)?;
    println!("{}", to_json(&response, cli.compact)?);

    if let Some(target) = csv_target {
        write_csv(&target, &response)?;
    }
    Ok(())
}
