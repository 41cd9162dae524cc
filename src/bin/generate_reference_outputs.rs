//! Generate outputs for the reference scenarios
//!
//! Writes one JSON result and, where the calculator has one, one CSV series
//! per scenario into `reference_outputs/` so they can be compared against
//! spreadsheet workings.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};

use finance_engine::amortization::LoanTerms;
use finance_engine::export;
use finance_engine::growth::{ContributionPlan, GoalPlan};
use finance_engine::rent_vs_buy::RentVsBuyInputs;
use finance_engine::tax::{Regime, TaxInputs};
use finance_engine::{CalculationRequest, CalculationResponse, CalculatorRunner};

const OUTPUT_DIR: &str = "reference_outputs";

/// Reference scenario configuration
struct Scenario {
    name: &'static str,
    request: CalculationRequest,
}

fn scenarios() -> Vec<Scenario> {
    vec![
        // 1,000,000 at 10% over 5 years: EMI ≈ 21,247.04, interest ≈ 274,822
        Scenario {
            name: "emi",
            request: CalculationRequest::Emi(LoanTerms::new(1_000_000.0, 10.0, 5)),
        },
        // 10,000/month at 12% for 10 years: maturity ≈ 2,323,391
        Scenario {
            name: "sip",
            request: CalculationRequest::Sip(ContributionPlan::new(10_000.0, 12.0, 10)),
        },
        Scenario {
            name: "goal",
            request: CalculationRequest::Goal(GoalPlan::new(5_000_000.0, 15, 10.0)),
        },
        // Old regime with capped claims: taxable 975,000
        Scenario {
            name: "tax_comparison",
            request: CalculationRequest::TaxComparison(
                TaxInputs::new(1_200_000.0, Regime::Old)
                    .with_deductions(150_000.0, 25_000.0, 50_000.0),
            ),
        },
        Scenario {
            name: "rent_vs_buy",
            request: CalculationRequest::RentVsBuy(RentVsBuyInputs {
                home_price: 8_000_000.0,
                down_payment: 1_600_000.0,
                loan_rate_percent: 8.0,
                loan_tenure_years: 20,
                monthly_rent: 20_000.0,
                annual_rent_increase_percent: 5.0,
                horizon_years: 20,
            }),
        },
    ]
}

fn summarize(response: &CalculationResponse) -> String {
    match response {
        CalculationResponse::Emi(s) => format!(
            "EMI {:.2}, total interest {:.2}",
            s.monthly_payment, s.total_interest
        ),
        CalculationResponse::Sip(p) => format!(
            "maturity {:.2}, invested {:.2}",
            p.maturity_value, p.total_contributed
        ),
        CalculationResponse::Goal(g) => {
            format!("required monthly {:.2}", g.required_monthly_contribution)
        }
        CalculationResponse::Retirement(r) => format!(
            "corpus {:.2}, monthly {:.2}",
            r.required_corpus, r.monthly_contribution_needed
        ),
        CalculationResponse::Tax(t) => format!(
            "taxable {:.2}, tax {:.2}",
            t.taxable_income, t.tax_after_deductions
        ),
        CalculationResponse::TaxComparison(c) => format!(
            "old {:.2}, new {:.2}, recommended {}",
            c.old_regime.tax_after_deductions, c.new_regime.tax_after_deductions, c.recommended
        ),
        CalculationResponse::RentVsBuy(r) => format!(
            "buy {:.2}, rent {:.2}, recommendation {}",
            r.total_buy_cost, r.total_rent_cost, r.recommendation
        ),
    }
}

fn main() -> Result<()> {
    env_logger::init();

    println!("Generating reference outputs...\n");

    let out_dir = Path::new(OUTPUT_DIR);
    fs::create_dir_all(out_dir)
        .with_context(|| format!("failed to create {}", out_dir.display()))?;

    let runner = CalculatorRunner::new();
    let scenarios = scenarios();

    for scenario in &scenarios {
        println!("Processing {}...", scenario.name);
        let response = runner
            .run(&scenario.request)
            .with_context(|| format!("scenario {} failed", scenario.name))?;

        let json_path = out_dir.join(format!("{}.json", scenario.name));
        let mut file = File::create(&json_path)
            .with_context(|| format!("failed to create {}", json_path.display()))?;
        writeln!(file, "{}", serde_json::to_string_pretty(&response)?)?;
        println!("  -> Written to {}", json_path.display());

        if response.has_series() {
            let csv_path = out_dir.join(format!("{}.csv", scenario.name));
            let writer = BufWriter::new(
                File::create(&csv_path)
                    .with_context(|| format!("failed to create {}", csv_path.display()))?,
            );
            export::write_response_csv(writer, &response)?;
            println!("  -> Written to {}", csv_path.display());
        }

        println!("     {}", summarize(&response));
    }

    println!("\nDone! Generated outputs for {} scenarios.", scenarios.len());
    Ok(())
}
