//! Calculator runner for single and batch evaluation
//!
//! Requests are independent of one another, so a batch is evaluated in
//! parallel and each element keeps its own `Result`.

use log::{debug, info, warn};
use rayon::prelude::*;
use serde::Serialize;

use crate::error::Result;
use crate::request::{CalculationRequest, CalculationResponse};

/// Runner behaviour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunnerConfig {
    /// Round currency amounts to 2 decimal places in returned records
    pub round_outputs: bool,

    /// Evaluate batches on the rayon thread pool
    pub parallel: bool,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            round_outputs: true,
            parallel: true,
        }
    }
}

/// Outcome of one request in a batch, in input order
#[derive(Debug, Clone, Serialize)]
pub struct BatchEntry {
    pub index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<CalculationResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl BatchEntry {
    pub fn from_result(index: usize, outcome: Result<CalculationResponse>) -> Self {
        match outcome {
            Ok(response) => Self {
                index,
                result: Some(response),
                error: None,
            },
            Err(e) => Self {
                index,
                result: None,
                error: Some(e.to_string()),
            },
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Dispatches requests to their calculators
///
/// # Example
/// ```ignore
/// let runner = CalculatorRunner::new();
/// let response = runner.run(&CalculationRequest::Emi(LoanTerms::new(2_500_000.0, 8.5, 20)))?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct CalculatorRunner {
    config: RunnerConfig,
}

impl CalculatorRunner {
    /// Runner with rounded outputs and parallel batches
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: RunnerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    /// Evaluate a single request
    pub fn run(&self, request: &CalculationRequest) -> Result<CalculationResponse> {
        let response = request.evaluate().map_err(|e| {
            warn!("{} request rejected: {}", request.calculator(), e);
            e
        })?;
        debug!("{} request evaluated", request.calculator());

        if self.config.round_outputs {
            Ok(response.rounded())
        } else {
            Ok(response)
        }
    }

    /// Evaluate many requests; output order matches input order
    pub fn run_batch(&self, requests: &[CalculationRequest]) -> Vec<Result<CalculationResponse>> {
        info!(
            "running batch of {} requests ({})",
            requests.len(),
            if self.config.parallel { "parallel" } else { "sequential" }
        );

        let results: Vec<_> = if self.config.parallel {
            requests.par_iter().map(|r| self.run(r)).collect()
        } else {
            requests.iter().map(|r| self.run(r)).collect()
        };

        let failed = results.iter().filter(|r| r.is_err()).count();
        info!("batch complete: {} ok, {} rejected", results.len() - failed, failed);
        results
    }

    /// Batch evaluation with each outcome tagged by its input position
    pub fn run_batch_entries(&self, requests: &[CalculationRequest]) -> Vec<BatchEntry> {
        self.run_batch(requests)
            .into_iter()
            .enumerate()
            .map(|(index, outcome)| BatchEntry::from_result(index, outcome))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amortization::LoanTerms;
    use crate::growth::{ContributionPlan, GoalPlan};
    use crate::tax::{Regime, TaxInputs};

    fn mixed_batch() -> Vec<CalculationRequest> {
        vec![
            CalculationRequest::Emi(LoanTerms::new(2_500_000.0, 8.5, 20)),
            CalculationRequest::Sip(ContributionPlan::new(10_000.0, 12.0, 10)),
            CalculationRequest::Emi(LoanTerms::new(-5.0, 8.5, 20)),
            CalculationRequest::Goal(GoalPlan::new(5_000_000.0, 15, 12.0)),
            CalculationRequest::Tax(TaxInputs::new(1_200_000.0, Regime::New)),
        ]
    }

    #[test]
    fn test_run_rounds_by_default() {
        let runner = CalculatorRunner::new();
        let response = runner
            .run(&CalculationRequest::Emi(LoanTerms::new(2_500_000.0, 8.5, 20)))
            .unwrap();
        match response {
            CalculationResponse::Emi(schedule) => {
                assert_eq!(schedule.monthly_payment, 21_695.58);
                assert_eq!(schedule.entries.len(), 240);
            }
            other => panic!("unexpected response {:?}", other),
        }
    }

    #[test]
    fn test_raw_outputs_keep_precision() {
        let runner = CalculatorRunner::with_config(RunnerConfig {
            round_outputs: false,
            parallel: false,
        });
        let response = runner
            .run(&CalculationRequest::Emi(LoanTerms::new(2_500_000.0, 8.5, 20)))
            .unwrap();
        match response {
            CalculationResponse::Emi(schedule) => {
                assert_ne!(schedule.monthly_payment, schedule.rounded().monthly_payment);
            }
            other => panic!("unexpected response {:?}", other),
        }
    }

    #[test]
    fn test_batch_preserves_order_and_isolates_failures() {
        let requests = mixed_batch();
        let parallel = CalculatorRunner::new().run_batch(&requests);
        let sequential = CalculatorRunner::with_config(RunnerConfig {
            parallel: false,
            ..RunnerConfig::default()
        })
        .run_batch(&requests);

        assert_eq!(parallel.len(), requests.len());
        assert_eq!(parallel, sequential);

        for (request, outcome) in requests.iter().zip(&parallel) {
            if let Ok(response) = outcome {
                assert_eq!(response.calculator(), request.calculator());
            }
        }
        assert!(parallel[2].is_err());
        assert_eq!(parallel.iter().filter(|r| r.is_ok()).count(), 4);
    }

    #[test]
    fn test_oversized_horizon_fails_alone() {
        let requests = vec![
            CalculationRequest::Emi(LoanTerms::new(2_500_000.0, 8.5, 20)),
            CalculationRequest::Emi(LoanTerms::new(2_500_000.0, 8.5, 400_000_000)),
            CalculationRequest::Sip(ContributionPlan::new(10_000.0, 12.0, 400_000_000)),
            CalculationRequest::Sip(ContributionPlan::new(10_000.0, 12.0, 10)),
        ];
        let results = CalculatorRunner::new().run_batch(&requests);

        assert_eq!(results.len(), 4);
        assert!(results[0].is_ok());
        assert!(results[3].is_ok());
        assert_eq!(
            results[1].as_ref().unwrap_err().field(),
            Some("tenure_years")
        );
        assert_eq!(
            results[2].as_ref().unwrap_err().field(),
            Some("horizon_years")
        );
    }

    #[test]
    fn test_batch_entries_serialize() {
        let entries = CalculatorRunner::new().run_batch_entries(&mixed_batch());
        assert!(entries[0].is_ok());
        assert!(!entries[2].is_ok());
        assert_eq!(entries[2].index, 2);

        let json = serde_json::to_value(&entries[2]).unwrap();
        assert!(json.get("result").is_none());
        assert!(json["error"].as_str().unwrap().contains("principal"));
    }
}
