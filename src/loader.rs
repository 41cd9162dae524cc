//! Load calculation requests from JSON files
//!
//! A file holds either one request object or an array of them.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use log::debug;
use serde_json::Value;
use thiserror::Error;

use crate::request::CalculationRequest;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read requests: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed request: {0}")]
    Json(#[from] serde_json::Error),
}

/// Load all requests from a JSON file
pub fn load_requests<P: AsRef<Path>>(path: P) -> Result<Vec<CalculationRequest>, LoadError> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let requests = load_requests_from_reader(BufReader::new(file))?;
    debug!("loaded {} requests from {}", requests.len(), path.display());
    Ok(requests)
}

/// Load requests from any reader (e.g., stdin, string buffer)
pub fn load_requests_from_reader<R: Read>(reader: R) -> Result<Vec<CalculationRequest>, LoadError> {
    let value: Value = serde_json::from_reader(reader)?;
    let requests = if value.is_array() {
        serde_json::from_value(value)?
    } else {
        vec![serde_json::from_value(value)?]
    };
    Ok(requests)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tax::Regime;

    #[test]
    fn test_load_array() {
        let json = r#"[
            { "calculator": "emi", "principal": 2500000, "annual_rate_percent": 8.5, "tenure_years": 20 },
            { "calculator": "sip", "periodic_amount": 10000, "annual_rate_percent": 12, "horizon_years": 10 },
            { "calculator": "tax", "gross_income": 1200000, "regime": "OLD_REGIME", "section_80c": 150000 }
        ]"#;
        let requests = load_requests_from_reader(json.as_bytes()).unwrap();

        assert_eq!(requests.len(), 3);
        assert_eq!(requests[0].calculator(), "emi");
        assert_eq!(requests[1].calculator(), "sip");
        match &requests[2] {
            CalculationRequest::Tax(inputs) => {
                assert_eq!(inputs.regime, Regime::Old);
                assert_eq!(inputs.section_80c, 150_000.0);
            }
            other => panic!("unexpected request {:?}", other),
        }
    }

    #[test]
    fn test_load_single_object() {
        let json = r#"{
            "calculator": "retirement",
            "current_age": 30,
            "retirement_age": 60,
            "annual_salary": 1200000,
            "inflation_percent": 6,
            "expected_return_percent": 12,
            "expense_ratio": 0.8
        }"#;
        let requests = load_requests_from_reader(json.as_bytes()).unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].calculator(), "retirement");
    }

    #[test]
    fn test_malformed_input() {
        let err = load_requests_from_reader(r#"[{ "calculator": "emi" }]"#.as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::Json(_)));

        let err = load_requests("does/not/exist.json").unwrap_err();
        assert!(matches!(err, LoadError::Io(_)));
    }
}
