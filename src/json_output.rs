//! JSON output format for absence reports
//!
//! --format json: the full report (config, group summaries with ECDF
//! points, verdicts or typed failures) under a versioned envelope.

use crate::report::AbsenceReport;
use serde::{Deserialize, Serialize};

/// Root JSON output structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonOutput {
    /// Crate version that produced the document
    pub version: String,
    /// Format name
    pub format: String,
    /// Input file, when the report was built from one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input: Option<String>,
    #[serde(flatten)]
    pub report: AbsenceReport,
}

impl JsonOutput {
    pub fn new(report: AbsenceReport) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            format: "sickday-json-v1".to_string(),
            input: None,
            report,
        }
    }

    pub fn with_input(mut self, input: impl Into<String>) -> Self {
        self.input = Some(input.into());
        self
    }

    /// Serialize to pretty-printed JSON
    pub fn to_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ReportConfig;
    use crate::dataset::AbsenceDataset;
    use crate::report::build_report;

    fn report(csv: &str) -> AbsenceReport {
        let dataset = AbsenceDataset::from_reader(csv.as_bytes()).unwrap();
        build_report(&dataset, &ReportConfig::default()).unwrap()
    }

    const CSV: &str = "days,age,sex\n\
        9,40,M\n10,41,M\n11,42,M\n10,43,M\n12,44,M\n\
        4,20,F\n5,21,F\n3,22,F\n4,23,F\n6,24,F\n";

    #[test]
    fn test_envelope() {
        let json = JsonOutput::new(report(CSV)).with_input("absences.csv").to_json().unwrap();
        assert!(json.contains("\"format\": \"sickday-json-v1\""));
        assert!(json.contains("\"input\": \"absences.csv\""));
        assert!(json.contains("\"records\": 10"));
        assert!(json.contains("\"status\": \"completed\""));
        assert!(json.contains("\"kind\": \"sex\""));
        assert!(json.contains("\"ecdf\""));
    }

    #[test]
    fn test_input_omitted_when_unknown() {
        let json = JsonOutput::new(report(CSV)).to_json().unwrap();
        assert!(!json.contains("\"input\""));
    }

    #[test]
    fn test_failed_comparison_serialized_with_error_kind() {
        let json = JsonOutput::new(report("days,age,sex\n5,40,M\n"))
            .to_json()
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        let outcome = &value["comparisons"][0]["outcome"];
        assert_eq!(outcome["status"], "failed");
        assert_eq!(outcome["error"], "insufficient-data");
        assert!(outcome["message"].as_str().unwrap().contains("men"));
    }

    #[test]
    fn test_verdict_fields() {
        let json = JsonOutput::new(report(CSV)).to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        let verdict = &value["comparisons"][0]["outcome"]["verdict"];
        assert_eq!(verdict["test"], "parametric");
        assert_eq!(verdict["alpha"], 0.05);
        let p = verdict["p_value"].as_f64().unwrap();
        assert!((0.0..=1.0).contains(&p));
    }
}
